// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use prodcat_app::{CategoryId, ProductId, UserId};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read catalog file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("parse {source_name}: {source}")]
    Parse {
        source_name: String,
        source: serde_json::Error,
    },
    #[error("duplicate user id {0}")]
    DuplicateUser(UserId),
    #[error("duplicate category id {0}")]
    DuplicateCategory(CategoryId),
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
    #[error("category {category} references unknown owner {owner}")]
    UnknownOwner { category: CategoryId, owner: UserId },
    #[error("product {product} references unknown category {category}")]
    UnknownCategory {
        product: ProductId,
        category: CategoryId,
    },
}
