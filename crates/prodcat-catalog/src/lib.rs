// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod error;

pub use error::CatalogError;

use anyhow::{Result, bail};
use prodcat_app::{Category, JoinedProduct, Product, ProductId, Selection, User, compute_visible};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const USERS_FILE: &str = "users.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const PRODUCTS_FILE: &str = "products.json";

const DEMO_USERS: &str = include_str!("../fixtures/users.json");
const DEMO_CATEGORIES: &str = include_str!("../fixtures/categories.json");
const DEMO_PRODUCTS: &str = include_str!("../fixtures/products.json");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<JoinedProduct>,
    products_by_id: BTreeMap<ProductId, usize>,
}

impl Catalog {
    /// Validates references and joins products. Fails on the first duplicate
    /// id or dangling reference.
    pub fn from_parts(
        users: Vec<User>,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let users_by_id = index_by(&users, |user| user.id, CatalogError::DuplicateUser)?;
        let categories_by_id = index_by(
            &categories,
            |category| category.id,
            CatalogError::DuplicateCategory,
        )?;
        index_by(&products, |product| product.id, CatalogError::DuplicateProduct)?;

        for category in &categories {
            if !users_by_id.contains_key(&category.owner_id) {
                return Err(CatalogError::UnknownOwner {
                    category: category.id,
                    owner: category.owner_id,
                });
            }
        }

        let mut joined = Vec::with_capacity(products.len());
        for product in products {
            let category_index = *categories_by_id.get(&product.category_id).ok_or(
                CatalogError::UnknownCategory {
                    product: product.id,
                    category: product.category_id,
                },
            )?;
            let category = categories[category_index].clone();
            let user = users[users_by_id[&category.owner_id]].clone();
            joined.push(JoinedProduct {
                product,
                category,
                user,
            });
        }
        let products_by_id = joined
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id(), index))
            .collect();

        Ok(Self {
            users,
            categories,
            products: joined,
            products_by_id,
        })
    }

    pub fn demo() -> Result<Self, CatalogError> {
        Self::from_parts(
            parse_rows("demo users", DEMO_USERS)?,
            parse_rows("demo categories", DEMO_CATEGORIES)?,
            parse_rows("demo products", DEMO_PRODUCTS)?,
        )
    }

    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let catalog = Self::from_parts(
            read_rows(&dir.join(USERS_FILE))?,
            read_rows(&dir.join(CATEGORIES_FILE))?,
            read_rows(&dir.join(PRODUCTS_FILE))?,
        )?;
        tracing::info!(
            dir = %dir.display(),
            users = catalog.users.len(),
            categories = catalog.categories.len(),
            products = catalog.products.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn products(&self) -> &[JoinedProduct] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&JoinedProduct> {
        self.products_by_id
            .get(&id)
            .map(|index| &self.products[*index])
    }

    pub fn visible(&self, selection: &Selection) -> Vec<&JoinedProduct> {
        compute_visible(&self.products, selection)
    }
}

fn index_by<T, K: Ord + Copy>(
    rows: &[T],
    key: impl Fn(&T) -> K,
    duplicate: impl Fn(K) -> CatalogError,
) -> Result<BTreeMap<K, usize>, CatalogError> {
    let mut index = BTreeMap::new();
    for (position, row) in rows.iter().enumerate() {
        match index.entry(key(row)) {
            Entry::Vacant(slot) => {
                slot.insert(position);
            }
            Entry::Occupied(slot) => return Err(duplicate(*slot.key())),
        }
    }
    Ok(index)
}

fn parse_rows<T: DeserializeOwned>(
    source_name: &str,
    raw: &str,
) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
        source_name: source_name.to_owned(),
        source,
    })
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CatalogError> {
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&path.display().to_string(), &raw)
}

pub fn catalog_dir_from_env() -> Option<PathBuf> {
    env::var_os("PRODCAT_CATALOG_DIR")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn validate_catalog_dir(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("catalog directory must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "catalog directory {path:?} looks like a URI ({scheme}://); catalogs load from a local directory"
            );
        }
    }

    if path.ends_with(".json") {
        bail!(
            "catalog directory {path:?} names a JSON file; point it at the directory holding {USERS_FILE}, {CATEGORIES_FILE}, and {PRODUCTS_FILE}"
        );
    }

    Ok(())
}
