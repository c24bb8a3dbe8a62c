// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use prodcat_catalog::Catalog;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Demo,
    Dir(PathBuf),
}

impl CatalogSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(Self::Demo, Self::Dir)
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Demo => "built-in demo catalog".to_owned(),
            Self::Dir(dir) => dir.display().to_string(),
        }
    }

    pub fn load(&self) -> Result<Catalog> {
        match self {
            Self::Demo => Catalog::demo().context("load built-in demo catalog"),
            Self::Dir(dir) => load_dir(dir),
        }
    }
}

fn load_dir(dir: &Path) -> Result<Catalog> {
    Catalog::load_dir(dir).with_context(|| {
        format!(
            "load catalog from {} -- set [catalog].dir or PRODCAT_CATALOG_DIR to a directory with {}, {}, and {}",
            dir.display(),
            prodcat_catalog::USERS_FILE,
            prodcat_catalog::CATEGORIES_FILE,
            prodcat_catalog::PRODUCTS_FILE,
        )
    })
}

pub struct CatalogRuntime {
    source: CatalogSource,
}

impl CatalogRuntime {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }
}

impl prodcat_tui::AppRuntime for CatalogRuntime {
    fn load_catalog(&mut self) -> Result<Catalog> {
        let catalog = self.source.load();
        if let Err(error) = &catalog {
            tracing::error!(
                source = %self.source.describe(),
                error = %format!("{error:#}"),
                "catalog load failed"
            );
        }
        catalog
    }
}
