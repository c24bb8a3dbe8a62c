// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::{CategoryId, SortColumn, SortState, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub user: Option<UserId>,
    pub query: String,
    pub categories: BTreeSet<CategoryId>,
    pub sort: SortState,
}

impl Selection {
    #[must_use]
    pub fn select_user(&self, user: Option<UserId>) -> Self {
        Self {
            user,
            ..self.clone()
        }
    }

    /// Stores the text verbatim; trimming happens when filtering.
    #[must_use]
    pub fn set_query(&self, text: impl Into<String>) -> Self {
        Self {
            query: text.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn clear_query(&self) -> Self {
        self.set_query(String::new())
    }

    #[must_use]
    pub fn toggle_category(&self, category: CategoryId) -> Self {
        let mut categories = self.categories.clone();
        if !categories.remove(&category) {
            categories.insert(category);
        }
        Self {
            categories,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn clear_categories(&self) -> Self {
        Self {
            categories: BTreeSet::new(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn reset_all(&self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn cycle_sort(&self, column: SortColumn) -> Self {
        Self {
            sort: self.sort.cycle(column),
            ..self.clone()
        }
    }

    pub fn effective_query(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}
