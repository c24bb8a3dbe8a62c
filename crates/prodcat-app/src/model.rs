// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub sex: Sex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub icon: String,
    pub owner_id: UserId,
}

impl Category {
    pub fn label(&self) -> String {
        format!("{} - {}", self.icon, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedProduct {
    pub product: Product,
    pub category: Category,
    pub user: User,
}

impl JoinedProduct {
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    pub const fn category_id(&self) -> CategoryId {
        self.category.id
    }

    pub const fn owner_id(&self) -> UserId {
        self.user.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Id,
    Product,
    Category,
    User,
}

impl SortColumn {
    pub const ALL: [Self; 4] = [Self::Id, Self::Product, Self::Category, Self::User];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Product => "product",
            Self::Category => "category",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "product" | "name" => Some(Self::Product),
            "category" => Some(Self::Category),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Product => "Product",
            Self::Category => "Category",
            Self::User => "User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Base(SortColumn),
    Reversed(SortColumn),
}

impl SortState {
    pub const fn sort_key(self) -> Option<SortColumn> {
        match self {
            Self::Unsorted => None,
            Self::Base(column) | Self::Reversed(column) => Some(column),
        }
    }

    pub const fn reversed(self) -> bool {
        matches!(self, Self::Reversed(_))
    }

    #[must_use]
    pub fn cycle(self, column: SortColumn) -> Self {
        match self {
            Self::Base(current) if current == column => Self::Reversed(column),
            Self::Reversed(current) if current == column => Self::Unsorted,
            _ => Self::Base(column),
        }
    }

    pub fn indicator(self, column: SortColumn) -> SortIndicator {
        match self {
            Self::Base(current) if current == column => SortIndicator::Descending,
            Self::Reversed(current) if current == column => SortIndicator::Ascending,
            _ => SortIndicator::Neutral,
        }
    }
}

/// Header icon for one column. Base order is descending, so the unreversed
/// key shows `Descending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Neutral,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Neutral => "↕",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, SortColumn, SortIndicator, SortState};
    use crate::{CategoryId, UserId};

    #[test]
    fn sort_cycle_walks_three_states() {
        let base = SortState::Unsorted.cycle(SortColumn::Product);
        assert_eq!(base, SortState::Base(SortColumn::Product));
        assert_eq!(base.sort_key(), Some(SortColumn::Product));
        assert!(!base.reversed());

        let reversed = base.cycle(SortColumn::Product);
        assert_eq!(reversed, SortState::Reversed(SortColumn::Product));
        assert!(reversed.reversed());

        assert_eq!(reversed.cycle(SortColumn::Product), SortState::Unsorted);
    }

    #[test]
    fn switching_column_restarts_at_base() {
        let reversed = SortState::Reversed(SortColumn::Id);
        assert_eq!(
            reversed.cycle(SortColumn::User),
            SortState::Base(SortColumn::User)
        );
        assert_eq!(
            SortState::Base(SortColumn::Id).cycle(SortColumn::Category),
            SortState::Base(SortColumn::Category)
        );
    }

    #[test]
    fn indicators_follow_state() {
        let state = SortState::Base(SortColumn::Id);
        assert_eq!(state.indicator(SortColumn::Id), SortIndicator::Descending);
        assert_eq!(state.indicator(SortColumn::User), SortIndicator::Neutral);

        let state = SortState::Reversed(SortColumn::Id);
        assert_eq!(state.indicator(SortColumn::Id), SortIndicator::Ascending);

        for column in SortColumn::ALL {
            assert_eq!(
                SortState::Unsorted.indicator(column),
                SortIndicator::Neutral
            );
        }
    }

    #[test]
    fn sort_column_parse_accepts_labels() {
        for column in SortColumn::ALL {
            assert_eq!(SortColumn::parse(column.as_str()), Some(column));
        }
        assert_eq!(SortColumn::parse("name"), Some(SortColumn::Product));
        assert_eq!(SortColumn::parse("price"), None);
    }

    #[test]
    fn category_label_joins_icon_and_title() {
        let category = Category {
            id: CategoryId::new(3),
            title: "Fruits".to_owned(),
            icon: "🍏".to_owned(),
            owner_id: UserId::new(2),
        };
        assert_eq!(category.label(), "🍏 - Fruits");
    }
}
