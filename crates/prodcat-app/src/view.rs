// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::{JoinedProduct, Selection, SortColumn};

/// Products visible under `selection`, in display order.
///
/// Filters run user, text, then category and combine by AND. Sorting
/// compares the second item against the first, so the base order of every
/// column is descending; a reversed selection flips the sorted sequence.
/// Equal keys keep catalog order before the flip.
pub fn compute_visible<'a>(
    products: &'a [JoinedProduct],
    selection: &Selection,
) -> Vec<&'a JoinedProduct> {
    let query = selection.effective_query();

    let mut visible = products
        .iter()
        .filter(|product| {
            selection
                .user
                .is_none_or(|user| product.owner_id() == user)
        })
        .filter(|product| {
            query
                .as_deref()
                .is_none_or(|query| product.name().to_lowercase().contains(query))
        })
        .filter(|product| {
            selection.categories.is_empty()
                || selection.categories.contains(&product.category_id())
        })
        .collect::<Vec<_>>();

    if let Some(column) = selection.sort.sort_key() {
        visible.sort_by(|first, second| compare_by_column(column, second, first));
    }

    if selection.sort.reversed() {
        visible.reverse();
    }

    visible
}

pub fn compare_by_column(
    column: SortColumn,
    left: &JoinedProduct,
    right: &JoinedProduct,
) -> Ordering {
    match column {
        SortColumn::Id => left.id().cmp(&right.id()),
        SortColumn::Product => collate(left.name(), right.name()),
        SortColumn::Category => collate(&left.category.title, &right.category.title),
        SortColumn::User => collate(&left.user.name, &right.user.name),
    }
}

fn collate(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(&base_letters(right))
        .then_with(|| folded(left).cmp(&folded(right)))
        .then_with(|| case_pattern(left).cmp(&case_pattern(right)))
        .then_with(|| left.cmp(right))
}

fn folded(text: &str) -> String {
    text.nfd().collect::<String>().to_lowercase()
}

fn base_letters(text: &str) -> String {
    folded(text)
        .chars()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

fn case_pattern(text: &str) -> Vec<bool> {
    text.chars().map(char::is_uppercase).collect()
}
