// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use prodcat_app::{Category, CategoryId, JoinedProduct, Product, ProductId, Sex, User, UserId};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];

const CATEGORY_TITLES: [(&str, &str); 10] = [
    ("Grocery", "🍞"),
    ("Drinks", "🍺"),
    ("Fruits", "🍏"),
    ("Electronics", "💻"),
    ("Clothes", "👚"),
    ("Garden", "🌱"),
    ("Toys", "🧸"),
    ("Books", "📚"),
    ("Tools", "🔧"),
    ("Sports", "⚽"),
];

const PRODUCT_STEMS: [&str; 20] = [
    "Milk", "Bread", "Eggs", "Jacket", "Sugar", "Apple", "Laptop", "Banana", "Juice", "Orange",
    "Hammer", "Novel", "Shovel", "Kite", "Ball", "Tea", "Scarf", "Mango", "Cable", "Puzzle",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFixture {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl CatalogFixture {
    pub fn joined(&self) -> Result<Vec<JoinedProduct>> {
        let users = self
            .users
            .iter()
            .map(|user| (user.id, user))
            .collect::<BTreeMap<_, _>>();
        let categories = self
            .categories
            .iter()
            .map(|category| (category.id, category))
            .collect::<BTreeMap<_, _>>();

        self.products
            .iter()
            .map(|product| {
                let category = categories
                    .get(&product.category_id)
                    .ok_or_else(|| anyhow!("product {} has no category", product.id))?;
                let user = users
                    .get(&category.owner_id)
                    .ok_or_else(|| anyhow!("category {} has no owner", category.id))?;
                Ok(JoinedProduct {
                    product: product.clone(),
                    category: (*category).clone(),
                    user: (*user).clone(),
                })
            })
            .collect()
    }

    pub fn write_json(&self, dir: &Path) -> Result<()> {
        write_array(dir, "users.json", &self.users)?;
        write_array(dir, "categories.json", &self.categories)?;
        write_array(dir, "products.json", &self.products)?;
        Ok(())
    }
}

fn write_array<T: serde::Serialize>(dir: &Path, file_name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(file_name);
    let body = serde_json::to_string_pretty(rows).context("encode fixture rows")?;
    fs::write(&path, body).with_context(|| format!("write fixture {}", path.display()))
}

pub fn user(id: i64, name: &str, sex: Sex) -> User {
    User {
        id: UserId::new(id),
        name: name.to_owned(),
        sex,
    }
}

pub fn category(id: i64, title: &str, icon: &str, owner_id: i64) -> Category {
    Category {
        id: CategoryId::new(id),
        title: title.to_owned(),
        icon: icon.to_owned(),
        owner_id: UserId::new(owner_id),
    }
}

pub fn product(id: i64, name: &str, category_id: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category_id: CategoryId::new(category_id),
    }
}

pub fn two_fruit_catalog() -> CatalogFixture {
    CatalogFixture {
        users: vec![user(1, "Roma", Sex::Male), user(2, "Anna", Sex::Female)],
        categories: vec![category(10, "Fruits", "🍎", 1)],
        products: vec![product(100, "Banana", 10), product(101, "Apple", 10)],
    }
}

pub fn shop_catalog() -> CatalogFixture {
    CatalogFixture {
        users: vec![
            user(1, "Roma", Sex::Male),
            user(2, "Anna", Sex::Female),
            user(3, "Max", Sex::Male),
            user(4, "John", Sex::Male),
        ],
        categories: vec![
            category(1, "Grocery", "🍞", 2),
            category(2, "Drinks", "🍺", 1),
            category(3, "Fruits", "🍏", 2),
            category(4, "Electronics", "💻", 1),
            category(5, "Clothes", "👚", 3),
        ],
        products: vec![
            product(1, "Milk", 2),
            product(2, "Bread", 1),
            product(3, "Eggs", 1),
            product(4, "Jacket", 5),
            product(5, "Sugar", 1),
            product(6, "Apple", 3),
            product(7, "Laptop", 4),
            product(8, "Banana", 3),
            product(9, "Juice", 2),
        ],
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

#[derive(Debug, Clone)]
pub struct CatalogFaker {
    rng: DeterministicRng,
}

impl CatalogFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn catalog(
        &mut self,
        user_count: usize,
        category_count: usize,
        product_count: usize,
    ) -> CatalogFixture {
        let user_count = user_count.max(1);
        let category_count = category_count.max(1);

        let users = (0..user_count)
            .map(|index| {
                let sex = if self.rng.bool() {
                    Sex::Female
                } else {
                    Sex::Male
                };
                user(index as i64 + 1, self.pick(&FIRST_NAMES), sex)
            })
            .collect::<Vec<_>>();

        let categories = (0..category_count)
            .map(|index| {
                let (title, icon) = CATEGORY_TITLES[self.rng.int_n(CATEGORY_TITLES.len())];
                let owner = self.rng.int_n(user_count) as i64 + 1;
                category(index as i64 + 1, title, icon, owner)
            })
            .collect::<Vec<_>>();

        let products = (0..product_count)
            .map(|index| {
                let stem = self.pick(&PRODUCT_STEMS);
                let name = if self.rng.bool() {
                    stem.to_owned()
                } else {
                    stem.to_lowercase()
                };
                let category_id = self.rng.int_n(category_count) as i64 + 1;
                product(index as i64 + 1, &name, category_id)
            })
            .collect::<Vec<_>>();

        CatalogFixture {
            users,
            categories,
            products,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_fixture_dir(fixture: &CatalogFixture) -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    fixture.write_json(dir.path())?;
    Ok(dir)
}
