//! Where the console's records come from.
//!
//! Records are read from JSON exports of the backend API (`users.json`,
//! `products.json`, `categories.json`, `orders.json`) when a data directory is
//! given; any file that is absent falls back to the built-in demo records.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, TimeZone, Utc};
use color_eyre::eyre::WrapErr;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::model::{Category, Order, OrderItem, OrderStatus, Product, Resource, Role, User};

const NAMED_CATEGORIES: [&str; 5] = [
    "Émetteurs FM/AM",
    "Microphones de studio",
    "Mélangeurs audio",
    "Systèmes de radiodiffusion",
    "Casques et moniteurs",
];

const CATEGORY_COUNT: u32 = 36;
const PRODUCT_COUNT: u32 = 15;
const USER_COUNT: u32 = 10;
const ORDER_COUNT: u32 = 10;

/// Every record the console lists.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub orders: Vec<Order>,
}

impl Dataset {
    /// Built-in demo records. Deterministic, so tests and screenshots agree.
    pub fn demo() -> Self {
        let mut dataset = Self {
            users: demo_users(),
            products: demo_products(),
            categories: demo_categories(),
            orders: Vec::new(),
        };
        dataset.link_categories();
        dataset.orders = demo_orders(&dataset.products);
        dataset
    }

    /// Load records from `dir`, using demo records for missing files.
    pub fn load(dir: &Path) -> color_eyre::Result<Self> {
        let demo = Self::demo();
        let mut dataset = Self {
            users: load_or(dir, demo.users)?,
            products: load_or(dir, demo.products)?,
            categories: load_or(dir, demo.categories)?,
            orders: load_or(dir, demo.orders)?,
        };
        dataset.link_categories();
        info!(
            dir = %dir.display(),
            users = dataset.users.len(),
            products = dataset.products.len(),
            categories = dataset.categories.len(),
            orders = dataset.orders.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Resolve each product's `category_id` against the category list.
    fn link_categories(&mut self) {
        for product in &mut self.products {
            product.category = self
                .categories
                .iter()
                .find(|c| c.id == product.category_id)
                .cloned();
        }
    }
}

fn load_or<R: Resource + DeserializeOwned>(dir: &Path, fallback: Vec<R>) -> color_eyre::Result<Vec<R>> {
    let path = dir.join(format!("{}.json", R::NAME));
    if !path.exists() {
        debug!(path = %path.display(), "No export found, using demo records");
        return Ok(fallback);
    }
    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).wrap_err_with(|| format!("Failed to parse {}", path.display()))
}

fn demo_categories() -> Vec<Category> {
    (1..=CATEGORY_COUNT)
        .map(|id| Category {
            id,
            name: NAMED_CATEGORIES
                .get(id as usize - 1)
                .map_or_else(|| format!("Catégorie Radio {id}"), ToString::to_string),
        })
        .collect()
}

fn demo_products() -> Vec<Product> {
    let named = [
        ("Émetteur FM 500W", "Émetteur FM professionnel de 500W", 2499.99, 1),
        ("Microphone Studio Pro", "Microphone à condensateur pour studio", 599.99, 2),
        ("Console de mixage 16 pistes", "Console analogique 16 canaux", 1299.99, 3),
        ("Système RDS complet", "Encodeur RDS avec logiciel de gestion", 3499.99, 4),
        ("Casque de monitoring", "Casque fermé pour le contrôle en studio", 249.99, 5),
    ];
    let mut products: Vec<Product> = named
        .into_iter()
        .zip(1..)
        .map(|((name, description, price, category_id), id)| Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            image_url: None,
            category_id,
            category: None,
        })
        .collect();

    for id in 6..=PRODUCT_COUNT {
        products.push(Product {
            id,
            name: format!("Produit Radio {id}"),
            description: format!("Description du produit radio {id}"),
            price: f64::from(id * 137 % 1000) + 0.99,
            image_url: None,
            category_id: (id - 1) % 5 + 1,
            category: None,
        });
    }
    products
}

fn demo_users() -> Vec<User> {
    let mut users = vec![
        User {
            id: 1,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: "admin@test.com".to_string(),
            phone: "+33612345678".to_string(),
            address: Some("123 Rue de la Radio, Paris".to_string()),
            role: Role::Dmj,
            photo: None,
        },
        User {
            id: 2,
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            email: "jean.dupont@radio.fr".to_string(),
            phone: "+33687654321".to_string(),
            address: Some("45 Avenue des Ondes, Lyon".to_string()),
            role: Role::Dmj,
            photo: None,
        },
    ];
    for id in 3..=USER_COUNT {
        let staff = id <= 5;
        users.push(User {
            id,
            first_name: format!("Prénom{id}"),
            last_name: format!("Nom{id}"),
            email: if staff {
                format!("user{id}@radio.fr")
            } else {
                format!("user{id}@auditeur.fr")
            },
            phone: format!("+3361234{id}000"),
            address: Some(format!("{id}00 Rue de l'exemple, Ville{id}")),
            role: if staff { Role::Dmj } else { Role::Listener },
            photo: None,
        });
    }
    users
}

fn demo_orders(products: &[Product]) -> Vec<Order> {
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).single().unwrap_or_default();
    let statuses = [OrderStatus::Pending, OrderStatus::Shipped, OrderStatus::Delivered];

    (1..=ORDER_COUNT)
        .map(|id| {
            let items: Vec<OrderItem> = (0..(id % 3 + 1))
                .filter_map(|n| {
                    let product = products.get(((id + n * 4) as usize) % products.len().max(1))?;
                    Some(OrderItem {
                        id: id * 10 + n,
                        order_id: id,
                        product_id: product.id,
                        quantity: (id + n) % 3 + 1,
                        unit_price: product.price,
                        product: Some(product.clone()),
                    })
                })
                .collect();
            let total = items.iter().map(OrderItem::subtotal).sum();
            Order {
                id,
                dmj_id: (id - 1) % 5 + 1,
                date: start + Duration::days(i64::from(id) * 3),
                status: statuses[(id as usize) % statuses.len()],
                total,
                items,
            }
        })
        .collect()
}
