//! Demo data for the local and memory backends
//!
//! Seeds a small burger menu and the test account used in the docs:
//! - 8 products across burgers, sides and drinks
//! - one user, `colmeia@email.com` / `123456`
//! - empty cart, orders and contacts

use rust_decimal::Decimal;

use super::memory::Collections;
use crate::domain::{Product, User, UserRecord};

pub const DEMO_EMAIL: &str = "colmeia@email.com";
pub const DEMO_PASSWORD: &str = "123456";

/// Generate the demo menu
pub fn generate_demo_products() -> Vec<Product> {
    vec![
        Product::new("1", "Classic Burger", Decimal::new(2590, 2), 10)
            .with_category("burgers")
            .with_description("Beef patty, cheddar, lettuce, tomato and house sauce")
            .with_image("/images/classic-burger.png"),
        Product::new("2", "Bacon Burger", Decimal::new(2990, 2), 8)
            .with_category("burgers")
            .with_description("Beef patty, crispy bacon, cheddar and caramelised onion")
            .with_image("/images/bacon-burger.png"),
        Product::new("3", "Double Smash", Decimal::new(3490, 2), 5)
            .with_category("burgers")
            .with_description("Two smashed patties, double cheese and pickles")
            .with_image("/images/double-smash.png"),
        Product::new("4", "Veggie Burger", Decimal::new(2790, 2), 6)
            .with_category("burgers")
            .with_description("Chickpea patty, rocket, tomato and vegan mayo")
            .with_image("/images/veggie-burger.png"),
        Product::new("5", "French Fries", Decimal::new(1290, 2), 20)
            .with_category("sides")
            .with_description("Crispy fries with sea salt")
            .with_image("/images/fries.png"),
        Product::new("6", "Onion Rings", Decimal::new(1490, 2), 12)
            .with_category("sides")
            .with_description("Beer-battered onion rings")
            .with_image("/images/onion-rings.png"),
        Product::new("7", "Cola", Decimal::new(690, 2), 30)
            .with_category("drinks")
            .with_description("350ml can")
            .with_image("/images/cola.png"),
        Product::new("8", "Chocolate Milkshake", Decimal::new(1590, 2), 0)
            .with_category("drinks")
            .with_description("Sold out today")
            .with_image("/images/milkshake.png"),
    ]
}

/// Generate the demo user
pub fn generate_demo_users() -> Vec<UserRecord> {
    vec![UserRecord {
        user: User {
            id: "1".to_string(),
            email: DEMO_EMAIL.to_string(),
            name: "Colmeia".to_string(),
            phone: Some("(11) 99999-9999".to_string()),
        },
        password: DEMO_PASSWORD.to_string(),
    }]
}

/// A fresh `db.json` database
pub fn seed_collections() -> Collections {
    Collections {
        products: generate_demo_products(),
        users: generate_demo_users(),
        ..Default::default()
    }
}
