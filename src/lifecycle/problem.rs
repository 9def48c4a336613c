//! Problem definitions: the list of orders a simulation replays.
//!
//! A problem file is a JSON array of [`OrderDescriptor`]s:
//!
//! ```json
//! [{"id": "a1", "name": "Pizza", "temp": "hot", "freshness": 120}]
//! ```

use crate::kitchen::KitchenError;
use crate::model::{OrderDescriptor, Temperature};
use std::fs;
use std::path::Path;
use tracing::info;

/// Reads and parses a problem file.
///
/// # Errors
/// `KitchenError::Problem` if the file cannot be read or is not a descriptor array.
pub fn load_problem(path: impl AsRef<Path>) -> Result<Vec<OrderDescriptor>, KitchenError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| KitchenError::Problem(format!("{}: {e}", path.display())))?;
    let orders = parse_problem(&raw)?;
    info!(path = %path.display(), orders = orders.len(), "Problem loaded");
    Ok(orders)
}

pub fn parse_problem(raw: &str) -> Result<Vec<OrderDescriptor>, KitchenError> {
    Ok(serde_json::from_str(raw)?)
}

/// A small built-in problem mixing all three temperature classes.
pub fn sample_orders() -> Vec<OrderDescriptor> {
    let dishes = [
        ("Margherita Pizza", Temperature::Hot, 120),
        ("Vanilla Ice Cream", Temperature::Cold, 90),
        ("Caesar Salad", Temperature::Room, 60),
        ("Chicken Ramen", Temperature::Hot, 40),
        ("Iced Latte", Temperature::Cold, 30),
        ("Banana Bread", Temperature::Room, 150),
        ("Beef Burrito", Temperature::Hot, 75),
        ("Sushi Platter", Temperature::Cold, 45),
        ("Fruit Cup", Temperature::Room, 25),
        ("Tomato Soup", Temperature::Hot, 55),
        ("Cheesecake", Temperature::Cold, 110),
        ("Pretzel", Temperature::Room, 80),
    ];
    dishes
        .iter()
        .enumerate()
        .map(|(i, (name, temp, freshness))| OrderDescriptor {
            id: format!("order_{}", i + 1),
            name: name.to_string(),
            temp: *temp,
            freshness: *freshness,
        })
        .collect()
}
