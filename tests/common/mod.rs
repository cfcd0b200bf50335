//! Shared fixtures for integration tests.

#![allow(dead_code)]

use ordered_float::OrderedFloat;

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub category: &'static str,
    pub unit_price: f64,
    pub units_in_stock: u32,
}

impl Product {
    pub fn price(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.unit_price)
    }
}

fn product(
    id: u32,
    name: &'static str,
    category: &'static str,
    unit_price: f64,
    units_in_stock: u32,
) -> Product {
    Product {
        id,
        name,
        category,
        unit_price,
        units_in_stock,
    }
}

/// Ten products across three categories. Beverages has four members,
/// Condiments three, Seafood three.
pub fn products() -> Vec<Product> {
    vec![
        product(1, "Chai", "Beverages", 18.0, 39),
        product(2, "Chang", "Beverages", 19.0, 17),
        product(3, "Aniseed Syrup", "Condiments", 10.0, 13),
        product(4, "Chef Anton's Cajun Seasoning", "Condiments", 22.0, 53),
        product(5, "Ikura", "Seafood", 31.0, 31),
        product(6, "Grandma's Boysenberry Spread", "Condiments", 25.0, 120),
        product(7, "Konbu", "Seafood", 6.0, 24),
        product(8, "Guarana Fantastica", "Beverages", 4.5, 20),
        product(9, "Carnarvon Tigers", "Seafood", 62.5, 42),
        product(10, "Lakkalikoori", "Beverages", 18.0, 57),
    ]
}

pub fn digits() -> Vec<&'static str> {
    vec![
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ]
}

pub fn numbers() -> Vec<i32> {
    vec![5, 4, 1, 3, 9, 8, 6, 7, 2, 0]
}

pub fn anagram_words() -> Vec<String> {
    [
        "from   ", "  mane", " salt", " earn ", "name   ", "  last   ", " near ", " form  ", "mean",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn mixed_case_words() -> Vec<&'static str> {
    vec!["aPPLE", "AbAcUs", "bRaNcH", "BlUeBeRrY", "ClOvEr", "cHeRry"]
}

pub fn set_a() -> Vec<i32> {
    vec![0, 2, 4, 5, 6, 8, 9]
}

pub fn set_b() -> Vec<i32> {
    vec![1, 3, 5, 7, 8]
}
