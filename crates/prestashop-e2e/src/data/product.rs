// Product factory

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

const ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Generic", "Handcrafted", "Handmade", "Licensed",
    "Refined", "Unbranded", "Tasty",
];

const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants",
    "Shirt", "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese",
    "Bacon", "Pizza", "Salad", "Sausages", "Chips",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco",
    "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat",
];

/// Product type, displayed as in the type drop-down of the product form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductType {
    #[default]
    #[serde(rename = "Standard product")]
    Standard,
    #[serde(rename = "Pack of products")]
    Pack,
    #[serde(rename = "Virtual product")]
    Virtual,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProductType::Standard => "Standard product",
            ProductType::Pack => "Pack of products",
            ProductType::Virtual => "Virtual product",
        })
    }
}

/// Fields to force when generating a product; the rest is random.
#[derive(Debug, Clone, Default)]
pub struct ProductOverrides {
    pub name: Option<String>,
    pub product_type: Option<ProductType>,
    pub status: Option<bool>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
}

/// A product to create through the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub product_type: ProductType,
    /// Online on the storefront
    pub status: bool,
    pub summary: String,
    pub description: String,
    pub reference: String,
    pub quantity: i32,
    pub price: f64,
}

impl ProductData {
    pub fn new(overrides: ProductOverrides) -> Self {
        Self::with_rng(overrides, &mut rand::thread_rng())
    }

    /// Generates the product with the given random source.
    pub fn with_rng<R: Rng + ?Sized>(overrides: ProductOverrides, rng: &mut R) -> Self {
        let name = overrides
            .name
            .unwrap_or_else(|| random_product_name(rng))
            .to_uppercase();

        Self {
            name,
            product_type: overrides.product_type.unwrap_or_default(),
            status: overrides.status.unwrap_or(true),
            summary: overrides.summary.unwrap_or_else(|| random_sentences(rng, 1)),
            description: overrides
                .description
                .unwrap_or_else(|| random_sentences(rng, 2)),
            reference: random_reference(rng),
            quantity: overrides.quantity.unwrap_or_else(|| rng.gen_range(1..=9)),
            price: overrides
                .price
                .unwrap_or_else(|| f64::from(rng.gen_range(10u32..=20))),
        }
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

fn random_product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, PRODUCTS)
    )
}

fn random_sentences<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(4..=10);
            let words: Vec<&str> = (0..len).map(|_| pick(rng, LOREM)).collect();
            let sentence = words.join(" ");
            let mut chars = sentence.chars();
            match chars.next() {
                Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_reference<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(7)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}
