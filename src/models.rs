//! Frontend Models
//!
//! Data structures matching backend documents.

use serde::{Deserialize, Serialize};

/// Menu category. Serialized with its localized label, which is the value
/// stored in the food documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Massas")]
    Pasta,
    #[serde(rename = "Pizzas")]
    Pizza,
    #[serde(rename = "Carnes")]
    Meat,
    #[serde(rename = "Caldos")]
    Soup,
    #[serde(rename = "Porções")]
    Portions,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Pasta,
        Category::Pizza,
        Category::Meat,
        Category::Soup,
        Category::Portions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Pasta => "Massas",
            Category::Pizza => "Pizzas",
            Category::Meat => "Carnes",
            Category::Soup => "Caldos",
            Category::Portions => "Porções",
        }
    }
}

/// Ingredient line item (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientItem {
    pub id: String,
    pub name: String,
    /// Price in minor units (centavos)
    pub price: i64,
}

/// Food document (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in minor units (centavos)
    pub price: i64,
    pub available: bool,
    /// Asset URI or data URL
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub ingredients: Vec<IngredientItem>,
}
