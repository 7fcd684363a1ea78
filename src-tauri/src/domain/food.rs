//! Food Entity
//!
//! A menu item stored as one JSON document. Prices are minor units.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

/// Menu category, stored as its localized label
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub available: bool,
    /// URI the webview loads the photo from
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl Entity for Food {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

impl Food {
    /// Invariants every stored food satisfies
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidInput("food id is empty".into()));
        }
        if self.price < 0 {
            return Err(DomainError::InvalidInput(format!("negative price for {}", self.id)));
        }
        let mut seen = HashSet::new();
        for ingredient in &self.ingredients {
            if ingredient.id.is_empty() {
                return Err(DomainError::InvalidInput("ingredient id is empty".into()));
            }
            if ingredient.price < 0 {
                return Err(DomainError::InvalidInput(format!(
                    "negative price for ingredient {}",
                    ingredient.id
                )));
            }
            if !seen.insert(ingredient.id.as_str()) {
                return Err(DomainError::InvalidInput(format!(
                    "duplicate ingredient id {}",
                    ingredient.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Food {
        Food {
            id: id.to_string(),
            name: "Feijoada".to_string(),
            description: "Completa".to_string(),
            price: 5990,
            available: true,
            image: "asset://localhost/abc.png".to_string(),
            category: Category::Meat,
            ingredients: vec![
                Ingredient { id: "i1".into(), name: "Couve".into(), price: 200 },
                Ingredient { id: "i2".into(), name: "Farofa".into(), price: 300 },
            ],
        }
    }

    #[test]
    fn test_valid_food() {
        assert_eq!(sample("f1").validate(), Ok(()));
    }

    #[test]
    fn test_rejects_duplicate_ingredient_ids() {
        let mut food = sample("f1");
        food.ingredients[1].id = "i1".into();
        assert!(matches!(food.validate(), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_negative_and_empty_id() {
        let mut food = sample("f1");
        food.price = -1;
        assert!(food.validate().is_err());
        assert!(sample("  ").validate().is_err());
    }

    #[test]
    fn test_document_uses_localized_category_and_defaults_ingredients() {
        let json = r#"{"id":"x","name":"Sopa","description":"d","price":100,
            "available":false,"image":"","category":"Porções"}"#;
        let food: Food = serde_json::from_str(json).unwrap();
        assert_eq!(food.category, Category::Portions);
        assert!(food.ingredients.is_empty());

        let back = serde_json::to_string(&sample("f1")).unwrap();
        assert!(back.contains(r#""category":"Carnes""#));
    }
}
