//! Ingredient Editor
//!
//! Entry-dialog state for a food's ingredient list. The list itself belongs
//! to the food draft; every operation here returns a new list that the caller
//! stores wholesale.

use crate::confirm::ConfirmAction;
use crate::format::new_id;
use crate::models::IngredientItem;

/// What the entry dialog will do on save
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Add,
    Edit(String),
}

#[derive(Debug, Clone, Default)]
pub struct IngredientEditor {
    open: bool,
    mode: EntryMode,
    name: String,
    price: i64,
    delete: ConfirmAction<String>,
}

/// Append a new ingredient with a fresh id
pub fn append_ingredient(list: &[IngredientItem], name: &str, price: i64) -> Vec<IngredientItem> {
    let mut next = list.to_vec();
    next.push(IngredientItem {
        id: new_id(),
        name: name.to_string(),
        price,
    });
    next
}

/// Replace name/price of the matching entry, keeping its id and position
pub fn replace_ingredient(
    list: &[IngredientItem],
    id: &str,
    name: &str,
    price: i64,
) -> Vec<IngredientItem> {
    list.iter()
        .map(|i| {
            if i.id == id {
                IngredientItem {
                    id: i.id.clone(),
                    name: name.to_string(),
                    price,
                }
            } else {
                i.clone()
            }
        })
        .collect()
}

pub fn remove_ingredient(list: &[IngredientItem], id: &str) -> Vec<IngredientItem> {
    list.iter().filter(|i| i.id != id).cloned().collect()
}

impl IngredientEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &EntryMode {
        &self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    /// Open the entry dialog for a new ingredient
    pub fn open_add(&mut self) {
        self.reset_entry();
        self.open = true;
    }

    /// Load an ingredient into the entry dialog. Returns false if the id is gone.
    pub fn edit(&mut self, list: &[IngredientItem], id: &str) -> bool {
        match list.iter().find(|i| i.id == id) {
            Some(ingredient) => {
                self.name = ingredient.name.clone();
                self.price = ingredient.price;
                self.mode = EntryMode::Edit(ingredient.id.clone());
                self.open = true;
                true
            }
            None => false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: i64) {
        self.price = price.max(0);
    }

    /// Append the entry as a new ingredient, then clear and close.
    /// Returns None (dialog stays open) when the name is blank.
    pub fn add(&mut self, list: &[IngredientItem]) -> Option<Vec<IngredientItem>> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let next = append_ingredient(list, &name, self.price);
        self.close();
        Some(next)
    }

    /// Commit the entry dialog in whatever mode it was opened
    pub fn save(&mut self, list: &[IngredientItem]) -> Option<Vec<IngredientItem>> {
        match self.mode.clone() {
            EntryMode::Add => self.add(list),
            EntryMode::Edit(id) => {
                let name = self.name.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                let next = replace_ingredient(list, &id, &name, self.price);
                self.close();
                Some(next)
            }
        }
    }

    /// Cancel/close the entry dialog; transient fields never outlive it
    pub fn close(&mut self) {
        self.reset_entry();
        self.open = false;
    }

    /// First phase of a delete. Returns false if the id is gone.
    pub fn request_delete(&mut self, list: &[IngredientItem], id: &str) -> bool {
        match list.iter().find(|i| i.id == id) {
            Some(ingredient) => {
                self.delete.request(
                    ingredient.id.clone(),
                    format!("Apagar ingrediente {}?", ingredient.name),
                );
                true
            }
            None => false,
        }
    }

    /// Second phase of a delete: the new list, or None if nothing was requested
    pub fn confirm_delete(&mut self, list: &[IngredientItem]) -> Option<Vec<IngredientItem>> {
        self.delete.confirm().map(|id| remove_ingredient(list, &id))
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.delete.pending().map(|p| p.description.as_str())
    }

    fn reset_entry(&mut self) {
        self.mode = EntryMode::Add;
        self.name.clear();
        self.price = 0;
    }
}
