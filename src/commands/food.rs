//! Food Commands
//!
//! Frontend bindings for food CRUD commands.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::call;
use crate::models::FoodItem;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct FoodArgs<'a> {
    food: &'a FoodItem,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct AvailabilityArgs<'a> {
    id: &'a str,
    available: bool,
}

// ========================
// Commands
// ========================

pub async fn list_foods() -> Result<Vec<FoodItem>, String> {
    call("list_foods", JsValue::NULL).await
}

pub async fn create_food(food: &FoodItem) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&FoodArgs { food }).map_err(|e| e.to_string())?;
    call::<FoodItem>("create_food", js_args).await.map(|_| ())
}

pub async fn update_food(food: &FoodItem) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&FoodArgs { food }).map_err(|e| e.to_string())?;
    call::<FoodItem>("update_food", js_args).await.map(|_| ())
}

pub async fn set_food_availability(id: &str, available: bool) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&AvailabilityArgs { id, available })
        .map_err(|e| e.to_string())?;
    call::<FoodItem>("set_food_availability", js_args).await.map(|_| ())
}

pub async fn delete_food(id: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    call("delete_food", js_args).await
}
