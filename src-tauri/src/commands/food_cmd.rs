//! Tauri Commands for Food CRUD
//!
//! Every successful mutation broadcasts the full collection on
//! `foods-changed`, which is the frontend's live subscription.

use tauri::{AppHandle, Emitter, State};

use crate::domain::Food;
use crate::repository::{FoodRepository, Repository};
use crate::AppState;

pub const FOODS_CHANGED: &str = "foods-changed";

/// Emit the current snapshot; failures are logged, never returned
pub async fn broadcast(app: &AppHandle, repo: &FoodRepository) {
    match repo.list().await {
        Ok(foods) => {
            if let Err(e) = app.emit(FOODS_CHANGED, &foods) {
                log::error!("Failed to emit {}: {}", FOODS_CHANGED, e);
            }
        }
        Err(e) => log::error!("Failed to list foods for broadcast: {}", e),
    }
}

/// List all foods in arrival order
#[tauri::command]
pub async fn list_foods(state: State<'_, AppState>) -> Result<Vec<Food>, String> {
    state.foods.list().await.map_err(|e| e.to_string())
}

/// Create a food under its client-generated id
#[tauri::command]
pub async fn create_food(
    app: AppHandle,
    state: State<'_, AppState>,
    food: Food,
) -> Result<Food, String> {
    let created = state.foods.create(&food).await.map_err(|e| {
        log::warn!("create_food {} failed: {}", food.id, e);
        e.to_string()
    })?;
    log::info!("Created food {} ({})", created.id, created.name);
    broadcast(&app, &state.foods).await;
    Ok(created)
}

/// Replace a stored food wholesale
#[tauri::command]
pub async fn update_food(
    app: AppHandle,
    state: State<'_, AppState>,
    food: Food,
) -> Result<Food, String> {
    let updated = state.foods.update(&food).await.map_err(|e| {
        log::warn!("update_food {} failed: {}", food.id, e);
        e.to_string()
    })?;
    log::info!("Updated food {}", updated.id);
    broadcast(&app, &state.foods).await;
    Ok(updated)
}

/// Partial update of the availability flag
#[tauri::command]
pub async fn set_food_availability(
    app: AppHandle,
    state: State<'_, AppState>,
    id: String,
    available: bool,
) -> Result<Food, String> {
    let updated = state
        .foods
        .set_availability(&id, available)
        .await
        .map_err(|e| {
            log::warn!("set_food_availability {} failed: {}", id, e);
            e.to_string()
        })?;
    log::info!("Food {} available={}", id, available);
    broadcast(&app, &state.foods).await;
    Ok(updated)
}

#[tauri::command]
pub async fn delete_food(
    app: AppHandle,
    state: State<'_, AppState>,
    id: String,
) -> Result<(), String> {
    state.foods.delete(&id).await.map_err(|e| {
        log::warn!("delete_food {} failed: {}", id, e);
        e.to_string()
    })?;
    log::info!("Deleted food {}", id);
    broadcast(&app, &state.foods).await;
    Ok(())
}
