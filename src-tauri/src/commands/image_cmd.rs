//! Tauri Commands for image storage

use tauri::State;

use crate::config::asset_url;
use crate::AppState;

/// Store an uploaded photo; returns the URI the webview loads it from
#[tauri::command]
pub async fn upload_image(
    state: State<'_, AppState>,
    name: String,
    data_url: String,
) -> Result<String, String> {
    let file_name = state.blobs.save_data_url(&name, &data_url).map_err(|e| {
        log::warn!("upload_image {} failed: {}", name, e);
        e.to_string()
    })?;
    Ok(asset_url(&file_name))
}
