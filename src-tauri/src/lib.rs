//! Menu Admin Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers

use std::collections::HashSet;
use tauri::Manager;

mod commands;
mod config;
mod domain;
mod repository;

use config::{asset_file_name, AppPaths};
use repository::{init_db, BlobStore, FoodRepository};

/// Application state shared across commands
pub struct AppState {
    pub foods: FoodRepository,
    pub blobs: BlobStore,
}

fn respond_status(status: u16) -> tauri::http::Response<Vec<u8>> {
    tauri::http::Response::builder()
        .status(status)
        .body(Vec::new())
        .expect("Failed to build status response")
}

/// Remove stored images no food points at (left behind by replaced photos
/// or uploads whose save failed)
async fn prune_images(app: &tauri::AppHandle) {
    let state = app.state::<AppState>();
    let referenced = match state.foods.referenced_images().await {
        Ok(uris) => uris,
        Err(e) => {
            log::warn!("Skipping image cleanup: {}", e);
            return;
        }
    };
    let keep: HashSet<String> = referenced.iter().filter_map(|uri| asset_file_name(uri)).collect();
    match state.blobs.prune(&keep) {
        Ok(0) => {}
        Ok(n) => {
            let _ = rolling_logger::info(&format!("Removed {} unused images", n));
        }
        Err(e) => log::warn!("Image cleanup failed: {}", e),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .register_asynchronous_uri_scheme_protocol("asset", |ctx, request, responder| {
            let app = ctx.app_handle().clone();
            let path = request.uri().path().to_string();
            std::thread::spawn(move || {
                let Some(state) = app.try_state::<AppState>() else {
                    responder.respond(respond_status(503));
                    return;
                };
                // Only files inside the image store are served
                let Some(path) = asset_file_name(&path).and_then(|name| state.blobs.resolve(&name)) else {
                    responder.respond(respond_status(404));
                    return;
                };

                match std::fs::read(&path) {
                    Ok(content) => {
                        let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
                        let response = tauri::http::Response::builder()
                            .header("Content-Type", mime_type.as_ref())
                            .header("Access-Control-Allow-Origin", "*")
                            .header("Cache-Control", "max-age=31536000, immutable")
                            .body(content)
                            .expect("Failed to build response");
                        responder.respond(response);
                    }
                    Err(e) => {
                        log::error!("Failed to read {}: {}", path.display(), e);
                        responder.respond(respond_status(500));
                    }
                }
            });
        })
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = _app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            // Initialize logging
            rolling_logger::init_logger(
                app_handle.path().app_log_dir().expect("failed to get log dir"),
                "MenuAdmin",
            )
            .expect("failed to init rolling logger");

            let paths = AppPaths::resolve(app_handle.path().app_data_dir()?);
            paths.ensure()?;
            log::info!("Data dir: {}", paths.data_dir.display());

            let conn = init_db(&paths.db_path)?;
            let blobs = BlobStore::new(&paths.images_dir)?;

            app.manage(AppState {
                foods: FoodRepository::new(conn),
                blobs,
            });
            let _ = rolling_logger::info("Menu store ready");

            tauri::async_runtime::spawn(async move {
                prune_images(&app_handle).await;
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_foods,
            commands::create_food,
            commands::update_food,
            commands::set_food_availability,
            commands::delete_food,
            commands::upload_image,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
