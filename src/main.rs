//! Menu Admin Frontend Entry Point

mod app;
mod backend;
mod commands;
mod components;
mod confirm;
mod context;
mod controller;
mod editor;
mod error;
mod format;
mod image;
mod ingredients;
mod models;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
