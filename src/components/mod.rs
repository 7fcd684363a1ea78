//! UI Components
//!
//! Reusable Leptos components.

mod category_selector;
mod confirm_dialog;
mod food_card;
mod food_grid;
mod food_modal;
mod image_uploader;
mod ingredients_table;
mod navbar;
mod price_input;
mod toast;

pub use category_selector::CategorySelector;
pub use confirm_dialog::ConfirmDialog;
pub use food_card::FoodCard;
pub use food_grid::FoodGrid;
pub use food_modal::FoodModal;
pub use image_uploader::ImageUploader;
pub use ingredients_table::IngredientsTable;
pub use navbar::Navbar;
pub use price_input::PriceInput;
pub use toast::ToastHost;
