//! GroceryGo Library
//!
//! Core library for the GroceryGo desktop client: pick a model, pick an image,
//! and ask the prediction service what product it shows.

pub mod app;
pub mod intake;
pub mod predict;
pub mod storage;
pub mod types;
pub mod ui;
