//! UI components for GroceryGo
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod model_select;
pub mod prediction;
pub mod status;
pub mod uploader;

use dioxus::prelude::*;
use model_select::ModelSelect;
use prediction::PredictionPanel;
use status::ServiceStatusBadge;
use uploader::ImageUploader;

const MAIN_CSS: &str = include_str!("../../assets/main.css");

/// Single page layout: title, model picker, uploader, prediction panel
#[component]
pub fn Layout() -> Element {
    rsx! {
        style { "{MAIN_CSS}" }
        div {
            class: "page",
            h1 { class: "title fade-in", "Product Identification System" }
            div {
                class: "card fade-in",
                ServiceStatusBadge {}
                ModelSelect {}
                ImageUploader {}
                PredictionPanel {}
            }
        }
    }
}
