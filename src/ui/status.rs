use crate::app::{AppState, ServiceStatus};
use crate::predict::ServiceInfo;
use dioxus::prelude::*;

fn online_summary(info: &ServiceInfo) -> String {
    let missing = info.missing_models();
    if missing.is_empty() {
        format!(
            "Online: {} models, {} classes",
            info.models_loaded.len(),
            info.classes_loaded
        )
    } else {
        let names: Vec<&str> = missing.iter().map(|model| model.label()).collect();
        format!(
            "Online: {} classes, not loaded: {}",
            info.classes_loaded,
            names.join(", ")
        )
    }
}

/// One-line summary of the prediction service probe
#[component]
pub fn ServiceStatusBadge() -> Element {
    let app_state = use_context::<AppState>();
    let server_url = match &app_state.backend {
        Some(backend) => backend.base_url().to_string(),
        None => app_state.settings.read().server_url.clone(),
    };

    let (class, text) = match &*app_state.service_status.read() {
        ServiceStatus::Checking => ("status status-checking", format!("Connecting to {}...", server_url)),
        ServiceStatus::Online(info) => ("status status-online", online_summary(info)),
        ServiceStatus::Offline(reason) => ("status status-offline", format!("Offline: {}", reason)),
    };

    rsx! {
        div {
            class: "{class}",
            title: "{server_url}",
            span { class: "status-dot" }
            span { "{text}" }
        }
    }
}
