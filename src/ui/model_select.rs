use crate::app::{AppState, ServiceStatus};
use crate::types::model::ModelName;
use dioxus::prelude::*;

fn option_label(model: ModelName, status: &ServiceStatus) -> String {
    match status {
        ServiceStatus::Online(info) if !info.supports(model) => {
            format!("{} (not loaded on server)", model.label())
        }
        _ => model.label().to_string(),
    }
}

#[component]
pub fn ModelSelect() -> Element {
    let app_state = use_context::<AppState>();
    let mut selected_model = app_state.selected_model;
    let current = *selected_model.read();
    let options: Vec<(ModelName, String)> = {
        let status = app_state.service_status.read();
        ModelName::ALL
            .into_iter()
            .map(|model| (model, option_label(model, &status)))
            .collect()
    };

    rsx! {
        div {
            class: "field",
            label { r#for: "model", class: "field-label", "Select Model:" }
            select {
                id: "model",
                class: "model-select",
                value: "{current.as_str()}",
                onchange: move |evt| match evt.value().parse::<ModelName>() {
                    Ok(model) => {
                        tracing::debug!("Model changed to {}", model);
                        selected_model.set(model);
                    }
                    Err(e) => tracing::warn!("{}", e),
                },

                for (model, label) in options {
                    option {
                        value: "{model.as_str()}",
                        selected: model == current,
                        "{label}"
                    }
                }
            }
        }
    }
}
