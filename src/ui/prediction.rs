//! Predict button and result display

use crate::app::{start_prediction, AppState};
use crate::predict::{request_prediction, PredictError};
use crate::types::prediction::PredictionOutcome;
use crate::ui::components::loading::Spinner;
use chrono::Local;
use dioxus::prelude::*;

#[component]
pub fn PredictionPanel() -> Element {
    let app_state = use_context::<AppState>();
    let has_file = app_state.intake.read().selected().is_some();
    let outcome = app_state.session.read().outcome().clone();
    let is_loading = outcome.is_loading();

    let app_state_for_predict = app_state.clone();
    let handle_predict = move |_| {
        let mut app_state = app_state_for_predict.clone();
        let model = *app_state.selected_model.read();

        let Some(backend) = app_state.backend.clone() else {
            app_state.intake.write().clear_error();
            app_state
                .session
                .write()
                .reject(PredictError::Network("HTTP client unavailable".into()));
            return;
        };

        // Cancel-and-replace: the newest request owns the panel
        if let Some(previous) = app_state.in_flight.write().take() {
            previous.cancel();
        }
        let started = start_prediction(&mut app_state.intake.write(), &mut app_state.session.write());
        let Some((file, ticket)) = started else {
            return;
        };

        let mut session = app_state.session;
        let mut in_flight = app_state.in_flight;
        let task = spawn(async move {
            let result = request_prediction(backend.as_ref(), Some(&file), model).await;
            if session.write().resolve(ticket, result) {
                in_flight.set(None);
            }
        });
        app_state.in_flight.set(Some(task));
    };

    rsx! {
        div {
            class: "prediction",
            if has_file {
                button {
                    class: "predict-button",
                    disabled: is_loading,
                    onclick: handle_predict,
                    if is_loading {
                        Spinner { size: 16 }
                        "Predicting..."
                    } else {
                        "Predict"
                    }
                }
            }

            match outcome {
                PredictionOutcome::Idle | PredictionOutcome::Loading => rsx! {},
                PredictionOutcome::Failure(message) => rsx! {
                    div { class: "error-box fade-in", p { "{message}" } }
                },
                PredictionOutcome::Success(result) => {
                    let confidence = result.confidence_percent();
                    let received = result
                        .received_at
                        .with_timezone(&Local)
                        .format("%H:%M:%S")
                        .to_string();
                    let class_count = result.class_count();
                    rsx! {
                        div {
                            class: "result fade-in",
                            h3 { "Prediction Result:" }
                            p { class: "result-line", "Predicted Class: {result.predicted_class}" }
                            p { class: "result-line", "Confidence: {confidence}" }
                            p {
                                class: "result-meta",
                                if let Some(count) = class_count {
                                    "Scored against {count} classes, received at {received}"
                                } else {
                                    "Received at {received}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
