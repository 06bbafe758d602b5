//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::intake::{FileIntake, IntakeError, SelectedFile};
use crate::predict::{HttpBackend, PredictError, PredictionSession, RequestTicket, ServiceInfo};
use crate::storage::settings::{load_settings, AppSettings};
use crate::types::model::ModelName;
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;

/// Reachability of the prediction service
#[derive(Clone, PartialEq, Debug)]
pub enum ServiceStatus {
    Checking,
    Online(ServiceInfo),
    Offline(String),
}

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    /// `None` when the HTTP client could not be built
    pub backend: Option<Arc<HttpBackend>>,
    pub settings: Signal<AppSettings>,
    pub selected_model: Signal<ModelName>,
    pub intake: Signal<FileIntake>,
    pub session: Signal<PredictionSession>,
    /// Task of the request currently awaiting a response
    pub in_flight: Signal<Option<Task>>,
    pub service_status: Signal<ServiceStatus>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let backend = match HttpBackend::from_settings(&settings) {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                tracing::error!("{}", e);
                None
            }
        };
        tracing::info!("AppState initialized, service at {}", settings.server_url);

        Self {
            backend,
            settings: Signal::new(settings),
            selected_model: Signal::new(ModelName::default()),
            intake: Signal::new(FileIntake::new()),
            session: Signal::new(PredictionSession::new()),
            in_flight: Signal::new(None),
            service_status: Signal::new(ServiceStatus::Checking),
        }
    }
}

/// Apply the outcome of a file pick
///
/// Whatever happens, a failed prediction stops being shown: a valid pick
/// clears it and a rejected pick replaces it with the intake message.
pub fn apply_selection(
    intake: &mut FileIntake,
    session: &mut PredictionSession,
    picked: Result<Option<SelectedFile>, IntakeError>,
) -> Result<(), IntakeError> {
    let result = match picked {
        Ok(file) => intake.select(file).map(|_| ()),
        Err(error) => Err(intake.reject(error)),
    };
    session.clear_failure();
    result
}

/// Issue a prediction for the current selection
///
/// Clears any intake message first. Returns the file to send and its ticket,
/// or `None` after recording [`PredictError::NoFile`].
pub fn start_prediction(
    intake: &mut FileIntake,
    session: &mut PredictionSession,
) -> Option<(SelectedFile, RequestTicket)> {
    intake.clear_error();
    match intake.selected().cloned() {
        Some(file) => Some((file, session.begin())),
        None => {
            session.reject(PredictError::NoFile);
            None
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = use_context_provider(AppState::new);

    {
        let backend = app_state.backend.clone();
        let mut service_status = app_state.service_status;
        use_effect(move || {
            let backend = backend.clone();
            spawn(async move {
                let Some(backend) = backend else {
                    service_status.set(ServiceStatus::Offline("HTTP client unavailable".into()));
                    return;
                };
                match backend.service_info().await {
                    Ok(info) => {
                        tracing::info!(
                            "Prediction service online: {:?}, {} classes",
                            info.models_loaded,
                            info.classes_loaded
                        );
                        service_status.set(ServiceStatus::Online(info));
                    }
                    Err(e) => {
                        tracing::warn!("Prediction service unreachable: {}", e);
                        service_status.set(ServiceStatus::Offline(e.to_string()));
                    }
                }
            });
        });
    }

    rsx! {
        Layout {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::prediction::{PredictionOutcome, PredictionResult};

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", b"PNG".to_vec())
    }

    fn failed_session() -> PredictionSession {
        let mut session = PredictionSession::new();
        let ticket = session.begin();
        session.resolve(
            ticket,
            Err(PredictError::Http {
                status: 400,
                detail: "bad image".into(),
            }),
        );
        session
    }

    fn visible_errors(intake: &FileIntake, session: &PredictionSession) -> Vec<String> {
        intake
            .error()
            .map(|e| e.to_string())
            .into_iter()
            .chain(session.error_message().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_valid_pick_after_failed_prediction_shows_no_error() {
        let mut intake = FileIntake::new();
        let mut session = failed_session();
        assert_eq!(visible_errors(&intake, &session).len(), 1);

        apply_selection(&mut intake, &mut session, Ok(Some(png("cat.png")))).unwrap();
        assert!(visible_errors(&intake, &session).is_empty());
        assert_eq!(session.outcome(), &PredictionOutcome::Idle);
    }

    #[test]
    fn test_bad_pick_after_failed_prediction_shows_one_error() {
        let mut intake = FileIntake::new();
        let mut session = failed_session();

        let notes = SelectedFile::new("notes.txt", "application/octet-stream", b"hi".to_vec());
        apply_selection(&mut intake, &mut session, Ok(Some(notes))).unwrap_err();
        assert_eq!(
            visible_errors(&intake, &session),
            vec!["Please upload a valid image file.".to_string()]
        );
    }

    #[test]
    fn test_unreadable_pick_reports_read_failure() {
        let mut intake = FileIntake::new();
        let mut session = PredictionSession::new();
        let err = apply_selection(
            &mut intake,
            &mut session,
            Err(IntakeError::Unreadable {
                name: "cat.png".into(),
            }),
        )
        .unwrap_err();
        assert_eq!(visible_errors(&intake, &session), vec![err.to_string()]);
        assert!(!err.to_string().contains("No file selected"));
    }

    #[test]
    fn test_pick_during_request_keeps_loading() {
        let mut intake = FileIntake::new();
        let mut session = PredictionSession::new();
        apply_selection(&mut intake, &mut session, Ok(Some(png("a.png")))).unwrap();
        let (_, ticket) = start_prediction(&mut intake, &mut session).unwrap();

        apply_selection(&mut intake, &mut session, Ok(None)).unwrap_err();
        assert!(session.is_loading());

        assert!(session.resolve(ticket, Ok(PredictionResult::new("cat", 0.87))));
        apply_selection(&mut intake, &mut session, Ok(Some(png("b.png")))).unwrap();
        assert!(session.result().is_some());
    }

    #[test]
    fn test_predict_replaces_intake_error() {
        let mut intake = FileIntake::new();
        let mut session = PredictionSession::new();
        apply_selection(&mut intake, &mut session, Ok(Some(png("a.png")))).unwrap();
        apply_selection(&mut intake, &mut session, Ok(None)).unwrap_err();
        assert_eq!(visible_errors(&intake, &session).len(), 1);

        let (file, _) = start_prediction(&mut intake, &mut session).unwrap();
        assert_eq!(file.name(), "a.png");
        assert!(visible_errors(&intake, &session).is_empty());
        assert!(session.is_loading());
    }

    #[test]
    fn test_predict_without_file_shows_one_error() {
        let mut intake = FileIntake::new();
        let mut session = PredictionSession::new();
        apply_selection(&mut intake, &mut session, Ok(None)).unwrap_err();

        assert!(start_prediction(&mut intake, &mut session).is_none());
        assert_eq!(
            visible_errors(&intake, &session),
            vec!["Please upload an image file.".to_string()]
        );
    }
}
