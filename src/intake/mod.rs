//! File intake
//!
//! Validates the file the user picked and owns the preview shown for it.
//! At most one selected file and one preview handle are alive at a time.

pub mod file;
pub mod preview;

pub use file::SelectedFile;
pub use preview::{PreviewHandle, PreviewTracker};

use thiserror::Error;

/// Errors raised while accepting a file selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("No file selected.")]
    NoFileSelected,
    #[error("Please upload a valid image file.")]
    NotAnImage { mime_type: String },
    #[error("Could not read {name}.")]
    Unreadable { name: String },
}

/// Holds the current selection, its preview and the last intake error
#[derive(Debug, Default)]
pub struct FileIntake {
    tracker: PreviewTracker,
    selected: Option<SelectedFile>,
    preview: Option<PreviewHandle>,
    error: Option<IntakeError>,
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an intake whose previews are counted by `tracker`
    pub fn with_tracker(tracker: PreviewTracker) -> Self {
        Self {
            tracker,
            ..Self::default()
        }
    }

    /// Accept the first file of a selection event
    ///
    /// Rejections leave the current file and preview untouched.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Result<&SelectedFile, IntakeError> {
        let Some(file) = file else {
            tracing::debug!("File selection was empty");
            return Err(self.reject(IntakeError::NoFileSelected));
        };

        if !file.is_image() {
            tracing::warn!(
                "Rejected {} with declared type {}",
                file.name(),
                file.mime_type()
            );
            return Err(self.reject(IntakeError::NotAnImage {
                mime_type: file.mime_type().to_string(),
            }));
        }

        // Release before acquiring so two handles never coexist
        self.preview = None;
        self.preview = Some(self.tracker.create(&file));
        self.error = None;

        tracing::info!(
            "Selected {} ({}, {} bytes)",
            file.name(),
            file.mime_type(),
            file.len()
        );
        Ok(&*self.selected.insert(file))
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    pub fn tracker(&self) -> &PreviewTracker {
        &self.tracker
    }

    /// Drop the selection and release its preview
    pub fn clear(&mut self) {
        self.preview = None;
        self.selected = None;
        self.error = None;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Record a failed selection; the current file and preview stay
    pub fn reject(&mut self, error: IntakeError) -> IntakeError {
        self.error = Some(error.clone());
        error
    }
}
