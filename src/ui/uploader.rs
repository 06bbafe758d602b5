//! Image picker with inline preview

use crate::app::{apply_selection, AppState};
use crate::intake::{IntakeError, SelectedFile};
use dioxus::prelude::*;
use std::path::Path;

/// Read the first file of a picker event
///
/// `Ok(None)` means nothing was picked; a picked file that cannot be read or
/// is empty is an error.
async fn read_first_file(evt: &FormEvent) -> Result<Option<SelectedFile>, IntakeError> {
    let Some(engine) = evt.files() else {
        return Ok(None);
    };
    let Some(path) = engine.files().into_iter().next() else {
        return Ok(None);
    };

    let unreadable = || IntakeError::Unreadable {
        name: Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.clone()),
    };
    let Some(bytes) = engine.read_file(&path).await else {
        tracing::error!("Could not read {}", path);
        return Err(unreadable());
    };

    let file = SelectedFile::from_path(Path::new(&path), bytes);
    if file.is_empty() {
        tracing::warn!("{} is empty", path);
        return Err(unreadable());
    }
    Ok(Some(file))
}

#[component]
pub fn ImageUploader() -> Element {
    let app_state = use_context::<AppState>();
    let mut intake = app_state.intake;
    let mut session = app_state.session;

    let handle_change = move |evt: FormEvent| async move {
        let picked = read_first_file(&evt).await;
        if let Err(e) = apply_selection(&mut intake.write(), &mut session.write(), picked) {
            tracing::debug!("Selection rejected: {}", e);
        }
    };

    let intake_read = intake.read();
    let preview_src = intake_read.preview().map(|p| p.src().to_string());
    let file_label = intake_read
        .selected()
        .map(|f| format!("{} ({} KB)", f.name(), f.len() / 1024));
    let error = intake_read.error().map(|e| e.to_string());
    drop(intake_read);

    rsx! {
        div {
            class: "field",
            label {
                r#for: "file-input",
                class: "drop-zone",
                if let Some(src) = preview_src {
                    img { class: "preview", src: "{src}", alt: "Selected image" }
                } else {
                    p { class: "drop-hint", "Click to upload an image" }
                }
            }
            input {
                id: "file-input",
                r#type: "file",
                accept: "image/*",
                multiple: false,
                class: "hidden-input",
                onchange: handle_change,
            }
            if let Some(label) = file_label {
                p { class: "file-label", "{label}" }
            }
            if let Some(error) = error {
                p { class: "error-text", "{error}" }
            }
        }
    }
}
