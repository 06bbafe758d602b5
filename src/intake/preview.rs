//! Preview handles
//!
//! A preview is a `data:` URL the webview can render without touching disk.
//! Handles are released when dropped, so replacing or tearing down the owner
//! releases each one exactly once.

use crate::intake::SelectedFile;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    created: AtomicU64,
    released: AtomicU64,
    live: AtomicUsize,
}

/// Issues preview handles and counts how many are alive
#[derive(Debug, Clone, Default)]
pub struct PreviewTracker {
    counters: Arc<Counters>,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, file: &SelectedFile) -> PreviewHandle {
        let id = self.counters.created.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.live.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Created preview #{} for {}", id, file.name());
        PreviewHandle {
            id,
            src: format!("data:{};base64,{}", file.mime_type(), STANDARD.encode(file.bytes())),
            counters: self.counters.clone(),
        }
    }

    /// Handles currently alive
    pub fn live(&self) -> usize {
        self.counters.live.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> u64 {
        self.counters.created.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u64 {
        self.counters.released.load(Ordering::SeqCst)
    }
}

/// A displayable reference to a selected file's bytes
pub struct PreviewHandle {
    id: u64,
    src: String,
    counters: Arc<Counters>,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Value for an `img` element's `src`
    pub fn src(&self) -> &str {
        &self.src
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.counters.live.fetch_sub(1, Ordering::SeqCst);
        self.counters.released.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Released preview #{}", self.id);
    }
}

impl fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("src_len", &self.src.len())
            .finish()
    }
}
