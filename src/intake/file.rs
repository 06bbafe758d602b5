//! Selected file payload

use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Declared type for files whose extension is not a known image format
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// The image chosen by the user
///
/// Cloning is cheap; the payload is shared between the intake and any
/// request that captured it.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Build a selection from a picked path and its contents
    ///
    /// The declared type comes from the file extension.
    pub fn from_path(path: &Path, bytes: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self::new(name, declared_mime_type(path), bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

// Payloads can be megabytes; keep them out of logs
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type implied by a path's extension
pub fn declared_mime_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_from_extension() {
        assert_eq!(declared_mime_type(Path::new("cat.png")), "image/png");
        assert_eq!(declared_mime_type(Path::new("/tmp/photo.JPG")), "image/jpeg");
        assert_eq!(declared_mime_type(Path::new("anim.gif")), "image/gif");
        assert_eq!(declared_mime_type(Path::new("notes.txt")), FALLBACK_MIME_TYPE);
        assert_eq!(declared_mime_type(Path::new("no_extension")), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn test_from_path_keeps_file_name() {
        let file = SelectedFile::from_path(Path::new("/home/me/Pictures/apple.webp"), vec![1, 2, 3]);
        assert_eq!(file.name(), "apple.webp");
        assert_eq!(file.mime_type(), "image/webp");
        assert_eq!(file.len(), 3);
        assert!(file.is_image());
    }

    #[test]
    fn test_debug_hides_payload() {
        let file = SelectedFile::new("a.png", "image/png", vec![0u8; 4096]);
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 4096"));
        assert!(!debug.contains("0, 0, 0"));
    }
}
