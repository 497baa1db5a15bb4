//! Seam to the isolated preview surface.
//!
//! The surface is a passive sink: it receives markup and may, once per render,
//! signal back that the content has settled. Renders are tagged with the
//! session's generation counter so a settled signal for superseded markup can
//! be recognized and ignored (echo the tag through
//! `SessionHandle::settled`).

use std::path::PathBuf;

pub trait PreviewSurface: Send {
    fn set_markup(&mut self, markup: &str, generation: u64);
}

/// Discards markup. For embeddings that only observe the session state.
pub struct NullPreview;

impl PreviewSurface for NullPreview {
    fn set_markup(&mut self, _markup: &str, _generation: u64) {}
}

/// Writes each render to a file, so an external viewer can follow along.
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PreviewSurface for FilePreview {
    fn set_markup(&mut self, markup: &str, generation: u64) {
        if let Err(err) = std::fs::write(&self.path, markup) {
            tracing::warn!(path = %self.path.display(), %err, "failed to write preview file");
        } else {
            tracing::debug!(path = %self.path.display(), generation, "preview updated");
        }
    }
}
