//! Shared face-loading resources.

use std::sync::Arc;

use crate::face::{BuiltinFaces, FaceLoader, SwashLoader};

/// Family of the platform's own emoji font, when it is trusted to be
/// present and complete.
pub const SYSTEM_EMOJI_FAMILY: Option<&str> = if cfg!(target_os = "macos") {
    Some("Apple Color Emoji")
} else {
    None
};

/// The loader and built-in faces every collection is assembled from.
#[derive(Clone)]
pub struct Library {
    loader: Arc<dyn FaceLoader>,
    builtin: BuiltinFaces,
    system_emoji: Option<String>,
}

impl Library {
    /// A swash-backed library with the platform emoji policy.
    pub fn new(builtin: BuiltinFaces) -> Self {
        Self::with_loader(builtin, Arc::new(SwashLoader))
    }

    pub fn with_loader(builtin: BuiltinFaces, loader: Arc<dyn FaceLoader>) -> Self {
        Self {
            loader,
            builtin,
            system_emoji: SYSTEM_EMOJI_FAMILY.map(str::to_string),
        }
    }

    /// Override the trusted system emoji family (`None` uses the bundled
    /// emoji faces).
    pub fn with_system_emoji(mut self, family: Option<String>) -> Self {
        self.system_emoji = family;
        self
    }

    pub fn loader(&self) -> &Arc<dyn FaceLoader> {
        &self.loader
    }

    pub fn builtin(&self) -> &BuiltinFaces {
        &self.builtin
    }

    pub fn system_emoji(&self) -> Option<&str> {
        self.system_emoji.as_deref()
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("builtin", &self.builtin)
            .field("system_emoji", &self.system_emoji)
            .finish_non_exhaustive()
    }
}
