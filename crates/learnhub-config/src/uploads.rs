use std::path::PathBuf;

use crate::{Lookup, env_lookup, optional};

/// Largest accepted image.
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Largest accepted request body (JSON or multipart).
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// URL prefix under which `dir` is served.
    pub public_prefix: String,
    pub max_image_size: usize,
    pub max_body_size: usize,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            dir: optional(lookup, "UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            ..Self::default()
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            public_prefix: "/uploads".to_string(),
            max_image_size: MAX_IMAGE_SIZE,
            max_body_size: MAX_BODY_SIZE,
        }
    }
}
