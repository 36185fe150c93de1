use svgard_core::constants::DEFAULT_MAX_SVG_SIZE_BYTES;
use svgard_core::{Config, UploadedAsset};

use super::error::UploadError;

/// Checks that apply to every upload before a handler sees it.
///
/// Bounds the cost of a single parse; content checks belong to the handlers.
#[derive(Debug, Clone, Copy)]
pub struct UploadGuard {
    max_file_size: usize,
}

impl UploadGuard {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_svg_size_bytes)
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), UploadError> {
        if size > self.max_file_size {
            return Err(UploadError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn check(&self, asset: &UploadedAsset) -> Result<(), UploadError> {
        self.validate_file_size(asset.size())
    }
}

impl Default for UploadGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SVG_SIZE_BYTES)
    }
}
