//! Capture backend seam.

use async_trait::async_trait;
use image::RgbaImage;

use scry_core::Result;

/// A full-viewport lossless frame captured from the platform.
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    pub image: RgbaImage,
}

impl CapturedFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Backend that can capture the active display target.
///
/// Implementations resolve the target themselves (there are no request
/// parameters) and report platform failures as [`scry_core::ScryError::Capture`].
#[async_trait]
pub trait CaptureSource: Send + Sync {
    async fn capture(&self) -> Result<CapturedFrame>;
}
