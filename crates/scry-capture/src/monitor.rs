//! Monitor capture backend over `xcap`.

use async_trait::async_trait;
use image::RgbaImage;
use xcap::Monitor;

use scry_core::{Result, ScryError};

use crate::source::{CaptureSource, CapturedFrame};

/// Captures the primary monitor.
///
/// `xcap` performs blocking platform calls, so the capture runs on the
/// blocking thread pool. On macOS the process needs the Screen Recording
/// permission; a refusal surfaces as a capture error.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorCapture;

impl MonitorCapture {
    pub fn new() -> Self {
        Self
    }

    fn capture_blocking() -> Result<RgbaImage> {
        let monitors = Monitor::all()
            .map_err(|e| ScryError::capture(format!("failed to enumerate displays: {e}")))?;

        let monitor = monitors
            .into_iter()
            .next()
            .ok_or_else(|| ScryError::capture("no active display found"))?;

        let image = monitor
            .capture_image()
            .map_err(|e| ScryError::capture(e.to_string()))?;

        if image.width() == 0 || image.height() == 0 {
            return Err(ScryError::capture(
                "captured an empty frame; the platform may have denied the capture",
            ));
        }

        Ok(image)
    }
}

#[async_trait]
impl CaptureSource for MonitorCapture {
    async fn capture(&self) -> Result<CapturedFrame> {
        let image = tokio::task::spawn_blocking(Self::capture_blocking)
            .await
            .map_err(|e| ScryError::capture(format!("capture task failed: {e}")))??;

        tracing::debug!("captured {}x{} frame", image.width(), image.height());
        Ok(CapturedFrame { image })
    }
}
