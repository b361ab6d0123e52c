//! Snapshot image type.
//!
//! A snapshot pairs the native-resolution RGBA capture with the dimensions it
//! is displayed at. The displayed size fits a bounded width while preserving
//! the aspect ratio; the native pixels are kept untouched so cropping can go
//! back to full resolution.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::{ImageFormat, RgbaImage, imageops};

use crate::error::{Result, ScryError};
use crate::selection::Rect;

/// A captured snapshot with native pixels and displayed dimensions.
#[derive(Clone)]
pub struct Snapshot {
    native: RgbaImage,
    display_width: u32,
    display_height: u32,
}

impl Snapshot {
    /// Wraps a captured RGBA frame, fitting it to `max_display_width`.
    ///
    /// The displayed width is the smaller of the native width and
    /// `max_display_width`; the height follows the aspect ratio. Images are
    /// never displayed above native resolution.
    pub fn from_rgba(native: RgbaImage, max_display_width: u32) -> Result<Self> {
        let (width, height) = native.dimensions();
        if width == 0 || height == 0 {
            return Err(ScryError::image("captured frame is empty"));
        }

        let display_width = width.min(max_display_width.max(1));
        let display_height =
            ((display_width as f64 * height as f64 / width as f64).round() as u32).max(1);

        tracing::debug!(
            "snapshot: {}x{} pixels displayed at {}x{}",
            width,
            height,
            display_width,
            display_height
        );

        Ok(Self {
            native,
            display_width,
            display_height,
        })
    }

    pub fn width(&self) -> u32 {
        self.native.width()
    }

    pub fn height(&self) -> u32 {
        self.native.height()
    }

    pub fn native_size(&self) -> (u32, u32) {
        self.native.dimensions()
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    pub fn native(&self) -> &RgbaImage {
        &self.native
    }

    /// Extracts a native-resolution region into a new snapshot.
    ///
    /// `region` is in native coordinates (see [`Rect::scale_to_native`]) and
    /// must lie within the image bounds.
    pub fn crop(&self, region: Rect, max_display_width: u32) -> Result<Snapshot> {
        if region.is_empty() {
            return Err(ScryError::selection("cannot crop an empty region"));
        }
        let (width, height) = self.native.dimensions();
        if region.x.saturating_add(region.w) > width || region.y.saturating_add(region.h) > height {
            return Err(ScryError::image(format!(
                "crop region ({},{},{},{}) exceeds snapshot dimensions {}x{}",
                region.x, region.y, region.w, region.h, width, height
            )));
        }

        let cropped =
            imageops::crop_imm(&self.native, region.x, region.y, region.w, region.h).to_image();
        Self::from_rgba(cropped, max_display_width)
    }

    /// Encodes the native image as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.native.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Encodes the native image as a `data:image/png;base64,` URL for the
    /// analysis endpoint.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.to_png_bytes()?;
        Ok(format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(png)
        ))
    }

    /// Writes the native image to disk as PNG.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.native.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("native", &format_args!("{}x{}", self.width(), self.height()))
            .field(
                "display",
                &format_args!("{}x{}", self.display_width, self.display_height),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_fit_downscales_wide_image() {
        let snap = Snapshot::from_rgba(solid(800, 600), 300).unwrap();
        assert_eq!(snap.native_size(), (800, 600));
        assert_eq!(snap.display_size(), (300, 225));
    }

    #[test]
    fn test_fit_never_upscales() {
        let snap = Snapshot::from_rgba(solid(120, 80), 300).unwrap();
        assert_eq!(snap.display_size(), (120, 80));
    }

    #[test]
    fn test_fit_rounds_display_height() {
        // 1000x333 at width 300 -> 99.9 -> 100
        let snap = Snapshot::from_rgba(solid(1000, 333), 300).unwrap();
        assert_eq!(snap.display_size(), (300, 100));
    }

    #[test]
    fn test_empty_frame_is_an_error() {
        let empty = RgbaImage::new(0, 0);
        assert!(Snapshot::from_rgba(empty, 300).is_err());
    }

    #[test]
    fn test_crop_extracts_native_region() {
        let snap = Snapshot::from_rgba(solid(800, 600), 300).unwrap();
        let cropped = snap.crop(Rect::new(27, 27, 133, 80), 300).unwrap();
        assert_eq!(cropped.native_size(), (133, 80));
        // Small enough to display at native size
        assert_eq!(cropped.display_size(), (133, 80));
    }

    #[test]
    fn test_crop_out_of_bounds_is_an_error() {
        let snap = Snapshot::from_rgba(solid(100, 100), 300).unwrap();
        assert!(snap.crop(Rect::new(90, 90, 20, 20), 300).is_err());
    }

    #[test]
    fn test_crop_empty_region_is_an_error() {
        let snap = Snapshot::from_rgba(solid(100, 100), 300).unwrap();
        assert!(snap.crop(Rect::default(), 300).is_err());
    }

    #[test]
    fn test_data_url_has_png_prefix() {
        let snap = Snapshot::from_rgba(solid(4, 4), 300).unwrap();
        let url = snap.to_data_url().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }

    #[test]
    fn test_png_bytes_round_trip() {
        let snap = Snapshot::from_rgba(solid(6, 3), 300).unwrap();
        let png = snap.to_png_bytes().unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (6, 3));
    }

    #[test]
    fn test_save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.png");
        let snap = Snapshot::from_rgba(solid(5, 5), 300).unwrap();
        snap.save_png(&path).unwrap();
        assert!(path.exists());
    }
}
