//! Pixel-level transform implementation.
//!
//! Decoding, resampling, and encoding run on the blocking thread pool;
//! the async worker only awaits the result. The output overwrites the
//! input file — the record's `original_path` always points at the
//! current bytes.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::imageops::FilterType;
use image::DynamicImage;

use imgproc_core::action::{MINIATURE_DIMENSIONS, RESIZE_DIMENSIONS};
use imgproc_core::{ImageAction, Transform, TransformError};

/// Default watermark: a translucent dark band across the bottom edge.
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    /// Fraction of the image height the band covers.
    pub band_fraction: f32,
    /// Blend weight of the band over the original pixels, 0..=1.
    pub opacity: f32,
    /// Gray level of the band.
    pub shade: u8,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            band_fraction: 0.12,
            opacity: 0.45,
            shade: 32,
        }
    }
}

/// [`Transform`] backed by the `image` crate.
pub struct PixelTransform {
    watermark: WatermarkConfig,
}

impl PixelTransform {
    pub fn new() -> Self {
        Self {
            watermark: WatermarkConfig::default(),
        }
    }
}

impl Default for PixelTransform {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transform for PixelTransform {
    async fn apply(&self, path: &Path, action: ImageAction) -> Result<(), TransformError> {
        let path = PathBuf::from(path);
        let watermark = self.watermark.clone();
        tokio::task::spawn_blocking(move || apply_blocking(&path, action, &watermark))
            .await
            .map_err(|e| TransformError::new(format!("transform task aborted: {e}")))?
    }
}

fn apply_blocking(
    path: &Path,
    action: ImageAction,
    watermark: &WatermarkConfig,
) -> Result<(), TransformError> {
    let img = image::open(path).map_err(|e| {
        TransformError::with_source(format!("decoding {} failed", path.display()), e)
    })?;

    let out = match action {
        ImageAction::Resize => {
            img.resize_exact(RESIZE_DIMENSIONS.0, RESIZE_DIMENSIONS.1, FilterType::Lanczos3)
        }
        ImageAction::Miniature => img.thumbnail(MINIATURE_DIMENSIONS.0, MINIATURE_DIMENSIONS.1),
        ImageAction::Watermark => apply_watermark(&img, watermark),
    };

    out.save(path).map_err(|e| {
        TransformError::with_source(format!("encoding {} failed", path.display()), e)
    })
}

/// Blend a dark band over the bottom of the image.
///
/// Works on RGB8 so the result encodes under every supported format
/// (JPEG rejects alpha channels).
fn apply_watermark(img: &DynamicImage, config: &WatermarkConfig) -> DynamicImage {
    let mut rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let band_height = ((height as f32 * config.band_fraction).ceil() as u32).clamp(1, height);
    let opacity = config.opacity.clamp(0.0, 1.0);

    for y in height - band_height..height {
        for x in 0..width {
            let pixel = rgb.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                let blended =
                    *channel as f32 * (1.0 - opacity) + config.shade as f32 * opacity;
                *channel = blended.round() as u8;
            }
        }
    }
    DynamicImage::ImageRgb8(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{ImageBuffer, Rgb};
    use tempfile::TempDir;

    fn write_test_image(dir: &TempDir, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.path().join(name);
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(w, h, Rgb([200u8, 180, 160]));
        img.save(&path).expect("write fixture image");
        path
    }

    #[tokio::test]
    async fn resize_rewrites_to_target_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = write_test_image(&dir, "in.png", 64, 48);

        PixelTransform::new()
            .apply(&path, ImageAction::Resize)
            .await
            .unwrap();

        let resized = image::open(&path).unwrap();
        assert_eq!(resized.width(), RESIZE_DIMENSIONS.0);
        assert_eq!(resized.height(), RESIZE_DIMENSIONS.1);
    }

    #[tokio::test]
    async fn miniature_fits_within_bounds() {
        let dir = TempDir::new().unwrap();
        let path = write_test_image(&dir, "in.png", 640, 480);

        PixelTransform::new()
            .apply(&path, ImageAction::Miniature)
            .await
            .unwrap();

        let thumb = image::open(&path).unwrap();
        assert!(thumb.width() <= MINIATURE_DIMENSIONS.0);
        assert!(thumb.height() <= MINIATURE_DIMENSIONS.1);
    }

    #[tokio::test]
    async fn watermark_darkens_the_bottom_band() {
        let dir = TempDir::new().unwrap();
        let path = write_test_image(&dir, "in.png", 32, 32);

        PixelTransform::new()
            .apply(&path, ImageAction::Watermark)
            .await
            .unwrap();

        let marked = image::open(&path).unwrap().to_rgb8();
        let top = marked.get_pixel(16, 0);
        let bottom = marked.get_pixel(16, 31);
        assert_eq!(top.0, [200, 180, 160]);
        assert!(bottom.0[0] < 200, "bottom band should be darkened");
    }

    #[tokio::test]
    async fn missing_file_is_a_transform_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.png");

        let err = PixelTransform::new()
            .apply(&path, ImageAction::Resize)
            .await
            .unwrap_err();
        assert!(err.message.contains("decoding"));
    }
}
