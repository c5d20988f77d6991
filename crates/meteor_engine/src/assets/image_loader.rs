//! Image loading utilities for canvas backgrounds
//!
//! Provides PNG loading and scaling for the raster surface.

use std::path::Path;

use image::{imageops::FilterType, RgbaImage};

use crate::assets::AssetError;

/// Loaded RGBA image
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image {:?}: {}", path_ref, e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Convert into an `RgbaImage` buffer
    pub fn into_rgba_image(self) -> Result<RgbaImage, AssetError> {
        let (width, height) = (self.width, self.height);
        RgbaImage::from_raw(width, height, self.data).ok_or_else(|| {
            AssetError::InvalidData(format!("Pixel buffer does not match {}x{}", width, height))
        })
    }

    /// Stretch the image to exactly `width` x `height`
    pub fn scaled_to(self, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
        let image = self.into_rgba_image()?;
        if image.dimensions() == (width, height) {
            return Ok(image);
        }
        Ok(image::imageops::resize(&image, width, height, FilterType::Triangle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_round_trips_into_buffer() {
        let image = ImageData::solid_color(4, 2, [10, 20, 30, 255])
            .into_rgba_image()
            .unwrap();
        assert_eq!(image.dimensions(), (4, 2));
        assert_eq!(image.get_pixel(3, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_scaling_stretches_to_target() {
        let image = ImageData::solid_color(2, 2, [0, 0, 255, 255])
            .scaled_to(8, 4)
            .unwrap();
        assert_eq!(image.dimensions(), (8, 4));
        let [r, _, b, a] = image.get_pixel(5, 2).0;
        assert_eq!(r, 0);
        assert!(b >= 250 && a >= 250);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(ImageData::from_file("no/such/world-map.png").is_err());
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let image = ImageData {
            data: vec![0; 3],
            width: 2,
            height: 2,
        };
        assert!(matches!(image.into_rgba_image(), Err(AssetError::InvalidData(_))));
    }
}
