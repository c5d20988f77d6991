//! Asset loading

pub mod image_loader;

pub use image_loader::ImageData;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset could not be read or decoded
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// The decoded asset is unusable
    #[error("Invalid asset data: {0}")]
    InvalidData(String),
}
