// upload.rs - Photo normalisation
//
// Whatever the user picked is decoded, shrunk to fit the generator's
// working size and re-encoded as RGBA PNG before it is base64'd.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::error::UploadError;

pub fn prepare(bytes: &[u8], max_dim: u32) -> Result<Vec<u8>, UploadError> {
    let img = image::load_from_memory(bytes).map_err(UploadError::Decode)?;

    let img = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Triangle)
    } else {
        img
    };

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img.to_rgba8())
        .write_to(&mut out, ImageFormat::Png)
        .map_err(UploadError::Encode)?;
    Ok(out.into_inner())
}
