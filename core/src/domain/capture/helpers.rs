use std::io::Cursor;

use image::{GenericImageView, ImageFormat, imageops::FilterType};

use crate::domain::common::entities::CoreError;

/// Downscales an encoded image so its longest side does not exceed
/// `max_dimension`, preserving aspect ratio. Images already within bounds
/// pass through untouched (no re-encode). The output is JPEG, which is what
/// the vision backend expects and keeps upload payloads small.
pub fn downscale(bytes: &[u8], max_dimension: u32) -> Result<Vec<u8>, CoreError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("unreadable image: {e}")))?;

    let (width, height) = img.dimensions();
    if width.max(height) <= max_dimension {
        return Ok(bytes.to_vec());
    }

    let resized = img.resize(max_dimension, max_dimension, FilterType::Triangle);
    let mut out = Cursor::new(Vec::new());
    resized.to_rgb8().write_to(&mut out, ImageFormat::Jpeg).map_err(|e| {
        tracing::error!("image re-encode failed: {e}");
        CoreError::Internal
    })?;
    Ok(out.into_inner())
}
