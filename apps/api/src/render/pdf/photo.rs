//! Profile photo decoding for the PDF export.
//!
//! Photos arrive as `data:` URLs. PNG and JPEG are accepted; anything else is a
//! render error rather than a silently missing photo.

use base64::Engine;
use image::ImageFormat;

use crate::render::RenderError;

/// Longest edge kept in the PDF. The photo box is small; larger sources only add bytes.
const MAX_EDGE_PX: u32 = 512;

/// Raw 8-bit RGB samples ready for a DeviceRGB image XObject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPhoto {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

pub fn decode_photo(source: &str) -> Result<DecodedPhoto, RenderError> {
    let (mime, data) = parse_data_url(source)?;
    let format = if mime.contains("png") {
        ImageFormat::Png
    } else if mime.contains("jpeg") || mime.contains("jpg") {
        ImageFormat::Jpeg
    } else {
        return Err(RenderError::UnsupportedImage(mime));
    };

    let mut decoded = image::load_from_memory_with_format(&data, format)
        .map_err(|e| RenderError::InvalidImage(e.to_string()))?;
    if decoded.width() > MAX_EDGE_PX || decoded.height() > MAX_EDGE_PX {
        decoded = decoded.thumbnail(MAX_EDGE_PX, MAX_EDGE_PX);
    }

    let rgb = decoded.to_rgb8();
    Ok(DecodedPhoto {
        width: rgb.width(),
        height: rgb.height(),
        rgb: rgb.into_raw(),
    })
}

fn parse_data_url(source: &str) -> Result<(String, Vec<u8>), RenderError> {
    let Some(rest) = source.trim().strip_prefix("data:") else {
        return Err(RenderError::UnsupportedImage(
            "photo must be a data: URL".to_string(),
        ));
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return Err(RenderError::InvalidImage("data URL has no payload".to_string()));
    };
    let mime = header.split(';').next().unwrap_or_default().to_lowercase();
    if !header.split(';').any(|part| part == "base64") {
        return Err(RenderError::InvalidImage(
            "photo data URL must be base64 encoded".to_string(),
        ));
    }
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| RenderError::InvalidImage(e.to_string()))?;
    Ok((mime, data))
}

/// A PNG data URL of the given size filled with one colour.
#[cfg(test)]
pub(crate) fn png_data_url(width: u32, height: u32) -> String {
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 60]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
