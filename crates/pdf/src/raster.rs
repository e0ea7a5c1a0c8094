//! JPEG encoding for rendered pages and thumbnails.

use image::{DynamicImage, ImageFormat, RgbImage};
use pagechunk_core::{Error, Result};
use std::io::Cursor;

/// Encode an RGB bitmap as JPEG bytes.
pub fn encode_jpeg(image: RgbImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .map_err(|e| Error::Render(format!("Failed to encode JPEG: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_encode_jpeg_round_trips_dimensions() {
        let bitmap = RgbImage::from_pixel(40, 20, Rgb([255, 255, 255]));
        let bytes = encode_jpeg(bitmap).unwrap();

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 20));
    }
}
