use anyhow::Result;

/// Decode PNG/JPEG/GIF bytes into a Slint image
pub fn decode_map_image(image_data: &[u8]) -> Result<slint::Image> {
    // Auto-detect the image format and decode
    let rgba_img = image::load_from_memory(image_data)?.to_rgba8();

    let width = rgba_img.width();
    let height = rgba_img.height();

    let pixel_buffer = slint::SharedPixelBuffer::<slint::Rgba8Pixel>::clone_from_slice(rgba_img.as_raw(), width, height);
    Ok(slint::Image::from_rgba8(pixel_buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([30, 120, 200, 255]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut bytes, ImageOutputFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_keeps_dimensions() {
        let image = decode_map_image(&png_bytes(6, 4)).unwrap();
        assert_eq!(image.size().width, 6);
        assert_eq!(image.size().height, 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_map_image(b"<html>not a map</html>").is_err());
    }
}
