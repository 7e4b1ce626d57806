// this_file: backends/gtext-core/src/surface.rs

//! Turns rasterized coverage bitmaps into GPU textures.

use crate::{
    types::{GlyphBitmap, PixelFormat},
    GTextError, Result, TextureFactory,
};

/// Wrap `bitmap` into a texture built by `factory`.
///
/// The bitmap must hold at least `width * height` bytes; extra trailing
/// bytes are ignored. Coverage is expanded to RGBA when the factory asks
/// for it.
pub fn make_texture<F>(factory: &F, bitmap: &GlyphBitmap) -> Result<F::Texture>
where
    F: TextureFactory + ?Sized,
{
    let expected = bitmap.expected_len();
    if bitmap.data.len() < expected {
        return Err(GTextError::texture(format!(
            "bitmap {}x{} needs {expected} bytes, got {}",
            bitmap.width,
            bitmap.height,
            bitmap.data.len()
        )));
    }
    let coverage = &bitmap.data[..expected];

    match factory.pixel_format() {
        PixelFormat::Alpha8 => {
            factory.create_texture(bitmap.width, bitmap.height, PixelFormat::Alpha8, coverage)
        }
        PixelFormat::Rgba8 => {
            let rgba = expand_coverage(coverage);
            factory.create_texture(bitmap.width, bitmap.height, PixelFormat::Rgba8, &rgba)
        }
    }
}

fn expand_coverage(data: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(data.len() * PixelFormat::Rgba8.bytes_per_pixel());
    for &value in data {
        rgba.extend_from_slice(&[255, 255, 255, value]);
    }
    rgba
}

pub(crate) fn encode_gray_png(bitmap: &GlyphBitmap) -> Result<Vec<u8>> {
    if bitmap.is_empty() {
        return Err(GTextError::ImageEncode(
            "cannot encode an empty bitmap".to_string(),
        ));
    }
    if bitmap.data.len() < bitmap.expected_len() {
        return Err(GTextError::ImageEncode(format!(
            "bitmap {}x{} is missing pixel data",
            bitmap.width, bitmap.height
        )));
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, bitmap.width, bitmap.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|err| GTextError::ImageEncode(format!("PNG encoder error: {err}")))?;
        writer
            .write_image_data(&bitmap.data[..bitmap.expected_len()])
            .map_err(|err| GTextError::ImageEncode(format!("PNG write error: {err}")))?;
    } // writer and encoder are dropped here
    Ok(png_data)
}
