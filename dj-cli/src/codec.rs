use anyhow::{Context, Result};
use dj_core::ImageCodec;
use image::{ImageReader, codecs::jpeg::JpegEncoder, imageops::FilterType};
use std::io::Cursor;

/// [`ImageCodec`] backed by the `image` crate.
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn dimensions(&self, bytes: &[u8]) -> Result<(u32, u32)> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .context("reading image header")?;
        reader.into_dimensions().context("unsupported image format")
    }

    fn encode_jpeg(&self, bytes: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(bytes).context("decoding image")?;
        let rgb = decoded
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgb8();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, quality)
            .encode_image(&rgb)
            .context("encoding jpeg")?;
        Ok(out)
    }
}
