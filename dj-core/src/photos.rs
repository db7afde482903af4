//! Photo attachment: downscale, recompress, embed.
//!
//! Pixel work is delegated to an [`ImageCodec`]. This module only decides the
//! target size, which files get processed, and how the result is stored.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::entry::{DEFAULT_PHOTO_NAME, MAX_PHOTOS_PER_ENTRY, Photo};
use crate::error::JournalError;

pub const IMAGE_MAX_DIM: u32 = 1280;
pub const JPEG_QUALITY: u8 = 75;
/// Every attached photo is re-encoded to this type.
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Decodes images and re-encodes them as JPEG.
pub trait ImageCodec {
    /// Pixel size of the encoded image in `bytes`.
    fn dimensions(&self, bytes: &[u8]) -> Result<(u32, u32)>;

    /// Resamples `bytes` to exactly `width` x `height` and encodes it as JPEG
    /// at `quality` (1-100).
    fn encode_jpeg(&self, bytes: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>>;
}

/// Scales `width` x `height` down to fit in a `max_dim` square, keeping the
/// aspect ratio. Sizes that already fit are returned unchanged.
///
/// ```
/// # use dj_core::photos::fit_box;
/// assert_eq!(fit_box(2560, 1440, 1280), (1280, 720));
/// assert_eq!(fit_box(800, 600, 1280), (800, 600));
/// ```
pub fn fit_box(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }
    let max = f64::from(max_dim);
    let scale = f64::min(max / f64::from(width), max / f64::from(height));
    (
        (f64::from(width) * scale).round() as u32,
        (f64::from(height) * scale).round() as u32,
    )
}

/// A file the user picked for attachment.
#[derive(Debug, Clone)]
pub struct PhotoSource {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoSource {
    /// Reads `path`, guessing the MIME type from its extension.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime_type: mime_from_path(path).to_string(),
            name,
            bytes,
        })
    }
}

fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttachOptions {
    pub max_dim: u32,
    pub quality: u8,
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self {
            max_dim: IMAGE_MAX_DIM,
            quality: JPEG_QUALITY,
        }
    }
}

/// What happened to a selection of files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttachReport {
    pub attached: usize,
    /// Files in the processed slots that were not images.
    pub skipped: usize,
    /// Files past the per-entry photo limit, never looked at.
    pub over_limit: usize,
}

/// Compresses `sources` one by one and appends them to `pending`, in
/// selection order.
///
/// Only the first `5 - pending.len()` files are considered; non-image files
/// among them are skipped but still use up their slot. Photos processed
/// before a codec failure stay in `pending`.
pub fn attach_photos<C: ImageCodec + ?Sized>(
    pending: &mut Vec<Photo>,
    sources: Vec<PhotoSource>,
    codec: &C,
    options: AttachOptions,
) -> Result<AttachReport, JournalError> {
    let mut report = AttachReport::default();
    if sources.is_empty() {
        return Ok(report);
    }

    let remaining = MAX_PHOTOS_PER_ENTRY.saturating_sub(pending.len());
    if remaining == 0 {
        return Err(JournalError::TooManyPhotos(MAX_PHOTOS_PER_ENTRY));
    }
    report.over_limit = sources.len().saturating_sub(remaining);

    for source in sources.into_iter().take(remaining) {
        if !source.mime_type.starts_with("image/") {
            debug!(name = %source.name, mime = %source.mime_type, "skipping non-image file");
            report.skipped += 1;
            continue;
        }
        let data_url =
            compress_to_data_url(&source, codec, options).map_err(|e| JournalError::Image {
                name: source.name.clone(),
                reason: format!("{e:#}"),
            })?;
        let name = if source.name.is_empty() {
            DEFAULT_PHOTO_NAME.to_string()
        } else {
            source.name
        };
        pending.push(Photo {
            name,
            mime_type: OUTPUT_MIME_TYPE.to_string(),
            data_url,
        });
        report.attached += 1;
    }
    Ok(report)
}

fn compress_to_data_url<C: ImageCodec + ?Sized>(
    source: &PhotoSource,
    codec: &C,
    options: AttachOptions,
) -> Result<String> {
    let (width, height) = codec.dimensions(&source.bytes)?;
    let (w, h) = fit_box(width, height, options.max_dim);
    debug!(name = %source.name, width, height, w, h, "compressing photo");
    let jpeg = codec.encode_jpeg(&source.bytes, w.max(1), h.max(1), options.quality)?;
    Ok(format!("data:{OUTPUT_MIME_TYPE};base64,{}", STANDARD.encode(jpeg)))
}
