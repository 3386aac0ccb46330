use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::ImageReader;
use xxhash_rust::xxh3::Xxh3;

use crate::foundation::error::FadeResult;

const XXH3_SEED: u64 = 0x5f3c_9a1e_d2b7_4c08;

/// Encoded image bytes plus the name they were uploaded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestFile {
    /// Display name, used in error messages.
    pub name: String,
    /// Encoded bytes (PNG, JPEG, GIF, WebP, ...).
    pub bytes: Vec<u8>,
}

impl IngestFile {
    /// Wrap in-memory bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, named after its file name.
    pub fn from_path(path: impl AsRef<Path>) -> FadeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image file '{}'", path.display()))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { name, bytes })
    }
}

/// An accepted image. Immutable once created; sequences are reordered by moving entries.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ImageInfo {
    /// Unique within a session.
    pub id: String,
    /// Name the image was uploaded under.
    pub name: String,
    /// `data:` URI of the original bytes.
    pub src: String,
    /// Width in pixels, `> 0`.
    pub width: u32,
    /// Height in pixels, `> 0`.
    pub height: u32,
}

/// Result of decoding one file, before dimension checks.
#[derive(Clone, Debug)]
pub(crate) struct DecodedImage {
    pub(crate) content_hash: u64,
    pub(crate) src: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl DecodedImage {
    pub(crate) fn into_info(self, name: &str, seq: u64) -> ImageInfo {
        ImageInfo {
            id: format!("img-{seq}-{:016x}", self.content_hash),
            name: name.to_owned(),
            src: self.src,
            width: self.width,
            height: self.height,
        }
    }
}

/// Read `bytes` far enough to learn dimensions and MIME type, and wrap them as a data URI.
///
/// Only the header is parsed; pixel data is never decoded.
pub(crate) fn decode_image(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let format = image::guess_format(bytes).context("detect image format")?;
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .context("read image dimensions")?;
    anyhow::ensure!(width > 0 && height > 0, "image has zero area");

    let mut h = Xxh3::with_seed(XXH3_SEED);
    h.update(bytes);

    Ok(DecodedImage {
        content_hash: h.digest(),
        src: data_uri(format.to_mime_type(), bytes),
        width,
        height,
    })
}

/// Encode `bytes` as a base64 `data:` URI.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// File extension for exported image URLs, derived from a `data:` URI's MIME type.
///
/// Unknown types and non-data URIs fall back to `.jpg`.
pub fn extension_for_src(src: &str) -> &'static str {
    let Some(mime) = src
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(mime, _)| mime)
    else {
        return ".jpg";
    };
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => ".png",
        "image/jpeg" | "image/jpg" => ".jpg",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        _ => ".jpg",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/decode.rs"]
mod tests;
