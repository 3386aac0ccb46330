use rayon::prelude::*;

use crate::foundation::error::{FadeError, FadeResult};
use crate::ingest::decode::{ImageInfo, IngestFile, decode_image};

/// Minimum size of the first batch in an empty session.
pub const MIN_FIRST_BATCH: usize = 2;

/// Decode a batch of uploads and check them against the current sequence.
///
/// Files are decoded in parallel. The batch is all-or-nothing: the first failure in upload
/// order rejects every file, so the caller can append the result without further checks.
/// Image ids are numbered from `first_seq`.
#[tracing::instrument(skip(files, existing), fields(files = files.len(), existing = existing.len()))]
pub fn ingest_batch(
    files: &[IngestFile],
    existing: &[ImageInfo],
    first_seq: u64,
) -> FadeResult<Vec<ImageInfo>> {
    if existing.is_empty() && files.len() < MIN_FIRST_BATCH {
        return Err(FadeError::ingest(
            "Please upload at least two images to merge.",
        ));
    }

    let decoded = files
        .par_iter()
        .map(|f| decode_image(&f.bytes))
        .collect::<Vec<_>>();

    let mut reference = existing.first().map(|img| (img.width, img.height));
    let mut out = Vec::with_capacity(files.len());
    for ((file, result), seq) in files.iter().zip(decoded).zip(first_seq..) {
        let img = result.map_err(|e| {
            tracing::warn!(file = %file.name, error = %format!("{e:#}"), "image decode failed");
            FadeError::ingest(format!("Could not load image: {}", file.name))
        })?;
        let (ref_w, ref_h) = *reference.get_or_insert((img.width, img.height));
        if (img.width, img.height) != (ref_w, ref_h) {
            return Err(FadeError::ingest(format!(
                "All images must have the same dimensions. Expected {ref_w}x{ref_h}px, but found {}x{}px.",
                img.width, img.height
            )));
        }
        out.push(img.into_info(&file.name, seq));
    }

    tracing::debug!(accepted = out.len(), "image batch accepted");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/batch.rs"]
mod tests;
