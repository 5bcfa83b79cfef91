use image::{DynamicImage, GenericImageView, ImageError};
use log::debug;
use std::path::Path;

use super::signature::{extract_with_layout, PixelLayout};
use crate::error::{Error, Result};
use crate::types::{canonical_extension, ImageId, ImageRecord};

/// Decode an image file and summarize it into a record.
///
/// A file that cannot be read from disk is `Error::Io`; one that can be read
/// but not interpreted as an image is `Error::Decode`.
pub fn record_from_file<P: AsRef<Path>>(path: P, id: ImageId) -> Result<ImageRecord> {
    let path_ref = path.as_ref();
    let img = image::open(path_ref).map_err(|e| match e {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::Decode(format!("{}: {}", path_ref.display(), other)),
    })?;
    debug!("Decoded {} as {:?}", path_ref.display(), img.color());
    record_from_image(&img, path_ref, id)
}

/// Summarize an image already in memory
pub fn record_from_image(img: &DynamicImage, path: &Path, id: ImageId) -> Result<ImageRecord> {
    let (width, height) = img.dimensions();
    let layout = if img.color().has_alpha() {
        PixelLayout::Rgba
    } else {
        PixelLayout::Rgb
    };

    // 8 bits per channel regardless of the source depth
    let signature = match layout {
        PixelLayout::Rgba => extract_with_layout(img.to_rgba8().as_raw(), width, height, layout)?,
        _ => extract_with_layout(img.to_rgb8().as_raw(), width, height, layout)?,
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(canonical_extension)
        .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;

    Ok(ImageRecord {
        id,
        source_path: path.to_path_buf(),
        width,
        height,
        signature,
        has_alpha: layout.has_alpha(),
        extension,
    })
}
