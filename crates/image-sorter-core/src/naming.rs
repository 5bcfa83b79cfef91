//! Filename grammar for every sort mode.
//!
//! - resolution: `<width> x <height> -<id>.<ext>`
//! - brightness: `B<brightness, 4 decimals> -<id>.<ext>`, no leading zero
//!   below 1 (`B.5000`)
//! - colour:     `C<tour position> -<distance to previous> -<id>.<ext>`
//! - staging:    `<id>.<ext>`
//!
//! Each may carry a run prefix. Every name embeds the image id, so two images
//! can never be given the same name in one run.

use crate::types::{ImageId, ImageRecord};

/// Temporary name given to a file before sorting
pub fn staging_name(prefix: &str, id: ImageId, extension: &str) -> String {
    format!("{}{}.{}", prefix, id, extension)
}

/// Name ordering by pixel dimensions
pub fn resolution_name(prefix: &str, record: &ImageRecord) -> String {
    format!(
        "{}{} x {} -{}.{}",
        prefix, record.width, record.height, record.id, record.extension
    )
}

/// Name ordering by perceived brightness
pub fn brightness_name(prefix: &str, record: &ImageRecord) -> String {
    format!(
        "{}B{} -{}.{}",
        prefix,
        format_brightness(record.brightness()),
        record.id,
        record.extension
    )
}

/// Four decimals with the integer part dropped when it is zero: `15.6863`,
/// `.5000`.
pub fn format_brightness(brightness: f64) -> String {
    let fixed = format!("{:.4}", brightness);
    match fixed.strip_prefix("0.") {
        Some(fraction) => format!(".{}", fraction),
        None => fixed,
    }
}

/// Name ordering by position along the colour tour
pub fn color_name(prefix: &str, position: usize, distance: f64, record: &ImageRecord) -> String {
    format!(
        "{}C{} -{} -{}.{}",
        prefix,
        position,
        format_distance(distance),
        record.id,
        record.extension
    )
}

/// Shortest decimal that round-trips, always with a fractional part.
///
/// Plain notation from 1e-3 up to 1e7 (`0.0`, `2.449489742783178`),
/// otherwise scientific with an upper-case `E` and at least one fractional
/// mantissa digit (`5.0E-4`, `9.999E-4`).
pub fn format_distance(distance: f64) -> String {
    let magnitude = distance.abs();
    if distance == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", distance);
    }

    let scientific = format!("{:e}", distance);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{}E{}", mantissa, exponent)
    } else {
        format!("{}.0E{}", mantissa, exponent)
    }
}
