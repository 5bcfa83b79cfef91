use crate::types::{ColorSignature, ImageRecord};

/// Euclidean distance between two signatures in RGB percentage space.
#[inline]
pub fn distance_3d(a: &ColorSignature, b: &ColorSignature) -> f64 {
    let dr = a.red - b.red;
    let dg = a.green - b.green;
    let db = a.blue - b.blue;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Distance between the signatures of two records
#[inline]
pub fn record_distance(a: &ImageRecord, b: &ImageRecord) -> f64 {
    distance_3d(&a.signature, &b.signature)
}
