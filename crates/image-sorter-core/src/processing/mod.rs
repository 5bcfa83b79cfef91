//! Colour analysis: signatures, distances and the tour built from them.

pub mod decode;
pub mod distance;
pub mod signature;
pub mod tour;

pub use decode::{record_from_file, record_from_image};
pub use distance::{distance_3d, record_distance};
pub use signature::{extract, extract_with_layout, PixelLayout};
pub use tour::{build_tour, Tour};
