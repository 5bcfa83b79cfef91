use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::Error;

/// Identifier assigned to each discovered image, in discovery order.
///
/// Ids are never reused within a run and survive every rename, which is what
/// keeps generated filenames unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub usize);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported image formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Webp,
    Other(String),
}

impl ImageFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "bmp" => Self::Bmp,
            "tif" | "tiff" => Self::Tiff,
            "webp" => Self::Webp,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Lower-cases an extension and folds `jpeg` into `jpg`.
pub fn canonical_extension(ext: &str) -> String {
    let ext = ext.to_lowercase();
    if ext == "jpeg" {
        "jpg".to_string()
    } else {
        ext
    }
}

/// Representation of a discovered image file, before decoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// Full path to the image file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Image format
    pub format: ImageFormat,
}

impl ImageFile {
    /// Normalized extension used in every generated name
    pub fn extension(&self) -> String {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        canonical_extension(ext)
    }
}

/// Per-channel intensity averaged over every pixel, as a percentage of 255.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorSignature {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ColorSignature {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Luma-like brightness over the channel percentages.
    pub fn brightness(&self) -> f64 {
        (self.red * 0.21 + self.green * 0.71 + self.blue * 0.08) / 2.55
    }
}

/// An image that has been decoded and summarized. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,

    /// Location on disk when the record was created
    pub source_path: PathBuf,

    pub width: u32,
    pub height: u32,

    pub signature: ColorSignature,

    /// Whether the decoded buffer carried an alpha channel
    pub has_alpha: bool,

    /// Lower-cased, `jpeg` normalized to `jpg`
    pub extension: String,
}

impl ImageRecord {
    /// Total number of pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn brightness(&self) -> f64 {
        self.signature.brightness()
    }
}

/// How a run orders the folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Rename by pixel dimensions
    #[default]
    Resolution,

    /// Rename by perceived brightness
    Brightness,

    /// Rename along a nearest-neighbour tour through colour space
    Color,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::Brightness => "brightness",
            Self::Color => "color",
        }
    }

    /// Whether each image can be renamed as soon as it is decoded.
    ///
    /// Colour ordering needs every signature before the first rename.
    pub fn renames_immediately(&self) -> bool {
        match self {
            Self::Resolution | Self::Brightness => true,
            Self::Color => false,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resolution" => Ok(Self::Resolution),
            "brightness" => Ok(Self::Brightness),
            "color" => Ok(Self::Color),
            other => Err(Error::Configuration(format!(
                "Unknown sort mode '{}', expected resolution, brightness or color",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_extension() {
        assert_eq!(canonical_extension("JPEG"), "jpg");
        assert_eq!(canonical_extension("jpeg"), "jpg");
        assert_eq!(canonical_extension("PNG"), "png");
        assert_eq!(canonical_extension("Tif"), "tif");
    }

    #[test]
    fn test_image_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("tiff"), ImageFormat::Tiff);
        assert!(ImageFormat::from_extension("webp").is_supported());
        assert!(!ImageFormat::from_extension("txt").is_supported());
    }

    /// 40% in every channel: the weights sum to 1.0 so brightness is 40 / 2.55
    #[test]
    fn test_brightness_of_uniform_signature() {
        let signature = ColorSignature::new(40.0, 40.0, 40.0);
        assert_eq!(format!("{:.4}", signature.brightness()), "15.6863");
    }

    #[test]
    fn test_brightness_weights() {
        assert!((ColorSignature::new(100.0, 0.0, 0.0).brightness() - 21.0 / 2.55).abs() < 1e-9);
        assert!((ColorSignature::new(0.0, 100.0, 0.0).brightness() - 71.0 / 2.55).abs() < 1e-9);
        assert!((ColorSignature::new(0.0, 0.0, 100.0).brightness() - 8.0 / 2.55).abs() < 1e-9);
    }

    #[test]
    fn test_sort_mode_parse() {
        assert_eq!("resolution".parse::<SortMode>().unwrap(), SortMode::Resolution);
        assert_eq!(" Brightness ".parse::<SortMode>().unwrap(), SortMode::Brightness);
        assert_eq!("color".parse::<SortMode>().unwrap(), SortMode::Color);
        assert!(matches!(
            "colour".parse::<SortMode>(),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_sort_mode_display_round_trips() {
        for mode in [SortMode::Resolution, SortMode::Brightness, SortMode::Color] {
            assert_eq!(mode.to_string().parse::<SortMode>().unwrap(), mode);
        }
        assert!(!SortMode::Color.renames_immediately());
        assert!(SortMode::Brightness.renames_immediately());
    }
}
