use log::{debug, warn};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::{ImageFile, ImageFormat, ImageId, ImageRecord};

/// Discover images directly inside `directory`.
///
/// Subfolders are neither entered nor renamed. Results are sorted by file name
/// so ids are assigned in the same order on every run.
pub fn discover_images(directory: &Path) -> Result<Vec<ImageFile>> {
    if !directory.is_dir() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }

    let mut image_files = Vec::new();

    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();

        let Some(format) = get_image_format(path) else {
            debug!("Skipping file without extension: {}", path.display());
            continue;
        };
        if !format.is_supported() {
            debug!("Skipping non-image file: {}", path.display());
            continue;
        }

        match fs::metadata(path) {
            Ok(metadata) => image_files.push(ImageFile {
                path: path.to_path_buf(),
                size: metadata.len(),
                format,
            }),
            Err(e) => {
                // Log error but continue with other files
                warn!("Error reading metadata for {}: {}", path.display(), e);
            }
        }
    }

    Ok(image_files)
}

/// Get image format from file extension
fn get_image_format(path: &Path) -> Option<ImageFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(ImageFormat::from_extension)
}

/// State threaded through one discovery pass: the id counter and the records
/// built so far.
#[derive(Debug, Default)]
pub struct DiscoveryContext {
    next_id: usize,
    records: Vec<ImageRecord>,
}

impl DiscoveryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next id. Ids are consumed even if the file later fails
    /// to decode.
    pub fn assign_id(&mut self) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Number of ids handed out
    pub fn assigned(&self) -> usize {
        self.next_id
    }

    pub fn push(&mut self, record: ImageRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorSignature;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn create_test_image(dir: &Path, name: &str, ext: &str) -> PathBuf {
        let file_path = dir.join(format!("{}.{}", name, ext));
        let mut file = File::create(&file_path).unwrap();
        // Write some dummy data to simulate an image
        file.write_all(b"DUMMY IMAGE DATA").unwrap();
        file_path
    }

    fn setup_test_directory() -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();

        let subdir_path = dir.path().join("subdir");
        fs::create_dir(&subdir_path).unwrap();

        let files = vec![
            create_test_image(dir.path(), "b_image", "jpg"),
            create_test_image(dir.path(), "a_image", "png"),
            create_test_image(dir.path(), "d_image", "tiff"),
            create_test_image(dir.path(), "c_image", "JPEG"),
        ];
        create_test_image(&subdir_path, "nested", "jpg");

        let mut file = File::create(dir.path().join("document.txt")).unwrap();
        file.write_all(b"NOT AN IMAGE").unwrap();

        (dir, files)
    }

    #[test]
    fn test_get_image_format() {
        assert_eq!(get_image_format(Path::new("test.jpg")), Some(ImageFormat::Jpeg));
        assert_eq!(get_image_format(Path::new("test.jpeg")), Some(ImageFormat::Jpeg));
        assert_eq!(get_image_format(Path::new("test.PNG")), Some(ImageFormat::Png));
        assert_eq!(get_image_format(Path::new("test.tiff")), Some(ImageFormat::Tiff));
        assert!(!get_image_format(Path::new("test.txt")).unwrap().is_supported());
        assert_eq!(get_image_format(Path::new("test")), None);
    }

    #[test]
    fn test_discover_skips_subdirectories_and_non_images() {
        let (dir, files) = setup_test_directory();

        let discovered = discover_images(dir.path()).unwrap();
        assert_eq!(discovered.len(), files.len());

        for file in &discovered {
            assert_eq!(file.path.parent().unwrap(), dir.path());
            assert!(file.format.is_supported());
            assert_eq!(file.size, 16);
        }
    }

    #[test]
    fn test_discover_is_sorted_by_name() {
        let (dir, _) = setup_test_directory();

        let names: Vec<String> = discover_images(dir.path())
            .unwrap()
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["a_image.png", "b_image.jpg", "c_image.JPEG", "d_image.tiff"]
        );
    }

    #[test]
    fn test_discover_images_nonexistent_directory() {
        let result = discover_images(Path::new("/path/that/does/not/exist"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(discover_images(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_context_assigns_monotonic_ids() {
        let mut context = DiscoveryContext::new();
        assert_eq!(context.assign_id(), ImageId(0));
        assert_eq!(context.assign_id(), ImageId(1));

        let id = context.assign_id();
        context.push(ImageRecord {
            id,
            source_path: PathBuf::from("2.png"),
            width: 2,
            height: 2,
            signature: ColorSignature::default(),
            has_alpha: false,
            extension: "png".to_string(),
        });

        assert_eq!(context.assigned(), 3);
        assert_eq!(context.records().len(), 1);
        assert_eq!(context.records()[0].id, ImageId(2));
    }
}
