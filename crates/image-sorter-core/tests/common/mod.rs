#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

use image_sorter_core::Config;

/// Write a solid-colour PNG
pub fn create_solid_image(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save(&path)
        .unwrap();
    path
}

/// Write a solid-colour PNG with an alpha channel
pub fn create_solid_rgba_image(dir: &Path, name: &str, rgba: [u8; 4]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    RgbaImage::from_pixel(3, 3, Rgba(rgba)).save(&path).unwrap();
    path
}

/// Write a file with an image extension that is not an image
pub fn create_corrupt_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"DUMMY IMAGE DATA").unwrap();
    path
}

/// Sorted file names in a directory
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Quiet configuration pointed at `dir`
pub fn test_config(dir: &Path) -> Config {
    Config {
        image_dir: dir.to_path_buf(),
        show_progress: false,
        threads: 2,
        ..Default::default()
    }
}
