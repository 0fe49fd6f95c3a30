/// Image decoding, fit-to-frame scaling and saving

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{AnnotatorError, Result};

/// Extensions offered by the open/save dialogs
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "bmp"];

/// Target size for scaling a freshly loaded image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
    pub keep_aspect_ratio: bool,
}

impl TargetSize {
    /// No scaling (zero target)
    pub fn none() -> Self {
        Self { width: 0, height: 0, keep_aspect_ratio: true }
    }

    pub fn is_set(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Decode an image file into RGBA8
pub fn decode_image(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(AnnotatorError::NotFound(path.to_path_buf()));
    }
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}

/// Size of `(w, h)` scaled to `target`. With aspect ratio kept, the result is
/// the largest size with the same ratio that fits inside the target.
pub fn fitted_size(w: u32, h: u32, target: TargetSize) -> (u32, u32) {
    if !target.is_set() || w == 0 || h == 0 {
        return (w, h);
    }
    if !target.keep_aspect_ratio {
        return (target.width, target.height);
    }
    let (tw, th) = (target.width as u64, target.height as u64);
    let rw = th * w as u64 / h as u64;
    let (nw, nh) = if rw <= tw {
        (rw, th)
    } else {
        (tw, tw * h as u64 / w as u64)
    };
    ((nw as u32).max(1), (nh as u32).max(1))
}

/// Smoothly rescale `img` to `target`; a zero target returns the image as is.
pub fn scale_to_target(img: RgbaImage, target: TargetSize) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (nw, nh) = fitted_size(w, h, target);
    if (nw, nh) == (w, h) {
        return img;
    }
    image::imageops::resize(&img, nw, nh, FilterType::CatmullRom)
}

/// Save `img` to `path`, picking the format from the extension.
/// A path without extension gets `.png`. JPEG output drops the alpha channel.
/// Returns the path actually written.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<PathBuf> {
    let path = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension("png"),
    };
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let format = match ext.as_str() {
        "png" => ImageFormat::Png,
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        "bmp" => ImageFormat::Bmp,
        other => return Err(AnnotatorError::UnsupportedFormat(other.to_string())),
    };

    if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .save_with_format(&path, format)?;
    } else {
        img.save_with_format(&path, format)?;
    }
    log::info!("Saved {}x{} image to {}", img.width(), img.height(), path.display());
    Ok(path)
}

/// Last path component for status messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
