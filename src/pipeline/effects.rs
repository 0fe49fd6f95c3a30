/// Decorative "processing" effects
///
/// None of these analyse the image. They paint fixed overlays whose shape
/// depends only on the image size and the control values, so the UI looks
/// like an analysis tool without running one.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use super::raster;

/// Text stamped onto the image by the simulated analysis
pub const ANALYSIS_BANNER: &str = "Analysis Complete: 3 objects found";

/// Processing method selected in the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMethod {
    Original,
    SimulatedThreshold,
    SimulatedSegmentation,
    DrawingMode,
}

impl ProcessingMethod {
    pub const ALL: [ProcessingMethod; 4] = [
        ProcessingMethod::Original,
        ProcessingMethod::SimulatedThreshold,
        ProcessingMethod::SimulatedSegmentation,
        ProcessingMethod::DrawingMode,
    ];
}

impl std::fmt::Display for ProcessingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingMethod::Original => write!(f, "Original"),
            ProcessingMethod::SimulatedThreshold => write!(f, "Simulated Threshold"),
            ProcessingMethod::SimulatedSegmentation => write!(f, "Simulated Segmentation"),
            ProcessingMethod::DrawingMode => write!(f, "Drawing Mode"),
        }
    }
}

/// Annotation pen color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationColor {
    Green,
    Red,
    Blue,
}

impl AnnotationColor {
    pub const ALL: [AnnotationColor; 3] = [
        AnnotationColor::Green,
        AnnotationColor::Red,
        AnnotationColor::Blue,
    ];

    pub fn rgba(&self) -> Rgba<u8> {
        match self {
            AnnotationColor::Green => Rgba([0, 255, 0, 255]),
            AnnotationColor::Red => Rgba([255, 0, 0, 255]),
            AnnotationColor::Blue => Rgba([0, 0, 255, 255]),
        }
    }
}

impl std::fmt::Display for AnnotationColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationColor::Green => write!(f, "Green (Foreground)"),
            AnnotationColor::Red => write!(f, "Red (Background)"),
            AnnotationColor::Blue => write!(f, "Blue (Object)"),
        }
    }
}

/// Control values the effects read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectParams {
    /// 0–100
    pub threshold: u8,
    /// 2–10
    pub clusters: u8,
}

/// Apply `method` to `img` in place. Original and DrawingMode paint nothing.
pub fn apply_method(img: &mut RgbaImage, method: ProcessingMethod, params: EffectParams) {
    match method {
        ProcessingMethod::SimulatedThreshold => simulated_threshold(img, params.threshold),
        ProcessingMethod::SimulatedSegmentation => simulated_segmentation(img, params.clusters),
        ProcessingMethod::Original | ProcessingMethod::DrawingMode => {}
    }
}

/// Darken the whole image: half-transparent black at opacity threshold/100.
pub fn simulated_threshold(img: &mut RgbaImage, threshold: u8) {
    let opacity = threshold.min(100) as f32 / 100.0;
    let (w, h) = (img.width() as i32, img.height() as i32);
    raster::fill_rect(img, 0, 0, w, h, Rgba([0, 0, 0, 128]), opacity);
}

/// Color of segment `i`
pub fn segment_color(i: u32) -> Rgba<u8> {
    Rgba([
        ((73 * i) % 256) as u8,
        ((169 * i) % 256) as u8,
        ((253 * i) % 256) as u8,
        100,
    ])
}

/// Rectangle (x, y, w, h) of segment `i` out of `clusters`, in a two-column grid.
pub fn segment_rect(i: u32, clusters: u32, width: u32, height: u32) -> (i32, i32, i32, i32) {
    let rows = clusters / 2 + 1;
    (
        (width * (i % 2) / 2) as i32,
        (height * (i / 2) / rows) as i32,
        (width / 2) as i32,
        (height / rows) as i32,
    )
}

/// Paint `clusters` translucent colored tiles over the image.
pub fn simulated_segmentation(img: &mut RgbaImage, clusters: u8) {
    let clusters = clusters as u32;
    let (w, h) = img.dimensions();
    for i in 0..clusters {
        let (x, y, rw, rh) = segment_rect(i, clusters, w, h);
        raster::fill_rect(img, x, y, rw, rh, segment_color(i), 1.0);
    }
}

/// Copy of `img` with the fixed "detected objects" overlay and banner.
pub fn simulated_analysis(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    let (w, h) = (out.width() as i32, out.height() as i32);

    raster::stroke_ellipse(&mut out, w / 4, h / 4, w / 2, h / 2, Rgba([0, 255, 0, 255]), 2, 0.5);
    raster::stroke_rect(&mut out, w / 3, h / 3, w / 3, h / 3, Rgba([0, 0, 255, 255]), 2, 0.5);
    raster::draw_text(&mut out, ANALYSIS_BANNER, 10, 30, Rgba([255, 255, 255, 255]), 3);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_threshold_scales_with_slider() {
        let mut half = white(8, 8);
        simulated_threshold(&mut half, 50);
        assert_eq!(half.get_pixel(3, 3), &Rgba([191, 191, 191, 255]));

        let mut full = white(8, 8);
        simulated_threshold(&mut full, 100);
        assert_eq!(full.get_pixel(3, 3), &Rgba([127, 127, 127, 255]));

        let mut none = white(8, 8);
        simulated_threshold(&mut none, 0);
        assert_eq!(none, white(8, 8));
    }

    #[test]
    fn test_segment_layout_three_clusters() {
        // rows = 3/2 + 1 = 2
        assert_eq!(segment_rect(0, 3, 100, 80), (0, 0, 50, 40));
        assert_eq!(segment_rect(1, 3, 100, 80), (50, 0, 50, 40));
        assert_eq!(segment_rect(2, 3, 100, 80), (0, 40, 50, 40));
    }

    #[test]
    fn test_segment_colors() {
        assert_eq!(segment_color(0), Rgba([0, 0, 0, 100]));
        assert_eq!(segment_color(1), Rgba([73, 169, 253, 100]));
        assert_eq!(segment_color(4), Rgba([36, 164, 244, 100]));
    }

    #[test]
    fn test_segmentation_paints_tiles() {
        let mut img = white(100, 80);
        simulated_segmentation(&mut img, 3);
        // tile 0 is translucent black
        assert_eq!(img.get_pixel(10, 10), &Rgba([155, 155, 155, 255]));
        // bottom-right quadrant is not covered with 3 clusters
        assert_eq!(img.get_pixel(75, 60), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_analysis_leaves_input_untouched() {
        let img = white(200, 160);
        let out = simulated_analysis(&img);
        assert_eq!(img, white(200, 160));
        assert_ne!(out, img);
        // top edge of the blue rectangle (66, 53, 66, 53), half opacity
        assert_eq!(out.get_pixel(99, 53), &Rgba([128, 128, 255, 255]));
        // centre of the image stays clean
        assert_eq!(out.get_pixel(100, 80), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_method_dispatch() {
        let params = EffectParams { threshold: 100, clusters: 3 };
        let mut img = white(10, 10);
        apply_method(&mut img, ProcessingMethod::DrawingMode, params);
        apply_method(&mut img, ProcessingMethod::Original, params);
        assert_eq!(img, white(10, 10));
        apply_method(&mut img, ProcessingMethod::SimulatedThreshold, params);
        assert_eq!(img.get_pixel(0, 0), &Rgba([127, 127, 127, 255]));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ProcessingMethod::DrawingMode.to_string(), "Drawing Mode");
        assert_eq!(AnnotationColor::Red.to_string(), "Red (Background)");
        assert_eq!(AnnotationColor::Blue.rgba(), Rgba([0, 0, 255, 255]));
    }
}
