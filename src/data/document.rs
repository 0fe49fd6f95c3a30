/// The image being worked on: displayed bitmap, its reset copy and history

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::data::history::History;
use crate::error::Result;
use crate::pipeline::effects::{self, AnnotationColor, EffectParams, ProcessingMethod};
use crate::pipeline::image_io;
use crate::pipeline::raster;

#[derive(Debug, Clone)]
pub struct ImageDocument {
    /// File the image was loaded from
    pub source: PathBuf,
    /// Bitmap currently displayed and edited
    current: RgbaImage,
    /// Copy captured at load time; target of reset and base of processing
    original: RgbaImage,
    history: History,
    /// Bumped on every change to `current` so the view knows to re-upload
    revision: u64,
    /// A stroke has painted since the last history push
    stroke_dirty: bool,
}

impl ImageDocument {
    /// New document from a freshly loaded image; history holds just that image.
    pub fn from_loaded(source: PathBuf, image: RgbaImage, history_limit: usize) -> Self {
        let mut history = History::with_limit(history_limit);
        history.push(&image);
        Self {
            source,
            original: image.clone(),
            current: image,
            history,
            revision: 0,
            stroke_dirty: false,
        }
    }

    pub fn current(&self) -> &RgbaImage {
        &self.current
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    fn set_current(&mut self, image: RgbaImage) {
        self.current = image;
        self.revision += 1;
    }

    /// Start from the original, paint the method's effect, record it.
    pub fn apply_processing(&mut self, method: ProcessingMethod, params: EffectParams) {
        let mut img = self.original.clone();
        effects::apply_method(&mut img, method, params);
        self.set_current(img);
        self.history.push(&self.current);
        self.stroke_dirty = false;
    }

    /// Restore the original and record it.
    pub fn reset(&mut self) {
        self.set_current(self.original.clone());
        self.history.push(&self.current);
        self.stroke_dirty = false;
    }

    /// Paint one stroke segment onto the current image (not yet recorded).
    pub fn draw_segment(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        color: AnnotationColor,
        brush_size: u32,
    ) {
        raster::stroke_line(&mut self.current, from, to, color.rgba(), brush_size);
        self.revision += 1;
        self.stroke_dirty = true;
    }

    /// Record the strokes painted since the last push. Returns false if nothing was drawn.
    pub fn commit_stroke(&mut self) -> bool {
        if !self.stroke_dirty {
            return false;
        }
        self.history.push(&self.current);
        self.stroke_dirty = false;
        true
    }

    /// Swap in a bitmap produced elsewhere (the analysis job) and record it.
    pub fn replace_current(&mut self, image: RgbaImage) {
        self.set_current(image);
        self.history.push(&self.current);
        self.stroke_dirty = false;
    }

    pub fn undo(&mut self) -> bool {
        self.commit_stroke();
        match self.history.undo() {
            Some(img) => {
                self.set_current(img);
                true
            }
            None => false,
        }
    }

    /// Step forward. A pending stroke is committed first, which drops the
    /// redo branch, so redo mid-stroke keeps the stroke and does nothing.
    pub fn redo(&mut self) -> bool {
        self.commit_stroke();
        match self.history.redo() {
            Some(img) => {
                self.set_current(img);
                true
            }
            None => false,
        }
    }

    /// Write the current bitmap; returns the path actually written.
    pub fn save(&self, path: &Path) -> Result<PathBuf> {
        image_io::save_image(&self.current, path)
    }

    pub fn display_name(&self) -> String {
        image_io::display_name(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn doc() -> ImageDocument {
        ImageDocument::from_loaded(
            PathBuf::from("/data/cells.png"),
            RgbaImage::from_pixel(40, 30, WHITE),
            0,
        )
    }

    fn params() -> EffectParams {
        EffectParams { threshold: 100, clusters: 3 }
    }

    #[test]
    fn test_loaded_document() {
        let d = doc();
        assert_eq!(d.history().len(), 1);
        assert_eq!(d.history().index(), Some(0));
        assert_eq!(d.current(), d.original());
        assert_eq!(d.display_name(), "cells.png");
    }

    #[test]
    fn test_processing_starts_from_original() {
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        // not darkened twice
        assert_eq!(d.current().get_pixel(5, 5), &Rgba([127, 127, 127, 255]));
        assert_eq!(d.history().len(), 3);
        assert_eq!(d.original().get_pixel(5, 5), &WHITE);
    }

    #[test]
    fn test_drawing_mode_shows_original() {
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedSegmentation, params());
        d.apply_processing(ProcessingMethod::DrawingMode, params());
        assert_eq!(d.current(), d.original());
    }

    #[test]
    fn test_stroke_commit_and_undo() {
        let mut d = doc();
        d.draw_segment((5, 5), (20, 5), AnnotationColor::Red, 3);
        d.draw_segment((20, 5), (20, 20), AnnotationColor::Red, 3);
        assert_eq!(d.history().len(), 1);
        assert!(d.commit_stroke());
        assert!(!d.commit_stroke());
        assert_eq!(d.history().len(), 2);
        assert_eq!(d.current().get_pixel(20, 10), &Rgba([255, 0, 0, 255]));

        assert!(d.undo());
        assert_eq!(d.current().get_pixel(20, 10), &WHITE);
        assert!(d.redo());
        assert_eq!(d.current().get_pixel(20, 10), &Rgba([255, 0, 0, 255]));
        assert!(!d.redo());
    }

    #[test]
    fn test_undo_commits_pending_stroke() {
        let mut d = doc();
        d.draw_segment((1, 1), (10, 1), AnnotationColor::Green, 1);
        assert!(d.undo());
        assert_eq!(d.current(), d.original());
        assert!(d.redo());
        assert_eq!(d.current().get_pixel(5, 1), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_reset_is_recorded() {
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        d.reset();
        assert_eq!(d.current(), d.original());
        assert_eq!(d.history().len(), 3);
        assert!(d.undo());
        assert_ne!(d.current(), d.original());
    }

    #[test]
    fn test_replace_current_truncates_redo() {
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        d.undo();
        d.replace_current(RgbaImage::from_pixel(40, 30, Rgba([0, 0, 0, 255])));
        assert!(!d.history().can_redo());
        assert_eq!(d.history().len(), 2);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut d = doc();
        let r0 = d.revision();
        d.reset();
        assert!(d.revision() > r0);
        let r1 = d.revision();
        assert!(!d.redo());
        assert_eq!(d.revision(), r1);
    }

    #[test]
    fn test_save_writes_current() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        let written = d.save(&dir.path().join("result.png")).unwrap();
        let back = image_io::decode_image(&written).unwrap();
        assert_eq!(back.get_pixel(0, 0), &Rgba([127, 127, 127, 255]));
    }

    #[test]
    fn test_redo_mid_stroke_keeps_stroke() {
        let mut d = doc();
        d.apply_processing(ProcessingMethod::SimulatedThreshold, params());
        assert!(d.undo());
        d.draw_segment((5, 5), (20, 5), AnnotationColor::Red, 3);

        assert!(!d.redo());
        assert_eq!(d.current().get_pixel(10, 5), &Rgba([255, 0, 0, 255]));
        assert_eq!(d.history().len(), 2);
        assert!(!d.commit_stroke());
        assert_eq!(d.history().len(), 2);
        assert!(!d.history().can_redo());
    }
}
