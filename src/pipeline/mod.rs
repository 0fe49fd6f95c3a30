pub mod effects;
pub mod image_io;
pub mod raster;
pub mod worker;

#[cfg(test)]
mod tests {
    use super::effects::{self, EffectParams, ProcessingMethod};
    use super::image_io::{self, TargetSize};
    use super::worker::{self, LoadRequest, WorkerMessage};
    use crate::log::session::SessionLog;
    use image::{Rgba, RgbaImage};
    use std::sync::mpsc::channel;
    use std::time::Duration;

    #[test]
    fn test_load_process_save_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.bmp");
        RgbaImage::from_pixel(80, 60, Rgba([200, 200, 200, 255]))
            .save(&input)
            .unwrap();

        let (tx, rx) = channel();
        let request = LoadRequest {
            job: 1,
            path: input.clone(),
            target: TargetSize { width: 160, height: 160, keep_aspect_ratio: true },
            step_delay: Duration::ZERO,
        };
        worker::spawn_load(request, tx).join().unwrap();
        let mut img = match rx.try_iter().last() {
            Some(WorkerMessage::LoadComplete(_, _, img, _)) => *img,
            other => panic!("load did not complete: {:?}", other),
        };
        assert_eq!(img.dimensions(), (160, 120));

        let mut log = SessionLog::new();
        log.set_source(&input.to_string_lossy());
        effects::apply_method(
            &mut img,
            ProcessingMethod::SimulatedSegmentation,
            EffectParams { threshold: 50, clusters: 4 },
        );
        log.add_entry("Apply Processing", "Simulated Segmentation (clusters=4)");

        let written = image_io::save_image(&img, &dir.path().join("result.jpg")).unwrap();
        let back = image_io::decode_image(&written).unwrap();
        assert_eq!(back.dimensions(), (160, 120));
        // JPEG drops alpha; every pixel comes back opaque
        assert!(back.pixels().all(|p| p[3] == 255));
        assert_eq!(log.len(), 1);
        assert!(log.to_text().contains("sample.bmp"));
    }

    #[test]
    fn test_analysis_on_loaded_image_keeps_size() {
        let img = RgbaImage::from_pixel(300, 200, Rgba([10, 10, 10, 255]));
        let (tx, rx) = channel();
        worker::analysis_worker(5, &img, Duration::ZERO, &tx);
        match rx.try_iter().last() {
            Some(WorkerMessage::AnalysisComplete(5, out)) => {
                assert_eq!(out.dimensions(), img.dimensions());
                assert_ne!(*out, img);
            }
            other => panic!("analysis did not complete: {:?}", other),
        }
    }
}
