/// Background jobs: image loading and the simulated analysis
///
/// Each job runs on its own thread and reports through a channel. Progress
/// is emitted on a fixed cadence with a sleep after every step; the final
/// message carries the produced bitmap. There is no cancellation. Each
/// message carries the id of the job that sent it so the UI can ignore
/// results from jobs it has since replaced.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use image::RgbaImage;

use super::effects;
use super::image_io::{self, TargetSize};

pub type JobId = u64;

/// Messages sent from background workers to the UI thread
#[derive(Debug)]
pub enum WorkerMessage {
    /// Load progress, 0–100
    LoadProgress(JobId, u8),
    /// Decoded and scaled image
    LoadComplete(JobId, PathBuf, Box<RgbaImage>, Duration),
    LoadError(JobId, PathBuf, String),
    /// Analysis progress, 0–100
    AnalysisProgress(JobId, u8),
    AnalysisComplete(JobId, Box<RgbaImage>),
}

impl WorkerMessage {
    pub fn job(&self) -> JobId {
        match self {
            WorkerMessage::LoadProgress(id, _)
            | WorkerMessage::LoadComplete(id, ..)
            | WorkerMessage::LoadError(id, ..)
            | WorkerMessage::AnalysisProgress(id, _)
            | WorkerMessage::AnalysisComplete(id, _) => *id,
        }
    }
}

/// Parameters of an image load job
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub job: JobId,
    pub path: PathBuf,
    pub target: TargetSize,
    pub step_delay: Duration,
}

/// Load steps before decoding: 0, 10, 20, 30, 40
const LOAD_STEPS_BEFORE: [u8; 5] = [0, 10, 20, 30, 40];
/// Load steps after decoding: 50 … 100
const LOAD_STEPS_AFTER: [u8; 6] = [50, 60, 70, 80, 90, 100];
/// Analysis progress increment
const ANALYSIS_STEP: usize = 5;

/// Decode and scale an image, emitting progress around the actual work.
pub fn load_image_worker(request: &LoadRequest, tx: &Sender<WorkerMessage>) {
    let start = Instant::now();
    let job = request.job;

    for p in LOAD_STEPS_BEFORE {
        let _ = tx.send(WorkerMessage::LoadProgress(job, p));
        thread::sleep(request.step_delay);
    }

    let image = match image_io::decode_image(&request.path) {
        Ok(img) => image_io::scale_to_target(img, request.target),
        Err(e) => {
            log::error!("Failed to load {}: {}", request.path.display(), e);
            let _ = tx.send(WorkerMessage::LoadError(job, request.path.clone(), e.to_string()));
            return;
        }
    };

    for p in LOAD_STEPS_AFTER {
        let _ = tx.send(WorkerMessage::LoadProgress(job, p));
        thread::sleep(request.step_delay);
    }

    log::debug!(
        "Load job {} finished: {}x{} in {:.2}s",
        job,
        image.width(),
        image.height(),
        start.elapsed().as_secs_f64()
    );
    let _ = tx.send(WorkerMessage::LoadComplete(
        job,
        request.path.clone(),
        Box::new(image),
        start.elapsed(),
    ));
}

/// Emit 0, 5, …, 100 then paint the analysis overlay on `snapshot`.
pub fn analysis_worker(
    job: JobId,
    snapshot: &RgbaImage,
    step_delay: Duration,
    tx: &Sender<WorkerMessage>,
) {
    for p in (0..=100u8).step_by(ANALYSIS_STEP) {
        let _ = tx.send(WorkerMessage::AnalysisProgress(job, p));
        thread::sleep(step_delay);
    }
    let result = effects::simulated_analysis(snapshot);
    let _ = tx.send(WorkerMessage::AnalysisComplete(job, Box::new(result)));
}

/// Start a load job on its own thread
pub fn spawn_load(request: LoadRequest, tx: Sender<WorkerMessage>) -> JoinHandle<()> {
    thread::spawn(move || load_image_worker(&request, &tx))
}

/// Start an analysis job on its own thread; the snapshot is moved in.
pub fn spawn_analysis(
    job: JobId,
    snapshot: RgbaImage,
    step_delay: Duration,
    tx: Sender<WorkerMessage>,
) -> JoinHandle<()> {
    thread::spawn(move || analysis_worker(job, &snapshot, step_delay, &tx))
}
