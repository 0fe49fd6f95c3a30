/// Main application state and eframe::App implementation
///
/// Ties together the document, the background workers, the GUI panels and
/// the session log.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use eframe::egui;

use crate::config::AppConfig;
use crate::data::document::ImageDocument;
use crate::gui::control_panel::{self, ControlAction, ControlPanelState};
use crate::gui::image_view::{self, ImageViewState, ViewEvent};
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction, ToolbarContext};
use crate::log::session::SessionLog;
use crate::pipeline::image_io::{self, TargetSize};
use crate::pipeline::worker::{self, JobId, LoadRequest, WorkerMessage};

/// The main application
pub struct AnnotatorApp {
    config: AppConfig,

    /// Loaded image with its original copy and history
    document: Option<ImageDocument>,

    /// GUI sub-states
    controls: ControlPanelState,
    view: ImageViewState,

    session_log: SessionLog,

    /// Worker channel
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    next_job: JobId,
    /// Load job whose result is still wanted, with its path
    active_load: Option<(JobId, PathBuf)>,
    /// Analysis job whose result is still wanted
    active_analysis: Option<JobId>,
    /// Progress of the most recently reporting job, 0–100
    progress: u8,

    status_message: String,
    /// Status line shows a failure
    status_is_error: bool,
    show_log_window: bool,
    show_about: bool,

    current_theme: AppTheme,
    theme_colors: ThemeColors,

    /// Dropped files buffer
    dropped_files: Vec<PathBuf>,
}

impl AnnotatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        theme::apply_theme(&cc.egui_ctx, config.theme);

        // Ctrl +/- are our zoom shortcuts, not egui's UI scale
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        Self::with_config(config)
    }

    /// App state without any egui context attached
    fn with_config(config: AppConfig) -> Self {
        let (tx, rx) = channel();
        let min_frame = egui::vec2(config.frame_min_size[0], config.frame_min_size[1]);
        Self {
            controls: ControlPanelState::from_config(&config),
            view: ImageViewState::new(min_frame),
            document: None,
            session_log: SessionLog::new(),
            tx,
            rx,
            next_job: 1,
            active_load: None,
            active_analysis: None,
            progress: 0,
            status_message: "Ready".to_string(),
            status_is_error: false,
            show_log_window: false,
            show_about: false,
            current_theme: config.theme,
            theme_colors: ThemeColors::from_theme(config.theme),
            dropped_files: Vec::new(),
            config,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    fn take_job_id(&mut self) -> JobId {
        let id = self.next_job;
        self.next_job += 1;
        id
    }

    fn is_busy(&self) -> bool {
        self.active_load.is_some() || self.active_analysis.is_some()
    }

    /// Start loading `path` on a worker thread, scaled to fit the image frame.
    fn start_load(&mut self, path: PathBuf) {
        let job = self.take_job_id();
        let frame = self.view.frame_size;
        let request = LoadRequest {
            job,
            path: path.clone(),
            target: TargetSize {
                width: frame.x.max(1.0) as u32,
                height: frame.y.max(1.0) as u32,
                keep_aspect_ratio: true,
            },
            step_delay: Duration::from_millis(self.config.load_step_delay_ms),
        };

        self.set_status(format!("Loading image: {}...", image_io::display_name(&path)));
        self.progress = 0;
        self.active_load = Some((job, path));
        worker::spawn_load(request, self.tx.clone());
    }

    /// Start the simulated analysis on a snapshot of the current image.
    fn start_analysis(&mut self) {
        if self.active_analysis.is_some() {
            log::debug!("Analysis already running, ignoring request");
            return;
        }
        let Some(doc) = &self.document else {
            return;
        };
        let snapshot = doc.current().clone();
        let job = self.take_job_id();

        self.set_status("Running simulated analysis...");
        self.progress = 0;
        self.active_analysis = Some(job);
        self.session_log.add_entry("Simulate Analysis", "started");
        worker::spawn_analysis(
            job,
            snapshot,
            Duration::from_millis(self.config.analysis_step_delay_ms),
            self.tx.clone(),
        );
    }

    /// Drain pending worker messages
    fn handle_messages(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    fn handle_message(&mut self, msg: WorkerMessage) {
        let job = msg.job();
        let load_wanted = matches!(&self.active_load, Some((id, _)) if *id == job);
        let analysis_wanted = self.active_analysis == Some(job);

        match msg {
            WorkerMessage::LoadProgress(_, p) if load_wanted => self.progress = p,
            WorkerMessage::AnalysisProgress(_, p) if analysis_wanted => self.progress = p,
            WorkerMessage::LoadComplete(_, path, image, elapsed) if load_wanted => {
                self.active_load = None;
                // A pending analysis was started on the previous image
                self.active_analysis = None;

                let doc = ImageDocument::from_loaded(path, *image, self.config.max_history);
                let name = doc.display_name();
                let (w, h) = doc.dimensions();
                self.session_log.set_source(&doc.source.to_string_lossy());
                self.session_log.add_entry(
                    "Load Image",
                    &format!("{} ({}x{}, {:.2}s)", name, w, h, elapsed.as_secs_f64()),
                );
                self.document = Some(doc);
                self.view.invalidate();
                self.set_status(format!("Loaded image: {}", name));
            }
            WorkerMessage::LoadError(_, path, err) if load_wanted => {
                self.active_load = None;
                self.set_error_status(format!(
                    "Error loading {}: {}",
                    image_io::display_name(&path),
                    err
                ));
            }
            WorkerMessage::AnalysisComplete(_, image) if analysis_wanted => {
                self.active_analysis = None;
                if let Some(doc) = self.document.as_mut() {
                    doc.replace_current(*image);
                    self.session_log.add_entry("Simulate Analysis", "overlay applied");
                }
                self.set_status("Analysis simulation complete");
            }
            other => {
                log::debug!("Dropping message from superseded job {}", other.job());
            }
        }
    }

    fn apply_processing(&mut self) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        self.view.last_point = None;
        doc.apply_processing(self.controls.method, self.controls.effect_params());
        let description = self.controls.describe_processing();
        self.session_log.add_entry("Apply Processing", &description);
    }

    fn reset_image(&mut self) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        self.view.last_point = None;
        doc.reset();
        self.session_log.add_entry("Reset Image", "restored original");
        self.set_status("Image reset");
    }

    /// Finish any stroke in progress so it lands in history before undo/redo
    fn end_stroke(&mut self) {
        if self.view.stroke_active() {
            self.handle_view_event(ViewEvent::StrokeEnd);
        }
    }

    fn undo(&mut self) {
        self.end_stroke();
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        if doc.undo() {
            self.session_log.add_entry("Undo", "");
            self.set_status("Undo");
        }
    }

    fn redo(&mut self) {
        self.end_stroke();
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        if doc.redo() {
            self.session_log.add_entry("Redo", "");
            self.set_status("Redo");
        }
    }

    fn zoom(&mut self, action: ToolbarAction) {
        if self.document.is_none() {
            return;
        }
        match action {
            ToolbarAction::ZoomIn => self.view.zoom_by(self.config.zoom_in_factor),
            ToolbarAction::ZoomOut => self.view.zoom_by(self.config.zoom_out_factor),
            _ => self.view.zoom_reset(),
        }
        self.set_status(format!("Zoom: {}%", self.view.zoom_percent()));
    }

    fn save_image(&mut self) {
        let Some(doc) = &self.document else {
            return;
        };
        let Some(path) = toolbar::save_image_dialog(&doc.display_name()) else {
            return;
        };
        match doc.save(&path) {
            Ok(written) => {
                self.session_log.add_entry("Save Image", &written.display().to_string());
                self.set_status(format!("Image saved to {}", written.display()));
            }
            Err(e) => {
                log::error!("Save error: {}", e);
                self.set_error_status(format!("Save failed: {}", e));
            }
        }
    }

    fn export_log(&mut self) {
        let Some(path) = toolbar::save_log_dialog() else {
            return;
        };
        match self.session_log.save(&path) {
            Ok(()) => self.set_status(format!("Log saved: {}", path.display())),
            Err(e) => self.set_error_status(format!("Error saving log: {}", e)),
        }
    }

    /// Turn pointer events on the image into annotation strokes
    fn handle_view_event(&mut self, event: ViewEvent) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        match event {
            ViewEvent::StrokeStart(p) => {
                if self.controls.drawing_mode() {
                    self.view.last_point = Some(p);
                }
            }
            ViewEvent::StrokeMove(p) => {
                if !self.controls.drawing_mode() {
                    return;
                }
                if let Some(last) = self.view.last_point {
                    doc.draw_segment(
                        last,
                        p,
                        self.controls.annotation_color,
                        self.controls.brush_size as u32,
                    );
                    self.view.last_point = Some(p);
                }
            }
            ViewEvent::StrokeEnd => {
                self.view.last_point = None;
                if doc.commit_stroke() {
                    self.session_log.add_entry(
                        "Annotate",
                        &format!(
                            "{} stroke, brush {}",
                            self.controls.annotation_color, self.controls.brush_size
                        ),
                    );
                }
            }
        }
    }

    fn handle_toolbar_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenImage => {
                if let Some(path) = toolbar::open_image_dialog() {
                    self.start_load(path);
                }
            }
            ToolbarAction::SaveImage => self.save_image(),
            ToolbarAction::ExportLog => self.export_log(),
            ToolbarAction::Undo => self.undo(),
            ToolbarAction::Redo => self.redo(),
            ToolbarAction::ZoomIn | ToolbarAction::ZoomOut | ToolbarAction::ZoomReset => {
                self.zoom(action)
            }
            ToolbarAction::ApplyProcessing => self.apply_processing(),
            ToolbarAction::ResetImage => self.reset_image(),
            ToolbarAction::RunAnalysis => self.start_analysis(),
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
                theme::apply_theme(ctx, self.current_theme);
            }
            ToolbarAction::ShowLog => self.show_log_window = true,
            ToolbarAction::ShowAbout => self.show_about = true,
            ToolbarAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            ToolbarAction::None => {}
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        let tc = &self.theme_colors;
        let cursor_mode = theme::cursor_mode_label(
            self.document.is_some() && self.controls.drawing_mode(),
            self.view.stroke_active(),
        );

        egui::TopBottomPanel::bottom("status_bar")
            .frame(egui::Frame::new()
                .fill(tc.status_bar_bg)
                .inner_margin(egui::Margin::symmetric(12, 4)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some((mode_name, mode_hint, mode_color)) = cursor_mode {
                        let badge = egui::Button::new(
                            egui::RichText::new(mode_name)
                                .size(11.5)
                                .strong()
                                .color(mode_color),
                        )
                        .fill(mode_color.linear_multiply(0.2))
                        .stroke(egui::Stroke::new(1.0, mode_color))
                        .corner_radius(10.0);
                        ui.add(badge);
                        ui.label(
                            egui::RichText::new(mode_hint)
                                .size(11.0)
                                .italics()
                                .color(mode_color.linear_multiply(0.7)),
                        );
                        ui.separator();
                    }

                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.5)
                            .color(if self.status_is_error { tc.error } else { tc.status_text }),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(doc) = &self.document {
                            let (w, h) = doc.dimensions();
                            ui.label(
                                egui::RichText::new(format!(
                                    "{}×{} · {}%",
                                    w,
                                    h,
                                    self.view.zoom_percent()
                                ))
                                .size(11.0)
                                .color(tc.text_muted),
                            );
                        }
                    });
                });
            });
    }

    fn show_session_log_window(&mut self, ctx: &egui::Context) {
        if !self.show_log_window {
            return;
        }
        let mut open = self.show_log_window;
        let mut export = false;
        egui::Window::new("📋 Session Log")
            .open(&mut open)
            .default_size([520.0, 320.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("{} operations", self.session_log.len()));
                    if ui.button("Export…").clicked() {
                        export = true;
                    }
                });
                ui.separator();
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &self.session_log.entries {
                            ui.monospace(entry.to_text());
                        }
                    });
            });
        self.show_log_window = open;
        if export {
            self.export_log();
        }
    }
}

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages();

        // Handle drag-and-drop
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(path.clone());
                }
            }
        });
        if let Some(path) = self.dropped_files.pop() {
            self.dropped_files.clear();
            self.start_load(path);
        }

        // ── Toolbar ──
        let (can_undo, can_redo) = self
            .document
            .as_ref()
            .map(|d| (d.history().can_undo(), d.history().can_redo()))
            .unwrap_or((false, false));
        let toolbar_action = toolbar::show_toolbar(
            ctx,
            &ToolbarContext {
                theme_label: self.current_theme.label(),
                has_image: self.document.is_some(),
                can_undo,
                can_redo,
            },
        );
        if toolbar_action != ToolbarAction::None {
            self.handle_toolbar_action(ctx, toolbar_action);
        }

        // ── Status Bar ──
        self.show_status_bar(ctx);

        // ── Controls ──
        let has_image = self.document.is_some();
        let analysis_running = self.active_analysis.is_some();
        let history_info = self
            .document
            .as_ref()
            .and_then(|d| d.history().index().map(|i| (i, d.history().len())));
        let control_action = egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        control_panel::show_control_panel(
                            ui,
                            &mut self.controls,
                            has_image,
                            analysis_running,
                            history_info,
                        )
                    })
                    .inner
            })
            .inner;
        match control_action {
            ControlAction::ApplyProcessing => self.apply_processing(),
            ControlAction::ResetImage => self.reset_image(),
            ControlAction::RunAnalysis => self.start_analysis(),
            ControlAction::None => {}
        }

        // ── Image ──
        let min_frame = egui::vec2(self.config.frame_min_size[0], self.config.frame_min_size[1]);
        let progress = self.is_busy().then_some(self.progress);
        let view_events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                image_view::show_image_frame(
                    ui,
                    &mut self.view,
                    self.document.as_ref(),
                    &self.theme_colors,
                    min_frame,
                    progress,
                )
            })
            .inner;
        for event in view_events {
            self.handle_view_event(event);
        }

        // ── Windows ──
        self.show_session_log_window(ctx);
        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("Ilastik-inspired Prototype");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(10.0);
                    ui.label("Built with Rust + egui");
                    ui.add_space(10.0);
                    ui.label("Processing effects are visual placeholders only:");
                    ui.label("• Simulated threshold and segmentation overlays");
                    ui.label("• Freehand annotation in three label colors");
                    ui.label("• Undo/redo with full image snapshots");
                    ui.label("• Simulated analysis on a background thread");
                });
        }

        // ── Keyboard shortcuts ──
        for action in toolbar::shortcut_actions(ctx) {
            self.handle_toolbar_action(ctx, action);
        }

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::effects::ProcessingMethod;
    use image::{Rgba, RgbaImage};

    fn test_config() -> AppConfig {
        AppConfig {
            load_step_delay_ms: 0,
            analysis_step_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    fn write_png(dir: &std::path::Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])).save(&path).unwrap();
        path
    }

    /// Block until the app has no running job
    fn drain(app: &mut AnnotatorApp) {
        while app.is_busy() {
            let msg = app.rx.recv_timeout(Duration::from_secs(10)).unwrap();
            app.handle_message(msg);
        }
    }

    #[test]
    fn test_initial_state() {
        let app = AnnotatorApp::with_config(test_config());
        assert_eq!(app.status_message, "Ready");
        assert!(app.document.is_none());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_actions_need_an_image() {
        let mut app = AnnotatorApp::with_config(test_config());
        app.apply_processing();
        app.reset_image();
        app.undo();
        app.start_analysis();
        app.zoom(ToolbarAction::ZoomIn);
        assert_eq!(app.status_message, "Ready");
        assert!(app.session_log.is_empty());
        assert_eq!(app.view.zoom_percent(), 100);
    }

    #[test]
    fn test_load_fits_frame_and_seeds_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "cells.png", 1200, 400);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(600.0, 500.0);

        app.start_load(path);
        assert_eq!(app.status_message, "Loading image: cells.png...");
        drain(&mut app);

        let doc = app.document.as_ref().unwrap();
        assert_eq!(doc.dimensions(), (600, 200));
        assert_eq!(doc.history().len(), 1);
        assert_eq!(app.status_message, "Loaded image: cells.png");
        assert_eq!(app.progress, 100);
    }

    #[test]
    fn test_load_error_keeps_previous_state() {
        let mut app = AnnotatorApp::with_config(test_config());
        app.start_load(PathBuf::from("/missing/nothing.png"));
        drain(&mut app);
        assert!(app.document.is_none());
        assert!(app.status_message.starts_with("Error loading nothing.png"));
        assert!(app.status_is_error);
    }

    #[test]
    fn test_superseded_load_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_png(dir.path(), "first.png", 10, 10);
        let second = write_png(dir.path(), "second.png", 20, 10);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(40.0, 40.0);

        app.start_load(first);
        app.start_load(second);
        drain(&mut app);
        // drain stops once the newest job finished; leftover messages of the
        // first job must not replace the document either
        std::thread::sleep(Duration::from_millis(50));
        app.handle_messages();

        assert_eq!(app.document.as_ref().unwrap().display_name(), "second.png");
    }

    #[test]
    fn test_processing_undo_redo_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 30, 30);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(30.0, 30.0);
        app.start_load(path);
        drain(&mut app);

        app.controls.method = ProcessingMethod::SimulatedThreshold;
        app.apply_processing();
        // status line is left as it was
        assert_eq!(app.status_message, "Loaded image: a.png");
        assert_eq!(
            app.session_log.entries.last().unwrap().description,
            "Simulated Threshold (threshold=50)"
        );
        app.undo();
        assert_eq!(app.status_message, "Undo");
        app.redo();
        assert_eq!(app.status_message, "Redo");
        app.reset_image();
        assert_eq!(app.status_message, "Image reset");
        assert_eq!(app.document.as_ref().unwrap().history().len(), 3);
    }

    #[test]
    fn test_drawing_only_in_drawing_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 40, 40);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(40.0, 40.0);
        app.start_load(path);
        drain(&mut app);

        // Original mode: nothing is painted
        app.handle_view_event(ViewEvent::StrokeStart((5, 5)));
        app.handle_view_event(ViewEvent::StrokeMove((30, 5)));
        app.handle_view_event(ViewEvent::StrokeEnd);
        assert_eq!(app.document.as_ref().unwrap().history().len(), 1);

        app.controls.method = ProcessingMethod::DrawingMode;
        app.handle_view_event(ViewEvent::StrokeStart((5, 5)));
        app.handle_view_event(ViewEvent::StrokeMove((30, 5)));
        app.handle_view_event(ViewEvent::StrokeMove((30, 30)));
        app.handle_view_event(ViewEvent::StrokeEnd);

        let doc = app.document.as_ref().unwrap();
        assert_eq!(doc.history().len(), 2);
        assert_eq!(doc.current().get_pixel(20, 5), &Rgba([0, 255, 0, 255]));
        assert_eq!(doc.current().get_pixel(30, 20), &Rgba([0, 255, 0, 255]));
        assert!(!app.view.stroke_active());
    }

    #[test]
    fn test_analysis_replaces_image_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 200, 160);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(200.0, 160.0);
        app.start_load(path);
        drain(&mut app);

        app.start_analysis();
        // second request while running is ignored
        app.start_analysis();
        assert_eq!(app.status_message, "Running simulated analysis...");
        drain(&mut app);

        let doc = app.document.as_ref().unwrap();
        assert_eq!(doc.history().len(), 2);
        assert_ne!(doc.current(), doc.original());
        assert_eq!(app.status_message, "Analysis simulation complete");
    }

    #[test]
    fn test_zoom_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 10, 10);
        let mut app = AnnotatorApp::with_config(test_config());
        app.start_load(path);
        drain(&mut app);

        app.zoom(ToolbarAction::ZoomIn);
        assert_eq!(app.status_message, "Zoom: 120%");
        app.zoom(ToolbarAction::ZoomReset);
        app.zoom(ToolbarAction::ZoomOut);
        assert_eq!(app.status_message, "Zoom: 80%");
    }

    #[test]
    fn test_redo_during_stroke_keeps_stroke() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "a.png", 40, 40);
        let mut app = AnnotatorApp::with_config(test_config());
        app.view.frame_size = egui::vec2(40.0, 40.0);
        app.start_load(path);
        drain(&mut app);

        app.controls.method = ProcessingMethod::SimulatedThreshold;
        app.apply_processing();
        app.undo();
        app.controls.method = ProcessingMethod::DrawingMode;
        app.handle_view_event(ViewEvent::StrokeStart((5, 5)));
        app.handle_view_event(ViewEvent::StrokeMove((20, 5)));
        app.redo();

        assert!(!app.view.stroke_active());
        // the rest of the drag no longer paints
        app.handle_view_event(ViewEvent::StrokeMove((20, 30)));
        app.handle_view_event(ViewEvent::StrokeEnd);

        let doc = app.document.as_ref().unwrap();
        assert_eq!(doc.current().get_pixel(10, 5), &Rgba([0, 255, 0, 255]));
        assert_eq!(doc.current().get_pixel(20, 25), &Rgba([255, 255, 255, 255]));
        assert_eq!(doc.history().len(), 2);
        assert!(!doc.history().can_redo());
        assert_eq!(app.session_log.entries.last().unwrap().operation, "Annotate");
    }
}
