/// Image frame — shows the current bitmap at the zoom level and turns
/// pointer drags into stroke events in image pixel coordinates

use crate::data::document::ImageDocument;
use crate::gui::theme::ThemeColors;

/// Zoom and texture state for the image frame
pub struct ImageViewState {
    /// Display scale, 1.0 = one image pixel per point
    pub scale: f32,
    /// Last stroke position in image coordinates while a stroke is active
    pub last_point: Option<(i32, i32)>,
    /// Size the frame had on the last frame; used as the load target size
    pub frame_size: egui::Vec2,
    texture: Option<egui::TextureHandle>,
    /// Document revision uploaded into `texture`
    texture_revision: Option<u64>,
}

impl ImageViewState {
    pub fn new(min_frame_size: egui::Vec2) -> Self {
        Self {
            scale: 1.0,
            last_point: None,
            frame_size: min_frame_size,
            texture: None,
            texture_revision: None,
        }
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.scale *= factor;
    }

    pub fn zoom_reset(&mut self) {
        self.scale = 1.0;
    }

    /// Zoom level as a whole percentage (truncated)
    pub fn zoom_percent(&self) -> i32 {
        (self.scale * 100.0) as i32
    }

    /// Force a re-upload, e.g. after a new document replaced the old one
    pub fn invalidate(&mut self) {
        self.texture_revision = None;
        self.last_point = None;
    }

    pub fn stroke_active(&self) -> bool {
        self.last_point.is_some()
    }

    fn sync_texture(&mut self, ctx: &egui::Context, doc: &ImageDocument) {
        if self.texture.is_some() && self.texture_revision == Some(doc.revision()) {
            return;
        }
        let img = doc.current();
        let size = [img.width() as usize, img.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
        match self.texture.as_mut() {
            Some(tex) => tex.set(color_image, egui::TextureOptions::LINEAR),
            None => {
                self.texture =
                    Some(ctx.load_texture("document", color_image, egui::TextureOptions::LINEAR));
            }
        }
        self.texture_revision = Some(doc.revision());
    }
}

/// Display size of an image at `scale`
pub fn scaled_size(width: u32, height: u32, scale: f32) -> egui::Vec2 {
    egui::vec2(
        (width as f32 * scale).max(1.0),
        (height as f32 * scale).max(1.0),
    )
}

/// Map a screen position inside `image_rect` back to image pixels.
pub fn screen_to_image(pos: egui::Pos2, image_rect: egui::Rect, scale: f32) -> (i32, i32) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    let local = pos - image_rect.min;
    (
        (local.x / scale).floor() as i32,
        (local.y / scale).floor() as i32,
    )
}

/// Pointer events produced by the frame, in image coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    StrokeStart((i32, i32)),
    StrokeMove((i32, i32)),
    StrokeEnd,
}

/// Drag state of the image response for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct DragInput {
    pub started: bool,
    pub dragging: bool,
    pub stopped: bool,
    /// Where the button went down; the drag only registers past a threshold
    pub press_origin: Option<egui::Pos2>,
    /// Current (or last known) pointer position
    pub pointer: Option<egui::Pos2>,
}

/// Translate one frame of drag state into stroke events.
///
/// A stroke starts at the press origin, not where the drag threshold was
/// crossed, and the final pointer position is painted before it ends.
pub fn stroke_events(input: DragInput, image_rect: egui::Rect, scale: f32) -> Vec<ViewEvent> {
    let to_image = |pos| screen_to_image(pos, image_rect, scale);
    let mut events = Vec::new();

    if input.started {
        if let Some(origin) = input.press_origin.or(input.pointer) {
            events.push(ViewEvent::StrokeStart(to_image(origin)));
        }
    }
    if input.started || input.dragging || input.stopped {
        if let Some(pos) = input.pointer {
            events.push(ViewEvent::StrokeMove(to_image(pos)));
        }
    }
    if input.stopped {
        events.push(ViewEvent::StrokeEnd);
    }
    events
}

/// Render the framed image (or placeholder) plus the progress bar beneath it.
pub fn show_image_frame(
    ui: &mut egui::Ui,
    state: &mut ImageViewState,
    document: Option<&ImageDocument>,
    colors: &ThemeColors,
    min_size: egui::Vec2,
    progress: Option<u8>,
) -> Vec<ViewEvent> {
    let mut events = Vec::new();

    let progress_height = if progress.is_some() { 24.0 } else { 0.0 };
    let frame_size = egui::vec2(
        ui.available_width().max(min_size.x),
        (ui.available_height() - progress_height).max(min_size.y),
    );

    egui::Frame::new()
        .fill(colors.frame_bg)
        .stroke(egui::Stroke::new(1.0, colors.frame_border))
        .show(ui, |ui| {
            ui.set_min_size(frame_size - egui::vec2(2.0, 2.0));
            ui.set_max_size(frame_size - egui::vec2(2.0, 2.0));
            state.frame_size = ui.max_rect().size();

            let Some(doc) = document else {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Upload an image to begin (Ctrl+O or drag & drop)")
                            .color(colors.text_muted),
                    );
                });
                return;
            };

            state.sync_texture(ui.ctx(), doc);
            let Some(texture) = state.texture.as_ref() else {
                return;
            };
            let (w, h) = doc.dimensions();
            let size = scaled_size(w, h, state.scale);

            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // Centre the image when it is smaller than the frame
                    let avail = ui.available_size();
                    let pad = egui::vec2(
                        ((avail.x - size.x) / 2.0).max(0.0),
                        ((avail.y - size.y) / 2.0).max(0.0),
                    );
                    ui.add_space(pad.y);
                    ui.horizontal(|ui| {
                        ui.add_space(pad.x);
                        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());
                        ui.painter().image(
                            texture.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );

                        let input = ui.input(|i| DragInput {
                            started: response.drag_started(),
                            dragging: response.dragged(),
                            stopped: response.drag_stopped(),
                            press_origin: i.pointer.press_origin(),
                            pointer: response.interact_pointer_pos().or(i.pointer.latest_pos()),
                        });
                        events = stroke_events(input, rect, state.scale);
                    });
                });
        });

    if let Some(p) = progress {
        ui.add(
            egui::ProgressBar::new(p as f32 / 100.0)
                .show_percentage()
                .desired_height(18.0),
        );
    }

    events
}
