/// Control panel — left sidebar with processing, threshold, segmentation
/// and annotation controls

use crate::config::AppConfig;
use crate::pipeline::effects::{AnnotationColor, EffectParams, ProcessingMethod};

/// State for the control panel UI
#[derive(Debug, Clone)]
pub struct ControlPanelState {
    pub method: ProcessingMethod,
    /// 0–100
    pub threshold: u8,
    /// 2–10
    pub clusters: u8,
    pub annotation_color: AnnotationColor,
    /// 1–30
    pub brush_size: u8,
}

impl ControlPanelState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            method: ProcessingMethod::Original,
            threshold: config.default_threshold,
            clusters: config.default_clusters,
            annotation_color: AnnotationColor::Green,
            brush_size: config.default_brush_size,
        }
    }

    pub fn effect_params(&self) -> EffectParams {
        EffectParams {
            threshold: self.threshold,
            clusters: self.clusters,
        }
    }

    pub fn drawing_mode(&self) -> bool {
        self.method == ProcessingMethod::DrawingMode
    }

    /// One-line description of the current method and its parameters
    pub fn describe_processing(&self) -> String {
        match self.method {
            ProcessingMethod::SimulatedThreshold => {
                format!("{} (threshold={})", self.method, self.threshold)
            }
            ProcessingMethod::SimulatedSegmentation => {
                format!("{} (clusters={})", self.method, self.clusters)
            }
            ProcessingMethod::Original | ProcessingMethod::DrawingMode => self.method.to_string(),
        }
    }
}

impl Default for ControlPanelState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    None,
    ApplyProcessing,
    ResetImage,
    RunAnalysis,
}

/// Render the control panel in the left sidebar
pub fn show_control_panel(
    ui: &mut egui::Ui,
    state: &mut ControlPanelState,
    has_image: bool,
    analysis_running: bool,
    history_info: Option<(usize, usize)>,
) -> ControlAction {
    let mut action = ControlAction::None;

    ui.vertical_centered(|ui| {
        ui.heading("Controls");
    });
    ui.separator();

    // ── Processing ──
    egui::CollapsingHeader::new("Processing")
        .default_open(true)
        .show(ui, |ui| {
            egui::ComboBox::from_id_salt("processing_method")
                .selected_text(state.method.to_string())
                .width(ui.available_width() - 8.0)
                .show_ui(ui, |ui| {
                    for method in ProcessingMethod::ALL {
                        ui.selectable_value(&mut state.method, method, method.to_string());
                    }
                });
        });

    // ── Threshold ──
    egui::CollapsingHeader::new("Threshold Controls")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Threshold:");
                ui.add(egui::Slider::new(&mut state.threshold, 0..=100).show_value(false));
                ui.label(state.threshold.to_string());
            });
        });

    // ── Segmentation ──
    egui::CollapsingHeader::new("Segmentation Controls")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Clusters:");
                ui.add(egui::DragValue::new(&mut state.clusters).range(2..=10).speed(0.1));
            });
        });

    // ── Annotation ──
    egui::CollapsingHeader::new("Annotation Tools")
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("annotation_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Color:");
                    egui::ComboBox::from_id_salt("annotation_color")
                        .selected_text(state.annotation_color.to_string())
                        .show_ui(ui, |ui| {
                            for color in AnnotationColor::ALL {
                                ui.selectable_value(&mut state.annotation_color, color, color.to_string());
                            }
                        });
                    ui.end_row();

                    ui.label("Brush Size:");
                    ui.add(egui::Slider::new(&mut state.brush_size, 1..=30));
                    ui.end_row();
                });
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_image, egui::Button::new("Apply Processing"))
            .on_hover_text("Ctrl+P")
            .clicked()
        {
            action = ControlAction::ApplyProcessing;
        }
        if ui
            .add_enabled(has_image, egui::Button::new("Reset Image"))
            .on_hover_text("Ctrl+R")
            .clicked()
        {
            action = ControlAction::ResetImage;
        }
    });

    let run_label = if analysis_running {
        "Analysis running…"
    } else {
        "Simulate Analysis"
    };
    if ui
        .add_enabled(
            has_image && !analysis_running,
            egui::Button::new(run_label).min_size(egui::vec2(ui.available_width(), 0.0)),
        )
        .clicked()
    {
        action = ControlAction::RunAnalysis;
    }

    if let Some((index, len)) = history_info {
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new(format!("History: {}/{}", index + 1, len))
                .size(11.5)
                .color(egui::Color32::from_rgb(0x66, 0x6C, 0x78)),
        );
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_config() {
        let s = ControlPanelState::default();
        assert_eq!(s.method, ProcessingMethod::Original);
        assert_eq!(s.threshold, 50);
        assert_eq!(s.clusters, 3);
        assert_eq!(s.brush_size, 5);
        assert_eq!(s.annotation_color, AnnotationColor::Green);
        assert!(!s.drawing_mode());
    }

    #[test]
    fn test_describe_processing() {
        let mut s = ControlPanelState::default();
        s.method = ProcessingMethod::SimulatedSegmentation;
        s.clusters = 7;
        assert_eq!(s.describe_processing(), "Simulated Segmentation (clusters=7)");
        s.method = ProcessingMethod::SimulatedThreshold;
        assert_eq!(s.describe_processing(), "Simulated Threshold (threshold=50)");
        s.method = ProcessingMethod::DrawingMode;
        assert!(s.drawing_mode());
        assert_eq!(s.effect_params(), EffectParams { threshold: 50, clusters: 7 });
    }
}
