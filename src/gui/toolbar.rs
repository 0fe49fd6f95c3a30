/// Toolbar — top menu bar, file buttons, and file dialogs

use std::path::PathBuf;

use crate::pipeline::image_io::IMAGE_EXTENSIONS;

/// Actions that can be triggered from the toolbar or a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenImage,
    SaveImage,
    ExportLog,
    Undo,
    Redo,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ApplyProcessing,
    ResetImage,
    RunAnalysis,
    ThemeToggle,
    ShowLog,
    ShowAbout,
    Quit,
}

/// What the menus need to know to enable their entries
pub struct ToolbarContext<'a> {
    pub theme_label: &'a str,
    pub has_image: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Render the menu bar and the file button row; return any triggered action
pub fn show_toolbar(ctx: &egui::Context, tb: &ToolbarContext<'_>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Upload Image…    Ctrl+O").clicked() {
                    action = ToolbarAction::OpenImage;
                    ui.close_menu();
                }
                if ui
                    .add_enabled(tb.has_image, egui::Button::new("💾 Save Result…    Ctrl+S"))
                    .clicked()
                {
                    action = ToolbarAction::SaveImage;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("📋 Export Session Log…").clicked() {
                    action = ToolbarAction::ExportLog;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    action = ToolbarAction::Quit;
                    ui.close_menu();
                }
            });

            // Edit menu
            ui.menu_button("✏️ Edit", |ui| {
                if ui
                    .add_enabled(tb.can_undo, egui::Button::new("↩ Undo    Ctrl+Z"))
                    .clicked()
                {
                    action = ToolbarAction::Undo;
                    ui.close_menu();
                }
                if ui
                    .add_enabled(tb.can_redo, egui::Button::new("↪ Redo    Ctrl+Y"))
                    .clicked()
                {
                    action = ToolbarAction::Redo;
                    ui.close_menu();
                }
            });

            // Image menu
            ui.menu_button("🖼 Image", |ui| {
                ui.add_enabled_ui(tb.has_image, |ui| {
                    if ui.button("Apply Processing    Ctrl+P").clicked() {
                        action = ToolbarAction::ApplyProcessing;
                        ui.close_menu();
                    }
                    if ui.button("Reset Image    Ctrl+R").clicked() {
                        action = ToolbarAction::ResetImage;
                        ui.close_menu();
                    }
                    if ui.button("Simulate Analysis").clicked() {
                        action = ToolbarAction::RunAnalysis;
                        ui.close_menu();
                    }
                });
            });

            // View menu
            ui.menu_button("🔍 View", |ui| {
                if ui.button("🔍+ Zoom In    Ctrl++").clicked() {
                    action = ToolbarAction::ZoomIn;
                    ui.close_menu();
                }
                if ui.button("🔍− Zoom Out    Ctrl+-").clicked() {
                    action = ToolbarAction::ZoomOut;
                    ui.close_menu();
                }
                if ui.button("🔄 Reset Zoom    Ctrl+0").clicked() {
                    action = ToolbarAction::ZoomReset;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("📋 Session Log").clicked() {
                    action = ToolbarAction::ShowLog;
                    ui.close_menu();
                }
                if ui.button(format!("🎨 Theme: {}", tb.theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            // Help menu
            ui.menu_button("❓ Help", |ui| {
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(egui::Button::new(
                    egui::RichText::new(tb.theme_label).size(12.0)
                ).corner_radius(12.0)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                }
                ui.separator();
                ui.label(
                    egui::RichText::new("Ilastik-inspired Prototype")
                        .color(egui::Color32::from_rgb(0x70, 0x75, 0x80))
                        .size(12.0),
                );
            });
        });

        // File button row
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            if ui.button("Upload Image").clicked() {
                action = ToolbarAction::OpenImage;
            }
            if ui
                .add_enabled(tb.has_image, egui::Button::new("Save Result"))
                .clicked()
            {
                action = ToolbarAction::SaveImage;
            }
        });
        ui.add_space(2.0);
    });

    action
}

/// Read keyboard shortcuts for this frame
pub fn shortcut_actions(ctx: &egui::Context) -> Vec<ToolbarAction> {
    ctx.input(|i| {
        let mut actions = Vec::new();
        if !i.modifiers.command {
            return actions;
        }
        let bindings = [
            (egui::Key::O, ToolbarAction::OpenImage),
            (egui::Key::S, ToolbarAction::SaveImage),
            (egui::Key::Y, ToolbarAction::Redo),
            (egui::Key::Plus, ToolbarAction::ZoomIn),
            (egui::Key::Equals, ToolbarAction::ZoomIn),
            (egui::Key::Minus, ToolbarAction::ZoomOut),
            (egui::Key::Num0, ToolbarAction::ZoomReset),
            (egui::Key::P, ToolbarAction::ApplyProcessing),
            (egui::Key::R, ToolbarAction::ResetImage),
        ];
        for (key, action) in bindings {
            if i.key_pressed(key) && !actions.contains(&action) {
                actions.push(action);
            }
        }
        if i.key_pressed(egui::Key::Z) {
            actions.push(if i.modifiers.shift {
                ToolbarAction::Redo
            } else {
                ToolbarAction::Undo
            });
        }
        actions
    })
}

/// Show file-open dialog for images
pub fn open_image_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Show save dialog for the processed image
pub fn save_image_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Image")
        .set_file_name(default_name)
        .add_filter("Images", IMAGE_EXTENSIONS)
        .save_file()
}

/// Show save dialog for log export
pub fn save_log_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export Session Log")
        .add_filter("Text File", &["txt"])
        .add_filter("JSON", &["json"])
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    /// Run one frame with `keys` pressed under `modifiers` and collect the shortcuts
    fn actions_for(keys: &[egui::Key], modifiers: egui::Modifiers) -> Vec<ToolbarAction> {
        let ctx = egui::Context::default();
        ctx.options_mut(|o| o.zoom_with_keyboard = false);
        let input = egui::RawInput {
            modifiers,
            events: keys.iter().map(|&k| key(k, modifiers)).collect(),
            ..Default::default()
        };
        let mut actions = Vec::new();
        let _ = ctx.run(input, |ctx| {
            actions = shortcut_actions(ctx);
        });
        actions
    }

    #[test]
    fn test_command_bindings() {
        let cmd = egui::Modifiers::COMMAND;
        let cases = [
            (egui::Key::O, ToolbarAction::OpenImage),
            (egui::Key::S, ToolbarAction::SaveImage),
            (egui::Key::Z, ToolbarAction::Undo),
            (egui::Key::Y, ToolbarAction::Redo),
            (egui::Key::Plus, ToolbarAction::ZoomIn),
            (egui::Key::Equals, ToolbarAction::ZoomIn),
            (egui::Key::Minus, ToolbarAction::ZoomOut),
            (egui::Key::Num0, ToolbarAction::ZoomReset),
            (egui::Key::P, ToolbarAction::ApplyProcessing),
            (egui::Key::R, ToolbarAction::ResetImage),
        ];
        for (k, expected) in cases {
            assert_eq!(actions_for(&[k], cmd), vec![expected], "key {:?}", k);
        }
    }

    #[test]
    fn test_shift_z_redoes() {
        let cmd_shift = egui::Modifiers {
            shift: true,
            ..egui::Modifiers::COMMAND
        };
        assert_eq!(actions_for(&[egui::Key::Z], cmd_shift), vec![ToolbarAction::Redo]);
    }

    #[test]
    fn test_plus_and_equals_zoom_once() {
        let actions = actions_for(&[egui::Key::Plus, egui::Key::Equals], egui::Modifiers::COMMAND);
        assert_eq!(actions, vec![ToolbarAction::ZoomIn]);
    }

    #[test]
    fn test_no_command_no_action() {
        let keys = [egui::Key::O, egui::Key::S, egui::Key::Z, egui::Key::P];
        assert!(actions_for(&keys, egui::Modifiers::NONE).is_empty());
        assert!(actions_for(&keys, egui::Modifiers::SHIFT).is_empty());
    }
}
