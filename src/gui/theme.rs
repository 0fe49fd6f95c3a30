/// Theme system — switchable color themes for the application
///
/// Provides a Light ("Lab") and a Dark theme.

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AppTheme {
    Light,
    Dark,
}

impl AppTheme {
    pub fn label(&self) -> &'static str {
        match self {
            AppTheme::Light => "☀ Light",
            AppTheme::Dark => "🌙 Dark",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

/// All colors a theme needs to provide
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Panels & backgrounds
    pub panel_fill: egui::Color32,
    pub window_fill: egui::Color32,
    pub faint_bg: egui::Color32,

    // Widgets
    pub widget_bg: egui::Color32,
    pub widget_bg_stroke: egui::Color32,
    pub widget_inactive_bg: egui::Color32,
    pub widget_inactive_stroke: egui::Color32,
    pub widget_hovered_bg: egui::Color32,
    pub widget_hovered_stroke: egui::Color32,
    pub widget_active_bg: egui::Color32,
    pub widget_active_fg: egui::Color32,

    // Selection
    pub selection_bg: egui::Color32,
    pub selection_stroke: egui::Color32,

    // Text
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,
    pub text_muted: egui::Color32,

    // Failure messages
    pub error: egui::Color32,

    // Image frame
    pub frame_bg: egui::Color32,
    pub frame_border: egui::Color32,

    // Status bar
    pub status_bar_bg: egui::Color32,
    pub status_text: egui::Color32,

    pub shadow_color: egui::Color32,

    pub is_dark: bool,
}

impl ThemeColors {
    pub fn from_theme(theme: AppTheme) -> Self {
        match theme {
            AppTheme::Light => Self::light(),
            AppTheme::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0xF7, 0xF7, 0xF8),
            window_fill: egui::Color32::from_rgb(0xFF, 0xFF, 0xFF),
            faint_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),

            widget_bg: egui::Color32::from_rgb(0xEB, 0xEC, 0xEE),
            widget_bg_stroke: egui::Color32::from_rgb(0xD0, 0xD2, 0xD6),
            widget_inactive_bg: egui::Color32::from_rgb(0xE3, 0xE5, 0xE8),
            widget_inactive_stroke: egui::Color32::from_rgb(0xC8, 0xCA, 0xCE),
            widget_hovered_bg: egui::Color32::from_rgb(0xD8, 0xDD, 0xE6),
            widget_hovered_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),
            widget_active_bg: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),
            widget_active_fg: egui::Color32::WHITE,

            selection_bg: egui::Color32::from_rgba_premultiplied(0x3B, 0x7D, 0xC0, 0x40),
            selection_stroke: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),

            text_primary: egui::Color32::from_rgb(0x2A, 0x2E, 0x36),
            text_secondary: egui::Color32::from_rgb(0x44, 0x48, 0x52),
            text_muted: egui::Color32::from_rgb(0x88, 0x8C, 0x94),

            error: egui::Color32::from_rgb(0xD0, 0x30, 0x30),

            // #f0f0f0 with a black border, like the prototype's image label
            frame_bg: egui::Color32::from_rgb(0xF0, 0xF0, 0xF0),
            frame_border: egui::Color32::BLACK,

            status_bar_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),
            status_text: egui::Color32::from_rgb(0x44, 0x48, 0x52),

            shadow_color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 25),

            is_dark: false,
        }
    }

    fn dark() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0x1C, 0x1E, 0x24),
            window_fill: egui::Color32::from_rgb(0x22, 0x25, 0x2C),
            faint_bg: egui::Color32::from_rgb(0x26, 0x29, 0x31),

            widget_bg: egui::Color32::from_rgb(0x2A, 0x2D, 0x35),
            widget_bg_stroke: egui::Color32::from_rgb(0x3C, 0x40, 0x4A),
            widget_inactive_bg: egui::Color32::from_rgb(0x30, 0x34, 0x3D),
            widget_inactive_stroke: egui::Color32::from_rgb(0x44, 0x48, 0x54),
            widget_hovered_bg: egui::Color32::from_rgb(0x38, 0x3D, 0x49),
            widget_hovered_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),
            widget_active_bg: egui::Color32::from_rgb(0x3B, 0x7D, 0xC0),
            widget_active_fg: egui::Color32::WHITE,

            selection_bg: egui::Color32::from_rgba_premultiplied(0x3B, 0x7D, 0xC0, 0x50),
            selection_stroke: egui::Color32::from_rgb(0x5B, 0x9B, 0xD5),

            text_primary: egui::Color32::from_rgb(0xE2, 0xE4, 0xE9),
            text_secondary: egui::Color32::from_rgb(0xB0, 0xB4, 0xBE),
            text_muted: egui::Color32::from_rgb(0x78, 0x7C, 0x88),

            error: egui::Color32::from_rgb(0xF0, 0x55, 0x55),

            frame_bg: egui::Color32::from_rgb(0x2E, 0x31, 0x38),
            frame_border: egui::Color32::from_rgb(0x60, 0x64, 0x70),

            status_bar_bg: egui::Color32::from_rgb(0x17, 0x19, 0x1E),
            status_text: egui::Color32::from_rgb(0xB0, 0xB4, 0xBE),

            shadow_color: egui::Color32::from_rgba_premultiplied(0, 0, 0, 60),

            is_dark: true,
        }
    }
}

/// Apply a theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: AppTheme) {
    let c = ThemeColors::from_theme(theme);

    let mut visuals = if c.is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = c.panel_fill;
    visuals.window_fill = c.window_fill;
    visuals.faint_bg_color = c.faint_bg;

    visuals.widgets.noninteractive.bg_fill = c.widget_bg;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(0.5, c.widget_bg_stroke);
    visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(3);
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, c.text_secondary);

    visuals.widgets.inactive.bg_fill = c.widget_inactive_bg;
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(0.5, c.widget_inactive_stroke);
    visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, c.text_primary);

    visuals.widgets.hovered.bg_fill = c.widget_hovered_bg;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, c.widget_hovered_stroke);

    visuals.widgets.active.bg_fill = c.widget_active_bg;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.5, c.widget_active_fg);

    visuals.selection.bg_fill = c.selection_bg;
    visuals.selection.stroke = egui::Stroke::new(1.5, c.selection_stroke);

    visuals.window_shadow = egui::epaint::Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: c.shadow_color,
    };

    ctx.set_visuals(visuals);
}

/// Badge shown in the status bar while a pointer mode is active
pub fn cursor_mode_label(
    drawing_mode: bool,
    stroke_active: bool,
) -> Option<(&'static str, &'static str, egui::Color32)> {
    if !drawing_mode {
        return None;
    }
    if stroke_active {
        Some(("✏ DRAWING", "Release to finish the stroke", egui::Color32::from_rgb(0x00, 0xCC, 0x66)))
    } else {
        Some(("✏ DRAW MODE", "Drag on the image to annotate", egui::Color32::from_rgb(0x3B, 0x7D, 0xC0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle() {
        assert_eq!(AppTheme::Light.next(), AppTheme::Dark);
        assert_eq!(AppTheme::Dark.next(), AppTheme::Light);
        assert!(ThemeColors::from_theme(AppTheme::Dark).is_dark);
        assert!(!ThemeColors::from_theme(AppTheme::Light).is_dark);
        let light = ThemeColors::from_theme(AppTheme::Light);
        assert_ne!(light.error, light.status_text);
    }

    #[test]
    fn test_cursor_mode_only_in_drawing_mode() {
        assert!(cursor_mode_label(false, false).is_none());
        assert_eq!(cursor_mode_label(true, false).unwrap().0, "✏ DRAW MODE");
        assert_eq!(cursor_mode_label(true, true).unwrap().0, "✏ DRAWING");
    }
}
