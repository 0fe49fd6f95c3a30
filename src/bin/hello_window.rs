/// Minimal window with a single centered button

use eframe::egui;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(100.0, 40.0);
const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(211, 211, 211);

/// Rect of `size` centered in `area`
fn centered_rect(area: egui::Rect, size: egui::Vec2) -> egui::Rect {
    egui::Rect::from_center_size(area.center(), size)
}

#[derive(Default)]
struct HelloApp {
    clicks: u32,
}

impl eframe::App for HelloApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = centered_rect(ui.max_rect(), BUTTON_SIZE);
            let button = egui::Button::new(egui::RichText::new("Click Me!").color(egui::Color32::BLACK))
                .fill(BUTTON_FILL)
                .corner_radius(10.0);
            if ui.put(rect, button).clicked() {
                self.clicks += 1;
                log::info!("Button clicked ({} total)", self.clicks);
            }
        });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 300.0])
            .with_position([100.0, 100.0])
            .with_title("My First App"),
        ..Default::default()
    };

    eframe::run_native(
        "My First App",
        options,
        Box::new(|_cc| Ok(Box::<HelloApp>::default())),
    )
}
