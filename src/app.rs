use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CensusScopeApp {
    pub state: AppState,
}

impl Default for CensusScopeApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for CensusScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title block and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: chart settings and filters ----
        egui::SidePanel::left("controls_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart plus data overview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(message) = &self.state.load_error {
                // Fatal load condition: halt instead of rendering partial data.
                panels::load_failure_notice(ui, message);
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    plot::scatter_plot(ui, &self.state);
                    ui.separator();
                    panels::overview(ui, &self.state);
                });
        });
    }
}
