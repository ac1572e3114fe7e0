use eframe::egui;
use std::sync::Arc;

use crate::jobs::Repaint;
use crate::state::AppState;
use crate::ui::{analytics, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AtcSmartProApp {
    pub state: AppState,
    repaint: Repaint,
}

impl AtcSmartProApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let ctx = cc.egui_ctx.clone();
        Self {
            state,
            repaint: Arc::new(move || ctx.request_repaint()),
        }
    }
}

impl eframe::App for AtcSmartProApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_jobs();
        if self.state.loading_stage.is_some() {
            ctx.request_repaint();
        }
        panels::collect_dropped_files(ctx, &mut self.state);

        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // ---- Top panel: title and theme toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Central panel: upload, results, analytics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::upload_panel(ui, &mut self.state, &self.repaint);
                    if self.state.result.is_some() {
                        ui.add_space(16.0);
                        ui.separator();
                        table::results_section(ui, &mut self.state, &self.repaint);
                        ui.add_space(16.0);
                        analytics::analytics_cards(ui, &self.state);
                    }
                });
        });

        panels::drop_hint(ctx);
        panels::notification_modal(ctx, &mut self.state);
    }
}
