use std::path::PathBuf;

use eframe::egui::{self, Align2, Color32, RichText, Sense, Stroke, Ui};

use crate::color::{progress_gradient, BRAND_RED, CHARCOAL, GOLD};
use crate::config::EXPORT_FILE_NAME;
use crate::data::upload::{ACCEPTED_EXTENSIONS, MAX_UPLOAD_FILES};
use crate::jobs::{Repaint, Stage};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the backend address and theme toggle.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(6.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.heading(RichText::new("ATC Smart Pro").strong().color(BRAND_RED));
            ui.label("Intelligent SAP ATC Analyzer for S/4HANA Migration Estimation");
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            let icon = if state.dark_mode { "☀" } else { "🌙" };
            if ui
                .button(icon)
                .on_hover_text("Toggle dark mode")
                .clicked()
            {
                state.dark_mode = !state.dark_mode;
            }
            ui.separator();
            ui.label(
                RichText::new(format!("Backend: {}", state.config.base_url()))
                    .small()
                    .weak(),
            );
        });
    });
    ui.add_space(6.0);
}

// ---------------------------------------------------------------------------
// Upload panel
// ---------------------------------------------------------------------------

/// Render the drop zone, file selection and the start button.
pub fn upload_panel(ui: &mut Ui, state: &mut AppState, repaint: &Repaint) {
    ui.heading("Upload ATC Reports");
    ui.label(
        RichText::new("Upload one or more .xlsx or .csv ATC result files to begin classification.")
            .weak(),
    );
    ui.add_space(8.0);

    let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
    let stroke = Stroke::new(if hovering { 3.0 } else { 2.0 }, GOLD);
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui: &mut Ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("⬆").size(24.0).color(GOLD));
                ui.strong("Drag and drop files here");
                ui.label(
                    RichText::new(format!(
                        "Multiple files supported (up to {MAX_UPLOAD_FILES}). Max file size: 20 MB."
                    ))
                    .small()
                    .weak(),
                );
                ui.add_space(6.0);
                let browse = egui::Button::new(RichText::new("Browse").color(CHARCOAL)).fill(GOLD);
                if ui.add(browse).clicked() {
                    browse_files(state);
                }
                if !state.uploads.is_empty() {
                    ui.add_space(6.0);
                    ui.label(format!("Selected: {}", state.uploads.names()));
                }
                ui.add_space(12.0);
            });
        });

    ui.add_space(10.0);
    ui.horizontal(|ui: &mut Ui| {
        let start = egui::Button::new(RichText::new("Start Classification").strong().color(Color32::WHITE))
            .fill(BRAND_RED);
        if ui
            .add_enabled(state.can_start_classification(), start)
            .clicked()
        {
            state.start_classification(repaint.clone());
        }
        progress_stages(ui, state.loading_stage);
    });
}

/// Gradient progress bar with one label per stage.
fn progress_stages(ui: &mut Ui, stage: Option<Stage>) {
    ui.vertical(|ui: &mut Ui| {
        let width = ui.available_width().max(240.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 8.0), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, ui.visuals().faint_bg_color);

        let fraction = stage.map_or(0.0, Stage::progress);
        let filled = rect.width() * fraction;
        const SLICES: usize = 48;
        let slice = filled / SLICES as f32;
        if filled > 0.0 {
            for i in 0..SLICES {
                let x = rect.left() + slice * i as f32;
                let piece = egui::Rect::from_min_max(
                    egui::pos2(x, rect.top()),
                    egui::pos2(x + slice + 0.5, rect.bottom()),
                );
                let t = (x - rect.left()) / rect.width();
                painter.rect_filled(piece, 0.0, progress_gradient(t));
            }
        }

        ui.horizontal(|ui: &mut Ui| {
            let spacing = width / Stage::ALL.len() as f32;
            for s in Stage::ALL {
                let reached = stage.is_some_and(|current| s <= current);
                let text = if reached {
                    RichText::new(s.label()).small().strong()
                } else {
                    RichText::new(s.label()).small().weak()
                };
                ui.add_sized([spacing - 8.0, 14.0], egui::Label::new(text));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Drag and drop
// ---------------------------------------------------------------------------

/// Queue files dropped anywhere on the window.
pub fn collect_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped: Vec<PathBuf> = ctx.input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|file| file.path.clone())
            .collect()
    });
    if dropped.is_empty() {
        return;
    }
    log::info!("Dropped {} file(s)", dropped.len());
    state.uploads.add_dropped(dropped);
}

/// Dim the window and show a hint while files hover over it.
pub fn drop_hint(ctx: &egui::Context) {
    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("drop_hint"),
    ));
    let screen = ctx.screen_rect();
    painter.rect_filled(screen, 0.0, Color32::from_black_alpha(160));
    painter.text(
        screen.center(),
        Align2::CENTER_CENTER,
        "Drop ATC exports to queue them",
        egui::FontId::proportional(22.0),
        Color32::WHITE,
    );
}

// ---------------------------------------------------------------------------
// Notification modal and footer
// ---------------------------------------------------------------------------

/// Blocking notification; stays until the user dismisses it.
pub fn notification_modal(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.notification.clone() else {
        return;
    };
    let modal = egui::Modal::new(egui::Id::new("notification")).show(ctx, |ui: &mut Ui| {
        ui.set_max_width(360.0);
        ui.label(RichText::new(&message).color(BRAND_RED));
        ui.add_space(8.0);
        ui.vertical_centered(|ui: &mut Ui| ui.button("OK").clicked()).inner
    });
    if modal.inner || modal.should_close() {
        state.dismiss_notification();
    }
}

pub fn footer(ui: &mut Ui) {
    ui.add_space(4.0);
    ui.label(RichText::new("© 2025 PwC – Internal Use Only").small());
    ui.label(
        RichText::new(
            "Results generated based on uploaded ATC findings and PwC classification logic.",
        )
        .small()
        .weak(),
    );
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn browse_files(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Select ATC result exports")
        .add_filter("ATC exports", &ACCEPTED_EXTENSIONS)
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_files();

    if let Some(paths) = files {
        log::info!("Selected {} file(s)", paths.len());
        state.uploads.replace_browsed(paths);
    }
}

/// Ask where to save the workbook, then start the export.
pub fn save_export_dialog(state: &mut AppState, repaint: &Repaint) {
    let destination = rfd::FileDialog::new()
        .set_title("Save categorized workbook")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("Excel workbook", &["xlsx"])
        .save_file();

    if let Some(path) = destination {
        state.start_export(path, repaint.clone());
    }
}
