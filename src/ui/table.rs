use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{badge_background, category_color, CHARCOAL, GOLD};
use crate::data::filter::{CONFIDENCE_THRESHOLDS, PAGE_SIZES, PRIORITY_OPTIONS};
use crate::data::model::{Category, ClassifiedRecord};
use crate::jobs::Repaint;
use crate::state::AppState;
use crate::ui::panels::save_export_dialog;

const HEADERS: [&str; 8] = [
    "Priority",
    "Check Title",
    "Check Message",
    "Object Name",
    "Object Type",
    "Package",
    "Category",
    "Confidence",
];

// ---------------------------------------------------------------------------
// Results section
// ---------------------------------------------------------------------------

/// Filters, table, pagination and the export / clear actions.
pub fn results_section(ui: &mut Ui, state: &mut AppState, repaint: &Repaint) {
    ui.heading("Classification Results");
    ui.label(
        RichText::new("Your ATC findings have been categorized by impact and confidence.").weak(),
    );
    ui.add_space(6.0);

    filter_bar(ui, state);
    ui.add_space(6.0);
    records_table(ui, state);
    ui.add_space(6.0);
    pagination(ui, state);
    ui.add_space(10.0);

    ui.horizontal(|ui: &mut Ui| {
        let download = egui::Button::new(
            RichText::new("⬇ Download Categorized Excel").strong().color(CHARCOAL),
        )
        .fill(GOLD);
        if ui.add_enabled(state.can_export(), download).clicked() {
            save_export_dialog(state, repaint);
        }
        if ui
            .add_enabled(!state.is_busy(), egui::Button::new("⟳ Clear Results"))
            .clicked()
        {
            state.clear_results();
        }
        if state.exporting {
            ui.spinner();
        }
        ui.label(RichText::new("Includes category summary and confidence breakdown.").small().weak());
    });

    if let Some(msg) = &state.status_message {
        ui.label(RichText::new(msg).small());
    }
}

fn filter_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        let current = state.filter.category();
        egui::ComboBox::from_id_salt("filter_category")
            .selected_text(current.map_or("All", Category::as_str))
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(current.is_none(), "All").clicked() {
                    state.set_category(None);
                }
                for category in Category::ALL {
                    if ui
                        .selectable_label(current == Some(category), category.as_str())
                        .clicked()
                    {
                        state.set_category(Some(category));
                    }
                }
            });

        let current = state.filter.priority().map(str::to_owned);
        egui::ComboBox::from_id_salt("filter_priority")
            .selected_text(current.as_deref().unwrap_or("All"))
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(current.is_none(), "All").clicked() {
                    state.set_priority(None);
                }
                for option in PRIORITY_OPTIONS {
                    if ui
                        .selectable_label(current.as_deref() == Some(option), option)
                        .clicked()
                    {
                        state.set_priority(Some(option.to_string()));
                    }
                }
            });

        let current = state.filter.min_confidence();
        let label = current.map_or_else(|| "All".to_string(), |t| format!("≥ {t}%"));
        egui::ComboBox::from_id_salt("filter_confidence")
            .selected_text(label)
            .show_ui(ui, |ui: &mut Ui| {
                if ui.selectable_label(current.is_none(), "All").clicked() {
                    state.set_min_confidence(None);
                }
                for threshold in CONFIDENCE_THRESHOLDS {
                    if ui
                        .selectable_label(current == Some(threshold), format!("≥ {threshold}%"))
                        .clicked()
                    {
                        state.set_min_confidence(Some(threshold));
                    }
                }
            });

        ui.label("🔍");
        let mut keyword = state.filter.keyword().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut keyword)
                .hint_text("Filter results by keyword…")
                .desired_width(260.0),
        );
        if response.changed() {
            state.set_keyword(keyword);
        }
    });
}

fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(result) = &state.result else {
        return;
    };
    let rows: Vec<&ClassifiedRecord> = state
        .page_indices()
        .iter()
        .map(|&i| &result.records[i])
        .collect();

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(60.0))
            .column(Column::initial(160.0).clip(true))
            .column(Column::initial(240.0).clip(true))
            .column(Column::initial(140.0).clip(true))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::remainder().at_least(80.0))
            .header(22.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for record in rows {
                    body.row(22.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.priority.to_string());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.check_title.as_str())
                                .on_hover_text(record.check_title.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.check_message.as_str())
                                .on_hover_text(record.check_message.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.object_name.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.object_type.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(record.package.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            category_badge(ui, record.category);
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{}%", record.confidence));
                        });
                    });
                }
            });
    });
}

fn category_badge(ui: &mut Ui, category: Category) {
    ui.label(
        RichText::new(format!(" {category} "))
            .small()
            .strong()
            .color(category_color(category))
            .background_color(badge_background(category)),
    );
}

fn pagination(ui: &mut Ui, state: &mut AppState) {
    let filtered = state.visible_indices.len();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Rows per page:");
        let current = state.filter.page_size();
        egui::ComboBox::from_id_salt("page_size")
            .selected_text(current.to_string())
            .width(60.0)
            .show_ui(ui, |ui: &mut Ui| {
                for size in PAGE_SIZES {
                    if ui
                        .selectable_label(current == size, size.to_string())
                        .clicked()
                    {
                        state.set_page_size(size);
                    }
                }
            });
        ui.label(RichText::new(state.filter.range_label(filtered)).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Next").clicked() {
                state.next_page();
            }
            ui.label(format!(
                "{}/{}",
                state.filter.page(),
                state.filter.page_count(filtered)
            ));
            if ui.button("Prev").clicked() {
                state.prev_page();
            }
        });
    });
}
