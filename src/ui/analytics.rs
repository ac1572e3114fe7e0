use eframe::egui::{self, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::category_color;
use crate::data::summary::Summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Analytics cards (below the results table)
// ---------------------------------------------------------------------------

/// Total findings, category breakdown and average confidence.
pub fn analytics_cards(ui: &mut Ui, state: &AppState) {
    let Some(summary) = state.result.as_ref().and_then(Summary::from_result) else {
        return;
    };

    ui.columns(3, |cols: &mut [Ui]| {
        card(&mut cols[0], "Total Findings", |ui: &mut Ui| {
            ui.label(RichText::new(summary.total.to_string()).size(28.0).strong());
        });
        card(&mut cols[1], "Category Breakdown", |ui: &mut Ui| {
            category_chart(ui, &summary);
        });
        card(&mut cols[2], "Average Confidence", |ui: &mut Ui| {
            ui.label(RichText::new(summary.avg_confidence_label()).size(28.0).strong());
        });
    });
}

fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).weak());
        ui.add_space(4.0);
        add_contents(ui);
    });
}

/// Bar heights are percentages of the largest category.
fn category_chart(ui: &mut Ui, summary: &Summary) {
    let bars: Vec<Bar> = summary
        .counts
        .iter()
        .enumerate()
        .map(|(i, &(category, count))| {
            Bar::new(i as f64, summary.bar_height_percent(count))
                .name(format!("{category}: {count}"))
                .fill(category_color(category))
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = summary.counts.iter().map(|(c, _)| c.to_string()).collect();

    Plot::new("category_breakdown")
        .height(110.0)
        .include_y(0.0)
        .include_y(100.0)
        .show_y(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(|_, _| String::new())
        .x_axis_formatter(move |mark, _| {
            let index = mark.value.round();
            if (mark.value - index).abs() > f64::EPSILON || index < 0.0 {
                return String::new();
            }
            labels.get(index as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
