use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::dashboard::Dashboard;
use crate::data::filter::YearRange;
use crate::data::summary::DatasetSummary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Widget rows
// ---------------------------------------------------------------------------

/// Single-select control over the observed regions plus "All".
pub fn origin_selector(ui: &mut Ui, dashboard: &mut Dashboard) {
    let mut selected = dashboard.origin();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("EV regional origin");
        egui::ComboBox::from_id_salt("origin_selector")
            .selected_text(selected.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for option in dashboard.origin_options() {
                    ui.selectable_value(&mut selected, *option, option.to_string());
                }
            })
            .response
            .on_hover_text("Choose which Regional HQ Location you would like to focus on");
    });
    dashboard.select_origin(selected);
}

/// Dual-ended model-year control: two sliders that never cross.
pub fn year_slider(ui: &mut Ui, dashboard: &mut Dashboard) {
    let bounds = dashboard.year_bounds();
    let current = dashboard.years();
    let (mut low, mut high) = (current.low(), current.high());

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Model years");
        let from = ui.add(egui::Slider::new(&mut low, bounds.low()..=bounds.high()).text("from"));
        let to = ui.add(egui::Slider::new(&mut high, bounds.low()..=bounds.high()).text("to"));
        if from.changed() && low > high {
            high = low;
        }
        if to.changed() && high < low {
            low = high;
        }
    });
    dashboard.select_years(YearRange::new(low, high));
}

// ---------------------------------------------------------------------------
// Side panel – dataset overview
// ---------------------------------------------------------------------------

pub fn overview_panel(ui: &mut Ui, summary: &DatasetSummary) {
    ui.heading("Dataset overview");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("{} registrations", summary.rows));
            ui.label(format!("{} distinct makes", summary.distinct_makes));
            if let (Some(first), Some(last)) = (summary.model_years.first(), summary.model_years.last()) {
                ui.label(format!(
                    "Model years {first}–{last} ({} distinct)",
                    summary.model_years.len()
                ));
            }
            ui.add_space(6.0);

            ui.strong("By regional origin");
            TableBuilder::new(ui)
                .id_salt("region_summary")
                .striped(true)
                .column(Column::auto())
                .columns(Column::auto().at_least(60.0), 3)
                .header(20.0, |mut header| {
                    for title in ["Region", "Vehicles", "Median range", "Missing range"] {
                        header.col(|ui: &mut Ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for region in &summary.regions {
                        body.row(18.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(region.region.label());
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(region.vehicles.to_string());
                            });
                            row.col(|ui: &mut Ui| {
                                let median = region
                                    .median_range
                                    .map(|m| format!("{m:.0} mi"))
                                    .unwrap_or_else(|| "–".to_string());
                                ui.label(median);
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(region.missing_range.to_string());
                            });
                        });
                    }
                });
            ui.add_space(6.0);

            category_list(ui, "State", &summary.states);
            category_list(ui, "Electric Vehicle Type", &summary.ev_types);
            category_list(ui, "CAFV Eligibility", &summary.cafv_eligibility);
        });
}

fn category_list(ui: &mut Ui, title: &str, values: &[String]) {
    let header = format!("{title}  ({})", values.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            for value in values {
                ui.label(value);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.show_overview, "Overview")
            .clicked()
        {
            state.show_overview = !state.show_overview;
        }

        ui.separator();

        ui.label(format!(
            "{} vehicles from {}",
            state.dashboard.table().len(),
            state.source.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle registration data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::load_dataset(&path) {
            Ok(table) => {
                log::info!("loaded {} vehicles from {}", table.len(), path.display());
                state.set_dataset(table, path);
            }
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
