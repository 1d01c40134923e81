use eframe::egui::{self, RichText, ScrollArea, Ui, Vec2};

use crate::dashboard::{Block, PanelKind, LAYOUT};
use crate::state::AppState;
use crate::ui::{panels, plot};

const PLOT_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvDashboardApp {
    pub state: AppState,
}

impl EvDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn block(&mut self, ui: &mut Ui, block: Block) {
        match block {
            Block::Title(text) => {
                ui.label(RichText::new(text).size(36.0).strong());
            }
            Block::Caption(text) => {
                ui.add_space(8.0);
                ui.label(RichText::new(text).size(18.0));
            }
            Block::OriginSelector => panels::origin_selector(ui, &mut self.state.dashboard),
            Block::YearSlider => panels::year_slider(ui, &mut self.state.dashboard),
            Block::PlotRow(left, right) => {
                ui.columns(2, |cols: &mut [Ui]| {
                    self.panel(&mut cols[0], left);
                    self.panel(&mut cols[1], right);
                });
            }
        }
    }

    fn panel(&self, ui: &mut Ui, kind: PanelKind) {
        let size = Vec2::new(ui.available_width(), PLOT_HEIGHT);
        let dashboard = &self.state.dashboard;
        match kind {
            PanelKind::Bar => plot::bar_plot(ui, &dashboard.bar(), size),
            PanelKind::Scatter => plot::scatter_plot(ui, &dashboard.scatter(), size),
            PanelKind::Heatmap => {
                plot::heatmap_plot(ui, &dashboard.heatmap(), size, &self.state.config.jurisdiction)
            }
            PanelKind::Violin => plot::violin_plot(ui, &dashboard.violin(), size),
        }
    }
}

impl eframe::App for EvDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset overview ----
        if self.state.show_overview {
            egui::SidePanel::left("overview_panel")
                .default_width(300.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::overview_panel(ui, &self.state.summary);
                });
        }

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    if self.state.dashboard.table().is_empty() {
                        ui.label(format!(
                            "{} contains no registrations.",
                            self.state.source.display()
                        ));
                    }
                    for block in LAYOUT {
                        self.block(ui, block);
                    }
                });
        });
    }
}
