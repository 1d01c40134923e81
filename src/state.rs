use std::path::PathBuf;

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::data::model::EnrichedTable;
use crate::data::summary::DatasetSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Widgets and the plots bound to them.
    pub dashboard: Dashboard,

    /// Overview of the loaded table for the side panel.
    pub summary: DatasetSummary,

    /// Where the current table was read from.
    pub source: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub show_overview: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig, table: EnrichedTable, source: PathBuf) -> Self {
        Self {
            summary: DatasetSummary::of(&table),
            dashboard: Dashboard::build(table, &config),
            config,
            source,
            status_message: None,
            show_overview: false,
        }
    }

    /// Replace the dashboard with one built from a newly loaded table.
    /// Widgets return to their defaults.
    pub fn set_dataset(&mut self, table: EnrichedTable, source: PathBuf) {
        self.summary = DatasetSummary::of(&table);
        self.dashboard = Dashboard::build(table, &self.config);
        self.source = source;
        self.status_message = None;
    }
}
