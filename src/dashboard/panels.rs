use std::rc::Rc;

use rand_distr::Normal;

use super::observable::Observer;
use crate::config::DashboardConfig;
use crate::data::filter::{OriginFilter, YearRange};
use crate::data::model::EnrichedTable;
use crate::views::bar::{count_by_year, BarAxes, YearCount};
use crate::views::heatmap::{cross_tab, HeatCell, TopCounties};
use crate::views::scale::LogColorScale;
use crate::views::scatter::{jitter_points, EvTypeAxis, ScatterAxes, ScatterPoint};
use crate::views::violin::{violins, ViolinShape};

// ---------------------------------------------------------------------------
// Bar: registrations per model year (origin selector)
// ---------------------------------------------------------------------------

pub struct BarPanel {
    table: Rc<EnrichedTable>,
    pub axes: BarAxes,
    pub filter: OriginFilter,
    pub counts: Vec<YearCount>,
}

impl BarPanel {
    pub fn new(table: Rc<EnrichedTable>, config: &DashboardConfig) -> Self {
        BarPanel {
            axes: BarAxes::from_table(&table, config),
            table,
            filter: OriginFilter::All,
            counts: Vec::new(),
        }
    }
}

impl Observer<OriginFilter> for BarPanel {
    fn on_change(&mut self, filter: &OriginFilter) {
        self.filter = *filter;
        self.counts = count_by_year(&self.table, *filter);
        log::debug!("bar panel: {} years for origin {filter}", self.counts.len());
    }
}

// ---------------------------------------------------------------------------
// Scatter: jittered range by EV type (origin selector)
// ---------------------------------------------------------------------------

pub struct ScatterPanel {
    table: Rc<EnrichedTable>,
    subset: Rc<Vec<usize>>,
    jitter: Option<Normal<f64>>,
    pub axis: EvTypeAxis,
    pub axes: ScatterAxes,
    pub points: Vec<ScatterPoint>,
}

impl ScatterPanel {
    pub fn new(table: Rc<EnrichedTable>, subset: Rc<Vec<usize>>, config: &DashboardConfig) -> Self {
        let jitter = Normal::new(0.0, config.jitter_std_dev)
            .map_err(|e| log::warn!("jitter disabled: {e}"))
            .ok();
        ScatterPanel {
            axis: EvTypeAxis::from_table(&table),
            axes: ScatterAxes::from_subset(&table, &subset, config.scatter_range_padding),
            table,
            subset,
            jitter,
            points: Vec::new(),
        }
    }
}

impl Observer<OriginFilter> for ScatterPanel {
    fn on_change(&mut self, filter: &OriginFilter) {
        let mut rng = rand::thread_rng();
        self.points = jitter_points(&self.table, &self.subset, *filter, self.jitter.as_ref(), &mut rng);
        log::debug!("scatter panel: {} points for origin {filter}", self.points.len());
    }
}

// ---------------------------------------------------------------------------
// Heatmap: top counties × region (year slider)
// ---------------------------------------------------------------------------

pub struct HeatmapPanel {
    table: Rc<EnrichedTable>,
    pub top: TopCounties,
    pub color_ticks: Vec<f64>,
    pub cells: Vec<HeatCell>,
    pub scale: Option<LogColorScale>,
}

impl HeatmapPanel {
    pub fn new(table: Rc<EnrichedTable>, config: &DashboardConfig) -> Self {
        HeatmapPanel {
            top: TopCounties::rank(&table, &config.jurisdiction, config.top_counties),
            table,
            color_ticks: config.heatmap_color_ticks.clone(),
            cells: Vec::new(),
            scale: None,
        }
    }
}

impl Observer<YearRange> for HeatmapPanel {
    fn on_change(&mut self, years: &YearRange) {
        self.cells = cross_tab(&self.table, &self.top, *years).melt();
        self.scale = LogColorScale::from_values(self.cells.iter().map(|c| c.vehicles as f64));
        log::debug!("heatmap panel: {} cells for {years}", self.cells.len());
    }
}

// ---------------------------------------------------------------------------
// Violin: range distribution by region (year slider)
// ---------------------------------------------------------------------------

pub struct ViolinPanel {
    table: Rc<EnrichedTable>,
    subset: Rc<Vec<usize>>,
    pub window: (f64, f64),
    pub shapes: Vec<ViolinShape>,
}

impl ViolinPanel {
    pub fn new(table: Rc<EnrichedTable>, subset: Rc<Vec<usize>>, config: &DashboardConfig) -> Self {
        let [lo, hi] = config.violin_range_window;
        ViolinPanel {
            table,
            subset,
            window: (lo, hi),
            shapes: Vec::new(),
        }
    }
}

impl Observer<YearRange> for ViolinPanel {
    fn on_change(&mut self, years: &YearRange) {
        self.shapes = violins(&self.table, &self.subset, *years);
        log::debug!("violin panel: {} regions for {years}", self.shapes.len());
    }
}
