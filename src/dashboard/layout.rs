use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::observable::{Observable, Subscriber};
use super::panels::{BarPanel, HeatmapPanel, ScatterPanel, ViolinPanel};
use crate::config::DashboardConfig;
use crate::data::filter::{positive_range_indices, OriginFilter, YearRange};
use crate::data::model::EnrichedTable;

pub const TITLE: &str = "Electric Vehicle Registration data for the State of Washington";
pub const ORIGIN_CAPTION: &str =
    "Use the following dropdown to filter for EV Model Origin in the 2 plots below";
pub const YEAR_CAPTION: &str =
    "Use the following slider to filter for EV Model Years in the 2 plots below";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Bar,
    Scatter,
    Heatmap,
    Violin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Title(&'static str),
    Caption(&'static str),
    OriginSelector,
    YearSlider,
    PlotRow(PanelKind, PanelKind),
}

/// Page structure, top to bottom.
pub const LAYOUT: [Block; 7] = [
    Block::Title(TITLE),
    Block::Caption(ORIGIN_CAPTION),
    Block::OriginSelector,
    Block::PlotRow(PanelKind::Bar, PanelKind::Scatter),
    Block::Caption(YEAR_CAPTION),
    Block::YearSlider,
    Block::PlotRow(PanelKind::Heatmap, PanelKind::Violin),
];

/// Two widgets and the four panels bound to them.
pub struct Dashboard {
    table: Rc<EnrichedTable>,
    origin: Observable<OriginFilter>,
    origin_options: Vec<OriginFilter>,
    years: Observable<YearRange>,
    year_bounds: YearRange,
    bar: Rc<RefCell<BarPanel>>,
    scatter: Rc<RefCell<ScatterPanel>>,
    heatmap: Rc<RefCell<HeatmapPanel>>,
    violin: Rc<RefCell<ViolinPanel>>,
}

impl Dashboard {
    pub fn build(table: EnrichedTable, config: &DashboardConfig) -> Self {
        let table = Rc::new(table);
        let with_range = Rc::new(positive_range_indices(&table));
        let known_range = with_range.len();

        let mut origin_options: Vec<OriginFilter> = table
            .observed_regions()
            .into_iter()
            .map(OriginFilter::Only)
            .collect();
        origin_options.push(OriginFilter::All);

        let (min, max) = table.model_year_bounds().unwrap_or((0, 0));
        let year_bounds = YearRange::new(min, max);

        let bar = Rc::new(RefCell::new(BarPanel::new(table.clone(), config)));
        let scatter = Rc::new(RefCell::new(ScatterPanel::new(
            table.clone(),
            with_range.clone(),
            config,
        )));
        let heatmap = Rc::new(RefCell::new(HeatmapPanel::new(table.clone(), config)));
        let violin = Rc::new(RefCell::new(ViolinPanel::new(table.clone(), with_range, config)));

        let mut origin = Observable::new(OriginFilter::All);
        origin.subscribe(bar.clone() as Subscriber<OriginFilter>);
        origin.subscribe(scatter.clone() as Subscriber<OriginFilter>);

        let mut years = Observable::new(year_bounds);
        years.subscribe(heatmap.clone() as Subscriber<YearRange>);
        years.subscribe(violin.clone() as Subscriber<YearRange>);

        log::info!(
            "dashboard ready: {} vehicles, model years {year_bounds}, {known_range} with known range",
            table.len()
        );

        Dashboard {
            table,
            origin,
            origin_options,
            years,
            year_bounds,
            bar,
            scatter,
            heatmap,
            violin,
        }
    }

    pub fn table(&self) -> &EnrichedTable {
        &self.table
    }

    // -- origin selector --

    pub fn origin(&self) -> OriginFilter {
        *self.origin.get()
    }

    /// Observed regions followed by `All`.
    pub fn origin_options(&self) -> &[OriginFilter] {
        &self.origin_options
    }

    pub fn select_origin(&mut self, filter: OriginFilter) {
        if self.origin.set(filter) {
            log::debug!("origin selector → {filter}");
        }
    }

    // -- year slider --

    pub fn years(&self) -> YearRange {
        *self.years.get()
    }

    pub fn year_bounds(&self) -> YearRange {
        self.year_bounds
    }

    pub fn select_years(&mut self, range: YearRange) {
        let range = range.clamp_to(self.year_bounds);
        if self.years.set(range) {
            log::debug!("year slider → {range}");
        }
    }

    // -- panels --

    pub fn bar(&self) -> Ref<'_, BarPanel> {
        self.bar.borrow()
    }

    pub fn scatter(&self) -> Ref<'_, ScatterPanel> {
        self.scatter.borrow()
    }

    pub fn heatmap(&self) -> Ref<'_, HeatmapPanel> {
        self.heatmap.borrow()
    }

    pub fn violin(&self) -> Ref<'_, ViolinPanel> {
        self.violin.borrow()
    }
}
