use std::collections::BTreeMap;

use crate::config::DashboardConfig;
use crate::data::filter::OriginFilter;
use crate::data::model::EnrichedTable;

pub const COUNT_LABEL: &str = "Number of EVs";
pub const ANNOTATION: &str = "*Unit increase in Y = 10× more EVs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub vehicles: usize,
}

/// Registrations per model year for the rows matching `filter`, ordered by
/// year. Years without a matching row are absent.
pub fn count_by_year(table: &EnrichedTable, filter: OriginFilter) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for row in table.rows.iter().filter(|r| filter.matches(r.origin)) {
        *counts.entry(row.vehicle.model_year).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(year, vehicles)| YearCount { year, vehicles })
        .collect()
}

/// Axis bounds for the bar chart, fixed for the lifetime of a dataset so the
/// scale does not jump when the origin filter changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarAxes {
    pub x: (f64, f64),
    /// Raw counts; the renderer plots them on a log10 axis.
    pub y: (f64, f64),
    pub annotation_at: [f64; 2],
}

impl BarAxes {
    pub fn from_table(table: &EnrichedTable, config: &DashboardConfig) -> Self {
        let pad = config.bar_year_padding;
        let x = match table.model_year_bounds() {
            Some((min, max)) => ((min - pad) as f64, (max + pad) as f64),
            None => (0.0, 1.0),
        };
        let peak = count_by_year(table, OriginFilter::All)
            .iter()
            .map(|c| c.vehicles)
            .max()
            .unwrap_or(0) as f64;
        let floor = config.bar_log_floor;

        BarAxes {
            x,
            y: (floor, peak.max(floor)),
            annotation_at: config.bar_annotation_anchor,
        }
    }
}
