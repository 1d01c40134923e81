use std::collections::BTreeSet;

use super::model::{EnrichedTable, Region};

/// Per-region line of the overview table.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region: Region,
    pub vehicles: usize,
    /// Median over rows with a present range, zeros included.
    pub median_range: Option<f64>,
    pub missing_range: usize,
}

/// The quick look one takes at a fresh dataset before plotting anything.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub states: Vec<String>,
    pub ev_types: Vec<String>,
    pub cafv_eligibility: Vec<String>,
    pub distinct_makes: usize,
    pub model_years: Vec<i32>,
    pub regions: Vec<RegionSummary>,
}

impl DatasetSummary {
    pub fn of(table: &EnrichedTable) -> Self {
        let makes: BTreeSet<&str> = table.rows.iter().map(|r| r.vehicle.make.as_str()).collect();
        let years: BTreeSet<i32> = table.rows.iter().map(|r| r.vehicle.model_year).collect();

        let regions = table
            .observed_regions()
            .into_iter()
            .map(|region| {
                let rows: Vec<_> = table.rows.iter().filter(|r| r.origin == region).collect();
                let mut ranges: Vec<f64> = rows
                    .iter()
                    .filter_map(|r| r.vehicle.electric_range)
                    .map(|r| r as f64)
                    .collect();
                ranges.sort_by(f64::total_cmp);
                RegionSummary {
                    region,
                    vehicles: rows.len(),
                    median_range: median(&ranges),
                    missing_range: rows.len() - ranges.len(),
                }
            })
            .collect();

        DatasetSummary {
            rows: table.len(),
            states: table.states.labels().to_vec(),
            ev_types: table.ev_types.labels().to_vec(),
            cafv_eligibility: table.cafv_eligibility.labels().to_vec(),
            distinct_makes: makes.len(),
            model_years: years.into_iter().collect(),
            regions,
        }
    }
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}
