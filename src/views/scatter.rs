use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::data::filter::{select, OriginFilter};
use crate::data::model::{CategoryCode, EnrichedTable};

/// Category positions on the x axis. Codes come from the EV-type dictionary
/// so the same type always sits at the same integer.
#[derive(Debug, Clone, PartialEq)]
pub struct EvTypeAxis {
    labels: Vec<String>,
}

impl EvTypeAxis {
    pub fn from_table(table: &EnrichedTable) -> Self {
        EvTypeAxis {
            labels: table.ev_types.labels().to_vec(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label for the category at position `x`, if `x` is one.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        if (x - x.round()).abs() > 1e-9 || x < 0.0 {
            return None;
        }
        self.labels.get(x.round() as usize).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub ev_type: CategoryCode,
    /// Category code plus jitter.
    pub x: f64,
    pub range: f64,
}

/// One point per row of `subset` matching `filter`. Offsets are drawn anew
/// on every call; `jitter` of `None` places points on the category line.
pub fn jitter_points(
    table: &EnrichedTable,
    subset: &[usize],
    filter: OriginFilter,
    jitter: Option<&Normal<f64>>,
    rng: &mut impl Rng,
) -> Vec<ScatterPoint> {
    select(table, subset)
        .filter(|r| filter.matches(r.origin))
        .filter_map(|row| {
            let range = row.vehicle.known_range()?;
            let code = row.vehicle.ev_type;
            let offset = jitter.map_or(0.0, |normal| normal.sample(rng));
            Some(ScatterPoint {
                ev_type: code,
                x: code as f64 + offset,
                range: range as f64,
            })
        })
        .collect()
}

/// Y bounds over the whole positive-range subset, independent of the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterAxes {
    pub y: (f64, f64),
}

impl ScatterAxes {
    pub fn from_subset(table: &EnrichedTable, subset: &[usize], padding: f64) -> Self {
        let ranges = select(table, subset).filter_map(|r| r.vehicle.known_range());
        let (min, max) = ranges.fold((i64::MAX, i64::MIN), |(lo, hi), r| (lo.min(r), hi.max(r)));
        let y = if min <= max {
            (min as f64 - padding, max as f64 + padding)
        } else {
            (-padding, padding)
        };
        ScatterAxes { y }
    }
}
