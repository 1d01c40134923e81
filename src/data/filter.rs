use std::fmt;

use super::model::{EnrichedTable, EnrichedVehicle, Region};

// ---------------------------------------------------------------------------
// Origin filter (single-select widget value)
// ---------------------------------------------------------------------------

/// Either a concrete region or no restriction at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OriginFilter {
    #[default]
    All,
    Only(Region),
}

impl OriginFilter {
    pub fn matches(self, origin: Region) -> bool {
        match self {
            OriginFilter::All => true,
            OriginFilter::Only(region) => region == origin,
        }
    }
}

impl fmt::Display for OriginFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginFilter::All => f.write_str("All"),
            OriginFilter::Only(region) => write!(f, "{region}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Year range (dual-ended slider value)
// ---------------------------------------------------------------------------

/// Closed model-year interval, `low <= high` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    low: i32,
    high: i32,
}

impl YearRange {
    /// Bounds given in either order are sorted.
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(self) -> i32 {
        self.low
    }

    pub fn high(self) -> i32 {
        self.high
    }

    pub fn contains(self, year: i32) -> bool {
        self.low <= year && year <= self.high
    }

    /// Intersect with `bounds`; an interval entirely outside collapses onto
    /// the nearest bound.
    pub fn clamp_to(self, bounds: YearRange) -> Self {
        let clamp = |y: i32| y.clamp(bounds.low, bounds.high);
        YearRange::new(clamp(self.low), clamp(self.high))
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Row selections
// ---------------------------------------------------------------------------

/// Indices of rows with a known, positive electric range. Zero ranges mean
/// "not researched" and would drag every distribution towards zero.
pub fn positive_range_indices(table: &EnrichedTable) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.vehicle.known_range().is_some())
        .map(|(i, _)| i)
        .collect()
}

/// Resolve a list of row indices against the table.
pub fn select<'a>(table: &'a EnrichedTable, indices: &'a [usize]) -> impl Iterator<Item = &'a EnrichedVehicle> + 'a {
    indices.iter().filter_map(move |&i| table.rows.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{scenario, table, BEV};

    #[test]
    fn all_matches_every_region() {
        for region in Region::ALL {
            assert!(OriginFilter::All.matches(region));
        }
        assert!(OriginFilter::Only(Region::Asia).matches(Region::Asia));
        assert!(!OriginFilter::Only(Region::Asia).matches(Region::Europe));
    }

    #[test]
    fn year_range_orders_bounds() {
        let range = YearRange::new(2022, 2010);
        assert_eq!((range.low(), range.high()), (2010, 2022));
        assert!(range.contains(2010));
        assert!(range.contains(2022));
        assert!(!range.contains(2023));
    }

    #[test]
    fn clamp_keeps_interval_inside_bounds() {
        let bounds = YearRange::new(2000, 2024);
        assert_eq!(YearRange::new(1990, 2030).clamp_to(bounds), bounds);
        assert_eq!(
            YearRange::new(2030, 2040).clamp_to(bounds),
            YearRange::new(2024, 2024)
        );
    }

    #[test]
    fn zero_and_missing_ranges_are_dropped() {
        let table = table(&[
            ("TESLA", 2020, Some(250.0), BEV, "King"),
            ("FIAT", 2020, Some(0.0), BEV, "King"),
            ("NISSAN", 2015, None, BEV, "King"),
        ]);
        assert_eq!(positive_range_indices(&table), vec![0]);
    }

    #[test]
    fn scenario_keeps_tesla_and_toyota() {
        let table = scenario();
        let indices = positive_range_indices(&table);
        let makes: Vec<_> = select(&table, &indices).map(|r| r.vehicle.make.as_str()).collect();
        assert_eq!(makes, ["TESLA", "TOYOTA"]);
    }
}
