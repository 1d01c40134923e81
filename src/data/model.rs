use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column names of the source table
// ---------------------------------------------------------------------------

pub mod columns {
    pub const VIN: &str = "VIN (1-10)";
    pub const COUNTY: &str = "County";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const POSTAL_CODE: &str = "Postal Code";
    pub const MODEL_YEAR: &str = "Model Year";
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const EV_TYPE: &str = "Electric Vehicle Type";
    pub const CAFV: &str = "Clean Alternative Fuel Vehicle (CAFV) Eligibility";
    pub const ELECTRIC_RANGE: &str = "Electric Range";
    pub const LEGISLATIVE_DISTRICT: &str = "Legislative District";

    /// Header entries every input file must carry.
    pub const REQUIRED: [&str; 10] = [
        VIN,
        STATE,
        COUNTY,
        MAKE,
        MODEL_YEAR,
        EV_TYPE,
        ELECTRIC_RANGE,
        CAFV,
        POSTAL_CODE,
        LEGISLATIVE_DISTRICT,
    ];
}

// ---------------------------------------------------------------------------
// RawRecord – one row as read from disk
// ---------------------------------------------------------------------------

/// A row exactly as the reader sees it. Nullable numeric columns come in as
/// optional floats, the way a dataframe reader widens integer columns that
/// contain gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "VIN (1-10)")]
    pub vin: String,
    #[serde(rename = "County", default)]
    pub county: Option<String>,
    #[serde(rename = "City", default)]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Postal Code", default)]
    pub postal_code: Option<f64>,
    #[serde(rename = "Model Year")]
    pub model_year: i32,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
    #[serde(rename = "Electric Vehicle Type")]
    pub ev_type: String,
    #[serde(rename = "Clean Alternative Fuel Vehicle (CAFV) Eligibility")]
    pub cafv_eligibility: String,
    #[serde(rename = "Electric Range", default)]
    pub electric_range: Option<f64>,
    #[serde(rename = "Legislative District", default)]
    pub legislative_district: Option<f64>,
}

pub type RawTable = Vec<RawRecord>;

// ---------------------------------------------------------------------------
// Dictionary – a nominal (categorical) column
// ---------------------------------------------------------------------------

pub type CategoryCode = u32;

/// Sorted set of the distinct labels of a nominal column. A row stores the
/// label's position (its code), so codes follow alphabetical order and stay
/// stable for a given set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    labels: Vec<String>,
}

impl Dictionary {
    pub fn from_labels<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels: Vec<String> = values.into_iter().map(str::to_string).collect();
        labels.sort();
        labels.dedup();
        Dictionary { labels }
    }

    pub fn code(&self, label: &str) -> Option<CategoryCode> {
        self.labels
            .binary_search_by(|l| l.as_str().cmp(label))
            .ok()
            .map(|i| i as CategoryCode)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

// ---------------------------------------------------------------------------
// Vehicle – one normalised row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub vin: String,
    pub county: Option<String>,
    pub city: Option<String>,
    pub state: CategoryCode,
    pub postal_code: Option<i64>,
    pub model_year: i32,
    pub make: String,
    pub model: Option<String>,
    pub ev_type: CategoryCode,
    pub cafv_eligibility: CategoryCode,
    /// Miles; `None` when the source cell was empty.
    pub electric_range: Option<i64>,
    pub legislative_district: Option<i64>,
}

impl Vehicle {
    /// Range that can be trusted as a real capability. Zero means "not
    /// researched" in the source data and is treated like a missing value.
    pub fn known_range(&self) -> Option<i64> {
        self.electric_range.filter(|r| *r > 0)
    }
}

/// The normalised table: rows plus the dictionaries their codes refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleTable {
    pub vehicles: Vec<Vehicle>,
    pub states: Dictionary,
    pub ev_types: Dictionary,
    pub cafv_eligibility: Dictionary,
}

// ---------------------------------------------------------------------------
// Region – derived manufacturer origin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    NorthAmerica,
    Asia,
    Europe,
}

impl Region {
    /// Classification priority order; also the column order of cross tabs.
    pub const ALL: [Region; 3] = [Region::NorthAmerica, Region::Asia, Region::Europe];

    pub fn label(self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
        }
    }

    /// Position in [`Region::ALL`].
    pub fn index(self) -> usize {
        match self {
            Region::NorthAmerica => 0,
            Region::Asia => 1,
            Region::Europe => 2,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// EnrichedTable – normalised rows plus their regional origin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedVehicle {
    pub vehicle: Vehicle,
    pub origin: Region,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedTable {
    pub rows: Vec<EnrichedVehicle>,
    pub states: Dictionary,
    pub ev_types: Dictionary,
    pub cafv_eligibility: Dictionary,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Observed `(min, max)` model year, `None` for an empty table.
    pub fn model_year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.rows.iter().map(|r| r.vehicle.model_year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }

    /// Regions present in the table, in order of first appearance.
    pub fn observed_regions(&self) -> Vec<Region> {
        let mut seen = Vec::with_capacity(Region::ALL.len());
        for row in &self.rows {
            if !seen.contains(&row.origin) {
                seen.push(row.origin);
                if seen.len() == Region::ALL.len() {
                    break;
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_codes_follow_sorted_labels() {
        let dict = Dictionary::from_labels([
            "Plug-in Hybrid Electric Vehicle (PHEV)",
            "Battery Electric Vehicle (BEV)",
            "Plug-in Hybrid Electric Vehicle (PHEV)",
        ]);
        assert_eq!(dict.labels().len(), 2);
        assert_eq!(dict.code("Battery Electric Vehicle (BEV)"), Some(0));
        assert_eq!(dict.code("Plug-in Hybrid Electric Vehicle (PHEV)"), Some(1));
        assert_eq!(dict.code("Fuel Cell"), None);
        assert_eq!(dict.labels()[1], "Plug-in Hybrid Electric Vehicle (PHEV)");
    }

    #[test]
    fn zero_range_is_unknown() {
        let mut vehicle = crate::data::fixtures::vehicle("TESLA", 2020, Some(0));
        assert_eq!(vehicle.known_range(), None);
        vehicle.electric_range = Some(215);
        assert_eq!(vehicle.known_range(), Some(215));
        vehicle.electric_range = None;
        assert_eq!(vehicle.known_range(), None);
    }
}
