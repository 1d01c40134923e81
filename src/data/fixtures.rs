//! Small hand-built tables shared by the unit tests.

use super::enrich::enrich;
use super::model::{EnrichedTable, RawRecord, Vehicle};
use super::normalize::normalize;

pub const BEV: &str = "Battery Electric Vehicle (BEV)";
pub const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";
pub const ELIGIBLE: &str = "Clean Alternative Fuel Vehicle Eligible";

pub fn raw(make: &str, year: i32, range: Option<f64>, ev_type: &str, county: &str, state: &str) -> RawRecord {
    RawRecord {
        vin: format!("{make:.5}{year}"),
        county: Some(county.to_string()),
        city: None,
        state: state.to_string(),
        postal_code: Some(98101.0),
        model_year: year,
        make: make.to_string(),
        model: None,
        ev_type: ev_type.to_string(),
        cafv_eligibility: ELIGIBLE.to_string(),
        electric_range: range,
        legislative_district: Some(43.0),
    }
}

pub fn vehicle(make: &str, year: i32, range: Option<i64>) -> Vehicle {
    Vehicle {
        vin: format!("{make:.5}{year}"),
        county: Some("King".to_string()),
        city: None,
        state: 0,
        postal_code: Some(98101),
        model_year: year,
        make: make.to_string(),
        model: None,
        ev_type: 0,
        cafv_eligibility: 0,
        electric_range: range,
        legislative_district: Some(43),
    }
}

/// `(make, model year, electric range, ev type, county)`; every row in WA.
pub type Row<'a> = (&'a str, i32, Option<f64>, &'a str, &'a str);

pub fn table(rows: &[Row<'_>]) -> EnrichedTable {
    let raws = rows
        .iter()
        .map(|&(make, year, range, ev_type, county)| raw(make, year, range, ev_type, county, "WA"))
        .collect();
    enrich(normalize(raws).expect("fixture rows are well formed"))
}

/// The three-record end-to-end scenario.
pub fn scenario() -> EnrichedTable {
    table(&[
        ("TESLA", 2020, Some(250.0), BEV, "King"),
        ("FIAT", 2020, Some(0.0), BEV, "King"),
        ("TOYOTA", 2019, Some(30.0), PHEV, "King"),
    ])
}
