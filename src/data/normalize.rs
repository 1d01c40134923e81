use super::model::{columns, Dictionary, RawTable, Vehicle, VehicleTable};
use crate::error::DataAccessError;

/// Retype the raw table: the three nominal columns become dictionary codes,
/// the three nullable numeric columns become `Option<i64>`. Nothing else is
/// touched.
pub fn normalize(raw: RawTable) -> Result<VehicleTable, DataAccessError> {
    let states = Dictionary::from_labels(raw.iter().map(|r| r.state.as_str()));
    let ev_types = Dictionary::from_labels(raw.iter().map(|r| r.ev_type.as_str()));
    let cafv_eligibility = Dictionary::from_labels(raw.iter().map(|r| r.cafv_eligibility.as_str()));

    let mut vehicles = Vec::with_capacity(raw.len());
    for (row, record) in raw.into_iter().enumerate() {
        vehicles.push(Vehicle {
            state: code_of(&states, &record.state),
            ev_type: code_of(&ev_types, &record.ev_type),
            cafv_eligibility: code_of(&cafv_eligibility, &record.cafv_eligibility),
            postal_code: nullable_int(record.postal_code, row, columns::POSTAL_CODE)?,
            electric_range: nullable_int(record.electric_range, row, columns::ELECTRIC_RANGE)?,
            legislative_district: nullable_int(
                record.legislative_district,
                row,
                columns::LEGISLATIVE_DISTRICT,
            )?,
            vin: record.vin,
            county: record.county,
            city: record.city,
            model_year: record.model_year,
            make: record.make,
            model: record.model,
        });
    }

    log::info!(
        "normalised {} rows ({} states, {} EV types, {} CAFV categories)",
        vehicles.len(),
        states.labels().len(),
        ev_types.labels().len(),
        cafv_eligibility.labels().len()
    );

    Ok(VehicleTable {
        vehicles,
        states,
        ev_types,
        cafv_eligibility,
    })
}

fn code_of(dict: &Dictionary, label: &str) -> u32 {
    // Every label was fed into the dictionary above.
    dict.code(label).unwrap_or_default()
}

/// Missing or NaN → `None`; an integral float within `i64` → `Some`.
/// Fractional, infinite or out-of-range values are errors.
fn nullable_int(value: Option<f64>, row: usize, column: &'static str) -> Result<Option<i64>, DataAccessError> {
    // [-2^63, 2^63): both ends are exact in f64.
    const I64_RANGE: std::ops::Range<f64> = i64::MIN as f64..i64::MAX as f64;
    match value {
        None => Ok(None),
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if I64_RANGE.contains(&v) && v.fract() == 0.0 => Ok(Some(v as i64)),
        Some(v) => Err(DataAccessError::NonIntegral { row, column, value: v }),
    }
}
