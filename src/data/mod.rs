//! Data layer: core types, loading, retyping, enrichment and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → RawTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ normalize  │  nominal columns → codes, nullable ints
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  enrich   │  make → regional origin
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ EnrichedTable │  read-only from here on
//!   └──────────────┘
//! ```

use std::path::Path;

use crate::error::DataAccessError;

pub mod enrich;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod summary;

#[cfg(test)]
pub mod fixtures;

use model::EnrichedTable;

/// Loader → Normalizer → Enricher.
pub fn load_dataset(path: &Path) -> Result<EnrichedTable, DataAccessError> {
    let raw = loader::load_file(path)?;
    let table = normalize::normalize(raw)?;
    Ok(enrich::enrich(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reloading_the_same_file_is_identical() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,Electric Vehicle Type,\
Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,Legislative District"
        )
        .unwrap();
        writeln!(file, "5YJYGDEE1L,King,Seattle,WA,98122,2020,TESLA,MODEL Y,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,291,37").unwrap();
        writeln!(file, "3FA6P0SU1K,Thurston,Olympia,WA,98501,2019,FORD,FUSION,Plug-in Hybrid Electric Vehicle (PHEV),Not eligible due to low battery range,26,22").unwrap();
        writeln!(file, "ZFBCFAAH4H,Kitsap,,WA,,2017,FIAT,500,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,0,").unwrap();

        let first = load_dataset(file.path()).unwrap();
        let second = load_dataset(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        assert_eq!(first.rows[2].vehicle.postal_code, None);
    }
}
