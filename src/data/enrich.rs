use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;

use super::model::{EnrichedTable, EnrichedVehicle, Region, VehicleTable};

// ---------------------------------------------------------------------------
// Manufacturer → region lookup
// ---------------------------------------------------------------------------

pub const NORTH_AMERICA: &[&str] = &[
    "TESLA",
    "JEEP",
    "FORD",
    "CHEVROLET",
    "RIVIAN",
    "CHRYSLER",
    "CADILLAC",
    "LINCOLN",
    "DODGE",
    "GMC",
    "LUCID",
    "FISKER",
    "MULLEN AUTOMOTIVE INC.",
    "BRIGHTDROP",
    "RAM",
    "AZURE DYNAMICS",
    "WHEEGO ELECTRIC CARS",
];

pub const ASIA: &[&str] = &[
    "NISSAN",
    "KIA",
    "HYUNDAI",
    "MAZDA",
    "TOYOTA",
    "SUBARU",
    "LEXUS",
    "HONDA",
    "MITSUBISHI",
    "ACURA",
    "GENESIS",
    "VINFAST",
];

/// Listed for reference; any make missing from the other two lists lands in
/// Europe whether or not it appears here.
pub const EUROPE: &[&str] = &[
    "FIAT",
    "AUDI",
    "PORSCHE",
    "BMW",
    "POLESTAR",
    "VOLVO",
    "MINI",
    "MERCEDES-BENZ",
    "VOLKSWAGEN",
    "ALFA ROMEO",
    "SMART",
    "JAGUAR",
    "LAND ROVER",
    "LAMBORGHINI",
    "TH!NK",
    "ROLLS-ROYCE",
    "BENTLEY",
];

/// Built once. Lists are inserted lowest priority first so a make listed
/// twice keeps its highest-priority region.
static REGION_BY_MAKE: Lazy<HashMap<&'static str, Region>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(NORTH_AMERICA.len() + ASIA.len() + EUROPE.len());
    for (list, region) in [
        (EUROPE, Region::Europe),
        (ASIA, Region::Asia),
        (NORTH_AMERICA, Region::NorthAmerica),
    ] {
        for make in list {
            map.insert(*make, region);
        }
    }
    map
});

/// Exact, case-sensitive classification of a manufacturer name.
pub fn classify(make: &str) -> Region {
    REGION_BY_MAKE.get(make).copied().unwrap_or(Region::Europe)
}

fn is_listed(make: &str) -> bool {
    REGION_BY_MAKE.contains_key(make)
}

// ---------------------------------------------------------------------------
// Enricher
// ---------------------------------------------------------------------------

/// Attach a regional origin to every row.
pub fn enrich(table: VehicleTable) -> EnrichedTable {
    let VehicleTable {
        vehicles,
        states,
        ev_types,
        cafv_eligibility,
    } = table;

    let mut unlisted = BTreeSet::new();
    let rows: Vec<EnrichedVehicle> = vehicles
        .into_iter()
        .map(|vehicle| {
            if !is_listed(&vehicle.make) {
                unlisted.insert(vehicle.make.clone());
            }
            EnrichedVehicle {
                origin: classify(&vehicle.make),
                vehicle,
            }
        })
        .collect();

    for make in &unlisted {
        log::debug!("make {make:?} is not in any region list, defaulting to Europe");
    }
    log::info!("classified {} rows by regional origin", rows.len());

    EnrichedTable {
        rows,
        states,
        ev_types,
        cafv_eligibility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{raw, BEV, PHEV};
    use crate::data::normalize::normalize;

    #[test]
    fn known_makes() {
        assert_eq!(classify("TESLA"), Region::NorthAmerica);
        assert_eq!(classify("TOYOTA"), Region::Asia);
        assert_eq!(classify("FIAT"), Region::Europe);
        assert_eq!(classify("MULLEN AUTOMOTIVE INC."), Region::NorthAmerica);
    }

    #[test]
    fn unknown_make_defaults_to_europe() {
        assert_eq!(classify("UNKNOWNBRAND"), Region::Europe);
        assert_eq!(classify(""), Region::Europe);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(classify("Tesla"), Region::Europe);
        assert_eq!(classify("toyota"), Region::Europe);
    }

    #[test]
    fn every_listed_make_maps_to_its_list() {
        for make in NORTH_AMERICA {
            assert_eq!(classify(make), Region::NorthAmerica, "{make}");
        }
        for make in ASIA {
            assert_eq!(classify(make), Region::Asia, "{make}");
        }
        for make in EUROPE {
            assert_eq!(classify(make), Region::Europe, "{make}");
        }
    }

    #[test]
    fn enrich_adds_one_origin_per_row() {
        let table = normalize(vec![
            raw("TESLA", 2020, Some(250.0), BEV, "King", "WA"),
            raw("KIA", 2021, Some(239.0), BEV, "King", "WA"),
            raw("POLESTAR", 2022, Some(260.0), BEV, "King", "WA"),
            raw("UNKNOWNBRAND", 2022, None, PHEV, "King", "WA"),
        ])
        .unwrap();
        let enriched = enrich(table.clone());

        assert_eq!(enriched.len(), table.vehicles.len());
        let origins: Vec<_> = enriched.rows.iter().map(|r| r.origin).collect();
        assert_eq!(
            origins,
            [Region::NorthAmerica, Region::Asia, Region::Europe, Region::Europe]
        );
        for (row, vehicle) in enriched.rows.iter().zip(&table.vehicles) {
            assert_eq!(&row.vehicle, vehicle);
            assert_eq!(row.origin, classify(&vehicle.make));
        }
    }
}
