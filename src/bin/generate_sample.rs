use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const HEADER: [&str; 12] = [
    "VIN (1-10)",
    "County",
    "City",
    "State",
    "Postal Code",
    "Model Year",
    "Make",
    "Model",
    "Electric Vehicle Type",
    "Clean Alternative Fuel Vehicle (CAFV) Eligibility",
    "Electric Range",
    "Legislative District",
];

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// (make, model, ev type, typical range)
const MODELS: [(&str, &str, &str, i64); 12] = [
    ("TESLA", "MODEL 3", BEV, 260),
    ("TESLA", "MODEL Y", BEV, 290),
    ("CHEVROLET", "BOLT EV", BEV, 238),
    ("FORD", "FUSION", PHEV, 21),
    ("NISSAN", "LEAF", BEV, 150),
    ("KIA", "NIRO", BEV, 239),
    ("TOYOTA", "PRIUS PRIME", PHEV, 25),
    ("HYUNDAI", "IONIQ", PHEV, 29),
    ("BMW", "I3", BEV, 153),
    ("VOLKSWAGEN", "ID.4", BEV, 250),
    ("AUDI", "E-TRON", BEV, 222),
    ("VOLVO", "XC90", PHEV, 18),
];

/// (county, city, postal code)
const PLACES: [(&str, &str, i64); 8] = [
    ("King", "Seattle", 98101),
    ("King", "Bellevue", 98004),
    ("Snohomish", "Everett", 98201),
    ("Pierce", "Tacoma", 98402),
    ("Clark", "Vancouver", 98660),
    ("Thurston", "Olympia", 98501),
    ("Spokane", "Spokane", 99201),
    ("Kitsap", "Bremerton", 98310),
];

struct SampleRow {
    vin: String,
    county: &'static str,
    city: &'static str,
    state: &'static str,
    postal_code: Option<i64>,
    model_year: i64,
    make: &'static str,
    model: &'static str,
    ev_type: &'static str,
    cafv: &'static str,
    electric_range: Option<i64>,
    legislative_district: Option<i64>,
}

fn generate(rows: usize, rng: &mut impl Rng) -> Vec<SampleRow> {
    const VIN_CHARS: &[u8] = b"0123456789ABCDEFGHJKLMNPRSTUVWXYZ";
    (0..rows)
        .map(|_| {
            let &(make, model, ev_type, typical) = MODELS.choose(rng).unwrap_or(&MODELS[0]);
            let &(county, city, zip) = PLACES.choose(rng).unwrap_or(&PLACES[0]);
            let model_year = rng.gen_range(2011..=2024);
            let vin: String = (0..10)
                .map(|_| VIN_CHARS[rng.gen_range(0..VIN_CHARS.len())] as char)
                .collect();

            // Newer vehicles often have no range researched yet.
            let electric_range = match rng.gen_range(0..10) {
                0 => None,
                1..=3 if model_year >= 2021 => Some(0),
                _ => Some((typical as f64 * rng.gen_range(0.85..1.1)).round() as i64),
            };
            let cafv = match electric_range {
                Some(0) | None => "Eligibility unknown as battery range has not been researched",
                Some(r) if r >= 30 => "Clean Alternative Fuel Vehicle Eligible",
                Some(_) => "Not eligible due to low battery range",
            };
            let out_of_state = rng.gen_bool(0.02);

            SampleRow {
                vin,
                county,
                city,
                state: if out_of_state { "CA" } else { "WA" },
                postal_code: Some(zip),
                model_year,
                make,
                model,
                ev_type,
                cafv,
                electric_range,
                legislative_district: (!out_of_state).then(|| rng.gen_range(1..=49)),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADER)?;
    let opt = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
    for r in rows {
        writer.write_record([
            r.vin.clone(),
            r.county.to_string(),
            r.city.to_string(),
            r.state.to_string(),
            opt(r.postal_code),
            r.model_year.to_string(),
            r.make.to_string(),
            r.model.to_string(),
            r.ev_type.to_string(),
            r.cafv.to_string(),
            opt(r.electric_range),
            opt(r.legislative_district),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let text = |f: fn(&SampleRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&SampleRow) -> Option<i64>| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        text(|r| r.vin.as_str()),
        text(|r| r.county),
        text(|r| r.city),
        text(|r| r.state),
        int(|r| r.postal_code),
        int(|r| Some(r.model_year)),
        text(|r| r.make),
        text(|r| r.model),
        text(|r| r.ev_type),
        text(|r| r.cafv),
        int(|r| r.electric_range),
        int(|r| r.legislative_district),
    ];
    let fields: Vec<Field> = HEADER
        .iter()
        .zip(&columns)
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_vehicles.csv"));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count `{n}`"))?,
        None => 2_000,
    };

    let mut rng = StdRng::seed_from_u64(42);
    let rows = generate(count, &mut rng);

    let is_parquet = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output, &rows)
    } else {
        write_csv(&output, &rows)
    }
    .with_context(|| format!("writing {}", output.display()))?;

    println!("Wrote {} vehicles to {}", rows.len(), output.display());
    Ok(())
}
