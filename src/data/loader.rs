use std::fs::File;
use std::path::Path;

use arrow::array::{Array, Float64Array, Int32Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{columns, RawRecord, RawTable};
use crate::error::DataAccessError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the vehicle registration table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the Department of Licensing export (recommended)
/// * `.json`    – `[{ "VIN (1-10)": "...", "Make": "...", ... }, ...]`
/// * `.parquet` – the same columns stored as Parquet
pub fn load_file(path: &Path) -> Result<RawTable, DataAccessError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataAccessError::UnsupportedExtension(other.to_string())),
    }?;
    log::info!("read {} rows from {}", table.len(), path.display());
    Ok(table)
}

fn open(path: &Path) -> Result<File, DataAccessError> {
    File::open(path).map_err(|source| DataAccessError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn require_columns(present: &[&str]) -> Result<(), DataAccessError> {
    for required in columns::REQUIRED {
        if !present.contains(&required) {
            return Err(DataAccessError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: the DOL header row, one vehicle per line. Columns not in
/// [`RawRecord`] are ignored; empty cells become `None`.
fn load_csv(path: &Path) -> Result<RawTable, DataAccessError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    require_columns(&headers.iter().map(String::as_str).collect::<Vec<_>>())?;

    let mut table = Vec::new();
    for result in reader.deserialize::<RawRecord>() {
        table.push(result?);
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<RawTable, DataAccessError> {
    let root: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_reader(std::io::BufReader::new(open(path)?))?;

    // No header to check without records.
    if root.is_empty() {
        return Err(DataAccessError::MissingColumn(columns::REQUIRED[0].to_string()));
    }
    for record in &root {
        require_columns(&record.keys().map(String::as_str).collect::<Vec<_>>())?;
    }

    root.into_iter()
        .map(|obj| serde_json::from_value(serde_json::Value::Object(obj)).map_err(DataAccessError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the CSV header as column names.
///
/// Text columns may be `Utf8` or `LargeUtf8`; numeric columns any integer or
/// float type. Everything is cast to one canonical Arrow type per column
/// before extraction.
fn load_parquet(path: &Path) -> Result<RawTable, DataAccessError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    {
        let schema = builder.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        require_columns(&names)?;
    }
    let reader = builder.build()?;

    let mut table = Vec::new();
    for batch in reader {
        let batch = batch?;
        append_batch(&batch, &mut table)?;
    }
    Ok(table)
}

/// Fetch a column and cast it to one canonical Arrow type.
fn column_as<A: Array + Clone + 'static>(
    batch: &RecordBatch,
    name: &str,
    to: &DataType,
) -> Result<A, DataAccessError> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| DataAccessError::MissingColumn(name.to_string()))?;
    let array = cast(column, to)?;
    array.as_any().downcast_ref::<A>().cloned().ok_or_else(|| {
        DataAccessError::Arrow(ArrowError::CastError(format!(
            "column `{name}` did not cast to {to:?}"
        )))
    })
}

fn optional_text(batch: &RecordBatch, name: &str) -> Result<Option<StringArray>, DataAccessError> {
    match batch.column_by_name(name) {
        Some(_) => column_as(batch, name, &DataType::Utf8).map(Some),
        None => Ok(None),
    }
}

fn text_at(arr: &StringArray, row: usize) -> Option<String> {
    (!arr.is_null(row)).then(|| arr.value(row).to_string())
}

fn number_at(arr: &Float64Array, row: usize) -> Option<f64> {
    (!arr.is_null(row)).then(|| arr.value(row))
}

fn append_batch(batch: &RecordBatch, table: &mut RawTable) -> Result<(), DataAccessError> {
    let utf8 = DataType::Utf8;
    let float = DataType::Float64;
    let vin: StringArray = column_as(batch, columns::VIN, &utf8)?;
    let county: StringArray = column_as(batch, columns::COUNTY, &utf8)?;
    let state: StringArray = column_as(batch, columns::STATE, &utf8)?;
    let make: StringArray = column_as(batch, columns::MAKE, &utf8)?;
    let ev_type: StringArray = column_as(batch, columns::EV_TYPE, &utf8)?;
    let cafv: StringArray = column_as(batch, columns::CAFV, &utf8)?;
    let year: Int32Array = column_as(batch, columns::MODEL_YEAR, &DataType::Int32)?;
    let postal: Float64Array = column_as(batch, columns::POSTAL_CODE, &float)?;
    let range: Float64Array = column_as(batch, columns::ELECTRIC_RANGE, &float)?;
    let district: Float64Array = column_as(batch, columns::LEGISLATIVE_DISTRICT, &float)?;
    let city = optional_text(batch, columns::CITY)?;
    let model = optional_text(batch, columns::MODEL)?;

    for row in 0..batch.num_rows() {
        if year.is_null(row) {
            return Err(null_cell(row, columns::MODEL_YEAR));
        }
        let required =
            |arr: &StringArray, name: &str| text_at(arr, row).ok_or_else(|| null_cell(row, name));

        table.push(RawRecord {
            vin: required(&vin, columns::VIN)?,
            county: text_at(&county, row),
            city: city.as_ref().and_then(|c| text_at(c, row)),
            state: required(&state, columns::STATE)?,
            postal_code: number_at(&postal, row),
            model_year: year.value(row),
            make: required(&make, columns::MAKE)?,
            model: model.as_ref().and_then(|m| text_at(m, row)),
            ev_type: required(&ev_type, columns::EV_TYPE)?,
            cafv_eligibility: required(&cafv, columns::CAFV)?,
            electric_range: number_at(&range, row),
            legislative_district: number_at(&district, row),
        });
    }
    Ok(())
}

fn null_cell(row: usize, name: &str) -> DataAccessError {
    DataAccessError::Arrow(ArrowError::InvalidArgumentError(format!(
        "row {row}: required column `{name}` is null"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    const HEADER: &str = "VIN (1-10),County,City,State,Postal Code,Model Year,Make,Model,\
Electric Vehicle Type,Clean Alternative Fuel Vehicle (CAFV) Eligibility,Electric Range,\
Base MSRP,Legislative District";

    fn write_file(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_csv_with_gaps() {
        let body = format!(
            "{HEADER}\n\
5YJ3E1EA0K,King,Seattle,WA,98101,2019,TESLA,MODEL 3,Battery Electric Vehicle (BEV),Clean Alternative Fuel Vehicle Eligible,220,0,43\n\
JTDKARFP5L,,,BC,,2020,TOYOTA,PRIUS PRIME,Plug-in Hybrid Electric Vehicle (PHEV),Not eligible due to low battery range,,0,\n"
        );
        let file = write_file(".csv", &body);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].make, "TESLA");
        assert_eq!(table[0].electric_range, Some(220.0));
        assert_eq!(table[0].model.as_deref(), Some("MODEL 3"));
        assert_eq!(table[1].county, None);
        assert_eq!(table[1].postal_code, None);
        assert_eq!(table[1].legislative_district, None);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let file = write_file(".csv", "VIN (1-10),Make\nABC,TESLA\n");
        match load_file(file.path()) {
            Err(DataAccessError::MissingColumn(col)) => assert_eq!(col, columns::STATE),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn malformed_cell_is_an_error() {
        let body = format!(
            "{HEADER}\nX,King,Seattle,WA,98101,not-a-year,TESLA,S,BEV,Eligible,220,0,43\n"
        );
        let file = write_file(".csv", &body);
        assert!(matches!(load_file(file.path()), Err(DataAccessError::Csv(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataAccessError::Io { .. }));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_file(".xlsx", "");
        assert!(matches!(
            load_file(file.path()),
            Err(DataAccessError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn reads_json_records() {
        let body = r#"[{
            "VIN (1-10)": "1N4AZ0CP5D", "County": "Pierce", "State": "WA",
            "Postal Code": 98402.0, "Model Year": 2013, "Make": "NISSAN",
            "Electric Vehicle Type": "Battery Electric Vehicle (BEV)",
            "Clean Alternative Fuel Vehicle (CAFV) Eligibility": "Clean Alternative Fuel Vehicle Eligible",
            "Electric Range": 75, "Legislative District": null
        }]"#;
        let file = write_file(".json", body);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].make, "NISSAN");
        assert_eq!(table[0].electric_range, Some(75.0));
        assert_eq!(table[0].legislative_district, None);
    }

    #[test]
    fn json_needs_required_columns_in_every_record() {
        let file = write_file(".json", "[]");
        assert!(matches!(
            load_file(file.path()),
            Err(DataAccessError::MissingColumn(col)) if col == columns::VIN
        ));

        let record = r#"{
            "VIN (1-10)": "1N4AZ0CP5D", "County": "Pierce", "State": "WA",
            "Postal Code": 98402, "Model Year": 2013, "Make": "NISSAN",
            "Electric Vehicle Type": "Battery Electric Vehicle (BEV)",
            "Clean Alternative Fuel Vehicle (CAFV) Eligibility": "Clean Alternative Fuel Vehicle Eligible",
            "Electric Range": 75, "Legislative District": 28
        }"#;
        let short = record.replace(r#""Postal Code": 98402, "#, "");
        let file = write_file(".json", &format!("[{record}, {short}]"));
        assert!(matches!(
            load_file(file.path()),
            Err(DataAccessError::MissingColumn(col)) if col == columns::POSTAL_CODE
        ));
    }

    #[test]
    fn reads_parquet() {
        use arrow::array::{Int64Array, StringArray as Strings};
        use arrow::datatypes::{Field, Schema};
        use parquet::arrow::ArrowWriter;

        let text_field = |name: &str| Field::new(name, DataType::Utf8, true);
        let schema = Arc::new(Schema::new(vec![
            text_field(columns::VIN),
            text_field(columns::COUNTY),
            text_field(columns::STATE),
            Field::new(columns::POSTAL_CODE, DataType::Int64, true),
            Field::new(columns::MODEL_YEAR, DataType::Int64, false),
            text_field(columns::MAKE),
            text_field(columns::EV_TYPE),
            text_field(columns::CAFV),
            Field::new(columns::ELECTRIC_RANGE, DataType::Int64, true),
            Field::new(columns::LEGISLATIVE_DISTRICT, DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Strings::from(vec!["KNDCC3LG1L", "WBY8P6C58K"])),
                Arc::new(Strings::from(vec![Some("King"), None])),
                Arc::new(Strings::from(vec!["WA", "WA"])),
                Arc::new(Int64Array::from(vec![Some(98004), None])),
                Arc::new(Int64Array::from(vec![2020, 2019])),
                Arc::new(Strings::from(vec!["KIA", "BMW"])),
                Arc::new(Strings::from(vec!["Battery Electric Vehicle (BEV)"; 2])),
                Arc::new(Strings::from(vec!["Clean Alternative Fuel Vehicle Eligible"; 2])),
                Arc::new(Int64Array::from(vec![Some(239), Some(0)])),
                Arc::new(Int64Array::from(vec![Some(48), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.as_file().try_clone().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].postal_code, Some(98004.0));
        assert_eq!(table[0].model_year, 2020);
        assert_eq!(table[1].county, None);
        assert_eq!(table[1].make, "BMW");
        assert_eq!(table[1].electric_range, Some(0.0));
    }
}
