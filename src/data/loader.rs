use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{LaunchDataset, LaunchRecord, OutcomeClass};
use crate::error::DataLoadError;

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Launch Site`, `Payload Mass (kg)` and `class`
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., "class": ... }, ...]`
/// * `.parquet` – columnar file carrying the same three columns
///
/// Any other columns are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(open(path)?),
        "json" => load_json(open(path)?),
        "parquet" | "pq" => load_parquet(open(path)?),
        other => Err(DataLoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!(
        "Loaded {} launches from {} (payload {}..={} kg, sites {:?})",
        dataset.len(),
        path.display(),
        dataset.min_payload(),
        dataset.max_payload(),
        dataset.distinct_sites()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV launch records from any reader. The three required columns may
/// appear at any position.
pub fn load_csv<R: Read>(input: R) -> Result<LaunchDataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(DataLoadError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let class_idx = column(CLASS_COLUMN)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let field = |idx: usize| row.get(idx).unwrap_or("");

        records.push(LaunchRecord {
            launch_site: parse_site(field(site_idx), row_no)?,
            payload_mass_kg: parse_payload(field(payload_idx), row_no)?,
            outcome: parse_class(field(class_idx), row_no)?,
        });
    }

    LaunchDataset::from_records(records)
}

fn parse_site(s: &str, row: usize) -> Result<String, DataLoadError> {
    let site = s.trim();
    if site.is_empty() {
        return Err(invalid(row, SITE_COLUMN, s));
    }
    Ok(site.to_string())
}

fn parse_payload(s: &str, row: usize) -> Result<f64, DataLoadError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .and_then(checked_payload)
        .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, s))
}

fn parse_class(s: &str, row: usize) -> Result<OutcomeClass, DataLoadError> {
    let t = s.trim();
    let outcome = match t.parse::<i64>() {
        Ok(i) => OutcomeClass::from_class(i),
        Err(_) => t.parse::<f64>().ok().and_then(OutcomeClass::from_f64),
    };
    outcome.ok_or_else(|| invalid(row, CLASS_COLUMN, s))
}

fn checked_payload(v: f64) -> Option<f64> {
    (v.is_finite() && v >= 0.0).then_some(v)
}

fn invalid(row: usize, column: &'static str, value: impl ToString) -> DataLoadError {
    DataLoadError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0, "class": 0 },
///   ...
/// ]
/// ```
pub fn load_json<R: Read>(input: R) -> Result<LaunchDataset, DataLoadError> {
    let root: JsonValue = serde_json::from_reader(input)?;

    let rows = root
        .as_array()
        .ok_or(DataLoadError::NotRecords)?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(DataLoadError::NotRecords)?;

        records.push(LaunchRecord {
            launch_site: json_site(obj, i)?,
            payload_mass_kg: json_payload(obj, i)?,
            outcome: json_class(obj, i)?,
        });
    }

    LaunchDataset::from_records(records)
}

fn json_field<'a>(
    obj: &'a Map<String, JsonValue>,
    column: &'static str,
) -> Result<&'a JsonValue, DataLoadError> {
    obj.get(column).ok_or(DataLoadError::MissingColumn(column))
}

fn json_site(obj: &Map<String, JsonValue>, row: usize) -> Result<String, DataLoadError> {
    match json_field(obj, SITE_COLUMN)? {
        JsonValue::String(s) => parse_site(s, row),
        other => Err(invalid(row, SITE_COLUMN, other)),
    }
}

fn json_payload(obj: &Map<String, JsonValue>, row: usize) -> Result<f64, DataLoadError> {
    match json_field(obj, PAYLOAD_COLUMN)? {
        JsonValue::Number(n) => n
            .as_f64()
            .and_then(checked_payload)
            .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, n)),
        JsonValue::String(s) => parse_payload(s, row),
        other => Err(invalid(row, PAYLOAD_COLUMN, other)),
    }
}

fn json_class(obj: &Map<String, JsonValue>, row: usize) -> Result<OutcomeClass, DataLoadError> {
    let value = json_field(obj, CLASS_COLUMN)?;
    let outcome = match value {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => OutcomeClass::from_class(i),
            None => n.as_f64().and_then(OutcomeClass::from_f64),
        },
        JsonValue::Bool(true) => Some(OutcomeClass::Success),
        JsonValue::Bool(false) => Some(OutcomeClass::Failure),
        _ => None,
    };
    outcome.ok_or_else(|| invalid(row, CLASS_COLUMN, value))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Expected schema:
/// - `Launch Site`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: any numeric type
/// - `class`: integer, float or boolean
///
/// Columns are cast to their target type before reading, so files written by
/// both **Pandas** and **Polars** load the same way.
pub fn load_parquet(file: File) -> Result<LaunchDataset, DataLoadError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;

        let sites = cast(batch_column(&batch, SITE_COLUMN)?, &DataType::Utf8)?;
        let payloads = cast(batch_column(&batch, PAYLOAD_COLUMN)?, &DataType::Float64)?;
        let classes = cast(batch_column(&batch, CLASS_COLUMN)?, &DataType::Float64)?;

        let sites = sites.as_string::<i32>();
        let payloads = payloads.as_primitive::<Float64Type>();
        let classes = classes.as_primitive::<Float64Type>();

        for i in 0..batch.num_rows() {
            let row = row_offset + i;

            let launch_site = if sites.is_null(i) {
                return Err(invalid(row, SITE_COLUMN, "null"));
            } else {
                parse_site(sites.value(i), row)?
            };
            let payload_mass_kg = (!payloads.is_null(i))
                .then(|| payloads.value(i))
                .and_then(checked_payload)
                .ok_or_else(|| invalid(row, PAYLOAD_COLUMN, cell_text(payloads, i)))?;
            let outcome = (!classes.is_null(i))
                .then(|| classes.value(i))
                .and_then(OutcomeClass::from_f64)
                .ok_or_else(|| invalid(row, CLASS_COLUMN, cell_text(classes, i)))?;

            records.push(LaunchRecord {
                launch_site,
                payload_mass_kg,
                outcome,
            });
        }

        row_offset += batch.num_rows();
    }

    LaunchDataset::from_records(records)
}

fn batch_column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a ArrayRef, DataLoadError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DataLoadError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

fn cell_text(arr: &Float64Array, i: usize) -> String {
    if arr.is_null(i) {
        "null".to_string()
    } else {
        arr.value(i).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
2,3,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
3,4,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
4,5,KSC LC-39A,1,9600.0,F9 FT  B1031.1,FT
";

    #[test]
    fn csv_with_extra_columns() {
        let ds = load_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(
            ds.distinct_sites(),
            ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
        assert_eq!(ds.records()[3].outcome, OutcomeClass::Success);
        assert_eq!(ds.records()[2].payload_mass_kg, 525.0);
    }

    #[test]
    fn csv_missing_column() {
        let err = load_csv("Launch Site,class\nKSC LC-39A,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(PAYLOAD_COLUMN)));
    }

    #[test]
    fn csv_bad_class_reports_row() {
        let input = "Launch Site,Payload Mass (kg),class\nA,1.0,1\nB,2.0,2\n";
        match load_csv(input.as_bytes()).unwrap_err() {
            DataLoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, CLASS_COLUMN);
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn csv_float_class_and_negative_payload() {
        let ok = load_csv("Launch Site,Payload Mass (kg),class\nA,10,1.0\n".as_bytes()).unwrap();
        assert_eq!(ok.records()[0].outcome, OutcomeClass::Success);

        let err = load_csv("Launch Site,Payload Mass (kg),class\nA,-5,1\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::InvalidValue { column: PAYLOAD_COLUMN, .. }
        ));
    }

    #[test]
    fn csv_header_only_is_empty() {
        let err = load_csv("Launch Site,Payload Mass (kg),class\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn json_records() {
        let input = r#"[
            {"Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 500, "class": 1, "Flight Number": 1},
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": "800.5", "class": false}
        ]"#;
        let ds = load_json(input.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[1].payload_mass_kg, 800.5);
        assert_eq!(ds.records()[1].outcome, OutcomeClass::Failure);
    }

    #[test]
    fn json_missing_key() {
        let input = r#"[{"Launch Site": "CCAFS LC-40", "class": 1}]"#;
        let err = load_json(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(PAYLOAD_COLUMN)));
    }

    #[test]
    fn json_empty_array_is_empty() {
        let err = load_json("[]".as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Empty));
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
