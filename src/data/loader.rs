use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

use super::model::{InsuranceDataset, Record, Sex, Smoker};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("expected a top-level JSON array of records")]
    NotAnArray,
}

/// A loaded dataset and the number of rows dropped as incomplete.
#[derive(Debug)]
pub struct LoadOutcome {
    pub dataset: InsuranceDataset,
    pub dropped_rows: usize,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the insurance table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, columns matched by name in any order
/// * `.json`    – `[{ "age": 19, "sex": "female", ... }, ...]`
/// * `.parquet` – numeric and Utf8 columns with the same names
///
/// Rows with a missing or invalid field are dropped, not reported as errors.
pub fn load_file(path: &Path) -> Result<LoadOutcome> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (records, dropped_rows) = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    };

    if dropped_rows > 0 {
        log::warn!(
            "Dropped {dropped_rows} incomplete rows from {}",
            path.display()
        );
    }

    Ok(LoadOutcome {
        dataset: InsuranceDataset::from_records(records),
        dropped_rows,
    })
}

// ---------------------------------------------------------------------------
// Row coercion shared by all formats
// ---------------------------------------------------------------------------

/// One row as read from a source, before type coercion.
#[derive(Debug)]
struct RawRow {
    age: Option<f64>,
    bmi: Option<f64>,
    charges: Option<f64>,
    smoker: Option<String>,
    region: Option<String>,
    sex: Option<String>,
}

impl RawRow {
    /// `None` when any field is missing or cannot be coerced.
    fn into_record(self) -> Option<Record> {
        let age = self.age.filter(|v| v.is_finite())?.trunc() as i64;
        let bmi = self.bmi.filter(|v| v.is_finite())?;
        let charges = self.charges.filter(|v| v.is_finite())?;
        let smoker: Smoker = self.smoker?.parse().ok()?;
        let sex: Sex = self.sex?.parse().ok()?;
        let region = self
            .region
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())?;

        Some(Record {
            age,
            sex,
            bmi,
            smoker,
            region,
            charges,
        })
    }
}

/// Collects coerced rows and counts the ones that were dropped.
#[derive(Default)]
struct RowSink {
    records: Vec<Record>,
    dropped: usize,
}

impl RowSink {
    fn push(&mut self, row: Option<RawRow>) {
        match row.and_then(RawRow::into_record) {
            Some(record) => self.records.push(record),
            None => self.dropped += 1,
        }
    }

    fn finish(self) -> (Vec<Record>, usize) {
        (self.records, self.dropped)
    }
}

/// Position of each required column in a header. Other columns (e.g.
/// `children`) are ignored.
struct ColumnIndex {
    age: usize,
    bmi: usize,
    charges: usize,
    smoker: usize,
    region: usize,
    sex: usize,
}

impl ColumnIndex {
    fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(name))
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            age: find("age")?,
            bmi: find("bmi")?,
            charges: find("charges")?,
            smoker: find("smoker")?,
            region: find("region")?,
            sex: find("sex")?,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<(Vec<Record>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let idx = ColumnIndex::resolve(&headers)?;

    let mut sink = RowSink::default();
    for (row_no, result) in reader.records().enumerate() {
        let row = match result {
            Ok(record) => {
                let text = |i: usize| {
                    record
                        .get(i)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                let number = |i: usize| text(i).and_then(|s| s.parse::<f64>().ok());
                Some(RawRow {
                    age: number(idx.age),
                    bmi: number(idx.bmi),
                    charges: number(idx.charges),
                    smoker: text(idx.smoker),
                    region: text(idx.region),
                    sex: text(idx.sex),
                })
            }
            Err(e) => {
                log::debug!("CSV row {row_no}: {e}");
                None
            }
        };
        sink.push(row);
    }

    Ok(sink.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "age": 19, "sex": "female", "bmi": 27.9, "children": 0,
///     "smoker": "yes", "region": "southwest", "charges": 16884.924 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<(Vec<Record>, usize)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut sink = RowSink::default();
    for row in rows {
        sink.push(row.as_object().map(json_row));
    }
    Ok(sink.finish())
}

fn json_row(obj: &JsonMap<String, JsonValue>) -> RawRow {
    let field = |name: &str| {
        obj.iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    };
    let number = |name: &str| match field(name)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let text = |name: &str| field(name)?.as_str().map(str::to_string);

    RawRow {
        age: number("age"),
        bmi: number("bmi"),
        charges: number("charges"),
        smoker: text("smoker"),
        region: text("region"),
        sex: text("sex"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by Pandas (`df.to_parquet()`) or Polars.
///
/// Numeric columns may be Int32, Int64, Float32 or Float64; categorical
/// columns Utf8 or LargeUtf8. A null cell drops its row.
fn load_parquet(path: &Path) -> Result<(Vec<Record>, usize)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut sink = RowSink::default();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        let idx = ColumnIndex::resolve(&names)?;

        let age = typed_column(&batch, idx.age, "age", is_numeric)?;
        let bmi = typed_column(&batch, idx.bmi, "bmi", is_numeric)?;
        let charges = typed_column(&batch, idx.charges, "charges", is_numeric)?;
        let smoker = typed_column(&batch, idx.smoker, "smoker", is_text)?;
        let region = typed_column(&batch, idx.region, "region", is_text)?;
        let sex = typed_column(&batch, idx.sex, "sex", is_text)?;

        for row in 0..batch.num_rows() {
            sink.push(Some(RawRow {
                age: extract_f64(age, row),
                bmi: extract_f64(bmi, row),
                charges: extract_f64(charges, row),
                smoker: extract_string(smoker, row),
                region: extract_string(region, row),
                sex: extract_string(sex, row),
            }));
        }
    }

    Ok(sink.finish())
}

// -- Arrow helpers --

fn is_numeric(t: &DataType) -> bool {
    matches!(
        t,
        DataType::Int32 | DataType::Int64 | DataType::Float32 | DataType::Float64
    )
}

fn is_text(t: &DataType) -> bool {
    matches!(t, DataType::Utf8 | DataType::LargeUtf8)
}

fn typed_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
    accepts: fn(&DataType) -> bool,
) -> Result<&'a ArrayRef, LoadError> {
    let col = batch.column(index);
    if accepts(col.data_type()) {
        Ok(col)
    } else {
        Err(LoadError::UnsupportedColumnType {
            column: name,
            data_type: format!("{:?}", col.data_type()),
        })
    }
}

fn extract_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Float64Array>() {
        Some(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        Some(arr.value(row) as f64)
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Some(arr.value(row) as f64)
    } else {
        any.downcast_ref::<Int32Array>()
            .map(|arr| arr.value(row) as f64)
    }
}

fn extract_string(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        Some(arr.value(row).to_string())
    } else {
        col.as_any()
            .downcast_ref::<LargeStringArray>()
            .map(|arr| arr.value(row).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;
    use std::io::Write;
    use std::sync::Arc;

    use crate::data::model::{Sex, Smoker};

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_drops_incomplete_rows() {
        let file = write_temp(
            ".csv",
            "age,sex,bmi,children,smoker,region,charges\n\
             19,female,27.9,0,yes,southwest,16884.924\n\
             18,male,33.77,1,no,southeast,1725.5523\n\
             28,male,,3,no,southeast,4449.462\n\
             33,other,22.705,0,no,northwest,21984.47061\n\
             abc,male,28.88,0,no,northwest,3866.8552\n\
             32.0,male,28.88,0,no,,3866.8552\n\
             46,FEMALE,33.44,1,No,southeast,8240.5896\n",
        );

        let outcome = load_file(file.path()).unwrap();
        assert_eq!(outcome.dropped_rows, 4);
        assert_eq!(outcome.dataset.len(), 3);

        let first = &outcome.dataset.records[0];
        assert_eq!(first.age, 19);
        assert_eq!(first.sex, Sex::Female);
        assert_eq!(first.smoker, Smoker::Yes);
        assert_eq!(first.region, "southwest");
        assert_eq!(first.charges, 16884.924);

        let last = &outcome.dataset.records[2];
        assert_eq!((last.sex, last.smoker), (Sex::Female, Smoker::No));
    }

    #[test]
    fn csv_columns_match_by_name_in_any_order() {
        let file = write_temp(
            ".CSV",
            "Region,Charges,Sex,Smoker,BMI,Age\n\
             northeast,1000.5,male,no,22.5,25.0\n",
        );
        let outcome = load_file(file.path()).unwrap();
        assert_eq!(outcome.dropped_rows, 0);
        let r = &outcome.dataset.records[0];
        assert_eq!((r.age, r.bmi, r.charges), (25, 22.5, 1000.5));
        assert_eq!(r.region, "northeast");
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = write_temp(".csv", "age,sex,bmi,smoker,charges\n19,female,27.9,yes,1.0\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn("region"))
        ));
    }

    #[test]
    fn json_records() {
        let file = write_temp(
            ".json",
            r#"[
                {"age": 19, "sex": "female", "bmi": 27.9, "children": 0,
                 "smoker": "yes", "region": "southwest", "charges": 16884.924},
                {"age": "45", "sex": "male", "bmi": 30.1,
                 "smoker": "no", "region": "northeast", "charges": 8000},
                {"age": 30, "sex": "male", "bmi": null,
                 "smoker": "no", "region": "northeast", "charges": 1},
                42
            ]"#,
        );
        let outcome = load_file(file.path()).unwrap();
        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(outcome.dropped_rows, 2);
        assert_eq!(outcome.dataset.records[1].age, 45);
        assert_eq!(outcome.dataset.records[1].charges, 8000.0);
    }

    #[test]
    fn json_must_be_an_array() {
        let file = write_temp(".json", r#"{"age": 19}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err.downcast_ref::<LoadError>(), Some(LoadError::NotAnArray)));
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert_eq!(err.to_string(), "unsupported file extension: .xlsx");
    }

    #[test]
    fn parquet_with_nulls() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("age", DataType::Int64, true),
            Field::new("sex", DataType::Utf8, false),
            Field::new("bmi", DataType::Float64, false),
            Field::new("smoker", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, false),
            Field::new("charges", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![Some(19), None, Some(52)])),
                Arc::new(StringArray::from(vec!["female", "male", "male"])),
                Arc::new(Float64Array::from(vec![27.9, 33.77, 30.2])),
                Arc::new(StringArray::from(vec!["yes", "no", "no"])),
                Arc::new(StringArray::from(vec!["southwest", "southeast", "northwest"])),
                Arc::new(Float32Array::from(vec![16884.5, 1725.5, 10600.25])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insurance.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let outcome = load_file(&path).unwrap();
        assert_eq!(outcome.dropped_rows, 1);
        assert_eq!(outcome.dataset.len(), 2);
        assert_eq!(outcome.dataset.records[1].age, 52);
        assert_eq!(outcome.dataset.records[1].charges, 10600.25);
    }
}
