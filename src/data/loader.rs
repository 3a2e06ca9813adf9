use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset, DatasetInfo, Row};
use crate::analysis::parse::parse_number;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// A parsed file together with the figures shown on the info card.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub path: PathBuf,
    pub dataset: Dataset,
    pub info: DatasetInfo,
}

impl LoadedDataset {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line
/// * `.json`    – `[{ "col": value, ... }, ...]`
/// * `.parquet` – flat columns of strings, numbers, booleans or dates
pub fn load_file(path: &Path) -> Result<LoadedDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let file_size = std::fs::metadata(path)
        .with_context(|| format!("reading metadata of {}", path.display()))?
        .len();
    let info = DatasetInfo::new(&dataset, file_size);

    Ok(LoadedDataset {
        path: path.to_path_buf(),
        dataset,
        info,
    })
}

/// Best-effort typing of a text cell: blank → `Null`, a finite numeric
/// literal → `Number`, anything else stays `Text`.
pub fn coerce_text(s: &str) -> CellValue {
    if s.trim().is_empty() {
        return CellValue::Null;
    }
    match parse_number(s) {
        Some(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row names the columns. Short records are padded with `Null`,
/// fields past the header are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
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

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let value = record.get(idx).map(coerce_text).unwrap_or(CellValue::Null);
                (name.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "sample": "A", "concentration": 1.5, "measured": null },
///   ...
/// ]
/// ```
///
/// Key order of the first record sets the column order; keys that only show
/// up later are appended.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = Row::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            row.insert(key.clone(), json_to_cell(val));
        }
        rows.push(row);
    }

    Ok(Dataset::new(column_names, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::Null => CellValue::Null,
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => CellValue::Number(f),
            _ => CellValue::Text(n.to_string()),
        },
        JsonValue::String(s) => coerce_text(s),
        JsonValue::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns.
///
/// Numeric columns (ints, floats, decimals) become `Number`, string columns
/// go through [`coerce_text`], everything else (bools, dates, timestamps) is
/// rendered to text with Arrow's display formatter.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let mut batch_rows = vec![Row::new(); batch.num_rows()];

        for (col_idx, name) in column_names.iter().enumerate() {
            let cells = extract_cells(batch.column(col_idx))
                .with_context(|| format!("reading column '{name}'"))?;
            for (row, cell) in batch_rows.iter_mut().zip(cells) {
                row.insert(name.clone(), cell);
            }
        }
        rows.extend(batch_rows);
    }

    Ok(Dataset::new(column_names, rows))
}

// -- Parquet / Arrow helpers --

/// Convert one Arrow column into cells, row by row.
fn extract_cells(col: &ArrayRef) -> Result<Vec<CellValue>> {
    let data_type = col.data_type();

    if data_type.is_numeric() {
        let floats = cast(col, &DataType::Float64)
            .with_context(|| format!("casting {data_type:?} to Float64"))?;
        let floats = floats.as_primitive::<Float64Type>();
        return Ok(floats
            .iter()
            .map(|v| match v {
                Some(f) if f.is_finite() => CellValue::Number(f),
                Some(f) => CellValue::Text(f.to_string()),
                None => CellValue::Null,
            })
            .collect());
    }

    match data_type {
        DataType::Utf8 => Ok(strings(col.as_string::<i32>().iter())),
        DataType::LargeUtf8 => Ok(strings(col.as_string::<i64>().iter())),
        DataType::Utf8View => Ok(strings(col.as_string_view().iter())),
        _ => (0..col.len())
            .map(|row| -> Result<CellValue> {
                if col.is_null(row) {
                    return Ok(CellValue::Null);
                }
                let text = array_value_to_string(col, row)
                    .with_context(|| format!("formatting row {row}"))?;
                Ok(CellValue::Text(text))
            })
            .collect(),
    }
}

fn strings<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<CellValue> {
    values
        .map(|v| v.map(coerce_text).unwrap_or(CellValue::Null))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    fn write_fixture(suffix: &str, data: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(suffix).unwrap();
        write!(file, "{data}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn coerces_text_cells() {
        assert_eq!(coerce_text(""), CellValue::Null);
        assert_eq!(coerce_text("   "), CellValue::Null);
        assert_eq!(coerce_text("3.25"), CellValue::Number(3.25));
        assert_eq!(coerce_text("-7"), CellValue::Number(-7.0));
        assert_eq!(coerce_text("true"), CellValue::Text("true".into()));
        assert_eq!(coerce_text("Infinity"), CellValue::Text("Infinity".into()));
        assert_eq!(coerce_text("2023-01-01"), CellValue::Text("2023-01-01".into()));
    }

    #[test]
    fn loads_csv_with_header_order() {
        let file = write_fixture(".csv", "name,age,city\nann,31,Seoul\nbob,,Busan\ncy,27\n");
        let loaded = load_file(file.path()).unwrap();
        let ds = &loaded.dataset;

        assert_eq!(ds.column_names, vec!["name", "age", "city"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.column("age"),
            vec![CellValue::Number(31.0), CellValue::Null, CellValue::Number(27.0)]
        );
        assert_eq!(ds.column("city")[2], CellValue::Null);
        assert_eq!(loaded.info.row_count, 3);
        assert_eq!(loaded.info.column_count, 3);
        assert!(loaded.info.file_size > 0);
    }

    #[test]
    fn loads_json_records() {
        let file = write_fixture(
            ".json",
            r#"[
                {"z": 1, "a": "x", "flag": true},
                {"z": null, "a": "12", "flag": false, "extra": [1, 2]}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap().dataset;

        assert_eq!(ds.column_names, vec!["z", "a", "flag", "extra"]);
        assert_eq!(ds.column("z"), vec![CellValue::Number(1.0), CellValue::Null]);
        assert_eq!(
            ds.column("a"),
            vec![CellValue::Text("x".into()), CellValue::Number(12.0)]
        );
        assert_eq!(ds.column("flag")[1], CellValue::Text("false".into()));
        assert_eq!(
            ds.column("extra"),
            vec![CellValue::Null, CellValue::Text("[1,2]".into())]
        );
    }

    #[test]
    fn rejects_non_array_json() {
        let file = write_fixture(".json", r#"{"a": 1}"#);
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_fixture(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }

    #[test]
    fn loads_parquet_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("score", DataType::Float64, true),
            Field::new("label", DataType::Utf8, true),
            Field::new("ok", DataType::Boolean, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2, 3])),
                Arc::new(Float64Array::from(vec![Some(0.5), None, Some(2.0)])),
                Arc::new(StringArray::from(vec![Some("a"), Some(""), None])),
                Arc::new(BooleanArray::from(vec![true, false, true])),
            ],
        )
        .unwrap();

        let file = NamedTempFile::with_suffix(".parquet").unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap().dataset;
        assert_eq!(ds.column_names, vec!["id", "score", "label", "ok"]);
        assert_eq!(ds.column("id")[2], CellValue::Number(3.0));
        assert_eq!(
            ds.column("score"),
            vec![CellValue::Number(0.5), CellValue::Null, CellValue::Number(2.0)]
        );
        assert_eq!(
            ds.column("label"),
            vec![CellValue::Text("a".into()), CellValue::Null, CellValue::Null]
        );
        assert_eq!(ds.column("ok")[1], CellValue::Text("false".into()));
    }
}
