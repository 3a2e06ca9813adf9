use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as produced by the loader
// ---------------------------------------------------------------------------

/// A raw cell after best-effort coercion by the loader.
///
/// Numeric-looking cells arrive as `Number`, empty cells as `Null`, and
/// everything else (booleans, dates, free text) as `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", format_number(*v)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

/// Shortest display form of a number: `1`, `2.5`, `-0.125`.
pub fn format_number(v: f64) -> String {
    // `-0` and `0` share a label.
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One record of the source table: column_name → value.
/// Column order lives on [`Dataset::column_names`].
pub type Row = BTreeMap<String, CellValue>;

/// A parsed table with header-derived column order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column names in header order.
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset; column order is taken from `column_names` as given.
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { column_names, rows }
    }

    /// Project one column across all rows. Missing cells read as `Null`.
    pub fn column(&self, name: &str) -> Vec<CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(name).cloned().unwrap_or(CellValue::Null))
            .collect()
    }

    /// Display strings of the first `n` cells of a column.
    pub fn preview(&self, name: &str, n: usize) -> Vec<String> {
        self.rows
            .iter()
            .take(n)
            .map(|row| match row.get(name) {
                Some(CellValue::Null) | None => String::new(),
                Some(v) => v.to_string(),
            })
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DatasetInfo – figures for the info card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetInfo {
    pub row_count: usize,
    pub column_count: usize,
    /// Size of the source file in bytes.
    pub file_size: u64,
}

impl DatasetInfo {
    pub fn new(dataset: &Dataset, file_size: u64) -> Self {
        DatasetInfo {
            row_count: dataset.len(),
            column_count: dataset.column_names.len(),
            file_size,
        }
    }

    pub fn file_size_label(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Human readable size with base-1024 units: `0 Bytes`, `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", format_number(rounded), UNITS[unit])
}
