/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (+ DatasetInfo)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  column order, Vec<Row> of CellValue
///   └──────────┘
///        │
///        ▼
///   analysis::summarize
/// ```

pub mod loader;
pub mod model;
