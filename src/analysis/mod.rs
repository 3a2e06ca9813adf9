/// Summarization engine: column classification and chart-ready summaries.
///
/// Pipeline per column:
/// ```text
///   Vec<CellValue>
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  Numerical | Categorical
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  bucket   │  histogram or first-seen frequency table → Summary
///   └──────────┘
/// ```
///
/// Everything here is pure: no I/O, no shared state, columns are independent.

pub mod bucket;
pub mod classify;
pub mod parse;
pub mod problem;
pub mod summarize;
