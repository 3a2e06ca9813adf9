use crate::config::SummaryConfig;
use crate::data::model::Dataset;

use super::bucket::{summarize, Summary};
use super::classify::{classify_detailed, Classification, ColumnType};

// ---------------------------------------------------------------------------
// Column summarizer
// ---------------------------------------------------------------------------

/// Everything the chart layer needs for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub classification: Classification,
    pub summary: Summary,
}

impl ColumnSummary {
    pub fn column_type(&self) -> ColumnType {
        self.classification.column_type
    }
}

/// Classify and bucket a single column.
pub fn summarize_column(dataset: &Dataset, name: &str, config: &SummaryConfig) -> ColumnSummary {
    let values = dataset.column(name);
    let classification = classify_detailed(&values, config);
    log::debug!("Column {name:?}: {:?}", classification);
    let summary = summarize(&values, classification.column_type, config);
    ColumnSummary {
        name: name.to_string(),
        classification,
        summary,
    }
}

/// Summarize every column, in the dataset's column order.
pub fn summarize_dataset(dataset: &Dataset, config: &SummaryConfig) -> Vec<ColumnSummary> {
    dataset
        .column_names
        .iter()
        .map(|name| summarize_column(dataset, name, config))
        .collect()
}
