use std::collections::HashSet;
use std::fmt;

use crate::config::SummaryConfig;
use crate::data::model::CellValue;

use super::parse::{is_date, numeric_value};

// ---------------------------------------------------------------------------
// Column classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Continuous magnitudes, summarized as a histogram.
    Numerical,
    /// Discrete labels, summarized as a frequency table.
    Categorical,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numerical => write!(f, "numerical"),
            ColumnType::Categorical => write!(f, "categorical"),
        }
    }
}

/// Which rule decided a column's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyReason {
    /// No non-null values.
    Empty,
    /// All numeric, but few enough distinct values to read as levels.
    FewDistinct { distinct: usize },
    /// All numeric with many distinct values.
    Continuous { distinct: usize },
    /// Every value is a date or timestamp. Dates stay discrete labels.
    Temporal,
    /// Mixed or free text.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub column_type: ColumnType,
    pub reason: ClassifyReason,
}

/// Classify a column from its raw values. Nulls are ignored and the result
/// does not depend on value order.
pub fn classify(values: &[CellValue], config: &SummaryConfig) -> ColumnType {
    classify_detailed(values, config).column_type
}

/// Like [`classify`], also reporting which rule applied.
pub fn classify_detailed(values: &[CellValue], config: &SummaryConfig) -> Classification {
    let clean: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
    if clean.is_empty() {
        return categorical(ClassifyReason::Empty);
    }

    let numbers: Option<Vec<f64>> = clean.iter().map(|v| numeric_value(v)).collect();
    if let Some(numbers) = numbers {
        let distinct = count_distinct(&numbers);
        if distinct <= config.categorical_cutoff {
            return categorical(ClassifyReason::FewDistinct { distinct });
        }
        return Classification {
            column_type: ColumnType::Numerical,
            reason: ClassifyReason::Continuous { distinct },
        };
    }

    if clean.iter().all(|v| is_date(v)) {
        return categorical(ClassifyReason::Temporal);
    }

    categorical(ClassifyReason::Text)
}

fn categorical(reason: ClassifyReason) -> Classification {
    Classification {
        column_type: ColumnType::Categorical,
        reason,
    }
}

fn count_distinct(numbers: &[f64]) -> usize {
    // Adding 0.0 folds -0.0 into 0.0.
    numbers
        .iter()
        .map(|v| (v + 0.0).to_bits())
        .collect::<HashSet<u64>>()
        .len()
}
