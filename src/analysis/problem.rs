use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Learning task implied by a training target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    Binary,
    Multiclass,
    Regression,
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemType::Binary => write!(f, "binary classification"),
            ProblemType::Multiclass => write!(f, "multiclass classification"),
            ProblemType::Regression => write!(f, "regression"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemTypeError {
    #[error("target column '{0}' is not in the dataset")]
    UnknownColumn(String),
    #[error("target column '{0}' has no values")]
    NoValues(String),
    #[error("target column '{0}' has a single distinct value")]
    SingleValue(String),
}

/// Decide which task a target column implies.
///
/// Numeric targets (every non-null cell a number) are binary up to two
/// distinct values, multiclass up to `threshold`, regression beyond. Other
/// targets are binary with exactly two labels and multiclass with more.
pub fn determine_problem_type(
    dataset: &Dataset,
    target: &str,
    threshold: usize,
) -> Result<ProblemType, ProblemTypeError> {
    if !dataset.has_column(target) {
        return Err(ProblemTypeError::UnknownColumn(target.to_string()));
    }

    let values = dataset.column(target);
    let clean: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
    if clean.is_empty() {
        return Err(ProblemTypeError::NoValues(target.to_string()));
    }

    let distinct = clean
        .iter()
        .map(|v| v.to_string())
        .collect::<HashSet<_>>()
        .len();
    let numeric = clean.iter().all(|v| matches!(v, CellValue::Number(_)));

    let problem = if numeric {
        if distinct <= 2 {
            ProblemType::Binary
        } else if distinct <= threshold {
            ProblemType::Multiclass
        } else {
            ProblemType::Regression
        }
    } else {
        match distinct {
            0 | 1 => return Err(ProblemTypeError::SingleValue(target.to_string())),
            2 => ProblemType::Binary,
            _ => ProblemType::Multiclass,
        }
    };
    log::info!("Target {target:?} implies {problem}");
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn single_column(values: Vec<CellValue>) -> Dataset {
        let rows = values
            .into_iter()
            .map(|v| {
                let mut row = Row::new();
                row.insert("target".into(), v);
                row
            })
            .collect();
        Dataset::new(vec!["target".into()], rows)
    }

    fn numbers(values: impl IntoIterator<Item = f64>) -> Dataset {
        single_column(values.into_iter().map(CellValue::Number).collect())
    }

    fn labels(values: &[&str]) -> Dataset {
        single_column(values.iter().map(|s| CellValue::Text(s.to_string())).collect())
    }

    #[test]
    fn numeric_targets_by_cardinality() {
        let ds = numbers([0.0, 1.0, 1.0, 0.0]);
        assert_eq!(determine_problem_type(&ds, "target", 10), Ok(ProblemType::Binary));

        let ds = numbers((0..5).map(f64::from));
        assert_eq!(determine_problem_type(&ds, "target", 10), Ok(ProblemType::Multiclass));

        let ds = numbers((0..50).map(|i| i as f64 * 0.5));
        assert_eq!(determine_problem_type(&ds, "target", 10), Ok(ProblemType::Regression));
        assert_eq!(determine_problem_type(&ds, "target", 100), Ok(ProblemType::Multiclass));
    }

    #[test]
    fn label_targets_by_cardinality() {
        let ds = labels(&["yes", "no", "yes"]);
        assert_eq!(determine_problem_type(&ds, "target", 10), Ok(ProblemType::Binary));

        let ds = labels(&["cat", "dog", "bird", "cat"]);
        assert_eq!(determine_problem_type(&ds, "target", 10), Ok(ProblemType::Multiclass));
    }

    #[test]
    fn degenerate_targets_are_errors() {
        let ds = labels(&["only", "only"]);
        assert_eq!(
            determine_problem_type(&ds, "target", 10),
            Err(ProblemTypeError::SingleValue("target".into()))
        );
        assert_eq!(
            determine_problem_type(&ds, "missing", 10),
            Err(ProblemTypeError::UnknownColumn("missing".into()))
        );
        let ds = single_column(vec![CellValue::Null, CellValue::Null]);
        assert_eq!(
            determine_problem_type(&ds, "target", 10),
            Err(ProblemTypeError::NoValues("target".into()))
        );
    }
}
