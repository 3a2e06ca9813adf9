use std::collections::HashMap;

use crate::config::SummaryConfig;
use crate::data::model::{format_number, CellValue};

use super::classify::ColumnType;
use super::parse::numeric_value;

// ---------------------------------------------------------------------------
// Summary – chart-ready (label, count) series
// ---------------------------------------------------------------------------

/// Index-aligned labels and counts: `labels[i]` names the bucket counted in
/// `values[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl Summary {
    fn push(&mut self, label: String, count: usize) {
        self.labels.push(label);
        self.values.push(count);
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> usize {
        self.values.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Bucketizer
// ---------------------------------------------------------------------------

/// Reduce a column to a histogram (numerical) or a first-seen frequency
/// table (categorical). Nulls are dropped first.
pub fn summarize(values: &[CellValue], column_type: ColumnType, config: &SummaryConfig) -> Summary {
    let clean: Vec<&CellValue> = values.iter().filter(|v| !v.is_null()).collect();
    if clean.is_empty() {
        return Summary::default();
    }
    match column_type {
        ColumnType::Numerical => histogram(&clean, config.bin_count),
        ColumnType::Categorical => frequencies(&clean),
    }
}

fn histogram(clean: &[&CellValue], bin_count: usize) -> Summary {
    let numbers: Vec<f64> = clean.iter().filter_map(|v| numeric_value(v)).collect();
    if numbers.len() < clean.len() {
        log::warn!(
            "Skipped {} non-numeric values in a numerical column",
            clean.len() - numbers.len()
        );
    }
    if numbers.is_empty() {
        return Summary::default();
    }

    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut summary = Summary::default();
    if min == max {
        summary.push(format_number(min), numbers.len());
        return summary;
    }

    let bins = bin_count.max(1);
    let bin_size = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in &numbers {
        // `max` itself lands at index `bins`, clamp it into the last bucket.
        let idx = ((v - min) / bin_size).floor().clamp(0.0, (bins - 1) as f64) as usize;
        counts[idx] += 1;
    }

    for (i, count) in counts.into_iter().enumerate() {
        let low = min + i as f64 * bin_size;
        let high = min + (i + 1) as f64 * bin_size;
        summary.push(format!("{} - {}", one_decimal(low), one_decimal(high)), count);
    }
    summary
}

/// One-decimal label with exact ties rounded away from zero: `0.25` → `0.3`.
fn one_decimal(x: f64) -> String {
    let rounded = (x * 10.0).round() / 10.0;
    // Keep "-0.0" out of labels.
    format!("{:.1}", rounded + 0.0)
}

fn frequencies(clean: &[&CellValue]) -> Summary {
    let mut summary = Summary::default();
    let mut slot: HashMap<String, usize> = HashMap::new();
    for v in clean {
        let key = v.to_string();
        match slot.get(&key) {
            Some(&i) => summary.values[i] += 1,
            None => {
                slot.insert(key.clone(), summary.len());
                summary.push(key, 1);
            }
        }
    }
    summary
}
