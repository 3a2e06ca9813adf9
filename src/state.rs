use crate::analysis::problem::{determine_problem_type, ProblemType, ProblemTypeError};
use crate::analysis::summarize::{summarize_dataset, ColumnSummary};
use crate::color::ChartPalette;
use crate::config::SummaryConfig;
use crate::data::loader::LoadedDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub loaded: Option<LoadedDataset>,

    /// One summary per column, rebuilt whenever a dataset is loaded.
    pub summaries: Vec<ColumnSummary>,

    /// Raw values shown under each chart, keyed by column position.
    pub previews: Vec<Vec<String>>,

    /// Thresholds for classification and bucketing.
    pub config: SummaryConfig,

    /// Chart colours.
    pub palette: ChartPalette,

    /// Column picked as the training target.
    pub target_column: Option<String>,

    /// Task implied by `target_column`.
    pub problem_type: Option<Result<ProblemType, ProblemTypeError>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SummaryConfig::default())
    }
}

impl AppState {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            loaded: None,
            summaries: Vec::new(),
            previews: Vec::new(),
            config,
            palette: ChartPalette::default(),
            target_column: None,
            problem_type: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and compute its column summaries.
    pub fn set_dataset(&mut self, loaded: LoadedDataset) {
        let dataset = &loaded.dataset;
        self.summaries = summarize_dataset(dataset, &self.config);
        self.previews = dataset
            .column_names
            .iter()
            .map(|name| dataset.preview(name, self.config.preview_rows))
            .collect();
        log::info!(
            "Summarized {} columns of {}",
            self.summaries.len(),
            loaded.file_name()
        );

        self.target_column = None;
        self.problem_type = None;
        self.loaded = Some(loaded);
        self.status_message = None;
    }

    /// Pick the training target and recompute the implied task.
    pub fn set_target_column(&mut self, column: String) {
        self.problem_type = self.loaded.as_ref().map(|loaded| {
            determine_problem_type(
                &loaded.dataset,
                &column,
                self.config.problem_type_threshold,
            )
        });
        self.target_column = Some(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify::ColumnType;
    use crate::data::model::{CellValue, Dataset, DatasetInfo, Row};

    fn loaded() -> LoadedDataset {
        let rows = (0..20)
            .map(|i| {
                let mut row = Row::new();
                row.insert("price".into(), CellValue::Number(i as f64 * 1.5));
                row.insert("sold".into(), CellValue::Text(["yes", "no"][i % 2].into()));
                row
            })
            .collect();
        let dataset = Dataset::new(vec!["price".into(), "sold".into()], rows);
        let info = DatasetInfo::new(&dataset, 640);
        LoadedDataset {
            path: "sales.csv".into(),
            dataset,
            info,
        }
    }

    #[test]
    fn loading_builds_summaries_and_previews() {
        let mut state = AppState::default();
        state.set_dataset(loaded());

        assert_eq!(state.summaries.len(), 2);
        assert_eq!(state.summaries[0].column_type(), ColumnType::Numerical);
        assert_eq!(state.summaries[1].summary.labels, vec!["yes", "no"]);
        assert_eq!(state.previews[0].len(), 15);
        assert_eq!(state.previews[1][0], "yes");
    }

    #[test]
    fn target_selection_sets_problem_type() {
        let mut state = AppState::default();
        state.set_dataset(loaded());

        state.set_target_column("sold".into());
        assert_eq!(state.problem_type, Some(Ok(ProblemType::Binary)));

        state.set_target_column("price".into());
        assert_eq!(state.problem_type, Some(Ok(ProblemType::Regression)));

        state.set_dataset(loaded());
        assert!(state.target_column.is_none());
        assert!(state.problem_type.is_none());
    }
}
