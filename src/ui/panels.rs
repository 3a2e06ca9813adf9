use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset info and training target
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(loaded) = &state.loaded else {
        ui.label("No dataset loaded.");
        return;
    };

    let info = loaded.info;
    let columns = loaded.dataset.column_names.clone();

    ui.strong(loaded.file_name());
    egui::Grid::new("dataset_info")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Rows");
            ui.label(RichText::new(info.row_count.to_string()).strong());
            ui.end_row();

            ui.label("Columns");
            ui.label(RichText::new(info.column_count.to_string()).strong());
            ui.end_row();

            ui.label("File size");
            ui.label(RichText::new(info.file_size_label()).strong());
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("Training target");
    ui.separator();

    let current = state.target_column.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("target_column")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in &columns {
                if ui.selectable_label(current == *col, col).clicked() {
                    state.set_target_column(col.clone());
                }
            }
        });

    match &state.problem_type {
        Some(Ok(problem)) => {
            ui.label(format!("Task: {problem}"));
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        None => {
            ui.label(RichText::new("Pick a column to predict.").weak());
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(loaded) = &state.loaded {
            ui.label(format!(
                "{}: {} rows, {} columns",
                loaded.file_name(),
                loaded.info.row_count,
                loaded.info.column_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

/// Load `path` into the state, reporting failures in the status bar.
pub fn open_path(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(loaded) => {
            log::info!(
                "Loaded {} rows with columns {:?}",
                loaded.dataset.len(),
                loaded.dataset.column_names
            );
            state.set_dataset(loaded);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn open_path_loads_and_summarizes() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "kind,weight\na,1\nb,2\na,3\nc,4\n").unwrap();
        file.flush().unwrap();

        let mut state = AppState::default();
        open_path(&mut state, file.path());

        assert!(state.status_message.is_none());
        assert_eq!(state.summaries.len(), 2);
        assert_eq!(state.summaries[0].summary.values, vec![2, 1, 1]);
    }

    #[test]
    fn open_path_reports_errors() {
        let mut state = AppState::default();
        open_path(&mut state, Path::new("/nonexistent/data.csv"));

        assert!(state.loaded.is_none());
        assert!(state.summaries.is_empty());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error:")));
    }
}
