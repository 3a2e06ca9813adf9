use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, FontId, Pos2, RichText, ScrollArea, Sense, Shape, Stroke, Ui, Vec2};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Plot};

use crate::analysis::bucket::Summary;
use crate::analysis::classify::{ClassifyReason, ColumnType};
use crate::analysis::summarize::ColumnSummary;
use crate::color::ChartPalette;
use crate::state::AppState;

const CARD_WIDTH: f32 = 250.0;
const CHART_HEIGHT: f32 = 150.0;
const PREVIEW_ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Column cards (central panel)
// ---------------------------------------------------------------------------

/// Render one card per column: header, chart, raw-value preview.
pub fn column_cards(ui: &mut Ui, state: &AppState) {
    if state.loaded.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to summarize its columns  (File → Open…)");
        });
        return;
    }
    if state.summaries.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No data available");
        });
        return;
    }

    ScrollArea::horizontal()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_top(|ui: &mut Ui| {
                for (idx, column) in state.summaries.iter().enumerate() {
                    let preview = state.previews.get(idx).map(Vec::as_slice).unwrap_or(&[]);
                    ui.push_id(idx, |ui: &mut Ui| {
                        column_card(ui, column, preview, &state.palette);
                    });
                }
            });
        });
}

fn column_card(ui: &mut Ui, column: &ColumnSummary, preview: &[String], palette: &ChartPalette) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(RichText::new(type_icon(column.classification.reason)).strong());
                ui.strong(column.name.as_str())
                    .on_hover_text(column.name.as_str());
            });
            ui.label(RichText::new(describe(column.classification.reason)).small().weak());
            ui.add_space(4.0);

            match column.column_type() {
                ColumnType::Numerical => histogram(ui, column, palette),
                ColumnType::Categorical => donut(ui, &column.summary, palette),
            }

            ui.separator();
            preview_table(ui, preview);
        });
    });
}

fn type_icon(reason: ClassifyReason) -> &'static str {
    match reason {
        ClassifyReason::Continuous { .. } => "#",
        ClassifyReason::Temporal => "📅",
        _ => "Aa",
    }
}

/// One-line explanation of a classification for the card subtitle.
pub fn describe(reason: ClassifyReason) -> String {
    match reason {
        ClassifyReason::Empty => "categorical · no values".to_string(),
        ClassifyReason::FewDistinct { distinct } => format!("categorical · {distinct} numeric levels"),
        ClassifyReason::Continuous { distinct } => format!("numerical · {distinct} distinct"),
        ClassifyReason::Temporal => "categorical · dates".to_string(),
        ClassifyReason::Text => "categorical".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Histogram (numerical columns)
// ---------------------------------------------------------------------------

fn histogram(ui: &mut Ui, column: &ColumnSummary, palette: &ChartPalette) {
    let bars: Vec<Bar> = column
        .summary
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, count as f64)
                .name(label)
                .fill(palette.fill_for(i))
                .stroke(Stroke::new(1.0, palette.color_for(i)))
        })
        .collect();

    let chart = BarChart::new(bars)
        .width(0.9)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}: {}", bar.name, bar.value)
        }));

    Plot::new("histogram")
        .height(CHART_HEIGHT)
        .width(CARD_WIDTH)
        .show_axes([false, true])
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Donut (categorical columns)
// ---------------------------------------------------------------------------

fn donut(ui: &mut Ui, summary: &Summary, palette: &ChartPalette) {
    let (response, painter) =
        ui.allocate_painter(Vec2::new(CARD_WIDTH, CHART_HEIGHT), Sense::hover());
    let rect = response.rect;
    let center = rect.center();

    let total = summary.total();
    if total == 0 {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "No values",
            FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
        return;
    }

    let outer = rect.width().min(rect.height()) * 0.45;
    let thickness = outer * 0.45;
    let radius = outer - thickness / 2.0;

    let mut start = -FRAC_PI_2;
    for (i, (_, count)) in summary.iter().enumerate() {
        let sweep = TAU * count as f32 / total as f32;
        let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
        let points: Vec<Pos2> = (0..=steps)
            .map(|s| center + radius * Vec2::angled(start + sweep * s as f32 / steps as f32))
            .collect();
        painter.add(Shape::line(points, Stroke::new(thickness, palette.color_for(i))));
        start += sweep;
    }

    let hovered = response.hover_pos().and_then(|pos| {
        let d = pos - center;
        if (d.length() - radius).abs() > thickness / 2.0 {
            return None;
        }
        let turn = (d.y.atan2(d.x) + FRAC_PI_2).rem_euclid(TAU) / TAU;
        slice_at(summary, turn)
    });
    if let Some(i) = hovered {
        response.on_hover_text(format!("{}: {}", summary.labels[i], summary.values[i]));
    }
}

/// Index of the slice covering `turn` (0.0 = top, clockwise, < 1.0).
fn slice_at(summary: &Summary, turn: f32) -> Option<usize> {
    let total = summary.total() as f32;
    if total == 0.0 {
        return None;
    }
    let mut acc = 0.0;
    for (i, count) in summary.values.iter().enumerate() {
        acc += *count as f32 / total;
        if turn < acc {
            return Some(i);
        }
    }
    summary.len().checked_sub(1)
}

// ---------------------------------------------------------------------------
// Raw-value preview
// ---------------------------------------------------------------------------

fn preview_table(ui: &mut Ui, preview: &[String]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .body(|mut body| {
            for value in preview {
                body.row(PREVIEW_ROW_HEIGHT, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(value.as_str()).on_hover_text(value.as_str());
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(values: &[usize]) -> Summary {
        Summary {
            labels: values.iter().map(|v| v.to_string()).collect(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn slices_follow_cumulative_share() {
        let s = summary(&[1, 1, 2]);
        assert_eq!(slice_at(&s, 0.0), Some(0));
        assert_eq!(slice_at(&s, 0.3), Some(1));
        assert_eq!(slice_at(&s, 0.6), Some(2));
        assert_eq!(slice_at(&s, 0.999), Some(2));
        assert_eq!(slice_at(&Summary::default(), 0.5), None);
    }

    #[test]
    fn descriptions_name_the_rule() {
        assert_eq!(
            describe(ClassifyReason::Continuous { distinct: 42 }),
            "numerical · 42 distinct"
        );
        assert_eq!(describe(ClassifyReason::Temporal), "categorical · dates");
    }
}
