use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::to_color32;
use crate::port::ChartSlot;
use crate::presentation::Chart;

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Chart slot (central panel)
// ---------------------------------------------------------------------------

/// Render whatever chart currently occupies `slot`.
pub fn chart(ui: &mut Ui, slot: ChartSlot, chart: Option<&Chart>) {
    let Some(chart) = chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.set_max_height(CHART_HEIGHT / 3.0);
            ui.weak(match slot {
                ChartSlot::ConfusionMatrix => "Train a model to see its confusion matrix",
                ChartSlot::Clusters => "Run clustering to see the clusters",
                ChartSlot::RewardProgress => "Start training to see the reward curve",
            });
        });
        return;
    };

    ui.strong(chart.title());
    let id = format!("{slot:?}");

    match chart {
        Chart::Bar(spec) => {
            Plot::new(id)
                .legend(Legend::default())
                .height(CHART_HEIGHT)
                .y_axis_label("Count")
                .allow_drag(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    for (i, bar) in spec.bars.iter().enumerate() {
                        let color = to_color32(bar.color);
                        let chart = BarChart::new(vec![Bar::new(i as f64, bar.value).fill(color)])
                            .width(0.7)
                            .color(color)
                            .name(&bar.label);
                        plot_ui.bar_chart(chart);
                    }
                });
        }
        Chart::Scatter(spec) => {
            Plot::new(id)
                .legend(Legend::default())
                .height(CHART_HEIGHT)
                .x_axis_label(spec.x_label.as_str())
                .y_axis_label(spec.y_label.as_str())
                .data_aspect(1.0)
                .show(ui, |plot_ui| {
                    for series in &spec.series {
                        let points = Points::new(PlotPoints::from(series.points.clone()))
                            .color(to_color32(series.color))
                            .radius(4.0)
                            .name(&series.name);
                        plot_ui.points(points);
                    }
                });
        }
        Chart::Line(spec) => {
            Plot::new(id)
                .legend(Legend::default())
                .height(CHART_HEIGHT)
                .x_axis_label(spec.x_label.as_str())
                .y_axis_label(spec.y_label.as_str())
                .show(ui, |plot_ui| {
                    let mut line = Line::new(PlotPoints::from(spec.line.points.clone()))
                        .color(to_color32(spec.line.color))
                        .width(2.0)
                        .name(&spec.line.name);
                    if spec.filled {
                        line = line.fill(0.0);
                    }
                    plot_ui.line(line);
                });
        }
    }
}
