use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::tier_color;
use crate::controller::{Action, Event};
use crate::port::{ChartSlot, Control, Metric, Select, Tab};
use crate::state::ScreenState;
use crate::ui::{grid, plot};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the tab selector and the latest notification.
pub fn top_bar(ui: &mut Ui, state: &mut ScreenState, events: &mut Vec<Event>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        for tab in Tab::ALL {
            if ui
                .selectable_label(state.tab == tab, tab.to_string())
                .clicked()
            {
                events.push(Event::TabSelected(tab));
            }
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::from_rgb(86, 166, 96)));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – parameters
// ---------------------------------------------------------------------------

/// Render the parameter controls and action buttons of the active tab.
pub fn side_panel(ui: &mut Ui, state: &mut ScreenState, events: &mut Vec<Event>) {
    let tab = state.tab;
    ui.heading("Parameters");
    ui.separator();

    for select in Select::ALL.into_iter().filter(|s| s.tab() == tab) {
        selector(ui, state, select);
    }

    for control in Control::ALL.into_iter().filter(|c| c.tab() == tab) {
        slider(ui, state, control, events);
    }

    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        for action in Action::on(tab) {
            if ui.button(action.label()).clicked() {
                events.push(Event::Clicked(action));
            }
        }
    });

    if let Some(&percent) = state.progress.get(&tab) {
        ui.add_space(8.0);
        ui.add(egui::ProgressBar::new((percent / 100.0) as f32).show_percentage());
    }
}

fn slider(ui: &mut Ui, state: &mut ScreenState, control: Control, events: &mut Vec<Event>) {
    let (min, max, step, _) = control.bounds();
    let label = state.labels.get(&control).cloned();
    let Some(value) = state.controls.get_mut(&control) else {
        return;
    };

    ui.label(control.label());
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::Slider::new(value, min..=max)
                .step_by(step)
                .show_value(false),
        );
        if let Some(text) = &label {
            ui.monospace(text);
        }
        if response.changed() {
            events.push(Event::ControlChanged(control));
        }
    });
}

fn selector(ui: &mut Ui, state: &mut ScreenState, select: Select) {
    let Some(current) = state.selections.get_mut(&select) else {
        return;
    };
    let options = select.options();
    let selected_text = options
        .iter()
        .find(|(key, _)| *key == current.as_str())
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| current.clone());

    ui.label("Algorithm");
    egui::ComboBox::from_id_salt(("algorithm", select))
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            for (key, label) in &options {
                ui.selectable_value(current, key.to_string(), label);
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

/// Render metrics, the tab's chart and any tab-specific view.
pub fn results_panel(ui: &mut Ui, state: &ScreenState) {
    let tab = state.tab;
    ui.heading(tab.to_string());
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for &metric in Metric::on(tab) {
            metric_card(ui, state, metric);
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let slot = ChartSlot::on(tab);
            plot::chart(ui, slot, state.charts.get(&slot));

            match tab {
                Tab::Supervised => preview_table(ui, state),
                Tab::Reinforcement => {
                    ui.add_space(8.0);
                    ui.strong("Environment");
                    match &state.grid {
                        Some(view) => grid::grid_view(ui, view),
                        None => {
                            ui.label("Building grid…");
                        }
                    }
                }
                Tab::Unsupervised => {}
            }
        });
}

fn metric_card(ui: &mut Ui, state: &ScreenState, metric: Metric) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(160.0);
        ui.vertical(|ui: &mut Ui| {
            ui.label(metric.label());
            match state.metrics.get(&metric) {
                Some((text, tier)) => {
                    ui.label(
                        RichText::new(text)
                            .size(22.0)
                            .strong()
                            .color(tier_color(*tier)),
                    );
                }
                None => {
                    ui.label(RichText::new("–").size(22.0).weak());
                }
            }
        });
    });
}

fn preview_table(ui: &mut Ui, state: &ScreenState) {
    let Some(preview) = &state.preview else {
        return;
    };

    ui.add_space(8.0);
    ui.strong("Dataset");
    ui.label(format!(
        "{} training / {} test points, {:.1}% positive",
        preview.train_len,
        preview.test_len,
        preview.positive_fraction * 100.0
    ));

    let features = preview.rows.first().map_or(0, |(x, _, _)| x.len());
    TableBuilder::new(ui)
        .id_salt("dataset_preview")
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().at_least(56.0), features)
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for j in 0..features {
                header.col(|ui: &mut Ui| {
                    ui.strong(format!("x{}", j + 1));
                });
            }
            header.col(|ui: &mut Ui| {
                ui.strong("label");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("split");
            });
        })
        .body(|body| {
            body.rows(18.0, preview.rows.len(), |mut row| {
                let (x, label, is_test) = &preview.rows[row.index()];
                for v in x {
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{v:+.2}"));
                    });
                }
                row.col(|ui: &mut Ui| {
                    ui.label(label.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(if *is_test { "test" } else { "train" });
                });
            });
        });
}
