use std::collections::{BTreeMap, HashMap};

use ml_playground::config::DemoConfig;
use ml_playground::port::{ChartSlot, Control, DatasetPreview, Metric, Notice, Select, Tab, UiPort};
use ml_playground::presentation::{Chart, Tier};
use ml_playground::sim::reinforcement::{Grid, Pos};

/// Everything the controller did to the port, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Label(Control, String),
    Metric(Metric, String, Tier),
    Tab(Tab),
    Progress(Tab, Option<f64>),
    CreateChart(ChartSlot),
    DestroyChart(ChartSlot),
    DrawGrid(usize),
    ClearAgent,
    MoveAgent(Pos, Option<Pos>),
    Notify(String),
    Preview(usize),
}

/// A headless port that records every call.
#[derive(Default)]
pub struct RecordingPort {
    pub controls: HashMap<Control, f64>,
    pub selections: HashMap<Select, String>,
    pub calls: Vec<Call>,
    pub charts: BTreeMap<ChartSlot, Chart>,
    pub grids: Vec<Grid>,
}

impl RecordingPort {
    /// A port with every control and selector at its default.
    pub fn with_defaults() -> Self {
        let config = DemoConfig::default();
        Self {
            controls: Control::ALL
                .into_iter()
                .map(|c| (c, config.control(c)))
                .collect(),
            selections: Select::ALL
                .into_iter()
                .map(|s| (s, config.selection(s)))
                .collect(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, control: Control, value: f64) {
        self.controls.insert(control, value);
    }

    pub fn notices(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Notify(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn progress(&self, tab: Tab) -> Vec<Option<f64>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Progress(t, p) if *t == tab => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn last_metric(&self, metric: Metric) -> Option<(String, Tier)> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Metric(m, text, tier) if *m == metric => Some((text.clone(), *tier)),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl UiPort for RecordingPort {
    fn control_value(&self, control: Control) -> Option<f64> {
        self.controls.get(&control).copied()
    }

    fn selection(&self, select: Select) -> Option<String> {
        self.selections.get(&select).cloned()
    }

    fn set_label(&mut self, control: Control, text: String) {
        self.calls.push(Call::Label(control, text));
    }

    fn show_metric(&mut self, metric: Metric, text: String, tier: Tier) {
        self.calls.push(Call::Metric(metric, text, tier));
    }

    fn show_tab(&mut self, tab: Tab) {
        self.calls.push(Call::Tab(tab));
    }

    fn set_progress(&mut self, tab: Tab, percent: Option<f64>) {
        self.calls.push(Call::Progress(tab, percent));
    }

    fn create_chart(&mut self, slot: ChartSlot, chart: Chart) {
        self.calls.push(Call::CreateChart(slot));
        self.charts.insert(slot, chart);
    }

    fn destroy_chart(&mut self, slot: ChartSlot) {
        self.calls.push(Call::DestroyChart(slot));
        self.charts.remove(&slot);
    }

    fn draw_grid(&mut self, grid: &Grid) {
        self.calls.push(Call::DrawGrid(grid.size()));
        self.grids.push(grid.clone());
    }

    fn clear_agent(&mut self) {
        self.calls.push(Call::ClearAgent);
    }

    fn move_agent(&mut self, to: Pos, trail: Option<Pos>) {
        self.calls.push(Call::MoveAgent(to, trail));
    }

    fn notify(&mut self, _notice: Notice, message: &str) {
        self.calls.push(Call::Notify(message.to_string()));
    }

    fn show_preview(&mut self, preview: DatasetPreview) {
        self.calls.push(Call::Preview(preview.train_len + preview.test_len));
    }
}

/// Seeded config so runs are reproducible.
pub fn seeded(seed: u64) -> DemoConfig {
    DemoConfig {
        seed: Some(seed),
        ..DemoConfig::default()
    }
}
