use std::collections::{BTreeMap, BTreeSet};

use crate::config::DemoConfig;
use crate::port::{ChartSlot, Control, DatasetPreview, Metric, Notice, Select, Tab, UiPort};
use crate::presentation::{Chart, Tier};
use crate::sim::reinforcement::{Grid, Pos};

// ---------------------------------------------------------------------------
// Screen state
// ---------------------------------------------------------------------------

/// The grid as currently drawn, with the agent overlay.
#[derive(Debug, Clone)]
pub struct GridView {
    pub grid: Grid,
    pub agent: Option<Pos>,
    pub trail: BTreeSet<Pos>,
}

/// The full UI state, independent of rendering.
///
/// Widgets bind directly to `controls` and `selections`; everything else is
/// written by the controller through [`UiPort`].
pub struct ScreenState {
    /// Tab currently shown.
    pub tab: Tab,

    /// Slider values per range control.
    pub controls: BTreeMap<Control, f64>,

    /// Selected value per drop-down.
    pub selections: BTreeMap<Select, String>,

    /// Value label next to each control.
    pub labels: BTreeMap<Control, String>,

    /// Metric text and tier; absent until first computed.
    pub metrics: BTreeMap<Metric, (String, Tier)>,

    /// Visible progress bars and their percentage.
    pub progress: BTreeMap<Tab, f64>,

    /// Live charts.
    pub charts: BTreeMap<ChartSlot, Chart>,

    /// Reinforcement grid (None until first built).
    pub grid: Option<GridView>,

    /// Supervised dataset summary for the preview table.
    pub preview: Option<DatasetPreview>,

    /// Last notification shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

impl ScreenState {
    /// Seed every control and selector from `config`.
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            tab: Tab::Supervised,
            controls: Control::ALL
                .into_iter()
                .map(|c| (c, config.control(c)))
                .collect(),
            selections: Select::ALL
                .into_iter()
                .map(|s| (s, config.selection(s)))
                .collect(),
            labels: BTreeMap::new(),
            metrics: BTreeMap::new(),
            progress: BTreeMap::new(),
            charts: BTreeMap::new(),
            grid: None,
            preview: None,
            status_message: None,
        }
    }
}

impl UiPort for ScreenState {
    fn control_value(&self, control: Control) -> Option<f64> {
        self.controls.get(&control).copied()
    }

    fn selection(&self, select: Select) -> Option<String> {
        self.selections.get(&select).cloned()
    }

    fn set_label(&mut self, control: Control, text: String) {
        self.labels.insert(control, text);
    }

    fn show_metric(&mut self, metric: Metric, text: String, tier: Tier) {
        self.metrics.insert(metric, (text, tier));
    }

    fn show_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    fn set_progress(&mut self, tab: Tab, percent: Option<f64>) {
        match percent {
            Some(p) => {
                self.progress.insert(tab, p.clamp(0.0, 100.0));
            }
            None => {
                self.progress.remove(&tab);
            }
        }
    }

    fn create_chart(&mut self, slot: ChartSlot, chart: Chart) {
        self.charts.insert(slot, chart);
    }

    fn destroy_chart(&mut self, slot: ChartSlot) {
        self.charts.remove(&slot);
    }

    fn draw_grid(&mut self, grid: &Grid) {
        self.grid = Some(GridView {
            grid: grid.clone(),
            agent: None,
            trail: BTreeSet::new(),
        });
    }

    fn clear_agent(&mut self) {
        if let Some(view) = &mut self.grid {
            view.agent = None;
            view.trail.clear();
        }
    }

    fn move_agent(&mut self, to: Pos, trail: Option<Pos>) {
        let Some(view) = &mut self.grid else {
            return;
        };
        if !view.grid.contains(to) {
            return;
        }
        view.agent = Some(to);
        if let Some(prev) = trail {
            view.trail.insert(prev);
        }
    }

    fn notify(&mut self, _notice: Notice, message: &str) {
        self.status_message = Some(message.to_string());
    }

    fn show_preview(&mut self, preview: DatasetPreview) {
        self.preview = Some(preview);
    }
}
