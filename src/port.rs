use std::fmt;

use serde::{Deserialize, Serialize};

use crate::presentation::{Chart, Tier};
use crate::sim::reinforcement::{Grid, Pos};
use crate::sim::supervised::{Classifier, SupervisedDataset};
use crate::sim::unsupervised::ClusteringAlgorithm;

// ---------------------------------------------------------------------------
// Identifiers of everything the controller can read or write
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tab {
    Supervised,
    Unsupervised,
    Reinforcement,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Supervised, Tab::Unsupervised, Tab::Reinforcement];
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Supervised => f.write_str("Supervised Learning"),
            Tab::Unsupervised => f.write_str("Unsupervised Learning"),
            Tab::Reinforcement => f.write_str("Reinforcement Learning"),
        }
    }
}

/// Numeric range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    SupDatasetSize,
    SupFeatures,
    SupSplit,
    UnsupDatasetSize,
    UnsupClusters,
    UnsupStd,
    RlGridSize,
    RlLearningRate,
    RlEpsilon,
    RlEpisodes,
    RlDiscount,
}

impl Control {
    pub const ALL: [Control; 11] = [
        Control::SupDatasetSize,
        Control::SupFeatures,
        Control::SupSplit,
        Control::UnsupDatasetSize,
        Control::UnsupClusters,
        Control::UnsupStd,
        Control::RlGridSize,
        Control::RlLearningRate,
        Control::RlEpsilon,
        Control::RlEpisodes,
        Control::RlDiscount,
    ];

    pub fn tab(self) -> Tab {
        match self {
            Control::SupDatasetSize | Control::SupFeatures | Control::SupSplit => Tab::Supervised,
            Control::UnsupDatasetSize | Control::UnsupClusters | Control::UnsupStd => {
                Tab::Unsupervised
            }
            _ => Tab::Reinforcement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::SupDatasetSize | Control::UnsupDatasetSize => "Dataset size",
            Control::SupFeatures => "Features",
            Control::SupSplit => "Train split",
            Control::UnsupClusters => "Clusters",
            Control::UnsupStd => "Cluster spread",
            Control::RlGridSize => "Grid size",
            Control::RlLearningRate => "Learning rate",
            Control::RlEpsilon => "Exploration (ε)",
            Control::RlEpisodes => "Episodes",
            Control::RlDiscount => "Discount (γ)",
        }
    }

    /// `(min, max, step, default)`.
    pub fn bounds(self) -> (f64, f64, f64, f64) {
        match self {
            Control::SupDatasetSize => (50.0, 1000.0, 50.0, 200.0),
            Control::SupFeatures => (2.0, 10.0, 1.0, 2.0),
            Control::SupSplit => (0.5, 0.9, 0.05, 0.8),
            Control::UnsupDatasetSize => (50.0, 1000.0, 50.0, 300.0),
            Control::UnsupClusters => (2.0, 8.0, 1.0, 3.0),
            Control::UnsupStd => (0.1, 3.0, 0.1, 1.0),
            Control::RlGridSize => (4.0, 10.0, 1.0, 5.0),
            Control::RlLearningRate => (0.01, 1.0, 0.01, 0.1),
            Control::RlEpsilon => (0.0, 1.0, 0.05, 0.1),
            Control::RlEpisodes => (100.0, 5000.0, 100.0, 1000.0),
            Control::RlDiscount => (0.5, 0.99, 0.01, 0.9),
        }
    }

    pub fn default_value(self) -> f64 {
        self.bounds().3
    }

    /// Clamp `value` into the control's range.
    pub fn clamp(self, value: f64) -> f64 {
        let (min, max, _, _) = self.bounds();
        value.clamp(min, max)
    }

    /// Text of the value label next to the control.
    pub fn format(self, value: f64) -> String {
        match self {
            Control::RlGridSize => format!("{0}x{0}", value.trunc()),
            _ if value.fract() == 0.0 => format!("{value:.0}"),
            _ => format!("{}", (value * 100.0).round() / 100.0),
        }
    }
}

/// Drop-down selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Select {
    SupAlgorithm,
    UnsupAlgorithm,
}

impl Select {
    pub const ALL: [Select; 2] = [Select::SupAlgorithm, Select::UnsupAlgorithm];

    pub fn tab(self) -> Tab {
        match self {
            Select::SupAlgorithm => Tab::Supervised,
            Select::UnsupAlgorithm => Tab::Unsupervised,
        }
    }

    /// `(value, label)` pairs offered by the selector.
    pub fn options(self) -> Vec<(&'static str, String)> {
        match self {
            Select::SupAlgorithm => Classifier::ALL
                .iter()
                .map(|c| (c.key(), c.to_string()))
                .collect(),
            Select::UnsupAlgorithm => ClusteringAlgorithm::ALL
                .iter()
                .map(|a| (a.key(), a.to_string()))
                .collect(),
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            Select::SupAlgorithm => Classifier::Logistic.key(),
            Select::UnsupAlgorithm => ClusteringAlgorithm::KMeans.key(),
        }
    }
}

/// Metric displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    SupTrainAccuracy,
    SupTestAccuracy,
    UnsupSilhouette,
    UnsupClustersFound,
    RlAvgReward,
    RlSuccessRate,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::SupTrainAccuracy => "Train accuracy",
            Metric::SupTestAccuracy => "Test accuracy",
            Metric::UnsupSilhouette => "Silhouette score",
            Metric::UnsupClustersFound => "Clusters found",
            Metric::RlAvgReward => "Average reward",
            Metric::RlSuccessRate => "Success rate",
        }
    }

    /// Metrics shown on `tab`, in display order.
    pub fn on(tab: Tab) -> &'static [Metric] {
        match tab {
            Tab::Supervised => &[Metric::SupTrainAccuracy, Metric::SupTestAccuracy],
            Tab::Unsupervised => &[Metric::UnsupSilhouette, Metric::UnsupClustersFound],
            Tab::Reinforcement => &[Metric::RlAvgReward, Metric::RlSuccessRate],
        }
    }
}

/// Chart widgets, one per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartSlot {
    ConfusionMatrix,
    Clusters,
    RewardProgress,
}

impl ChartSlot {
    pub fn on(tab: Tab) -> ChartSlot {
        match tab {
            Tab::Supervised => ChartSlot::ConfusionMatrix,
            Tab::Unsupervised => ChartSlot::Clusters,
            Tab::Reinforcement => ChartSlot::RewardProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success => f.write_str("SUCCESS"),
        }
    }
}

/// First rows of the supervised dataset for the preview table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetPreview {
    pub train_len: usize,
    pub test_len: usize,
    pub positive_fraction: f64,
    /// `(features, label, is_test)`.
    pub rows: Vec<(Vec<f64>, u8, bool)>,
}

impl DatasetPreview {
    /// Summarize `dataset`, keeping at most `max_rows` rows.
    pub fn from_dataset(dataset: &SupervisedDataset, max_rows: usize) -> Self {
        let positives = dataset.rows().filter(|&(_, label, _)| label == 1).count();
        let positive_fraction = if dataset.is_empty() {
            0.0
        } else {
            positives as f64 / dataset.len() as f64
        };
        DatasetPreview {
            train_len: dataset.x_train.len(),
            test_len: dataset.x_test.len(),
            positive_fraction,
            rows: dataset
                .rows()
                .take(max_rows)
                .map(|(x, y, is_test)| (x.to_vec(), y, is_test))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// The port
// ---------------------------------------------------------------------------

/// Capabilities the controller needs from a rendering surface.
///
/// Lookups of controls that do not exist return `None`; writes to displays
/// that do not exist are ignored by the implementation.
pub trait UiPort {
    fn control_value(&self, control: Control) -> Option<f64>;
    fn selection(&self, select: Select) -> Option<String>;

    fn set_label(&mut self, control: Control, text: String);
    fn show_metric(&mut self, metric: Metric, text: String, tier: Tier);
    fn show_tab(&mut self, tab: Tab);
    /// `Some(percent)` shows the tab's progress bar, `None` hides it.
    fn set_progress(&mut self, tab: Tab, percent: Option<f64>);

    fn create_chart(&mut self, slot: ChartSlot, chart: Chart);
    fn destroy_chart(&mut self, slot: ChartSlot);

    fn draw_grid(&mut self, grid: &Grid);
    /// Remove the agent and its trail from the grid.
    fn clear_agent(&mut self);
    /// Place the agent on `to`, marking `trail` as visited.
    fn move_agent(&mut self, to: Pos, trail: Option<Pos>);

    fn notify(&mut self, notice: Notice, message: &str);

    fn show_preview(&mut self, _preview: DatasetPreview) {}
}
