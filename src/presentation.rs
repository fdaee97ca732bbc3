use std::collections::BTreeMap;

use crate::color::{hex, series_color, Rgb8};
use crate::sim::supervised::ConfusionCounts;

// ---------------------------------------------------------------------------
// Metric tiers
// ---------------------------------------------------------------------------

/// Three-tier quality classification of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Good,
    Medium,
    Poor,
}

impl Tier {
    pub fn classify(score: f64) -> Self {
        if score >= 0.8 {
            Tier::Good
        } else if score >= 0.6 {
            Tier::Medium
        } else {
            Tier::Poor
        }
    }
}

/// A fraction rendered as a percentage with one decimal, e.g. `87.3%`.
pub fn percent_text(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Normalized score of an average reward in `[-5, 10]`.
pub fn reward_score(average_reward: f64) -> f64 {
    (average_reward + 5.0) / 15.0
}

/// Normalized score of a cluster count (eight clusters count as perfect).
pub fn clusters_score(clusters: usize) -> f64 {
    clusters as f64 / 8.0
}

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// Everything needed to draw one chart; the port owns the actual widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bar(BarChartSpec),
    Scatter(ScatterSpec),
    Line(LineSpec),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bar(spec) => &spec.title,
            Chart::Scatter(spec) => &spec.title,
            Chart::Line(spec) => &spec.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub bars: Vec<BarSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub line: Series,
    /// Shade the area between the line and zero.
    pub filled: bool,
}

pub const CONFUSION_LABELS: [&str; 4] = [
    "True Positive",
    "False Positive",
    "False Negative",
    "True Negative",
];
pub const CONFUSION_COLORS: [&str; 4] = ["#1FB8CD", "#FFC185", "#B4413C", "#ECEBD5"];

/// Four bars of placeholder confusion-matrix counts.
pub fn confusion_chart(counts: &ConfusionCounts) -> Chart {
    let bars = CONFUSION_LABELS
        .iter()
        .zip(CONFUSION_COLORS)
        .zip(counts.as_array())
        .map(|((label, color), count)| BarSpec {
            label: label.to_string(),
            value: f64::from(count),
            color: hex(color),
        })
        .collect();
    Chart::Bar(BarChartSpec {
        title: "Confusion Matrix".to_string(),
        bars,
    })
}

/// One scatter series per cluster id, in order of first appearance.
///
/// Returns `None` when there is nothing to draw.
pub fn cluster_chart(points: &[[f64; 2]], assignments: &[usize]) -> Option<Chart> {
    if points.is_empty() || assignments.is_empty() {
        return None;
    }

    let mut order: Vec<usize> = Vec::new();
    let mut members: BTreeMap<usize, Vec<[f64; 2]>> = BTreeMap::new();
    for (point, &cluster) in points.iter().zip(assignments) {
        members
            .entry(cluster)
            .or_insert_with(|| {
                order.push(cluster);
                Vec::new()
            })
            .push(*point);
    }

    let series = order
        .iter()
        .enumerate()
        .map(|(i, cluster)| Series {
            name: format!("Cluster {cluster}"),
            points: members.remove(cluster).unwrap_or_default(),
            color: series_color(i),
        })
        .collect();

    Some(Chart::Scatter(ScatterSpec {
        title: "Cluster Visualization".to_string(),
        x_label: "Feature 1".to_string(),
        y_label: "Feature 2".to_string(),
        series,
    }))
}

/// Moving-average window for `episodes` rewards.
pub fn reward_window(episodes: usize) -> usize {
    (episodes / 50).max(10)
}

/// Trailing mean over at most `window` values ending at each index.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut sum = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            sum += v;
            if i >= window {
                sum -= values[i - window];
            }
            sum / (i + 1).min(window) as f64
        })
        .collect()
}

/// Smoothed reward curve indexed by episode number (starting at 1).
pub fn reward_chart(rewards: &[f64]) -> Chart {
    let points = moving_average(rewards, reward_window(rewards.len()))
        .into_iter()
        .enumerate()
        .map(|(i, avg)| [(i + 1) as f64, avg])
        .collect();
    Chart::Line(LineSpec {
        title: "Training Progress".to_string(),
        x_label: "Episode".to_string(),
        y_label: "Reward".to_string(),
        line: Series {
            name: "Average Reward".to_string(),
            points,
            color: series_color(0),
        },
        filled: true,
    })
}
