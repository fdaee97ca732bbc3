use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Features are drawn uniformly from `[-FEATURE_BOUND, FEATURE_BOUND)`.
pub const FEATURE_BOUND: f64 = 5.0;

// ---------------------------------------------------------------------------
// Dataset generation
// ---------------------------------------------------------------------------

/// Parameters read from the supervised controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupervisedParams {
    pub size: usize,
    pub features: usize,
    /// Fraction of the points that go to the training slice.
    pub split: f64,
}

/// A labelled classification dataset split into train and test slices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupervisedDataset {
    pub x_train: Vec<Vec<f64>>,
    pub y_train: Vec<u8>,
    pub x_test: Vec<Vec<f64>>,
    pub y_test: Vec<u8>,
}

impl SupervisedDataset {
    /// Total number of points across both slices.
    pub fn len(&self) -> usize {
        self.x_train.len() + self.x_test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every `(features, label, is_test)` row, train slice first.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64], u8, bool)> {
        let train = self
            .x_train
            .iter()
            .zip(&self.y_train)
            .map(|(x, &y)| (x.as_slice(), y, false));
        let test = self
            .x_test
            .iter()
            .zip(&self.y_test)
            .map(|(x, &y)| (x.as_slice(), y, true));
        train.chain(test)
    }
}

/// The linearly separable labelling rule: 1 when the features sum above zero.
pub fn label_for(point: &[f64]) -> u8 {
    if point.iter().sum::<f64>() > 0.0 {
        1
    } else {
        0
    }
}

/// Number of training points for a dataset of `size` points.
pub fn split_index(size: usize, split: f64) -> usize {
    let fraction = if split.is_nan() { 0.0 } else { split.clamp(0.0, 1.0) };
    ((size as f64 * fraction).floor() as usize).min(size)
}

/// Draw `size` uniform points and label them with [`label_for`].
pub fn generate<R: Rng + ?Sized>(params: &SupervisedParams, rng: &mut R) -> SupervisedDataset {
    let mut x = Vec::with_capacity(params.size);
    let mut y = Vec::with_capacity(params.size);

    for _ in 0..params.size {
        let point: Vec<f64> = (0..params.features)
            .map(|_| rng.gen_range(-FEATURE_BOUND..FEATURE_BOUND))
            .collect();
        y.push(label_for(&point));
        x.push(point);
    }

    let train_len = split_index(params.size, params.split);
    let x_test = x.split_off(train_len);
    let y_test = y.split_off(train_len);

    SupervisedDataset {
        x_train: x,
        y_train: y,
        x_test,
        y_test,
    }
}

// ---------------------------------------------------------------------------
// Simulated training
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown classifier '{0}'")]
pub struct UnknownClassifier(pub String);

/// The classifiers offered in the algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classifier {
    Logistic,
    Forest,
    Svm,
}

impl Classifier {
    pub const ALL: [Classifier; 3] = [Classifier::Logistic, Classifier::Forest, Classifier::Svm];

    /// Selector value identifying this classifier.
    pub fn key(self) -> &'static str {
        match self {
            Classifier::Logistic => "logistic",
            Classifier::Forest => "forest",
            Classifier::Svm => "svm",
        }
    }

    /// Produce placeholder accuracies in a range typical for the classifier.
    pub fn train<R: Rng + ?Sized>(
        self,
        dataset: &SupervisedDataset,
        rng: &mut R,
    ) -> TrainingOutcome {
        match self {
            Classifier::Logistic => {
                if dataset.x_train.is_empty() || dataset.y_train.is_empty() {
                    return TrainingOutcome::FALLBACK;
                }
                let train = 0.80 + rng.gen::<f64>() * 0.15;
                let test = train - 0.02 - rng.gen::<f64>() * 0.08;
                TrainingOutcome {
                    train_accuracy: train.max(0.5),
                    test_accuracy: test.max(0.5),
                }
            }
            Classifier::Forest => {
                let base = 0.75 + rng.gen::<f64>() * 0.2;
                TrainingOutcome {
                    train_accuracy: (base + 0.05).min(0.98),
                    test_accuracy: base.max(0.6),
                }
            }
            Classifier::Svm => {
                let base = 0.7 + rng.gen::<f64>() * 0.25;
                TrainingOutcome {
                    train_accuracy: (base + 0.03).min(0.96),
                    test_accuracy: base.max(0.55),
                }
            }
        }
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classifier::Logistic => "Logistic Regression",
            Classifier::Forest => "Random Forest",
            Classifier::Svm => "Support Vector Machine",
        };
        f.write_str(name)
    }
}

impl FromStr for Classifier {
    type Err = UnknownClassifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Classifier::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownClassifier(s.to_string()))
    }
}

/// Accuracies reported by a simulated training run, as fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOutcome {
    pub train_accuracy: f64,
    pub test_accuracy: f64,
}

impl TrainingOutcome {
    /// Reported when there is nothing to train on or the selection is unknown.
    pub const FALLBACK: TrainingOutcome = TrainingOutcome {
        train_accuracy: 0.85,
        test_accuracy: 0.82,
    };
}

/// Placeholder confusion-matrix counts shown after training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub true_positive: u32,
    pub false_positive: u32,
    pub false_negative: u32,
    pub true_negative: u32,
}

impl ConfusionCounts {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ConfusionCounts {
            true_positive: rng.gen_range(40..90),
            false_positive: rng.gen_range(5..25),
            false_negative: rng.gen_range(5..25),
            true_negative: rng.gen_range(40..90),
        }
    }

    /// Counts in display order: TP, FP, FN, TN.
    pub fn as_array(&self) -> [u32; 4] {
        [
            self.true_positive,
            self.false_positive,
            self.false_negative,
            self.true_negative,
        ]
    }
}
