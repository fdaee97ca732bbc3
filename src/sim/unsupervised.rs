use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;

/// Cluster centers are drawn uniformly from `[-CENTER_BOUND, CENTER_BOUND)` per axis.
pub const CENTER_BOUND: f64 = 5.0;

// ---------------------------------------------------------------------------
// Blob generation
// ---------------------------------------------------------------------------

/// Parameters read from the unsupervised controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobParams {
    pub size: usize,
    pub clusters: usize,
    /// Half-width of the uniform noise added around each center.
    pub spread: f64,
}

/// 2D points scattered around randomly placed centers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlobDataset {
    pub points: Vec<[f64; 2]>,
    pub centers: Vec<[f64; 2]>,
}

impl BlobDataset {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Scatter `size` points around `clusters` random centers (at least one center).
pub fn generate<R: Rng + ?Sized>(params: &BlobParams, rng: &mut R) -> BlobDataset {
    let spread = params.spread.abs();
    let centers: Vec<[f64; 2]> = (0..params.clusters.max(1))
        .map(|_| {
            [
                rng.gen_range(-CENTER_BOUND..CENTER_BOUND),
                rng.gen_range(-CENTER_BOUND..CENTER_BOUND),
            ]
        })
        .collect();

    let points = (0..params.size)
        .map(|_| {
            let [cx, cy] = centers[rng.gen_range(0..centers.len())];
            [
                cx + (rng.gen::<f64>() - 0.5) * spread * 2.0,
                cy + (rng.gen::<f64>() - 0.5) * spread * 2.0,
            ]
        })
        .collect();

    BlobDataset { points, centers }
}

// ---------------------------------------------------------------------------
// Simulated clustering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusteringAlgorithm {
    KMeans,
    Dbscan,
}

impl ClusteringAlgorithm {
    pub const ALL: [ClusteringAlgorithm; 2] =
        [ClusteringAlgorithm::KMeans, ClusteringAlgorithm::Dbscan];

    pub fn key(self) -> &'static str {
        match self {
            ClusteringAlgorithm::KMeans => "kmeans",
            ClusteringAlgorithm::Dbscan => "dbscan",
        }
    }

    /// Anything other than `kmeans` selects the density-based stand-in.
    pub fn from_selection(value: &str) -> Self {
        if value == ClusteringAlgorithm::KMeans.key() {
            ClusteringAlgorithm::KMeans
        } else {
            ClusteringAlgorithm::Dbscan
        }
    }

    /// Assign random cluster ids and a placeholder silhouette.
    ///
    /// `k` is only consulted by k-means; the density stand-in picks its own
    /// cluster count from `[2, 6)`.
    pub fn run<R: Rng + ?Sized>(
        self,
        points: &[[f64; 2]],
        k: usize,
        rng: &mut R,
    ) -> ClusteringOutcome {
        let (empty_silhouette, n_clusters, low, width) = match self {
            ClusteringAlgorithm::KMeans => (0.5, k.max(1), 0.3, 0.5),
            ClusteringAlgorithm::Dbscan => (0.4, 2 + rng.gen_range(0..4), 0.2, 0.6),
        };

        if points.is_empty() {
            return ClusteringOutcome {
                assignments: Vec::new(),
                silhouette: empty_silhouette,
            };
        }

        let assignments = points
            .iter()
            .map(|_| rng.gen_range(0..n_clusters))
            .collect();
        ClusteringOutcome {
            assignments,
            silhouette: low + rng.gen::<f64>() * width,
        }
    }
}

impl fmt::Display for ClusteringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusteringAlgorithm::KMeans => f.write_str("K-Means"),
            ClusteringAlgorithm::Dbscan => f.write_str("DBSCAN"),
        }
    }
}

/// Result of a simulated clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOutcome {
    /// One cluster id per input point.
    pub assignments: Vec<usize>,
    pub silhouette: f64,
}

impl ClusteringOutcome {
    /// Number of distinct cluster ids actually assigned.
    pub fn clusters_found(&self) -> usize {
        self.assignments.iter().collect::<BTreeSet<_>>().len()
    }
}
