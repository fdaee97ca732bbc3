/// Simulation layer: synthetic data generators and placeholder processors.
///
/// Architecture:
/// ```text
///   control values
///        │
///        ▼
///   ┌────────────┐
///   │ generators  │  random dataset / grid per tab
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ processors  │  randomized "results" (no fitting, no search)
///   └────────────┘
///        │
///        ▼
///   presentation → port
/// ```
///
/// Every function here is pure apart from the caller-supplied RNG, so the
/// controller (and tests) decide where randomness comes from.

pub mod reinforcement;
pub mod supervised;
pub mod unsupervised;
