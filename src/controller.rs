use std::collections::BTreeSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{DemoConfig, PacingConfig};
use crate::pacing::{percent_stops, Paced};
use crate::port::{ChartSlot, Control, DatasetPreview, Metric, Notice, Select, Tab, UiPort};
use crate::presentation::{
    cluster_chart, clusters_score, confusion_chart, percent_text, reward_chart, reward_score,
    Chart, Tier,
};
use crate::sim::reinforcement::{self, AgentParams, AgentTrainingOutcome, Grid, Pos};
use crate::sim::supervised::{
    self, Classifier, ConfusionCounts, SupervisedDataset, SupervisedParams, TrainingOutcome,
};
use crate::sim::unsupervised::{
    self, BlobDataset, BlobParams, ClusteringAlgorithm, ClusteringOutcome,
};

/// Rows handed to the dataset preview table.
const PREVIEW_ROWS: usize = 12;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Button actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GenerateSupervised,
    TrainModel,
    GenerateUnsupervised,
    RunClustering,
    TrainAgent,
    TestAgent,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::GenerateSupervised | Action::GenerateUnsupervised => "Generate Data",
            Action::TrainModel => "Train Model",
            Action::RunClustering => "Run Clustering",
            Action::TrainAgent => "Start Training",
            Action::TestAgent => "Test Agent",
        }
    }

    /// Buttons shown on `tab`, in display order.
    pub fn on(tab: Tab) -> [Action; 2] {
        match tab {
            Tab::Supervised => [Action::GenerateSupervised, Action::TrainModel],
            Tab::Unsupervised => [Action::GenerateUnsupervised, Action::RunClustering],
            Tab::Reinforcement => [Action::TrainAgent, Action::TestAgent],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    TabSelected(Tab),
    ControlChanged(Control),
    Clicked(Action),
}

// ---------------------------------------------------------------------------
// Per-tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SupervisedState {
    pub dataset: SupervisedDataset,
    pub outcome: Option<TrainingOutcome>,
}

#[derive(Debug, Clone, Default)]
pub struct UnsupervisedState {
    pub dataset: BlobDataset,
    /// Assignments always match `dataset.points` in length.
    pub clustering: Option<ClusteringOutcome>,
}

#[derive(Debug, Clone, Default)]
pub struct ReinforcementState {
    pub grid: Option<Grid>,
    /// Bumped on every rebuild so walks on an old grid go stale.
    pub generation: u64,
    pub training: Option<AgentTrainingOutcome>,
    pub path: Vec<Pos>,
}

// ---------------------------------------------------------------------------
// Paced jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobKind {
    Training,
    Clustering,
    AgentTraining,
    AgentWalk,
    GridRebuild,
}

#[derive(Debug, Clone)]
enum Effect {
    Progress(Tab, f64),
    MoveAgent {
        generation: u64,
        to: Pos,
        trail: Option<Pos>,
    },
    RebuildGrid,
}

#[derive(Debug, Clone)]
enum Completion {
    Trained(TrainingOutcome),
    Clustered(ClusteringAlgorithm),
    AgentTrained(AgentTrainingOutcome),
    Walked,
    Nothing,
}

#[derive(Debug)]
struct Job {
    kind: JobKind,
    paced: Paced<Effect>,
    completion: Completion,
}

/// A job that walks a tab's progress bar through `stops`, holding each one.
fn progress_job(
    kind: JobKind,
    tab: Tab,
    stops: Vec<f64>,
    hold: Duration,
    completion: Completion,
) -> Job {
    let paced = stops
        .into_iter()
        .fold(Paced::new(), |paced, percent| paced.then(Effect::Progress(tab, percent), hold));
    Job {
        kind,
        paced,
        completion,
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Wires UI events to the simulated pipelines and pushes results to a port.
pub struct Controller<P: UiPort> {
    port: P,
    rng: StdRng,
    pacing: PacingConfig,
    tab: Tab,
    supervised: SupervisedState,
    unsupervised: UnsupervisedState,
    reinforcement: ReinforcementState,
    /// Chart slots currently holding a chart on the port.
    live_charts: BTreeSet<ChartSlot>,
    jobs: Vec<Job>,
}

impl<P: UiPort> Controller<P> {
    /// Initialize once: label every control, generate the first datasets and
    /// schedule the first grid.
    pub fn new(port: P, config: &DemoConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut controller = Self {
            port,
            rng,
            pacing: config.pacing.clone(),
            tab: Tab::Supervised,
            supervised: SupervisedState::default(),
            unsupervised: UnsupervisedState::default(),
            reinforcement: ReinforcementState::default(),
            live_charts: BTreeSet::new(),
            jobs: Vec::new(),
        };

        for control in Control::ALL {
            controller.refresh_label(control);
        }
        controller.generate_supervised();
        controller.generate_unsupervised();
        controller.schedule_grid_rebuild();

        log::info!("ML playground loaded");
        controller
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn supervised(&self) -> &SupervisedState {
        &self.supervised
    }

    pub fn unsupervised(&self) -> &UnsupervisedState {
        &self.unsupervised
    }

    pub fn reinforcement(&self) -> &ReinforcementState {
        &self.reinforcement
    }

    /// No paced job is in flight.
    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Time until the earliest in-flight job has something to do.
    pub fn next_due(&self) -> Option<Duration> {
        self.jobs.iter().map(|job| job.paced.remaining_hold()).min()
    }

    pub fn handle(&mut self, event: Event) {
        log::debug!("event: {event:?}");
        match event {
            Event::TabSelected(tab) => {
                self.port.show_tab(tab);
                self.tab = tab;
                if tab == Tab::Reinforcement {
                    self.schedule_grid_rebuild();
                }
            }
            Event::ControlChanged(control) => {
                self.refresh_label(control);
                if control == Control::RlGridSize {
                    self.schedule_grid_rebuild();
                }
            }
            Event::Clicked(action) => match action {
                Action::GenerateSupervised => self.generate_supervised(),
                Action::TrainModel => self.train_model(),
                Action::GenerateUnsupervised => self.generate_unsupervised(),
                Action::RunClustering => self.run_clustering(),
                Action::TrainAgent => self.train_agent(),
                Action::TestAgent => self.test_agent(),
            },
        }
    }

    /// Move every paced job forward by `elapsed`.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut jobs = std::mem::take(&mut self.jobs);
        for job in &mut jobs {
            for effect in job.paced.advance(elapsed) {
                self.apply(effect);
            }
        }

        let (done, running): (Vec<Job>, Vec<Job>) =
            jobs.into_iter().partition(|job| job.paced.is_finished());
        let started = std::mem::replace(&mut self.jobs, running);
        self.jobs.extend(started);

        for job in done {
            self.complete(job.completion);
        }
    }

    // -- control access --

    fn value(&self, control: Control) -> Option<f64> {
        let value = self.port.control_value(control);
        if value.is_none() {
            log::debug!("control {control:?} is missing");
        }
        value
    }

    /// A control read as a whole count, truncating any fraction.
    fn count(&self, control: Control) -> Option<usize> {
        self.value(control).map(|v| v.max(0.0) as usize)
    }

    fn refresh_label(&mut self, control: Control) {
        if let Some(value) = self.port.control_value(control) {
            self.port.set_label(control, control.format(value));
        }
    }

    fn success(&mut self, message: &str) {
        log::info!("{}: {message}", Notice::Success);
        self.port.notify(Notice::Success, message);
    }

    fn show_metric(&mut self, metric: Metric, text: String, score: f64) {
        self.port.show_metric(metric, text, Tier::classify(score));
    }

    /// Tear down whatever `slot` shows and draw `chart` in its place.
    fn refresh_chart(&mut self, slot: ChartSlot, chart: Option<Chart>) {
        if self.live_charts.remove(&slot) {
            self.port.destroy_chart(slot);
        }
        if let Some(chart) = chart {
            self.port.create_chart(slot, chart);
            self.live_charts.insert(slot);
        }
    }

    // -- jobs --

    /// Start `job`, replacing any in-flight job of the same kind.
    fn start(&mut self, mut job: Job) {
        if self.jobs.iter().any(|j| j.kind == job.kind) {
            log::debug!("restarting in-flight {:?} job", job.kind);
            self.jobs.retain(|j| j.kind != job.kind);
        }
        for effect in job.paced.advance(Duration::ZERO) {
            self.apply(effect);
        }
        if job.paced.is_finished() {
            self.complete(job.completion);
        } else {
            self.jobs.push(job);
        }
    }

    fn schedule_grid_rebuild(&mut self) {
        self.start(Job {
            kind: JobKind::GridRebuild,
            paced: Paced::after(self.pacing.settle()).then(Effect::RebuildGrid, Duration::ZERO),
            completion: Completion::Nothing,
        });
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Progress(tab, percent) => self.port.set_progress(tab, Some(percent)),
            Effect::MoveAgent {
                generation,
                to,
                trail,
            } => {
                if generation == self.reinforcement.generation {
                    self.port.move_agent(to, trail);
                }
            }
            Effect::RebuildGrid => self.rebuild_grid(),
        }
    }

    fn complete(&mut self, completion: Completion) {
        match completion {
            Completion::Trained(outcome) => self.finish_training(outcome),
            Completion::Clustered(algorithm) => self.finish_clustering(algorithm),
            Completion::AgentTrained(outcome) => self.finish_agent_training(outcome),
            Completion::Walked => self.success("Agent test completed!"),
            Completion::Nothing => {}
        }
    }

    // -- supervised --

    fn generate_supervised(&mut self) {
        let (Some(size), Some(features), Some(split)) = (
            self.count(Control::SupDatasetSize),
            self.count(Control::SupFeatures),
            self.value(Control::SupSplit),
        ) else {
            return;
        };

        let params = SupervisedParams {
            size,
            features,
            split,
        };
        let dataset = supervised::generate(&params, &mut self.rng);
        self.port.show_preview(DatasetPreview::from_dataset(&dataset, PREVIEW_ROWS));
        self.supervised = SupervisedState {
            dataset,
            outcome: None,
        };
        self.success("Data generated successfully!");
    }

    fn train_model(&mut self) {
        let Some(selection) = self.port.selection(Select::SupAlgorithm) else {
            log::debug!("classifier selector is missing");
            return;
        };
        let outcome = match selection.parse::<Classifier>() {
            Ok(classifier) => {
                log::debug!("training {classifier} on {} points", self.supervised.dataset.len());
                classifier.train(&self.supervised.dataset, &mut self.rng)
            }
            Err(e) => {
                log::warn!("{e}, reporting fallback accuracies");
                TrainingOutcome::FALLBACK
            }
        };

        let job = progress_job(
            JobKind::Training,
            Tab::Supervised,
            percent_stops(10),
            self.pacing.training_step(),
            Completion::Trained(outcome),
        );
        self.start(job);
    }

    fn finish_training(&mut self, outcome: TrainingOutcome) {
        self.show_metric(
            Metric::SupTrainAccuracy,
            percent_text(outcome.train_accuracy),
            outcome.train_accuracy,
        );
        self.show_metric(
            Metric::SupTestAccuracy,
            percent_text(outcome.test_accuracy),
            outcome.test_accuracy,
        );

        let counts = ConfusionCounts::random(&mut self.rng);
        self.refresh_chart(ChartSlot::ConfusionMatrix, Some(confusion_chart(&counts)));

        self.supervised.outcome = Some(outcome);
        self.port.set_progress(Tab::Supervised, None);
        self.success("Model trained successfully!");
    }

    // -- unsupervised --

    fn generate_unsupervised(&mut self) {
        let (Some(size), Some(clusters), Some(spread)) = (
            self.count(Control::UnsupDatasetSize),
            self.count(Control::UnsupClusters),
            self.value(Control::UnsupStd),
        ) else {
            return;
        };

        let params = BlobParams {
            size,
            clusters,
            spread,
        };
        self.unsupervised = UnsupervisedState {
            dataset: unsupervised::generate(&params, &mut self.rng),
            clustering: None,
        };
        self.success("Unsupervised data generated!");
    }

    fn run_clustering(&mut self) {
        let Some(selection) = self.port.selection(Select::UnsupAlgorithm) else {
            log::debug!("clustering selector is missing");
            return;
        };
        let algorithm = ClusteringAlgorithm::from_selection(&selection);
        let job = progress_job(
            JobKind::Clustering,
            Tab::Unsupervised,
            percent_stops(15),
            self.pacing.clustering_step(),
            Completion::Clustered(algorithm),
        );
        self.start(job);
    }

    fn finish_clustering(&mut self, algorithm: ClusteringAlgorithm) {
        let k = self
            .count(Control::UnsupClusters)
            .unwrap_or(self.unsupervised.dataset.centers.len());
        let outcome = algorithm.run(&self.unsupervised.dataset.points, k, &mut self.rng);
        let found = outcome.clusters_found();
        log::debug!("{algorithm} assigned {found} clusters");

        self.show_metric(
            Metric::UnsupSilhouette,
            format!("{:.3}", outcome.silhouette),
            outcome.silhouette,
        );
        self.show_metric(Metric::UnsupClustersFound, found.to_string(), clusters_score(found));

        let chart = cluster_chart(&self.unsupervised.dataset.points, &outcome.assignments);
        self.refresh_chart(ChartSlot::Clusters, chart);

        self.unsupervised.clustering = Some(outcome);
        self.port.set_progress(Tab::Unsupervised, None);
        self.success("Clustering completed!");
    }

    // -- reinforcement --

    fn rebuild_grid(&mut self) {
        let Some(size) = self.count(Control::RlGridSize) else {
            return;
        };
        let grid = reinforcement::generate_grid(size, &mut self.rng);
        log::debug!("built {size}x{size} grid with {} obstacles", grid.obstacle_count());
        self.port.draw_grid(&grid);
        self.reinforcement.grid = Some(grid);
        self.reinforcement.generation += 1;
        self.reinforcement.path.clear();
    }

    fn train_agent(&mut self) {
        let Some(episodes) = self.count(Control::RlEpisodes) else {
            return;
        };
        let setting = |control: Control| {
            self.port
                .control_value(control)
                .unwrap_or_else(|| control.default_value())
        };
        let params = AgentParams {
            episodes,
            learning_rate: setting(Control::RlLearningRate),
            epsilon: setting(Control::RlEpsilon),
            discount: setting(Control::RlDiscount),
        };
        log::debug!("training agent: {params:?}");

        let hold = self.pacing.episode_step();
        let mut paced = Paced::new();
        let outcome = reinforcement::train_agent(&params, &mut self.rng, |episode, total| {
            let percent = episode as f64 / total as f64 * 100.0;
            paced.push(Effect::Progress(Tab::Reinforcement, percent), hold);
        });

        self.start(Job {
            kind: JobKind::AgentTraining,
            paced,
            completion: Completion::AgentTrained(outcome),
        });
    }

    fn finish_agent_training(&mut self, outcome: AgentTrainingOutcome) {
        self.show_metric(
            Metric::RlAvgReward,
            format!("{:.2}", outcome.average_reward),
            reward_score(outcome.average_reward),
        );
        let rate = outcome.success_rate / 100.0;
        self.show_metric(Metric::RlSuccessRate, percent_text(rate), rate);

        self.refresh_chart(ChartSlot::RewardProgress, Some(reward_chart(&outcome.rewards)));

        self.reinforcement.training = Some(outcome);
        self.port.set_progress(Tab::Reinforcement, None);
        self.success("RL training completed!");
    }

    fn test_agent(&mut self) {
        let Some(grid) = &self.reinforcement.grid else {
            log::debug!("no grid to test the agent on");
            return;
        };

        let path = reinforcement::agent_path(grid.size(), &mut self.rng);
        let generation = self.reinforcement.generation;
        let hold = self.pacing.agent_step();
        let mut paced = Paced::new();
        for (i, &to) in path.iter().enumerate() {
            if grid.is_obstacle(to) {
                continue;
            }
            let trail = i
                .checked_sub(1)
                .map(|prev| path[prev])
                .filter(|&prev| prev != grid.start() && !grid.is_obstacle(prev));
            paced.push(
                Effect::MoveAgent {
                    generation,
                    to,
                    trail,
                },
                hold,
            );
        }

        self.port.clear_agent();
        self.reinforcement.path = path;
        self.start(Job {
            kind: JobKind::AgentWalk,
            paced,
            completion: Completion::Walked,
        });
    }
}
