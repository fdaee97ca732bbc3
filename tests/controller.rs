mod common;

use std::time::Duration;

use common::{seeded, Call, RecordingPort};
use ml_playground::controller::{Action, Controller, Event};
use ml_playground::port::{ChartSlot, Control, Metric, Select, Tab};
use ml_playground::presentation::{Chart, Tier};

const MS: Duration = Duration::from_millis(1);

fn controller(seed: u64) -> Controller<RecordingPort> {
    Controller::new(RecordingPort::with_defaults(), &seeded(seed))
}

/// A controller whose first grid has already been built and whose call log is empty.
fn settled(seed: u64) -> Controller<RecordingPort> {
    let mut c = controller(seed);
    c.advance(MS * 100);
    c.port_mut().calls.clear();
    c
}

fn click(c: &mut Controller<RecordingPort>, action: Action) {
    c.handle(Event::Clicked(action));
}

#[test]
fn initialization_labels_controls_and_generates_data() {
    let c = controller(1);
    let port = c.port();

    let labels = port.count(|call| matches!(call, Call::Label(..)));
    assert_eq!(labels, Control::ALL.len());
    assert!(port
        .calls
        .contains(&Call::Label(Control::RlGridSize, "5x5".to_string())));
    assert_eq!(
        port.notices(),
        vec!["Data generated successfully!", "Unsupervised data generated!"]
    );
    assert_eq!(c.supervised().dataset.len(), 200);
    assert_eq!(c.unsupervised().dataset.len(), 300);

    // the grid waits for the layout to settle
    assert!(c.reinforcement().grid.is_none());
    assert!(!c.is_idle());
}

#[test]
fn first_grid_appears_after_settle_delay() {
    let mut c = controller(2);
    c.advance(MS * 99);
    assert!(c.reinforcement().grid.is_none());
    c.advance(MS);
    assert_eq!(c.reinforcement().grid.as_ref().map(|g| g.size()), Some(5));
    assert!(c.port().calls.contains(&Call::DrawGrid(5)));
    assert!(c.is_idle());
}

#[test]
fn supervised_scenario_splits_eighty_twenty() {
    let mut c = settled(3);
    c.port_mut().set(Control::SupDatasetSize, 100.0);
    c.port_mut().set(Control::SupFeatures, 2.0);
    c.port_mut().set(Control::SupSplit, 0.8);
    click(&mut c, Action::GenerateSupervised);

    let ds = &c.supervised().dataset;
    assert_eq!(ds.x_train.len(), 80);
    assert_eq!(ds.x_test.len(), 20);
    for (x, y, _) in ds.rows() {
        assert_eq!(x.len(), 2);
        assert_eq!(y == 1, x[0] + x[1] > 0.0);
    }
    assert!(c.port().calls.contains(&Call::Preview(100)));
}

#[test]
fn reinforcement_scenario_builds_five_by_five_grid() {
    let mut c = settled(4);
    c.handle(Event::TabSelected(Tab::Reinforcement));
    c.advance(MS * 100);

    let grid = c.reinforcement().grid.as_ref().unwrap();
    let values = grid.values();
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|row| row.len() == 5));
    assert_eq!(values[4][4], 1);
    assert_ne!(values[0][0], -1);
    assert_eq!(c.port().calls[0], Call::Tab(Tab::Reinforcement));
    assert_eq!(c.tab(), Tab::Reinforcement);
}

#[test]
fn training_walks_progress_then_reports() {
    let mut c = settled(5);
    click(&mut c, Action::TrainModel);
    assert_eq!(c.port().progress(Tab::Supervised), vec![Some(0.0)]);

    c.advance(MS * 1099);
    assert!(c.port().last_metric(Metric::SupTrainAccuracy).is_none());
    assert!(!c.is_idle());

    c.advance(MS);
    let mut expected: Vec<Option<f64>> = (0..=10).map(|i| Some(f64::from(i * 10))).collect();
    expected.push(None);
    assert_eq!(c.port().progress(Tab::Supervised), expected);

    let (train_text, _) = c.port().last_metric(Metric::SupTrainAccuracy).unwrap();
    assert!(train_text.ends_with('%'));
    assert!(c.port().last_metric(Metric::SupTestAccuracy).is_some());
    assert!(matches!(
        c.port().charts.get(&ChartSlot::ConfusionMatrix),
        Some(Chart::Bar(spec)) if spec.bars.len() == 4
    ));
    assert_eq!(c.port().notices(), vec!["Model trained successfully!"]);
    assert!(c.supervised().outcome.is_some());
    assert!(c.is_idle());
}

#[test]
fn retraining_destroys_chart_before_recreating_it() {
    let mut c = settled(6);
    click(&mut c, Action::TrainModel);
    c.advance(Duration::from_secs(2));
    click(&mut c, Action::TrainModel);
    c.advance(Duration::from_secs(2));

    let chart_calls: Vec<&Call> = c
        .port()
        .calls
        .iter()
        .filter(|call| matches!(call, Call::CreateChart(_) | Call::DestroyChart(_)))
        .collect();
    assert_eq!(
        chart_calls,
        vec![
            &Call::CreateChart(ChartSlot::ConfusionMatrix),
            &Call::DestroyChart(ChartSlot::ConfusionMatrix),
            &Call::CreateChart(ChartSlot::ConfusionMatrix),
        ]
    );
}

#[test]
fn second_click_restarts_an_in_flight_run() {
    let mut c = settled(7);
    click(&mut c, Action::TrainModel);
    c.advance(MS * 500);
    click(&mut c, Action::TrainModel);
    c.advance(MS * 1000);
    assert!(c.port().notices().is_empty());
    c.advance(MS * 100);
    assert_eq!(c.port().notices(), vec!["Model trained successfully!"]);
}

#[test]
fn unknown_classifier_reports_fallback_accuracies() {
    let mut c = settled(8);
    c.port_mut()
        .selections
        .insert(Select::SupAlgorithm, "knn".to_string());
    click(&mut c, Action::TrainModel);
    c.advance(Duration::from_secs(2));

    assert_eq!(
        c.port().last_metric(Metric::SupTrainAccuracy),
        Some(("85.0%".to_string(), Tier::Good))
    );
    assert_eq!(
        c.port().last_metric(Metric::SupTestAccuracy),
        Some(("82.0%".to_string(), Tier::Good))
    );
}

#[test]
fn kmeans_assigns_every_point_within_k() {
    let mut c = settled(9);
    c.port_mut().set(Control::UnsupClusters, 4.0);
    click(&mut c, Action::GenerateUnsupervised);
    click(&mut c, Action::RunClustering);

    // 0, 15, …, 90 held 100 ms each
    c.advance(MS * 699);
    assert!(c.unsupervised().clustering.is_none());
    c.advance(MS);

    let state = c.unsupervised();
    let outcome = state.clustering.as_ref().unwrap();
    assert_eq!(outcome.assignments.len(), state.dataset.len());
    assert!(outcome.assignments.iter().all(|&id| id < 4));
    assert!((0.3..0.8).contains(&outcome.silhouette));

    let Some(Chart::Scatter(spec)) = c.port().charts.get(&ChartSlot::Clusters) else {
        panic!("expected a cluster chart");
    };
    assert_eq!(spec.series.len(), outcome.clusters_found());
    let plotted: usize = spec.series.iter().map(|s| s.points.len()).sum();
    assert_eq!(plotted, state.dataset.len());

    let (found, _) = c.port().last_metric(Metric::UnsupClustersFound).unwrap();
    assert_eq!(found, outcome.clusters_found().to_string());
    assert_eq!(c.port().progress(Tab::Unsupervised).last(), Some(&None));
}

#[test]
fn dbscan_chooses_its_own_cluster_count() {
    let mut c = settled(10);
    c.port_mut()
        .selections
        .insert(Select::UnsupAlgorithm, "dbscan".to_string());
    click(&mut c, Action::RunClustering);
    c.advance(Duration::from_secs(1));

    let outcome = c.unsupervised().clustering.as_ref().unwrap();
    assert!(outcome.assignments.iter().all(|&id| id < 6));
    assert!((0.2..0.8).contains(&outcome.silhouette));
}

#[test]
fn regenerating_points_clears_old_assignments() {
    let mut c = settled(11);
    click(&mut c, Action::RunClustering);
    c.advance(Duration::from_secs(1));
    assert!(c.unsupervised().clustering.is_some());

    c.port_mut().set(Control::UnsupDatasetSize, 50.0);
    click(&mut c, Action::GenerateUnsupervised);
    assert!(c.unsupervised().clustering.is_none());
    assert_eq!(c.unsupervised().dataset.len(), 50);
}

#[test]
fn agent_training_reports_throttled_progress_and_metrics() {
    let mut c = settled(12);
    c.port_mut().set(Control::RlEpisodes, 200.0);
    click(&mut c, Action::TrainAgent);
    c.advance(Duration::from_secs(5));

    let progress = c.port().progress(Tab::Reinforcement);
    assert_eq!(progress.len(), 101);
    assert_eq!(progress[0], Some(0.0));
    assert_eq!(progress[1], Some(1.0));
    assert_eq!(progress.last(), Some(&None));

    let training = c.reinforcement().training.as_ref().unwrap();
    assert_eq!(training.rewards.len(), 200);
    assert!((-5.0..=10.0).contains(&training.average_reward));
    assert!((0.0..=100.0).contains(&training.success_rate));

    let (avg, _) = c.port().last_metric(Metric::RlAvgReward).unwrap();
    assert_eq!(avg, format!("{:.2}", training.average_reward));
    let (rate, _) = c.port().last_metric(Metric::RlSuccessRate).unwrap();
    assert_eq!(rate, format!("{:.1}%", training.success_rate));

    let Some(Chart::Line(spec)) = c.port().charts.get(&ChartSlot::RewardProgress) else {
        panic!("expected a reward chart");
    };
    assert_eq!(spec.line.points.len(), 200);
    assert_eq!(c.port().notices(), vec!["RL training completed!"]);
}

#[test]
fn agent_test_animates_free_cells_of_its_path() {
    let mut c = settled(13);
    click(&mut c, Action::TestAgent);
    assert_eq!(c.port().calls[0], Call::ClearAgent);

    let grid = c.reinforcement().grid.clone().unwrap();
    let path = c.reinforcement().path.clone();
    assert_eq!(path.first(), Some(&(0, 0)));
    assert_eq!(path.last(), Some(&grid.goal()));

    let free: Vec<_> = path
        .iter()
        .copied()
        .filter(|&p| !grid.is_obstacle(p))
        .collect();
    let moves_after = |c: &Controller<RecordingPort>| {
        c.port().count(|call| matches!(call, Call::MoveAgent(..)))
    };
    assert_eq!(moves_after(&c), 1);

    c.advance(MS * 500 * (free.len() as u32 - 1));
    assert_eq!(moves_after(&c), free.len());
    assert!(c.port().notices().is_empty());

    c.advance(MS * 500);
    assert_eq!(c.port().notices(), vec!["Agent test completed!"]);

    let visited: Vec<_> = c
        .port()
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::MoveAgent(to, trail) => Some((*to, *trail)),
            _ => None,
        })
        .collect();
    assert_eq!(visited[0], ((0, 0), None));
    assert!(visited.iter().all(|(_, trail)| *trail != Some((0, 0))));
}

#[test]
fn grid_size_changes_debounce_into_one_rebuild() {
    let mut c = settled(14);
    for size in [6.0, 7.0, 8.0] {
        c.port_mut().set(Control::RlGridSize, size);
        c.handle(Event::ControlChanged(Control::RlGridSize));
        c.advance(MS * 40);
    }
    c.advance(MS * 100);

    assert_eq!(c.port().count(|call| matches!(call, Call::DrawGrid(_))), 1);
    assert!(c.port().calls.contains(&Call::DrawGrid(8)));
    assert!(c
        .port()
        .calls
        .contains(&Call::Label(Control::RlGridSize, "8x8".to_string())));
}

#[test]
fn rebuilding_the_grid_drops_the_running_walk() {
    let mut c = settled(15);
    click(&mut c, Action::TestAgent);
    c.advance(MS * 500);

    c.port_mut().set(Control::RlGridSize, 4.0);
    c.handle(Event::ControlChanged(Control::RlGridSize));
    c.advance(MS * 100);
    assert_eq!(c.port().calls.last(), Some(&Call::DrawGrid(4)));
    let rebuilt_at = c.port().calls.len();

    c.advance(Duration::from_secs(20));
    let calls = &c.port().calls;
    assert!(!calls[rebuilt_at..]
        .iter()
        .any(|call| matches!(call, Call::MoveAgent(..))));
    assert!(c.reinforcement().path.is_empty());
    assert_eq!(c.port().notices(), vec!["Agent test completed!"]);
}

#[test]
fn only_the_reinforcement_tab_rebuilds_the_grid() {
    let mut c = settled(18);
    c.handle(Event::TabSelected(Tab::Unsupervised));
    c.handle(Event::TabSelected(Tab::Supervised));
    c.advance(Duration::from_secs(1));

    assert_eq!(c.port().count(|call| matches!(call, Call::DrawGrid(_))), 0);
    assert_eq!(c.reinforcement().generation, 1);
    assert!(c.is_idle());

    c.handle(Event::TabSelected(Tab::Reinforcement));
    c.advance(MS * 100);
    assert_eq!(c.port().count(|call| matches!(call, Call::DrawGrid(_))), 1);
    assert_eq!(c.reinforcement().generation, 2);
}

#[test]
fn missing_controls_are_skipped_silently() {
    let mut port = RecordingPort::with_defaults();
    port.controls.remove(&Control::SupDatasetSize);
    port.controls.remove(&Control::RlGridSize);
    port.selections.clear();

    let mut c = Controller::new(port, &seeded(16));
    c.advance(Duration::from_secs(1));
    assert!(c.supervised().dataset.is_empty());
    assert!(c.reinforcement().grid.is_none());
    assert_eq!(c.port().notices(), vec!["Unsupervised data generated!"]);

    click(&mut c, Action::TrainModel);
    click(&mut c, Action::RunClustering);
    click(&mut c, Action::TestAgent);
    assert!(c.is_idle());
}

#[test]
fn regenerating_keeps_shape_with_fresh_values() {
    let mut c = settled(17);
    let first = c.supervised().dataset.clone();
    click(&mut c, Action::GenerateSupervised);
    let second = &c.supervised().dataset;
    assert_eq!(first.x_train.len(), second.x_train.len());
    assert_eq!(first.x_test.len(), second.x_test.len());
    assert_ne!(&first, second);
}
