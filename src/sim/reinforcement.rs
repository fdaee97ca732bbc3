use rand::Rng;

/// Chance that a free cell becomes an obstacle.
pub const OBSTACLE_PROBABILITY: f64 = 0.15;

/// Chance that a simulated episode ends successfully.
pub const SUCCESS_PROBABILITY: f64 = 0.7;

/// Chance that the walking agent prefers moving down a row over a column.
pub const ROW_BIAS: f64 = 0.7;

/// `(row, col)` coordinates on the grid.
pub type Pos = (usize, usize);

// ---------------------------------------------------------------------------
// Grid world
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Obstacle,
    Goal,
}

impl Cell {
    /// Numeric encoding: empty 0, obstacle -1, goal 1.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Obstacle => -1,
            Cell::Goal => 1,
        }
    }
}

/// A square grid with the start in the top-left and the goal in the bottom-right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    /// Row-major cells.
    cells: Vec<Cell>,
}

impl Grid {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> Pos {
        (0, 0)
    }

    pub fn goal(&self) -> Pos {
        (self.size.saturating_sub(1), self.size.saturating_sub(1))
    }

    pub fn contains(&self, (row, col): Pos) -> bool {
        row < self.size && col < self.size
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[pos.0 * self.size + pos.1])
    }

    pub fn is_obstacle(&self, pos: Pos) -> bool {
        self.cell(pos) == Some(Cell::Obstacle)
    }

    /// The grid as rows of numeric cell values.
    pub fn values(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|c| c.value()).collect())
            .collect()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Obstacle).count()
    }
}

/// Build a `size × size` grid with randomly placed obstacles.
pub fn generate_grid<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Grid {
    let mut cells = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let cell = if row + 1 == size && col + 1 == size {
                Cell::Goal
            } else if (row, col) == (0, 0) {
                Cell::Empty
            } else if rng.gen_bool(OBSTACLE_PROBABILITY) {
                Cell::Obstacle
            } else {
                Cell::Empty
            };
            cells.push(cell);
        }
    }
    Grid { size, cells }
}

// ---------------------------------------------------------------------------
// Simulated training
// ---------------------------------------------------------------------------

/// Parameters read from the reinforcement controls.
///
/// Only `episodes` changes the outcome; the others are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentParams {
    pub episodes: usize,
    pub learning_rate: f64,
    pub epsilon: f64,
    pub discount: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentTrainingOutcome {
    /// Reward of every episode in order.
    pub rewards: Vec<f64>,
    pub total_reward: f64,
    pub average_reward: f64,
    /// Percentage of episodes with a positive reward.
    pub success_rate: f64,
}

/// Reward of one simulated episode: `[0, 10)` on success, `(-5, 0]` otherwise.
pub fn run_episode<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(SUCCESS_PROBABILITY) {
        rng.gen::<f64>() * 10.0
    } else {
        -rng.gen::<f64>() * 5.0
    }
}

/// How many episodes pass between two progress reports (about 100 reports per run).
pub fn progress_interval(episodes: usize) -> usize {
    (episodes / 100).max(1)
}

/// Run `params.episodes` independent episodes.
///
/// `on_progress(episode, episodes)` is called before every
/// [`progress_interval`]-th episode.
pub fn train_agent<R, F>(
    params: &AgentParams,
    rng: &mut R,
    mut on_progress: F,
) -> AgentTrainingOutcome
where
    R: Rng + ?Sized,
    F: FnMut(usize, usize),
{
    let episodes = params.episodes;
    let interval = progress_interval(episodes);
    let mut rewards = Vec::with_capacity(episodes);
    let mut successes = 0usize;

    for episode in 0..episodes {
        if episode % interval == 0 {
            on_progress(episode, episodes);
        }
        let reward = run_episode(rng);
        if reward > 0.0 {
            successes += 1;
        }
        rewards.push(reward);
    }

    if episodes == 0 {
        return AgentTrainingOutcome::default();
    }

    let total_reward: f64 = rewards.iter().sum();
    AgentTrainingOutcome {
        total_reward,
        average_reward: total_reward / episodes as f64,
        success_rate: successes as f64 / episodes as f64 * 100.0,
        rewards,
    }
}

/// Walk from the start toward the bottom-right corner of a `size` grid.
///
/// Each step moves down a row with probability [`ROW_BIAS`] (across a column
/// once the last row is reached), otherwise across a column first. The walk
/// ignores obstacles and stops after `2 × size` positions.
pub fn agent_path<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Pos> {
    let last = size.saturating_sub(1);
    let (mut row, mut col) = (0, 0);
    let mut path = vec![(row, col)];

    while row < last || col < last {
        let rows_first = rng.gen_bool(ROW_BIAS);
        if rows_first {
            if row < last {
                row += 1;
            } else {
                col += 1;
            }
        } else if col < last {
            col += 1;
        } else {
            row += 1;
        }

        path.push((row, col));
        if path.len() > size * 2 {
            break;
        }
    }
    path
}
