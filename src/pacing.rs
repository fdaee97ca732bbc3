use std::collections::VecDeque;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Paced effect queues
// ---------------------------------------------------------------------------

/// A queue of effects, each followed by a hold before the next one is due.
///
/// Nothing here reads a clock: callers feed elapsed time through
/// [`Paced::advance`], which makes a paced run instant to drive in tests.
#[derive(Debug, Clone)]
pub struct Paced<E> {
    steps: VecDeque<(E, Duration)>,
    /// Time that must still be banked before the next step is due.
    hold: Duration,
    banked: Duration,
}

impl<E> Default for Paced<E> {
    fn default() -> Self {
        Self {
            steps: VecDeque::new(),
            hold: Duration::ZERO,
            banked: Duration::ZERO,
        }
    }
}

impl<E> Paced<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty queue whose first step only becomes due after `delay`.
    pub fn after(delay: Duration) -> Self {
        Self {
            hold: delay,
            ..Self::default()
        }
    }

    /// Append `effect`, followed by `hold` before the next step.
    pub fn then(mut self, effect: E, hold: Duration) -> Self {
        self.push(effect, hold);
        self
    }

    pub fn push(&mut self, effect: E, hold: Duration) {
        self.steps.push_back((effect, hold));
    }

    /// Bank `elapsed` and return every effect that became due, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<E> {
        self.banked += elapsed;
        let mut due = Vec::new();
        while self.banked >= self.hold {
            self.banked -= self.hold;
            self.hold = Duration::ZERO;
            let Some((effect, hold)) = self.steps.pop_front() else {
                break;
            };
            due.push(effect);
            self.hold = hold;
        }
        due
    }

    /// All effects were emitted and the final hold has elapsed.
    pub fn is_finished(&self) -> bool {
        self.steps.is_empty() && self.banked >= self.hold
    }

    /// Time until the next effect (or the end of the final hold).
    pub fn remaining_hold(&self) -> Duration {
        self.hold.saturating_sub(self.banked)
    }

    /// Number of effects not yet emitted.
    pub fn pending(&self) -> usize {
        self.steps.len()
    }
}

/// Percentages `0, step, 2·step, …` up to and including 100 when reachable.
pub fn percent_stops(step: u32) -> Vec<f64> {
    (0..=100u32)
        .step_by(step.max(1) as usize)
        .map(f64::from)
        .collect()
}
