use std::time::Duration;

/// Statistics for one completed training iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Training error (mean squared error over the set).
    pub error: f64,
    /// Wall-clock time since training began.
    pub elapsed: Duration,
    /// Time left in the budget; zero once exhausted.
    pub remaining: Duration,
    /// Whether the reset strategy re-randomized the model after this iteration.
    pub reset: bool,
}

/// Outcome of a complete training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub iterations: usize,
    pub resets: usize,
    pub final_error: f64,
    pub elapsed: Duration,
}
