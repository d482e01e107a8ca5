use std::time::Duration;

use crate::train::reset_strategy::ResetStrategy;

/// How a `Train` command drives the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainMode {
    /// Iterate until the time budget elapses, printing progress lines.
    Console,
    /// Hand the loop to the interactive training dialog.
    Gui,
}

impl TrainMode {
    /// `gui` in any letter case selects the dialog; anything else is console.
    pub fn from_token(token: &str) -> TrainMode {
        if token.eq_ignore_ascii_case("gui") {
            TrainMode::Gui
        } else {
            TrainMode::Console
        }
    }
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `mode`     — console or interactive
/// - `budget`   — wall-clock limit; the loop always runs at least one iteration
/// - `strategy` — reset strategy consulted after every iteration
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub mode: TrainMode,
    pub budget: Duration,
    pub strategy: ResetStrategy,
}

impl TrainConfig {
    pub fn new(mode: TrainMode, minutes: u64, strategy_error: f64, strategy_cycles: usize) -> Self {
        TrainConfig {
            mode,
            budget: Duration::from_secs(minutes.saturating_mul(60)),
            strategy: ResetStrategy::new(strategy_error, strategy_cycles),
        }
    }
}
