use std::time::Instant;

use tracing::{debug, info};

use crate::dataset::builder::TrainingSet;
use crate::engine::model::Model;
use crate::error::{PipelineError, Result};
use crate::train::iteration_stats::{IterationStats, TrainReport};
use crate::train::monitor::TrainingMonitor;
use crate::train::train_config::TrainConfig;

/// Trains `model` on `set` until `config.budget` elapses or the monitor asks
/// to stop. At least one iteration always runs.
///
/// After every iteration the reset strategy sees the error and may
/// re-randomize the model; training then simply continues. The clock is only
/// checked between iterations.
pub fn train_loop(
    model: &mut dyn Model,
    set: &TrainingSet,
    config: &TrainConfig,
    monitor: &mut dyn TrainingMonitor,
) -> Result<TrainReport> {
    if set.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    let mut strategy = config.strategy.clone();
    let started = Instant::now();
    let mut iteration = 0;
    let mut resets = 0;
    let mut error;

    loop {
        iteration += 1;
        error = model.iteration(set);

        let reset = strategy.post_iteration(error);
        if reset {
            model.reset();
            resets += 1;
            info!(iteration, error, "training stalled, network reset");
        }

        let elapsed = started.elapsed();
        let remaining = config.budget.saturating_sub(elapsed);
        let stats = IterationStats { iteration, error, elapsed, remaining, reset };
        debug!(iteration, error, elapsed_ms = elapsed.as_millis() as u64, "iteration complete");

        if !monitor.on_iteration(&stats)? || remaining.is_zero() {
            break;
        }
    }

    Ok(TrainReport { iterations: iteration, resets, final_error: error, elapsed: started.elapsed() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builder::TrainingExample;
    use crate::train::train_config::TrainMode;
    use std::path::Path;

    /// Error follows a fixed script; counts resets.
    struct ScriptedModel {
        errors: Vec<f64>,
        calls: usize,
        resets: usize,
    }

    impl Model for ScriptedModel {
        fn iteration(&mut self, _set: &TrainingSet) -> f64 {
            let e = self.errors[self.calls.min(self.errors.len() - 1)];
            self.calls += 1;
            e
        }
        fn reset(&mut self) {
            self.resets += 1;
        }
        fn winner(&mut self, _input: &[f64]) -> usize {
            0
        }
        fn describe(&self) -> String {
            "scripted".into()
        }
    }

    struct StopAfter(usize);

    impl TrainingMonitor for StopAfter {
        fn on_iteration(&mut self, stats: &IterationStats) -> std::io::Result<bool> {
            Ok(stats.iteration < self.0)
        }
    }

    fn one_example() -> TrainingSet {
        let mut set = TrainingSet::new();
        set.add(TrainingExample { input: vec![0.0], ideal: vec![1.0] }, Path::new("mem")).unwrap();
        set
    }

    #[test]
    fn test_zero_budget_runs_one_iteration() {
        let mut model = ScriptedModel { errors: vec![0.5], calls: 0, resets: 0 };
        let config = TrainConfig::new(TrainMode::Console, 0, 0.1, 10);
        let report = train_loop(&mut model, &one_example(), &config, &mut StopAfter(usize::MAX)).unwrap();
        assert_eq!(report.iterations, 1);
        assert_eq!(report.final_error, 0.5);
        assert_eq!(model.calls, 1);
    }

    #[test]
    fn test_reset_strategy_fires_without_stopping() {
        let mut model = ScriptedModel { errors: vec![0.9, 0.9, 0.9, 0.9, 0.05, 0.05], calls: 0, resets: 0 };
        let config = TrainConfig::new(TrainMode::Console, 10, 0.25, 2);
        let report = train_loop(&mut model, &one_example(), &config, &mut StopAfter(6)).unwrap();
        assert_eq!(report.iterations, 6);
        assert_eq!(report.resets, 2);
        assert_eq!(model.resets, 2);
        assert_eq!(report.final_error, 0.05);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let mut model = ScriptedModel { errors: vec![0.0], calls: 0, resets: 0 };
        let config = TrainConfig::new(TrainMode::Console, 0, 0.1, 1);
        let err = train_loop(&mut model, &TrainingSet::new(), &config, &mut StopAfter(1)).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset));
        assert_eq!(model.calls, 0);
    }
}
