use std::io;

use crate::dataset::builder::TrainingSet;
use crate::engine::model::Model;
use crate::error::Result;
use crate::train::iteration_stats::TrainReport;
use crate::train::loop_fn::train_loop;
use crate::train::monitor::LiveMonitor;
use crate::train::train_config::TrainConfig;

/// Interactive training front end used by `Train: mode:gui`.
pub trait TrainingDialog {
    fn train(&mut self, model: &mut dyn Model, set: &TrainingSet, config: &TrainConfig) -> Result<TrainReport>;
}

/// Runs the standard loop with a live progress line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalDialog;

impl TrainingDialog for TerminalDialog {
    fn train(&mut self, model: &mut dyn Model, set: &TrainingSet, config: &TrainConfig) -> Result<TrainReport> {
        let mut monitor = LiveMonitor::new(io::stderr().lock());
        let report = train_loop(model, set, config, &mut monitor)?;
        monitor.finish()?;
        Ok(report)
    }
}
