pub mod dialog;
pub mod iteration_stats;
pub mod loop_fn;
pub mod monitor;
pub mod reset_strategy;
pub mod train_config;

pub use dialog::{TerminalDialog, TrainingDialog};
pub use iteration_stats::{IterationStats, TrainReport};
pub use loop_fn::train_loop;
pub use monitor::{ConsoleMonitor, LiveMonitor, TrainingMonitor};
pub use reset_strategy::ResetStrategy;
pub use train_config::{TrainConfig, TrainMode};
