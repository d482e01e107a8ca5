pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod engine;
pub mod train;
pub mod labels;
pub mod downsample;
pub mod dataset;
pub mod segment;
pub mod recognize;
pub mod script;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{Network, Topology};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use engine::{FeedForward, Model, ModelFactory, SgdEngine};
pub use train::{train_loop, TrainConfig, TrainMode, TrainReport, TrainingDialog};
pub use labels::LabelRegistry;
pub use downsample::{DownsampleKind, DownsamplePolicy};
pub use dataset::{ImageLoader, LabeledImageRef, TrainingSet};
pub use segment::{ColumnSegmenter, Segmenter};
pub use recognize::{Recognition, ReservedTokens, SegmentClassifier};
pub use script::{Collaborators, Interpreter};
pub use config::PipelineConfig;
pub use error::PipelineError;
