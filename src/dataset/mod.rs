pub mod builder;
pub mod loader;

pub use builder::{bipolar_target, materialize, LabeledImageRef, TrainingExample, TrainingSet};
pub use loader::{FsImageLoader, ImageLoader};
