pub mod classifier;

pub use classifier::{assemble, Recognition, ReservedTokens, SegmentClassifier};
