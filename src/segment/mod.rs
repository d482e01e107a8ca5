pub mod segmenter;

pub use segmenter::{ColumnSegmenter, Segmenter};
