pub mod feed_forward;
pub mod model;

pub use feed_forward::{FeedForward, SgdEngine};
pub use model::{Model, ModelFactory};
