pub mod policy;

pub use policy::{DownsampleKind, DownsamplePolicy, COLOR_TOKEN};
