pub mod network;
pub mod spec;

pub use network::{argmax, Network};
pub use spec::{LayerSpec, Topology};
