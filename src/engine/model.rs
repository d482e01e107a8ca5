use crate::dataset::builder::TrainingSet;
use crate::network::spec::Topology;

/// A trainable classifier as seen by the training loop and the recognizer.
///
/// One call to [`iteration`](Model::iteration) is an atomic unit of work;
/// the training loop only checks the clock between calls.
pub trait Model {
    /// Runs one full pass over `set` and returns the training error.
    fn iteration(&mut self, set: &TrainingSet) -> f64;

    /// Re-randomizes all trainable parameters.
    fn reset(&mut self);

    /// Index of the output with the highest activation for `input`.
    fn winner(&mut self, input: &[f64]) -> usize;

    fn describe(&self) -> String;
}

/// Constructs models for a topology.
pub trait ModelFactory {
    fn build(&self, topology: &Topology) -> Box<dyn Model>;
}
