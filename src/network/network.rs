use crate::layers::dense::Layer;
use crate::network::spec::{LayerSpec, Topology};

#[derive(Debug, Clone)]
pub struct Network {
    pub layers: Vec<Layer>,
    topology: Topology,
}

impl Network {
    pub fn new(topology: Topology) -> Network {
        let layers = topology.layer_specs().into_iter()
            .map(|LayerSpec { size, input_size, activation }| Layer::new(size, input_size, activation))
            .collect();
        Network { layers, topology }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Forward pass; stores activations in each layer for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &mut self.layers {
            current = layer.feed_from(&current);
        }
        current
    }

    /// Index of the highest-activation output neuron.
    pub fn winner(&mut self, input: &[f64]) -> usize {
        argmax(&self.forward(input))
    }

    /// Re-randomizes every layer.
    pub fn reset(&mut self) {
        self.layers.iter_mut().for_each(Layer::reinitialize);
    }
}

/// Index of the maximum element in a slice; the first one on ties.
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if b >= x => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_matches_output_size() {
        let mut net = Network::new(Topology::feed_forward(6, 4, 3, 2, true));
        assert_eq!(net.layers.len(), 3);
        assert_eq!(net.forward(&[0.0; 6]).len(), 2);
    }

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.1, 0.9, 0.9]), 1);
        assert_eq!(argmax(&[-1.0, -2.0]), 0);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn test_reset_keeps_shape() {
        let mut net = Network::new(Topology::feed_forward(3, 2, 0, 2, true));
        net.reset();
        assert_eq!(net.layers[0].weights.rows, 3);
        assert_eq!(net.layers[1].size, 2);
    }
}
