use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Describes one layer in a network topology.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (the output
///                  size of the previous layer, or the raw input dimension for
///                  the first layer)
/// - `activation` — activation function applied after the linear transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: ActivationFunction,
}

/// A feed-forward topology: input width, zero or more hidden layers, and the
/// output width. Rendered as JSON when a network is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub input_size: usize,
    pub hidden: Vec<usize>,
    pub output_size: usize,
    pub activation: ActivationFunction,
}

impl Topology {
    /// Builds a topology with up to two hidden layers. A hidden layer is only
    /// added when its size is positive, so `hidden2 = 0` gives a single hidden
    /// layer and `hidden1 = hidden2 = 0` connects input straight to output.
    ///
    /// `tanh` selects bipolar (tanh) activations, otherwise sigmoid.
    pub fn feed_forward(
        input_size: usize,
        hidden1: usize,
        hidden2: usize,
        output_size: usize,
        tanh: bool,
    ) -> Topology {
        let activation = if tanh { ActivationFunction::Tanh } else { ActivationFunction::Sigmoid };
        Topology {
            input_size,
            hidden: [hidden1, hidden2].into_iter().filter(|&h| h > 0).collect(),
            output_size,
            activation,
        }
    }

    /// Expands the topology into per-layer specs, input → output.
    pub fn layer_specs(&self) -> Vec<LayerSpec> {
        let mut specs = Vec::with_capacity(self.hidden.len() + 1);
        let mut fan_in = self.input_size;
        for &size in self.hidden.iter().chain(std::iter::once(&self.output_size)) {
            specs.push(LayerSpec { size, input_size: fan_in, activation: self.activation });
            fan_in = size;
        }
        specs
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hidden_layer_when_hidden2_is_zero() {
        let t = Topology::feed_forward(768, 100, 0, 6, true);
        assert_eq!(t.hidden, vec![100]);
        let specs = t.layer_specs();
        assert_eq!(specs.len(), 2);
        assert_eq!((specs[0].input_size, specs[0].size), (768, 100));
        assert_eq!((specs[1].input_size, specs[1].size), (100, 6));
    }

    #[test]
    fn test_no_hidden_layers() {
        let t = Topology::feed_forward(4, 0, 0, 2, false);
        let specs = t.layer_specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].activation, ActivationFunction::Sigmoid);
    }

    #[test]
    fn test_two_hidden_layers_chain() {
        let specs = Topology::feed_forward(10, 8, 4, 3, true).layer_specs();
        let shapes: Vec<(usize, usize)> = specs.iter().map(|s| (s.input_size, s.size)).collect();
        assert_eq!(shapes, vec![(10, 8), (8, 4), (4, 3)]);
    }

    #[test]
    fn test_json_description() {
        let json = Topology::feed_forward(4, 3, 0, 2, true).to_json();
        assert!(json.contains("\"hidden\":[3]"));
        assert!(json.contains("\"activation\":\"tanh\""));
    }
}
