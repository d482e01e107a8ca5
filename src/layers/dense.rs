use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer. Weights are laid out `input_size × size`.
#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
    inputs: Vec<f64>,
    pre_neurons: Vec<f64>,  // z = xW + b, needed for the derivative
    pub(crate) weight_velocity: Matrix,
    pub(crate) bias_velocity: Vec<f64>,
}

impl Layer {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        Layer {
            size,
            input_size,
            weights: Matrix::xavier(input_size, size),
            biases: vec![0.0; size],
            activator: activation,
            inputs: vec![0.0; input_size],
            pre_neurons: vec![0.0; size],
            weight_velocity: Matrix::zeros(input_size, size),
            bias_velocity: vec![0.0; size],
        }
    }

    /// Draws fresh weights and clears biases and optimizer velocity.
    pub fn reinitialize(&mut self) {
        self.weights = Matrix::xavier(self.input_size, self.size);
        self.biases.iter_mut().for_each(|b| *b = 0.0);
        self.weight_velocity.fill(0.0);
        self.bias_velocity.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Forward pass; remembers inputs and pre-activations for backprop.
    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let mut z = self.weights.vec_mul(input);
        for (zi, b) in z.iter_mut().zip(&self.biases) {
            *zi += b;
        }
        let a = z.iter().map(|&x| self.activator.function(x)).collect();
        self.inputs.clear();
        self.inputs.extend_from_slice(input);
        self.pre_neurons = z;
        a
    }

    /// Accumulates this layer's gradients for one sample.
    ///
    /// `output_error` is ∂L/∂a for this layer. Returns ∂L/∂a for the layer
    /// below (the error with respect to this layer's inputs).
    pub fn accumulate_gradients(
        &self,
        output_error: &[f64],
        weights_grad: &mut Matrix,
        biases_grad: &mut [f64],
    ) -> Vec<f64> {
        // δ = error ⊙ σ'(z)
        let delta: Vec<f64> = output_error.iter()
            .zip(&self.pre_neurons)
            .map(|(e, &z)| e * self.activator.derivative(z))
            .collect();

        weights_grad.add_outer(&self.inputs, &delta);
        for (g, d) in biases_grad.iter_mut().zip(&delta) {
            *g += d;
        }

        self.weights.mul_vec(&delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_from_output_size() {
        let mut layer = Layer::new(3, 5, ActivationFunction::Tanh);
        let out = layer.feed_from(&[0.1, -0.2, 0.3, 0.0, 1.0]);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|v| v.abs() < 1.0));
    }

    #[test]
    fn test_gradient_shapes() {
        let mut layer = Layer::new(2, 3, ActivationFunction::Sigmoid);
        layer.feed_from(&[1.0, 0.5, -0.5]);
        let mut wg = Matrix::zeros(3, 2);
        let mut bg = vec![0.0; 2];
        let back = layer.accumulate_gradients(&[1.0, -1.0], &mut wg, &mut bg);
        assert_eq!(back.len(), 3);
        assert!(bg.iter().any(|g| *g != 0.0));
    }
}
