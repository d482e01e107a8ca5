use crate::{math::matrix::Matrix, layers::dense::Layer};

/// Stochastic gradient descent with classical momentum.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64, momentum: f64) -> Sgd {
        Sgd { learning_rate, momentum }
    }

    /// Applies one update to a layer: `v = μv - η·g`, `w += v`.
    pub fn step(&self, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &[f64]) {
        layer.weight_velocity.scale(self.momentum);
        layer.weight_velocity.add_scaled(weights_grad, -self.learning_rate);
        let velocity = layer.weight_velocity.clone();
        layer.weights.add_scaled(&velocity, 1.0);

        for ((b, v), g) in layer.biases.iter_mut().zip(layer.bias_velocity.iter_mut()).zip(biases_grad) {
            *v = self.momentum * *v - self.learning_rate * g;
            *b += *v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationFunction;

    #[test]
    fn test_step_moves_against_gradient() {
        let mut layer = Layer::new(1, 1, ActivationFunction::Tanh);
        let before = layer.weights[(0, 0)];
        let grad = Matrix::from_rows(vec![vec![1.0]]);
        Sgd::new(0.5, 0.0).step(&mut layer, &grad, &[2.0]);
        assert!((layer.weights[(0, 0)] - (before - 0.5)).abs() < 1e-12);
        assert!((layer.biases[0] + 1.0).abs() < 1e-12);
    }
}
