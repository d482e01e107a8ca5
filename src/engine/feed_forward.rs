use rand::seq::SliceRandom;

use crate::dataset::builder::TrainingSet;
use crate::engine::model::{Model, ModelFactory};
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::spec::Topology;
use crate::optim::sgd::Sgd;

/// Mini-batch SGD over the crate's own feed-forward network.
pub struct FeedForward {
    network: Network,
    optimizer: Sgd,
    batch_size: usize,
}

impl FeedForward {
    pub fn new(topology: Topology, optimizer: Sgd, batch_size: usize) -> FeedForward {
        FeedForward { network: Network::new(topology), optimizer, batch_size: batch_size.max(1) }
    }
}

impl Model for FeedForward {
    /// One epoch of mini-batch SGD in shuffled order; returns mean MSE.
    fn iteration(&mut self, set: &TrainingSet) -> f64 {
        let examples = set.examples();
        let n = examples.len();
        if n == 0 {
            return 0.0;
        }
        let mut total_loss = 0.0;

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rand::thread_rng());

        for batch in indices.chunks(self.batch_size) {
            let mut acc_grads: Vec<(Matrix, Vec<f64>)> = self.network.layers.iter()
                .map(|layer| (Matrix::zeros(layer.weights.rows, layer.weights.cols), vec![0.0; layer.size]))
                .collect();

            for &idx in batch {
                let example = &examples[idx];
                let output = self.network.forward(&example.input);
                total_loss += MseLoss::loss(&output, &example.ideal);

                let mut error = MseLoss::derivative(&output, &example.ideal);
                for (layer, (w_grad, b_grad)) in self.network.layers.iter().zip(acc_grads.iter_mut()).rev() {
                    error = layer.accumulate_gradients(&error, w_grad, b_grad);
                }
            }

            let inv_batch = 1.0 / batch.len() as f64;
            for (layer, (mut w_grad, mut b_grad)) in self.network.layers.iter_mut().zip(acc_grads) {
                w_grad.scale(inv_batch);
                b_grad.iter_mut().for_each(|g| *g *= inv_batch);
                self.optimizer.step(layer, &w_grad, &b_grad);
            }
        }

        total_loss / n as f64
    }

    fn reset(&mut self) {
        self.network.reset();
    }

    fn winner(&mut self, input: &[f64]) -> usize {
        self.network.winner(input)
    }

    fn describe(&self) -> String {
        self.network.topology().to_json()
    }
}

/// Builds [`FeedForward`] models with shared optimizer settings.
#[derive(Debug, Clone, Copy)]
pub struct SgdEngine {
    pub learning_rate: f64,
    pub momentum: f64,
    pub batch_size: usize,
}

impl ModelFactory for SgdEngine {
    fn build(&self, topology: &Topology) -> Box<dyn Model> {
        Box::new(FeedForward::new(
            topology.clone(),
            Sgd::new(self.learning_rate, self.momentum),
            self.batch_size,
        ))
    }
}
