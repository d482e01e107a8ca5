pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len().max(1) as f64;
        predicted.iter().zip(expected)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Per-output gradient: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected)
            .map(|(a, b)| a - b)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bipolar_miss() {
        // Fully wrong bipolar prediction: every term is (±2)².
        assert!((MseLoss::loss(&[-1.0, 1.0], &[1.0, -1.0]) - 4.0).abs() < 1e-12);
        assert_eq!(MseLoss::derivative(&[0.5, 0.0], &[1.0, -1.0]), vec![-0.5, 1.0]);
    }
}
