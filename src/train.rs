//! Training loop, evaluation, and prediction.
//!
//! Training is online stochastic gradient descent: every sample triggers one
//! full forward + backward + weight-update cycle, in the stored dataset order,
//! with no reshuffling between epochs. The per-sample update order is part of
//! the semantics; the learned weights depend on it.

use crate::{metrics, Dataset, Error, Network, Result};

/// Outcome of [`Network::fit`].
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Mean per-sample squared output error of each epoch, in order.
    pub epoch_losses: Vec<f32>,
    /// Last entry of `epoch_losses`.
    pub final_loss: f32,
}

/// Outcome of [`Network::evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct EvalReport {
    /// Fraction of samples whose argmax prediction matches the true class.
    pub accuracy: f32,
    /// Mean per-sample squared output error.
    pub mse: f32,
}

impl Network {
    /// Train on `train` for `epochs` full passes, mutating the weights in
    /// place.
    ///
    /// Per sample: forward propagate, form the output error
    /// `output - one_hot(class)`, backpropagate, and apply the gradient
    /// step. Samples are visited in stored order every epoch.
    pub fn fit(&mut self, train: &Dataset, epochs: usize) -> Result<FitReport> {
        self.check_dataset(train)?;
        if epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }

        let mut epoch_losses = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            let mut epoch_loss = 0.0_f32;
            for sample in train.samples() {
                let output = self.forward(&sample.features);
                epoch_loss += metrics::squared_error(output, sample.class_index);

                let output_error = self.output().sub_one_hot(sample.class_index);
                self.backward(output_error);
                self.apply_gradients();
            }
            epoch_losses.push(epoch_loss / train.len() as f32);
        }

        let final_loss = *epoch_losses.last().expect("epochs > 0");
        Ok(FitReport {
            epoch_losses,
            final_loss,
        })
    }

    /// Score argmax predictions against the known labels of `data`.
    pub fn evaluate(&mut self, data: &Dataset) -> Result<EvalReport> {
        self.check_dataset(data)?;

        let mut hits = 0;
        let mut total_error = 0.0_f32;
        for sample in data.samples() {
            let output = self.forward(&sample.features);
            total_error += metrics::squared_error(output, sample.class_index);
            if metrics::argmax(output) == sample.class_index {
                hits += 1;
            }
        }

        Ok(EvalReport {
            accuracy: metrics::accuracy(hits, data.len()),
            mse: total_error / data.len() as f32,
        })
    }

    /// Predicted class for one sample: the argmax of the output row.
    ///
    /// Panics unless `features.len() == self.input_dim()`.
    pub fn predict(&mut self, features: &[f32]) -> usize {
        metrics::argmax(self.forward(features))
    }

    fn check_dataset(&self, data: &Dataset) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidData("dataset must not be empty".to_owned()));
        }
        if data.input_dim() != self.input_dim() {
            return Err(Error::InvalidShape(format!(
                "dataset input_dim {} does not match network input_dim {}",
                data.input_dim(),
                self.input_dim()
            )));
        }
        if data.n_classes() > self.output_dim() {
            return Err(Error::InvalidShape(format!(
                "dataset has {} classes, network outputs {}",
                data.n_classes(),
                self.output_dim()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rejects_mismatched_datasets() {
        let data = Dataset::from_labeled_rows(&[vec![0.1, 0.2, 0.3]], &["a"]).unwrap();
        let mut net = Network::new_with_seed(&[2, 3, 2], 0.1, 0).unwrap();
        assert!(net.fit(&data, 10).is_err());

        let three_classes =
            Dataset::from_labeled_rows(&[vec![0.1], vec![0.2], vec![0.3]], &["a", "b", "c"])
                .unwrap();
        let mut net = Network::new_with_seed(&[1, 3, 2], 0.1, 0).unwrap();
        assert!(net.fit(&three_classes, 10).is_err());
    }

    #[test]
    fn fit_rejects_zero_epochs() {
        let data = Dataset::from_labeled_rows(&[vec![0.1, 0.2]], &["a"]).unwrap();
        let mut net = Network::new_with_seed(&[2, 3, 2], 0.1, 0).unwrap();
        assert!(net.fit(&data, 0).is_err());
    }

    #[test]
    fn fit_reports_one_loss_per_epoch_and_learns() {
        let data = Dataset::from_labeled_rows(
            &[
                vec![0.9, 0.1],
                vec![0.8, 0.2],
                vec![0.1, 0.9],
                vec![0.2, 0.8],
            ],
            &["left", "left", "right", "right"],
        )
        .unwrap();

        let mut net = Network::new_with_seed(&[2, 4, 2], 0.5, 0).unwrap();
        let report = net.fit(&data, 200).unwrap();

        assert_eq!(report.epoch_losses.len(), 200);
        assert_eq!(report.final_loss, *report.epoch_losses.last().unwrap());
        assert!(
            report.final_loss < report.epoch_losses[0],
            "loss did not decrease: first={} final={}",
            report.epoch_losses[0],
            report.final_loss
        );
    }

    #[test]
    fn evaluate_scores_a_trained_network() {
        let data = Dataset::from_labeled_rows(
            &[
                vec![0.9, 0.1],
                vec![0.8, 0.2],
                vec![0.1, 0.9],
                vec![0.2, 0.8],
            ],
            &["left", "left", "right", "right"],
        )
        .unwrap();

        let mut net = Network::new_with_seed(&[2, 4, 2], 0.5, 0).unwrap();
        net.fit(&data, 500).unwrap();

        let eval = net.evaluate(&data).unwrap();
        assert!(eval.accuracy >= 0.95, "accuracy {}", eval.accuracy);
        assert!(eval.mse.is_finite());

        let first = data.sample(0);
        assert_eq!(net.predict(&first.features), first.class_index);
    }
}
