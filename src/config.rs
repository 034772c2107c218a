//! Hyperparameter configuration.
//!
//! [`MlpConfig`] is the validated boundary between whatever produced the
//! settings (a config file, CLI flags, test code) and the network itself.
//! Parsing lives outside this crate; this module only checks the values and
//! derives the layer topology from them.

use crate::{Error, Result};

/// Hyperparameters for building and training a network.
#[derive(Debug, Clone)]
pub struct MlpConfig {
    /// Feature count of one input sample.
    pub input_dim: usize,
    /// Number of output classes.
    pub n_classes: usize,
    /// Number of hidden layers (may be zero).
    pub hidden_layers: usize,
    /// Width of every hidden layer.
    pub hidden_dim: usize,
    /// Gradient-descent step size.
    pub learning_rate: f32,
    /// Full passes over the training set.
    pub epochs: usize,
    /// Share of the dataset held out for testing, in `(0, 1)`.
    pub test_fraction: f32,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self {
            input_dim: 4,
            n_classes: 3,
            hidden_layers: 1,
            hidden_dim: 10,
            learning_rate: 0.01,
            epochs: 500,
            test_fraction: 0.4,
        }
    }
}

impl MlpConfig {
    /// Check every hyperparameter.
    ///
    /// Invalid values are configuration defects; nothing is clamped or
    /// defaulted.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 {
            return Err(Error::InvalidConfig("input_dim must be > 0".to_owned()));
        }
        if self.n_classes == 0 {
            return Err(Error::InvalidConfig("n_classes must be > 0".to_owned()));
        }
        if self.hidden_layers > 0 && self.hidden_dim == 0 {
            return Err(Error::InvalidConfig("hidden_dim must be > 0".to_owned()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(
                "learning rate must be finite and > 0".to_owned(),
            ));
        }
        if self.epochs == 0 {
            return Err(Error::InvalidConfig("epochs must be > 0".to_owned()));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }

    /// Layer-width sequence `[input_dim, hidden_dim, .., hidden_dim, n_classes]`.
    pub fn layer_dims(&self) -> Vec<usize> {
        let mut dims = Vec::with_capacity(self.hidden_layers + 2);
        dims.push(self.input_dim);
        dims.extend(std::iter::repeat(self.hidden_dim).take(self.hidden_layers));
        dims.push(self.n_classes);
        dims
    }
}
