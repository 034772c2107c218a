//! Network topology, forward propagation, and backpropagation.
//!
//! A [`Network`] owns an ordered sequence of `L` layer widths, `L - 1` weight
//! matrices, `L - 1` gradient accumulators of the same shapes, and `L` cached
//! activation rows. The caches are a required side effect of
//! [`Network::forward`]: backpropagation reads every one of them.
//!
//! No bias term is modeled. Inputs are expected to be meaningfully scaled
//! already (see [`crate::Dataset::normalize`]).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Error, Matrix, MlpConfig, Result};

#[derive(Debug, Clone)]
pub struct Network {
    /// Layer widths `[input, hidden.., output]`, at least two entries.
    dims: Vec<usize>,
    /// `weights[i]` has shape `(dims[i], dims[i + 1])`.
    weights: Vec<Matrix>,
    /// Same shapes as `weights`, rewritten by every backward pass.
    derivatives: Vec<Matrix>,
    /// `activations[i]` is the `(1, dims[i])` cache of the last forward pass.
    activations: Vec<Matrix>,
    /// Learning rate.
    alpha: f32,
}

impl Network {
    /// Build a network with weights drawn uniformly from `[0, 1)` using a
    /// seeded generator.
    pub fn new_with_seed(dims: &[usize], alpha: f32, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(dims, alpha, &mut rng)
    }

    /// Build a network using the caller's generator.
    ///
    /// The generator is only read here; the network never reseeds or stores
    /// it, so identical generator states produce identical weights.
    pub fn new_with_rng<R: Rng + ?Sized>(dims: &[usize], alpha: f32, rng: &mut R) -> Result<Self> {
        if dims.len() < 2 {
            return Err(Error::InvalidConfig(
                "layer dims must include input and output widths".to_owned(),
            ));
        }
        if dims.contains(&0) {
            return Err(Error::InvalidConfig(
                "all layer dims must be > 0".to_owned(),
            ));
        }
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(Error::InvalidConfig(
                "learning rate must be finite and > 0".to_owned(),
            ));
        }

        let weights = dims
            .windows(2)
            .map(|w| Matrix::random(w[0], w[1], rng))
            .collect();
        let derivatives = dims.windows(2).map(|w| Matrix::zeros(w[0], w[1])).collect();
        let activations = dims.iter().map(|&d| Matrix::zeros(1, d)).collect();

        Ok(Self {
            dims: dims.to_vec(),
            weights,
            derivatives,
            activations,
            alpha,
        })
    }

    /// Build a network from a validated configuration.
    pub fn from_config<R: Rng + ?Sized>(cfg: &MlpConfig, rng: &mut R) -> Result<Self> {
        cfg.validate()?;
        Self::new_with_rng(&cfg.layer_dims(), cfg.learning_rate, rng)
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.dims[0]
    }

    #[inline]
    pub fn output_dim(&self) -> usize {
        *self.dims.last().expect("network has at least two layers")
    }

    /// Number of layers `L`, counting input and output.
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn layer_dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn weights(&self, i: usize) -> &Matrix {
        &self.weights[i]
    }

    #[inline]
    pub fn weights_mut(&mut self, i: usize) -> &mut Matrix {
        &mut self.weights[i]
    }

    #[inline]
    pub fn derivatives(&self, i: usize) -> &Matrix {
        &self.derivatives[i]
    }

    /// Output activation of the most recent forward pass.
    #[inline]
    pub fn output(&self) -> &Matrix {
        self.activations
            .last()
            .expect("network has at least two layers")
    }

    /// Forward propagation for one sample.
    ///
    /// Loads `features` into the input activation, then computes
    /// `activations[i + 1] = sigmoid(activations[i] . weights[i])` for every
    /// layer. Returns the output row and leaves every intermediate activation
    /// cached for [`Network::backward`].
    ///
    /// Panics unless `features.len() == self.input_dim()`.
    pub fn forward(&mut self, features: &[f32]) -> &[f32] {
        assert_eq!(
            features.len(),
            self.input_dim(),
            "input len {} does not match network input_dim {}",
            features.len(),
            self.input_dim()
        );

        self.activations[0].as_mut_slice().copy_from_slice(features);
        for i in 0..self.weights.len() {
            let mut next = self.activations[i].dot(&self.weights[i]);
            next.sigmoid();
            self.activations[i + 1] = next;
        }
        self.output().as_slice()
    }

    /// Backpropagation for one sample.
    ///
    /// `output_error` is the `(1, output_dim)` error signal at the output
    /// layer, `output - one_hot(target)`. Walking layers in reverse, this
    /// computes each weight-gradient matrix into `self.derivatives` and
    /// carries the error signal one layer back per iteration:
    ///
    /// - `delta = error (*) sigmoid_derivative(activations[i + 1])`
    /// - `derivatives[i] = activations[i]^T . delta`
    /// - `error = delta . weights[i]^T`
    ///
    /// Weights are left untouched; the update is a separate step
    /// ([`Network::apply_gradients`]).
    ///
    /// Panics unless `output_error` is a `(1, output_dim)` row. You must call
    /// [`Network::forward`] first so the activation caches are populated.
    pub fn backward(&mut self, output_error: Matrix) {
        assert!(
            output_error.rows() == 1 && output_error.cols() == self.output_dim(),
            "output error shape ({}, {}) does not match (1, {})",
            output_error.rows(),
            output_error.cols(),
            self.output_dim()
        );

        let mut error = output_error;
        for i in (0..self.weights.len()).rev() {
            let delta = error.hadamard(&self.activations[i + 1].sigmoid_derivative());
            self.derivatives[i] = self.activations[i].to_column().dot(&delta);
            error = delta.dot(&self.weights[i].transpose());
        }
    }

    /// Gradient-descent weight update.
    ///
    /// Moves every weight by `-alpha * derivatives[i]`, descending the
    /// squared-error surface. The derivative buffers are consumed (scaled in
    /// place); the next backward pass rewrites them.
    pub fn apply_gradients(&mut self) {
        for i in 0..self.weights.len() {
            self.derivatives[i].scale(-self.alpha);
            self.weights[i].add_assign(&self.derivatives[i]);
        }
    }
}
