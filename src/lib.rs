//! A small MLP (multi-layer perceptron) crate.
//!
//! `iris-mlp` is a from-scratch, single-threaded implementation of a dense
//! feed-forward classifier in the spirit of the classic Iris exercise: load a
//! CSV of labeled feature rows, normalize, split, train with online gradient
//! descent, and score argmax predictions on the held-out split.
//!
//! # Design goals
//!
//! - Clear contracts: shapes are explicit and validated at the API boundary.
//! - One numeric core: every routine goes through [`Matrix`], a dense
//!   row-major `f32` container; nothing else touches raw buffers.
//! - True online SGD: each sample triggers one full forward + backward +
//!   update cycle, in stored order. There is no mini-batching and no
//!   parallelism; the per-sample update order is part of the semantics.
//! - Explicit randomness: constructors take a generator (or a seed) and never
//!   reseed behind the caller's back, so runs are reproducible.
//!
//! # Panics vs `Result`
//!
//! This crate intentionally exposes two layers of API:
//!
//! - Low-level hot path (panics on misuse): [`Matrix`] arithmetic and
//!   [`Network::forward`] / [`Network::backward`]. Shape mismatches are
//!   treated as programmer error and abort via `assert!` with a diagnostic.
//! - High-level convenience APIs (validated): [`MlpConfig::validate`],
//!   [`Dataset`] constructors, [`Network::fit`], [`Network::evaluate`].
//!   These check inputs and return [`Result`]. Nothing is ever silently
//!   clamped or defaulted.
//!
//! # Quick start
//!
//! ```rust
//! use iris_mlp::{Dataset, Network};
//!
//! # fn main() -> iris_mlp::Result<()> {
//! let rows = vec![
//!     vec![0.9, 0.1],
//!     vec![0.1, 0.9],
//!     vec![0.8, 0.2],
//!     vec![0.2, 0.8],
//! ];
//! let labels = ["left", "right", "left", "right"];
//! let mut data = Dataset::from_labeled_rows(&rows, &labels)?;
//! data.normalize()?;
//!
//! let mut net = Network::new_with_seed(&[2, 4, 2], 0.5, 0)?;
//! let report = net.fit(&data, 200)?;
//! assert!(report.final_loss < report.epoch_losses[0]);
//!
//! let eval = net.evaluate(&data)?;
//! assert!(eval.accuracy > 0.5);
//! # Ok(())
//! # }
//! ```
//!
//! Deriving the topology from a configuration record instead:
//!
//! ```rust
//! use iris_mlp::{MlpConfig, Network};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> iris_mlp::Result<()> {
//! let cfg = MlpConfig {
//!     hidden_dim: 5,
//!     ..MlpConfig::default()
//! };
//! let mut rng = StdRng::seed_from_u64(7);
//! let net = Network::from_config(&cfg, &mut rng)?;
//! assert_eq!(net.layer_dims(), &[4, 5, 3]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod network;
pub mod train;

pub use config::MlpConfig;
pub use data::{Dataset, Sample};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use network::Network;
pub use train::{EvalReport, FitReport};
