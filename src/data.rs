//! Typed dataset handling.
//!
//! The training core consumes ready-made [`Sample`] records: a fixed-width
//! feature vector plus an owned class label and its derived class index.
//! This module produces them from a CSV file (one sample per line, features
//! first, label last), normalizes feature vectors to unit Euclidean norm, and
//! splits a dataset into train/test subsets with a caller-provided generator.

use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Result};

/// One dataset row.
///
/// Samples are immutable after loading. The label is owned by value; no two
/// samples share a label buffer.
#[derive(Debug, Clone)]
pub struct Sample {
    /// Feature vector, width equal to the dataset's `input_dim`.
    pub features: Vec<f32>,
    /// Original class label text.
    pub label: String,
    /// Index of the label in the dataset's class list.
    pub class_index: usize,
}

/// An ordered collection of samples with a shared schema.
#[derive(Debug, Clone)]
pub struct Dataset {
    samples: Vec<Sample>,
    input_dim: usize,
    /// Distinct labels in first-seen order; `Sample::class_index` points here.
    class_names: Vec<String>,
}

impl Dataset {
    /// Load a dataset from a CSV file.
    ///
    /// Each non-blank line holds `input_dim` numeric fields followed by a
    /// class label as the last field. The label-to-index mapping is derived
    /// in first-seen order.
    pub fn from_csv<P: AsRef<Path>>(path: P, input_dim: usize) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse_csv(&contents, input_dim)
    }

    /// Parse CSV text. See [`Dataset::from_csv`] for the expected schema.
    pub fn parse_csv(contents: &str, input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }

        let mut samples = Vec::new();
        let mut class_names: Vec<String> = Vec::new();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < input_dim + 1 {
                return Err(Error::InvalidData(format!(
                    "line {}: expected {} fields, got {}",
                    lineno + 1,
                    input_dim + 1,
                    fields.len()
                )));
            }

            let mut features = Vec::with_capacity(input_dim);
            for field in &fields[..input_dim] {
                let value: f32 = field.trim().parse().map_err(|_| {
                    Error::InvalidData(format!(
                        "line {}: '{}' is not a number",
                        lineno + 1,
                        field.trim()
                    ))
                })?;
                features.push(value);
            }

            let label = fields[fields.len() - 1].trim();
            if label.is_empty() {
                return Err(Error::InvalidData(format!(
                    "line {}: empty class label",
                    lineno + 1
                )));
            }

            let class_index = match class_names.iter().position(|c| c == label) {
                Some(idx) => idx,
                None => {
                    class_names.push(label.to_owned());
                    class_names.len() - 1
                }
            };

            samples.push(Sample {
                features,
                label: label.to_owned(),
                class_index,
            });
        }

        if samples.is_empty() {
            return Err(Error::InvalidData("dataset has no samples".to_owned()));
        }

        Ok(Self {
            samples,
            input_dim,
            class_names,
        })
    }

    /// Build a dataset from in-memory rows and their labels.
    pub fn from_labeled_rows(rows: &[Vec<f32>], labels: &[&str]) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(Error::InvalidData(format!(
                "rows/labels length mismatch: {} vs {}",
                rows.len(),
                labels.len()
            )));
        }
        if rows.is_empty() {
            return Err(Error::InvalidData("dataset has no samples".to_owned()));
        }

        let input_dim = rows[0].len();
        if input_dim == 0 {
            return Err(Error::InvalidData("input_dim must be > 0".to_owned()));
        }

        let mut samples = Vec::with_capacity(rows.len());
        let mut class_names: Vec<String> = Vec::new();

        for (i, (row, &label)) in rows.iter().zip(labels).enumerate() {
            if row.len() != input_dim {
                return Err(Error::InvalidData(format!(
                    "row {i} has len {}, expected {input_dim}",
                    row.len()
                )));
            }

            let class_index = match class_names.iter().position(|c| c == label) {
                Some(idx) => idx,
                None => {
                    class_names.push(label.to_owned());
                    class_names.len() - 1
                }
            };

            samples.push(Sample {
                features: row.clone(),
                label: label.to_owned(),
                class_index,
            });
        }

        Ok(Self {
            samples,
            input_dim,
            class_names,
        })
    }

    /// Scale every sample to unit Euclidean norm in place.
    ///
    /// Returns `InvalidData` if any sample is all-zero; a zero norm cannot
    /// be scaled.
    pub fn normalize(&mut self) -> Result<()> {
        for (i, sample) in self.samples.iter_mut().enumerate() {
            let norm = sample
                .features
                .iter()
                .map(|&v| v * v)
                .sum::<f32>()
                .sqrt();
            if norm == 0.0 {
                return Err(Error::InvalidData(format!("sample {i} has zero norm")));
            }
            for v in sample.features.iter_mut() {
                *v /= norm;
            }
        }
        Ok(())
    }

    /// Shuffle with `rng` and split into `(train, test)` subsets.
    ///
    /// The test subset receives `floor(len * test_fraction)` samples. Both
    /// subsets must end up non-empty; otherwise this is `InvalidData`.
    /// Identical generator states produce identical partitions.
    pub fn split_with_rng<R: Rng + ?Sized>(
        &self,
        test_fraction: f32,
        rng: &mut R,
    ) -> Result<(Dataset, Dataset)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "test_fraction must be in (0, 1), got {test_fraction}"
            )));
        }

        let len = self.samples.len();
        let test_len = (len as f32 * test_fraction) as usize;
        if test_len == 0 || test_len == len {
            return Err(Error::InvalidData(format!(
                "cannot split {len} samples with test_fraction {test_fraction}"
            )));
        }

        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(rng);

        let subset = |picked: &[usize]| Dataset {
            samples: picked.iter().map(|&i| self.samples[i].clone()).collect(),
            input_dim: self.input_dim,
            class_names: self.class_names.clone(),
        };

        let test = subset(&indices[..test_len]);
        let train = subset(&indices[test_len..]);
        Ok((train, test))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Number of distinct classes seen in the data.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.class_names.len()
    }

    #[inline]
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Returns the `idx`-th sample. Panics if `idx >= len`.
    #[inline]
    pub fn sample(&self, idx: usize) -> &Sample {
        &self.samples[idx]
    }
}
