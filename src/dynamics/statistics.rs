use crate::defaults::{FLOPS_PER_INTERACTION, FLOPS_PER_PARTICLE};
use crate::error::{NbodyError, Result};
use serde::{Deserialize, Serialize};

/// Ordered pairs evaluated per step, self pairs excluded: n (n - 1).
pub fn interaction_count(n_particles: usize) -> f64 {
    let n: f64 = n_particles as f64;
    n * n_particles.saturating_sub(1) as f64
}

/// Estimated work of one step in GFLOP.
pub fn gflop_count(n_particles: usize) -> f64 {
    (FLOPS_PER_INTERACTION * interaction_count(n_particles)
        + FLOPS_PER_PARTICLE * n_particles as f64)
        * 1e-9
}

pub fn interaction_rate(n_particles: usize, elapsed: f64) -> f64 {
    interaction_count(n_particles) / elapsed
}

pub fn gflop_rate(n_particles: usize, elapsed: f64) -> f64 {
    gflop_count(n_particles) / elapsed
}

/// Timing of a single integrator call.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StepMetrics {
    pub step: usize,
    pub elapsed: f64,
    pub interactions_per_second: f64,
    pub gflops: f64,
    pub warmup: bool,
}

impl StepMetrics {
    pub fn new(step: usize, n_particles: usize, elapsed: f64, warmup: bool) -> StepMetrics {
        StepMetrics {
            step,
            elapsed,
            interactions_per_second: interaction_rate(n_particles, elapsed),
            gflops: gflop_rate(n_particles, elapsed),
            warmup,
        }
    }
}

/// Running sums of the measured rates.
#[derive(Clone, Debug, Default)]
pub struct RunStatistics {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl RunStatistics {
    pub fn new() -> Self {
        RunStatistics::default()
    }

    pub fn record(&mut self, rate: f64) {
        self.sum += rate;
        self.sum_sq += rate * rate;
        self.count += 1;
    }

    pub fn finalize(&self) -> Result<Summary> {
        if self.count == 0 {
            return Err(NbodyError::NoSamples);
        }
        let count: f64 = self.count as f64;
        let mean: f64 = self.sum / count;
        // round-off can push a zero variance slightly below zero
        let variance: f64 = (self.sum_sq / count - mean * mean).max(0.0);
        Ok(Summary {
            mean,
            std_dev: variance.sqrt(),
            samples: self.count,
        })
    }
}

/// Mean and standard deviation of the post warm-up GFLOP rates.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub samples: usize,
}
