use crate::dynamics::clock::Clock;
use crate::dynamics::integrator::Integrator;
use crate::dynamics::statistics::{RunStatistics, StepMetrics, Summary};
use crate::error::{NbodyError, Result};
use crate::initialization::{BenchmarkConfiguration, ParticleSystem};
use log::debug;
use serde::{Deserialize, Serialize};

/// Step count, warm-up prefix and time step of one benchmark run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunParameters {
    pub nstep: usize,
    pub warmup: usize,
    pub stepsize: f32,
}

impl RunParameters {
    pub fn new(nstep: usize, warmup: usize, stepsize: f32) -> Result<Self> {
        let parameters: RunParameters = RunParameters {
            nstep,
            warmup,
            stepsize,
        };
        parameters.validate()?;
        Ok(parameters)
    }

    /// At least one step has to be left for the statistics.
    pub fn validate(&self) -> Result<()> {
        if self.nstep <= self.warmup {
            return Err(NbodyError::InvalidRunParameters {
                steps: self.nstep,
                warmup: self.warmup,
            });
        }
        Ok(())
    }
}

impl std::convert::TryFrom<&BenchmarkConfiguration> for RunParameters {
    type Error = NbodyError;

    fn try_from(config: &BenchmarkConfiguration) -> Result<Self> {
        RunParameters::new(config.nstep, config.warmup, config.stepsize)
    }
}

/// Everything measured during one run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BenchmarkReport {
    pub n_particles: usize,
    pub memory_bytes: usize,
    pub integrator: String,
    pub stepsize: f32,
    pub steps: Vec<StepMetrics>,
    pub summary: Summary,
}

/// Runs `parameters.nstep` integrator steps on `system`, timing each call
/// with `clock`. `on_step` sees every step as soon as it is measured.
pub fn run_benchmark<I, C, F>(
    system: &mut ParticleSystem,
    integrator: &I,
    clock: &mut C,
    parameters: &RunParameters,
    mut on_step: F,
) -> Result<BenchmarkReport>
where
    I: Integrator + ?Sized,
    C: Clock + ?Sized,
    F: FnMut(&StepMetrics),
{
    parameters.validate()?;

    let n_particles: usize = system.len();
    let mut statistics: RunStatistics = RunStatistics::new();
    let mut steps: Vec<StepMetrics> = Vec::with_capacity(parameters.nstep);

    for step in 0..parameters.nstep {
        let start: f64 = clock.now();
        integrator.step(system, parameters.stepsize);
        let end: f64 = clock.now();

        let warmup: bool = step < parameters.warmup;
        let metrics: StepMetrics = StepMetrics::new(step, n_particles, end - start, warmup);
        if !warmup {
            statistics.record(metrics.gflops);
        }
        debug!(
            "step {} took {:.6} s ({:.3} GFLOP/s{})",
            step,
            metrics.elapsed,
            metrics.gflops,
            if warmup { ", warm-up" } else { "" }
        );

        on_step(&metrics);
        steps.push(metrics);
    }

    Ok(BenchmarkReport {
        n_particles,
        memory_bytes: system.memory_footprint(),
        integrator: String::from(integrator.name()),
        stepsize: parameters.stepsize,
        steps,
        summary: statistics.finalize()?,
    })
}
