use crate::defaults::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_verbose() -> i8 {
    VERBOSE
}
fn default_n_particles() -> usize {
    N_PARTICLES
}
fn default_nstep() -> usize {
    NSTEP
}
fn default_warmup() -> usize {
    WARMUP
}
fn default_stepsize() -> f32 {
    STEPSIZE
}
fn default_seed() -> u64 {
    SEED
}
fn default_integrator() -> IntegratorKind {
    match INTEGRATOR {
        "parallel" => IntegratorKind::Parallel,
        _ => IntegratorKind::Serial,
    }
}
fn default_threads() -> usize {
    THREADS
}
fn default_write_report() -> bool {
    WRITE_REPORT
}
fn default_report_file() -> String {
    String::from(REPORT_FILE_NAME)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IntegratorKind {
    Serial,
    Parallel,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BenchmarkConfiguration {
    #[serde(default = "default_verbose")]
    pub verbose: i8,
    #[serde(default = "default_n_particles")]
    pub n_particles: usize,
    #[serde(default = "default_nstep")]
    pub nstep: usize,
    #[serde(default = "default_warmup")]
    pub warmup: usize,
    #[serde(default = "default_stepsize")]
    pub stepsize: f32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_integrator")]
    pub integrator: IntegratorKind,
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default = "default_write_report")]
    pub write_report: bool,
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

impl BenchmarkConfiguration {
    /// Reads `nbody.toml` from the working directory. If it does not exist the
    /// defaults are used and written to that file so that the user can see
    /// all the options.
    pub fn new() -> Result<Self> {
        Self::load_or_create(Path::new(CONFIG_FILE_NAME))
    }

    pub fn load_or_create(config_file_path: &Path) -> Result<Self> {
        let config_string: String = if config_file_path.exists() {
            fs::read_to_string(config_file_path).with_context(|| {
                format!("Unable to read config file {}", config_file_path.display())
            })?
        } else {
            String::new()
        };
        let config: Self = Self::from_toml(&config_string).with_context(|| {
            format!("Invalid config file {}", config_file_path.display())
        })?;

        if !config_file_path.exists() {
            let config_string: String = toml::to_string(&config)?;
            fs::write(config_file_path, config_string).with_context(|| {
                format!("Unable to write config file {}", config_file_path.display())
            })?;
        }
        Ok(config)
    }

    pub fn from_toml(config_string: &str) -> Result<Self> {
        Ok(toml::from_str(config_string)?)
    }
}

impl Default for BenchmarkConfiguration {
    fn default() -> Self {
        BenchmarkConfiguration {
            verbose: default_verbose(),
            n_particles: default_n_particles(),
            nstep: default_nstep(),
            warmup: default_warmup(),
            stepsize: default_stepsize(),
            seed: default_seed(),
            integrator: default_integrator(),
            threads: default_threads(),
            write_report: default_write_report(),
            report_file: default_report_file(),
        }
    }
}
