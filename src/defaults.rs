// config file
pub const CONFIG_FILE_NAME: &str = "nbody.toml";
// print level
pub const VERBOSE: i8 = 0;
// number of particles if none is given on the command line
pub const N_PARTICLES: usize = 16384;
// total number of benchmark steps
pub const NSTEP: usize = 10;
// leading steps that are timed and printed but left out of the statistics
pub const WARMUP: usize = 3;
// time step
pub const STEPSIZE: f32 = 0.01;
// seed for the initial conditions
pub const SEED: u64 = 1;
// "serial" or "parallel"
pub const INTEGRATOR: &str = "serial";
// size of the rayon pool for the parallel integrator, 0 lets rayon decide
pub const THREADS: usize = 0;
// dump the per-step metrics and the summary as yaml
pub const WRITE_REPORT: bool = false;
pub const REPORT_FILE_NAME: &str = "nbody_report.yaml";

// softening added to every squared distance, also on the diagonal i == j
pub const SOFTENING: f32 = 1e-20;
// floating point operations per pairwise interaction in the force kernel
pub const FLOPS_PER_INTERACTION: f64 = 23.0;
// floating point operations per particle in the position update
pub const FLOPS_PER_PARTICLE: f64 = 3.0;
// alignment of every particle buffer in bytes
pub const BUFFER_ALIGNMENT: usize = 64;
