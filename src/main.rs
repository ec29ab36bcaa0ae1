use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use nbody_bench::defaults::CONFIG_FILE_NAME;
use nbody_bench::dynamics::{
    run_benchmark, Integrator, ParallelIntegrator, RunParameters, SerialIntegrator, WallClock,
};
use nbody_bench::initialization::{BenchmarkConfiguration, IntegratorKind, ParticleSystem};
use nbody_bench::output::{
    memory_header, summary_block, table_header, write_report, write_step_row,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::convert::TryFrom;
use std::io::Write;
use std::path::Path;

/// Brute-force gravitational n-body benchmark
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Number of particles, overrides `n_particles` from nbody.toml
    n_particles: Option<usize>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // read the configuration file, if it does not exist in the directory
    // the defaults are written to it
    let config_existed: bool = Path::new(CONFIG_FILE_NAME).exists();
    let config: BenchmarkConfiguration = BenchmarkConfiguration::new()?;

    let log_level: LevelFilter = match config.verbose {
        2 => LevelFilter::Trace,
        1 => LevelFilter::Debug,
        0 => LevelFilter::Info,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log_level)
        .init();

    if !config_existed {
        info!("wrote default configuration to {}", CONFIG_FILE_NAME);
    }

    // steps <= warm-up is rejected before anything is allocated
    let parameters: RunParameters = RunParameters::try_from(&config)?;
    let n_particles: usize = args.n_particles.unwrap_or(config.n_particles);

    let integrator: Box<dyn Integrator> = match config.integrator {
        IntegratorKind::Serial => Box::new(SerialIntegrator::new()),
        IntegratorKind::Parallel => {
            let parallel: ParallelIntegrator = ParallelIntegrator::new(config.threads)?;
            info!("running on {} threads", parallel.num_threads());
            Box::new(parallel)
        }
    };
    info!(
        "{} particles, {} steps ({} warm-up), dt = {}, {} integrator",
        n_particles,
        parameters.nstep,
        parameters.warmup,
        parameters.stepsize,
        integrator.name()
    );

    let mut rng: StdRng = StdRng::seed_from_u64(config.seed);
    let mut system: ParticleSystem = ParticleSystem::random(n_particles, &mut rng)
        .context("Unable to allocate the particle system")?;

    let stdout = std::io::stdout();
    println!("{}", memory_header(n_particles));
    println!("{}", table_header());
    stdout.lock().flush()?;

    // the first failed write is kept and reported once the run is over
    let mut output_error: Option<std::io::Error> = None;
    let report = run_benchmark(
        &mut system,
        integrator.as_ref(),
        &mut WallClock::new(),
        &parameters,
        |metrics| {
            if output_error.is_none() {
                if let Err(error) = write_step_row(&mut stdout.lock(), metrics) {
                    output_error = Some(error);
                }
            }
        },
    )?;
    if let Some(error) = output_error {
        return Err(error).context("Unable to write to stdout");
    }

    println!("{}", summary_block(&report.summary));

    if config.write_report {
        write_report(&report, Path::new(&config.report_file))?;
        info!("wrote run report to {}", config.report_file);
    }

    Ok(())
}
