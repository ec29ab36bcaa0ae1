use crate::dynamics::forces::accumulate_force;
use crate::error::Result;
use crate::initialization::{ComponentsMut, ComponentsRef, ParticleSystem};
use itertools::izip;
use log::debug;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Advances a [ParticleSystem] by one time step.
///
/// Every implementation first updates all velocities from the positions of
/// the previous step and only then moves the particles.
pub trait Integrator {
    fn step(&self, system: &mut ParticleSystem, dt: f32);

    fn name(&self) -> &'static str;
}

/// Reference loop order on the calling thread.
pub struct SerialIntegrator;

impl SerialIntegrator {
    pub fn new() -> Self {
        SerialIntegrator
    }
}

impl Default for SerialIntegrator {
    fn default() -> Self {
        SerialIntegrator::new()
    }
}

impl Integrator for SerialIntegrator {
    fn step(&self, system: &mut ParticleSystem, dt: f32) {
        let (mut positions, velocities) = system.split_mut();

        let shared: ComponentsRef<'_> = positions.as_shared();
        for (i, (vx, vy, vz)) in izip!(
            velocities.x.iter_mut(),
            velocities.y.iter_mut(),
            velocities.z.iter_mut()
        )
        .enumerate()
        {
            let [fx, fy, fz] = accumulate_force(&shared, i);
            *vx += dt * fx;
            *vy += dt * fy;
            *vz += dt * fz;
        }

        drift(&mut positions, &velocities.as_shared(), dt, |p, v, dt| {
            p.iter_mut().zip(v).for_each(|(p, v)| *p += dt * v)
        });
    }

    fn name(&self) -> &'static str {
        "serial"
    }
}

/// Distributes the outer particle loop over a dedicated rayon pool.
///
/// The force sum of each particle runs in the same order as in
/// [SerialIntegrator], so both produce bit-identical states.
pub struct ParallelIntegrator {
    thread_pool: ThreadPool,
}

impl ParallelIntegrator {
    /// `num_threads == 0` leaves the pool size to rayon.
    pub fn new(num_threads: usize) -> Result<Self> {
        let thread_pool: ThreadPool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
        debug!("parallel integrator uses {} threads", thread_pool.current_num_threads());
        Ok(ParallelIntegrator { thread_pool })
    }

    pub fn num_threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

impl Integrator for ParallelIntegrator {
    fn step(&self, system: &mut ParticleSystem, dt: f32) {
        let (mut positions, velocities) = system.split_mut();

        self.thread_pool.install(|| {
            // velocities only, positions are read-only until this region ends
            let shared: ComponentsRef<'_> = positions.as_shared();
            velocities
                .x
                .par_iter_mut()
                .zip(velocities.y.par_iter_mut())
                .zip(velocities.z.par_iter_mut())
                .enumerate()
                .for_each(|(i, ((vx, vy), vz))| {
                    let [fx, fy, fz] = accumulate_force(&shared, i);
                    *vx += dt * fx;
                    *vy += dt * fy;
                    *vz += dt * fz;
                });
        });

        self.thread_pool.install(|| {
            drift(&mut positions, &velocities.as_shared(), dt, |p, v, dt| {
                p.par_iter_mut().zip(v).for_each(|(p, v)| *p += dt * v)
            });
        });
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}

/// Position pass, one axis at a time.
fn drift<F>(positions: &mut ComponentsMut<'_>, velocities: &ComponentsRef<'_>, dt: f32, axis: F)
where
    F: Fn(&mut [f32], &[f32], f32),
{
    axis(&mut *positions.x, velocities.x, dt);
    axis(&mut *positions.y, velocities.y, dt);
    axis(&mut *positions.z, velocities.z, dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::Particle;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn integrators() -> Vec<Box<dyn Integrator>> {
        vec![
            Box::new(SerialIntegrator::new()),
            Box::new(ParallelIntegrator::new(3).unwrap()),
        ]
    }

    #[test]
    fn empty_system_is_a_no_op() {
        for integrator in integrators() {
            let mut system = ParticleSystem::zeroed(0).unwrap();
            integrator.step(&mut system, 0.01);
            assert!(system.is_empty());
            assert!(system.positions().x.is_empty());
            assert!(system.velocities().z.is_empty());
        }
    }

    #[test]
    fn single_particle_moves_only_with_its_velocity() {
        for integrator in integrators() {
            let start = Particle {
                position: [0.5, -0.25, 0.75],
                velocity: [0.0, 0.0, 0.0],
            };
            let mut system = ParticleSystem::from_particles(&[start]).unwrap();
            for _ in 0..5 {
                integrator.step(&mut system, 0.01);
            }
            assert_eq!(system.particle(0), start, "{}", integrator.name());
        }
    }

    #[test]
    fn single_moving_particle_keeps_its_velocity() {
        for integrator in integrators() {
            let start = Particle {
                position: [0.0, 0.0, 0.0],
                velocity: [1.0, 2.0, -4.0],
            };
            let mut system = ParticleSystem::from_particles(&[start]).unwrap();
            integrator.step(&mut system, 0.5);
            let p = system.particle(0);
            assert_eq!(p.velocity, start.velocity);
            assert_eq!(p.position, [0.5, 1.0, -2.0]);
        }
    }

    #[test]
    fn two_body_step_matches_hand_computation() {
        for integrator in integrators() {
            let mut system = ParticleSystem::from_particles(&[
                Particle {
                    position: [0.0, 0.0, 0.0],
                    velocity: [0.0, 1.0, 0.0],
                },
                Particle {
                    position: [2.0, 0.0, 0.0],
                    velocity: [0.0, -1.0, 0.0],
                },
            ])
            .unwrap();
            let dt: f32 = 0.1;
            integrator.step(&mut system, dt);

            // force on 0 is 2 / 2^3 = 0.25 along +x, on 1 the opposite
            let p0 = system.particle(0);
            let p1 = system.particle(1);
            assert_relative_eq!(p0.velocity[0], 0.025, max_relative = 1e-5);
            assert_relative_eq!(p1.velocity[0], -0.025, max_relative = 1e-5);
            assert_relative_eq!(p0.velocity[1], 1.0, max_relative = 1e-5);
            assert_relative_eq!(p0.position[0], 0.0025, max_relative = 1e-5);
            assert_relative_eq!(p1.position[0], 1.9975, max_relative = 1e-5);
            assert_relative_eq!(p0.position[1], 0.1, max_relative = 1e-5);
            assert_relative_eq!(p1.position[1], -0.1, max_relative = 1e-5);
            assert_eq!(p0.position[2], 0.0);
        }
    }

    #[test]
    fn positions_move_with_the_updated_velocity() {
        // the drift must see this step's velocities and the kick last step's positions
        let mut system = ParticleSystem::from_particles(&[
            Particle {
                position: [-1.0, 0.0, 0.0],
                velocity: [0.0; 3],
            },
            Particle {
                position: [1.0, 0.0, 0.0],
                velocity: [0.0; 3],
            },
        ])
        .unwrap();
        SerialIntegrator::new().step(&mut system, 1.0);
        let p0 = system.particle(0);
        assert_relative_eq!(p0.velocity[0], 0.25, max_relative = 1e-6);
        assert_relative_eq!(p0.position[0], -0.75, max_relative = 1e-6);
        let p1 = system.particle(1);
        assert_relative_eq!(p1.velocity[0], -0.25, max_relative = 1e-6);
        assert_relative_eq!(p1.position[0], 0.75, max_relative = 1e-6);
    }

    #[test]
    fn parallel_pool_has_the_requested_size() {
        let integrator = ParallelIntegrator::new(3).unwrap();
        assert_eq!(integrator.num_threads(), 3);
        assert_eq!(integrator.name(), "parallel");
    }

    #[test]
    fn serial_and_parallel_are_bit_identical() {
        let initial = ParticleSystem::random(257, &mut StdRng::seed_from_u64(11)).unwrap();
        let mut serial = initial.clone();
        let mut parallel = initial;
        let parallel_integrator = ParallelIntegrator::new(4).unwrap();
        for _ in 0..3 {
            SerialIntegrator::new().step(&mut serial, 0.01);
            parallel_integrator.step(&mut parallel, 0.01);
        }
        assert!(serial.particles().eq(parallel.particles()));
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let run = || {
            let mut system = ParticleSystem::random(64, &mut StdRng::seed_from_u64(5)).unwrap();
            for _ in 0..4 {
                SerialIntegrator::new().step(&mut system, 0.01);
            }
            system.particles().collect::<Vec<Particle>>()
        };
        assert_eq!(run(), run());
    }
}
