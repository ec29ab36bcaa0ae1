use crate::error::Result;
use crate::initialization::system::{Particle, ParticleSystem};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Draws the lopsided benchmark configuration: uniform magnitudes in [0, 1),
/// with one random sign per particle shared by `x`, `z` and `vy`.
pub struct SkewedUniform {
    dist: Uniform<f32>,
}

impl SkewedUniform {
    pub fn new() -> SkewedUniform {
        SkewedUniform {
            dist: Uniform::new(0.0, 1.0),
        }
    }

    /// The draw order is fixed: two integers for the sign, then x, y, z, vx,
    /// vy, vz.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let r1: u32 = rng.gen();
        let r2: u32 = rng.gen();
        let sign: f32 = if r1 > r2 { 1.0 } else { -1.0 };

        let x: f32 = sign * self.dist.sample(rng);
        let y: f32 = self.dist.sample(rng);
        let z: f32 = sign * self.dist.sample(rng);
        let vx: f32 = self.dist.sample(rng);
        let vy: f32 = sign * self.dist.sample(rng);
        let vz: f32 = self.dist.sample(rng);

        Particle {
            position: [x, y, z],
            velocity: [vx, vy, vz],
        }
    }
}

impl Default for SkewedUniform {
    fn default() -> Self {
        SkewedUniform::new()
    }
}

/// Overwrites every particle of `system` with a fresh draw.
pub fn initialize_particles<R: Rng + ?Sized>(system: &mut ParticleSystem, rng: &mut R) {
    let skewed: SkewedUniform = SkewedUniform::new();
    for particle in 0..system.len() {
        let drawn: Particle = skewed.sample(rng);
        system.set_particle(particle, &drawn);
    }
}

impl ParticleSystem {
    /// Allocates `n_particles` and fills them from `rng`.
    pub fn random<R: Rng + ?Sized>(n_particles: usize, rng: &mut R) -> Result<ParticleSystem> {
        let mut system: ParticleSystem = ParticleSystem::zeroed(n_particles)?;
        initialize_particles(&mut system, rng);
        Ok(system)
    }
}
