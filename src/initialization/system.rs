use crate::error::{NbodyError, Result};
use crate::initialization::aligned::AlignedBuffer;

/// The three cartesian components of a per-particle quantity, one slice
/// per axis.
#[derive(Clone, Copy, Debug)]
pub struct Components<S> {
    pub x: S,
    pub y: S,
    pub z: S,
}

pub type ComponentsRef<'a> = Components<&'a [f32]>;
pub type ComponentsMut<'a> = Components<&'a mut [f32]>;

impl<'a> ComponentsMut<'a> {
    /// Reborrows the mutable slices for read-only access.
    pub fn as_shared(&self) -> ComponentsRef<'_> {
        Components {
            x: &*self.x,
            y: &*self.y,
            z: &*self.z,
        }
    }
}

/// Copy of the state of a single particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub velocity: [f32; 3],
}

/// Positions and velocities of `n` particles as six aligned arrays.
/// The number of particles is fixed at construction.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    n_particles: usize,
    x: AlignedBuffer,
    y: AlignedBuffer,
    z: AlignedBuffer,
    vx: AlignedBuffer,
    vy: AlignedBuffer,
    vz: AlignedBuffer,
}

impl ParticleSystem {
    /// All particles at rest in the origin.
    pub fn zeroed(n_particles: usize) -> Result<ParticleSystem> {
        Ok(ParticleSystem {
            n_particles,
            x: AlignedBuffer::zeroed(n_particles)?,
            y: AlignedBuffer::zeroed(n_particles)?,
            z: AlignedBuffer::zeroed(n_particles)?,
            vx: AlignedBuffer::zeroed(n_particles)?,
            vy: AlignedBuffer::zeroed(n_particles)?,
            vz: AlignedBuffer::zeroed(n_particles)?,
        })
    }

    pub fn from_particles(particles: &[Particle]) -> Result<ParticleSystem> {
        let mut system: ParticleSystem = ParticleSystem::zeroed(particles.len())?;
        for (i, particle) in particles.iter().enumerate() {
            system.set_particle(i, particle);
        }
        Ok(system)
    }

    pub fn len(&self) -> usize {
        self.n_particles
    }

    pub fn is_empty(&self) -> bool {
        self.n_particles == 0
    }

    /// Bytes held by the six arrays, without the alignment padding.
    pub fn memory_footprint(&self) -> usize {
        memory_footprint(self.n_particles)
    }

    pub fn positions(&self) -> ComponentsRef<'_> {
        Components {
            x: self.x.as_slice(),
            y: self.y.as_slice(),
            z: self.z.as_slice(),
        }
    }

    pub fn velocities(&self) -> ComponentsRef<'_> {
        Components {
            x: self.vx.as_slice(),
            y: self.vy.as_slice(),
            z: self.vz.as_slice(),
        }
    }

    /// Disjoint mutable access to positions and velocities.
    pub fn split_mut(&mut self) -> (ComponentsMut<'_>, ComponentsMut<'_>) {
        (
            Components {
                x: self.x.as_mut_slice(),
                y: self.y.as_mut_slice(),
                z: self.z.as_mut_slice(),
            },
            Components {
                x: self.vx.as_mut_slice(),
                y: self.vy.as_mut_slice(),
                z: self.vz.as_mut_slice(),
            },
        )
    }

    /// Panics if `index` is out of range.
    pub fn particle(&self, index: usize) -> Particle {
        Particle {
            position: [self.x[index], self.y[index], self.z[index]],
            velocity: [self.vx[index], self.vy[index], self.vz[index]],
        }
    }

    /// Panics if `index` is out of range.
    pub fn set_particle(&mut self, index: usize, particle: &Particle) {
        self.x[index] = particle.position[0];
        self.y[index] = particle.position[1];
        self.z[index] = particle.position[2];
        self.vx[index] = particle.velocity[0];
        self.vy[index] = particle.velocity[1];
        self.vz[index] = particle.velocity[2];
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.n_particles).map(move |i| self.particle(i))
    }
}

/// Builds a system from six component arrays which must share one length.
impl<'a> std::convert::TryFrom<[&'a [f32]; 6]> for ParticleSystem {
    type Error = NbodyError;

    fn try_from(components: [&'a [f32]; 6]) -> Result<Self> {
        let lengths: [usize; 6] = [
            components[0].len(),
            components[1].len(),
            components[2].len(),
            components[3].len(),
            components[4].len(),
            components[5].len(),
        ];
        if lengths.iter().any(|len| *len != lengths[0]) {
            return Err(NbodyError::LengthMismatch { lengths });
        }
        Ok(ParticleSystem {
            n_particles: lengths[0],
            x: AlignedBuffer::from_slice(components[0])?,
            y: AlignedBuffer::from_slice(components[1])?,
            z: AlignedBuffer::from_slice(components[2])?,
            vx: AlignedBuffer::from_slice(components[3])?,
            vy: AlignedBuffer::from_slice(components[4])?,
            vz: AlignedBuffer::from_slice(components[5])?,
        })
    }
}

pub fn memory_footprint(n_particles: usize) -> usize {
    6 * std::mem::size_of::<f32>() * n_particles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::BUFFER_ALIGNMENT;
    use std::convert::TryFrom;

    #[test]
    fn components_share_length_and_alignment() {
        let system = ParticleSystem::zeroed(37).unwrap();
        let pos = system.positions();
        let vel = system.velocities();
        for slice in [pos.x, pos.y, pos.z, vel.x, vel.y, vel.z].iter() {
            assert_eq!(slice.len(), 37);
            assert_eq!(slice.as_ptr() as usize % BUFFER_ALIGNMENT, 0);
        }
    }

    #[test]
    fn particle_view_round_trips() {
        let particle = Particle {
            position: [1.0, -2.0, 3.0],
            velocity: [0.5, 0.25, -0.125],
        };
        let mut system = ParticleSystem::zeroed(4).unwrap();
        system.set_particle(2, &particle);
        assert_eq!(system.particle(2), particle);
        assert_eq!(system.particle(1), ParticleSystem::zeroed(1).unwrap().particle(0));
        assert_eq!(system.particles().count(), 4);
    }

    #[test]
    fn mismatched_components_are_rejected() {
        let a = [0.0f32; 3];
        let b = [0.0f32; 2];
        let result = ParticleSystem::try_from([&a[..], &a[..], &a[..], &a[..], &b[..], &a[..]]);
        match result {
            Err(NbodyError::LengthMismatch { lengths }) => assert_eq!(lengths, [3, 3, 3, 3, 2, 3]),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn footprint_counts_six_float_arrays() {
        assert_eq!(memory_footprint(16384), 393216);
        assert_eq!(ParticleSystem::zeroed(0).unwrap().memory_footprint(), 0);
    }
}
