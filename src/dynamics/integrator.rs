use glam::Vec2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{
    config::SimulationConfig,
    core::{particle::Particle, types::GravityDirection},
};

/// Position-based (Verlet) integrator stepping free particles under constant gravity.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub gravity: Vec2,
    pub gravity_damping: f32,
    parallel: bool,
}

impl Integrator {
    pub fn new(gravity: Vec2, gravity_damping: f32) -> Self {
        Self {
            gravity,
            gravity_damping,
            parallel: false,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        let mut integrator = Self::new(config.gravity, config.gravity_damping);
        integrator.set_parallel(config.parallel);
        integrator
    }

    pub fn set_parallel(&mut self, enabled: bool) {
        self.parallel = enabled;
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Acceleration applied this tick for the given integration profile.
    pub fn acceleration(&self, direction: GravityDirection) -> Vec2 {
        direction.apply(self.gravity) * self.gravity_damping
    }

    pub fn integrate_particle(particle: &mut Particle, acceleration: Vec2, dt: f32) {
        if !particle.is_free() {
            return;
        }

        let saved = particle.position;
        let velocity = particle.position - particle.previous;
        particle.position += velocity;
        particle.position += acceleration * dt * dt;
        particle.previous = saved;
    }

    /// Advances every free particle by one tick of `dt` seconds.
    pub fn step(&self, particles: &mut [Particle], direction: GravityDirection, dt: f32) {
        let acceleration = self.acceleration(direction);

        #[cfg(feature = "parallel")]
        {
            if self.parallel && particles.len() >= crate::config::PARALLEL_INTEGRATION_THRESHOLD {
                particles
                    .par_iter_mut()
                    .for_each(|particle| Self::integrate_particle(particle, acceleration, dt));
                return;
            }
        }

        for particle in particles.iter_mut() {
            Self::integrate_particle(particle, acceleration, dt);
        }
    }
}
