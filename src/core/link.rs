use serde::{Deserialize, Serialize};

use super::particle::Particle;

/// Inextensible distance constraint between two particles of the same store.
///
/// The rest length is fixed at creation and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    rest_length: f32,
}

impl Link {
    /// Link with an explicit rest length, e.g. for ropes that start with slack.
    pub fn new(a: usize, b: usize, rest_length: f32) -> Self {
        Self { a, b, rest_length }
    }

    /// Link whose rest length is the current distance between the two particles.
    ///
    /// Panics if either index is outside `particles`.
    pub fn between(a: usize, b: usize, particles: &[Particle]) -> Self {
        let rest_length = particles[a].position.distance(particles[b].position);
        Self::new(a, b, rest_length)
    }

    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Signed deviation from the rest length in the given configuration.
    pub fn error(&self, particles: &[Particle]) -> f32 {
        particles[self.a].position.distance(particles[self.b].position) - self.rest_length
    }
}
