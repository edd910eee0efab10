use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::types::PinState;

/// Point mass advanced by Verlet integration; velocity is implied by `position - previous`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub previous: Vec2,
    pub state: PinState,
}

impl Particle {
    /// Creates a particle at rest (previous position equals current position).
    pub fn new(position: Vec2, state: PinState) -> Self {
        Self {
            position,
            previous: position,
            state,
        }
    }

    pub fn free(position: Vec2) -> Self {
        Self::new(position, PinState::Free)
    }

    pub fn locked(position: Vec2) -> Self {
        Self::new(position, PinState::Locked)
    }

    pub fn animated(position: Vec2) -> Self {
        Self::new(position, PinState::Animated)
    }

    pub fn is_free(&self) -> bool {
        self.state.is_free()
    }

    /// Displacement over the last tick.
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_particles_start_at_rest() {
        let particle = Particle::free(Vec2::new(12.0, -4.0));
        assert_eq!(particle.previous, particle.position);
        assert_eq!(particle.velocity(), Vec2::ZERO);
    }
}
