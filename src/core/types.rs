use serde::{Deserialize, Serialize};

/// Common math types re-exported for convenience.
pub use glam::Vec2;

/// How physics is allowed to move a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PinState {
    /// Integrated under gravity and displaced by relaxation.
    #[default]
    Free,
    /// Never moved by physics; only an explicit grab can relocate it.
    Locked,
    /// Reserved for externally driven motion. Treated like `Locked` by the integrator and solver.
    Animated,
}

impl PinState {
    pub fn is_free(self) -> bool {
        matches!(self, PinState::Free)
    }

    /// Whether the particle may be picked up by the pointer.
    pub fn is_grabbable(self) -> bool {
        matches!(self, PinState::Locked)
    }
}

/// Direction gravity pulls the particles of a topology.
///
/// Selected once per tick by the integrator; replaces per-topology update callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
}

impl GravityDirection {
    /// Applies the direction to a configured (downward) gravity vector.
    pub fn apply(self, gravity: Vec2) -> Vec2 {
        match self {
            GravityDirection::Down => gravity,
            GravityDirection::Up => -gravity,
        }
    }
}
