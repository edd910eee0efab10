//! Core data model: particles, links, topologies, and the live particle store.

pub mod link;
pub mod particle;
pub mod store;
pub mod topology;
pub mod types;

pub use link::Link;
pub use particle::Particle;
pub use store::ParticleStore;
pub use topology::{Topology, TopologyBuilder};
pub use types::{GravityDirection, PinState};
