//! Errors raised while building topologies or starting the simulation.
//!
//! The tick itself is infallible; these only surface at construction time.

use std::{error::Error, fmt, io};

/// A topology definition that violates the link invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// The topology has no particles.
    Empty,
    /// A link references a particle index past the end of the particle list.
    LinkOutOfBounds {
        link: usize,
        index: usize,
        count: usize,
    },
    /// A link joins a particle to itself.
    SelfLink { link: usize, index: usize },
    /// A rest length is negative, NaN or infinite.
    InvalidRestLength { link: usize, length: f32 },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::Empty => write!(f, "topology has no particles"),
            TopologyError::LinkOutOfBounds { link, index, count } => write!(
                f,
                "link {} references particle {} out of bounds (count: {})",
                link, index, count
            ),
            TopologyError::SelfLink { link, index } => {
                write!(f, "link {} joins particle {} to itself", link, index)
            }
            TopologyError::InvalidRestLength { link, length } => {
                write!(f, "link {} has invalid rest length {}", link, length)
            }
        }
    }
}

impl Error for TopologyError {}

/// Failures when assembling a catalog or starting the engine.
#[derive(Debug)]
pub enum SimulationError {
    /// A catalog must hold at least one topology.
    EmptyCatalog,
    /// A topology in the catalog failed validation.
    InvalidTopology { name: String, source: TopologyError },
    /// The clock thread could not be spawned.
    ThreadSpawn(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::EmptyCatalog => write!(f, "topology catalog is empty"),
            SimulationError::InvalidTopology { name, source } => {
                write!(f, "topology \"{}\" is invalid: {}", name, source)
            }
            SimulationError::ThreadSpawn(err) => {
                write!(f, "failed to spawn simulation thread: {}", err)
            }
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SimulationError::EmptyCatalog => None,
            SimulationError::InvalidTopology { source, .. } => Some(source),
            SimulationError::ThreadSpawn(err) => Some(err),
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        SimulationError::ThreadSpawn(err)
    }
}
