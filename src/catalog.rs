//! Named starting configurations the simulation can be loaded from.

use glam::Vec2;
use log::debug;

use crate::{
    core::{
        topology::{Topology, TopologyBuilder},
        types::GravityDirection,
    },
    error::{SimulationError, TopologyError},
};

/// Ordered, non-empty list of validated topologies.
#[derive(Debug, Clone)]
pub struct TopologyCatalog {
    topologies: Vec<Topology>,
}

impl TopologyCatalog {
    pub fn new(topologies: Vec<Topology>) -> Result<Self, SimulationError> {
        if topologies.is_empty() {
            return Err(SimulationError::EmptyCatalog);
        }
        for topology in &topologies {
            topology
                .validate()
                .map_err(|source| SimulationError::InvalidTopology {
                    name: topology.name().to_owned(),
                    source,
                })?;
        }
        debug!("catalog holds {} topologies", topologies.len());
        Ok(Self { topologies })
    }

    /// Catalog of the built-in ropes.
    pub fn builtin() -> Result<Self, SimulationError> {
        let topologies = builtin_topologies().map_err(|source| SimulationError::InvalidTopology {
            name: "builtin".to_owned(),
            source,
        })?;
        Self::new(topologies)
    }

    pub fn topologies(&self) -> &[Topology] {
        &self.topologies
    }

    pub fn get(&self, index: usize) -> Option<&Topology> {
        self.topologies.get(index)
    }

    pub fn len(&self) -> usize {
        self.topologies.len()
    }

    /// Returns whether the catalog holds no topologies.
    pub fn is_empty(&self) -> bool {
        self.topologies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topology> {
        self.topologies.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.topologies.iter().map(Topology::name).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.topologies.iter().position(|topology| topology.name() == name)
    }
}

/// Builds every built-in topology, in presentation order.
pub fn builtin_topologies() -> Result<Vec<Topology>, TopologyError> {
    Ok(vec![lague()?, up()?, v_shape()?, x_shape()?, balloon()?, slack()?])
}

/// Rope ending in a diamond, after Sebastian Lague's rope demo.
pub fn lague() -> Result<Topology, TopologyError> {
    TopologyBuilder::new("Lague")
        .locked(Vec2::new(400.0, 200.0))
        .free(Vec2::new(450.0, 200.0))
        .free(Vec2::new(500.0, 200.0))
        .free(Vec2::new(550.0, 200.0))
        .free(Vec2::new(600.0, 200.0))
        .free(Vec2::new(635.355_34, 164.644_66))
        .free(Vec2::new(635.355_34, 235.355_34))
        .free(Vec2::new(670.710_7, 200.0))
        .chain(&[0, 1, 2, 3, 4, 5])
        .link(4, 6)
        .link(5, 7)
        .link(6, 7)
        .link(5, 6)
        .build()
}

/// Vertical rope standing on a pin.
pub fn up() -> Result<Topology, TopologyError> {
    TopologyBuilder::new("Up")
        .locked(Vec2::new(400.0, 300.0))
        .free(Vec2::new(400.0, 250.0))
        .free(Vec2::new(400.0, 200.0))
        .free(Vec2::new(400.0, 150.0))
        .free(Vec2::new(400.0, 100.0))
        .chain(&[0, 1, 2, 3, 4])
        .build()
}

/// Two arms rising from one pin.
pub fn v_shape() -> Result<Topology, TopologyError> {
    TopologyBuilder::new("V")
        .locked(Vec2::new(400.0, 300.0))
        // right
        .free(Vec2::new(425.0, 250.0))
        .free(Vec2::new(450.0, 200.0))
        .free(Vec2::new(475.0, 150.0))
        .free(Vec2::new(500.0, 100.0))
        // left
        .free(Vec2::new(375.0, 250.0))
        .free(Vec2::new(350.0, 200.0))
        .free(Vec2::new(325.0, 150.0))
        .free(Vec2::new(300.0, 100.0))
        .chain(&[0, 1, 2, 3, 4])
        .chain(&[0, 5, 6, 7, 8])
        .build()
}

/// Four diagonal arms around one pin.
pub fn x_shape() -> Result<Topology, TopologyError> {
    let center = Vec2::new(400.0, 300.0);
    let arms = [
        Vec2::new(-50.0, -50.0),
        Vec2::new(-50.0, 50.0),
        Vec2::new(50.0, 50.0),
        Vec2::new(50.0, -50.0),
    ];
    let mut builder = TopologyBuilder::new("X").locked(center);
    for (arm, step) in arms.iter().enumerate() {
        for segment in 1..=4 {
            builder = builder.free(center + *step * segment as f32);
        }
        let first = 1 + arm * 4;
        builder = builder.chain(&[0, first, first + 1, first + 2, first + 3]);
    }
    builder.build()
}

/// Chain hanging below its pin that floats upward.
pub fn balloon() -> Result<Topology, TopologyError> {
    TopologyBuilder::new("Balloon")
        .locked(Vec2::new(400.0, 300.0))
        .free(Vec2::new(400.0, 350.0))
        .free(Vec2::new(400.0, 400.0))
        .free(Vec2::new(400.0, 450.0))
        .free(Vec2::new(400.0, 500.0))
        .chain(&[0, 1, 2, 3, 4])
        .gravity(GravityDirection::Up)
        .build()
}

/// Rope strung between two pins with more length than the gap.
pub fn slack() -> Result<Topology, TopologyError> {
    let mut builder = TopologyBuilder::new("Slack").locked(Vec2::new(200.0, 200.0));
    for x in [275.0, 350.0, 425.0] {
        builder = builder.free(Vec2::new(x, 200.0));
    }
    builder = builder.locked(Vec2::new(500.0, 200.0));
    for a in 0..4 {
        builder = builder.link_with_length(a, a + 1, 100.0);
    }
    builder.build()
}
