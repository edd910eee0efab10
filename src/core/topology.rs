use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{
    link::Link,
    particle::Particle,
    types::{GravityDirection, PinState},
};
use crate::error::TopologyError;

/// Named, immutable initial configuration used to (re)initialize a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    name: String,
    particles: Vec<Particle>,
    links: Vec<Link>,
    gravity: GravityDirection,
}

impl Topology {
    /// Assembles a topology from prepared parts and validates it.
    pub fn new(
        name: impl Into<String>,
        particles: Vec<Particle>,
        links: Vec<Link>,
        gravity: GravityDirection,
    ) -> Result<Self, TopologyError> {
        let topology = Self {
            name: name.into(),
            particles,
            links,
            gravity,
        };
        topology.validate()?;
        Ok(topology)
    }

    pub fn builder(name: impl Into<String>) -> TopologyBuilder {
        TopologyBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    /// Checks that every link references two distinct, existing particles with a usable rest length.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.particles.is_empty() {
            return Err(TopologyError::Empty);
        }
        let count = self.particles.len();
        for (link_index, link) in self.links.iter().enumerate() {
            for index in [link.a, link.b] {
                if index >= count {
                    return Err(TopologyError::LinkOutOfBounds {
                        link: link_index,
                        index,
                        count,
                    });
                }
            }
            if link.a == link.b {
                return Err(TopologyError::SelfLink {
                    link: link_index,
                    index: link.a,
                });
            }
            let length = link.rest_length();
            if !length.is_finite() || length < 0.0 {
                return Err(TopologyError::InvalidRestLength {
                    link: link_index,
                    length,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum LinkSpec {
    Derived(usize, usize),
    Explicit(usize, usize, f32),
}

/// Incremental topology definition; rest lengths of derived links are resolved in [`build`](Self::build).
///
/// ```
/// use rope_sim::core::topology::TopologyBuilder;
/// use glam::Vec2;
///
/// let topology = TopologyBuilder::new("pendulum")
///     .locked(Vec2::new(0.0, 0.0))
///     .free(Vec2::new(0.0, 40.0))
///     .link(0, 1)
///     .build()
///     .unwrap();
/// assert_eq!(topology.links()[0].rest_length(), 40.0);
/// ```
#[derive(Debug, Clone)]
pub struct TopologyBuilder {
    name: String,
    particles: Vec<Particle>,
    links: Vec<LinkSpec>,
    gravity: GravityDirection,
}

impl TopologyBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            particles: Vec::new(),
            links: Vec::new(),
            gravity: GravityDirection::Down,
        }
    }

    pub fn particle(mut self, position: Vec2, state: PinState) -> Self {
        self.particles.push(Particle::new(position, state));
        self
    }

    pub fn free(self, position: Vec2) -> Self {
        self.particle(position, PinState::Free)
    }

    pub fn locked(self, position: Vec2) -> Self {
        self.particle(position, PinState::Locked)
    }

    /// Links two particles at their initial distance.
    pub fn link(mut self, a: usize, b: usize) -> Self {
        self.links.push(LinkSpec::Derived(a, b));
        self
    }

    /// Links two particles with a rest length that may differ from their initial distance.
    pub fn link_with_length(mut self, a: usize, b: usize, rest_length: f32) -> Self {
        self.links.push(LinkSpec::Explicit(a, b, rest_length));
        self
    }

    /// Links each consecutive pair in `indices`.
    pub fn chain(mut self, indices: &[usize]) -> Self {
        for pair in indices.windows(2) {
            self.links.push(LinkSpec::Derived(pair[0], pair[1]));
        }
        self
    }

    pub fn gravity(mut self, gravity: GravityDirection) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn build(self) -> Result<Topology, TopologyError> {
        let count = self.particles.len();
        let mut links = Vec::with_capacity(self.links.len());
        for (link_index, spec) in self.links.into_iter().enumerate() {
            let link = match spec {
                LinkSpec::Derived(a, b) => {
                    if let Some(index) = [a, b].into_iter().find(|&index| index >= count) {
                        return Err(TopologyError::LinkOutOfBounds {
                            link: link_index,
                            index,
                            count,
                        });
                    }
                    Link::between(a, b, &self.particles)
                }
                LinkSpec::Explicit(a, b, length) => Link::new(a, b, length),
            };
            links.push(link);
        }
        Topology::new(self.name, self.particles, links, self.gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_derives_and_keeps_explicit_lengths() {
        let topology = TopologyBuilder::new("slack")
            .locked(Vec2::new(0.0, 0.0))
            .free(Vec2::new(30.0, 0.0))
            .free(Vec2::new(60.0, 0.0))
            .link(0, 1)
            .link_with_length(1, 2, 45.0)
            .build()
            .expect("valid topology");
        assert_eq!(topology.links()[0].rest_length(), 30.0);
        assert_eq!(topology.links()[1].rest_length(), 45.0);
    }

    #[test]
    fn chain_links_consecutive_indices() {
        let topology = TopologyBuilder::new("chain")
            .locked(Vec2::ZERO)
            .free(Vec2::new(0.0, 10.0))
            .free(Vec2::new(0.0, 20.0))
            .chain(&[0, 1, 2])
            .build()
            .expect("valid topology");
        let endpoints: Vec<_> = topology.links().iter().map(Link::endpoints).collect();
        assert_eq!(endpoints, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn out_of_bounds_link_is_rejected() {
        let err = TopologyBuilder::new("broken")
            .free(Vec2::ZERO)
            .link(0, 3)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TopologyError::LinkOutOfBounds {
                link: 0,
                index: 3,
                count: 1
            }
        );
    }

    #[test]
    fn self_link_and_bad_lengths_are_rejected() {
        let err = TopologyBuilder::new("loop")
            .free(Vec2::ZERO)
            .link(0, 0)
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::SelfLink { link: 0, index: 0 });

        let err = TopologyBuilder::new("nan")
            .free(Vec2::ZERO)
            .free(Vec2::X)
            .link_with_length(0, 1, f32::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, TopologyError::InvalidRestLength { link: 0, .. }));
    }

    #[test]
    fn empty_topology_is_rejected() {
        let err = TopologyBuilder::new("nothing").build().unwrap_err();
        assert_eq!(err, TopologyError::Empty);
    }
}
