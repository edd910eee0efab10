use super::{link::Link, particle::Particle, topology::Topology, types::GravityDirection};

/// Live particles and links of the active topology.
///
/// Only replaced wholesale through [`ParticleStore::load`]; physics mutates particle positions in place.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    links: Vec<Link>,
    gravity: GravityDirection,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_topology(topology: &Topology) -> Self {
        let mut store = Self::new();
        store.load(topology);
        store
    }

    /// Replaces every particle and link with the topology's initial definition.
    pub fn load(&mut self, topology: &Topology) {
        self.particles.clear();
        self.particles.extend_from_slice(topology.particles());
        self.links.clear();
        self.links.extend_from_slice(topology.links());
        self.gravity = topology.gravity();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Mutable particles alongside the read-only links, for the solver.
    pub fn split_mut(&mut self) -> (&mut [Particle], &[Link]) {
        (&mut self.particles, &self.links)
    }

    pub fn gravity(&self) -> GravityDirection {
        self.gravity
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::topology::TopologyBuilder;
    use glam::Vec2;

    #[test]
    fn load_replaces_previous_contents() {
        let first = TopologyBuilder::new("first")
            .locked(Vec2::ZERO)
            .free(Vec2::new(0.0, 10.0))
            .free(Vec2::new(0.0, 20.0))
            .chain(&[0, 1, 2])
            .build()
            .unwrap();
        let second = TopologyBuilder::new("second")
            .free(Vec2::new(5.0, 5.0))
            .build()
            .unwrap();

        let mut store = ParticleStore::from_topology(&first);
        store.particles_mut()[1].position = Vec2::new(99.0, 99.0);
        store.load(&second);

        assert_eq!(store.particles(), second.particles());
        assert!(store.links().is_empty());

        store.load(&first);
        assert_eq!(store.particles(), first.particles());
        assert_eq!(store.links(), first.links());
    }
}
