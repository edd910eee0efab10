use glam::Vec2;
use log::debug;

use crate::{config::sanitize_grab_radius, core::particle::Particle};

/// A particle held by the pointer, with the offset captured when it was picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    pub index: usize,
    pub offset: Vec2,
}

/// Tracks the pointer and overrides the position of the grabbed particle each tick.
#[derive(Debug, Clone)]
pub struct InteractionController {
    pointer: Vec2,
    held: bool,
    grab: Option<Grab>,
    radius: f32,
}

impl InteractionController {
    /// Non-positive or non-finite radii fall back to the default grab radius.
    pub fn new(radius: f32) -> Self {
        Self {
            pointer: Vec2::ZERO,
            held: false,
            grab: None,
            radius: sanitize_grab_radius(radius),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.grab.map(|grab| grab.index)
    }

    /// Presses the pointer at `pointer`.
    ///
    /// Picks up the nearest locked particle strictly inside the grab radius. While a grab is
    /// already active the pointer just moves and the existing grab continues.
    pub fn begin_grab(&mut self, particles: &[Particle], pointer: Vec2) -> Option<usize> {
        self.pointer = pointer;
        self.held = true;

        if let Some(grab) = self.grab {
            return Some(grab.index);
        }

        let radius_sq = self.radius * self.radius;
        let candidate = particles
            .iter()
            .enumerate()
            .filter(|(_, particle)| particle.state.is_grabbable())
            .map(|(index, particle)| (index, particle.position.distance_squared(pointer)))
            .filter(|&(_, distance_sq)| distance_sq < radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let (index, _) = candidate?;
        let offset = particles[index].position - pointer;
        self.grab = Some(Grab { index, offset });
        debug!("grabbed particle {index} with offset {offset}");
        Some(index)
    }

    /// Releases the pointer. Nothing is restored; the particle stays where it was dropped.
    pub fn end_grab(&mut self) {
        self.held = false;
        if let Some(grab) = self.grab.take() {
            debug!("released particle {}", grab.index);
        }
    }

    /// Forgets the grab without touching the pointer button, e.g. when the store is replaced.
    pub fn clear(&mut self) {
        self.grab = None;
    }

    /// Pins the grabbed particle to `pointer + offset` while the pointer is held.
    pub fn apply(&self, particles: &mut [Particle]) {
        if !self.held {
            return;
        }
        if let Some(grab) = self.grab {
            if let Some(particle) = particles.get_mut(grab.index) {
                particle.position = self.pointer + grab.offset;
            }
        }
    }
}
