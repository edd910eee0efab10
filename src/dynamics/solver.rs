use crate::{
    config::DEFAULT_SOLVER_ITERATIONS,
    core::{link::Link, particle::Particle},
};

/// Counters gathered over one call to [`RelaxationSolver::solve`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SolverStepMetrics {
    pub iterations: u32,
    pub links_corrected: usize,
    pub links_at_rest: usize,
    pub links_fixed: usize,
    pub links_degenerate: usize,
}

impl SolverStepMetrics {
    fn record(&mut self, outcome: LinkOutcome) {
        match outcome {
            LinkOutcome::Corrected => self.links_corrected += 1,
            LinkOutcome::AtRest => self.links_at_rest += 1,
            LinkOutcome::BothFixed => self.links_fixed += 1,
            LinkOutcome::Degenerate => self.links_degenerate += 1,
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.iterations += other.iterations;
        self.links_corrected += other.links_corrected;
        self.links_at_rest += other.links_at_rest;
        self.links_fixed += other.links_fixed;
        self.links_degenerate += other.links_degenerate;
    }
}

/// What a single link correction did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// At least one endpoint was moved.
    Corrected,
    /// Distance already equals the rest length exactly.
    AtRest,
    /// Neither endpoint may move; the link stays violated.
    BothFixed,
    /// Endpoints coincide, so no direction can be derived.
    Degenerate,
}

/// Gauss-Seidel distance-constraint relaxation.
///
/// Links are visited in definition order. A link with one fixed end (locked, animated or
/// grabbed) only moves its free end; a link with two free ends is corrected symmetrically
/// about its midpoint.
#[derive(Debug, Clone)]
pub struct RelaxationSolver {
    pub iterations: u32,
}

impl Default for RelaxationSolver {
    fn default() -> Self {
        Self::new(DEFAULT_SOLVER_ITERATIONS)
    }
}

impl RelaxationSolver {
    /// At least one pass always runs.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Runs all relaxation passes for one tick.
    pub fn solve(
        &self,
        particles: &mut [Particle],
        links: &[Link],
        grabbed: Option<usize>,
    ) -> SolverStepMetrics {
        let mut metrics = SolverStepMetrics::default();
        for _ in 0..self.iterations.max(1) {
            metrics.merge(&Self::relax_once(particles, links, grabbed));
        }
        metrics
    }

    /// One sweep over every link.
    pub fn relax_once(
        particles: &mut [Particle],
        links: &[Link],
        grabbed: Option<usize>,
    ) -> SolverStepMetrics {
        let mut metrics = SolverStepMetrics {
            iterations: 1,
            ..Default::default()
        };
        for link in links {
            metrics.record(Self::resolve_link(particles, link, grabbed));
        }
        metrics
    }

    pub fn resolve_link(particles: &mut [Particle], link: &Link, grabbed: Option<usize>) -> LinkOutcome {
        let (ia, ib) = link.endpoints();
        let a = particles[ia].position;
        let b = particles[ib].position;
        let rest = link.rest_length();

        let distance = a.distance(b);
        if distance == rest {
            return LinkOutcome::AtRest;
        }
        if distance <= f32::EPSILON {
            return LinkOutcome::Degenerate;
        }

        let scale = rest / distance;
        let a_fixed = !particles[ia].is_free() || grabbed == Some(ia);
        let b_fixed = !particles[ib].is_free() || grabbed == Some(ib);

        match (a_fixed, b_fixed) {
            (true, false) => {
                particles[ib].position = a + (b - a) * scale;
            }
            (false, true) => {
                particles[ia].position = b + (a - b) * scale;
            }
            (false, false) => {
                let center = (a + b) * 0.5;
                particles[ia].position = center + (a - center) * scale;
                particles[ib].position = center + (b - center) * scale;
            }
            (true, true) => return LinkOutcome::BothFixed,
        }
        LinkOutcome::Corrected
    }
}
