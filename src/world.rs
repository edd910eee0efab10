use std::time::Duration;

use glam::Vec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::TopologyCatalog,
    config::SimulationConfig,
    core::{link::Link, particle::Particle, store::ParticleStore, topology::Topology},
    dynamics::{
        integrator::Integrator,
        interaction::{Grab, InteractionController},
        solver::{RelaxationSolver, SolverStepMetrics},
    },
    utils::logging::ScopedTimer,
};

/// Whether the clock advances physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
}

impl RunState {
    pub fn toggled(self) -> Self {
        match self {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        }
    }
}

/// Copy of everything the presentation side draws, taken under the lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub particles: Vec<Particle>,
    pub links: Vec<Link>,
    pub run_state: RunState,
    pub last_tick: Duration,
    pub ticks: u64,
    pub grabbed: Option<usize>,
    pub topology_name: String,
    pub topology_index: usize,
    pub topology_count: usize,
}

impl Snapshot {
    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    /// Simulation rate implied by the last tick, for HUD display.
    pub fn ticks_per_second(&self) -> f32 {
        let seconds = self.last_tick.as_secs_f32();
        if seconds > 0.0 {
            1.0 / seconds
        } else {
            0.0
        }
    }
}

/// The single shared simulation state: live store of the active topology plus control fields.
#[derive(Debug, Clone)]
pub struct SimulationState {
    catalog: TopologyCatalog,
    active: usize,
    store: ParticleStore,
    integrator: Integrator,
    solver: RelaxationSolver,
    interaction: InteractionController,
    run_state: RunState,
    last_tick: Duration,
    ticks: u64,
    last_metrics: SolverStepMetrics,
    config: SimulationConfig,
}

impl SimulationState {
    /// Loads the first topology of the catalog; starts paused.
    pub fn new(catalog: TopologyCatalog, config: SimulationConfig) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            catalog,
            active: 0,
            store: ParticleStore::new(),
            integrator: Integrator::from_config(&config),
            solver: RelaxationSolver::new(config.solver_iterations),
            interaction: InteractionController::new(config.grab_radius),
            run_state: RunState::Paused,
            last_tick: Duration::ZERO,
            ticks: 0,
            last_metrics: SolverStepMetrics::default(),
            config,
        };
        state.load_active();
        state
    }

    // `active` is only ever set to an index checked against the non-empty catalog.
    fn active_topology(&self) -> &Topology {
        &self.catalog.topologies()[self.active]
    }

    fn load_active(&mut self) {
        let topology = &self.catalog.topologies()[self.active];
        self.store.load(topology);
        self.interaction.clear();
        debug!(
            "loaded topology \"{}\" ({}/{}): {} particles, {} links",
            topology.name(),
            self.active + 1,
            self.catalog.len(),
            self.store.particles().len(),
            self.store.links().len()
        );
    }

    /// Advances the simulation by one tick of `dt` seconds, regardless of the run state.
    ///
    /// Integration, then the grab override, then relaxation.
    pub fn tick(&mut self, dt: f32) {
        let _timer = ScopedTimer::new("tick");
        {
            let _timer = ScopedTimer::new("integrator");
            let gravity = self.store.gravity();
            self.integrator.step(self.store.particles_mut(), gravity, dt);
        }
        self.interaction.apply(self.store.particles_mut());
        let metrics = {
            let _timer = ScopedTimer::new("solver");
            let (particles, links) = self.store.split_mut();
            self.solver.solve(particles, links, self.interaction.grabbed())
        };
        trace!("tick dt={dt:.5}s {metrics:?}");
        self.last_metrics = metrics;
        self.ticks += 1;
    }

    /// Number of physics ticks executed since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn record_tick_duration(&mut self, duration: Duration) {
        self.last_tick = duration;
    }

    pub fn last_tick_duration(&self) -> Duration {
        self.last_tick
    }

    pub fn last_metrics(&self) -> &SolverStepMetrics {
        &self.last_metrics
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn toggle_pause(&mut self) {
        self.run_state = self.run_state.toggled();
        debug!("simulation {:?}", self.run_state);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.run_state = if paused {
            RunState::Paused
        } else {
            RunState::Running
        };
    }

    /// Restores the active topology's initial definition. Keeps the run state.
    pub fn reset(&mut self) {
        self.load_active();
    }

    /// Switches to the next topology and pauses. No-op on the last one.
    pub fn next_topology(&mut self) -> bool {
        self.select_topology(self.active + 1)
    }

    /// Switches to the previous topology and pauses. No-op on the first one.
    pub fn previous_topology(&mut self) -> bool {
        match self.active.checked_sub(1) {
            Some(index) => self.select_topology(index),
            None => false,
        }
    }

    /// Loads topology `index` and pauses. Returns false if the index is out of range.
    pub fn select_topology(&mut self, index: usize) -> bool {
        if index >= self.catalog.len() {
            return false;
        }
        self.active = index;
        self.run_state = RunState::Paused;
        self.load_active();
        true
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.interaction.set_pointer(pointer);
    }

    pub fn pointer(&self) -> Vec2 {
        self.interaction.pointer()
    }

    /// Presses the pointer; grabs the nearest locked particle within the grab radius.
    pub fn begin_grab(&mut self, pointer: Vec2) -> Option<usize> {
        self.interaction.begin_grab(self.store.particles(), pointer)
    }

    pub fn end_grab(&mut self) {
        self.interaction.end_grab();
    }

    pub fn grabbed(&self) -> Option<usize> {
        self.interaction.grabbed()
    }

    pub fn grab(&self) -> Option<Grab> {
        self.interaction.grab()
    }

    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    pub fn links(&self) -> &[Link] {
        self.store.links()
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn topology_name(&self) -> &str {
        self.active_topology().name()
    }

    pub fn topology_index(&self) -> usize {
        self.active
    }

    pub fn topology_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn catalog(&self) -> &TopologyCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            particles: self.store.particles().to_vec(),
            links: self.store.links().to_vec(),
            run_state: self.run_state,
            last_tick: self.last_tick,
            ticks: self.ticks,
            grabbed: self.grabbed(),
            topology_name: self.topology_name().to_owned(),
            topology_index: self.active,
            topology_count: self.catalog.len(),
        }
    }
}
