//! Rope Sim – interactive 2D rope and soft-body simulation core.
//!
//! Point masses joined by inextensible links are advanced with Verlet integration and an
//! iterative distance-constraint relaxation, on a fixed-rate clock thread that is decoupled
//! from whatever front end draws the ropes. Front ends read [`Snapshot`]s and send commands
//! through [`RopeEngine`]; all access is serialized by one lock around [`SimulationState`].

pub mod catalog;
pub mod clock;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

use std::sync::Arc;

pub use glam::Vec2;
use log::info;
use parking_lot::Mutex;

pub use catalog::TopologyCatalog;
pub use clock::{SimulationClock, TickScheduler};
pub use config::SimulationConfig;
pub use crate::core::{
    link::Link,
    particle::Particle,
    store::ParticleStore,
    topology::{Topology, TopologyBuilder},
    types::{GravityDirection, PinState},
};
pub use dynamics::{
    integrator::Integrator,
    interaction::{Grab, InteractionController},
    solver::{LinkOutcome, RelaxationSolver, SolverStepMetrics},
};
pub use error::{SimulationError, TopologyError};
pub use world::{RunState, SimulationState, Snapshot};

/// High-level handle owning the shared [`SimulationState`] and the clock thread driving it.
///
/// Every command takes the lock only long enough to mutate or copy state.
pub struct RopeEngine {
    state: Arc<Mutex<SimulationState>>,
    clock: SimulationClock,
}

impl RopeEngine {
    /// Loads the first topology of `catalog` (paused) and starts the clock thread.
    pub fn new(catalog: TopologyCatalog, config: SimulationConfig) -> Result<Self, SimulationError> {
        let interval = config.tick_interval();
        let state = Arc::new(Mutex::new(SimulationState::new(catalog, config)));
        let clock = SimulationClock::spawn(Arc::clone(&state), interval)?;
        Ok(Self { state, clock })
    }

    /// Starts an engine over the built-in topologies.
    pub fn with_builtin_topologies(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::new(TopologyCatalog::builtin()?, config)
    }

    /// Copies the drawable state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot()
    }

    /// Runs `f` with the lock held. Keep `f` short; the clock thread waits on it.
    pub fn with_state<R>(&self, f: impl FnOnce(&SimulationState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Returns whether the clock thread is still alive.
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Flips between running and paused.
    pub fn toggle_pause(&self) {
        self.state.lock().toggle_pause();
    }

    /// Pauses or resumes the simulation.
    pub fn set_paused(&self, paused: bool) {
        self.state.lock().set_paused(paused);
    }

    /// Restores the active topology to its initial definition, dropping any grab.
    pub fn reset(&self) {
        self.state.lock().reset();
    }

    /// Loads the next topology and pauses; returns false on the last one.
    pub fn next_topology(&self) -> bool {
        self.state.lock().next_topology()
    }

    /// Loads the previous topology and pauses; returns false on the first one.
    pub fn previous_topology(&self) -> bool {
        self.state.lock().previous_topology()
    }

    /// Loads topology `index` and pauses; returns false if it is out of range.
    pub fn select_topology(&self, index: usize) -> bool {
        self.state.lock().select_topology(index)
    }

    /// Moves the pointer the grabbed particle follows.
    pub fn set_pointer(&self, pointer: Vec2) {
        self.state.lock().set_pointer(pointer);
    }

    /// Presses the pointer and returns the index of the grabbed particle, if any.
    pub fn begin_grab(&self, pointer: Vec2) -> Option<usize> {
        self.state.lock().begin_grab(pointer)
    }

    /// Releases the pointer and the grabbed particle.
    pub fn end_grab(&self) {
        self.state.lock().end_grab();
    }

    /// Stops and joins the clock thread. The state is never touched by physics afterwards.
    pub fn shutdown(mut self) {
        self.clock.shutdown();
        info!("rope engine shut down");
    }
}
