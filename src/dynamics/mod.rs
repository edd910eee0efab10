//! Simulation dynamics: Verlet integration, pointer interaction, and constraint relaxation.

pub mod integrator;
pub mod interaction;
pub mod solver;

pub use integrator::Integrator;
pub use interaction::{Grab, InteractionController};
pub use solver::{LinkOutcome, RelaxationSolver, SolverStepMetrics};
