//! Global configuration constants and the tunable simulation settings.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Default gravity vector in pixels per second squared (screen space, +Y is down).
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 980.0];

/// Scalar applied to gravity before it is integrated.
pub const DEFAULT_GRAVITY_DAMPING: f32 = 1.0;

/// Target simulation rate of the clock thread, in ticks per second.
pub const DEFAULT_TICK_RATE: f32 = 60.0;

/// Number of relaxation passes performed per tick.
pub const DEFAULT_SOLVER_ITERATIONS: u32 = 5;

/// Radius (in pixels) within which a locked particle can be grabbed.
pub const DEFAULT_GRAB_RADIUS: f32 = 18.0;

/// Particle count from which the integrator fans out over rayon.
pub const PARALLEL_INTEGRATION_THRESHOLD: usize = 1024;

/// Tunable parameters shared by the integrator, solver, interaction controller and clock.
///
/// ```
/// use rope_sim::config::SimulationConfig;
/// use glam::Vec2;
///
/// let config = SimulationConfig::new()
///     .with_gravity(Vec2::new(0.0, 500.0))
///     .with_solver_iterations(8)
///     .with_tick_rate(120.0);
/// assert_eq!(config.solver_iterations, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: Vec2,
    pub gravity_damping: f32,
    pub tick_rate: f32,
    pub solver_iterations: u32,
    pub grab_radius: f32,
    /// Lets the integrator use rayon for large particle sets (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            gravity_damping: DEFAULT_GRAVITY_DAMPING,
            tick_rate: DEFAULT_TICK_RATE,
            solver_iterations: DEFAULT_SOLVER_ITERATIONS,
            grab_radius: DEFAULT_GRAB_RADIUS,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_damping(mut self, damping: f32) -> Self {
        self.gravity_damping = damping;
        self
    }

    /// Sets the clock rate. Rates whose interval is not a representable, positive
    /// `Duration` fall back to [`DEFAULT_TICK_RATE`].
    pub fn with_tick_rate(mut self, tick_rate: f32) -> Self {
        self.tick_rate = if interval_for_rate(tick_rate).is_some() {
            tick_rate
        } else {
            DEFAULT_TICK_RATE
        };
        self
    }

    pub fn with_solver_iterations(mut self, iterations: u32) -> Self {
        self.solver_iterations = iterations.max(1);
        self
    }

    /// Sets the grab radius. Non-positive or non-finite radii fall back to [`DEFAULT_GRAB_RADIUS`].
    pub fn with_grab_radius(mut self, radius: f32) -> Self {
        self.grab_radius = sanitize_grab_radius(radius);
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Re-applies the setter rules to every field, for configs built by struct literal or
    /// deserialized.
    pub fn sanitized(self) -> Self {
        self.with_tick_rate(self.tick_rate)
            .with_solver_iterations(self.solver_iterations)
            .with_grab_radius(self.grab_radius)
    }

    /// Wall-clock duration the clock aims to spend per tick.
    pub fn tick_interval(&self) -> Duration {
        interval_for_rate(self.tick_rate)
            .unwrap_or_else(|| Duration::from_secs_f32(1.0 / DEFAULT_TICK_RATE))
    }
}

fn interval_for_rate(rate: f32) -> Option<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f32(1.0 / rate)
        .ok()
        .filter(|interval| !interval.is_zero())
}

pub(crate) fn sanitize_grab_radius(radius: f32) -> f32 {
    if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        DEFAULT_GRAB_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = SimulationConfig::new()
            .with_tick_rate(0.0)
            .with_grab_radius(-3.0)
            .with_solver_iterations(0);
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
        assert_eq!(config.grab_radius, DEFAULT_GRAB_RADIUS);
        assert_eq!(config.solver_iterations, 1);
    }

    #[test]
    fn tick_interval_matches_rate() {
        let config = SimulationConfig::new().with_tick_rate(50.0);
        let interval = config.tick_interval().as_secs_f64();
        assert!((interval - 0.020).abs() < 1e-6, "interval = {}", interval);
    }

    #[test]
    fn unrepresentable_tick_rates_fall_back() {
        let default_interval = SimulationConfig::default().tick_interval();

        let config = SimulationConfig::new().with_tick_rate(1e-20);
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
        assert_eq!(config.tick_interval(), default_interval);

        let literal = SimulationConfig {
            tick_rate: 1e-20,
            ..Default::default()
        };
        assert_eq!(literal.tick_interval(), default_interval);

        let huge = SimulationConfig::new().with_tick_rate(f32::MAX);
        assert_eq!(huge.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn sanitized_clamps_literal_configs() {
        let config = SimulationConfig {
            solver_iterations: 0,
            grab_radius: f32::NAN,
            tick_rate: -5.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.solver_iterations, 1);
        assert_eq!(config.grab_radius, DEFAULT_GRAB_RADIUS);
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
    }
}
