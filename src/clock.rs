//! Fixed-rate simulation clock running physics on its own thread.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{error, info};
use parking_lot::Mutex;

use crate::{error::SimulationError, utils::logging::warn_if_tick_budget_exceeded, world::SimulationState};

/// Deadline scheduler on a monotonic clock.
///
/// Each call to [`wait`](Self::wait) sleeps until one interval after the previous tick and
/// reports how long the tick actually took.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    last_tick: Instant,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last_tick: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Instant {
        self.last_tick + self.interval
    }

    /// Time left before the next tick is due; zero once the deadline has passed.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.deadline().saturating_duration_since(now)
    }

    /// Marks a tick at `now` and returns the delta since the previous one.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        delta
    }

    /// Sleeps until the deadline, then advances. Returns the measured inter-tick delta.
    pub fn wait(&mut self) -> Duration {
        let remaining = self.time_until_next(Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.advance(Instant::now())
    }
}

/// Handle to the physics thread.
///
/// The thread exclusively mutates the shared state during a tick and stops once the shutdown
/// flag is raised. Dropping the handle shuts the thread down and joins it.
pub struct SimulationClock {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SimulationClock {
    pub fn spawn(
        state: Arc<Mutex<SimulationState>>,
        interval: Duration,
    ) -> Result<Self, SimulationError> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("rope-physics".into())
            .spawn(move || run(state, flag, interval))?;
        info!(
            "simulation clock started at {:.1} Hz",
            1.0 / interval.as_secs_f32()
        );
        Ok(Self {
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Raises the shutdown flag and joins the thread. Idempotent.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => info!("simulation clock stopped"),
                Err(_) => error!("simulation thread panicked before shutdown"),
            }
        }
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(state: Arc<Mutex<SimulationState>>, shutdown: Arc<AtomicBool>, interval: Duration) {
    let mut clock_loop = ClockLoop::new(interval);
    while !shutdown.load(Ordering::Acquire) {
        clock_loop.step(&state);
    }
}

/// Body of the clock thread. Each tick integrates with the delta measured after the
/// previous one; the first tick sees dt = 0.
struct ClockLoop {
    scheduler: TickScheduler,
    dt: f32,
}

impl ClockLoop {
    fn new(interval: Duration) -> Self {
        Self {
            scheduler: TickScheduler::new(interval),
            dt: 0.0,
        }
    }

    fn step(&mut self, state: &Mutex<SimulationState>) {
        let started = Instant::now();
        {
            let mut state = state.lock();
            if !state.is_paused() {
                state.tick(self.dt);
            }
        }
        warn_if_tick_budget_exceeded(started.elapsed(), self.scheduler.interval());

        let delta = self.scheduler.wait();
        self.dt = delta.as_secs_f32();
        state.lock().record_tick_duration(delta);
    }
}
