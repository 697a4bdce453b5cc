#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure playback system that converts elapsed time into step commands.
//!
//! The world never measures time itself. Adapters forward wall-clock deltas as
//! `Command::Tick`, the world echoes them as `Event::TimeAdvanced`, and this
//! system decides how many generations those deltas are worth at the
//! configured step rate.

use std::time::Duration;

use cellular_sandbox_core::{Command, Event, StepRate};

/// Upper bound on the steps emitted for a single tick.
///
/// A tick that would owe more steps than this drops the backlog instead of
/// trying to catch up.
pub const MAX_STEPS_PER_TICK: u32 = 32;

/// Playback system that paces `Command::Step` emission.
#[derive(Clone, Debug)]
pub struct Cadence {
    running: bool,
    rate: StepRate,
    accumulated: Duration,
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new()
    }
}

impl Cadence {
    /// Creates a stopped cadence running at the default rate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: false,
            rate: StepRate::DEFAULT,
            accumulated: Duration::ZERO,
        }
    }

    /// Reports whether playback is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Step rate currently observed by the system.
    #[must_use]
    pub const fn rate(&self) -> StepRate {
        self.rate
    }

    /// Time accumulated towards the next step.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.accumulated
    }

    /// Consumes world events and emits one `Command::Step` per elapsed interval.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::PlaybackChanged { running } => {
                    self.running = *running;
                    if !self.running {
                        self.accumulated = Duration::ZERO;
                    }
                }
                Event::StepRateChanged { rate } => {
                    self.rate = *rate;
                }
                Event::AutomatonSelected { .. } | Event::Cleared => {
                    self.accumulated = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    if self.running {
                        let steps = self.accumulate(*dt);
                        out.extend((0..steps).map(|_| Command::Step));
                    }
                }
                _ => {}
            }
        }
    }

    fn accumulate(&mut self, dt: Duration) -> u32 {
        let interval = self.rate.interval();
        self.accumulated = self.accumulated.saturating_add(dt);

        let owed = self.accumulated.as_nanos() / interval.as_nanos().max(1);
        if owed > u128::from(MAX_STEPS_PER_TICK) {
            self.accumulated = Duration::ZERO;
            return MAX_STEPS_PER_TICK;
        }

        // owed <= MAX_STEPS_PER_TICK here, so the narrowing cannot truncate.
        let steps = owed as u32;
        self.accumulated = self.accumulated.saturating_sub(interval * steps);
        steps
    }
}
