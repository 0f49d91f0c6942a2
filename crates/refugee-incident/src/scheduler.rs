//! Delayed incident scheduling.
//!
//! Pushes a future incident onto the host's shared, time-ordered queue.

use incident_events::{IncidentKind, IncidentParms};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::host::IncidentQueue;

/// Delay between accepting a refugee and the pursuers' raid.
pub const DEFAULT_RAID_DELAY: TickRange = TickRange::new(1000, 2500);

/// An inclusive range of ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub min: u64,
    pub max: u64,
}

impl TickRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from `min..=max`.
    ///
    /// An inverted range yields `min`.
    pub fn random_in_range(&self, rng: &mut dyn RngCore) -> u64 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Checks the range works as a delay: every draw at least one tick, not inverted.
    pub fn validate_delay(&self) -> Result<(), ConfigError> {
        if self.min == 0 {
            return Err(ConfigError::Invalid(
                "delay min must be at least 1 tick".to_string(),
            ));
        }
        if self.min > self.max {
            return Err(ConfigError::Invalid(format!(
                "delay is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Queues incidents a random number of ticks into the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedEventScheduler {
    delay: TickRange,
}

impl DelayedEventScheduler {
    /// Fails if `delay` could fire at the current tick or is inverted.
    pub fn new(delay: TickRange) -> Result<Self, ConfigError> {
        delay.validate_delay()?;
        Ok(Self { delay })
    }

    pub fn delay(&self) -> TickRange {
        self.delay
    }

    /// Enqueues `kind` to fire at the current tick plus a delay drawn from
    /// the configured range.
    pub fn schedule<Q: IncidentQueue + ?Sized>(
        &self,
        queue: &mut Q,
        kind: IncidentKind,
        parms: IncidentParms,
        rng: &mut dyn RngCore,
    ) {
        let delay = self.delay.random_in_range(rng);
        let fire_tick = queue.current_tick().saturating_add(delay);

        tracing::info!(
            "Scheduling {} against {} at tick {} (in {} ticks)",
            kind,
            parms.target,
            fire_tick,
            delay
        );
        queue.enqueue(kind, parms, fire_tick);
    }
}

impl Default for DelayedEventScheduler {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RAID_DELAY,
        }
    }
}
