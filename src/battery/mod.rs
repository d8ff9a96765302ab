//! Battery sign correction and simulation.
//!
//! Battery sensors report unsigned power and current magnitudes. The sign is
//! assigned from the operating system's power status:
//!
//! | AC online | Charging | Power / current |
//! |-----------|----------|-----------------|
//! | yes       | yes      | `+|raw|`        |
//! | yes       | no       | `0` (bypass)    |
//! | no        | -        | `-|raw|`        |
//!
//! `BAT.Percent` and `BAT.Voltage` pass through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::battery::{apply_polarity, PowerStatus};
//! use overlay_metrics::metric::MetricKey;
//!
//! assert_eq!(apply_polarity(MetricKey::BatPower, 30.0, PowerStatus::charging()), 30.0);
//! assert_eq!(apply_polarity(MetricKey::BatPower, 30.0, PowerStatus::bypass()), 0.0);
//! assert_eq!(apply_polarity(MetricKey::BatPower, 30.0, PowerStatus::on_battery()), -30.0);
//! ```

pub mod constants;
mod types;


use std::time::Instant;

#[cfg(test)]
use mockall::automock;

pub use types::PowerStatus;

use crate::error::Result;
use crate::metric::MetricKey;

use constants::{simulation, POWER_POLL_INTERVAL};

/// Source of the system power status
#[cfg_attr(test, automock)]
pub trait PowerStatusSource: Send + Sync {
    fn power_status(&self) -> Result<PowerStatus>;
}

impl<F> PowerStatusSource for F
where
    F: Fn() -> Result<PowerStatus> + Send + Sync,
{
    fn power_status(&self) -> Result<PowerStatus> {
        self()
    }
}

/// Sign a raw battery reading according to `status`
pub fn apply_polarity(key: MetricKey, raw: f32, status: PowerStatus) -> f32 {
    match key {
        MetricKey::BatPower | MetricKey::BatCurrent => match (status.ac_online, status.charging) {
            (true, true) => raw.abs(),
            (true, false) => 0.0,
            (false, _) => -raw.abs(),
        },
        _ => raw,
    }
}

/// Synthetic battery reading for `second` of the current minute.
///
/// The first half of each minute is a heavy discharge, the second half a fast
/// charge. Returns `None` for non-battery keys.
pub fn simulated_value(key: MetricKey, second: u32) -> Option<f32> {
    let s = (second % 60) as f32;
    let charging = second % 60 >= simulation::CHARGE_START_SECOND;
    let half = simulation::CHARGE_START_SECOND as f32;

    let voltage = if charging {
        simulation::CHARGE_VOLTAGE_START + (s - half) * simulation::CHARGE_VOLTAGE_STEP
    } else {
        simulation::DISCHARGE_VOLTAGE_START - s * simulation::DISCHARGE_VOLTAGE_STEP
    };
    let power = if charging {
        simulation::CHARGE_POWER_BASE + ((second % 5) * 4) as f32
    } else {
        -(simulation::DISCHARGE_POWER_BASE + ((second % 3) * 5) as f32)
    };
    let percent = if charging {
        (s - half) * (100.0 / half)
    } else {
        100.0 - s * (100.0 / half)
    };

    match key {
        MetricKey::BatPercent => Some(percent.clamp(0.0, 100.0)),
        MetricKey::BatVoltage => Some(voltage),
        MetricKey::BatPower => Some(power),
        MetricKey::BatCurrent => Some(power / voltage),
        _ => None,
    }
}

/// Last known power status and its poll throttle
#[derive(Debug, Clone, Default)]
pub struct PowerTracker {
    status: Option<PowerStatus>,
    last_poll: Option<Instant>,
}

impl PowerTracker {
    pub fn status(&self) -> Option<PowerStatus> {
        self.status
    }

    pub fn set(&mut self, status: PowerStatus) {
        self.status = Some(status);
    }

    /// Reserve a poll slot at `now` if the throttle interval has elapsed
    pub fn claim_poll(&mut self, now: Instant) -> bool {
        let due = self
            .last_poll
            .map_or(true, |at| now.saturating_duration_since(at) >= POWER_POLL_INTERVAL);
        if due {
            self.last_poll = Some(now);
        }
        due
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
