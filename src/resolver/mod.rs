//! Composite metric resolution.
//!
//! Metrics that a single catalog lookup cannot supply are computed here from
//! the catalog plus raw sensor lists memoized per topology scan: averaged CPU
//! load, hottest CPU temperature, corrected CPU clock, sanity-filtered power
//! and clock readings, VRAM percentage and the detected RAM total.
//!
//! Every resolver returns a [`Resolved`]; a missing or implausible sensor is a
//! [`MissingValue`], never a panic or an error.

pub mod constants;
mod cpu;
mod gpu;
mod memo;
mod memory;


use tracing::warn;

use crate::catalog::SensorCatalog;
use crate::config::Settings;
use crate::error::{MissingValue, Resolved};
use crate::metric::MetricKey;
use crate::sensor::{HardwareType, Sensor, SensorLocator, SensorType, Snapshot};

pub use memo::ScanMemo;

/// A composite resolver function
pub type Composite = fn(&mut ResolveContext<'_>) -> Resolved;

/// Composite resolver for `key`, if the key needs more than a catalog read
pub fn composite_for(key: MetricKey) -> Option<Composite> {
    match key {
        MetricKey::CpuLoad => Some(cpu::load),
        MetricKey::CpuTemp => Some(cpu::temperature),
        MetricKey::CpuClock => Some(cpu::clock),
        MetricKey::CpuPower => Some(cpu::power),
        MetricKey::GpuClock => Some(gpu::clock),
        MetricKey::GpuPower => Some(gpu::power),
        MetricKey::GpuVram => Some(gpu::vram_percent),
        MetricKey::MemLoad => Some(memory::load),
        _ => None,
    }
}

/// Everything a composite resolver may read or learn during one call.
///
/// Borrowed from the engine state while its lock is held.
pub struct ResolveContext<'a> {
    pub snapshot: &'a Snapshot,
    pub catalog: &'a SensorCatalog,
    pub memo: &'a mut ScanMemo,
    pub settings: &'a mut Settings,
    /// Set when a learned value was written into `settings`
    pub settings_dirty: &'a mut bool,
    /// Latest OS utilization counter, if the host feeds one
    pub system_cpu_load: Option<f32>,
}

impl<'a> ResolveContext<'a> {
    pub fn read(&self, key: MetricKey) -> Resolved {
        self.catalog.read(key, self.snapshot)
    }

    pub fn reading(&self, locator: SensorLocator) -> Option<f32> {
        self.snapshot.reading(locator)
    }

    /// Raise the max record for `key` and mark settings dirty if it moved
    pub fn record_max(&mut self, key: MetricKey, value: f32) {
        if self.settings.update_max_record(key, value) {
            *self.settings_dirty = true;
        }
    }

    pub fn mark_dirty(&mut self) {
        *self.settings_dirty = true;
    }
}

/// Reject readings above a sanity bound
pub(crate) fn within_bound(key: MetricKey, value: f32, bound: f32) -> Resolved {
    if value > bound {
        warn!(key = %key, value, bound, "Discarding implausible reading");
        return Err(MissingValue::Implausible { value, bound });
    }
    Ok(value)
}

/// Locators of sensors of one type on CPU devices, in enumeration order
pub(crate) fn cpu_sensors<P>(snapshot: &Snapshot, sensor_type: SensorType, predicate: P) -> Vec<SensorLocator>
where
    P: Fn(&Sensor) -> bool,
{
    snapshot
        .of_type(HardwareType::Cpu)
        .flat_map(|(device_index, device)| {
            device
                .sensors_of(sensor_type)
                .filter(|(_, sensor)| predicate(sensor))
                .map(move |(sensor_index, _)| SensorLocator::new(device_index, sensor_index))
                .collect::<Vec<_>>()
        })
        .collect()
}
