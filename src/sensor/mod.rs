//! Device/sensor tree consumed from the hardware telemetry provider.
//!
//! The provider is an external collaborator. It is re-enumerated on demand
//! through [`SensorSource::snapshot`] and every enumeration yields a fresh,
//! immutable [`Snapshot`]. Nothing in this crate mutates a snapshot.
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::sensor::{Device, HardwareType, SensorType, Snapshot};
//!
//! let snapshot = Snapshot::new(vec![
//!     Device::new("/cpu/0", HardwareType::Cpu, "Ryzen 7 7840HS")
//!         .with_sensor(SensorType::Temperature, "Core (Tctl/Tdie)", 61.5),
//! ]);
//! assert_eq!(snapshot.devices().len(), 1);
//! ```

mod types;


use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

#[cfg(test)]
use mockall::automock;

pub use types::{Device, DeviceId, HardwareType, Sensor, SensorLocator, SensorType};

use crate::error::Result;

/// Provider of device/sensor tree snapshots
#[cfg_attr(test, automock)]
pub trait SensorSource: Send + Sync {
    /// Enumerate the current device tree and read every sensor
    fn snapshot(&self) -> Result<Snapshot>;
}

impl<F> SensorSource for F
where
    F: Fn() -> Result<Snapshot> + Send + Sync,
{
    fn snapshot(&self) -> Result<Snapshot> {
        self()
    }
}

/// One enumeration of the device tree, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    devices: Vec<Device>,
}

impl Snapshot {
    pub fn new(devices: Vec<Device>) -> Self {
        Self { devices }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, index: usize) -> Option<&Device> {
        self.devices.get(index)
    }

    pub fn sensor(&self, locator: SensorLocator) -> Option<&Sensor> {
        self.devices.get(locator.device)?.sensors.get(locator.sensor)
    }

    /// Finite reading behind a locator, if any
    pub fn reading(&self, locator: SensorLocator) -> Option<f32> {
        self.sensor(locator).and_then(Sensor::reading)
    }

    /// Index of the device carrying `id`
    pub fn position(&self, id: &DeviceId) -> Option<usize> {
        self.devices.iter().position(|d| &d.id == id)
    }

    /// First device of the given hardware type, with its index
    pub fn first_of(&self, hardware_type: HardwareType) -> Option<(usize, &Device)> {
        self.devices
            .iter()
            .enumerate()
            .find(|(_, d)| d.hardware_type == hardware_type)
    }

    /// All devices of the given hardware type, with their indices
    pub fn of_type(&self, hardware_type: HardwareType) -> impl Iterator<Item = (usize, &Device)> {
        self.devices
            .iter()
            .enumerate()
            .filter(move |(_, d)| d.hardware_type == hardware_type)
    }

    /// Hash of the device tree's shape.
    ///
    /// Covers device ids, types and names plus each sensor's type and name.
    /// Sensor values are excluded so a value-only refresh keeps the fingerprint.
    pub fn topology_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.devices.len().hash(&mut hasher);
        for device in &self.devices {
            device.id.hash(&mut hasher);
            device.parent.hash(&mut hasher);
            device.hardware_type.hash(&mut hasher);
            device.name.hash(&mut hasher);
            device.sensors.len().hash(&mut hasher);
            for sensor in &device.sensors {
                sensor.sensor_type.hash(&mut hasher);
                sensor.name.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}
