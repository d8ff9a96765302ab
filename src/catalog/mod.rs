//! Sensor catalog indexing.
//!
//! Classifies every raw sensor of a snapshot into at most one canonical
//! [`MetricKey`] using the keyword table in [`rules`] and keeps the winning
//! sensor per key. A catalog is always built from one complete snapshot and
//! replaced wholesale, never patched.
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::catalog::SensorCatalog;
//! use overlay_metrics::metric::MetricKey;
//! use overlay_metrics::sensor::{Device, HardwareType, SensorType, Snapshot};
//!
//! let snapshot = Snapshot::new(vec![
//!     Device::new("/amdcpu/0", HardwareType::Cpu, "AMD Ryzen 9 7950X")
//!         .with_sensor(SensorType::Temperature, "Core (Tctl/Tdie)", 68.0)
//!         .with_sensor(SensorType::Power, "Package", 142.0),
//! ]);
//!
//! let catalog = SensorCatalog::build(&snapshot);
//! assert_eq!(catalog.read(MetricKey::CpuTemp, &snapshot), Ok(68.0));
//! assert_eq!(catalog.read(MetricKey::CpuPower, &snapshot), Ok(142.0));
//! ```

pub mod rules;


use std::collections::HashMap;

use crate::error::{MissingValue, Resolved};
use crate::metric::MetricKey;
use crate::sensor::{Device, Sensor, SensorLocator, Snapshot};

use rules::RULES;

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    locator: SensorLocator,
    /// Index of the rule that matched; lower wins
    priority: usize,
}

/// Canonical key to sensor mapping for one topology scan
#[derive(Debug, Clone, Default)]
pub struct SensorCatalog {
    entries: HashMap<MetricKey, CatalogEntry>,
}

impl SensorCatalog {
    /// Index a complete snapshot.
    ///
    /// A sensor takes the key of the first rule it matches. Per key, the
    /// sensor matched by the highest-priority rule wins and ties go to the
    /// first sensor in indexing order.
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut entries: HashMap<MetricKey, CatalogEntry> = HashMap::new();

        for device_index in indexing_order(snapshot) {
            let device = &snapshot.devices()[device_index];
            for (sensor_index, sensor) in device.sensors.iter().enumerate() {
                let Some((priority, key)) = classify_with_priority(device, sensor) else {
                    continue;
                };
                let candidate = CatalogEntry {
                    locator: SensorLocator::new(device_index, sensor_index),
                    priority,
                };
                entries
                    .entry(key)
                    .and_modify(|existing| {
                        if candidate.priority < existing.priority {
                            *existing = candidate;
                        }
                    })
                    .or_insert(candidate);
            }
        }

        Self { entries }
    }

    pub fn locate(&self, key: MetricKey) -> Option<SensorLocator> {
        self.entries.get(&key).map(|e| e.locator)
    }

    /// Current reading of the sensor indexed for `key`
    pub fn read(&self, key: MetricKey, snapshot: &Snapshot) -> Resolved {
        let locator = self.locate(key).ok_or(MissingValue::NoSensor)?;
        snapshot.reading(locator).ok_or(MissingValue::NoReading)
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed keys in canonical order
    pub fn keys(&self) -> Vec<MetricKey> {
        let mut keys: Vec<MetricKey> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }
}

/// Canonical key for a single sensor, if any rule matches it
pub fn classify(device: &Device, sensor: &Sensor) -> Option<MetricKey> {
    classify_with_priority(device, sensor).map(|(_, key)| key)
}

fn classify_with_priority(device: &Device, sensor: &Sensor) -> Option<(usize, MetricKey)> {
    RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(device, sensor))
        .map(|(index, rule)| (index, rule.key))
}

/// Device indices in indexing order: provider order, except that integrated
/// GPUs move behind every discrete GPU.
fn indexing_order(snapshot: &Snapshot) -> Vec<usize> {
    let mut order: Vec<usize> = (0..snapshot.devices().len()).collect();
    order.sort_by_key(|&i| {
        let hw = snapshot.devices()[i].hardware_type;
        u8::from(hw.is_gpu() && !hw.is_discrete_gpu())
    });
    order
}

/// The GPU preferred for GPU metrics: first discrete GPU, else first GPU
pub fn best_gpu(snapshot: &Snapshot) -> Option<usize> {
    indexing_order(snapshot)
        .into_iter()
        .find(|&i| snapshot.devices()[i].hardware_type.is_gpu())
}
