//! Device and sensor listings for configuration pickers.
//!
//! Lists are built from the current snapshot and cached until the cache is
//! cleared. An empty result is never cached, so a list requested before the
//! provider finished enumerating is retried on the next call.


use std::collections::HashMap;

use crate::sensor::{Device, HardwareType, Sensor, SensorLocator, SensorType, Snapshot};

/// The lists offered to configuration UIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    Networks,
    Disks,
    Fans,
    BoardTemps,
}

#[derive(Debug, Clone, Default)]
pub struct ListingCache {
    lists: HashMap<Listing, Vec<String>>,
}

impl ListingCache {
    /// Cached list, building it from `snapshot` on a miss
    pub fn get_or_build(&mut self, listing: Listing, snapshot: &Snapshot) -> Vec<String> {
        if let Some(cached) = self.lists.get(&listing) {
            return cached.clone();
        }
        let list = build(listing, snapshot);
        if !list.is_empty() {
            self.lists.insert(listing, list.clone());
        }
        list
    }

    pub fn is_cached(&self, listing: Listing) -> bool {
        self.lists.contains_key(&listing)
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

/// Build a list from scratch
pub fn build(listing: Listing, snapshot: &Snapshot) -> Vec<String> {
    match listing {
        Listing::Networks => device_names(snapshot, HardwareType::Network),
        Listing::Disks => device_names(snapshot, HardwareType::Storage),
        Listing::Fans => board_sensor_labels(snapshot, SensorType::Fan),
        Listing::BoardTemps => board_sensor_labels(snapshot, SensorType::Temperature),
    }
}

/// Distinct device names of one type, in enumeration order
fn device_names(snapshot: &Snapshot, hardware_type: HardwareType) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (_, device) in snapshot.of_type(hardware_type) {
        if !names.contains(&device.name) {
            names.push(device.name.clone());
        }
    }
    names
}

/// Devices whose fans and temperatures describe the board or chassis
fn is_board_device(hardware_type: HardwareType) -> bool {
    !(hardware_type.is_gpu()
        || matches!(
            hardware_type,
            HardwareType::Cpu | HardwareType::Storage | HardwareType::Memory | HardwareType::Network
        ))
}

fn board_sensors(snapshot: &Snapshot, sensor_type: SensorType) -> impl Iterator<Item = (SensorLocator, &Device, &Sensor)> {
    snapshot
        .devices()
        .iter()
        .enumerate()
        .filter(|(_, d)| is_board_device(d.hardware_type))
        .flat_map(move |(device_index, device)| {
            device
                .sensors_of(sensor_type)
                .map(move |(sensor_index, sensor)| (SensorLocator::new(device_index, sensor_index), device, sensor))
        })
}

fn board_sensor_labels(snapshot: &Snapshot, sensor_type: SensorType) -> Vec<String> {
    let mut labels: Vec<String> = board_sensors(snapshot, sensor_type)
        .map(|(_, device, sensor)| smart_name(snapshot, device, sensor))
        .collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Picker label `"{sensor} [{device}]"`.
///
/// SuperIO chips are named after the motherboard, which is what users
/// recognize.
pub fn smart_name(snapshot: &Snapshot, device: &Device, sensor: &Sensor) -> String {
    let device_name = match device.hardware_type {
        HardwareType::SuperIo => snapshot
            .first_of(HardwareType::Motherboard)
            .map_or(device.name.as_str(), |(_, board)| board.name.as_str()),
        _ => device.name.as_str(),
    };
    format!("{} [{}]", sensor.name, device_name)
}

/// Locate a fan or board temperature sensor by its picker label
pub fn find_by_label(snapshot: &Snapshot, label: &str) -> Option<SensorLocator> {
    [SensorType::Fan, SensorType::Temperature]
        .into_iter()
        .flat_map(|sensor_type| board_sensors(snapshot, sensor_type))
        .find(|(_, device, sensor)| smart_name(snapshot, device, sensor) == label)
        .map(|(locator, _, _)| locator)
}
