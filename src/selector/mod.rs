//! Network adapter and disk selection.
//!
//! `NET.*` and `DISK.*` metrics have no single obvious source device. Each
//! [`DeviceClass`] keeps a [`DeviceSelection`] that moves between these states:
//!
//! - **Uncached**: nothing chosen yet; a learned sticky name is tried first,
//!   then a full scan.
//! - **Cached**: a device is chosen and re-read on every call. It stays chosen
//!   while it shows traffic or the last scan is inside the class cooldown.
//! - **Invalidated**: the cached device id is gone from the current snapshot.
//!   It keeps answering [`DeviceSelection::selected`] until the scan that
//!   replaces it is published, so the swap is a single step for readers.
//!
//! A full scan is a pure function of the snapshot ([`scan`]) so the engine can
//! run it without holding its lock and publish the outcome afterwards.

pub mod constants;


use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::Settings;
use crate::error::{MissingValue, Resolved};
use crate::metric::MetricKey;
use crate::sensor::{Device, DeviceId, HardwareType, Sensor, SensorType, Snapshot};
use crate::utils::{has, has_any};

use constants::{keywords, ACTIVE_THRESHOLD, DISK_COOLDOWN, NETWORK_COOLDOWN, SYSTEM_DRIVE_BONUS, VIRTUAL_PENALTY};

/// A device class whose source device must be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Network,
    Disk,
}

impl DeviceClass {
    /// The class serving `key`, for throughput metrics only
    pub fn of(key: MetricKey) -> Option<Self> {
        match key {
            MetricKey::NetUp | MetricKey::NetDown => Some(DeviceClass::Network),
            MetricKey::DiskRead | MetricKey::DiskWrite => Some(DeviceClass::Disk),
            _ => None,
        }
    }

    pub fn hardware_type(&self) -> HardwareType {
        match self {
            DeviceClass::Network => HardwareType::Network,
            DeviceClass::Disk => HardwareType::Storage,
        }
    }

    /// How long an idle cached device is kept after a scan
    pub fn cooldown(&self) -> Duration {
        match self {
            DeviceClass::Network => NETWORK_COOLDOWN,
            DeviceClass::Disk => DISK_COOLDOWN,
        }
    }

    /// Both direction keyword sets, used for scoring
    fn directions(&self) -> [&'static [&'static str]; 2] {
        match self {
            DeviceClass::Network => [keywords::UPLOAD, keywords::DOWNLOAD],
            DeviceClass::Disk => [keywords::READ, keywords::WRITE],
        }
    }

    pub fn preferred_name<'s>(&self, settings: &'s Settings) -> &'s str {
        match self {
            DeviceClass::Network => settings.preferred_network.trim(),
            DeviceClass::Disk => settings.preferred_disk.trim(),
        }
    }

    pub fn sticky_name<'s>(&self, settings: &'s Settings) -> &'s str {
        match self {
            DeviceClass::Network => &settings.last_auto_network,
            DeviceClass::Disk => &settings.last_auto_disk,
        }
    }

    /// Persist `name` as the learned device; returns true if it changed
    fn remember(&self, settings: &mut Settings, name: &str) -> bool {
        let slot = match self {
            DeviceClass::Network => &mut settings.last_auto_network,
            DeviceClass::Disk => &mut settings.last_auto_disk,
        };
        if slot == name {
            return false;
        }
        *slot = name.to_string();
        true
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceClass::Network => write!(f, "network"),
            DeviceClass::Disk => write!(f, "disk"),
        }
    }
}

/// Sensor name keywords for the direction `key` measures
fn direction_keywords(key: MetricKey) -> &'static [&'static str] {
    match key {
        MetricKey::NetUp => keywords::UPLOAD,
        MetricKey::NetDown => keywords::DOWNLOAD,
        MetricKey::DiskRead => keywords::READ,
        MetricKey::DiskWrite => keywords::WRITE,
        _ => &[],
    }
}

fn first_throughput<'d>(device: &'d Device, names: &[&str]) -> Option<&'d Sensor> {
    device
        .sensors_of(SensorType::Throughput)
        .map(|(_, s)| s)
        .find(|s| has_any(&s.name, names))
}

/// Read the throughput sensor of `device` for the direction of `key`
pub fn read_device(device: &Device, key: MetricKey) -> Resolved {
    let sensor = first_throughput(device, direction_keywords(key)).ok_or(MissingValue::NoSensor)?;
    sensor.reading().ok_or(MissingValue::NoReading)
}

/// Score a candidate device, or `None` if it has no throughput sensor in
/// either direction.
///
/// The score is the sum of both direction readings, shifted by a large
/// penalty for virtual adapters or a large bonus for the system disk.
pub fn score(device: &Device, class: DeviceClass, system_drive: Option<&str>) -> Option<f64> {
    let [first, second] = class.directions().map(|names| first_throughput(device, names));
    if first.is_none() && second.is_none() {
        return None;
    }

    let mut score: f64 = [first, second]
        .into_iter()
        .flatten()
        .filter_map(Sensor::reading)
        .map(f64::from)
        .sum();

    match class {
        DeviceClass::Network => {
            if has_any(&device.name, keywords::VIRTUAL_ADAPTER) {
                score += VIRTUAL_PENALTY;
            }
        }
        DeviceClass::Disk => {
            if let Some(drive) = system_drive.filter(|d| !d.is_empty()) {
                if has(&device.name, drive) || device.sensors.iter().any(|s| has(&s.name, drive)) {
                    score += SYSTEM_DRIVE_BONUS;
                }
            }
        }
    }

    Some(score)
}

/// The device a selection currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDevice {
    pub id: DeviceId,
    pub name: String,
}

impl SelectedDevice {
    fn of(device: &Device) -> Self {
        Self {
            id: device.id.clone(),
            name: device.name.clone(),
        }
    }
}

/// Best candidate of a full scan
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub device: SelectedDevice,
    pub score: f64,
}

/// Result of a full scan: the winner and the winner's reading for the key
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub winner: Option<Candidate>,
    pub target: Resolved,
}

/// Score every device of `class` and pick the highest.
///
/// Ties keep the earliest enumerated device.
pub fn scan(snapshot: &Snapshot, class: DeviceClass, key: MetricKey, system_drive: Option<&str>) -> ScanOutcome {
    let mut best: Option<(&Device, f64)> = None;
    for (_, device) in snapshot.of_type(class.hardware_type()) {
        let Some(score) = score(device, class, system_drive) else {
            continue;
        };
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((device, score));
        }
    }

    match best {
        Some((device, score)) => ScanOutcome {
            winner: Some(Candidate {
                device: SelectedDevice::of(device),
                score,
            }),
            target: read_device(device, key),
        },
        None => ScanOutcome {
            winner: None,
            target: Err(MissingValue::NoDevice),
        },
    }
}

/// What a selection lookup decided
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Answered from the preferred, cached or sticky device
    Done(Resolved),
    /// A full scan is needed
    Scan,
}

/// Selection state for one device class
#[derive(Debug, Clone, Default)]
pub struct DeviceSelection {
    cached: Option<SelectedDevice>,
    last_scan: Option<Instant>,
    scan_count: u64,
    /// Set while a scan handed out by `lookup` is unresolved
    scan_pending: bool,
}

impl DeviceSelection {
    /// Device answering for the class.
    ///
    /// A device that left the topology stays here until the next scan
    /// replaces or drops it, so readers never see a gap while a scan runs.
    pub fn selected(&self) -> Option<&SelectedDevice> {
        self.cached.as_ref()
    }

    /// Number of full scans run for this class
    pub fn scan_count(&self) -> u64 {
        self.scan_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Try to answer `key` without a full scan.
    ///
    /// Adoption of the sticky device happens here, under the caller's lock.
    /// A cached device that left the topology is not dropped: it is replaced
    /// by [`publish`](Self::publish) or dropped by [`abandon`](Self::abandon)
    /// once the scan is resolved. While one scan is pending, other lookups
    /// get the cached reading (or [`MissingValue::NoDevice`]) instead of a
    /// second scan.
    pub fn lookup(
        &mut self,
        snapshot: &Snapshot,
        class: DeviceClass,
        key: MetricKey,
        settings: &Settings,
        now: Instant,
    ) -> Lookup {
        let hardware_type = class.hardware_type();

        let preferred = class.preferred_name(settings);
        if !preferred.is_empty() {
            let found = snapshot
                .of_type(hardware_type)
                .find(|(_, d)| d.name.eq_ignore_ascii_case(preferred));
            if let Some((_, device)) = found {
                return Lookup::Done(read_device(device, key));
            }
        }

        if let Some(selected) = &self.cached {
            match find(snapshot, &selected.id) {
                None => {
                    debug!(class = %class, device = %selected.name, "Cached device left the topology");
                }
                Some(device) => {
                    let value = read_device(device, key);
                    let active = matches!(value, Ok(v) if v > ACTIVE_THRESHOLD);
                    let cooling = self
                        .last_scan
                        .is_some_and(|at| now.saturating_duration_since(at) < class.cooldown());
                    if active || cooling {
                        trace!(class = %class, device = %device.name, "Using cached device");
                        return Lookup::Done(value);
                    }
                    return self.begin_scan(class, value);
                }
            }
        }

        let sticky = class.sticky_name(settings);
        if !sticky.is_empty() {
            let found = snapshot.of_type(hardware_type).find(|(_, d)| d.name == sticky);
            if let Some((_, device)) = found {
                debug!(class = %class, device = %device.name, "Adopted learned device");
                self.cached = Some(SelectedDevice::of(device));
                self.last_scan = Some(now);
                return Lookup::Done(read_device(device, key));
            }
        }

        self.begin_scan(class, Err(MissingValue::NoDevice))
    }

    fn begin_scan(&mut self, class: DeviceClass, fallback: Resolved) -> Lookup {
        if self.scan_pending {
            trace!(class = %class, "Scan already pending");
            return Lookup::Done(fallback);
        }
        self.scan_pending = true;
        Lookup::Scan
    }

    /// Adopt the winner of a full scan, or drop the cached device when the
    /// scan found none.
    ///
    /// Returns true when the learned device name in `settings` changed.
    pub fn publish(&mut self, class: DeviceClass, outcome: &ScanOutcome, settings: &mut Settings, now: Instant) -> bool {
        self.scan_pending = false;
        self.scan_count += 1;
        let Some(winner) = &outcome.winner else {
            debug!(class = %class, "Scan found no candidate device");
            self.cached = None;
            self.last_scan = None;
            return false;
        };

        debug!(class = %class, device = %winner.device.name, score = winner.score, "Selected device");
        self.cached = Some(winner.device.clone());
        self.last_scan = Some(now);
        class.remember(settings, &winner.device.name)
    }

    /// Give up on a scan whose snapshot is no longer current.
    ///
    /// The cached device is dropped if it is missing from `current`, so the
    /// next lookup scans the new topology.
    pub fn abandon(&mut self, class: DeviceClass, current: Option<&Snapshot>) {
        self.scan_pending = false;
        let Some(selected) = &self.cached else {
            return;
        };
        if current.and_then(|snapshot| find(snapshot, &selected.id)).is_none() {
            debug!(class = %class, device = %selected.name, "Dropped cached device after topology change");
            self.cached = None;
            self.last_scan = None;
        }
    }
}

fn find<'a>(snapshot: &'a Snapshot, id: &DeviceId) -> Option<&'a Device> {
    snapshot.position(id).and_then(|i| snapshot.device(i))
}
