//! The metric engine.
//!
//! [`MetricEngine`] ties the pieces together: it pulls snapshots from a
//! [`SensorSource`], keeps the catalog and per-scan caches current, routes
//! every canonical key to its resolver and remembers the last valid value of
//! each key for transient gaps.
//!
//! All mutable state sits behind one `parking_lot` mutex. Critical sections
//! are lookups and copies; full device scans run on a cloned snapshot outside
//! the lock and are published only if the topology generation is unchanged.
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::config::Settings;
//! use overlay_metrics::sensor::{Device, HardwareType, SensorType, Snapshot};
//! use overlay_metrics::{MetricEngine, Result};
//!
//! let source = || -> Result<Snapshot> {
//!     Ok(Snapshot::new(vec![
//!         Device::new("/cpu/0", HardwareType::Cpu, "Ryzen 5 7600")
//!             .with_sensor(SensorType::Load, "CPU Total", 12.0),
//!     ]))
//! };
//! let engine = MetricEngine::new(source, Settings::default());
//!
//! assert_eq!(engine.get("CPU.Load"), None);
//! engine.refresh();
//! assert_eq!(engine.get("CPU.Load"), Some(12.0));
//! assert_eq!(engine.get("Not.A.Key"), None);
//! ```

mod state;


use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument, trace, warn};

use crate::battery::{self, PowerStatus, PowerStatusSource};
use crate::catalog::SensorCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::Settings;
use crate::display::MetricItem;
use crate::error::{MissingValue, Resolved};
use crate::listing::{self, Listing};
use crate::metric::{MetricGroup, MetricKey};
use crate::resolver::{self, Composite, ResolveContext};
use crate::selector::{self, DeviceClass, Lookup};
use crate::sensor::{SensorSource, Snapshot};

use state::EngineState;

/// How a key is resolved
#[derive(Clone, Copy)]
enum Route {
    /// Aggregated or corrected across sensors
    Composite(Composite),
    /// A single catalog read
    Direct,
    /// Read from the selected network adapter or disk
    Device(DeviceClass),
    /// Catalog read with sign correction, or simulated
    Battery,
}

fn route(key: MetricKey) -> Route {
    if let Some(composite) = resolver::composite_for(key) {
        return Route::Composite(composite);
    }
    if let Some(class) = DeviceClass::of(key) {
        return Route::Device(class);
    }
    if key.group() == MetricGroup::Battery {
        return Route::Battery;
    }
    Route::Direct
}

/// Outcome of one [`MetricEngine::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    pub provider_ok: bool,
    pub topology_changed: bool,
    pub devices: usize,
}

pub struct MetricEngine {
    source: Box<dyn SensorSource>,
    power_source: Option<Box<dyn PowerStatusSource>>,
    clock: Arc<dyn Clock>,
    system_drive: Option<String>,
    state: Mutex<EngineState>,
}

impl MetricEngine {
    /// Create an engine reading from `source`.
    ///
    /// Nothing is enumerated until the first [`refresh`](Self::refresh); until
    /// then every key resolves to no value. The system drive used to rank
    /// disks is taken from the `SystemDrive` environment variable.
    pub fn new(source: impl SensorSource + 'static, settings: Settings) -> Self {
        Self {
            source: Box::new(source),
            power_source: None,
            clock: Arc::new(SystemClock),
            system_drive: std::env::var("SystemDrive").ok().filter(|d| !d.is_empty()),
            state: Mutex::new(EngineState::new(settings)),
        }
    }

    pub fn with_power_source(mut self, source: impl PowerStatusSource + 'static) -> Self {
        self.power_source = Some(Box::new(source));
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Override the system drive prefix (for example `"C:"`); `None` disables
    /// the system disk bonus
    pub fn with_system_drive(mut self, drive: Option<String>) -> Self {
        self.system_drive = drive.filter(|d| !d.is_empty());
        self
    }

    /// Re-enumerate the provider and publish the new snapshot.
    ///
    /// Also polls the power-status source, at most once per throttle interval.
    /// Provider failures are logged and reported, never returned.
    #[instrument(skip(self))]
    pub fn refresh(&self) -> RefreshReport {
        self.poll_power_status();

        match self.source.snapshot() {
            Ok(snapshot) => {
                let devices = snapshot.devices().len();
                let topology_changed = self.state.lock().publish(snapshot);
                RefreshReport {
                    provider_ok: true,
                    topology_changed,
                    devices,
                }
            }
            Err(err) => {
                warn!(error = %err, "Telemetry provider failed");
                self.state.lock().provider_ok = false;
                RefreshReport {
                    provider_ok: false,
                    topology_changed: false,
                    devices: 0,
                }
            }
        }
    }

    fn poll_power_status(&self) {
        let Some(source) = &self.power_source else {
            return;
        };
        let due = self.state.lock().power.claim_poll(self.clock.now());
        if !due {
            return;
        }
        match source.power_status() {
            Ok(status) => self.state.lock().power.set(status),
            Err(err) => debug!(error = %err, "Power status unavailable"),
        }
    }

    /// Value of a canonical key given as text; unknown keys yield `None`
    pub fn get(&self, key: &str) -> Option<f32> {
        match key.parse::<MetricKey>() {
            Ok(key) => self.get_metric(key),
            Err(_) => {
                trace!(key, "Unknown metric key");
                None
            }
        }
    }

    /// Value of `key`, falling back to the last valid reading.
    ///
    /// Disabled groups never fall back.
    pub fn get_metric(&self, key: MetricKey) -> Option<f32> {
        let resolved = self.try_resolve(key);
        let mut state = self.state.lock();
        match resolved {
            Ok(value) if value.is_finite() => {
                state.last_valid.insert(key, value);
                Some(value)
            }
            Err(MissingValue::Disabled) => None,
            other => {
                let fallback = state.last_valid.get(&key).copied();
                trace!(key = %key, reason = ?other, fallback = ?fallback, "No fresh value");
                fallback
            }
        }
    }

    /// Resolve `key` for this cycle without the last-valid fallback
    pub fn try_resolve(&self, key: MetricKey) -> Resolved {
        match route(key) {
            Route::Device(class) => self.resolve_device(class, key),
            route => {
                let mut guard = self.state.lock();
                self.resolve_locked(&mut guard, route, key)
            }
        }
    }

    fn resolve_locked(&self, state: &mut EngineState, route: Route, key: MetricKey) -> Resolved {
        if !state.settings.is_group_enabled(key.group()) {
            return Err(MissingValue::Disabled);
        }
        if matches!(route, Route::Battery) && state.settings.simulate_battery {
            return battery::simulated_value(key, self.clock.second_of_minute()).ok_or(MissingValue::NoSensor);
        }

        let snapshot = state.live_snapshot()?;
        let catalog = state.catalog.get_or_insert_with(|| build_catalog(&snapshot));

        match route {
            Route::Composite(composite) => {
                let mut ctx = ResolveContext {
                    snapshot: &snapshot,
                    catalog,
                    memo: &mut state.memo,
                    settings: &mut state.settings,
                    settings_dirty: &mut state.settings_dirty,
                    system_cpu_load: state.system_cpu_load,
                };
                composite(&mut ctx)
            }
            Route::Direct => catalog.read(key, &snapshot),
            Route::Battery => {
                let raw = catalog.read(key, &snapshot)?;
                Ok(match state.power.status() {
                    Some(status) => battery::apply_polarity(key, raw, status),
                    None => raw,
                })
            }
            Route::Device(_) => Err(MissingValue::NoDevice),
        }
    }

    /// Device-class metrics: answer from the selection if possible, else scan
    /// outside the lock and publish the winner.
    fn resolve_device(&self, class: DeviceClass, key: MetricKey) -> Resolved {
        let now = self.clock.now();

        let (snapshot, generation) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if !state.settings.is_group_enabled(key.group()) {
                return Err(MissingValue::Disabled);
            }
            let snapshot = state.live_snapshot()?;
            match state
                .selections
                .get_mut(class)
                .lookup(&snapshot, class, key, &state.settings, now)
            {
                Lookup::Done(resolved) => return resolved,
                Lookup::Scan => (snapshot, state.generation),
            }
        };

        let outcome = selector::scan(&snapshot, class, key, self.system_drive.as_deref());

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.generation == generation {
            let learned = state
                .selections
                .get_mut(class)
                .publish(class, &outcome, &mut state.settings, now);
            if learned {
                state.settings_dirty = true;
            }
        } else {
            debug!(class = %class, "Topology changed during scan; result not published");
            let current = state.snapshot.clone();
            state.selections.get_mut(class).abandon(class, current.as_deref());
        }
        outcome.target
    }

    /// Refresh `item` with the current value of its key
    pub fn update_item(&self, item: &mut MetricItem) {
        item.set_raw_value(self.get_metric(item.key()));
    }

    /// Drop per-scan caches and device listings.
    ///
    /// Last valid values and learned device names survive.
    pub fn clear_cache(&self) {
        self.state.lock().clear_cache();
    }

    /// Clear every cache, last valid values, device selections and the
    /// system CPU load
    pub fn reset(&self) {
        self.state.lock().reset();
    }

    /// Feed the OS CPU utilization counter used when `UseSystemCpuLoad` is on
    pub fn set_system_cpu_load(&self, load: f32) {
        self.state.lock().system_cpu_load = Some(load).filter(|l| l.is_finite());
    }

    pub fn set_power_status(&self, status: PowerStatus) {
        self.state.lock().power.set(status);
    }

    pub fn power_status(&self) -> Option<PowerStatus> {
        self.state.lock().power.status()
    }

    pub fn settings(&self) -> Settings {
        self.state.lock().settings.clone()
    }

    /// Apply a host-side change to the live settings
    pub fn update_settings<F>(&self, update: F)
    where
        F: FnOnce(&mut Settings),
    {
        update(&mut self.state.lock().settings);
    }

    /// Settings to persist, if the engine learned something since the last call
    pub fn take_dirty_settings(&self) -> Option<Settings> {
        let mut state = self.state.lock();
        if !state.settings_dirty {
            return None;
        }
        state.settings_dirty = false;
        Some(state.settings.clone())
    }

    /// Number of full device scans published for `class`
    pub fn device_scan_count(&self, class: DeviceClass) -> u64 {
        self.state.lock().selections.get(class).scan_count()
    }

    /// Name of the device currently selected for `class`
    pub fn selected_device(&self, class: DeviceClass) -> Option<String> {
        self.state
            .lock()
            .selections
            .get(class)
            .selected()
            .map(|d| d.name.clone())
    }

    /// Canonical keys the current catalog can serve directly
    pub fn indexed_keys(&self) -> Vec<MetricKey> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let Some(snapshot) = state.snapshot.clone() else {
            return Vec::new();
        };
        state
            .catalog
            .get_or_insert_with(|| build_catalog(&snapshot))
            .keys()
    }

    pub fn list_all_networks(&self) -> Vec<String> {
        self.listing(Listing::Networks)
    }

    pub fn list_all_disks(&self) -> Vec<String> {
        self.listing(Listing::Disks)
    }

    pub fn list_all_fans(&self) -> Vec<String> {
        self.listing(Listing::Fans)
    }

    pub fn list_all_mobo_temps(&self) -> Vec<String> {
        self.listing(Listing::BoardTemps)
    }

    fn listing(&self, listing: Listing) -> Vec<String> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let snapshot = state.snapshot.clone().unwrap_or_default();
        state.listings.get_or_build(listing, &snapshot)
    }

    /// Live value of a fan or board temperature picked by its listing label
    pub fn sensor_value_by_label(&self, label: &str) -> Option<f32> {
        let snapshot = self.state.lock().live_snapshot().ok()?;
        let locator = listing::find_by_label(&snapshot, label)?;
        snapshot.reading(locator)
    }
}

fn build_catalog(snapshot: &Snapshot) -> SensorCatalog {
    debug!(devices = snapshot.devices().len(), "Rebuilding sensor catalog");
    SensorCatalog::build(snapshot)
}
