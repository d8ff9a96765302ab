use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::battery::PowerTracker;
use crate::catalog::SensorCatalog;
use crate::config::Settings;
use crate::error::MissingValue;
use crate::listing::ListingCache;
use crate::metric::MetricKey;
use crate::resolver::ScanMemo;
use crate::selector::{DeviceClass, DeviceSelection};
use crate::sensor::Snapshot;

/// Selection state for both ambiguous device classes
#[derive(Debug, Clone, Default)]
pub(crate) struct Selections {
    network: DeviceSelection,
    disk: DeviceSelection,
}

impl Selections {
    pub fn get(&self, class: DeviceClass) -> &DeviceSelection {
        match class {
            DeviceClass::Network => &self.network,
            DeviceClass::Disk => &self.disk,
        }
    }

    pub fn get_mut(&mut self, class: DeviceClass) -> &mut DeviceSelection {
        match class {
            DeviceClass::Network => &mut self.network,
            DeviceClass::Disk => &mut self.disk,
        }
    }

    pub fn reset(&mut self) {
        self.network.reset();
        self.disk.reset();
    }
}

/// Everything the engine lock guards
#[derive(Debug, Default)]
pub(crate) struct EngineState {
    /// Latest published snapshot, absent before the first refresh
    pub snapshot: Option<Arc<Snapshot>>,
    pub fingerprint: Option<u64>,
    /// Bumped on every topology change; scans from older generations are
    /// never published
    pub generation: u64,
    /// Absent when it must be rebuilt from `snapshot`
    pub catalog: Option<SensorCatalog>,
    pub memo: ScanMemo,
    pub listings: ListingCache,
    pub last_valid: HashMap<MetricKey, f32>,
    pub selections: Selections,
    pub power: PowerTracker,
    pub settings: Settings,
    pub settings_dirty: bool,
    pub system_cpu_load: Option<f32>,
    pub provider_ok: bool,
}

impl EngineState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// The snapshot metrics resolve against this cycle
    pub fn live_snapshot(&self) -> Result<Arc<Snapshot>, MissingValue> {
        match &self.snapshot {
            Some(snapshot) if self.provider_ok => Ok(Arc::clone(snapshot)),
            _ => Err(MissingValue::ProviderUnavailable),
        }
    }

    /// Install a fresh snapshot.
    ///
    /// On a topology change the catalog is rebuilt and all per-scan caches are
    /// dropped in the same critical section. Returns true on a change.
    pub fn publish(&mut self, snapshot: Snapshot) -> bool {
        let fingerprint = snapshot.topology_fingerprint();
        let changed = self.fingerprint != Some(fingerprint);

        if changed {
            let catalog = SensorCatalog::build(&snapshot);
            debug!(
                devices = snapshot.devices().len(),
                catalog = catalog.len(),
                generation = self.generation + 1,
                "Topology changed"
            );
            self.fingerprint = Some(fingerprint);
            self.generation += 1;
            self.catalog = Some(catalog);
            self.memo.clear();
            self.listings.clear();
        }

        self.snapshot = Some(Arc::new(snapshot));
        self.provider_ok = true;
        changed
    }

    /// Drop per-scan caches; the catalog is rebuilt on next use
    pub fn clear_cache(&mut self) {
        self.catalog = None;
        self.memo.clear();
        self.listings.clear();
    }

    pub fn reset(&mut self) {
        self.clear_cache();
        self.last_valid.clear();
        self.selections.reset();
        self.system_cpu_load = None;
    }
}
