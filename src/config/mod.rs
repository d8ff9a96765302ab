//! Engine configuration.
//!
//! [`Settings`] is the small configuration object shared with the host
//! application: feature flags, device overrides, and values the engine learns
//! at runtime (sticky device choices, detected memory totals, max records).
//! The host owns persistence; this module only defines the serialized shape.
//!
//! ```rust
//! use overlay_metrics::config::Settings;
//!
//! let settings = Settings::from_json(r#"{ "PreferredNetwork": "Ethernet" }"#).unwrap();
//! assert_eq!(settings.preferred_network, "Ethernet");
//! assert!(settings.cpu_enabled);
//! ```


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metric::{MetricGroup, MetricKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Settings {
    pub cpu_enabled: bool,
    pub gpu_enabled: bool,
    pub memory_enabled: bool,
    pub network_enabled: bool,
    pub disk_enabled: bool,
    pub battery_enabled: bool,

    /// Report CPU load from the OS utilization counter instead of sensors
    pub use_system_cpu_load: bool,
    /// Synthesize battery readings for UI testing
    pub simulate_battery: bool,

    /// Manually chosen network adapter, empty for automatic selection
    pub preferred_network: String,
    /// Manually chosen disk, empty for automatic selection
    pub preferred_disk: String,
    /// Adapter learned by the last automatic selection
    pub last_auto_network: String,
    /// Disk learned by the last automatic selection
    pub last_auto_disk: String,

    #[serde(rename = "DetectedRamTotalGB")]
    pub detected_ram_total_gb: f32,
    #[serde(rename = "DetectedGpuVramTotalGB")]
    pub detected_gpu_vram_total_gb: f32,

    /// Running maximum per canonical key, used for UI range scaling
    pub max_records: BTreeMap<String, f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cpu_enabled: true,
            gpu_enabled: true,
            memory_enabled: true,
            network_enabled: true,
            disk_enabled: true,
            battery_enabled: true,
            use_system_cpu_load: false,
            simulate_battery: false,
            preferred_network: String::new(),
            preferred_disk: String::new(),
            last_auto_network: String::new(),
            last_auto_disk: String::new(),
            detected_ram_total_gb: 0.0,
            detected_gpu_vram_total_gb: 0.0,
            max_records: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_group_enabled(&self, group: MetricGroup) -> bool {
        match group {
            MetricGroup::Cpu => self.cpu_enabled,
            MetricGroup::Gpu => self.gpu_enabled,
            MetricGroup::Memory => self.memory_enabled,
            MetricGroup::Network => self.network_enabled,
            MetricGroup::Disk => self.disk_enabled,
            MetricGroup::Battery => self.battery_enabled,
        }
    }

    /// Raise the stored maximum for `key` if `value` exceeds it.
    ///
    /// Returns true when the record changed.
    pub fn update_max_record(&mut self, key: MetricKey, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.max_records.get_mut(key.as_str()) {
            Some(current) if *current >= value => false,
            Some(current) => {
                *current = value;
                true
            }
            None => {
                self.max_records.insert(key.as_str().to_string(), value);
                true
            }
        }
    }

    pub fn max_record(&self, key: MetricKey) -> Option<f32> {
        self.max_records.get(key.as_str()).copied()
    }
}
