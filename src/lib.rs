//! Overlay Metrics - sensor normalization for hardware telemetry overlays
//!
//! Hardware monitoring libraries expose a raw tree of devices and sensors
//! whose names differ between vendors, drivers and firmware revisions. This
//! crate turns that tree into a fixed vocabulary of canonical metric keys
//! such as `CPU.Temp`, `GPU.Power` or `NET.Down` that an overlay can poll
//! every frame without caring which machine it runs on.
//!
//! # Features
//!
//! - **Sensor Catalog**: keyword rules map vendor sensor names to canonical keys
//! - **Composite Metrics**: CPU clock with bus-speed correction, hottest CPU
//!   temperature, GPU power and clock with sanity bounds, VRAM percentage
//! - **Device Selection**: picks the active network adapter and disk, with
//!   user preference, sticky memory and a re-scan cooldown
//! - **Battery**: sign correction from the AC/charging state, and a
//!   simulation mode for machines without a battery
//! - **Display Cache**: eased values with dead-band formatting
//! - **Device Listings**: network, disk, fan and board temperature pickers
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let source = || -> Result<Snapshot> {
//!         Ok(Snapshot::new(vec![
//!             Device::new("/gpu-nvidia/0", HardwareType::GpuNvidia, "NVIDIA GeForce RTX 4070")
//!                 .with_sensor(SensorType::Power, "GPU Package", 182.0)
//!                 .with_sensor(SensorType::Temperature, "GPU Core", 61.0),
//!         ]))
//!     };
//!
//!     let engine = MetricEngine::new(source, Settings::default());
//!     engine.refresh();
//!
//!     println!("GPU: {:?} W at {:?} °C", engine.get("GPU.Power"), engine.get("GPU.Temp"));
//!     assert_eq!(engine.get_metric(MetricKey::GpuPower), Some(182.0));
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Boundary failures (provider enumeration, power status, settings
//! persistence) use [`Error`]. A metric that cannot be produced this cycle is
//! not an error: [`MetricEngine::try_resolve`] reports a [`MissingValue`]
//! reason, and [`MetricEngine::get`] collapses it to the last valid value or
//! `None`.
//!
//! ```rust
//! use overlay_metrics::{Error, MissingValue, Result};
//!
//! fn example() -> Result<()> {
//!     if true {
//!         return Err(Error::provider("driver not loaded"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(example().is_err());
//! assert_eq!(MissingValue::NoSensor.to_string(), "no sensor matched");
//! ```
//!
//! # Thread Safety
//!
//! [`MetricEngine`] is `Send + Sync`. One refresh loop and any number of
//! readers can share it through an `Arc`; all state sits behind a single
//! lock that is never held across a device scan.

#![doc(html_root_url = "https://docs.rs/overlay-metrics/0.1.0")]

mod error;

pub use error::{Error, MissingValue, Resolved, Result};

// Public modules
pub mod battery;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod display;
pub mod engine;
pub mod listing;
pub mod logging;
pub mod metric;
pub mod refresh;
pub mod resolver;
pub mod selector;
pub mod sensor;

// Private modules
mod utils;

pub use engine::{MetricEngine, RefreshReport};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::battery::{PowerStatus, PowerStatusSource};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::Settings;
    pub use crate::display::MetricItem;
    pub use crate::engine::{MetricEngine, RefreshReport};
    pub use crate::metric::{MetricGroup, MetricKey, Unit};
    pub use crate::selector::DeviceClass;
    pub use crate::sensor::{Device, HardwareType, SensorSource, SensorType, Snapshot};
    pub use crate::{Error, MissingValue, Result};
}
