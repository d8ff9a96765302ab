#![allow(dead_code)]

pub mod builders;

use std::sync::Arc;

use overlay_metrics::clock::ManualClock;
use overlay_metrics::config::Settings;
use overlay_metrics::MetricEngine;

pub use builders::topology::{SharedTopology, TestTopologyBuilder};

/// Engine over `topology` driven by a manual clock, with no system drive
pub fn engine_for(topology: &SharedTopology, settings: Settings) -> (MetricEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let engine = MetricEngine::new(topology.source(), settings)
        .with_clock(clock.clone())
        .with_system_drive(None);
    (engine, clock)
}
