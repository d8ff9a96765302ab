//! Timer-driven refresh of a shared [`MetricEngine`].
//!
//! Hosts that already own a scheduler can call [`MetricEngine::refresh`]
//! themselves; this helper is for the common case of a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::trace;

use crate::engine::MetricEngine;

/// Spawn a task that refreshes `engine` every `period`.
///
/// The first refresh happens immediately. Ticks missed while a refresh was
/// running are skipped rather than replayed. Abort the returned handle to
/// stop the loop.
pub fn spawn_refresh_loop(engine: Arc<MetricEngine>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let report = engine.refresh();
            trace!(
                provider_ok = report.provider_ok,
                topology_changed = report.topology_changed,
                "Refresh tick"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::config::Settings;
    use crate::sensor::{Device, HardwareType, SensorType, Snapshot};
    use crate::Result;

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_drives_engine() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = move || -> Result<Snapshot> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Snapshot::new(vec![Device::new("/cpu/0", HardwareType::Cpu, "Ryzen 9 7950X")
                .with_sensor(SensorType::Load, "CPU Total", 42.0)]))
        };
        let engine = Arc::new(MetricEngine::new(source, Settings::default()));

        let handle = spawn_refresh_loop(Arc::clone(&engine), Duration::from_millis(500));
        tokio::time::sleep(Duration::from_millis(1_250)).await;
        handle.abort();

        // Ticks at 0, 500 and 1000 ms
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(engine.get("CPU.Load"), Some(42.0));
    }
}
