use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use overlay_metrics::prelude::*;

use crate::common::{engine_for, SharedTopology, TestTopologyBuilder};

fn adapters(ethernet: f32, wifi: f32) -> Snapshot {
    TestTopologyBuilder::new()
        .network("Intel(R) Ethernet Controller I226-V", 0.0, ethernet)
        .network("Intel(R) Wi-Fi 6E AX211 160MHz", 0.0, wifi)
        .build()
}

#[test]
fn test_virtual_adapter_loses_to_physical() {
    let topology = SharedTopology::new(
        TestTopologyBuilder::new()
            .network("VMware Virtual Ethernet Adapter for VMnet8", 0.0, 500.0)
            .network("Realtek PCIe GbE Family Controller", 0.0, 10.0)
            .build(),
    );
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    assert_eq!(engine.get("NET.Down"), Some(10.0));
    assert_eq!(
        engine.selected_device(DeviceClass::Network).as_deref(),
        Some("Realtek PCIe GbE Family Controller")
    );
}

#[test]
fn test_active_device_is_not_rescanned() {
    let topology = SharedTopology::new(adapters(120_000.0, 0.0));
    let (engine, clock) = engine_for(&topology, Settings::default());
    engine.refresh();

    for _ in 0..50 {
        assert_eq!(engine.get("NET.Down"), Some(120_000.0));
        clock.advance(Duration::from_millis(500));
    }
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 1);
}

#[test]
fn test_idle_device_kept_during_cooldown_then_rescanned() {
    let topology = SharedTopology::new(adapters(120_000.0, 0.0));
    let (engine, clock) = engine_for(&topology, Settings::default());
    engine.refresh();
    assert_eq!(engine.get("NET.Down"), Some(120_000.0));

    // Traffic moves to Wi-Fi; same topology, new values
    topology.set(adapters(0.0, 48_000.0));
    engine.refresh();

    clock.advance(Duration::from_secs(1));
    assert_eq!(engine.get("NET.Down"), Some(0.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 1);

    clock.advance(Duration::from_secs(3));
    assert_eq!(engine.get("NET.Down"), Some(48_000.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 2);
    assert_eq!(
        engine.selected_device(DeviceClass::Network).as_deref(),
        Some("Intel(R) Wi-Fi 6E AX211 160MHz")
    );
    assert_eq!(engine.take_dirty_settings().unwrap().last_auto_network, "Intel(R) Wi-Fi 6E AX211 160MHz");
}

#[test]
fn test_unplugged_adapter_is_replaced() {
    let topology = SharedTopology::new(adapters(120_000.0, 30.0));
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    engine.get("NET.Down");

    // The Wi-Fi adapter keeps its provider id
    topology.set(
        TestTopologyBuilder::new()
            .network("Intel(R) Wi-Fi 6E AX211 160MHz", 0.0, 30.0)
            .build(),
    );
    assert!(engine.refresh().topology_changed);

    assert_eq!(engine.get("NET.Down"), Some(30.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 2);
}

#[test]
fn test_renamed_adapter_is_a_new_device() {
    let topology = SharedTopology::new(TestTopologyBuilder::new().network("Ethernet", 0.0, 900.0).build());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    assert_eq!(engine.get("NET.Down"), Some(900.0));

    topology.set(TestTopologyBuilder::new().network("Ethernet 2", 0.0, 700.0).build());
    engine.refresh();

    assert_eq!(engine.get("NET.Down"), Some(700.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 2);
    assert_eq!(engine.selected_device(DeviceClass::Network).as_deref(), Some("Ethernet 2"));
}

#[test]
fn test_selection_has_no_gap_while_adapters_swap() {
    let single = |name: &str| TestTopologyBuilder::new().network(name, 0.0, 2_000.0).build();
    let topology = SharedTopology::new(single("Ethernet A"));
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    assert_eq!(engine.get("NET.Down"), Some(2_000.0));

    let swaps = 10_000;
    let done = AtomicBool::new(false);
    let gaps = AtomicUsize::new(0);

    thread::scope(|scope| {
        scope.spawn(|| {
            while !done.load(Ordering::Acquire) {
                if engine.selected_device(DeviceClass::Network).is_none() {
                    gaps.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

        for i in 0..swaps {
            let name = if i % 2 == 0 { "Ethernet B" } else { "Ethernet A" };
            topology.set(single(name));
            assert!(engine.refresh().topology_changed);
            assert_eq!(engine.get("NET.Down"), Some(2_000.0));
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(gaps.load(Ordering::Relaxed), 0);
    // One scan per swap plus the first
    assert_eq!(engine.device_scan_count(DeviceClass::Network), swaps + 1);
    assert_eq!(engine.selected_device(DeviceClass::Network).as_deref(), Some("Ethernet A"));
}

#[test]
fn test_preferred_adapter_bypasses_selection() {
    let topology = SharedTopology::new(adapters(120_000.0, 30.0));
    let settings = Settings {
        preferred_network: "intel(r) wi-fi 6e ax211 160mhz".into(),
        ..Settings::default()
    };
    let (engine, _) = engine_for(&topology, settings);
    engine.refresh();

    assert_eq!(engine.get("NET.Down"), Some(30.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 0);
    assert_eq!(engine.selected_device(DeviceClass::Network), None);
}

#[test]
fn test_system_disk_wins() {
    let topology = SharedTopology::new(
        TestTopologyBuilder::new()
            .disk("WD Blue SN580 (D:)", 300_000.0, 0.0)
            .disk("Samsung SSD 980 (C:)", 512.0, 0.0)
            .build(),
    );
    let (engine, _) = engine_for(&topology, Settings::default());
    let engine = engine.with_system_drive(Some("C:".into()));
    engine.refresh();

    assert_eq!(engine.get("DISK.Read"), Some(512.0));
    assert_eq!(engine.get("DISK.Write"), Some(0.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Disk), 1);
}

#[test]
fn test_no_candidate_means_no_value() {
    let topology = SharedTopology::new(TestTopologyBuilder::new().cpu("Core i5-12400", &[4400.0]).build());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    assert_eq!(engine.try_resolve(MetricKey::NetUp), Err(MissingValue::NoDevice));
    assert_eq!(engine.get("DISK.Write"), None);
}

#[test]
fn test_disabled_network_group() {
    let topology = SharedTopology::new(adapters(120_000.0, 0.0));
    let settings = Settings {
        network_enabled: false,
        ..Settings::default()
    };
    let (engine, _) = engine_for(&topology, settings);
    engine.refresh();

    assert_eq!(engine.try_resolve(MetricKey::NetDown), Err(MissingValue::Disabled));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 0);
}
