use std::thread;

use overlay_metrics::prelude::*;

use crate::common::{engine_for, SharedTopology, TestTopologyBuilder};

fn desktop() -> Snapshot {
    TestTopologyBuilder::new()
        .cpu("Intel Core i9-13900K", &[4800.0, 4800.0, 2400.0, 2400.0])
        .gpu(HardwareType::GpuIntel, "Intel UHD Graphics 770", 9.0, 1650.0)
        .gpu(HardwareType::GpuNvidia, "NVIDIA GeForce RTX 4090", 312.0, 2745.0)
        .device(
            Device::new("/ram", HardwareType::Memory, "Generic Memory")
                .with_sensor(SensorType::Load, "Memory", 41.0)
                .with_sensor(SensorType::Data, "Memory Used", 26.1)
                .with_sensor(SensorType::Data, "Memory Available", 37.6),
        )
        .network("Realtek PCIe 2.5GbE", 1_000.0, 250_000.0)
        .disk("Samsung SSD 990 PRO 2TB", 4_096.0, 0.0)
        .build()
}

#[test]
fn test_desktop_metrics() {
    let topology = SharedTopology::new(desktop());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    assert_eq!(engine.get("CPU.Clock"), Some(3600.0));
    assert_eq!(engine.get("CPU.Temp"), Some(64.0));
    assert_eq!(engine.get("CPU.Power"), Some(65.0));
    assert_eq!(engine.get("GPU.Power"), Some(312.0));
    assert_eq!(engine.get("GPU.Clock"), Some(2745.0));
    assert_eq!(engine.get("MEM.Load"), Some(41.0));
    assert_eq!(engine.get("NET.Down"), Some(250_000.0));
    assert_eq!(engine.get("DISK.Read"), Some(4_096.0));

    let settings = engine.settings();
    assert!((settings.detected_ram_total_gb - 63.7).abs() < 1e-3);
    assert_eq!(settings.max_record(MetricKey::CpuClock), Some(4800.0));
}

#[test]
fn test_keys_without_sources_yield_no_value() {
    let topology = SharedTopology::new(desktop());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    for key in ["BAT.Percent", "BAT.Power", "GPU.VRAM", "GPU.VRAM.Total", "NET.Sideways", "cpu"] {
        assert_eq!(engine.get(key), None, "{key}");
    }
}

#[test]
fn test_implausible_gpu_power_falls_back() {
    let topology = SharedTopology::new(desktop());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    assert_eq!(engine.get("GPU.Power"), Some(312.0));

    topology.set(
        TestTopologyBuilder::new()
            .cpu("Intel Core i9-13900K", &[4800.0, 4800.0, 2400.0, 2400.0])
            .gpu(HardwareType::GpuIntel, "Intel UHD Graphics 770", 9.0, 1650.0)
            .gpu(HardwareType::GpuNvidia, "NVIDIA GeForce RTX 4090", 1600.0, 2745.0)
            .build(),
    );
    engine.refresh();

    assert_eq!(
        engine.try_resolve(MetricKey::GpuPower),
        Err(MissingValue::Implausible {
            value: 1600.0,
            bound: 1200.0
        })
    );
    assert_eq!(engine.get("GPU.Power"), Some(312.0));
    assert_eq!(engine.settings().max_record(MetricKey::GpuPower), Some(312.0));
}

#[test]
fn test_topology_change_rebuilds_catalog() {
    let topology = SharedTopology::new(TestTopologyBuilder::new().cpu("Ryzen 5 5600X", &[4200.0]).build());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    assert_eq!(engine.try_resolve(MetricKey::GpuTemp), Err(MissingValue::NoSensor));
    assert!(engine.list_all_networks().is_empty());

    topology.set(desktop());
    let report = engine.refresh();
    assert!(report.topology_changed);
    assert_eq!(engine.get("GPU.Temp"), Some(58.0));
    assert_eq!(engine.list_all_networks(), vec!["Realtek PCIe 2.5GbE"]);
}

#[test]
fn test_learned_settings_survive_restart() {
    let topology = SharedTopology::new(desktop());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    engine.get("NET.Down");
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 1);

    let json = engine.take_dirty_settings().unwrap().to_json().unwrap();
    let restored = Settings::from_json(&json).unwrap();
    assert_eq!(restored.last_auto_network, "Realtek PCIe 2.5GbE");

    let (restarted, _) = engine_for(&topology, restored);
    restarted.refresh();
    assert_eq!(restarted.get("NET.Down"), Some(250_000.0));
    assert_eq!(restarted.device_scan_count(DeviceClass::Network), 0);
    assert_eq!(
        restarted.selected_device(DeviceClass::Network).as_deref(),
        Some("Realtek PCIe 2.5GbE")
    );
}

#[test]
fn test_concurrent_readers_and_refresh() {
    let topology = SharedTopology::new(desktop());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();
    engine.get("NET.Down");

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..200 {
                engine.refresh();
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    for key in MetricKey::ALL {
                        engine.get_metric(key);
                    }
                    engine.list_all_disks();
                }
            });
        }
    });

    assert_eq!(engine.get("CPU.Clock"), Some(3600.0));
    assert_eq!(engine.device_scan_count(DeviceClass::Network), 1);
}
