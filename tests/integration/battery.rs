use std::sync::Arc;
use std::time::Duration;

use overlay_metrics::prelude::*;
use parking_lot::Mutex;

use crate::common::{engine_for, SharedTopology, TestTopologyBuilder};

fn laptop() -> SharedTopology {
    SharedTopology::new(
        TestTopologyBuilder::new()
            .cpu("AMD Ryzen 7 7840U", &[3300.0, 3100.0])
            .battery(80.0, 30.0, 15.9, 1.9)
            .build(),
    )
}

/// Power source whose answer the test can change
fn power_source(status: &Arc<Mutex<PowerStatus>>) -> impl Fn() -> Result<PowerStatus> + Send + Sync + 'static {
    let status = Arc::clone(status);
    move || -> Result<PowerStatus> { Ok(*status.lock()) }
}

#[test]
fn test_battery_sign_follows_power_status() {
    let status = Arc::new(Mutex::new(PowerStatus::charging()));
    let topology = laptop();
    let (engine, clock) = engine_for(&topology, Settings::default());
    let engine = engine.with_power_source(power_source(&status));

    engine.refresh();
    assert_eq!(engine.get("BAT.Power"), Some(30.0));
    assert_eq!(engine.get("BAT.Current"), Some(1.9));

    *status.lock() = PowerStatus::bypass();
    clock.advance(Duration::from_secs(3));
    engine.refresh();
    assert_eq!(engine.get("BAT.Power"), Some(0.0));
    assert_eq!(engine.get("BAT.Current"), Some(0.0));

    *status.lock() = PowerStatus::on_battery();
    clock.advance(Duration::from_secs(3));
    engine.refresh();
    assert_eq!(engine.get("BAT.Power"), Some(-30.0));
    assert_eq!(engine.get("BAT.Current"), Some(-1.9));

    assert_eq!(engine.get("BAT.Percent"), Some(80.0));
    assert_eq!(engine.get("BAT.Voltage"), Some(15.9));
}

#[test]
fn test_power_status_poll_is_throttled() {
    let status = Arc::new(Mutex::new(PowerStatus::charging()));
    let topology = laptop();
    let (engine, clock) = engine_for(&topology, Settings::default());
    let engine = engine.with_power_source(power_source(&status));

    engine.refresh();
    *status.lock() = PowerStatus::on_battery();

    clock.advance(Duration::from_secs(1));
    engine.refresh();
    assert_eq!(engine.power_status(), Some(PowerStatus::charging()));
    assert_eq!(engine.get("BAT.Power"), Some(30.0));

    clock.advance(Duration::from_secs(2));
    engine.refresh();
    assert_eq!(engine.power_status(), Some(PowerStatus::on_battery()));
    assert_eq!(engine.get("BAT.Power"), Some(-30.0));
}

#[test]
fn test_simulated_discharge_and_charge() {
    let topology = laptop();
    let settings = Settings {
        simulate_battery: true,
        ..Settings::default()
    };
    let (engine, clock) = engine_for(&topology, settings);
    engine.refresh();

    clock.set_second(10);
    assert_eq!(engine.get("BAT.Power"), Some(-30.0));
    let voltage = engine.get("BAT.Voltage").unwrap();
    assert!((voltage - 16.2).abs() < 1e-4);
    let current = engine.get("BAT.Current").unwrap();
    assert!((current - (-30.0 / 16.2)).abs() < 1e-3);
    let percent = engine.get("BAT.Percent").unwrap();
    assert!((percent - 66.67).abs() < 0.01);

    clock.set_second(45);
    assert_eq!(engine.get("BAT.Power"), Some(65.0));
    assert!((engine.get("BAT.Percent").unwrap() - 50.0).abs() < 1e-3);
    assert!((engine.get("BAT.Voltage").unwrap() - 16.25).abs() < 1e-4);
}

#[test]
fn test_disabled_battery_group_beats_simulation() {
    let topology = laptop();
    let settings = Settings {
        simulate_battery: true,
        battery_enabled: false,
        ..Settings::default()
    };
    let (engine, _) = engine_for(&topology, settings);
    engine.refresh();

    assert_eq!(engine.try_resolve(MetricKey::BatPower), Err(MissingValue::Disabled));
    assert_eq!(engine.get("CPU.Clock"), Some(3200.0));
}
