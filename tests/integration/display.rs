use overlay_metrics::prelude::*;

use crate::common::{engine_for, SharedTopology, TestTopologyBuilder};

#[test]
fn test_tick_eases_then_snaps() {
    let mut item = MetricItem::new(MetricKey::GpuLoad, "GPU Load", "GPU");

    item.advance(10.0, 0.5);
    assert_eq!(item.display_value(), 5.0);
    item.advance(10.0, 0.5);
    assert_eq!(item.display_value(), 7.5);

    item.advance(50.0, 0.5);
    assert_eq!(item.display_value(), 50.0);

    item.set_display_value(30.0);
    item.advance(50.0, 0.95);
    assert_eq!(item.display_value(), 50.0);
}

#[test]
fn test_formatted_text_from_engine_values() {
    let topology = SharedTopology::new(
        TestTopologyBuilder::new()
            .cpu("Intel Core i7-12700H", &[4600.0, 4600.0, 2600.0, 2600.0])
            .network("Killer E3100G 2.5 Gigabit Ethernet Controller", 0.0, 3_145_728.0)
            .build(),
    );
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    let mut clock = MetricItem::new(MetricKey::CpuClock, "CPU Clock", "CLK");
    engine.update_item(&mut clock);
    clock.tick(1.0);
    assert_eq!(clock.formatted_text(false), "3.60GHz");

    let mut down = MetricItem::new(MetricKey::NetDown, "Download", "DL");
    engine.update_item(&mut down);
    down.tick(1.0);
    let normal = down.formatted_text(false).to_string();
    assert!(normal.starts_with('3') && normal.ends_with(" MB/s"), "{normal}");
    let compact = down.formatted_text(true);
    assert!(compact.ends_with("MB") && !compact.contains(' '), "{compact}");
}

#[test]
fn test_format_cache_respects_dead_band() {
    let topology = SharedTopology::new(TestTopologyBuilder::new().cpu("Intel Core i7-12700H", &[]).build());
    let (engine, _) = engine_for(&topology, Settings::default());
    engine.refresh();

    let mut temp = MetricItem::new(MetricKey::CpuTemp, "CPU Temperature", "TEMP");
    engine.update_item(&mut temp);
    temp.tick(1.0);

    assert_eq!(temp.formatted_text(false), "64°C");
    assert_eq!(temp.formatted_text(true), "64°C");
    assert_eq!(temp.format_count(), 1);

    temp.set_display_value(64.06);
    temp.formatted_text(false);
    assert_eq!(temp.format_count(), 2);

    temp.set_display_value(64.10);
    temp.formatted_text(false);
    assert_eq!(temp.format_count(), 2);
}
