use super::constants::{
    bounds, keywords, BUS_SPEED_RANGE, CORRECTION_FACTOR_RANGE, CPU_CLOCK_FLOOR_MHZ, REFERENCE_BUS_MHZ,
};
use super::{cpu_sensors, within_bound, ResolveContext};
use crate::error::{MissingValue, Resolved};
use crate::metric::MetricKey;
use crate::sensor::SensorType;
use crate::utils::{has, has_any};

/// CPU load: OS counter, else the mean of numbered cores, else the catalog
pub(super) fn load(ctx: &mut ResolveContext<'_>) -> Resolved {
    if ctx.settings.use_system_cpu_load {
        return ctx.system_cpu_load.ok_or(MissingValue::NoReading);
    }

    let snapshot = ctx.snapshot;
    let cores = ctx
        .memo
        .cpu_core_loads
        .get_or_insert_with(|| {
            cpu_sensors(snapshot, SensorType::Load, |s| {
                has(&s.name, "core") && s.name.contains('#') && !has_any(&s.name, keywords::CORE_LOAD_EXCLUDE)
            })
        })
        .clone();

    let readings: Vec<f32> = cores.iter().filter_map(|&l| ctx.reading(l)).collect();
    if !readings.is_empty() {
        return Ok(readings.iter().sum::<f32>() / readings.len() as f32);
    }

    ctx.read(MetricKey::CpuLoad)
}

/// CPU temperature: the hottest live candidate, else the catalog entry
pub(super) fn temperature(ctx: &mut ResolveContext<'_>) -> Resolved {
    let snapshot = ctx.snapshot;
    let candidates = ctx
        .memo
        .cpu_temps
        .get_or_insert_with(|| {
            cpu_sensors(snapshot, SensorType::Temperature, |s| {
                !has_any(&s.name, keywords::TEMP_EXCLUDE)
            })
        })
        .clone();

    let hottest = candidates
        .iter()
        .filter_map(|&l| ctx.reading(l))
        .filter(|&v| v > 0.0)
        .fold(None, |max: Option<f32>, v| Some(max.map_or(v, |m| m.max(v))));

    match hottest {
        Some(value) => Ok(value),
        None => ctx.read(MetricKey::CpuTemp),
    }
}

/// Multiplier for CPUs that misreport their reference clock.
///
/// Derived from the bus-speed sensor as `100 / bus` and only trusted inside
/// the expected ranges; otherwise 1.
pub(super) fn correction_factor(bus_speed: Option<f32>) -> f32 {
    let Some(bus) = bus_speed else {
        return 1.0;
    };
    if bus <= BUS_SPEED_RANGE.0 || bus >= BUS_SPEED_RANGE.1 {
        return 1.0;
    }
    let factor = REFERENCE_BUS_MHZ / bus;
    if factor > CORRECTION_FACTOR_RANGE.0 && factor < CORRECTION_FACTOR_RANGE.1 {
        factor
    } else {
        1.0
    }
}

/// CPU clock: simple mean of corrected per-core clocks above the noise floor.
///
/// The highest corrected core is recorded as the max record. When no core is
/// above the floor that maximum is returned instead of an empty average.
pub(super) fn clock(ctx: &mut ResolveContext<'_>) -> Resolved {
    let snapshot = ctx.snapshot;
    let cores = ctx
        .memo
        .cpu_core_clocks
        .get_or_insert_with(|| {
            cpu_sensors(snapshot, SensorType::Clock, |s| {
                has(&s.name, "core") && !has_any(&s.name, keywords::CORE_CLOCK_EXCLUDE)
            })
        })
        .clone();
    if cores.is_empty() {
        return Err(MissingValue::NoSensor);
    }

    let bus = *ctx.memo.bus_speed.get_or_insert_with(|| {
        cpu_sensors(snapshot, SensorType::Clock, |s| has(&s.name, keywords::BUS_SPEED))
            .first()
            .copied()
    });
    let factor = correction_factor(bus.and_then(|l| ctx.reading(l)));

    let mut sum = 0.0f64;
    let mut count = 0usize;
    let mut max: Option<f32> = None;
    for value in cores.iter().filter_map(|&l| ctx.reading(l)) {
        let corrected = value * factor;
        max = Some(max.map_or(corrected, |m| m.max(corrected)));
        if corrected > CPU_CLOCK_FLOOR_MHZ {
            sum += f64::from(corrected);
            count += 1;
        }
    }

    let max = max.ok_or(MissingValue::NoReading)?;
    if max > 0.0 {
        ctx.record_max(MetricKey::CpuClock, max);
    }

    if count > 0 {
        Ok((sum / count as f64) as f32)
    } else {
        Ok(max)
    }
}

/// CPU package power with a sanity bound
pub(super) fn power(ctx: &mut ResolveContext<'_>) -> Resolved {
    let value = ctx.read(MetricKey::CpuPower)?;
    let value = within_bound(MetricKey::CpuPower, value, bounds::CPU_POWER_W)?;
    ctx.record_max(MetricKey::CpuPower, value);
    Ok(value)
}
