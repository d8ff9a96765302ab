use super::constants::{bounds, keywords, VRAM_BYTES_DIVISOR, VRAM_BYTES_THRESHOLD};
use super::{within_bound, ResolveContext};
use crate::catalog::best_gpu;
use crate::error::{MissingValue, Resolved};
use crate::metric::MetricKey;
use crate::sensor::SensorType;
use crate::utils::has_any;

/// First sensor of `sensor_type` on the best GPU whose name contains one of `names`
fn best_gpu_reading(ctx: &mut ResolveContext<'_>, sensor_type: SensorType, names: &[&str]) -> Resolved {
    let snapshot = ctx.snapshot;
    let gpu = *ctx.memo.best_gpu.get_or_insert_with(|| best_gpu(snapshot));
    let gpu = gpu.ok_or(MissingValue::NoDevice)?;
    let device = snapshot.device(gpu).ok_or(MissingValue::NoDevice)?;

    let (_, sensor) = device
        .sensors_of(sensor_type)
        .find(|(_, s)| has_any(&s.name, names))
        .ok_or(MissingValue::NoSensor)?;
    sensor.reading().ok_or(MissingValue::NoReading)
}

pub(super) fn clock(ctx: &mut ResolveContext<'_>) -> Resolved {
    let value = best_gpu_reading(ctx, SensorType::Clock, keywords::GPU_CLOCK)?;
    let value = within_bound(MetricKey::GpuClock, value, bounds::GPU_CLOCK_MHZ)?;
    ctx.record_max(MetricKey::GpuClock, value);
    Ok(value)
}

pub(super) fn power(ctx: &mut ResolveContext<'_>) -> Resolved {
    let value = best_gpu_reading(ctx, SensorType::Power, keywords::GPU_POWER)?;
    let value = within_bound(MetricKey::GpuPower, value, bounds::GPU_POWER_W)?;
    ctx.record_max(MetricKey::GpuPower, value);
    Ok(value)
}

/// VRAM usage in percent from the used/total pair.
///
/// Totals reported in bytes are rescaled to MB first. The first usable total
/// is remembered in settings as GB. Without a usable pair the direct memory
/// load sensor is used.
pub(super) fn vram_percent(ctx: &mut ResolveContext<'_>) -> Resolved {
    let pair = ctx.read(MetricKey::GpuVramUsed).and_then(|used| {
        ctx.read(MetricKey::GpuVramTotal).map(|total| (used, total))
    });

    match pair {
        Ok((mut used, mut total)) if total > 0.0 => {
            if total > VRAM_BYTES_THRESHOLD {
                used /= VRAM_BYTES_DIVISOR;
                total /= VRAM_BYTES_DIVISOR;
            }
            if ctx.settings.detected_gpu_vram_total_gb <= 0.0 {
                ctx.settings.detected_gpu_vram_total_gb = total / 1024.0;
                ctx.mark_dirty();
            }
            Ok(used / total * 100.0)
        }
        _ => ctx.read(MetricKey::GpuVramLoad),
    }
}
