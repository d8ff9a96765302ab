use super::constants::RAM_MB_THRESHOLD;
use super::ResolveContext;
use crate::error::Resolved;
use crate::metric::MetricKey;

/// Memory load from the catalog, detecting the RAM total on the way.
///
/// The total is learned once as used + available; sums above the MB
/// threshold are converted to GB.
pub(super) fn load(ctx: &mut ResolveContext<'_>) -> Resolved {
    if ctx.settings.detected_ram_total_gb <= 0.0 {
        if let (Ok(used), Ok(available)) = (ctx.read(MetricKey::MemUsed), ctx.read(MetricKey::MemAvailable)) {
            let total = used + available;
            if total > 0.0 {
                ctx.settings.detected_ram_total_gb = if total > RAM_MB_THRESHOLD { total / 1024.0 } else { total };
                ctx.mark_dirty();
            }
        }
    }

    ctx.read(MetricKey::MemLoad)
}
