//! Display-facing metric state.
//!
//! A [`MetricItem`] holds the latest resolved value of one configured metric,
//! a smoothed value for animation and cached text renderings. The text is
//! re-formatted only when the smoothed value moved by more than the dead-band.
//!
//! # Examples
//!
//! ```rust
//! use overlay_metrics::display::MetricItem;
//! use overlay_metrics::metric::MetricKey;
//!
//! let mut item = MetricItem::new(MetricKey::CpuTemp, "CPU Temperature", "TEMP");
//! item.set_raw_value(Some(20.0));
//! item.tick(0.5);
//! assert_eq!(item.display_value(), 20.0);
//! assert_eq!(item.formatted_text(false), "20°C");
//! ```

pub mod format;


use crate::metric::MetricKey;

/// Changes smaller than this neither move the display value nor re-format text
pub const DEAD_BAND: f32 = 0.05;

/// Deltas larger than this snap straight to the target
pub const SNAP_DELTA: f32 = 15.0;

/// Smoothing speeds at or above this snap straight to the target
pub const SNAP_SPEED: f32 = 0.9;

/// Forces the first format call to render
const UNFORMATTED: f32 = -99_999.0;

#[derive(Debug, Clone)]
pub struct MetricItem {
    key: MetricKey,
    label: String,
    short_label: String,
    raw_value: Option<f32>,
    display_value: f32,
    cached_display_value: f32,
    cached_normal_text: String,
    cached_horizontal_text: String,
    format_count: u64,
}

impl MetricItem {
    pub fn new(key: MetricKey, label: impl Into<String>, short_label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            short_label: short_label.into(),
            raw_value: None,
            display_value: 0.0,
            cached_display_value: UNFORMATTED,
            cached_normal_text: String::new(),
            cached_horizontal_text: String::new(),
            format_count: 0,
        }
    }

    pub fn key(&self) -> MetricKey {
        self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn short_label(&self) -> &str {
        &self.short_label
    }

    pub fn raw_value(&self) -> Option<f32> {
        self.raw_value
    }

    /// Store the value resolved this refresh cycle
    pub fn set_raw_value(&mut self, value: Option<f32>) {
        self.raw_value = value;
    }

    pub fn display_value(&self) -> f32 {
        self.display_value
    }

    pub fn set_display_value(&mut self, value: f32) {
        self.display_value = value;
    }

    /// Advance the display value toward the raw value; no-op without one
    pub fn tick(&mut self, speed: f32) {
        if let Some(target) = self.raw_value {
            self.advance(target, speed);
        }
    }

    /// One smoothing step toward `target`.
    ///
    /// Deltas inside the dead-band are ignored. Large deltas and fast speeds
    /// jump straight to the target; everything else moves `speed` of the way.
    pub fn advance(&mut self, target: f32, speed: f32) {
        let diff = (target - self.display_value).abs();
        if diff < DEAD_BAND {
            return;
        }
        if diff > SNAP_DELTA || speed >= SNAP_SPEED {
            self.display_value = target;
        } else {
            self.display_value += (target - self.display_value) * speed;
        }
    }

    /// Cached text for the current display value.
    ///
    /// Both renderings are recomputed together, and only when the display
    /// value moved more than the dead-band since the last render.
    pub fn formatted_text(&mut self, is_horizontal: bool) -> &str {
        if (self.display_value - self.cached_display_value).abs() > DEAD_BAND {
            self.cached_display_value = self.display_value;
            self.cached_normal_text = format::format_value(self.key.unit(), self.display_value);
            self.cached_horizontal_text = format::horizontal(&self.cached_normal_text);
            self.format_count += 1;
        }

        if is_horizontal {
            &self.cached_horizontal_text
        } else {
            &self.cached_normal_text
        }
    }

    /// Number of times the text caches were rebuilt
    pub fn format_count(&self) -> u64 {
        self.format_count
    }
}
