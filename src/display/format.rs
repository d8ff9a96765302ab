use humansize::{format_size, FormatSizeOptions, WINDOWS};

use crate::metric::Unit;

/// Render `value` in the normal (vertical layout) style for `unit`
pub fn format_value(unit: Unit, value: f32) -> String {
    match unit {
        Unit::Percent => format!("{value:.0}%"),
        Unit::Celsius => format!("{value:.0}°C"),
        Unit::Megahertz if value < 1000.0 => format!("{value:.0}MHz"),
        Unit::Megahertz => format!("{:.2}GHz", value / 1000.0),
        Unit::Watts => format!("{value:.0}W"),
        Unit::Gigabytes => format!("{value:.1}GB"),
        Unit::Megabytes => format!("{value:.0}MB"),
        Unit::Volts => format!("{value:.2}V"),
        Unit::Amperes => format!("{value:.2}A"),
        Unit::BytesPerSecond => {
            let options = FormatSizeOptions::from(WINDOWS).decimal_places(1).suffix("/s");
            format_size(value.max(0.0) as u64, options)
        }
    }
}

/// Compact form for horizontal and taskbar layouts: no spaces, no rate suffix
pub fn horizontal(normal: &str) -> String {
    normal
        .trim_end_matches("/s")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
