use crate::metric::MetricKey;
use crate::sensor::{Device, HardwareType, Sensor, SensorType};
use crate::utils::{has, has_any};

/// Which devices a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceScope {
    Cpu,
    Gpu,
    /// Physical memory; devices named "virtual" are skipped
    Memory,
    Battery,
}

impl DeviceScope {
    pub fn admits(&self, device: &Device) -> bool {
        match self {
            DeviceScope::Cpu => device.hardware_type == HardwareType::Cpu,
            DeviceScope::Gpu => device.hardware_type.is_gpu(),
            DeviceScope::Memory => {
                device.hardware_type == HardwareType::Memory && !has(&device.name, "virtual")
            }
            DeviceScope::Battery => device.hardware_type == HardwareType::Battery,
        }
    }
}

/// One classification rule.
///
/// A sensor matches when its device is in scope, its type is listed, its name
/// contains at least one `any_of` keyword, every `all_of` keyword and none of
/// the `none_of` keywords.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub scope: DeviceScope,
    pub sensor_types: &'static [SensorType],
    pub any_of: &'static [&'static str],
    pub all_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
    pub key: MetricKey,
}

impl Rule {
    pub fn matches(&self, device: &Device, sensor: &Sensor) -> bool {
        self.scope.admits(device)
            && self.sensor_types.contains(&sensor.sensor_type)
            && has_any(&sensor.name, self.any_of)
            && self.all_of.iter().all(|k| has(&sensor.name, k))
            && !has_any(&sensor.name, self.none_of)
    }
}

const NONE: &[&str] = &[];

/// Classification table in priority order.
///
/// Earlier rules win over later rules for the same key, so a later rule for a
/// key is a fallback tier. New vendor naming goes here, not into code.
pub static RULES: &[Rule] = &[
    // CPU
    Rule {
        scope: DeviceScope::Cpu,
        sensor_types: &[SensorType::Load],
        any_of: &["total", "package"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::CpuLoad,
    },
    Rule {
        scope: DeviceScope::Cpu,
        sensor_types: &[SensorType::Temperature],
        any_of: &["package", "average", "tctl", "tdie", "ccd", "cores"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::CpuTemp,
    },
    // Second tier. Can land on a single numbered core when no package sensor
    // exists; that is the only reading such CPUs expose.
    Rule {
        scope: DeviceScope::Cpu,
        sensor_types: &[SensorType::Temperature],
        any_of: &["cpu", "core"],
        all_of: NONE,
        none_of: &["soc", "vrm", "fan", "pump", "liquid", "coolant", "distance"],
        key: MetricKey::CpuTemp,
    },
    Rule {
        scope: DeviceScope::Cpu,
        sensor_types: &[SensorType::Power],
        any_of: &["package", "cores"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::CpuPower,
    },
    // GPU
    Rule {
        scope: DeviceScope::Gpu,
        sensor_types: &[SensorType::Load],
        any_of: &["core", "d3d 3d"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::GpuLoad,
    },
    Rule {
        scope: DeviceScope::Gpu,
        sensor_types: &[SensorType::Temperature],
        any_of: &["core", "hot spot", "soc", "vr"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::GpuTemp,
    },
    Rule {
        scope: DeviceScope::Gpu,
        sensor_types: &[SensorType::SmallData],
        any_of: &["memory", "dedicated"],
        all_of: &["used"],
        none_of: NONE,
        key: MetricKey::GpuVramUsed,
    },
    Rule {
        scope: DeviceScope::Gpu,
        sensor_types: &[SensorType::SmallData],
        any_of: &["memory", "dedicated"],
        all_of: &["total"],
        none_of: NONE,
        key: MetricKey::GpuVramTotal,
    },
    Rule {
        scope: DeviceScope::Gpu,
        sensor_types: &[SensorType::Load],
        any_of: &["memory"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::GpuVramLoad,
    },
    // Memory
    Rule {
        scope: DeviceScope::Memory,
        sensor_types: &[SensorType::Load],
        any_of: &["memory"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::MemLoad,
    },
    Rule {
        scope: DeviceScope::Memory,
        sensor_types: &[SensorType::Data, SensorType::SmallData],
        any_of: &["used"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::MemUsed,
    },
    Rule {
        scope: DeviceScope::Memory,
        sensor_types: &[SensorType::Data, SensorType::SmallData],
        any_of: &["available"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::MemAvailable,
    },
    // Battery
    Rule {
        scope: DeviceScope::Battery,
        sensor_types: &[SensorType::Level],
        any_of: &["charge"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::BatPercent,
    },
    Rule {
        scope: DeviceScope::Battery,
        sensor_types: &[SensorType::Voltage],
        any_of: &["voltage"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::BatVoltage,
    },
    Rule {
        scope: DeviceScope::Battery,
        sensor_types: &[SensorType::Power],
        any_of: &["rate", "power"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::BatPower,
    },
    Rule {
        scope: DeviceScope::Battery,
        sensor_types: &[SensorType::Current],
        any_of: &["current"],
        all_of: NONE,
        none_of: NONE,
        key: MetricKey::BatCurrent,
    },
];
