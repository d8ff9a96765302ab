//! Canonical metric keys.
//!
//! Every value the engine produces is addressed by a [`MetricKey`], a closed
//! set of dot-namespaced identifiers such as `CPU.Temp` or `GPU.VRAM.Used`.
//! Vendor sensor names never leak past the catalog; consumers only see keys.
//!
//! ```rust
//! use overlay_metrics::metric::{MetricGroup, MetricKey};
//!
//! let key: MetricKey = "GPU.VRAM.Used".parse().unwrap();
//! assert_eq!(key, MetricKey::GpuVramUsed);
//! assert_eq!(key.group(), MetricGroup::Gpu);
//! assert_eq!(key.to_string(), "GPU.VRAM.Used");
//! ```


use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Canonical, vendor-independent metric identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "CPU.Load")]
    CpuLoad,
    #[serde(rename = "CPU.Temp")]
    CpuTemp,
    #[serde(rename = "CPU.Clock")]
    CpuClock,
    #[serde(rename = "CPU.Power")]
    CpuPower,
    #[serde(rename = "GPU.Load")]
    GpuLoad,
    #[serde(rename = "GPU.Temp")]
    GpuTemp,
    #[serde(rename = "GPU.Clock")]
    GpuClock,
    #[serde(rename = "GPU.Power")]
    GpuPower,
    #[serde(rename = "GPU.VRAM")]
    GpuVram,
    #[serde(rename = "GPU.VRAM.Used")]
    GpuVramUsed,
    #[serde(rename = "GPU.VRAM.Total")]
    GpuVramTotal,
    #[serde(rename = "GPU.VRAM.Load")]
    GpuVramLoad,
    #[serde(rename = "MEM.Load")]
    MemLoad,
    #[serde(rename = "MEM.Used")]
    MemUsed,
    #[serde(rename = "MEM.Available")]
    MemAvailable,
    #[serde(rename = "NET.Up")]
    NetUp,
    #[serde(rename = "NET.Down")]
    NetDown,
    #[serde(rename = "DISK.Read")]
    DiskRead,
    #[serde(rename = "DISK.Write")]
    DiskWrite,
    #[serde(rename = "BAT.Percent")]
    BatPercent,
    #[serde(rename = "BAT.Power")]
    BatPower,
    #[serde(rename = "BAT.Voltage")]
    BatVoltage,
    #[serde(rename = "BAT.Current")]
    BatCurrent,
}

impl MetricKey {
    pub const ALL: [MetricKey; 23] = [
        MetricKey::CpuLoad,
        MetricKey::CpuTemp,
        MetricKey::CpuClock,
        MetricKey::CpuPower,
        MetricKey::GpuLoad,
        MetricKey::GpuTemp,
        MetricKey::GpuClock,
        MetricKey::GpuPower,
        MetricKey::GpuVram,
        MetricKey::GpuVramUsed,
        MetricKey::GpuVramTotal,
        MetricKey::GpuVramLoad,
        MetricKey::MemLoad,
        MetricKey::MemUsed,
        MetricKey::MemAvailable,
        MetricKey::NetUp,
        MetricKey::NetDown,
        MetricKey::DiskRead,
        MetricKey::DiskWrite,
        MetricKey::BatPercent,
        MetricKey::BatPower,
        MetricKey::BatVoltage,
        MetricKey::BatCurrent,
    ];

    /// The canonical dot-namespaced spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::CpuLoad => "CPU.Load",
            MetricKey::CpuTemp => "CPU.Temp",
            MetricKey::CpuClock => "CPU.Clock",
            MetricKey::CpuPower => "CPU.Power",
            MetricKey::GpuLoad => "GPU.Load",
            MetricKey::GpuTemp => "GPU.Temp",
            MetricKey::GpuClock => "GPU.Clock",
            MetricKey::GpuPower => "GPU.Power",
            MetricKey::GpuVram => "GPU.VRAM",
            MetricKey::GpuVramUsed => "GPU.VRAM.Used",
            MetricKey::GpuVramTotal => "GPU.VRAM.Total",
            MetricKey::GpuVramLoad => "GPU.VRAM.Load",
            MetricKey::MemLoad => "MEM.Load",
            MetricKey::MemUsed => "MEM.Used",
            MetricKey::MemAvailable => "MEM.Available",
            MetricKey::NetUp => "NET.Up",
            MetricKey::NetDown => "NET.Down",
            MetricKey::DiskRead => "DISK.Read",
            MetricKey::DiskWrite => "DISK.Write",
            MetricKey::BatPercent => "BAT.Percent",
            MetricKey::BatPower => "BAT.Power",
            MetricKey::BatVoltage => "BAT.Voltage",
            MetricKey::BatCurrent => "BAT.Current",
        }
    }

    /// Feature group the metric belongs to
    pub fn group(&self) -> MetricGroup {
        match self {
            MetricKey::CpuLoad | MetricKey::CpuTemp | MetricKey::CpuClock | MetricKey::CpuPower => {
                MetricGroup::Cpu
            }
            MetricKey::GpuLoad
            | MetricKey::GpuTemp
            | MetricKey::GpuClock
            | MetricKey::GpuPower
            | MetricKey::GpuVram
            | MetricKey::GpuVramUsed
            | MetricKey::GpuVramTotal
            | MetricKey::GpuVramLoad => MetricGroup::Gpu,
            MetricKey::MemLoad | MetricKey::MemUsed | MetricKey::MemAvailable => MetricGroup::Memory,
            MetricKey::NetUp | MetricKey::NetDown => MetricGroup::Network,
            MetricKey::DiskRead | MetricKey::DiskWrite => MetricGroup::Disk,
            MetricKey::BatPercent | MetricKey::BatPower | MetricKey::BatVoltage | MetricKey::BatCurrent => {
                MetricGroup::Battery
            }
        }
    }

    /// Display unit of the resolved value
    pub fn unit(&self) -> Unit {
        match self {
            MetricKey::CpuLoad
            | MetricKey::GpuLoad
            | MetricKey::GpuVram
            | MetricKey::GpuVramLoad
            | MetricKey::MemLoad
            | MetricKey::BatPercent => Unit::Percent,
            MetricKey::CpuTemp | MetricKey::GpuTemp => Unit::Celsius,
            MetricKey::CpuClock | MetricKey::GpuClock => Unit::Megahertz,
            MetricKey::CpuPower | MetricKey::GpuPower | MetricKey::BatPower => Unit::Watts,
            MetricKey::GpuVramUsed | MetricKey::GpuVramTotal => Unit::Megabytes,
            MetricKey::MemUsed | MetricKey::MemAvailable => Unit::Gigabytes,
            MetricKey::NetUp | MetricKey::NetDown | MetricKey::DiskRead | MetricKey::DiskWrite => {
                Unit::BytesPerSecond
            }
            MetricKey::BatVoltage => Unit::Volts,
            MetricKey::BatCurrent => Unit::Amperes,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        MetricKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::unknown_key(s))
    }
}

/// Metric groups that can be switched on and off in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricGroup {
    Cpu,
    Gpu,
    Memory,
    Network,
    Disk,
    Battery,
}

/// Physical unit of a resolved metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Percent,
    Celsius,
    Megahertz,
    Watts,
    Megabytes,
    Gigabytes,
    /// Throughput in bytes per second
    BytesPerSecond,
    Volts,
    Amperes,
}
