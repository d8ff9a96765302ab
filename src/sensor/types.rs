use serde::{Deserialize, Serialize};

/// Hardware class reported by the telemetry provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HardwareType {
    Cpu,
    GpuNvidia,
    GpuAmd,
    GpuIntel,
    Memory,
    Motherboard,
    SuperIo,
    Storage,
    Network,
    Battery,
    Cooler,
    EmbeddedController,
    Psu,
}

impl HardwareType {
    /// Returns true for every GPU vendor class
    pub fn is_gpu(&self) -> bool {
        matches!(self, HardwareType::GpuNvidia | HardwareType::GpuAmd | HardwareType::GpuIntel)
    }

    /// Returns true for discrete GPU vendors
    pub fn is_discrete_gpu(&self) -> bool {
        matches!(self, HardwareType::GpuNvidia | HardwareType::GpuAmd)
    }
}

impl std::fmt::Display for HardwareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardwareType::Cpu => write!(f, "CPU"),
            HardwareType::GpuNvidia => write!(f, "NVIDIA GPU"),
            HardwareType::GpuAmd => write!(f, "AMD GPU"),
            HardwareType::GpuIntel => write!(f, "Intel GPU"),
            HardwareType::Memory => write!(f, "Memory"),
            HardwareType::Motherboard => write!(f, "Motherboard"),
            HardwareType::SuperIo => write!(f, "SuperIO"),
            HardwareType::Storage => write!(f, "Storage"),
            HardwareType::Network => write!(f, "Network"),
            HardwareType::Battery => write!(f, "Battery"),
            HardwareType::Cooler => write!(f, "Cooler"),
            HardwareType::EmbeddedController => write!(f, "Embedded Controller"),
            HardwareType::Psu => write!(f, "PSU"),
        }
    }
}

/// Kind of measurement a sensor produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Load,
    Temperature,
    Clock,
    Power,
    Data,
    SmallData,
    Throughput,
    Fan,
    Voltage,
    Current,
    Level,
}

/// A single raw sensor reading as exposed by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    /// Kind of measurement
    pub sensor_type: SensorType,
    /// Free-text name assigned by the vendor or firmware
    pub name: String,
    /// Current value, absent when the sensor was not read this cycle
    pub value: Option<f32>,
}

impl Sensor {
    pub fn new(sensor_type: SensorType, name: impl Into<String>, value: Option<f32>) -> Self {
        Self {
            sensor_type,
            name: name.into(),
            value,
        }
    }

    /// Returns the value if it is present and finite
    pub fn reading(&self) -> Option<f32> {
        self.value.filter(|v| v.is_finite())
    }
}

/// Stable provider-assigned identifier of a device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeviceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DeviceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hardware device and the sensors it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Parent device for sub-hardware such as SuperIO chips on a motherboard
    pub parent: Option<DeviceId>,
    pub hardware_type: HardwareType,
    pub name: String,
    pub sensors: Vec<Sensor>,
}

impl Device {
    pub fn new(id: impl Into<DeviceId>, hardware_type: HardwareType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            hardware_type,
            name: name.into(),
            sensors: Vec::new(),
        }
    }

    /// Attach this device below `parent`
    pub fn with_parent(mut self, parent: impl Into<DeviceId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Append a sensor with a reading
    pub fn with_sensor(mut self, sensor_type: SensorType, name: impl Into<String>, value: f32) -> Self {
        self.sensors.push(Sensor::new(sensor_type, name, Some(value)));
        self
    }

    /// Append a sensor that currently has no reading
    pub fn with_unread_sensor(mut self, sensor_type: SensorType, name: impl Into<String>) -> Self {
        self.sensors.push(Sensor::new(sensor_type, name, None));
        self
    }

    /// Iterate sensors of one type together with their index
    pub fn sensors_of(&self, sensor_type: SensorType) -> impl Iterator<Item = (usize, &Sensor)> {
        self.sensors
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.sensor_type == sensor_type)
    }
}

/// Position of a sensor inside a [`Snapshot`](super::Snapshot).
///
/// Only meaningful against snapshots sharing the topology fingerprint of the
/// snapshot it was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorLocator {
    pub device: usize,
    pub sensor: usize,
}

impl SensorLocator {
    pub fn new(device: usize, sensor: usize) -> Self {
        Self { device, sensor }
    }
}
