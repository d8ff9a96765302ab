use std::sync::Arc;

use overlay_metrics::sensor::{Device, HardwareType, SensorType, Snapshot};
use overlay_metrics::Result;
use parking_lot::Mutex;

/// Builds device trees shaped like what a hardware monitor reports
#[derive(Debug, Default)]
pub struct TestTopologyBuilder {
    devices: Vec<Device>,
}

impl TestTopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// A CPU with a total load, package temperature and power, and one
    /// `Core #n` clock sensor per entry of `clocks`
    pub fn cpu(self, name: &str, clocks: &[f32]) -> Self {
        let mut cpu = Device::new("/intelcpu/0", HardwareType::Cpu, name)
            .with_sensor(SensorType::Load, "CPU Total", 23.0)
            .with_sensor(SensorType::Temperature, "CPU Package", 64.0)
            .with_sensor(SensorType::Power, "CPU Package", 65.0);
        for (i, clock) in clocks.iter().enumerate() {
            cpu = cpu.with_sensor(SensorType::Clock, format!("Core #{}", i + 1), *clock);
        }
        self.device(cpu)
    }

    pub fn gpu(self, hardware_type: HardwareType, name: &str, power: f32, clock: f32) -> Self {
        let index = self.devices.iter().filter(|d| d.hardware_type.is_gpu()).count();
        let gpu = Device::new(format!("/gpu/{index}"), hardware_type, name)
            .with_sensor(SensorType::Load, "GPU Core", 48.0)
            .with_sensor(SensorType::Temperature, "GPU Core", 58.0)
            .with_sensor(SensorType::Clock, "GPU Memory", 10_501.0)
            .with_sensor(SensorType::Clock, "GPU Core", clock)
            .with_sensor(SensorType::Power, "GPU Package", power);
        self.device(gpu)
    }

    /// Adapter whose id follows its name, so a renamed adapter is a new device
    pub fn network(self, name: &str, upload: f32, download: f32) -> Self {
        let adapter = Device::new(format!("/nic/{name}"), HardwareType::Network, name)
            .with_sensor(SensorType::Data, "Data Uploaded", 1.2)
            .with_sensor(SensorType::Throughput, "Upload Speed", upload)
            .with_sensor(SensorType::Throughput, "Download Speed", download);
        self.device(adapter)
    }

    /// Drive whose id follows its name
    pub fn disk(self, name: &str, read: f32, write: f32) -> Self {
        let disk = Device::new(format!("/nvme/{name}"), HardwareType::Storage, name)
            .with_sensor(SensorType::Load, "Used Space", 61.0)
            .with_sensor(SensorType::Throughput, "Read Rate", read)
            .with_sensor(SensorType::Throughput, "Write Rate", write);
        self.device(disk)
    }

    /// Battery with unsigned power and current magnitudes
    pub fn battery(self, percent: f32, rate: f32, voltage: f32, current: f32) -> Self {
        let battery = Device::new("/battery/0", HardwareType::Battery, "Primary Battery")
            .with_sensor(SensorType::Level, "Charge Level", percent)
            .with_sensor(SensorType::Voltage, "Voltage", voltage)
            .with_sensor(SensorType::Power, "Discharge Rate", rate)
            .with_sensor(SensorType::Current, "Discharge Current", current);
        self.device(battery)
    }

    pub fn build(self) -> Snapshot {
        Snapshot::new(self.devices)
    }
}

/// A topology the test can swap between engine refreshes
#[derive(Debug, Clone, Default)]
pub struct SharedTopology {
    current: Arc<Mutex<Snapshot>>,
}

impl SharedTopology {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub fn set(&self, snapshot: Snapshot) {
        *self.current.lock() = snapshot;
    }

    /// A sensor source reading whatever snapshot is current
    pub fn source(&self) -> impl Fn() -> Result<Snapshot> + Send + Sync + 'static {
        let current = Arc::clone(&self.current);
        move || -> Result<Snapshot> { Ok(current.lock().clone()) }
    }
}
