use crate::sensor::SensorLocator;

/// Sensor lists derived from one topology scan.
///
/// Every field is filled lazily on first use and dropped together by
/// [`ScanMemo::clear`] when the topology changes or the cache is cleared.
#[derive(Debug, Clone, Default)]
pub struct ScanMemo {
    pub cpu_core_loads: Option<Vec<SensorLocator>>,
    pub cpu_temps: Option<Vec<SensorLocator>>,
    pub cpu_core_clocks: Option<Vec<SensorLocator>>,
    pub bus_speed: Option<Option<SensorLocator>>,
    pub best_gpu: Option<Option<usize>>,
}

impl ScanMemo {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.cpu_core_loads.is_none()
            && self.cpu_temps.is_none()
            && self.cpu_core_clocks.is_none()
            && self.bus_speed.is_none()
            && self.best_gpu.is_none()
    }
}
