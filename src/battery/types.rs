use serde::{Deserialize, Serialize};

/// AC and charging state reported by the operating system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStatus {
    /// The power line is connected
    pub ac_online: bool,
    /// The battery is actually taking charge. False on AC means bypass or full.
    pub charging: bool,
}

impl PowerStatus {
    pub fn on_battery() -> Self {
        Self {
            ac_online: false,
            charging: false,
        }
    }

    pub fn charging() -> Self {
        Self {
            ac_online: true,
            charging: true,
        }
    }

    /// On AC without charging
    pub fn bypass() -> Self {
        Self {
            ac_online: true,
            charging: false,
        }
    }
}

impl std::fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.ac_online, self.charging) {
            (false, _) => write!(f, "Discharging"),
            (true, true) => write!(f, "Charging"),
            (true, false) => write!(f, "AC bypass"),
        }
    }
}
