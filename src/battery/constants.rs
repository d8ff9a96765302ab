use std::time::Duration;

/// Minimum interval between power-status polls
pub const POWER_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Simulated cycle: discharge for the first half of each minute, then charge
pub mod simulation {
    pub const CHARGE_START_SECOND: u32 = 30;

    pub const DISCHARGE_VOLTAGE_START: f32 = 16.8;
    pub const DISCHARGE_VOLTAGE_STEP: f32 = 0.06;
    pub const CHARGE_VOLTAGE_START: f32 = 15.5;
    pub const CHARGE_VOLTAGE_STEP: f32 = 0.05;

    pub const DISCHARGE_POWER_BASE: f32 = 25.0;
    pub const CHARGE_POWER_BASE: f32 = 65.0;
}
