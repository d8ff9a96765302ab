use std::time::Duration;

/// Minimum throughput for a cached device to count as active
pub const ACTIVE_THRESHOLD: f32 = 0.1;

pub const NETWORK_COOLDOWN: Duration = Duration::from_secs(3);
pub const DISK_COOLDOWN: Duration = Duration::from_secs(10);

/// Penalty for adapters that look virtual
pub const VIRTUAL_PENALTY: f64 = -1e9;
/// Bonus for the disk hosting the system drive
pub const SYSTEM_DRIVE_BONUS: f64 = 1e9;

/// Throughput sensor name keywords
pub mod keywords {
    pub const UPLOAD: &[&str] = &["upload", "up", "sent", "send", "tx", "transmit"];
    pub const DOWNLOAD: &[&str] = &["download", "down", "received", "receive", "rx"];
    pub const READ: &[&str] = &["read"];
    pub const WRITE: &[&str] = &["write"];

    pub const VIRTUAL_ADAPTER: &[&str] = &[
        "virtual",
        "vmware",
        "hyper-v",
        "hyper v",
        "vbox",
        "loopback",
        "tunnel",
        "tap",
        "tun",
        "bluetooth",
        "zerotier",
        "tailscale",
        "wan miniport",
    ];
}
