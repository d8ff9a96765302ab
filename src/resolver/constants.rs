/// CPU clock readings at or below this are bus noise, in MHz
pub const CPU_CLOCK_FLOOR_MHZ: f32 = 400.0;

/// Bus-speed readings outside this open range are ignored
pub const BUS_SPEED_RANGE: (f32, f32) = (1.0, 20.0);

/// Reference clock used to derive the correction factor, in MHz
pub const REFERENCE_BUS_MHZ: f32 = 100.0;

/// Correction factors outside this open range are ignored
pub const CORRECTION_FACTOR_RANGE: (f32, f32) = (2.0, 10.0);

/// Sanity bounds; readings above these are sensor errors
pub mod bounds {
    pub const CPU_POWER_W: f32 = 600.0;
    pub const GPU_CLOCK_MHZ: f32 = 6000.0;
    pub const GPU_POWER_W: f32 = 1200.0;
}

/// A VRAM total above this is in bytes rather than MB
pub const VRAM_BYTES_THRESHOLD: f32 = 10_485_760.0;
pub const VRAM_BYTES_DIVISOR: f32 = 1_048_576.0;

/// A RAM total above this is in MB rather than GB
pub const RAM_MB_THRESHOLD: f32 = 512.0;

/// Sensor name keywords
pub mod keywords {
    pub const CORE_LOAD_EXCLUDE: &[&str] = &["total", "soc", "max", "average"];
    pub const CORE_CLOCK_EXCLUDE: &[&str] = &["bus", "average", "max", "effective"];
    pub const TEMP_EXCLUDE: &[&str] = &["distance", "average", "max"];
    pub const BUS_SPEED: &str = "bus speed";
    pub const GPU_CLOCK: &[&str] = &["graphics", "core", "shader"];
    pub const GPU_POWER: &[&str] = &["package", "ppt", "board", "core", "gpu"];
}
