#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Telemetry provider error: {0}")]
    Provider(String),

    #[error("Power status error: {0}")]
    PowerStatus(String),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("Unknown metric key: {0}")]
    UnknownKey(String),
}

impl Error {
    pub fn provider<S: Into<String>>(msg: S) -> Self {
        Error::Provider(msg.into())
    }

    pub fn power_status<S: Into<String>>(msg: S) -> Self {
        Error::PowerStatus(msg.into())
    }

    pub(crate) fn unknown_key<S: Into<String>>(key: S) -> Self {
        Error::UnknownKey(key.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reason a metric produced no value during the current cycle.
///
/// Never surfaced through [`MetricEngine::get`](crate::MetricEngine::get); it
/// collapses to "no value" (or the last valid reading) at that boundary.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MissingValue {
    #[error("metric group is disabled")]
    Disabled,

    #[error("no sensor matched")]
    NoSensor,

    #[error("sensor has no reading")]
    NoReading,

    #[error("reading {value} exceeds sanity bound {bound}")]
    Implausible { value: f32, bound: f32 },

    #[error("no candidate device")]
    NoDevice,

    #[error("telemetry provider unavailable")]
    ProviderUnavailable,
}

/// Outcome of resolving one metric.
pub type Resolved = std::result::Result<f32, MissingValue>;
