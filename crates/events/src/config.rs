/// Default buffer capacity for the broadcast channel.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Env var overriding [`DEFAULT_CAPACITY`].
pub const CAPACITY_ENV: &str = "FRONTDESK_EVENT_BUS_CAPACITY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidCapacity { var: &'static str, value: String },
}

/// Event bus configuration loaded from environment variables.
///
/// | Env Var                        | Default |
/// |--------------------------------|---------|
/// | `FRONTDESK_EVENT_BUS_CAPACITY` | `1024`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Messages buffered per subscriber before the slowest one lags.
    pub capacity: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl EventBusConfig {
    /// Load from the environment, falling back to defaults on bad values.
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid event bus configuration, using defaults");
            Self::default()
        })
    }

    /// Load from the environment, rejecting unparsable values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::parse(std::env::var(CAPACITY_ENV).ok().as_deref())
    }

    fn parse(capacity: Option<&str>) -> Result<Self, ConfigError> {
        let Some(raw) = capacity else {
            return Ok(Self::default());
        };
        match raw.trim().parse::<usize>() {
            Ok(capacity) if capacity > 0 => Ok(Self { capacity }),
            _ => Err(ConfigError::InvalidCapacity {
                var: CAPACITY_ENV,
                value: raw.to_string(),
            }),
        }
    }
}
