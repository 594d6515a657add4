use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::emitter::DEFAULT_INTERVAL;
use crate::error::ConfigError;
use crate::measurement::DEFAULT_MEASUREMENT;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub serial: SerialConfig,
    pub emitter: EmitterConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyACM0` or `COM3`
    pub path: String,
    pub baud_rate: u32,
    /// Read/write timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Delay between packets in milliseconds
    pub interval_ms: u64,
    pub measurement: MeasurementConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MeasurementConfig {
    Constant { value: i32 },
    Ramp { start: i32, step: i32 },
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.emitter.interval_ms == 0 {
            return Err(ConfigError::Invalid("emitter.interval_ms must be greater than zero"));
        }
        if self.serial.path.is_empty() {
            return Err(ConfigError::Invalid("serial.path must not be empty"));
        }
        Ok(())
    }
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: "/dev/ttyACM0".to_string(),
            baud_rate: 115_200,
            timeout_ms: 1000,
        }
    }
}

impl EmitterConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
            measurement: MeasurementConfig::default(),
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        MeasurementConfig::Constant {
            value: DEFAULT_MEASUREMENT,
        }
    }
}
