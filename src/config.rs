// config.rs - Runtime configuration
//
// Every field has a default; the page may pass a partial JSON object.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::input::{DEFAULT_STRENGTH, TRAIL_CAPACITY};
use crate::sim::{DROP_COUNT, PARTICLE_COUNT};

pub const INTRO_DWELL: f32 = 4.0;
pub const TRANSITION_DWELL: f32 = 1.5;
pub const DEFAULT_ENDPOINT: &str = "/generate_image";
pub const REQUEST_TIMEOUT: f32 = 60.0;
pub const DEFAULT_STYLE: &str = "casual chic";
pub const MAX_UPLOAD_DIM: u32 = 1024;
/// Longest delay a browser timer honours, in seconds. `setTimeout` fires
/// immediately for anything past `i32::MAX` milliseconds.
pub const MAX_DELAY: f32 = (i32::MAX / 1000) as f32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub particles: usize,
    pub drops: usize,
    pub trail_len: usize,
    pub parallax_strength: f32,

    /// Seconds in Intro before the transition starts on its own.
    pub intro_dwell: f32,
    /// Seconds the light sweep plays before the form appears.
    pub transition_dwell: f32,
    /// When false, Intro waits for an explicit enter.
    pub auto_enter: bool,

    pub endpoint: String,
    /// Seconds before an outstanding generation request is aborted.
    pub request_timeout: f32,
    pub style: String,
    /// Uploads are downscaled to fit this square.
    pub max_upload_dim: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particles: PARTICLE_COUNT,
            drops: DROP_COUNT,
            trail_len: TRAIL_CAPACITY,
            parallax_strength: DEFAULT_STRENGTH,
            intro_dwell: INTRO_DWELL,
            transition_dwell: TRANSITION_DWELL,
            auto_enter: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            style: DEFAULT_STYLE.to_string(),
            max_upload_dim: MAX_UPLOAD_DIM,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trail_len == 0 {
            return Err(ConfigError::Invalid("trail_len must be at least 1"));
        }
        if !self.parallax_strength.is_finite() {
            return Err(ConfigError::Invalid("parallax_strength must be finite"));
        }
        if !(0.0..=MAX_DELAY).contains(&self.intro_dwell) {
            return Err(ConfigError::Invalid("intro_dwell must be between 0 and 2147483 seconds"));
        }
        if !(0.0..=MAX_DELAY).contains(&self.transition_dwell) {
            return Err(ConfigError::Invalid("transition_dwell must be between 0 and 2147483 seconds"));
        }
        if !(self.request_timeout > 0.0 && self.request_timeout <= MAX_DELAY) {
            return Err(ConfigError::Invalid("request_timeout must be between 0 and 2147483 seconds"));
        }
        if self.endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty"));
        }
        if self.max_upload_dim == 0 {
            return Err(ConfigError::Invalid("max_upload_dim must be at least 1"));
        }
        Ok(())
    }
}
