//! Error types for the engine.
//!
//! Simulator and surface failures have no error type: a missing canvas
//! renders nothing. Everything here is on the config and
//! outfit-generation paths.

use std::fmt;

/// Errors while turning the selected photo into an upload.
#[derive(Debug)]
pub enum UploadError {
    /// Bytes are not a decodable image.
    Decode(image::ImageError),
    /// Re-encoding to PNG failed.
    Encode(image::ImageError),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Decode(e) => write!(f, "Failed to decode image: {}", e),
            UploadError::Encode(e) => write!(f, "Failed to encode PNG: {}", e),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UploadError::Decode(e) | UploadError::Encode(e) => Some(e),
        }
    }
}

/// Errors on the way to, or back from, the generation endpoint.
#[derive(Debug)]
pub enum GenerateError {
    /// Submit pressed with no photo selected.
    NoImage,
    /// Birthday missing.
    NoBirthday,
    /// Birthday present but not `YYYY-MM-DD`.
    InvalidBirthday(String),
    /// Photo could not be prepared.
    Upload(UploadError),
    /// A request is already in flight.
    Busy,
    /// Request body could not be serialised.
    Encode(serde_json::Error),
    /// Endpoint answered with a non-success status.
    Status(u16),
    /// Transport failed (network error, CORS, aborted stream, ...).
    Transport(String),
    /// No answer within the configured timeout.
    Timeout,
    /// The view was torn down before the request settled.
    Cancelled,
}

impl GenerateError {
    /// Text shown to the user next to the submit button.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::NoImage => "Please select an image first.",
            GenerateError::NoBirthday => "Please enter your birthday.",
            GenerateError::InvalidBirthday(_) => "Please enter your birthday as YYYY-MM-DD.",
            GenerateError::Upload(_) => "Unsupported image format. Please choose a PNG or JPEG photo.",
            GenerateError::Busy => "An outfit is already being generated.",
            GenerateError::Cancelled => "Outfit generation was cancelled.",
            GenerateError::Encode(_)
            | GenerateError::Status(_)
            | GenerateError::Transport(_)
            | GenerateError::Timeout => "Outfit generation failed. Please try again.",
        }
    }

    /// Local validation failures; no request was issued.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            GenerateError::NoImage
                | GenerateError::NoBirthday
                | GenerateError::InvalidBirthday(_)
                | GenerateError::Upload(_)
        )
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoImage => write!(f, "No image selected"),
            GenerateError::NoBirthday => write!(f, "No birthday entered"),
            GenerateError::InvalidBirthday(s) => write!(f, "Invalid birthday: {:?}", s),
            GenerateError::Upload(e) => write!(f, "Upload preparation failed: {}", e),
            GenerateError::Busy => write!(f, "A generation request is already in flight"),
            GenerateError::Encode(e) => write!(f, "Failed to serialise request: {}", e),
            GenerateError::Status(code) => write!(f, "Generation endpoint returned HTTP {}", code),
            GenerateError::Transport(msg) => write!(f, "Generation request failed: {}", msg),
            GenerateError::Timeout => write!(f, "Generation request timed out"),
            GenerateError::Cancelled => write!(f, "Generation cancelled by teardown"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Upload(e) => Some(e),
            GenerateError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<UploadError> for GenerateError {
    fn from(e: UploadError) -> Self {
        GenerateError::Upload(e)
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Encode(e)
    }
}

/// Errors loading a [`Config`](crate::Config).
#[derive(Debug)]
pub enum ConfigError {
    /// Not valid JSON, or a field has the wrong type.
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(what) => write!(f, "Invalid config: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
