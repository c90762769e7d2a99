//! Error types for configuration and geometry surfaces.
//!
//! Per-frame operations never return errors; they degrade to a no-op frame.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CarouselError {
    /// A configuration value is out of range or inconsistent with another.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration JSON could not be parsed.
    #[error("config json parse error: {0}")]
    ConfigParse(String),

    /// A geometry snapshot carries values the engine cannot measure.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },
}

impl CarouselError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}
