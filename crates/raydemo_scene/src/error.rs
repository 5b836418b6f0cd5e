//! Scene error types

use std::fmt;

/// Error type for scene construction
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Generator settings that cannot produce a valid scene
    InvalidSettings(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidSettings(msg) => write!(f, "Invalid scene settings: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}
