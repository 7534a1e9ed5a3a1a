//! Error types
//!
//! Library errors are plain enums; the binary wraps them with `anyhow`.

use std::fmt;

/// Normalizing a vector whose magnitude is zero (or not finite)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateVectorError {
    pub x: f32,
    pub y: f32,
}

impl fmt::Display for DegenerateVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot normalize degenerate vector ({}, {})", self.x, self.y)
    }
}

impl std::error::Error for DegenerateVectorError {}

/// Shape construction input outside what the geometry engine accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidGeometryError {
    /// A coordinate or size was NaN or infinite
    NonFinite,
    /// Position outside `[-extent, extent]` on either axis
    OutOfRange { x: f32, y: f32, extent: f32 },
    /// Side length / radius must be > 0 and no larger than the display span
    BadSize { size: f32, max: f32 },
    /// A circle needs at least three segments
    TooFewSegments { segments: u32 },
}

impl fmt::Display for InvalidGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "geometry input is not finite"),
            Self::OutOfRange { x, y, extent } => {
                write!(f, "position ({x}, {y}) outside display range ±{extent}")
            }
            Self::BadSize { size, max } => write!(f, "size {size} not in (0, {max}]"),
            Self::TooFewSegments { segments } => {
                write!(f, "circle needs at least 3 segments, got {segments}")
            }
        }
    }
}

impl std::error::Error for InvalidGeometryError {}

/// Failure loading or validating a scenario
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read scenario: {e}"),
            Self::Parse(e) => write!(f, "failed to parse scenario: {e}"),
            Self::Invalid(msg) => write!(f, "invalid scenario: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Failure assembling a scene from a scenario
#[derive(Debug)]
pub enum SceneError {
    Config(ConfigError),
    /// Body `index` maps to a shape the geometry engine rejects
    Geometry {
        index: usize,
        source: InvalidGeometryError,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Geometry { index, source } => write!(f, "body {index}: {source}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Geometry { source, .. } => Some(source),
        }
    }
}

impl From<ConfigError> for SceneError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
