//! Error types shared by every aeon crate

use thiserror::Error;

/// Result type for aeon operations
pub type Result<T> = std::result::Result<T, AeonError>;

/// Errors raised while building or persisting a scene.
///
/// Scene inputs are compiled-in literals, so nothing here is retried: an error
/// aborts construction of the scene that raised it.
#[derive(Error, Debug)]
pub enum AeonError {
    /// A derived quantity was requested outside its physical domain (a <= 0)
    #[error("Domain error: {0}")]
    Domain(String),

    /// Degenerate axis ranges, invalid event tables and similar bad literals
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A step referenced elements in a state it cannot act on
    #[error("Choreography error: {0}")]
    Choreography(String),

    /// No scene is registered under this name
    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    /// I/O error (script files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a recorded script failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AeonError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn choreography(msg: impl Into<String>) -> Self {
        Self::Choreography(msg.into())
    }
}
