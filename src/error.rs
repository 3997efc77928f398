use thiserror::Error;

/// Errors surfaced by scene construction and runtime operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    /// Invalid generation parameters. Fatal to the build call that raised it;
    /// the caller may retry with corrected parameters.
    #[error("invalid scene configuration: {0}")]
    Configuration(String),

    /// `add_decorative_object` would push the live gift count past the cap.
    /// The registry is left unchanged.
    #[error("gift capacity of {cap} exceeded")]
    CapacityExceeded { cap: usize },

    /// An operation referenced an id that is no longer live
    #[error("stale object reference: {0}")]
    StaleReference(u32),

    /// The external render/context collaborator reported that it could not
    /// initialize. The core records this and refuses further ticks.
    #[error("render initialization failed: {0}")]
    InitializationFailed(String),
}

impl SceneError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        SceneError::Configuration(msg.into())
    }
}
