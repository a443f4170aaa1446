/// Convenience result type used across linefield.
pub type FieldResult<T> = Result<T, FieldError>;

/// Top-level error taxonomy used by the generator, compositor and orchestrator.
#[derive(thiserror::Error, Debug)]
pub enum FieldError {
    /// Invalid configuration or caller-provided dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// The host could not provide a drawing surface. Fatal for the orchestrator.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Errors raised by a surface while drawing or reading back pixels.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FieldError {
    /// Build a [`FieldError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FieldError::SurfaceUnavailable`] value.
    pub fn surface_unavailable(msg: impl Into<String>) -> Self {
        Self::SurfaceUnavailable(msg.into())
    }

    /// Build a [`FieldError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FieldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
