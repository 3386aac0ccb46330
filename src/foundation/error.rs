/// Convenience result type used across fadeshift.
pub type FadeResult<T> = Result<T, FadeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FadeError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// An image batch was rejected at the ingestion boundary.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// The animation clock could not be armed or sampled.
    #[error("animation error: {0}")]
    Animation(String),

    /// A snippet could not be generated for the requested target.
    #[error("emission error: {0}")]
    Emission(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FadeError {
    /// Build a [`FadeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FadeError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Build a [`FadeError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`FadeError::Emission`] value.
    pub fn emission(msg: impl Into<String>) -> Self {
        Self::Emission(msg.into())
    }

    /// Build a [`FadeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// The bare message without the category prefix, suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(m)
            | Self::Ingest(m)
            | Self::Animation(m)
            | Self::Emission(m)
            | Self::Serde(m) => m.clone(),
            Self::Other(e) => format!("{e:#}"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
