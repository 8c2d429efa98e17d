/// Convenience result type used across the crate.
pub type FamilyResult<T> = Result<T, FamilyError>;

/// Top-level error taxonomy.
///
/// None of these are raised while evaluating a frame; they only surface when loading props,
/// validating schemas, reading piece tables or resolving composition ids.
#[derive(thiserror::Error, Debug)]
pub enum FamilyError {
    /// Invalid user-provided props or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation curve definitions.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FamilyError {
    /// Build a [`FamilyError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FamilyError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }
}

impl From<serde_json::Error> for FamilyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
