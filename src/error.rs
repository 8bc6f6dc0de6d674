//! Error types for constructing and consuming sum types.

use thiserror::Error;

/// Result type for sum type operations.
pub type Result<T> = std::result::Result<T, SumError>;

/// Errors raised while building, matching or decoding sum type members.
///
/// Refinement (see [`is`](crate::is)) never produces one of these: a foreign
/// value that does not fit is simply rejected.
#[derive(Debug, Error)]
pub enum SumError {
    /// Dispatch found neither an arm for the tag nor a wildcard.
    #[error("Failed to pattern match against tag \"{tag}\" of sum type `{sum}`.")]
    Unmatched { sum: &'static str, tag: String },

    /// The tag is not declared by the sum type.
    #[error("tag \"{tag}\" is not a member of sum type `{sum}`")]
    UnknownTag { sum: &'static str, tag: String },

    /// Tags are never empty.
    #[error("tags must not be empty")]
    EmptyTag,

    /// A handler map covers neither every declared tag nor has a wildcard.
    #[error("non-exhaustive match on sum type `{sum}`: no arm for {missing:?} and no wildcard")]
    NonExhaustive {
        sum: &'static str,
        missing: Vec<String>,
    },

    /// An open sum type cannot be covered tag by tag.
    #[error("match on open sum type `{sum}` requires a wildcard")]
    OpenWithoutWildcard { sum: &'static str },

    /// A handler map names the same tag twice.
    #[error("duplicate arm for tag \"{tag}\" in match on sum type `{sum}`")]
    DuplicateArm { sum: &'static str, tag: String },

    /// A typed payload could not be encoded or decoded.
    #[error("payload of \"{tag}\" in sum type `{sum}` has an unexpected shape: {source}")]
    Payload {
        sum: &'static str,
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SumError {
    /// The tag the error is about, when there is one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            SumError::Unmatched { tag, .. }
            | SumError::UnknownTag { tag, .. }
            | SumError::DuplicateArm { tag, .. }
            | SumError::Payload { tag, .. } => Some(tag.as_str()),
            SumError::EmptyTag
            | SumError::NonExhaustive { .. }
            | SumError::OpenWithoutWildcard { .. } => None,
        }
    }
}
