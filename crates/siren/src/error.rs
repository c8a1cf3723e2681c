//! Error taxonomy for Siren document parsing.

/// All validation failures the parser can report.
///
/// The set is flat and closed; the first failure encountered in
/// depth-first, index-ascending traversal order aborts the whole parse
/// and is returned as the sole result. Nothing is retried or
/// auto-corrected beyond the documented defaults (`method` -> `"GET"`,
/// field `type` -> `"text"`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The top-level JSON value is not an object.
    #[error("top-level JSON value is not an object")]
    InvalidJsonObject,

    /// An embedded entity lacks a `rel` array of strings (strict policy
    /// only; the lenient policy substitutes an empty `rel` instead).
    #[error("embedded entity is missing a 'rel' array")]
    MissingSubEntityRel,

    /// A link-shaped object lacks a `rel` array of strings.
    #[error("link is missing a 'rel' array")]
    MissingEmbeddedLinkRel,

    /// A link-shaped object lacks an `href` string.
    #[error("link is missing an 'href' string")]
    MissingEmbeddedLinkHref,

    /// A link `href` string failed URI parsing. Carries the exact
    /// original string for diagnostics.
    #[error("link href is not a valid URI: {0:?}")]
    InvalidEmbeddedLinkHref(String),

    /// An action object lacks a `name` string.
    #[error("action is missing a 'name' string")]
    MissingActionName,

    /// An action object lacks an `href` string.
    #[error("action is missing an 'href' string")]
    MissingActionHref,

    /// An action `href` string failed URI parsing. Carries the exact
    /// original string for diagnostics.
    #[error("action href is not a valid URI: {0:?}")]
    InvalidActionHref(String),

    /// A field object lacks a `name` string.
    #[error("field is missing a 'name' string")]
    MissingFieldName,

    /// Embedded-entity nesting exceeded the configured limit. Carries
    /// the limit that was in effect.
    #[error("sub-entity nesting exceeds the configured limit of {0}")]
    NestingTooDeep(usize),
}

/// Failures at the byte-level boundary: either the input is not
/// well-formed JSON, or it decoded fine but failed Siren validation.
///
/// Keeping the two apart matters to callers — a decode failure means the
/// payload is not JSON at all, while [`ParseError::InvalidJsonObject`]
/// means it is valid JSON of the wrong shape.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte buffer is not well-formed JSON.
    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded JSON value is not a valid Siren document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
