//! Render failure types shared across the engine

use thiserror::Error;

/// Error type for render failures.
///
/// Rendering is all-or-nothing: a failing stage or layer fails the whole
/// output rather than producing a partial token string. Invalid variable
/// names are deliberately NOT represented here - they degrade to empty
/// output instead (see `variable`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A stage contains an entry with an empty key or empty value
    /// (raw transformation excluded).
    #[error("stage contains an empty parameter (key: '{key}')")]
    EmptyParam { key: String },

    /// A layer has neither a public id nor (for text layers) text content.
    #[error("layer requires a public id or text content")]
    MissingIdentifier,

    /// Optional text styling was set without both font family and font size.
    #[error("text styling requires both font family and font size")]
    IncompleteTextProperties,
}
