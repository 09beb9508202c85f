use thiserror::Error;

/// Errors raised while binding or driving a ripple animator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RippleError {
    /// The bound element has no non-whitespace text.
    #[error("element has no visible text to animate")]
    BlankText,

    #[error("glyph palette must contain at least one character")]
    EmptyPalette,

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    /// A scheduling or DOM call on the host failed.
    #[error("host call failed: {0}")]
    Host(String),
}

pub type Result<T, E = RippleError> = std::result::Result<T, E>;
