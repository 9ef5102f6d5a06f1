use thiserror::Error;

/// The one way a parse can fail.
///
/// Malformed markup never produces this: unterminated constructs are closed
/// at the end of their line or of the input. It is raised only when the
/// scanner reaches a state it has no transition for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("syntax error at byte {offset}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}
