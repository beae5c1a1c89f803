use thiserror::Error;

/// Reasons a session cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("The target text is empty")]
    EmptyText,

    #[error("A session needs at least one second on the clock")]
    ZeroDuration,
}
