/// Errors that can occur while moving through a byte cursor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// A read or peek asked for more bytes than remain in the cursor.
    #[error("out of bounds (requested {requested} bytes, {remaining} remaining)")]
    OutOfBounds { requested: usize, remaining: usize },
}

pub type Result<T> = std::result::Result<T, CursorError>;
