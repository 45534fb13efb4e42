//! Position-tracking byte cursors.
//!
//! Codecs never touch raw buffers directly. They read through a [`ReadCursor`]
//! and write through a [`WriteCursor`]:
//! - Reads past the end are a hard error, never a short read
//! - Peeking with [`ReadCursor::get`] never moves the position
//! - Both cursors can roll back a failed multi-step operation

pub mod error;
pub mod read;
pub mod write;

pub use error::{CursorError, Result};
pub use read::ReadCursor;
pub use write::WriteCursor;
