//! Composable binary codecs.
//!
//! wireprims builds wire formats out of small codecs that nest: a boolean stored
//! through an integer, a string framed by another codec's length prefix.
//!
//! # Crate Structure
//!
//! - [`cursor`]: Position-tracking read and write cursors
//! - [`types`]: The type contract plus integer, boolean and string codecs
//! - [`logging`]: Optional `tracing` subscriber setup (behind `logging` feature)

/// Re-export cursor types.
pub mod cursor {
    pub use wireprims_cursor::*;
}

/// Re-export codec types.
pub mod types {
    pub use wireprims_types::*;
}

#[cfg(feature = "logging")]
pub mod logging;

pub use wireprims_cursor::{ReadCursor, WriteCursor};
pub use wireprims_types::{
    BoolType, CodecError, ConstructionError, Decoded, Encoding, StringType, Type,
};
