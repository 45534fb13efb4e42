//! Composable binary codec types.
//!
//! Every codec implements the [`Type`] contract: encode a value onto a
//! [`WriteCursor`](wireprims_cursor::WriteCursor), decode one from a
//! [`ReadCursor`](wireprims_cursor::ReadCursor), and report the bytes each call
//! touched. Codecs nest by taking other codecs as delegates:
//! - [`BoolType`] stores a flag through an integer codec
//! - [`StringType`] frames text by fixed width, a delegate length prefix, or a
//!   zero terminator
//!
//! No mutable per-call state lives on a codec, so one instance can be shared
//! freely between callers.

pub mod boolean;
pub mod config;
pub mod contract;
pub mod encoding;
pub mod error;
pub mod numeric;
pub mod string;

pub use boolean::{BoolMode, BoolType};
pub use config::StringConfig;
pub use contract::{is_type, Decoded, EncodingLength, LengthPrefix, LengthValue, Truthy, Type};
pub use encoding::Encoding;
pub use error::{CodecError, ConstructionError, Result};
pub use numeric::{
    Primitive, I16Be, I16Le, I32Be, I32Le, I64Be, I64Le, I8, U16Be, U16Le, U32Be, U32Le, U64Be,
    U64Le, U8,
};
pub use string::{SizeSpec, StringType};
