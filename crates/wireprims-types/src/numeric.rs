//! Fixed-size integer codecs, mostly used as delegates by other types.

use std::fmt;
use std::mem::size_of;
use std::str::FromStr;

use wireprims_cursor::{ReadCursor, WriteCursor};

use crate::contract::{Decoded, EncodingLength, Type};
use crate::error::{CodecError, ConstructionError, Result};

macro_rules! int_type {
    ($(#[$meta:meta])* $name:ident, $int:ty, $to:ident, $from:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Type for $name {
            type Value = $int;

            fn encode(&self, value: &$int, cursor: &mut WriteCursor) -> Result<usize> {
                cursor.write_buffer(&value.$to());
                Ok(size_of::<$int>())
            }

            fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<$int>> {
                let raw = cursor.read_array::<{ size_of::<$int>() }>()?;
                Ok(Decoded::new(<$int>::$from(raw), size_of::<$int>()))
            }

            fn encoding_length(&self) -> EncodingLength {
                EncodingLength::Fixed(size_of::<$int>())
            }
        }
    };
}

int_type!(
    /// Unsigned 8-bit integer.
    U8, u8, to_le_bytes, from_le_bytes
);
int_type!(
    /// Signed 8-bit integer.
    I8, i8, to_le_bytes, from_le_bytes
);
int_type!(
    /// Unsigned 16-bit integer, little endian.
    U16Le, u16, to_le_bytes, from_le_bytes
);
int_type!(
    /// Unsigned 16-bit integer, big endian.
    U16Be, u16, to_be_bytes, from_be_bytes
);
int_type!(I16Le, i16, to_le_bytes, from_le_bytes);
int_type!(I16Be, i16, to_be_bytes, from_be_bytes);
int_type!(U32Le, u32, to_le_bytes, from_le_bytes);
int_type!(U32Be, u32, to_be_bytes, from_be_bytes);
int_type!(I32Le, i32, to_le_bytes, from_le_bytes);
int_type!(I32Be, i32, to_be_bytes, from_be_bytes);
int_type!(U64Le, u64, to_le_bytes, from_le_bytes);
int_type!(U64Be, u64, to_be_bytes, from_be_bytes);
int_type!(I64Le, i64, to_le_bytes, from_le_bytes);
int_type!(I64Be, i64, to_be_bytes, from_be_bytes);

macro_rules! primitives {
    ($($variant:ident => $name:literal | $alias:literal,)*) => {
        /// An integer codec selected at runtime, e.g. from a configuration name.
        ///
        /// Values are carried as `i128` so every supported width fits; encoding a
        /// value outside the selected width's range fails.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Primitive {
            $($variant,)*
        }

        impl Primitive {
            /// Look up a primitive by name (`u16le`, `uint16le`, ...), ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<Self> {
                match name.to_ascii_lowercase().as_str() {
                    $($name | $alias => Some(Primitive::$variant),)*
                    _ => None,
                }
            }

            /// Canonical name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Primitive::$variant => $name,)*
                }
            }
        }

        impl Type for Primitive {
            type Value = i128;

            fn encode(&self, value: &i128, cursor: &mut WriteCursor) -> Result<usize> {
                match self {
                    $(Primitive::$variant => {
                        let narrowed = self.narrow::<<$variant as Type>::Value>(*value)?;
                        $variant.encode(&narrowed, cursor)
                    })*
                }
            }

            fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<i128>> {
                match self {
                    $(Primitive::$variant => Ok($variant.decode(cursor)?.map(i128::from)),)*
                }
            }

            fn encoding_length(&self) -> EncodingLength {
                match self {
                    $(Primitive::$variant => $variant.encoding_length(),)*
                }
            }
        }
    };
}

primitives! {
    U8 => "u8" | "uint8",
    I8 => "i8" | "int8",
    U16Le => "u16le" | "uint16le",
    U16Be => "u16be" | "uint16be",
    I16Le => "i16le" | "int16le",
    I16Be => "i16be" | "int16be",
    U32Le => "u32le" | "uint32le",
    U32Be => "u32be" | "uint32be",
    I32Le => "i32le" | "int32le",
    I32Be => "i32be" | "int32be",
    U64Le => "u64le" | "uint64le",
    U64Be => "u64be" | "uint64be",
    I64Le => "i64le" | "int64le",
    I64Be => "i64be" | "int64be",
}

impl Primitive {
    fn narrow<T: TryFrom<i128>>(self, value: i128) -> Result<T> {
        T::try_from(value).map_err(|_| CodecError::ValueOutOfRange {
            value,
            kind: self.name(),
        })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Primitive {
    type Err = ConstructionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ConstructionError::InvalidDelegate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_with<T: Type>(codec: T, value: T::Value) -> Vec<u8> {
        let mut out = WriteCursor::new();
        let written = codec.encode(&value, &mut out).unwrap();
        assert_eq!(written, out.len());
        out.as_slice().to_vec()
    }

    #[test]
    fn endianness() {
        assert_eq!(encode_with(U16Le, 0x0102), vec![0x02, 0x01]);
        assert_eq!(encode_with(U16Be, 0x0102), vec![0x01, 0x02]);
        assert_eq!(encode_with(I32Be, -2), vec![0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(encode_with(U64Le, 1), vec![1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn decode_reports_width() {
        let mut cursor = ReadCursor::new(vec![0x00, 0x00, 0x01, 0x00, 0xAA]);
        let decoded = U32Be.decode(&mut cursor).unwrap();
        assert_eq!(decoded, Decoded::new(256, 4));
        assert_eq!(cursor.len(), 1);
    }

    #[test]
    fn short_input_is_out_of_bounds() {
        let mut cursor = ReadCursor::new(vec![0x01]);
        let err = U16Le.decode(&mut cursor).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn primitive_names() {
        assert_eq!(Primitive::from_name("u8"), Some(Primitive::U8));
        assert_eq!(Primitive::from_name("UInt32BE"), Some(Primitive::U32Be));
        assert_eq!(Primitive::from_name("float"), None);
        assert_eq!("i64le".parse::<Primitive>().unwrap(), Primitive::I64Le);
        assert_eq!(
            "string".parse::<Primitive>().unwrap_err(),
            ConstructionError::InvalidDelegate("string".into())
        );
        assert_eq!(Primitive::I16Be.to_string(), "i16be");
    }

    #[test]
    fn primitive_matches_static_codec() {
        assert_eq!(encode_with(Primitive::U16Be, 0x0102), vec![0x01, 0x02]);
        assert_eq!(encode_with(Primitive::I8, -1), vec![0xFF]);
        assert_eq!(Primitive::U64Be.encoding_length(), EncodingLength::Fixed(8));

        let mut cursor = ReadCursor::new(vec![0xFF; 8]);
        let decoded = Primitive::U64Le.decode(&mut cursor).unwrap();
        assert_eq!(decoded.value, i128::from(u64::MAX));
        assert_eq!(decoded.bytes, 8);
    }

    #[test]
    fn primitive_rejects_out_of_range() {
        let mut out = WriteCursor::new();
        let err = Primitive::U8.encode(&256, &mut out).unwrap_err();
        assert_eq!(
            err,
            CodecError::ValueOutOfRange {
                value: 256,
                kind: "u8"
            }
        );
        assert!(Primitive::U8.encode(&-1, &mut out).is_err());
        assert!(out.is_empty());
    }
}
