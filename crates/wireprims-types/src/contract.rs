//! The contract every codec implements.
//!
//! A codec ("type") turns a value into bytes on a [`WriteCursor`] and back from a
//! [`ReadCursor`], and reports exactly how many bytes each call produced or
//! consumed. Codecs compose by wrapping: a boolean stores itself through an
//! integer codec, a string frames itself with a length codec.

use std::fmt;
use std::sync::Arc;

use wireprims_cursor::{ReadCursor, WriteCursor};

use crate::error::{CodecError, Result};
use crate::numeric::Primitive;

/// How many bytes a codec needs for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingLength {
    /// Every value occupies exactly this many bytes.
    Fixed(usize),
    /// The length depends on the value.
    Variable,
}

/// A decoded value together with the number of bytes consumed to produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<T> {
    /// The decoded value.
    pub value: T,
    /// Bytes consumed from the cursor.
    pub bytes: usize,
}

impl<T> Decoded<T> {
    pub fn new(value: T, bytes: usize) -> Self {
        Self { value, bytes }
    }

    /// Transform the value, keeping the byte count.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            bytes: self.bytes,
        }
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// A binary codec.
///
/// Implementations are immutable: the byte count of each call is returned from
/// the call itself, so one instance can serve many cursors concurrently.
pub trait Type {
    /// The domain value this codec reads and writes.
    type Value;

    /// Write `value` to `cursor`, returning the number of bytes written.
    fn encode(&self, value: &Self::Value, cursor: &mut WriteCursor) -> Result<usize>;

    /// Read a value from `cursor`, returning it with the number of bytes consumed.
    fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<Self::Value>>;

    /// Whether this codec's output has a constant size.
    fn encoding_length(&self) -> EncodingLength;

    /// Number of bytes `value` would occupy, for callers pre-sizing buffers.
    ///
    /// Variable-length codecs fall back to encoding into a scratch cursor.
    fn encoded_len(&self, value: &Self::Value) -> Result<usize> {
        match self.encoding_length() {
            EncodingLength::Fixed(n) => Ok(n),
            EncodingLength::Variable => self.encode(value, &mut WriteCursor::new()),
        }
    }
}

impl<T: Type + ?Sized> Type for &T {
    type Value = T::Value;

    fn encode(&self, value: &Self::Value, cursor: &mut WriteCursor) -> Result<usize> {
        (**self).encode(value, cursor)
    }

    fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<Self::Value>> {
        (**self).decode(cursor)
    }

    fn encoding_length(&self) -> EncodingLength {
        (**self).encoding_length()
    }

    fn encoded_len(&self, value: &Self::Value) -> Result<usize> {
        (**self).encoded_len(value)
    }
}

impl<T: Type + ?Sized> Type for Arc<T> {
    type Value = T::Value;

    fn encode(&self, value: &Self::Value, cursor: &mut WriteCursor) -> Result<usize> {
        (**self).encode(value, cursor)
    }

    fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<Self::Value>> {
        (**self).decode(cursor)
    }

    fn encoding_length(&self) -> EncodingLength {
        (**self).encoding_length()
    }

    fn encoded_len(&self, value: &Self::Value) -> Result<usize> {
        (**self).encoded_len(value)
    }
}

/// Returns true if `name` resolves to a codec that can serve as a delegate.
///
/// Codecs built from Rust values are checked by the [`Type`] bound at compile
/// time; this predicate covers codecs built from names in configuration.
pub fn is_type(name: &str) -> bool {
    Primitive::from_name(name).is_some()
}

/// Values that can be read as a two-state flag.
pub trait Truthy: PartialEq + fmt::Debug + Sized {
    /// Nonzero values are true.
    fn is_truthy(&self) -> bool;

    /// The canonical value for a flag: 1 for true, 0 for false.
    fn from_bool(flag: bool) -> Self;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }

    fn from_bool(flag: bool) -> Self {
        flag
    }
}

/// Values that can carry the length of a following field.
pub trait LengthValue: fmt::Debug + Sized {
    /// The value as a length, or `None` if it is not one (e.g. negative).
    fn to_length(&self) -> Option<usize>;

    /// The length as a value, or `None` if it does not fit.
    fn from_length(length: usize) -> Option<Self>;
}

macro_rules! impl_integer_values {
    ($($int:ty),* $(,)?) => {
        $(
            impl Truthy for $int {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }

                fn from_bool(flag: bool) -> Self {
                    <$int>::from(flag)
                }
            }

            impl LengthValue for $int {
                fn to_length(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }

                fn from_length(length: usize) -> Option<Self> {
                    <$int>::try_from(length).ok()
                }
            }
        )*
    };
}

impl_integer_values!(u8, i8, u16, i16, u32, i32, u64, i64, i128, usize);

/// Object-safe view of a codec used as a length prefix.
///
/// Every [`Type`] whose value is a [`LengthValue`] is a `LengthPrefix`, so string
/// codecs can hold any integer delegate behind one pointer type.
pub trait LengthPrefix: fmt::Debug + Send + Sync {
    /// Encode `length`, returning the bytes written.
    fn encode_length(&self, length: usize, cursor: &mut WriteCursor) -> Result<usize>;

    /// Decode a length, returning it with the bytes consumed.
    fn decode_length(&self, cursor: &mut ReadCursor) -> Result<Decoded<usize>>;

    /// Bytes needed to encode `length`.
    fn length_len(&self, length: usize) -> Result<usize>;
}

impl<T> LengthPrefix for T
where
    T: Type + fmt::Debug + Send + Sync,
    T::Value: LengthValue,
{
    fn encode_length(&self, length: usize, cursor: &mut WriteCursor) -> Result<usize> {
        let value = length_value(self, length)?;
        self.encode(&value, cursor)
    }

    fn decode_length(&self, cursor: &mut ReadCursor) -> Result<Decoded<usize>> {
        let decoded = self.decode(cursor)?;
        match decoded.value.to_length() {
            Some(length) => Ok(Decoded::new(length, decoded.bytes)),
            None => Err(CodecError::InvalidLengthPrefix {
                value: format!("{:?}", decoded.value),
            }),
        }
    }

    fn length_len(&self, length: usize) -> Result<usize> {
        let value = length_value(self, length)?;
        self.encoded_len(&value)
    }
}

fn length_value<T>(codec: &T, length: usize) -> Result<T::Value>
where
    T: Type + fmt::Debug,
    T::Value: LengthValue,
{
    <T::Value as LengthValue>::from_length(length).ok_or_else(|| CodecError::LengthOverflow {
        length,
        delegate: format!("{codec:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{I8, U16Be, U8};

    #[test]
    fn is_type_recognizes_delegate_names() {
        assert!(is_type("u8"));
        assert!(is_type("uint16be"));
        assert!(!is_type("undefined"));
        assert!(!is_type("string"));
    }

    #[test]
    fn truthiness_of_integers() {
        assert!(7u8.is_truthy());
        assert!((-1i32).is_truthy());
        assert!(!0u64.is_truthy());
        assert_eq!(u16::from_bool(true), 1);
        assert_eq!(i8::from_bool(false), 0);
    }

    #[test]
    fn length_values_reject_negative_and_overflow() {
        assert_eq!((-1i8).to_length(), None);
        assert_eq!(5i8.to_length(), Some(5));
        assert_eq!(u8::from_length(256), None);
        assert_eq!(u16::from_length(256), Some(256));
    }

    #[test]
    fn fixed_codecs_report_constant_length() {
        assert_eq!(U16Be.encoding_length(), EncodingLength::Fixed(2));
        assert_eq!(U16Be.encoded_len(&0xFFFF).unwrap(), 2);
    }

    #[test]
    fn length_prefix_roundtrip() {
        let prefix: &dyn LengthPrefix = &U16Be;
        let mut out = WriteCursor::new();
        assert_eq!(prefix.encode_length(300, &mut out).unwrap(), 2);
        assert_eq!(out.as_slice(), &[0x01, 0x2C]);

        let mut input = ReadCursor::new(out.freeze());
        let decoded = prefix.decode_length(&mut input).unwrap();
        assert_eq!(decoded, Decoded::new(300, 2));
    }

    #[test]
    fn length_prefix_overflow_writes_nothing() {
        let mut out = WriteCursor::new();
        let err = U8.encode_length(256, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::LengthOverflow { length: 256, .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn negative_length_prefix_is_rejected() {
        let mut input = ReadCursor::new(vec![0xFF]);
        let err = I8.decode_length(&mut input).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidLengthPrefix {
                value: "-1".into()
            }
        );
    }

    #[test]
    fn references_and_arcs_are_types() {
        fn width<T: Type>(codec: T) -> EncodingLength {
            codec.encoding_length()
        }
        assert_eq!(width(&U8), EncodingLength::Fixed(1));
        assert_eq!(width(Arc::new(U16Be)), EncodingLength::Fixed(2));
    }

    #[test]
    fn decoded_map_keeps_byte_count() {
        let decoded = Decoded::new(3u8, 1).map(|v| v == 3);
        assert_eq!(decoded, Decoded::new(true, 1));
        assert!(decoded.into_value());
    }
}
