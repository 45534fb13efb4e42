use tracing::debug;
use wireprims_cursor::{ReadCursor, WriteCursor};

use crate::contract::{is_type, Decoded, EncodingLength, Truthy, Type};
use crate::error::{CodecError, ConstructionError, Result};
use crate::numeric::Primitive;

/// How a boolean treats delegate values other than 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoolMode {
    /// Any nonzero value decodes to `true`.
    #[default]
    Permissive,
    /// Only 0 and 1 decode; anything else is an error.
    Strict,
}

/// A two-state value stored through another codec.
///
/// Encoding always writes the delegate's 0 or 1. Decoding is permissive by
/// default, so a delegate with more than two states does not round-trip: only
/// 0 and 1 are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolType<T> {
    delegate: T,
    mode: BoolMode,
}

impl<T> BoolType<T>
where
    T: Type,
    T::Value: Truthy,
{
    /// Create a permissive boolean over `delegate`.
    pub fn new(delegate: T) -> Self {
        Self::with_mode(delegate, BoolMode::Permissive)
    }

    /// Create a boolean that rejects delegate values other than 0 and 1.
    pub fn strict(delegate: T) -> Self {
        Self::with_mode(delegate, BoolMode::Strict)
    }

    pub fn with_mode(delegate: T, mode: BoolMode) -> Self {
        Self { delegate, mode }
    }

    pub fn delegate(&self) -> &T {
        &self.delegate
    }

    pub fn mode(&self) -> BoolMode {
        self.mode
    }
}

impl BoolType<Primitive> {
    /// Create a permissive boolean over the integer codec named `delegate`.
    pub fn from_name(delegate: &str) -> std::result::Result<Self, ConstructionError> {
        if !is_type(delegate) {
            debug!(delegate, "rejected boolean delegate");
            return Err(ConstructionError::InvalidDelegate(delegate.to_string()));
        }
        let primitive: Primitive = delegate.parse()?;
        Ok(Self::new(primitive))
    }
}

impl<T> Type for BoolType<T>
where
    T: Type,
    T::Value: Truthy,
{
    type Value = bool;

    fn encode(&self, value: &bool, cursor: &mut WriteCursor) -> Result<usize> {
        self.delegate.encode(&<T::Value as Truthy>::from_bool(*value), cursor)
    }

    fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<bool>> {
        let mode = self.mode;
        cursor.rollback_on_error(|cursor| {
            let decoded = self.delegate.decode(cursor)?;
            let flag = decoded.value.is_truthy();
            if mode == BoolMode::Strict && decoded.value != <T::Value as Truthy>::from_bool(flag) {
                return Err(CodecError::InvalidBoolean {
                    value: format!("{:?}", decoded.value),
                });
            }
            Ok(Decoded::new(flag, decoded.bytes))
        })
    }

    fn encoding_length(&self) -> EncodingLength {
        self.delegate.encoding_length()
    }

    fn encoded_len(&self, value: &bool) -> Result<usize> {
        self.delegate.encoded_len(&<T::Value as Truthy>::from_bool(*value))
    }
}
