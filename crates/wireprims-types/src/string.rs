//! Text codecs with three framing strategies.
//!
//! ```text
//! Fixed(5)        │ h e l l o │
//! Prefixed(u8)    │ 0x02 │ a b │
//! NullTerminated  │ a b │ 0x00 │
//! ```

use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};
use wireprims_cursor::{ReadCursor, WriteCursor};

use crate::config::StringConfig;
use crate::contract::{Decoded, EncodingLength, LengthPrefix, Type};
use crate::encoding::Encoding;
use crate::error::{CodecError, ConstructionError, Result};
use crate::numeric::Primitive;

const NUL: u8 = 0;

/// Where a string ends.
#[derive(Debug, Clone)]
pub enum SizeSpec {
    /// Exactly this many bytes, no padding and no truncation.
    Fixed(usize),
    /// A length written by the delegate, then that many bytes.
    Prefixed(Arc<dyn LengthPrefix>),
    /// Bytes up to a single zero byte.
    NullTerminated,
}

impl SizeSpec {
    /// Length-prefixed framing using `delegate` for the prefix.
    pub fn prefixed(delegate: impl LengthPrefix + 'static) -> Self {
        SizeSpec::Prefixed(Arc::new(delegate))
    }
}

/// Parses the textual notation used in configuration: a decimal width, an
/// integer delegate name such as `u16le`, or `null` for a terminator.
impl FromStr for SizeSpec {
    type Err = ConstructionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let spec = s.trim();
        if matches!(spec, "null" | "nul" | "cstring") {
            return Ok(SizeSpec::NullTerminated);
        }
        if let Ok(width) = spec.parse::<usize>() {
            return Ok(SizeSpec::Fixed(width));
        }
        match Primitive::from_name(spec) {
            Some(primitive) => Ok(SizeSpec::prefixed(primitive)),
            None => Err(ConstructionError::UnknownSizeSpec(s.to_string())),
        }
    }
}

/// A string codec.
///
/// The framing strategy and encoding are fixed at construction.
#[derive(Debug, Clone)]
pub struct StringType {
    size: SizeSpec,
    encoding: Encoding,
    config: StringConfig,
}

impl StringType {
    pub fn new(size: SizeSpec, encoding: Encoding) -> Self {
        Self {
            size,
            encoding,
            config: StringConfig::default(),
        }
    }

    /// Strings of exactly `width` bytes.
    pub fn fixed(width: usize, encoding: Encoding) -> Self {
        Self::new(SizeSpec::Fixed(width), encoding)
    }

    /// Strings preceded by their byte length, written by `delegate`.
    pub fn prefixed(delegate: impl LengthPrefix + 'static, encoding: Encoding) -> Self {
        Self::new(SizeSpec::prefixed(delegate), encoding)
    }

    /// Strings followed by a zero byte.
    ///
    /// Text whose encoded form contains a zero byte cannot be framed this way and
    /// fails with [`CodecError::EmbeddedNul`]. With UTF-16LE that includes every ASCII
    /// character, since its high byte is zero.
    pub fn null_terminated(encoding: Encoding) -> Self {
        Self::new(SizeSpec::NullTerminated, encoding)
    }

    /// Build from the textual size notation and an encoding name.
    pub fn from_names(size: &str, encoding: &str) -> std::result::Result<Self, ConstructionError> {
        let encoding = Encoding::from_name(encoding)?;
        let size = size.parse::<SizeSpec>().inspect_err(|err| {
            debug!(error = %err, "rejected string size specification");
        })?;
        debug!(?size, %encoding, "built string type");
        Ok(Self::new(size, encoding))
    }

    /// Replace the decode limits.
    pub fn with_config(mut self, config: StringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn size_spec(&self) -> &SizeSpec {
        &self.size
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn config(&self) -> &StringConfig {
        &self.config
    }

    /// Encode borrowed text; see [`Type::encode`].
    pub fn encode_str(&self, text: &str, cursor: &mut WriteCursor) -> Result<usize> {
        let bytes = self.encoding.encode(text)?;
        match &self.size {
            SizeSpec::Fixed(width) => self.encode_fixed(*width, &bytes, cursor),
            SizeSpec::Prefixed(delegate) => self.encode_prefixed(delegate.as_ref(), &bytes, cursor),
            SizeSpec::NullTerminated => self.encode_null(&bytes, cursor),
        }
    }

    fn encode_fixed(&self, width: usize, bytes: &[u8], cursor: &mut WriteCursor) -> Result<usize> {
        if bytes.len() != width {
            debug!(expected = width, actual = bytes.len(), "fixed string size mismatch");
            return Err(CodecError::SizeMismatch {
                expected: width,
                actual: bytes.len(),
            });
        }
        cursor.write_buffer(bytes);
        trace!(bytes = width, encoding = %self.encoding, "encoded fixed string");
        Ok(width)
    }

    fn encode_prefixed(
        &self,
        delegate: &dyn LengthPrefix,
        bytes: &[u8],
        cursor: &mut WriteCursor,
    ) -> Result<usize> {
        cursor.rollback_on_error(|cursor| {
            let prefix = delegate.encode_length(bytes.len(), cursor)?;
            cursor.write_buffer(bytes);
            let total = prefix + bytes.len();
            trace!(bytes = total, prefix, encoding = %self.encoding, "encoded prefixed string");
            Ok(total)
        })
    }

    fn encode_null(&self, bytes: &[u8], cursor: &mut WriteCursor) -> Result<usize> {
        if let Some(offset) = bytes.iter().position(|&b| b == NUL) {
            return Err(CodecError::EmbeddedNul { offset });
        }
        cursor.write_buffer(bytes);
        cursor.write_u8(NUL);
        let total = bytes.len() + 1;
        trace!(bytes = total, encoding = %self.encoding, "encoded null-terminated string");
        Ok(total)
    }

    fn decode_fixed(&self, width: usize, cursor: &mut ReadCursor) -> Result<Decoded<String>> {
        cursor.rollback_on_error(|cursor| {
            let buf = cursor.read_buffer(width)?;
            let text = self.encoding.decode(&buf)?;
            trace!(bytes = width, encoding = %self.encoding, "decoded fixed string");
            Ok(Decoded::new(text, width))
        })
    }

    fn decode_prefixed(
        &self,
        delegate: &dyn LengthPrefix,
        cursor: &mut ReadCursor,
    ) -> Result<Decoded<String>> {
        cursor.rollback_on_error(|cursor| {
            let length = delegate.decode_length(cursor)?;
            self.check_limit(length.value)?;
            let buf = cursor.read_buffer(length.value)?;
            let text = self.encoding.decode(&buf)?;
            let total = length.bytes + buf.len();
            trace!(bytes = total, prefix = length.bytes, encoding = %self.encoding, "decoded prefixed string");
            Ok(Decoded::new(text, total))
        })
    }

    fn decode_null(&self, cursor: &mut ReadCursor) -> Result<Decoded<String>> {
        // Scan without consuming so a missing terminator leaves the cursor untouched.
        let Some(offset) = cursor.remaining().iter().position(|&b| b == NUL) else {
            let scanned = cursor.len();
            debug!(scanned, "unterminated string");
            return Err(CodecError::Unterminated { scanned });
        };
        self.check_limit(offset)?;

        cursor.rollback_on_error(|cursor| {
            let buf: Bytes = cursor.read_buffer(offset + 1)?;
            let text = self.encoding.decode(&buf[..offset])?;
            trace!(bytes = buf.len(), encoding = %self.encoding, "decoded null-terminated string");
            Ok(Decoded::new(text, buf.len()))
        })
    }

    fn check_limit(&self, length: usize) -> Result<()> {
        match self.config.max_length {
            Some(max) if length > max => {
                debug!(length, max, "string exceeds length limit");
                Err(CodecError::LengthLimit { length, max })
            }
            _ => Ok(()),
        }
    }
}

impl Type for StringType {
    type Value = String;

    fn encode(&self, value: &String, cursor: &mut WriteCursor) -> Result<usize> {
        self.encode_str(value, cursor)
    }

    fn decode(&self, cursor: &mut ReadCursor) -> Result<Decoded<String>> {
        match &self.size {
            SizeSpec::Fixed(width) => self.decode_fixed(*width, cursor),
            SizeSpec::Prefixed(delegate) => self.decode_prefixed(delegate.as_ref(), cursor),
            SizeSpec::NullTerminated => self.decode_null(cursor),
        }
    }

    fn encoding_length(&self) -> EncodingLength {
        match self.size {
            SizeSpec::Fixed(width) => EncodingLength::Fixed(width),
            _ => EncodingLength::Variable,
        }
    }

    fn encoded_len(&self, value: &String) -> Result<usize> {
        let length = self.encoding.byte_length(value)?;
        match &self.size {
            SizeSpec::Fixed(width) => Ok(*width),
            SizeSpec::Prefixed(delegate) => Ok(delegate.length_len(length)? + length),
            SizeSpec::NullTerminated => Ok(length + 1),
        }
    }
}
