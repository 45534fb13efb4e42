use wireprims_cursor::CursorError;

use crate::encoding::Encoding;

/// Errors raised while building a codec. The codec is never produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// The named delegate does not resolve to a codec.
    #[error("invalid delegate type: {0:?}")]
    InvalidDelegate(String),

    /// The character encoding name is not recognized.
    #[error("unknown encoding: {0:?}")]
    UnknownEncoding(String),

    /// The size specification is not a width, a delegate name or the null marker.
    #[error("unknown size specification: {0:?}")]
    UnknownSizeSpec(String),
}

/// Errors that can occur during encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The cursor could not supply the requested bytes.
    #[error(transparent)]
    Cursor(#[from] CursorError),

    /// No terminator was found before the end of the cursor.
    #[error("unterminated string ({scanned} bytes scanned)")]
    Unterminated { scanned: usize },

    /// A fixed-width value does not have the configured width.
    #[error("size of string should be {expected} bytes (got {actual})")]
    SizeMismatch { expected: usize, actual: usize },

    /// A length delegate decoded a value that is not a valid length.
    #[error("length prefix is not a valid length: {value}")]
    InvalidLengthPrefix { value: String },

    /// A length does not fit in the delegate's value type.
    #[error("length {length} does not fit in delegate {delegate}")]
    LengthOverflow { length: usize, delegate: String },

    /// A decoded length exceeds the configured maximum.
    #[error("length too large ({length} bytes, max {max})")]
    LengthLimit { length: usize, max: usize },

    /// A strict boolean decoded something other than 0 or 1.
    #[error("invalid boolean value: {value}")]
    InvalidBoolean { value: String },

    /// An integer does not fit the selected primitive.
    #[error("value {value} out of range for {kind}")]
    ValueOutOfRange { value: i128, kind: &'static str },

    /// The text contains a character the encoding cannot represent.
    #[error("character {ch:?} cannot be represented in {encoding}")]
    Unrepresentable { encoding: Encoding, ch: char },

    /// Hex text with an odd number of digits does not describe whole bytes.
    #[error("hex text has an odd number of digits ({digits})")]
    OddHexLength { digits: usize },

    /// The bytes are not valid text in the encoding.
    #[error("invalid {encoding} text")]
    InvalidText { encoding: Encoding },

    /// A null-terminated value contains a zero byte.
    #[error("null-terminated string contains a zero byte at offset {offset}")]
    EmbeddedNul { offset: usize },
}

impl CodecError {
    /// Returns true for errors caused by reading past the end of the input.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            CodecError::Cursor(CursorError::OutOfBounds { .. }) | CodecError::Unterminated { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
