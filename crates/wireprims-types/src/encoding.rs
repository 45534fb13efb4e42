//! Character encodings used to turn text into bytes and back.

use std::fmt;
use std::str::FromStr;

use crate::error::{CodecError, ConstructionError, Result};

/// A character-to-byte mapping.
///
/// Names follow the Node.js `Buffer` vocabulary, so `"binary"` is an alias for
/// latin1 and `"ucs2"` is an alias for UTF-16LE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Encoding {
    /// 7-bit ASCII, one byte per character.
    #[default]
    Ascii,
    /// UTF-8.
    Utf8,
    /// UTF-16, little endian, no byte order mark.
    Utf16Le,
    /// ISO-8859-1, one byte per character up to U+00FF.
    Latin1,
    /// Hexadecimal digits, two characters per byte.
    Hex,
}

impl Encoding {
    /// Look up an encoding by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> std::result::Result<Self, ConstructionError> {
        match name.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Encoding::Ascii),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "hex" => Ok(Encoding::Hex),
            _ => Err(ConstructionError::UnknownEncoding(name.to_string())),
        }
    }

    /// Returns true if `name` is a recognized encoding name.
    pub fn is_encoding(name: &str) -> bool {
        Self::from_name(name).is_ok()
    }

    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Hex => "hex",
        }
    }

    /// Number of bytes `text` occupies in this encoding.
    pub fn byte_length(self, text: &str) -> Result<usize> {
        match self {
            Encoding::Utf8 => Ok(text.len()),
            Encoding::Utf16Le => Ok(text.encode_utf16().count() * 2),
            Encoding::Ascii | Encoding::Latin1 => {
                self.check_single_byte(text)?;
                Ok(text.chars().count())
            }
            Encoding::Hex => Ok(self.encode(text)?.len()),
        }
    }

    /// Convert `text` to bytes.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Ascii | Encoding::Latin1 => {
                self.check_single_byte(text)?;
                Ok(text.chars().map(|ch| ch as u8).collect())
            }
            Encoding::Hex => {
                // Decoding yields lowercase digits, so only lowercase text round-trips.
                if let Some(ch) = text
                    .chars()
                    .find(|ch| !matches!(ch, '0'..='9' | 'a'..='f'))
                {
                    return Err(CodecError::Unrepresentable { encoding: self, ch });
                }
                hex::decode(text).map_err(|err| match err {
                    hex::FromHexError::InvalidHexCharacter { c, .. } => {
                        CodecError::Unrepresentable {
                            encoding: self,
                            ch: c,
                        }
                    }
                    _ => CodecError::OddHexLength { digits: text.len() },
                })
            }
        }
    }

    /// Convert `bytes` back to text.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        let invalid = || CodecError::InvalidText { encoding: self };
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_owned)
                .map_err(|_| invalid()),
            Encoding::Ascii => {
                if !bytes.is_ascii() {
                    return Err(invalid());
                }
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
            Encoding::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err(invalid());
                }
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .collect::<std::result::Result<String, _>>()
                    .map_err(|_| invalid())
            }
            Encoding::Hex => Ok(hex::encode(bytes)),
        }
    }

    fn check_single_byte(self, text: &str) -> Result<()> {
        let limit = match self {
            Encoding::Ascii => 0x7F,
            _ => 0xFF,
        };
        match text.chars().find(|&ch| ch as u32 > limit) {
            Some(ch) => Err(CodecError::Unrepresentable { encoding: self, ch }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = ConstructionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl TryFrom<String> for Encoding {
    type Error = ConstructionError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<Encoding> for &'static str {
    fn from(encoding: Encoding) -> Self {
        encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_aliases() {
        assert_eq!(Encoding::from_name("ascii").unwrap(), Encoding::Ascii);
        assert_eq!(Encoding::from_name("UTF-8").unwrap(), Encoding::Utf8);
        assert_eq!(Encoding::from_name("ucs2").unwrap(), Encoding::Utf16Le);
        assert_eq!(Encoding::from_name("binary").unwrap(), Encoding::Latin1);
        assert_eq!("hex".parse::<Encoding>().unwrap(), Encoding::Hex);
        assert!(Encoding::is_encoding("latin1"));
        assert!(!Encoding::is_encoding("ebcdic"));
    }

    #[test]
    fn unknown_name_is_construction_error() {
        let err = Encoding::from_name("klingon").unwrap_err();
        assert_eq!(err, ConstructionError::UnknownEncoding("klingon".into()));
    }

    #[test]
    fn byte_lengths_differ_by_encoding() {
        assert_eq!(Encoding::Utf8.byte_length("héllo").unwrap(), 6);
        assert_eq!(Encoding::Latin1.byte_length("héllo").unwrap(), 5);
        assert_eq!(Encoding::Utf16Le.byte_length("héllo").unwrap(), 10);
        assert_eq!(Encoding::Hex.byte_length("cafe").unwrap(), 2);
    }

    #[test]
    fn ascii_rejects_non_ascii() {
        let err = Encoding::Ascii.encode("héllo").unwrap_err();
        assert_eq!(
            err,
            CodecError::Unrepresentable {
                encoding: Encoding::Ascii,
                ch: 'é'
            }
        );
        assert!(matches!(
            Encoding::Ascii.decode(&[0x68, 0xE9]),
            Err(CodecError::InvalidText { .. })
        ));
    }

    #[test]
    fn latin1_covers_high_bytes() {
        let bytes = Encoding::Latin1.encode("ÿé").unwrap();
        assert_eq!(bytes, vec![0xFF, 0xE9]);
        assert_eq!(Encoding::Latin1.decode(&bytes).unwrap(), "ÿé");
        assert!(Encoding::Latin1.encode("€").is_err());
    }

    #[test]
    fn utf16le_layout() {
        let bytes = Encoding::Utf16Le.encode("A€").unwrap();
        assert_eq!(bytes, vec![0x41, 0x00, 0xAC, 0x20]);
        assert_eq!(Encoding::Utf16Le.decode(&bytes).unwrap(), "A€");
        assert!(Encoding::Utf16Le.decode(&[0x41]).is_err());
    }

    #[test]
    fn hex_text_maps_to_raw_bytes() {
        assert_eq!(Encoding::Hex.encode("00ff").unwrap(), vec![0x00, 0xFF]);
        assert_eq!(Encoding::Hex.decode(&[0xCA, 0xFE]).unwrap(), "cafe");
        assert!(matches!(
            Encoding::Hex.encode("zz"),
            Err(CodecError::Unrepresentable { ch: 'z', .. })
        ));
        assert_eq!(
            Encoding::Hex.encode("abc").unwrap_err(),
            CodecError::OddHexLength { digits: 3 }
        );
    }

    #[test]
    fn hex_rejects_uppercase_digits() {
        assert_eq!(
            Encoding::Hex.encode("aB").unwrap_err(),
            CodecError::Unrepresentable {
                encoding: Encoding::Hex,
                ch: 'B'
            }
        );
        assert!(Encoding::Hex.byte_length("CAFE").is_err());
        let bytes = Encoding::Hex.encode("cafe").unwrap();
        assert_eq!(Encoding::Hex.decode(&bytes).unwrap(), "cafe");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert_eq!(
            Encoding::Utf8.decode(&[0xC3]).unwrap_err(),
            CodecError::InvalidText {
                encoding: Encoding::Utf8
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_names() {
        let json = serde_json::to_string(&Encoding::Utf16Le).unwrap();
        assert_eq!(json, "\"utf16le\"");
        let parsed: Encoding = serde_json::from_str("\"UTF-8\"").unwrap();
        assert_eq!(parsed, Encoding::Utf8);
        assert!(serde_json::from_str::<Encoding>("\"nope\"").is_err());
    }
}
