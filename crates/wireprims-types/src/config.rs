/// Limits applied while decoding strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StringConfig {
    /// Longest text, in bytes, a length-prefixed or null-terminated string may
    /// decode to. `None` means no limit.
    pub max_length: Option<usize>,
}

impl StringConfig {
    /// Config with a decode limit of `max_length` bytes.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }
}
