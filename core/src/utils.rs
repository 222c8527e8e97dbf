//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a sensitive value for `Debug` output.
///
/// - Strings shorter than 12 characters are entirely redacted.
/// - Longer strings keep only the first and last three characters, so users
///   can still tell different values apart.
/// - Raw key bytes never show any content, only their length.
pub enum Redact<'a> {
    /// A textual value such as an account id.
    Str(&'a str),
    /// A decoded secret key.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::Str(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::Str(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Redact<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Redact::Bytes(value.as_slice())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Redact::Str(s) => {
                let length = s.len();
                if length == 0 {
                    f.write_str("EMPTY")
                } else if length < 12 || !s.is_char_boundary(3) || !s.is_char_boundary(length - 3)
                {
                    f.write_str("***")
                } else {
                    f.write_str(&s[..3])?;
                    f.write_str("***")?;
                    f.write_str(&s[length - 3..])
                }
            }
            Redact::Bytes(bs) if bs.is_empty() => f.write_str("EMPTY"),
            Redact::Bytes(bs) => write!(f, "*** ({} bytes)", bs.len()),
        }
    }
}
