//! Bounded text payload of a [Message](super::Message).
use std::fmt;
use std::str::Utf8Error;

/// Size of the text payload in bytes.
pub const PAYLOAD_LEN: usize = 32;

/// Fixed-size text buffer.
///
/// The text ends at the first NUL byte. A payload filling all [PAYLOAD_LEN] bytes
/// carries no terminator at all, so readers must never rely on one.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextPayload([u8; PAYLOAD_LEN]);

impl TextPayload {
    /// Builds a payload from `text`, dropping whatever does not fit.
    ///
    /// The cut always lands on a character boundary so the kept prefix stays valid UTF-8.
    pub fn truncated(text: &str) -> Self {
        let mut end = text.len().min(PAYLOAD_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut inner = [0u8; PAYLOAD_LEN];
        inner[..end].copy_from_slice(&text.as_bytes()[..end]);
        TextPayload(inner)
    }

    /// Wraps a raw buffer as received from the wire.
    pub fn from_raw(raw: [u8; PAYLOAD_LEN]) -> Self {
        TextPayload(raw)
    }

    /// Full underlying buffer, including the bytes after the terminator.
    pub fn raw(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Text bytes, up to the first NUL or the whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..self.len()]
    }

    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(self.as_bytes()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.0.iter().position(|b| *b == 0).unwrap_or(PAYLOAD_LEN)
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    pub fn clear(&mut self) {
        self.0 = [0u8; PAYLOAD_LEN];
    }
}

impl Default for TextPayload {
    fn default() -> Self {
        TextPayload([0u8; PAYLOAD_LEN])
    }
}

impl TryFrom<&[u8]> for TextPayload {
    type Error = PayloadError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() > PAYLOAD_LEN {
            return Err(PayloadError::TooLong {
                len: bytes.len(),
                max: PAYLOAD_LEN,
            });
        }
        let mut inner = [0u8; PAYLOAD_LEN];
        inner[..bytes.len()].copy_from_slice(bytes);
        Ok(TextPayload(inner))
    }
}

impl TryFrom<&str> for TextPayload {
    type Error = PayloadError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        TextPayload::try_from(text.as_bytes())
    }
}

impl fmt::Display for TextPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.as_bytes()))
    }
}

impl fmt::Debug for TextPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextPayload({:?})", String::from_utf8_lossy(self.as_bytes()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Text payload is too long (is: {}B, max: {}B)!", .len, .max)]
    TooLong { len: usize, max: usize },
}
