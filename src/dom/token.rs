//! Tokens as produced by the FBX text and binary tokenizers.
//!
//! A token remembers where it came from: text tokens carry the raw source
//! text and a line number, binary tokens carry an FBX property type code,
//! the little-endian payload and the byte offset of the record. The
//! rendering methods (`parse_*`) convert a token to a concrete value the
//! same way for both sources.

use crate::util::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::fmt;

/// Source position of a token.
///
/// Binary tokens are located by byte offset, text tokens by line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenLocation {
    /// Byte offset into a binary file
    Offset(u64),
    /// 1-based line in a text file
    Line(u32),
}

impl fmt::Display for TokenLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(offset) => write!(f, "offset {}", offset),
            Self::Line(line) => write!(f, "line {}", line),
        }
    }
}

/// FBX binary property type codes.
pub mod binary_type {
    pub const BOOL: u8 = b'C';
    pub const INT16: u8 = b'Y';
    pub const INT32: u8 = b'I';
    pub const INT64: u8 = b'L';
    pub const FLOAT32: u8 = b'F';
    pub const FLOAT64: u8 = b'D';
    pub const STRING: u8 = b'S';
    pub const RAW: u8 = b'R';
}

/// A single token of a tokenized FBX document.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Token from an ASCII FBX file
    Text { text: String, line: u32 },
    /// Token from a binary FBX file
    Binary {
        code: u8,
        data: Vec<u8>,
        offset: u64,
    },
}

impl Token {
    /// Create a text token at the given line.
    pub fn text(text: impl Into<String>, line: u32) -> Self {
        Self::Text {
            text: text.into(),
            line,
        }
    }

    /// Create a quoted text token, the ASCII form of a string value.
    pub fn quoted(s: &str, line: u32) -> Self {
        Self::text(format!("\"{}\"", s), line)
    }

    /// Create a binary token from a type code and its payload.
    pub fn binary(code: u8, data: impl Into<Vec<u8>>, offset: u64) -> Self {
        Self::Binary {
            code,
            data: data.into(),
            offset,
        }
    }

    /// Binary string token.
    pub fn binary_string(s: &str, offset: u64) -> Self {
        Self::binary(binary_type::STRING, s.as_bytes(), offset)
    }

    /// Binary 32-bit integer token.
    pub fn binary_i32(v: i32, offset: u64) -> Self {
        Self::binary(binary_type::INT32, v.to_le_bytes(), offset)
    }

    /// Binary 64-bit integer token.
    pub fn binary_i64(v: i64, offset: u64) -> Self {
        Self::binary(binary_type::INT64, v.to_le_bytes(), offset)
    }

    /// Binary single precision float token.
    pub fn binary_f32(v: f32, offset: u64) -> Self {
        Self::binary(binary_type::FLOAT32, v.to_le_bytes(), offset)
    }

    /// Binary double precision float token.
    pub fn binary_f64(v: f64, offset: u64) -> Self {
        Self::binary(binary_type::FLOAT64, v.to_le_bytes(), offset)
    }

    /// True if the token was read from a binary file.
    #[inline]
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    /// Byte offset for binary tokens, line for text tokens.
    #[inline]
    pub fn location(&self) -> TokenLocation {
        match self {
            Self::Text { line, .. } => TokenLocation::Line(*line),
            Self::Binary { offset, .. } => TokenLocation::Offset(*offset),
        }
    }

    /// Render as a string.
    ///
    /// Text tokens must be double-quoted. Binary string payloads are
    /// returned as stored.
    pub fn parse_string(&self) -> Result<String> {
        match self {
            Self::Text { text, .. } => {
                let inner = text
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .ok_or_else(|| self.parse_error("string", "expected quoted string"))?;
                Ok(inner.to_string())
            }
            Self::Binary { code, data, .. } => {
                if *code != binary_type::STRING {
                    return Err(self.parse_error("string", "expected string type code S"));
                }
                utf8(data).ok_or_else(|| self.parse_error("string", "invalid UTF-8"))
            }
        }
    }

    /// Render as a 32-bit signed integer.
    pub fn parse_int(&self) -> Result<i32> {
        match self {
            Self::Text { text, .. } => text
                .trim()
                .parse::<i32>()
                .map_err(|e| self.parse_error("int", e.to_string())),
            Self::Binary { code, .. } => match *code {
                binary_type::INT32 => self.read_payload("int", |r| r.read_i32::<LittleEndian>()),
                binary_type::INT16 => {
                    self.read_payload("int", |r| r.read_i16::<LittleEndian>().map(i32::from))
                }
                binary_type::BOOL => self.read_payload("int", |r| r.read_u8().map(i32::from)),
                _ => Err(self.parse_error("int", "expected integer type code I, Y or C")),
            },
        }
    }

    /// Render as a 64-bit signed integer.
    pub fn parse_int64(&self) -> Result<i64> {
        match self {
            Self::Text { text, .. } => text
                .trim()
                .parse::<i64>()
                .map_err(|e| self.parse_error("int64", e.to_string())),
            Self::Binary { code, .. } => match *code {
                binary_type::INT64 => {
                    self.read_payload("int64", |r| r.read_i64::<LittleEndian>())
                }
                binary_type::INT32 => {
                    self.read_payload("int64", |r| r.read_i32::<LittleEndian>().map(i64::from))
                }
                _ => Err(self.parse_error("int64", "expected integer type code L or I")),
            },
        }
    }

    /// Render as a 64-bit unsigned object id.
    pub fn parse_id(&self) -> Result<u64> {
        match self {
            Self::Text { text, .. } => text
                .trim()
                .parse::<u64>()
                .map_err(|e| self.parse_error("id", e.to_string())),
            Self::Binary { code, .. } => match *code {
                // ids are stored as signed 64-bit, reinterpret the bits
                binary_type::INT64 => {
                    self.read_payload("id", |r| r.read_i64::<LittleEndian>().map(|v| v as u64))
                }
                _ => Err(self.parse_error("id", "expected type code L")),
            },
        }
    }

    /// Render as a single precision float.
    pub fn parse_float(&self) -> Result<f32> {
        match self {
            Self::Text { text, .. } => text
                .trim()
                .parse::<f32>()
                .map_err(|e| self.parse_error("float", e.to_string())),
            Self::Binary { code, .. } => match *code {
                binary_type::FLOAT32 => {
                    self.read_payload("float", |r| r.read_f32::<LittleEndian>())
                }
                binary_type::FLOAT64 => {
                    self.read_payload("float", |r| r.read_f64::<LittleEndian>().map(|v| v as f32))
                }
                _ => Err(self.parse_error("float", "expected float type code F or D")),
            },
        }
    }

    fn read_payload<T>(
        &self,
        expected: &'static str,
        read: impl FnOnce(&mut &[u8]) -> std::io::Result<T>,
    ) -> Result<T> {
        let Self::Binary { data, .. } = self else {
            return Err(self.parse_error(expected, "not a binary token"));
        };
        let mut reader = data.as_slice();
        read(&mut reader).map_err(|_| self.parse_error(expected, "truncated payload"))
    }

    fn parse_error(&self, expected: &'static str, reason: impl Into<String>) -> Error {
        Error::token_parse(expected, self.location(), reason)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { text, .. } => f.write_str(text),
            Self::Binary { code, data, .. } => {
                write!(f, "<{} {} bytes>", *code as char, data.len())
            }
        }
    }
}

fn utf8(bytes: &[u8]) -> Option<String> {
    std::str::from_utf8(bytes).ok().map(str::to_string)
}
