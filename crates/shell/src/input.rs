//! Operator input: whitespace-separated tokens and integer parsing.

use std::collections::VecDeque;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt};

/// Sign, then hexadecimal (`0x1f`), octal (`017`, `0`) or decimal digits.
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?)(?:0[xX]([0-9a-fA-F]+)|0([0-7]*)|([1-9][0-9]*))$")
        .expect("failed to compile integer regex")
});

/// Why an operator token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("'{0}' is not an integer")]
    Malformed(String),
    #[error("'{token}' does not fit in {kind}")]
    OutOfRange { token: String, kind: &'static str },
}

/// Parse a token the way C's `%i` conversion reads integers.
pub fn parse_integer(token: &str) -> Result<i128, InputError> {
    let malformed = || InputError::Malformed(token.to_string());
    let caps = INTEGER_RE.captures(token.trim()).ok_or_else(malformed)?;

    let (digits, radix) = if let Some(hex) = caps.get(2) {
        (hex.as_str(), 16)
    } else if let Some(octal) = caps.get(3) {
        (octal.as_str(), 8)
    } else if let Some(decimal) = caps.get(4) {
        (decimal.as_str(), 10)
    } else {
        return Err(malformed());
    };

    let magnitude = if digits.is_empty() {
        0
    } else {
        i128::from_str_radix(digits, radix).map_err(|_| InputError::OutOfRange {
            token: token.to_string(),
            kind: "i128",
        })?
    };

    let negative = caps.get(1).map(|sign| sign.as_str() == "-").unwrap_or(false);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse a node payload.
pub fn parse_value(token: &str) -> Result<u32, InputError> {
    let number = parse_integer(token)?;
    u32::try_from(number).map_err(|_| InputError::OutOfRange {
        token: token.to_string(),
        kind: "u32",
    })
}

/// Parse a 1-based node position. Zero is accepted here; the list refuses it.
pub fn parse_position(token: &str) -> Result<u16, InputError> {
    let number = parse_integer(token)?;
    u16::try_from(number).map_err(|_| InputError::OutOfRange {
        token: token.to_string(),
        kind: "u16",
    })
}

/// Splits buffered input into whitespace-separated tokens, one line at a time.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: AsyncBufRead + Unpin> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` once the input is exhausted.
    pub async fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }

            // Raw bytes: undecodable input becomes a token the parsers reject.
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line).await? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_c_integer_notations() {
        assert_eq!(parse_integer("42"), Ok(42));
        assert_eq!(parse_integer("+7"), Ok(7));
        assert_eq!(parse_integer("-15"), Ok(-15));
        assert_eq!(parse_integer("0x1F"), Ok(31));
        assert_eq!(parse_integer("017"), Ok(15));
        assert_eq!(parse_integer("0"), Ok(0));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "abc", "12abc", "09", "0x", "--1", "1.5"] {
            assert!(
                matches!(parse_integer(token), Err(InputError::Malformed(_))),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn values_must_fit_u32() {
        assert_eq!(parse_value("4294967295"), Ok(u32::MAX));
        assert!(matches!(
            parse_value("4294967296"),
            Err(InputError::OutOfRange { kind: "u32", .. })
        ));
        assert!(matches!(
            parse_value("-1"),
            Err(InputError::OutOfRange { .. })
        ));
    }

    #[test]
    fn positions_must_fit_u16() {
        assert_eq!(parse_position("0"), Ok(0));
        assert_eq!(parse_position("65535"), Ok(u16::MAX));
        assert!(matches!(
            parse_position("65536"),
            Err(InputError::OutOfRange { kind: "u16", .. })
        ));
    }

    #[tokio::test]
    async fn tokens_span_lines_and_share_lines() -> io::Result<()> {
        let mut reader = TokenReader::new("3 99 2\n\n  4\t5\n".as_bytes());
        let mut tokens = Vec::new();
        while let Some(token) = reader.next_token().await? {
            tokens.push(token);
        }
        assert_eq!(tokens, ["3", "99", "2", "4", "5"]);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_utf8_yields_an_unparseable_token() -> io::Result<()> {
        let mut reader = TokenReader::new(&b"7 \xff\n2\n"[..]);
        assert_eq!(reader.next_token().await?.as_deref(), Some("7"));

        let garbled = reader.next_token().await?.unwrap_or_default();
        assert!(matches!(
            parse_value(&garbled),
            Err(InputError::Malformed(_))
        ));
        assert_eq!(reader.next_token().await?.as_deref(), Some("2"));
        assert_eq!(reader.next_token().await?, None);
        Ok(())
    }
}
