use core::num::ParseIntError;
use core::str::FromStr;
use std::io::{self, Read};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Invalid integer `{token}`: {source}")]
    BadInteger {
        token: String,
        source: ParseIntError,
    },
}

/// Pull-based reader of whitespace-separated integer tokens.
pub struct Scanner {
    text: String,
    pos: usize,
}

impl Scanner {
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text, pos: 0 })
    }

    fn token(&mut self) -> Option<&str> {
        let start = self.pos
            + self.text[self.pos..].find(|c: char| !c.is_ascii_whitespace())?;
        let end = self.text[start..]
            .find(|c: char| c.is_ascii_whitespace())
            .map_or(self.text.len(), |offset| start + offset);
        self.pos = end;
        Some(&self.text[start..end])
    }

    fn parse<T: FromStr<Err = ParseIntError>>(token: &str) -> Result<T, ScanError> {
        token.parse().map_err(|source| ScanError::BadInteger {
            token: token.to_owned(),
            source,
        })
    }

    pub fn next_i64(&mut self) -> Result<i64, ScanError> {
        Self::parse(self.token().ok_or(ScanError::UnexpectedEof)?)
    }

    pub fn next_usize(&mut self) -> Result<usize, ScanError> {
        Self::parse(self.token().ok_or(ScanError::UnexpectedEof)?)
    }

    /// Like `next_usize`, but end of input is `Ok(None)` rather than an error. Used at test-case
    /// boundaries, where running out of input is the normal way to stop.
    pub fn try_next_usize(&mut self) -> Result<Option<usize>, ScanError> {
        self.token().map(Self::parse).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_across_whitespace() {
        let mut scan = Scanner {
            text: "  3\n-1 \t 42\n".to_owned(),
            pos: 0,
        };
        assert_eq!(scan.next_usize().unwrap(), 3);
        assert_eq!(scan.next_i64().unwrap(), -1);
        assert_eq!(scan.try_next_usize().unwrap(), Some(42));
        assert_eq!(scan.try_next_usize().unwrap(), None);
    }

    #[test]
    fn eof_and_bad_tokens_are_distinct() {
        let mut scan = Scanner {
            text: "x".to_owned(),
            pos: 0,
        };
        assert!(matches!(scan.next_i64(), Err(ScanError::BadInteger { .. })));
        assert!(matches!(scan.next_i64(), Err(ScanError::UnexpectedEof)));
    }
}
