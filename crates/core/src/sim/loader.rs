//! Address trace loading.
//!
//! This module turns text into the address sequence fed to the engine. It performs:
//! 1. **Parsing:** Comma- and/or whitespace-separated non-negative integers.
//! 2. **Validation:** Negative, non-integral, empty and oversized tokens are rejected
//!    with their position, before any simulation step runs.
//! 3. **File loading:** Reads a trace file from disk and parses it the same way.

use std::fs;
use std::num::IntErrorKind;
use std::path::Path;

use crate::common::error::{InputError, LoadError};

/// Built-in demo trace, used when no sequence is supplied.
pub const DEFAULT_SEQUENCE: [u64; 12] = [1, 2, 3, 2, 4, 1, 5, 6, 2, 1, 7, 8];

/// Parses an address sequence such as `"1, 2, 3"` or `"1 2\n3"`.
///
/// Commas separate fields; whitespace inside a field separates further
/// addresses. A field containing only whitespace (as in `1,,2` or a trailing
/// comma) is rejected.
///
/// # Errors
///
/// Returns an [`InputError`] naming the offending token and its 0-based
/// position. Empty input is rejected with [`InputError::Empty`].
///
/// # Examples
///
/// ```
/// use cachesim_core::sim::loader::parse_sequence;
///
/// assert_eq!(parse_sequence("1, 2,3").unwrap(), vec![1, 2, 3]);
/// assert!(parse_sequence("1, -2").is_err());
/// ```
pub fn parse_sequence(text: &str) -> Result<Vec<u64>, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let mut sequence = Vec::new();
    for field in text.split(',') {
        let position = sequence.len();
        let mut tokens = field.split_whitespace().peekable();
        if tokens.peek().is_none() {
            return Err(InputError::MissingToken { position });
        }
        for token in tokens {
            let position = sequence.len();
            sequence.push(parse_address(token, position)?);
        }
    }
    Ok(sequence)
}

/// Parses one token as a non-negative 64-bit address.
fn parse_address(token: &str, position: usize) -> Result<u64, InputError> {
    token.parse::<u64>().map_err(|e| {
        let token = token.to_string();
        let negative = token
            .strip_prefix('-')
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
        if negative {
            InputError::Negative { token, position }
        } else if matches!(e.kind(), IntErrorKind::PosOverflow) {
            InputError::Overflow { token, position }
        } else {
            InputError::Malformed { token, position }
        }
    })
}

/// Reads a trace file and parses its contents with [`parse_sequence`].
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Input`] if its contents are malformed.
pub fn load_sequence(path: impl AsRef<Path>) -> Result<Vec<u64>, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_sequence(&text)?)
}
