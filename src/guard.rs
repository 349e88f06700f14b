//! Input validation and sanitization.
//!
//! This is the only stage of the pipeline that can fail. Everything after it
//! is total and works on the bounded string returned by [`sanitize`].

use crate::error::{Error, Result};

/// Default cap on raw input length in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 10_000;

/// Default cap on the sanitized working string in bytes.
pub const DEFAULT_MAX_WORKING_LEN: usize = 500;

/// Validate raw input bytes against the length cap.
///
/// Checks run in a fixed order: empty, encoding, length, NUL bytes.
pub fn validate_bytes(input: &[u8], max_input_len: usize) -> Result<&str> {
    if input.is_empty() {
        return Err(Error::InputEmpty);
    }
    let text = std::str::from_utf8(input).map_err(|_| Error::InvalidEncoding)?;
    validate(text, max_input_len)?;
    Ok(text)
}

/// Validate a string against the length cap.
pub fn validate(input: &str, max_input_len: usize) -> Result<()> {
    if input.is_empty() {
        return Err(Error::InputEmpty);
    }
    if input.len() > max_input_len {
        return Err(Error::InputTooLong {
            len: input.len(),
            max: max_input_len,
        });
    }
    if input.contains('\0') {
        return Err(Error::InvalidCharacters);
    }
    Ok(())
}

/// Strip NUL bytes, collapse whitespace runs to single spaces, trim, and
/// truncate to `max_working_len` bytes.
///
/// Truncation never splits a character: it backs off to the closest char
/// boundary at or below the bound.
pub fn sanitize(input: &str, max_working_len: usize) -> String {
    let without_nul: String;
    let input = if input.contains('\0') {
        without_nul = input.replace('\0', "");
        without_nul.as_str()
    } else {
        input
    };

    let mut sanitized = input.split_whitespace().collect::<Vec<_>>().join(" ");

    if sanitized.len() > max_working_len {
        let mut end = max_working_len;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized.truncate(end);
        // A cut can leave a trailing space behind
        let trimmed_len = sanitized.trim_end().len();
        sanitized.truncate(trimmed_len);
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate() {
        assert_matches!(validate("", DEFAULT_MAX_INPUT_LEN), Err(Error::InputEmpty));
        assert_matches!(validate("123 Main St", DEFAULT_MAX_INPUT_LEN), Ok(()));
        assert_matches!(
            validate("123 Main\0St", DEFAULT_MAX_INPUT_LEN),
            Err(Error::InvalidCharacters)
        );
    }

    #[test]
    fn test_length_boundary() {
        let at_cap = "A".repeat(DEFAULT_MAX_INPUT_LEN);
        assert_matches!(validate(&at_cap, DEFAULT_MAX_INPUT_LEN), Ok(()));

        let over_cap = "A".repeat(DEFAULT_MAX_INPUT_LEN + 1);
        assert_matches!(
            validate(&over_cap, DEFAULT_MAX_INPUT_LEN),
            Err(Error::InputTooLong { len: 10_001, max: 10_000 })
        );
    }

    #[test]
    fn test_validate_bytes() {
        assert_matches!(
            validate_bytes(&[0xff, 0xfe, 0xfd], DEFAULT_MAX_INPUT_LEN),
            Err(Error::InvalidEncoding)
        );
        assert_matches!(validate_bytes(b"", DEFAULT_MAX_INPUT_LEN), Err(Error::InputEmpty));
        assert_matches!(
            validate_bytes(b"PO Box 1", DEFAULT_MAX_INPUT_LEN),
            Ok("PO Box 1")
        );
    }

    #[test]
    fn test_sanitize() {
        let cases = [
            ("123 Main St", "123 Main St"),
            ("123   Main    St   ", "123 Main St"),
            ("123\tMain\nSt", "123 Main St"),
            ("123 Main\0St", "123 MainSt"),
            ("  \r\n ", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(sanitize(input, DEFAULT_MAX_WORKING_LEN), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "A".repeat(DEFAULT_MAX_WORKING_LEN + 100);
        assert_eq!(
            sanitize(&long, DEFAULT_MAX_WORKING_LEN),
            "A".repeat(DEFAULT_MAX_WORKING_LEN)
        );
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        // 'é' is two bytes; a cut at 3 would land inside the second one
        let sanitized = sanitize("éé", 3);
        assert_eq!(sanitized, "é");
    }
}
