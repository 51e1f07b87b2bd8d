//! Program sources: textual hex byte lists and raw binary files.

use std::path::Path;

use thiserror::Error;

/// Errors raised while reading a program.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),
    /// Token `index` (0-based) is not a 1–2 digit hex byte.
    #[error("token {index} ({token:?}) is not a hex byte")]
    InvalidToken { index: usize, token: String },
    #[error("program is empty")]
    Empty,
}

/// Parse whitespace-separated hex bytes, e.g. `"a9 02 0xEA 69 ff"`.
///
/// Each token is one or two hex digits with an optional `0x`/`0X` prefix.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, ProgramError> {
    let bytes = text
        .split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            parse_byte(token).ok_or_else(|| ProgramError::InvalidToken {
                index,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if bytes.is_empty() {
        return Err(ProgramError::Empty);
    }
    Ok(bytes)
}

fn parse_byte(token: &str) -> Option<u8> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || digits.len() > 2 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Read a raw binary program byte-for-byte.
pub fn read_binary(path: impl AsRef<Path>) -> Result<Vec<u8>, ProgramError> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(ProgramError::Empty);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_tokens() {
        assert_eq!(
            parse_hex("0xa9 0x02 ea 69 FF").unwrap(),
            vec![0xA9, 0x02, 0xEA, 0x69, 0xFF]
        );
        assert_eq!(parse_hex("  a\t0X0b\n").unwrap(), vec![0x0A, 0x0B]);
    }

    #[test]
    fn rejects_bad_tokens() {
        for (text, bad) in [("a9 zz", 1), ("100", 0), ("0x", 0), ("ea +1", 1)] {
            match parse_hex(text) {
                Err(ProgramError::InvalidToken { index, .. }) => assert_eq!(index, bad, "{text}"),
                other => panic!("{text}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(parse_hex("   "), Err(ProgramError::Empty)));
    }

    #[test]
    fn reads_binary_file() {
        let path = std::env::temp_dir().join(format!("mos6502-prog-{}.bin", std::process::id()));
        std::fs::write(&path, [0xA9, 0x02, 0x00]).unwrap();
        let bytes = read_binary(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(bytes, vec![0xA9, 0x02, 0x00]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_binary("/nonexistent/definitely/missing.bin").unwrap_err();
        assert!(matches!(err, ProgramError::Io(_)));
    }
}
