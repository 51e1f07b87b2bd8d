//! Resolve the `PROGRAM` argument into machine code.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use mos_6502::{asm, program};

/// Where the program bytes came from, for the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Binary,
    Assembly,
    Hex,
}

/// An existing file is read as a raw binary, or as assembly source with
/// `assembly` set. Anything else is parsed as a hex byte list.
pub fn load(arg: &str, assembly: bool) -> Result<(Vec<u8>, Source)> {
    let path = Path::new(arg);
    if path.is_file() {
        if assembly {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let bytes =
                asm::assemble(&source).with_context(|| format!("assembling {}", path.display()))?;
            return Ok((bytes, Source::Assembly));
        }
        let bytes = program::read_binary(path)
            .with_context(|| format!("loading {}", path.display()))?;
        return Ok((bytes, Source::Binary));
    }

    if assembly {
        anyhow::bail!("assembly source {arg:?} not found");
    }
    let bytes = program::parse_hex(arg)
        .with_context(|| format!("{arg:?} is neither a file nor a hex byte list"))?;
    Ok((bytes, Source::Hex))
}

/// Parse a hex address such as `0200`, `$0200` or `0x0200`.
pub fn parse_address(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix('$')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address {text:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_argument_when_no_file() {
        let (bytes, source) = load("a9 02 ea", false).unwrap();
        assert_eq!(bytes, vec![0xA9, 0x02, 0xEA]);
        assert_eq!(source, Source::Hex);
    }

    #[test]
    fn bad_hex_argument_is_reported() {
        let err = load("zz", false).unwrap_err();
        assert!(format!("{err:#}").contains("neither a file nor a hex byte list"));
    }

    #[test]
    fn assembly_file() {
        let path = std::env::temp_dir().join(format!("mos-run-{}.s", std::process::id()));
        fs::write(&path, "LDA #$02\nBRK\n").unwrap();
        let loaded = load(path.to_str().unwrap(), true);
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), (vec![0xA9, 0x02, 0x00], Source::Assembly));
    }

    #[test]
    fn missing_assembly_file() {
        assert!(load("/nonexistent/prog.s", true).is_err());
    }

    #[test]
    fn addresses() {
        assert_eq!(parse_address("0200"), Ok(0x0200));
        assert_eq!(parse_address("$C000"), Ok(0xC000));
        assert_eq!(parse_address("0xff"), Ok(0x00FF));
        assert!(parse_address("10000").is_err());
        assert!(parse_address("").is_err());
    }
}
