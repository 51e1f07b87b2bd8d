//! A small line assembler for the implemented instruction set.
//!
//! One statement per line. `;` starts a comment. `name:` defines a label,
//! optionally followed by an instruction on the same line.
//!
//! ```text
//!         LDA #$00        ; immediate
//! loop:   STA $FF         ; zero page
//!         INC $FF
//!         LDA $FF
//!         CMP #$0A
//!         BCC loop        ; relative, to a label
//! ```
//!
//! A branch may also take a raw displacement byte (`BCC $F6`). Mnemonics
//! and their modes come from the dispatch table.

use std::collections::HashMap;

use thiserror::Error;

use crate::addressing::AddressingMode;
use crate::opcodes;

/// An assembly failure on a 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: AsmErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmErrorKind {
    #[error("unknown mnemonic {0:?}")]
    UnknownMnemonic(String),
    #[error("{mnemonic} has no {mode} form")]
    UnsupportedMode {
        mnemonic: String,
        mode: AddressingMode,
    },
    #[error("malformed operand {0:?}")]
    BadOperand(String),
    #[error("invalid label {0:?}")]
    BadLabel(String),
    #[error("label {0:?} defined twice")]
    DuplicateLabel(String),
    #[error("undefined label {0:?}")]
    UndefinedLabel(String),
    #[error("branch to {label:?} is {distance} bytes away, outside -128..=127")]
    BranchOutOfRange { label: String, distance: i64 },
}

/// Operand syntax, before labels are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Arg {
    None,
    Immediate(u8),
    Byte(u8),
    Label(String),
}

#[derive(Debug)]
struct Statement {
    line: usize,
    offset: usize,
    opcode: u8,
    arg: Arg,
}

/// Assemble `source` into machine code. Branch displacements are relative,
/// so the output can be loaded at any origin.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut statements = Vec::new();
    let mut offset = 0usize;

    // Pass 1: sizes and label offsets.
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let err = |kind| AsmError { line, kind };

        let mut text = raw.split(';').next().unwrap_or("").trim();
        if let Some((label, rest)) = text.split_once(':') {
            let label = label.trim();
            if !is_identifier(label) {
                return Err(err(AsmErrorKind::BadLabel(label.to_string())));
            }
            if labels.insert(label.to_string(), offset).is_some() {
                return Err(err(AsmErrorKind::DuplicateLabel(label.to_string())));
            }
            text = rest.trim();
        }
        if text.is_empty() {
            continue;
        }

        let mut parts = text.split_whitespace();
        let mnemonic = parts.next().unwrap_or_default();
        let Some(arg) = parse_arg(parts.next()) else {
            return Err(err(AsmErrorKind::BadOperand(text.to_string())));
        };
        if let Some(extra) = parts.next() {
            return Err(err(AsmErrorKind::BadOperand(extra.to_string())));
        }

        let mode = mode_for(mnemonic, &arg).map_err(err)?;
        let Some(instruction) = opcodes::find(mnemonic, mode) else {
            return Err(err(AsmErrorKind::UnsupportedMode {
                mnemonic: mnemonic.to_ascii_uppercase(),
                mode,
            }));
        };

        statements.push(Statement {
            line,
            offset,
            opcode: instruction.opcode,
            arg,
        });
        offset += usize::from(instruction.size());
    }

    // Pass 2: encode.
    let mut out = Vec::with_capacity(offset);
    for statement in statements {
        out.push(statement.opcode);
        match statement.arg {
            Arg::None => {}
            Arg::Immediate(value) | Arg::Byte(value) => out.push(value),
            Arg::Label(label) => {
                let err = |kind| AsmError {
                    line: statement.line,
                    kind,
                };
                let Some(&target) = labels.get(&label) else {
                    return Err(err(AsmErrorKind::UndefinedLabel(label)));
                };
                // Displacement is from the byte after the operand.
                let distance = target as i64 - (statement.offset as i64 + 2);
                let Ok(displacement) = i8::try_from(distance) else {
                    return Err(err(AsmErrorKind::BranchOutOfRange { label, distance }));
                };
                out.push(displacement as u8);
            }
        }
    }
    Ok(out)
}

/// Parse an operand token. `None` means the token is malformed.
fn parse_arg(token: Option<&str>) -> Option<Arg> {
    let Some(token) = token else {
        return Some(Arg::None);
    };
    if let Some(hex) = token.strip_prefix("#$") {
        return parse_hex_byte(hex).map(Arg::Immediate);
    }
    if let Some(hex) = token.strip_prefix('$') {
        return parse_hex_byte(hex).map(Arg::Byte);
    }
    is_identifier(token).then(|| Arg::Label(token.to_string()))
}

fn parse_hex_byte(hex: &str) -> Option<u8> {
    if hex.is_empty() || hex.len() > 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(hex, 16).ok()
}

/// Pick the addressing mode the operand syntax implies for `mnemonic`.
fn mode_for(mnemonic: &str, arg: &Arg) -> Result<AddressingMode, AsmErrorKind> {
    let mut modes = opcodes::modes(mnemonic).peekable();
    if modes.peek().is_none() {
        return Err(AsmErrorKind::UnknownMnemonic(mnemonic.to_string()));
    }
    let is_branch = opcodes::modes(mnemonic).any(|m| m == AddressingMode::Relative);

    Ok(match arg {
        Arg::None => AddressingMode::Implied,
        Arg::Immediate(_) => AddressingMode::Immediate,
        Arg::Byte(_) if is_branch => AddressingMode::Relative,
        Arg::Byte(_) => AddressingMode::ZeroPage,
        Arg::Label(_) => AddressingMode::Relative,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
