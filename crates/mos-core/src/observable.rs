//! Observability trait for inspecting component state.
//!
//! Queries never affect emulation state.

use std::fmt;

/// A dynamically-typed value for state queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 64-bit unsigned integer.
    U64(u64),
    /// String value.
    String(String),
}

impl Value {
    /// The value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The value widened to `u64`, if it is numeric.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(u64::from(*v)),
            Value::U16(v) => Some(u64::from(*v)),
            Value::U64(v) => Some(*v),
            Value::Bool(_) | Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v:#04X}"),
            Value::U16(v) => write!(f, "{v:#06X}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::U8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::U16(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::U64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// A component whose state can be inspected.
pub trait Observable {
    /// Query a specific property by path.
    ///
    /// Paths are hierarchical, separated by dots:
    /// - `pc` - Program counter
    /// - `a` - Accumulator
    /// - `flags.z` - Zero flag
    ///
    /// Returns `None` if the path is not recognised.
    fn query(&self, path: &str) -> Option<Value>;

    /// List the fixed query paths.
    ///
    /// Components may also accept parameterised paths (such as a memory
    /// address) that are not listed here.
    fn query_paths(&self) -> &'static [&'static str];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_hex_for_registers() {
        assert_eq!(Value::U8(0x0A).to_string(), "0x0A");
        assert_eq!(Value::U16(0x0200).to_string(), "0x0200");
        assert_eq!(Value::U64(161).to_string(), "161");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn numeric_values_widen() {
        assert_eq!(Value::U8(0xFF).as_u64(), Some(0xFF));
        assert_eq!(Value::U16(0x1234).as_u64(), Some(0x1234));
        assert_eq!(Value::from("x").as_u64(), None);
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::U8(1).as_bool(), None);
    }
}
