//! Shared scalar type tables used by both the runtime and the derive macro.
//!
//! This crate centralizes the answer to "is this member type a legal expression
//! operand?" so that compile-time descriptor generation (`exval-derive`) and
//! runtime evaluation (`exval`) never disagree.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Column types an eligible member can bind as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    IntPtr,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UIntPtr,
    Float32,
    Float64,
    Char,
    String,
}

impl ScalarType {
    /// Every scalar type, in declaration order.
    pub const ALL: [ScalarType; 15] = [
        ScalarType::Boolean,
        ScalarType::Int8,
        ScalarType::Int16,
        ScalarType::Int32,
        ScalarType::Int64,
        ScalarType::IntPtr,
        ScalarType::UInt8,
        ScalarType::UInt16,
        ScalarType::UInt32,
        ScalarType::UInt64,
        ScalarType::UIntPtr,
        ScalarType::Float32,
        ScalarType::Float64,
        ScalarType::Char,
        ScalarType::String,
    ];

    /// Canonical column type name.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::Int8 => "Int8",
            ScalarType::Int16 => "Int16",
            ScalarType::Int32 => "Int32",
            ScalarType::Int64 => "Int64",
            ScalarType::IntPtr => "IntPtr",
            ScalarType::UInt8 => "UInt8",
            ScalarType::UInt16 => "UInt16",
            ScalarType::UInt32 => "UInt32",
            ScalarType::UInt64 => "UInt64",
            ScalarType::UIntPtr => "UIntPtr",
            ScalarType::Float32 => "Float32",
            ScalarType::Float64 => "Float64",
            ScalarType::Char => "Char",
            ScalarType::String => "String",
        }
    }

    /// The Rust primitive this column type corresponds to.
    pub const fn rust_name(self) -> &'static str {
        match self {
            ScalarType::Boolean => "bool",
            ScalarType::Int8 => "i8",
            ScalarType::Int16 => "i16",
            ScalarType::Int32 => "i32",
            ScalarType::Int64 => "i64",
            ScalarType::IntPtr => "isize",
            ScalarType::UInt8 => "u8",
            ScalarType::UInt16 => "u16",
            ScalarType::UInt32 => "u32",
            ScalarType::UInt64 => "u64",
            ScalarType::UIntPtr => "usize",
            ScalarType::Float32 => "f32",
            ScalarType::Float64 => "f64",
            ScalarType::Char => "char",
            ScalarType::String => "String",
        }
    }

    pub const fn is_integer(self) -> bool {
        self.integer_range().is_some()
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ScalarType::Float32 | ScalarType::Float64)
    }

    /// Inclusive value range for integer column types.
    ///
    /// Pointer-sized integers use the 64-bit range regardless of target.
    pub const fn integer_range(self) -> Option<(i128, i128)> {
        match self {
            ScalarType::Int8 => Some((i8::MIN as i128, i8::MAX as i128)),
            ScalarType::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            ScalarType::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            ScalarType::Int64 | ScalarType::IntPtr => Some((i64::MIN as i128, i64::MAX as i128)),
            ScalarType::UInt8 => Some((0, u8::MAX as i128)),
            ScalarType::UInt16 => Some((0, u16::MAX as i128)),
            ScalarType::UInt32 => Some((0, u32::MAX as i128)),
            ScalarType::UInt64 | ScalarType::UIntPtr => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Resolve a Rust type name to the scalar column type it binds as.
///
/// Accepts the last path segment as written in source (`i32`, `String`) as
/// well as fully qualified string paths. 128-bit integers, references,
/// collections and every other type resolve to `None`.
pub fn resolve_scalar_type(name: &str) -> Option<ScalarType> {
    let canonical = canonicalize_path(name);
    ScalarType::ALL
        .into_iter()
        .find(|ty| ty.rust_name() == canonical)
}

/// Resolve a canonical column type name (`Int32`, `String`) case-insensitively.
pub fn resolve_column_type(name: &str) -> Option<ScalarType> {
    ScalarType::ALL
        .into_iter()
        .find(|ty| ty.name().eq_ignore_ascii_case(name))
}

fn canonicalize_path(name: &str) -> &str {
    let trimmed = name.trim();
    trimmed.rsplit("::").next().unwrap_or(trimmed).trim()
}
