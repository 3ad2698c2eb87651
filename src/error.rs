// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io;

use thiserror::Error;

/// An error from an array operation.
///
/// Every failure is reported synchronously together with the offending
/// operand or value. Use [`ArrayError::kind`] to match on the category only.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// rank or bound incompatibility between operands
    #[error("shape mismatch in operand {operand}: {reason}")]
    ShapeMismatch { operand: usize, reason: String },
    /// coordinate or explicit index outside its bounds
    #[error("value {value} out of range [{lower}, {upper}]")]
    OutOfRange { value: i128, lower: i128, upper: i128 },
    /// a shared view would reach outside of its source
    #[error("mapping out of range: view reaches [{min}, {max}], source allows [{source_min}, {source_max}]")]
    MappingOutOfRange {
        min: i64,
        max: i64,
        source_min: i64,
        source_max: i64,
    },
    /// bit vector mask of the wrong length
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    /// malformed contents (nested list shape, bit string, encoded element)
    #[error("bad contents: {0}")]
    BadContents(String),
    /// end of stream in the middle of an element
    #[error("unexpected end of stream with {leftover} stray bytes")]
    UnexpectedEndOfStream { leftover: usize },
    /// value or operand of the wrong element kind
    #[error("wrong type: expected {expected}, found {found}")]
    WrongType { expected: String, found: String },
    /// failure reported by the underlying reader or writer
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Category of an [`ArrayError`].
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    ShapeMismatch,
    OutOfRange,
    MappingOutOfRange,
    LengthMismatch,
    BadContents,
    UnexpectedEndOfStream,
    WrongType,
    Io,
}

impl ArrayError {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            ArrayError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            ArrayError::OutOfRange { .. } => ErrorKind::OutOfRange,
            ArrayError::MappingOutOfRange { .. } => ErrorKind::MappingOutOfRange,
            ArrayError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            ArrayError::BadContents(_) => ErrorKind::BadContents,
            ArrayError::UnexpectedEndOfStream { .. } => ErrorKind::UnexpectedEndOfStream,
            ArrayError::WrongType { .. } => ErrorKind::WrongType,
            ArrayError::Io(_) => ErrorKind::Io,
        }
    }
}

pub(crate) fn shape_mismatch(operand: usize, reason: impl Into<String>) -> ArrayError {
    ArrayError::ShapeMismatch {
        operand,
        reason: reason.into(),
    }
}

pub(crate) fn out_of_range<V, L, U>(value: V, lower: L, upper: U) -> ArrayError
where
    V: Into<i128>,
    L: Into<i128>,
    U: Into<i128>,
{
    ArrayError::OutOfRange {
        value: value.into(),
        lower: lower.into(),
        upper: upper.into(),
    }
}

pub(crate) fn index_out_of_range(index: usize, len: usize) -> ArrayError {
    ArrayError::OutOfRange {
        value: index as i128,
        lower: 0,
        upper: len as i128 - 1,
    }
}

pub(crate) fn wrong_type(expected: impl ToString, found: impl ToString) -> ArrayError {
    ArrayError::WrongType {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
