// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::error::{out_of_range, ArrayError};

/// One axis of a view: inclusive bounds and the signed storage step
/// between consecutive coordinates.
///
/// An axis with `upper < lower` is empty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dim {
    pub lower: i64,
    pub upper: i64,
    pub stride: i64,
}

impl Dim {
    #[inline]
    pub fn new(lower: i64, upper: i64, stride: i64) -> Dim {
        Dim { lower, upper, stride }
    }

    /// `upper - lower + 1`, which is zero or negative for an empty axis.
    #[inline]
    pub fn extent(&self) -> i64 {
        self.upper - self.lower + 1
    }

    /// Number of coordinates along the axis.
    #[inline]
    pub fn len(&self) -> usize {
        if self.upper < self.lower {
            0
        } else {
            (self.upper - self.lower + 1) as usize
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.upper < self.lower
    }

    #[inline]
    pub fn contains(&self, coord: i64) -> bool {
        self.lower <= coord && coord <= self.upper
    }

    /// Whether the bounds of `other` lie within the bounds of `self`.
    #[inline]
    pub fn covers(&self, other: &Dim) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }

    #[inline]
    pub fn bounds(&self) -> (i64, i64) {
        (self.lower, self.upper)
    }
}

/// A requested axis: a length with lower bound 0, or explicit inclusive
/// bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DimSpec {
    Len(usize),
    Bounds(i64, i64),
}

impl DimSpec {
    /// The inclusive `(lower, upper)` bounds.
    ///
    /// `Bounds(l, u)` with `u < l - 1` is an `OutOfRange` error; `u == l - 1`
    /// is an empty axis. A length past `i64::MAX` and a lower bound of
    /// `i64::MIN` are `OutOfRange` errors as well.
    pub fn bounds(&self) -> Result<(i64, i64), ArrayError> {
        match *self {
            DimSpec::Len(n) => match i64::try_from(n) {
                Ok(n) => Ok((0, n - 1)),
                Err(_) => Err(out_of_range(n as u64, 0u64, i64::MAX as u64)),
            },
            DimSpec::Bounds(l, u) => match l.checked_sub(1) {
                Some(empty) if u >= empty => Ok((l, u)),
                Some(empty) => Err(out_of_range(u, empty, i64::MAX)),
                None => Err(out_of_range(l, i64::MIN + 1, i64::MAX)),
            },
        }
    }
}

impl From<usize> for DimSpec {
    fn from(n: usize) -> DimSpec {
        DimSpec::Len(n)
    }
}

impl From<(i64, i64)> for DimSpec {
    fn from((l, u): (i64, i64)) -> DimSpec {
        DimSpec::Bounds(l, u)
    }
}

impl From<Dim> for DimSpec {
    fn from(d: Dim) -> DimSpec {
        if d.lower == 0 {
            DimSpec::Len(d.len())
        } else {
            DimSpec::Bounds(d.lower, d.upper)
        }
    }
}

/// Build axes from specs with row-major strides.
pub fn dims_from_specs(specs: &[DimSpec]) -> Result<Vec<Dim>, ArrayError> {
    let mut dims = specs
        .iter()
        .map(|s| s.bounds().map(|(l, u)| Dim::new(l, u, 0)))
        .collect::<Result<Vec<_>, _>>()?;
    fill_default_strides(&mut dims);
    Ok(dims)
}

/// Set row-major strides: the last axis has stride 1 and every other axis
/// steps over the whole block of the axes after it.
pub fn fill_default_strides(dims: &mut [Dim]) {
    let mut inc = 1;
    for d in dims.iter_mut().rev() {
        d.stride = inc;
        inc *= d.len() as i64;
    }
}

/// Number of elements of a view with axes `dims`.
pub fn size_of_dims(dims: &[Dim]) -> usize {
    dims.iter().map(Dim::len).product()
}

/// Whether `dims` describe a dense row-major block.
///
/// Scanning from the last axis, each stride must equal the previous axis's
/// stride times its extent. The innermost stride itself may be anything.
pub fn is_contiguous(dims: &[Dim]) -> bool {
    let mut inc = match dims.last() {
        Some(d) => d.stride,
        None => return true,
    };
    for d in dims.iter().rev() {
        if d.stride != inc {
            return false;
        }
        inc *= d.extent();
    }
    true
}

/// Lowest and highest storage index reachable through `base` and `dims`,
/// or `None` if some axis is empty.
pub fn reachable_range(base: i64, dims: &[Dim]) -> Option<(i64, i64)> {
    if dims.iter().any(Dim::is_empty) {
        return None;
    }
    let mut min = base;
    let mut max = base;
    for d in dims {
        let span = (d.upper - d.lower) * d.stride;
        if span > 0 {
            max += span;
        } else {
            min += span;
        }
    }
    Some((min, max))
}

/// Storage offset of `coords` relative to the corner of `dims`, without
/// bounds checks.
#[inline]
pub fn stride_offset(dims: &[Dim], coords: &[i64]) -> i64 {
    dims.iter()
        .zip(coords)
        .map(|(d, &c)| (c - d.lower) * d.stride)
        .sum()
}

/// Advance the odometer `coords` over `dims`, last axis fastest.
///
/// Returns `false` once every coordinate tuple has been visited.
#[inline]
pub fn next_coords(dims: &[Dim], coords: &mut [i64]) -> bool {
    for (d, c) in dims.iter().zip(coords.iter_mut()).rev() {
        if *c < d.upper {
            *c += 1;
            return true;
        }
        *c = d.lower;
    }
    false
}
