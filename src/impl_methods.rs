// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::borrow::Cow;

use crate::dimension::{self, Dim, DimSpec};
use crate::element::{Element, ElementKind, Value};
use crate::elementwise;
use crate::zip;
use crate::error::{shape_mismatch, ArrayError};
use crate::storage::Storage;
use crate::ArrayView;

/// # Methods For All Views
impl ArrayView {
    /// Return the number of axes.
    #[inline]
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// The axes of the view.
    #[inline]
    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// Number of coordinates along `axis`.
    ///
    /// **Panics** if `axis` is out of bounds.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.dims[axis].len()
    }

    /// The length of every axis.
    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(Dim::len).collect()
    }

    /// Every axis as a length when its lower bound is zero, as bounds
    /// otherwise.
    pub fn dimensions(&self) -> Vec<DimSpec> {
        self.dims.iter().map(|&d| d.into()).collect()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        dimension::size_of_dims(&self.dims)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage index of the all-lower-bounds corner.
    #[inline]
    pub fn base(&self) -> i64 {
        self.base
    }

    /// The stride of every axis.
    pub fn strides(&self) -> Vec<i64> {
        self.dims.iter().map(|d| d.stride).collect()
    }

    /// The shared storage under the view.
    pub fn storage(&self) -> Storage {
        self.storage.clone()
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.storage.kind()
    }

    /// Whether the view covers one dense row-major run of its storage.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.contiguous
    }

    /// Whether `self` and `other` view the same storage.
    pub fn shares_storage(&self, other: &ArrayView) -> bool {
        self.storage.ptr_eq(&other.storage)
    }

    /// Storage index of `coords`.
    ///
    /// **Errors** with `ShapeMismatch` if the number of coordinates differs
    /// from the rank, and with `OutOfRange` if a coordinate lies outside of
    /// its axis.
    pub fn linear_index(&self, coords: &[i64]) -> Result<i64, ArrayError> {
        if coords.len() != self.rank() {
            return Err(shape_mismatch(
                0,
                format!("{} coordinates for rank {}", coords.len(), self.rank()),
            ));
        }
        let mut i = self.base;
        for (d, &c) in self.dims.iter().zip(coords) {
            if !d.contains(c) {
                return Err(ArrayError::OutOfRange {
                    value: c.into(),
                    lower: d.lower.into(),
                    upper: d.upper.into(),
                });
            }
            i += (c - d.lower) * d.stride;
        }
        Ok(i)
    }

    /// Whether `coords` is a valid coordinate tuple of the view.
    pub fn in_bounds(&self, coords: &[i64]) -> bool {
        coords.len() == self.rank() && self.dims.iter().zip(coords).all(|(d, &c)| d.contains(c))
    }

    pub fn get(&self, coords: &[i64]) -> Result<Value, ArrayError> {
        let i = self.linear_index(coords)?;
        self.storage.get(i as usize)
    }

    /// Store `elem` at `coords`, converting it to the view's kind.
    pub fn set<V: Into<Value>>(&self, coords: &[i64], elem: V) -> Result<(), ArrayError> {
        let i = self.linear_index(coords)?;
        self.storage.set(i as usize, &elem.into())
    }

    /// The elements in row-major order.
    pub fn to_vec<A: Element>(&self) -> Result<Vec<A>, ArrayError> {
        let mut v = Vec::with_capacity(self.len());
        zip::visit_indices(self, |i| {
            v.push(self.storage.get_typed::<A>(i)?);
            Ok(())
        })?;
        Ok(v)
    }

    /// The elements in row-major order as values.
    pub fn to_values(&self) -> Result<Vec<Value>, ArrayError> {
        let mut v = Vec::with_capacity(self.len());
        zip::visit_indices(self, |i| {
            v.push(self.storage.get(i)?);
            Ok(())
        })?;
        Ok(v)
    }

    /// A view aliasing the same storage with other axes; the caller
    /// guarantees the result stays in bounds.
    pub(crate) fn with_dims(&self, dims: Vec<Dim>, base: i64) -> ArrayView {
        ArrayView::from_parts_unchecked(self.storage.clone(), dims, base)
    }

    /// Axes with a rank-0 view seen as a single-element vector.
    pub(crate) fn promoted_dims(&self) -> Cow<'_, [Dim]> {
        if self.dims.is_empty() {
            Cow::Owned(vec![Dim::new(0, 0, 0)])
        } else {
            Cow::Borrowed(&self.dims)
        }
    }
}

impl PartialEq for ArrayView {
    /// Structural equality, see [`elementwise::equal`].
    fn eq(&self, other: &ArrayView) -> bool {
        elementwise::equal(self, other)
    }
}
