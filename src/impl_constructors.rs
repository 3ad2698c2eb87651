// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for `ArrayView`.
//!
use crate::dimension::{self, Dim, DimSpec};
use crate::element::{Element, ElementKind, Value};
use crate::elementwise;
use crate::error::{shape_mismatch, ArrayError};
use crate::storage::Storage;
use crate::ArrayView;

impl ArrayView {
    /// Allocate a dense row-major view of `kind` with the requested axes.
    ///
    /// Elements start out as zero, `false`, NUL, or `Value::Unspecified`.
    ///
    /// ```rust
    /// use ndshare::{ArrayView, DimSpec, ElementKind};
    ///
    /// let a = ArrayView::new(ElementKind::F64, &[DimSpec::Len(2), DimSpec::Bounds(1, 3)]).unwrap();
    /// assert_eq!(a.shape(), vec![2, 3]);
    /// assert_eq!(a.strides(), vec![3, 1]);
    /// ```
    pub fn new(kind: ElementKind, dims: &[DimSpec]) -> Result<ArrayView, ArrayError> {
        let dims = dimension::dims_from_specs(dims)?;
        let storage = Storage::new(kind, dimension::size_of_dims(&dims));
        Ok(ArrayView::from_parts_unchecked(storage, dims, 0))
    }

    /// Allocate a dense view of the kind natural to `elem` and fill it with `elem`.
    pub fn from_elem<V: Into<Value>>(dims: &[DimSpec], elem: V) -> Result<ArrayView, ArrayError> {
        let elem = elem.into();
        let a = ArrayView::new(elem.natural_kind(), dims)?;
        elementwise::fill(&a, elem)?;
        Ok(a)
    }

    /// Create a one-dimensional view over a vector (no copying needed).
    ///
    /// ```rust
    /// use ndshare::ArrayView;
    ///
    /// let a = ArrayView::from_vec(vec![1., 2., 3., 4.]);
    /// assert_eq!(a.len(), 4);
    /// ```
    pub fn from_vec<A: Element>(v: Vec<A>) -> ArrayView {
        ArrayView::from_storage(Storage::from_vec(v))
    }

    /// Create a dense row-major view with the requested axes over the
    /// elements of `v`.
    ///
    /// **Errors** with `ShapeMismatch` if the number of elements differs
    /// from the size of the shape.
    pub fn from_shape_vec<A: Element>(dims: &[DimSpec], v: Vec<A>) -> Result<ArrayView, ArrayError> {
        let dims = dimension::dims_from_specs(dims)?;
        let size = dimension::size_of_dims(&dims);
        if size != v.len() {
            return Err(shape_mismatch(
                0,
                format!("shape of size {} for {} elements", size, v.len()),
            ));
        }
        Ok(ArrayView::from_parts_unchecked(Storage::from_vec(v), dims, 0))
    }

    /// Wrap a whole storage as a zero-based, unit-stride vector.
    pub fn from_storage(storage: Storage) -> ArrayView {
        let dims = vec![Dim::new(0, storage.len() as i64 - 1, 1)];
        ArrayView::from_parts_unchecked(storage, dims, 0)
    }

    /// A rank-0 view holding `elem`.
    pub fn scalar<V: Into<Value>>(elem: V) -> Result<ArrayView, ArrayError> {
        ArrayView::from_elem(&[], elem)
    }

    /// Create a view from explicit axes, strides, and base offset.
    ///
    /// **Errors** with `OutOfRange` if some in-bounds coordinate tuple maps
    /// outside of `storage`. A view with an empty axis reaches nothing and
    /// is always accepted.
    ///
    /// ```rust
    /// use ndshare::{ArrayView, Dim};
    ///
    /// let v = ArrayView::from_vec((0..6).collect::<Vec<i32>>());
    /// // every other element, backwards
    /// let r = ArrayView::from_parts(v.storage(), vec![Dim::new(0, 2, -2)], 5).unwrap();
    /// assert_eq!(r.to_vec::<i32>().unwrap(), vec![5, 3, 1]);
    /// ```
    pub fn from_parts(storage: Storage, dims: Vec<Dim>, base: i64) -> Result<ArrayView, ArrayError> {
        if let Some((min, max)) = dimension::reachable_range(base, &dims) {
            let top = storage.len() as i64 - 1;
            if min < 0 {
                return Err(ArrayError::OutOfRange { value: min.into(), lower: 0, upper: top.into() });
            }
            if max > top {
                return Err(ArrayError::OutOfRange { value: max.into(), lower: 0, upper: top.into() });
            }
        }
        Ok(ArrayView::from_parts_unchecked(storage, dims, base))
    }

    pub(crate) fn from_parts_unchecked(storage: Storage, dims: Vec<Dim>, base: i64) -> ArrayView {
        let contiguous = dimension::is_contiguous(&dims);
        ArrayView {
            storage,
            dims,
            base,
            contiguous,
        }
    }
}
