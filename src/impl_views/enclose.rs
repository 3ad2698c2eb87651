// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dimension::{self, Dim, DimSpec};
use crate::element::{ElementKind, Value};
use crate::elementwise;
use crate::error::{shape_mismatch, ArrayError};
use crate::ArrayView;

impl ArrayView {
    /// Split the axes of `self` into an outer generic view whose elements
    /// are inner views over the same storage.
    ///
    /// The inner views have the axes listed in `axes`, in that order. The
    /// outer view has the remaining axes in their original order. An empty
    /// `axes` encloses the last axis.
    ///
    /// Each element is a fresh view, so two reads of one position give
    /// views that are equal and alias the same storage but are not the same
    /// object.
    ///
    /// **Errors** with `ShapeMismatch` if `axes` has more entries than the
    /// rank or repeats an axis, and with `OutOfRange` if an entry is not an
    /// axis of `self`.
    ///
    /// ```rust
    /// use ndshare::{ArrayView, DimSpec, Value};
    ///
    /// let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(3)], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    /// let columns = a.enclose_axes(&[0]).unwrap();
    /// assert_eq!(columns.shape(), vec![3]);
    /// match columns.get(&[1]).unwrap() {
    ///     Value::Array(c) => assert_eq!(c.to_vec::<u8>().unwrap(), vec![2, 5]),
    ///     v => panic!("not an array: {}", v),
    /// }
    /// ```
    pub fn enclose_axes(&self, axes: &[usize]) -> Result<ArrayView, ArrayError> {
        let rank = self.rank();
        let last = [rank.saturating_sub(1)];
        let axes = if axes.is_empty() && rank > 0 { &last[..] } else { axes };
        if axes.len() > rank {
            return Err(shape_mismatch(
                0,
                format!("{} axes enclosed for rank {}", axes.len(), rank),
            ));
        }
        let mut enclosed = vec![false; rank];
        for &j in axes {
            if j >= rank {
                return Err(ArrayError::OutOfRange {
                    value: j as i128,
                    lower: 0,
                    upper: rank as i128 - 1,
                });
            }
            if enclosed[j] {
                return Err(shape_mismatch(0, format!("axis {} enclosed twice", j)));
            }
            enclosed[j] = true;
        }

        let inner: Vec<Dim> = axes.iter().map(|&j| self.dims()[j]).collect();
        let outer: Vec<Dim> = self
            .dims()
            .iter()
            .zip(&enclosed)
            .filter(|&(_, &e)| !e)
            .map(|(&d, _)| d)
            .collect();
        let specs: Vec<DimSpec> = outer.iter().map(|&d| d.into()).collect();
        let res = ArrayView::new(ElementKind::Generic, &specs)?;
        elementwise::index_map(&res, |c| {
            let base = self.base() + dimension::stride_offset(&outer, c);
            Value::Array(self.with_dims(inner.clone(), base))
        })?;
        Ok(res)
    }
}
