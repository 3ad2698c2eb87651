// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::{max, min};

use crate::dimension::Dim;
use crate::error::{shape_mismatch, ArrayError};
use crate::ArrayView;

impl ArrayView {
    /// Return a view of the same storage with permuted axes.
    ///
    /// Axis `k` of `self` becomes axis `axes[k]` of the result. Several axes
    /// may map to the same target axis, which then runs along their
    /// diagonal: its bounds are the intersection of theirs and its stride
    /// is the sum of theirs. Every target axis from `0` to the largest entry
    /// of `axes` must receive at least one axis.
    ///
    /// **Errors** with `ShapeMismatch` if `axes` does not have one entry per
    /// axis or leaves a target axis unassigned, and with `OutOfRange` if an
    /// entry exceeds the rank.
    ///
    /// ```rust
    /// use ndshare::{ArrayView, DimSpec};
    ///
    /// let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(2)], vec!['a', 'b', 'c', 'd']).unwrap();
    /// let t = a.transpose_axes(&[1, 0]).unwrap();
    /// assert_eq!(t.to_vec::<char>().unwrap(), vec!['a', 'c', 'b', 'd']);
    /// let d = a.transpose_axes(&[0, 0]).unwrap();
    /// assert_eq!(d.to_vec::<char>().unwrap(), vec!['a', 'd']);
    /// ```
    pub fn transpose_axes(&self, axes: &[usize]) -> Result<ArrayView, ArrayError> {
        let rank = self.rank();
        if axes.len() != rank {
            return Err(shape_mismatch(
                0,
                format!("{} axes given for rank {}", axes.len(), rank),
            ));
        }
        if let Some(&a) = axes.iter().find(|&&a| a > rank) {
            return Err(ArrayError::OutOfRange {
                value: a as i128,
                lower: 0,
                upper: rank as i128,
            });
        }
        let ndim = axes.iter().max().map_or(0, |&m| m + 1);
        let mut res = vec![Dim::new(0, -1, 0); ndim];
        let mut assigned = vec![false; ndim];
        let mut base = self.base();
        for (s, &j) in self.dims().iter().zip(axes).rev() {
            let r = &mut res[j];
            if !assigned[j] {
                *r = *s;
                assigned[j] = true;
            } else {
                // realign both axes on the larger lower bound
                let lower = max(r.lower, s.lower);
                base += (lower - r.lower) * r.stride + (lower - s.lower) * s.stride;
                r.lower = lower;
                r.upper = min(r.upper, s.upper);
                r.stride += s.stride;
            }
        }
        if let Some(j) = assigned.iter().position(|&a| !a) {
            return Err(shape_mismatch(0, format!("no axis maps to axis {}", j)));
        }
        Ok(self.with_dims(res, base))
    }

    /// Return a view with the order of the axes reversed.
    pub fn reversed_axes(&self) -> ArrayView {
        let mut dims = self.dims().to_vec();
        dims.reverse();
        self.with_dims(dims, self.base())
    }
}

#[cfg(test)]
mod tests {
    use crate::dimension::DimSpec;
    use crate::element::{ElementKind, Value};
    use crate::error::ErrorKind;
    use crate::ArrayView;

    #[test]
    fn diagonal_with_offset_lower_bounds() {
        let a = ArrayView::new(ElementKind::S32, &[DimSpec::Bounds(0, 3), DimSpec::Bounds(2, 5)]).unwrap();
        for i in 0..4 {
            for j in 2..6 {
                a.set(&[i, j], (10 * i + j) as i32).unwrap();
            }
        }
        let d = a.transpose_axes(&[0, 0]).unwrap();
        assert_eq!(d.dims()[0].bounds(), (2, 3));
        assert_eq!(d.get(&[2]).unwrap(), Value::S32(22));
        assert_eq!(d.get(&[3]).unwrap(), Value::S32(33));
    }

    #[test]
    fn three_to_two() {
        let a = ArrayView::from_shape_vec(
            &[DimSpec::Len(2), DimSpec::Len(2), DimSpec::Len(3)],
            (0..12).collect::<Vec<i64>>(),
        )
        .unwrap();
        let t = a.transpose_axes(&[1, 1, 0]).unwrap();
        assert_eq!(t.shape(), vec![3, 2]);
        assert_eq!(t.to_vec::<i64>().unwrap(), vec![0, 9, 1, 10, 2, 11]);
    }

    #[test]
    fn bad_axes() {
        let a = ArrayView::new(ElementKind::U8, &[DimSpec::Len(2), DimSpec::Len(2)]).unwrap();
        assert_eq!(a.transpose_axes(&[0]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert_eq!(a.transpose_axes(&[3, 0]).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(a.transpose_axes(&[2, 0]).unwrap_err().kind(), ErrorKind::ShapeMismatch);
    }
}
