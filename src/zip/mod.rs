// Copyright 2017 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lockstep traversal of a destination view and its sources.
use log::trace;

use crate::dimension::{self, Dim};
use crate::error::{shape_mismatch, ArrayError};
use crate::ArrayView;

/// Iteration plan shared by every operand of a traversal.
///
/// Axes `kroll..` of every operand are dense with respect to the
/// destination's extents and are walked as one linear block of `len`
/// elements; axes `..kroll` are walked by an odometer.
#[derive(Clone, Debug)]
struct Unroll {
    dims: Vec<Dim>,
    kroll: usize,
    len: usize,
}

fn bounds_mismatch(operand: usize, axis: usize, src: &Dim, dest: &Dim) -> ArrayError {
    shape_mismatch(
        operand,
        format!(
            "axis {} bounds [{}, {}] do not cover [{}, {}]",
            axis, src.lower, src.upper, dest.lower, dest.upper
        ),
    )
}

impl Unroll {
    fn new(dest: &ArrayView, sources: &[&ArrayView]) -> Result<Unroll, ArrayError> {
        let d0 = dest.promoted_dims().into_owned();
        let kmax = d0.len() - 1;

        // unroll depth of the destination itself
        let mut inc = d0[kmax].stride;
        let mut kroll = kmax;
        while kroll > 0 {
            inc *= d0[kroll].extent();
            if inc != d0[kroll - 1].stride {
                break;
            }
            kroll -= 1;
        }

        for (n, src) in sources.iter().enumerate() {
            let operand = n + 1;
            let d1 = src.promoted_dims();
            if d1.len() != d0.len() {
                return Err(shape_mismatch(
                    operand,
                    format!("rank {} against destination rank {}", src.rank(), dest.rank()),
                ));
            }
            let mut inc = d1[kmax].stride;
            let mut k = kmax;
            while k > kroll {
                if !d1[k].covers(&d0[k]) {
                    return Err(bounds_mismatch(operand, k, &d1[k], &d0[k]));
                }
                inc *= d0[k].extent();
                if inc != d1[k - 1].stride {
                    kroll = k;
                    break;
                }
                k -= 1;
            }
            for j in (0..=k).rev() {
                if !d1[j].covers(&d0[j]) {
                    return Err(bounds_mismatch(operand, j, &d1[j], &d0[j]));
                }
            }
        }

        let len = d0[kroll..].iter().map(Dim::len).product();
        Ok(Unroll { dims: d0, kroll, len })
    }

    fn is_empty(&self) -> bool {
        self.len == 0 || self.dims[..self.kroll].iter().any(Dim::is_empty)
    }

    /// Block view of `view` with its base left at zero.
    fn block(&self, view: &ArrayView) -> ArrayView {
        let dims = view.promoted_dims();
        let stride = dims[dims.len() - 1].stride;
        view.with_dims(vec![Dim::new(0, self.len as i64 - 1, stride)], 0)
    }

    /// Storage index in `view` of the block at outer coordinates `outer`.
    ///
    /// Operands are aligned by coordinate value: the block starts at the
    /// element whose coordinates equal the destination's first coordinates
    /// of the block.
    fn block_base(&self, view: &ArrayView, outer: &[i64]) -> i64 {
        let dims = view.promoted_dims();
        let mut i = view.base();
        for (k, d) in dims.iter().enumerate() {
            let c = if k < self.kroll { outer[k] } else { self.dims[k].lower };
            i += (c - d.lower) * d.stride;
        }
        i
    }
}

/// Apply `op` to corresponding blocks of `dest` and `sources`.
///
/// Every source must have the rank of `dest` and bounds covering the
/// bounds of `dest` on every axis, else the result is a `ShapeMismatch`
/// error naming the operand (`0` is the destination, sources count from
/// `1`). A rank-0 view takes part as a vector of one element.
///
/// Trailing axes that are dense for every operand are merged, and `op`
/// receives one rank-1 block per operand, all of the same length, with
/// bounds `[0, len - 1]`. Element `i` of each block corresponds to the
/// same destination coordinates. The outer axes are visited last axis
/// fastest.
///
/// Returns `Ok(false)` as soon as `op` returns `false`, and `Ok(true)` after
/// visiting every block. An empty destination visits no block.
///
/// ```rust
/// use ndshare::{traverse, ArrayView, DimSpec};
///
/// let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(3)], vec![0u8; 6]).unwrap();
/// let mut blocks = 0;
/// assert!(traverse(&a, &[], |d, _| { blocks += 1; d.len() == 6 }).unwrap());
/// assert_eq!(blocks, 1);
/// ```
pub fn traverse<F>(dest: &ArrayView, sources: &[&ArrayView], mut op: F) -> Result<bool, ArrayError>
where
    F: FnMut(&ArrayView, &[ArrayView]) -> bool,
{
    let plan = Unroll::new(dest, sources)?;
    trace!(
        "traverse: rank {}, {} sources, unrolled from axis {} in blocks of {}",
        plan.dims.len(),
        sources.len(),
        plan.kroll,
        plan.len
    );
    if plan.is_empty() {
        return Ok(true);
    }

    let mut dest_block = plan.block(dest);
    let mut src_blocks: Vec<ArrayView> = sources.iter().map(|s| plan.block(s)).collect();
    let outer_dims = &plan.dims[..plan.kroll];
    let mut outer: Vec<i64> = outer_dims.iter().map(|d| d.lower).collect();
    loop {
        dest_block.base = plan.block_base(dest, &outer);
        for (b, s) in src_blocks.iter_mut().zip(sources) {
            b.base = plan.block_base(s, &outer);
        }
        if !op(&dest_block, &src_blocks) {
            return Ok(false);
        }
        if !dimension::next_coords(outer_dims, &mut outer) {
            return Ok(true);
        }
    }
}

/// Storage indices of the elements of a rank-1 block, in order.
pub(crate) fn block_indices(block: &ArrayView) -> impl Iterator<Item = usize> {
    let d = block.promoted_dims()[0];
    let base = block.base();
    (0..d.len() as i64).map(move |i| (base + i * d.stride) as usize)
}

/// Call `f` with the storage index of every element of `view` in
/// row-major order.
pub(crate) fn visit_indices<F>(view: &ArrayView, mut f: F) -> Result<(), ArrayError>
where
    F: FnMut(usize) -> Result<(), ArrayError>,
{
    let dims = view.promoted_dims();
    if dims.iter().any(Dim::is_empty) {
        return Ok(());
    }
    let mut coords: Vec<i64> = dims.iter().map(|d| d.lower).collect();
    loop {
        f((view.base() + dimension::stride_offset(&dims, &coords)) as usize)?;
        if !dimension::next_coords(&dims, &mut coords) {
            return Ok(());
        }
    }
}
