// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Elementwise operations built on [`traverse`].
//!
//! Operations with a user callback read and write one element at a time
//! and hold no borrow of any storage while the callback runs, so the
//! callback may access any view, including the operands.
use crate::dimension::{self, Dim};
use crate::element::{Element, ElementBuffer, Value};
use crate::error::{shape_mismatch, wrong_type, ArrayError};
use crate::storage::StorageData;
use crate::zip::{block_indices, traverse};
use crate::ArrayView;

fn buffer<A: Element>(data: &StorageData) -> Result<&A::Buffer, ArrayError> {
    A::buffer(data).ok_or_else(|| wrong_type(A::KIND, data.kind()))
}

fn buffer_mut<A: Element>(data: &mut StorageData) -> Result<&mut A::Buffer, ArrayError> {
    let kind = data.kind();
    A::buffer_mut(data).ok_or_else(|| wrong_type(A::KIND, kind))
}

/// Store `elem` at every position of `dest`.
///
/// `elem` is converted to the kind of `dest` once, before anything is
/// written.
pub fn fill<V: Into<Value>>(dest: &ArrayView, elem: V) -> Result<(), ArrayError> {
    let elem = elem.into();
    with_element_type!(dest.kind(), A => fill_typed::<A>(dest, A::from_value(&elem)?))
}

fn fill_typed<A: Element>(dest: &ArrayView, elem: A) -> Result<(), ArrayError> {
    let mut data = dest.storage.borrow_mut();
    let buf = buffer_mut::<A>(&mut data)?;
    traverse(dest, &[], |d, _| {
        for i in block_indices(d) {
            buf.set(i, elem.clone());
        }
        true
    })?;
    Ok(())
}

/// Views of `a` and `b` over their common leading positions: every axis
/// starts at 0 and has the smaller of the two extents.
fn truncate_pair(a: &ArrayView, b: &ArrayView) -> (ArrayView, ArrayView) {
    let (da, db): (Vec<Dim>, Vec<Dim>) = a
        .dims()
        .iter()
        .zip(b.dims())
        .map(|(x, y)| {
            let upper = x.len().min(y.len()) as i64 - 1;
            (Dim::new(0, upper, x.stride), Dim::new(0, upper, y.stride))
        })
        .unzip();
    (a.with_dims(da, a.base()), b.with_dims(db, b.base()))
}

/// Copy the elements of `src` into `dest`.
///
/// Positions are paired by their offset from each view's lower bounds,
/// and along each axis only the leading positions both views have are
/// copied. Both views must have the same rank. Generic elements are copied
/// by reference; elements of another kind are converted to the kind of
/// `dest`.
///
/// `src` and `dest` may overlap; see the crate documentation for what the
/// overlapping positions then receive.
pub fn copy(src: &ArrayView, dest: &ArrayView) -> Result<(), ArrayError> {
    if src.rank() != dest.rank() {
        return Err(shape_mismatch(
            1,
            format!("rank {} against destination rank {}", src.rank(), dest.rank()),
        ));
    }
    let (s, d) = truncate_pair(src, dest);
    if s.kind() == d.kind() {
        with_element_type!(d.kind(), A => copy_typed::<A>(&s, &d))
    } else {
        copy_converting(&s, &d)
    }
}

fn copy_typed<A: Element>(src: &ArrayView, dest: &ArrayView) -> Result<(), ArrayError> {
    let mut ddata = dest.storage.borrow_mut();
    if src.storage.ptr_eq(&dest.storage) {
        let buf = buffer_mut::<A>(&mut ddata)?;
        traverse(dest, &[src], |d, s| {
            for (i, j) in block_indices(d).zip(block_indices(&s[0])) {
                let x = buf.get(j);
                buf.set(i, x);
            }
            true
        })?;
    } else {
        let sdata = src.storage.borrow();
        let sbuf = buffer::<A>(&sdata)?;
        let dbuf = buffer_mut::<A>(&mut ddata)?;
        traverse(dest, &[src], |d, s| {
            for (i, j) in block_indices(d).zip(block_indices(&s[0])) {
                dbuf.set(i, sbuf.get(j));
            }
            true
        })?;
    }
    Ok(())
}

fn copy_converting(src: &ArrayView, dest: &ArrayView) -> Result<(), ArrayError> {
    let mut err = None;
    traverse(dest, &[src], |d, s| {
        for (i, j) in block_indices(d).zip(block_indices(&s[0])) {
            if let Err(e) = src.storage.get(j).and_then(|v| dest.storage.set(i, &v)) {
                err = Some(e);
                return false;
            }
        }
        true
    })?;
    err.map_or(Ok(()), Err)
}

/// Store `op(sources elements)` at every position of `dest`.
///
/// `op` receives the elements of `sources` at the position, in order (no
/// elements if there are no sources). The visiting order is unspecified.
///
/// ```rust
/// use ndshare::{elementwise, ArrayView, Value};
///
/// let a = ArrayView::from_vec(vec![1, 2, 3]);
/// let b = ArrayView::from_vec(vec![10, 20, 30]);
/// let sum = ArrayView::from_vec(vec![0i64; 3]);
/// elementwise::map(&sum, |x| {
///     let s: i128 = x.iter().filter_map(Value::as_integer).sum();
///     Value::S64(s as i64)
/// }, &[&a, &b]).unwrap();
/// assert_eq!(sum.to_vec::<i64>().unwrap(), vec![11, 22, 33]);
/// ```
pub fn map<F>(dest: &ArrayView, mut op: F, sources: &[&ArrayView]) -> Result<(), ArrayError>
where
    F: FnMut(&[Value]) -> Value,
{
    let mut err = None;
    let mut args = Vec::with_capacity(sources.len());
    traverse(dest, sources, |d, s| {
        let result = (|| -> Result<(), ArrayError> {
            for (n, i) in block_indices(d).enumerate() {
                args.clear();
                for (view, block) in sources.iter().zip(s) {
                    args.push(view.storage.get(block_storage_index(block, n))?);
                }
                let v = op(&args);
                dest.storage.set(i, &v)?;
            }
            Ok(())
        })();
        match result {
            Ok(()) => true,
            Err(e) => {
                err = Some(e);
                false
            }
        }
    })?;
    err.map_or(Ok(()), Err)
}

/// Call `op` with the element of `dest` followed by the elements of
/// `sources` at every position of `dest`, for side effects only.
pub fn for_each<F>(mut op: F, dest: &ArrayView, sources: &[&ArrayView]) -> Result<(), ArrayError>
where
    F: FnMut(&[Value]),
{
    let mut err = None;
    let mut args = Vec::with_capacity(sources.len() + 1);
    traverse(dest, sources, |d, s| {
        for (n, i) in block_indices(d).enumerate() {
            args.clear();
            let elems = std::iter::once(dest.storage.get(i)).chain(
                sources
                    .iter()
                    .zip(s)
                    .map(|(view, block)| view.storage.get(block_storage_index(block, n))),
            );
            for e in elems {
                match e {
                    Ok(v) => args.push(v),
                    Err(e) => {
                        err = Some(e);
                        return false;
                    }
                }
            }
            op(&args);
        }
        true
    })?;
    err.map_or(Ok(()), Err)
}

#[inline]
fn block_storage_index(block: &ArrayView, n: usize) -> usize {
    (block.base() + n as i64 * block.dims()[0].stride) as usize
}

/// Store `op(coordinates)` at every position of `dest`.
///
/// Coordinates are visited in row-major order, first axis slowest. A rank-0
/// view calls `op(&[])` once.
pub fn index_map<F>(dest: &ArrayView, mut op: F) -> Result<(), ArrayError>
where
    F: FnMut(&[i64]) -> Value,
{
    let dims = dest.dims();
    if dims.iter().any(Dim::is_empty) {
        return Ok(());
    }
    let mut coords: Vec<i64> = dims.iter().map(|d| d.lower).collect();
    loop {
        let v = op(&coords);
        let i = dest.base() + dimension::stride_offset(dims, &coords);
        dest.storage.set(i as usize, &v)?;
        if !dimension::next_coords(dims, &mut coords) {
            return Ok(());
        }
    }
}

/// Structural equality: same rank, same element kind, same bounds on every
/// axis, and equal elements, nested arrays compared recursively.
pub fn equal(a: &ArrayView, b: &ArrayView) -> bool {
    if a.rank() != b.rank() || a.kind() != b.kind() {
        return false;
    }
    if a.dims().iter().zip(b.dims()).any(|(x, y)| x.bounds() != y.bounds()) {
        return false;
    }
    with_element_type!(a.kind(), A => equal_typed::<A>(a, b))
}

/// Whether every consecutive pair of `views` is [`equal`].
pub fn equal_all(views: &[&ArrayView]) -> bool {
    views.windows(2).all(|w| equal(w[0], w[1]))
}

fn equal_typed<A: Element>(a: &ArrayView, b: &ArrayView) -> bool {
    let (da, db) = (a.dims(), b.dims());
    if A::KIND == crate::element::ElementKind::Generic {
        // host equality may touch any storage
        return compare(da, db, a.base(), b.base(), &mut |i, j| {
            match (a.storage.get(i), b.storage.get(j)) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            }
        });
    }
    let adata = a.storage.borrow();
    let bdata = b.storage.borrow();
    match (buffer::<A>(&adata), buffer::<A>(&bdata)) {
        (Ok(x), Ok(y)) => compare(da, db, a.base(), b.base(), &mut |i, j| x.get(i) == y.get(j)),
        _ => false,
    }
}

/// Compare from the first axis inwards, walking each axis backwards.
fn compare<G>(da: &[Dim], db: &[Dim], ia: i64, ib: i64, eq: &mut G) -> bool
where
    G: FnMut(usize, usize) -> bool,
{
    match (da.split_first(), db.split_first()) {
        (Some((xa, ra)), Some((xb, rb))) => (0..xa.len() as i64)
            .rev()
            .all(|n| compare(ra, rb, ia + n * xa.stride, ib + n * xb.stride, eq)),
        _ => eq(ia as usize, ib as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::DimSpec;
    use crate::element::ElementKind;

    #[test]
    fn overlapping_copy_stays_in_bounds() {
        let v = ArrayView::from_vec((0..8).collect::<Vec<i32>>());
        let head = crate::make_shared_view(&v, |c| vec![c[0]], &[DimSpec::Len(6)]).unwrap();
        let tail = crate::make_shared_view(&v, |c| vec![c[0] + 2], &[DimSpec::Len(6)]).unwrap();
        copy(&head, &tail).unwrap();
        let out = v.to_vec::<i32>().unwrap();
        assert_eq!(&out[..2], &[0, 1]);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn map_surfaces_conversion_errors() {
        let a = ArrayView::new(ElementKind::U8, &[DimSpec::Len(3)]).unwrap();
        let err = map(&a, |_| Value::S32(-1), &[]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::OutOfRange);
    }

    #[test]
    fn index_map_rank_zero() {
        let a = ArrayView::scalar(0u32).unwrap();
        let mut calls = 0;
        index_map(&a, |c| {
            calls += 1;
            assert!(c.is_empty());
            Value::U32(9)
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(a.get(&[]).unwrap(), Value::U32(9));
    }
}
