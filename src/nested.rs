// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Conversion between views and nested lists of values.
use crate::dimension::{Dim, DimSpec};
use crate::element::{ElementKind, Value};
use crate::error::ArrayError;
use crate::ArrayView;

/// A tree of values mirroring the axes of a view: one level of `List` per
/// axis, `Item`s at the leaves.
#[derive(Clone, Debug, PartialEq)]
pub enum Nested {
    Item(Value),
    List(Vec<Nested>),
}

impl Nested {
    /// A list of items.
    pub fn items<I, V>(iter: I) -> Nested
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Nested::List(iter.into_iter().map(|v| Nested::Item(v.into())).collect())
    }
}

impl From<Value> for Nested {
    fn from(v: Value) -> Nested {
        Nested::Item(v)
    }
}

impl From<Vec<Nested>> for Nested {
    fn from(v: Vec<Nested>) -> Nested {
        Nested::List(v)
    }
}

/// The elements of `view` as nested lists in row-major order; a rank-0
/// view gives its single item.
pub fn to_nested_list(view: &ArrayView) -> Result<Nested, ArrayError> {
    fn build(view: &ArrayView, dims: &[Dim], i: i64) -> Result<Nested, ArrayError> {
        match dims.split_first() {
            None => Ok(Nested::Item(view.storage.get(i as usize)?)),
            Some((d, rest)) => (0..d.len() as i64)
                .map(|n| build(view, rest, i + n * d.stride))
                .collect::<Result<Vec<_>, _>>()
                .map(Nested::List),
        }
    }
    build(view, view.dims(), view.base())
}

/// Allocate a dense view of `kind` with axes `dims` holding the items of
/// `list`.
///
/// **Errors** with `BadContents` unless `list` has exactly one level of
/// nesting per axis with the length of that axis at every level.
pub fn from_nested_list(dims: &[DimSpec], kind: ElementKind, list: &Nested) -> Result<ArrayView, ArrayError> {
    fn store(view: &ArrayView, dims: &[Dim], i: i64, list: &Nested) -> Result<(), ArrayError> {
        match (dims.split_first(), list) {
            (None, Nested::Item(v)) => view.storage.set(i as usize, v),
            (Some((d, rest)), Nested::List(items)) if items.len() == d.len() => {
                for (n, item) in items.iter().enumerate() {
                    store(view, rest, i + n as i64 * d.stride, item)?;
                }
                Ok(())
            }
            (None, Nested::List(_)) => Err(ArrayError::BadContents("list nested too deeply".into())),
            (Some(_), Nested::Item(_)) => Err(ArrayError::BadContents("list not nested deeply enough".into())),
            (Some((d, _)), Nested::List(items)) => Err(ArrayError::BadContents(format!(
                "list of {} elements for an axis of length {}",
                items.len(),
                d.len()
            ))),
        }
    }
    let view = ArrayView::new(kind, dims)?;
    store(&view, view.dims(), view.base(), list)?;
    Ok(view)
}

/// Allocate a view of `kind` holding `list`, with one axis per entry of
/// `lower_bounds`.
///
/// The length of every axis is the length of the first list at that
/// level of nesting; the remaining lists must agree with it.
pub fn from_nested_inferred(kind: ElementKind, lower_bounds: &[i64], list: &Nested) -> Result<ArrayView, ArrayError> {
    let mut dims = Vec::with_capacity(lower_bounds.len());
    let mut level = list;
    for &lower in lower_bounds {
        match level {
            Nested::List(items) => {
                dims.push(DimSpec::Bounds(lower, lower + items.len() as i64 - 1));
                match items.first() {
                    Some(first) => level = first,
                    None => break,
                }
            }
            Nested::Item(_) => {
                return Err(ArrayError::BadContents(format!(
                    "list nested less than {} levels deep",
                    lower_bounds.len()
                )))
            }
        }
    }
    // an empty list leaves the inner axes empty
    for &lower in &lower_bounds[dims.len()..] {
        dims.push(DimSpec::Bounds(lower, lower - 1));
    }
    from_nested_list(&dims, kind, list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn rank_zero_round_trip() {
        let a = from_nested_list(&[], ElementKind::F64, &Nested::Item(Value::F64(2.5))).unwrap();
        assert_eq!(a.rank(), 0);
        assert_eq!(to_nested_list(&a).unwrap(), Nested::Item(Value::F64(2.5)));
    }

    #[test]
    fn ragged_list_is_rejected() {
        let list = Nested::List(vec![Nested::items(vec![1, 2]), Nested::items(vec![3])]);
        let err = from_nested_inferred(ElementKind::S32, &[0, 0], &list).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadContents);
    }
}
