// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use log::debug;

use crate::dimension::{self, Dim, DimSpec};
use crate::error::{shape_mismatch, ArrayError};
use crate::storage::Storage;
use crate::ArrayView;

/// Something a shared view can be built over: a view, or a bare storage
/// indexed by a single coordinate.
pub trait ShareSource {
    /// The storage the new view will alias.
    fn storage(&self) -> Storage;
    /// Storage index of the source coordinates `coords`.
    fn index_of(&self, coords: &[i64]) -> Result<i64, ArrayError>;
    /// Lowest and highest storage index the source may reach, `None` if
    /// it reaches nothing.
    fn reachable(&self) -> Option<(i64, i64)>;
}

impl ShareSource for ArrayView {
    fn storage(&self) -> Storage {
        ArrayView::storage(self)
    }

    fn index_of(&self, coords: &[i64]) -> Result<i64, ArrayError> {
        self.linear_index(coords)
    }

    fn reachable(&self) -> Option<(i64, i64)> {
        dimension::reachable_range(self.base(), self.dims())
    }
}

impl ShareSource for Storage {
    fn storage(&self) -> Storage {
        self.clone()
    }

    fn index_of(&self, coords: &[i64]) -> Result<i64, ArrayError> {
        match *coords {
            [i] => Ok(i),
            _ => Err(shape_mismatch(
                0,
                format!("{} coordinates for a storage", coords.len()),
            )),
        }
    }

    fn reachable(&self) -> Option<(i64, i64)> {
        if self.is_empty() {
            None
        } else {
            Some((0, self.len() as i64 - 1))
        }
    }
}

/// Create a view with the axes `dims` aliasing the storage of `source`,
/// where the element at coordinates `c` of the new view is the element at
/// coordinates `map(c)` of `source`.
///
/// `map` must be affine in each coordinate. It is sampled at the corner of
/// lower bounds and once more per axis of extent greater than one, with that
/// axis stepped by one; the differences become the strides. A map that is
/// not affine yields strides that agree with it only at the sampled points.
///
/// If some requested axis is empty, `map` is not called and the result is
/// an empty view over the same storage.
///
/// **Errors** with `MappingOutOfRange` if the new view would reach a
/// storage index outside of what `source` reaches, and with the error of
/// `source`'s indexing if a sampled point lies outside of `source`.
///
/// ```rust
/// use ndshare::{make_shared_view, ArrayView, DimSpec, Value};
///
/// let a = ArrayView::from_shape_vec(&[DimSpec::Len(3), DimSpec::Len(3)], (0..9).collect::<Vec<i32>>()).unwrap();
/// let diagonal = make_shared_view(&a, |c| vec![c[0], c[0]], &[DimSpec::Len(3)]).unwrap();
/// assert_eq!(diagonal.to_vec::<i32>().unwrap(), vec![0, 4, 8]);
/// diagonal.set(&[1], 40).unwrap();
/// assert_eq!(a.get(&[1, 1]).unwrap(), Value::S32(40));
/// ```
pub fn make_shared_view<S, F>(source: &S, mut map: F, dims: &[DimSpec]) -> Result<ArrayView, ArrayError>
where
    S: ShareSource + ?Sized,
    F: FnMut(&[i64]) -> Vec<i64>,
{
    let mut dims: Vec<Dim> = dimension::dims_from_specs(dims)?;
    let storage = source.storage();
    if dims.iter().any(Dim::is_empty) {
        return Ok(ArrayView::from_parts_unchecked(storage, dims, 0));
    }

    let mut coords: Vec<i64> = dims.iter().map(|d| d.lower).collect();
    let base = source.index_of(&map(&coords))?;
    let mut i = base;
    let mut new_min = base;
    let mut new_max = base;
    for k in (0..dims.len()).rev() {
        let d = &mut dims[k];
        if d.upper > d.lower {
            coords[k] += 1;
            d.stride = source.index_of(&map(&coords))? - i;
            i += d.stride;
            let span = (d.upper - d.lower) * d.stride;
            if span > 0 {
                new_max += span;
            } else {
                new_min += span;
            }
        } else {
            d.stride = new_max - new_min + 1;
        }
    }

    let (source_min, source_max) = source.reachable().unwrap_or((0, -1));
    if new_min < source_min || new_max > source_max {
        debug!(
            "shared view reaching [{}, {}] escapes its source [{}, {}]",
            new_min, new_max, source_min, source_max
        );
        return Err(ArrayError::MappingOutOfRange {
            min: new_min,
            max: new_max,
            source_min,
            source_max,
        });
    }
    Ok(ArrayView::from_parts_unchecked(storage, dims, base))
}
