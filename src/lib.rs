// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndshare"]
#![doc(html_root_url = "https://docs.rs/ndshare/0.1/")]

//! The `ndshare` crate provides [`ArrayView`], a strided n-dimensional view
//! over shared, typed storage.
//!
//! - Any rank, any lower bound per axis, and negative or non-unit strides.
//! - Views alias their [`Storage`]: a write through one view is visible
//!   through every other view of the same storage.
//! - [`make_shared_view`] derives a new view from an affine coordinate map,
//!   which covers slicing, reversal, transposition, and diagonals.
//! - [`traverse`] walks one destination and any number of sources in
//!   lockstep, merging dense trailing axes into a single linear pass; the
//!   elementwise operations in [`elementwise`] are built on it.
//! - Boolean storage is packed into 64-bit words; see [`bitvec`].
//!
//! ## Example
//!
//! ```
//! use ndshare::prelude::*;
//!
//! let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(3)], vec![1, 2, 3, 4, 5, 6]).unwrap();
//! let t = a.transpose_axes(&[1, 0]).unwrap();
//! assert_eq!(t.shape(), vec![3, 2]);
//! assert_eq!(t.get(&[2, 1]).unwrap(), Value::S32(6));
//! assert!(a.flatten(true).is_some());
//! assert!(t.flatten(true).is_none());
//! ```
//!
//! ## Aliasing during a traversal
//!
//! A destination may overlap its sources. Elements are read and written one
//! block at a time, so the values seen for overlapping positions depend on
//! the visiting order, which is unspecified except for
//! [`elementwise::index_map`]. Every access stays in bounds.

#[macro_use]
mod macro_utils;

pub mod bitvec;
mod dimension;
pub mod element;
pub mod elementwise;
mod error;
mod arrayformat;
mod impl_constructors;
mod impl_methods;
mod impl_views;
pub mod io;
pub mod nested;
pub mod prelude;
mod storage;
mod zip;

pub use crate::bitvec::{BitVector, Selector};
pub use crate::dimension::{Dim, DimSpec};
pub use crate::element::{Complex64, Element, ElementKind, HostRef, HostValue, Value};
pub use crate::error::{ArrayError, ErrorKind};
pub use crate::impl_views::shared::{make_shared_view, ShareSource};
pub use crate::storage::{Storage, StorageData};
pub use crate::zip::traverse;

/// A rank-N strided view over a [`Storage`].
///
/// The storage index of the coordinates `c` is
/// `base + Σ (c[k] - dims[k].lower) * dims[k].stride`, and every index
/// reachable with in-bounds coordinates lies within the storage.
///
/// Cloning a view is cheap and shares the storage.
#[derive(Clone)]
pub struct ArrayView {
    storage: Storage,
    dims: Vec<Dim>,
    base: i64,
    /// Cached `dimension::is_contiguous(&dims)`.
    contiguous: bool,
}
