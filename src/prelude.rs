// Copyright 2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndshare prelude.
//!
//! This module contains the most used types, traits, and functions that
//! you can import easily as a group.
//!
//! ```
//! use ndshare::prelude::*;
//! # fn main() { }
//! ```

#[doc(no_inline)]
pub use crate::{ArrayView, Dim, DimSpec, ElementKind, Storage, Value};

#[doc(no_inline)]
pub use crate::{make_shared_view, traverse, ArrayError, ErrorKind};

#[doc(no_inline)]
pub use crate::elementwise::{copy, equal, fill, for_each, index_map, map};
