// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use log::debug;
use num_integer::Integer;

use crate::bitvec::WORD_BITS;
use crate::dimension::{self, Dim};
use crate::element::ElementKind;
use crate::elementwise;
use crate::error::ArrayError;
use crate::storage::Storage;
use crate::ArrayView;

impl ArrayView {
    /// Whether the elements of packed boolean storage start on a word and
    /// span whole words. A vector over the whole storage is always aligned.
    fn is_word_aligned(&self) -> bool {
        let base = self.base() as usize;
        let len = self.len();
        if self.rank() == 1 && base == 0 && len == self.storage.len() {
            return true;
        }
        Integer::is_multiple_of(&base, &WORD_BITS) && Integer::is_multiple_of(&len, &WORD_BITS)
    }

    /// Return the elements of a contiguous view as a zero-based vector over
    /// the same storage, or `None` if the view is not contiguous.
    ///
    /// With `strict`, the innermost stride must also be 1 and, for boolean
    /// storage, the elements must be word aligned (see
    /// [`to_contiguous`](ArrayView::to_contiguous)).
    ///
    /// The element at row-major position `p` of `self` is element `p` of the
    /// result.
    pub fn flatten(&self, strict: bool) -> Option<ArrayView> {
        if !self.is_contiguous() {
            debug!("flatten: non-contiguous strides {:?}", self.strides());
            return None;
        }
        let inner = self.dims().last().map_or(1, |d| d.stride);
        if strict && (inner != 1 || (self.kind() == ElementKind::Bool && !self.is_word_aligned())) {
            return None;
        }
        let dims = vec![Dim::new(0, self.len() as i64 - 1, inner)];
        Some(self.with_dims(dims, self.base()))
    }

    /// Return a view with the bounds of `self` whose elements form one dense
    /// ascending run of storage.
    ///
    /// If `self` already is such a view (for boolean storage, one that also
    /// starts on a word and spans whole words, or a vector over the whole
    /// storage) a clone is returned. Otherwise a new storage is allocated, and with
    /// `copy` the elements of `self` are copied into it.
    pub fn to_contiguous(&self, copy: bool) -> Result<ArrayView, ArrayError> {
        if self.flatten(true).is_some() {
            return Ok(self.clone());
        }
        let mut dims = self.dims().to_vec();
        dimension::fill_default_strides(&mut dims);
        let storage = Storage::new(self.kind(), dimension::size_of_dims(&dims));
        let dense = ArrayView::from_parts_unchecked(storage, dims, 0);
        if copy {
            elementwise::copy(self, &dense)?;
        }
        Ok(dense)
    }
}
