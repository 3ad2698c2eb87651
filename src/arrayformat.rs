// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::dimension::Dim;
use crate::element::ElementKind;
use crate::ArrayView;

fn format_elements(view: &ArrayView, dims: &[Dim], i: i64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dims.split_first() {
        None => match view.storage.get(i as usize) {
            Ok(v) => write!(f, "{}", v),
            Err(_) => f.write_str("#<error>"),
        },
        Some((d, rest)) => {
            f.write_str("(")?;
            for n in 0..d.len() as i64 {
                if n > 0 {
                    f.write_str(" ")?;
                }
                format_elements(view, rest, i + n * d.stride, f)?;
            }
            f.write_str(")")
        }
    }
}

/// Format the view in array literal syntax.
///
/// The rank is omitted for a vector with lower bound zero, and the lower
/// bounds of all axes are given when any of them is non-zero. Such a
/// vector of packed booleans prints as a bit string.
///
/// ```rust
/// use ndshare::{ArrayView, DimSpec, ElementKind};
///
/// let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Bounds(1, 2)], vec![1u8, 2, 3, 4]).unwrap();
/// assert_eq!(a.to_string(), "#2u8@0@1((1 2) (3 4))");
/// ```
impl fmt::Display for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.dims();
        let zero_origin = dims.iter().all(|d| d.lower == 0);
        if dims.len() == 1 && zero_origin {
            if self.kind() == ElementKind::Bool {
                f.write_str("#*")?;
                for n in 0..dims[0].len() as i64 {
                    let bit = self.storage.get((self.base() + n * dims[0].stride) as usize);
                    f.write_str(if matches!(bit, Ok(crate::Value::Bool(true))) { "1" } else { "0" })?;
                }
                return Ok(());
            }
            write!(f, "#{}", self.kind().tag())?;
        } else {
            write!(f, "#{}{}", dims.len(), self.kind().tag())?;
            if !zero_origin {
                for d in dims {
                    write!(f, "@{}", d.lower)?;
                }
            }
        }
        if dims.is_empty() {
            f.write_str("(")?;
            format_elements(self, dims, self.base(), f)?;
            return f.write_str(")");
        }
        format_elements(self, dims, self.base(), f)
    }
}

/// Format the view and add its layout.
impl fmt::Debug for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)?;
        write!(
            f,
            " dims={:?}, base={}, contiguous={}, storage={:?}",
            self.dims(),
            self.base(),
            self.is_contiguous(),
            self.storage
        )
    }
}
