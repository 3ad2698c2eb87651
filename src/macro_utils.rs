// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Evaluate `$body` with the type alias `$A` bound to the native element
/// type of the runtime kind `$kind`, once per kind.
///
/// ```ignore
/// with_element_type!(view.kind(), A => fill_typed::<A>(view, value))
/// ```
macro_rules! with_element_type {
    ($kind:expr, $A:ident => $body:expr) => {
        match $kind {
            $crate::element::ElementKind::Generic => { type $A = $crate::element::Value; $body }
            $crate::element::ElementKind::Bool => { type $A = bool; $body }
            $crate::element::ElementKind::U8 => { type $A = u8; $body }
            $crate::element::ElementKind::S8 => { type $A = i8; $body }
            $crate::element::ElementKind::U16 => { type $A = u16; $body }
            $crate::element::ElementKind::S16 => { type $A = i16; $body }
            $crate::element::ElementKind::U32 => { type $A = u32; $body }
            $crate::element::ElementKind::S32 => { type $A = i32; $body }
            $crate::element::ElementKind::U64 => { type $A = u64; $body }
            $crate::element::ElementKind::S64 => { type $A = i64; $body }
            $crate::element::ElementKind::F32 => { type $A = f32; $body }
            $crate::element::ElementKind::F64 => { type $A = f64; $body }
            $crate::element::ElementKind::C64 => { type $A = $crate::element::Complex64; $body }
            $crate::element::ElementKind::Char => { type $A = char; $body }
        }
    };
}

/// Implement the buffer accessors of `Element` for a type stored in
/// `StorageData::$variant(Vec<$t>)`.
macro_rules! vec_buffer {
    ($t:ty, $variant:ident) => {
        type Buffer = Vec<$t>;

        #[inline]
        fn buffer(data: &$crate::storage::StorageData) -> Option<&Vec<$t>> {
            match data {
                $crate::storage::StorageData::$variant(v) => Some(v),
                _ => None,
            }
        }

        #[inline]
        fn buffer_mut(data: &mut $crate::storage::StorageData) -> Option<&mut Vec<$t>> {
            match data {
                $crate::storage::StorageData::$variant(v) => Some(v),
                _ => None,
            }
        }

        fn data_from_vec(v: Vec<$t>) -> $crate::storage::StorageData {
            $crate::storage::StorageData::$variant(v)
        }

        fn data_from_elem(len: usize, elem: $t) -> $crate::storage::StorageData {
            $crate::storage::StorageData::$variant(vec![elem; len])
        }
    };
}
