// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element kinds, the dynamic `Value`, and the `Element` trait that ties a
//! native element type to its storage.
use std::any::Any;
use std::fmt;
use std::rc::Rc;

use log::warn;
pub use num_complex::Complex64;
use num_traits::{Bounded, ToPrimitive};

use crate::bitvec::BitVector;
use crate::error::{out_of_range, wrong_type, ArrayError};
use crate::storage::StorageData;
use crate::ArrayView;

/// The closed set of element kinds a storage can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Arbitrary host values, stored by reference.
    Generic,
    /// Packed booleans.
    Bool,
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
    U64,
    S64,
    F32,
    F64,
    /// Pairs of `f64`.
    C64,
    Char,
}

static TAGS: [(&str, ElementKind); 14] = [
    ("", ElementKind::Generic),
    ("b", ElementKind::Bool),
    ("u8", ElementKind::U8),
    ("s8", ElementKind::S8),
    ("u16", ElementKind::U16),
    ("s16", ElementKind::S16),
    ("u32", ElementKind::U32),
    ("s32", ElementKind::S32),
    ("u64", ElementKind::U64),
    ("s64", ElementKind::S64),
    ("f32", ElementKind::F32),
    ("f64", ElementKind::F64),
    ("c64", ElementKind::C64),
    ("a", ElementKind::Char),
];

// Old one-letter prototype spellings.
static LEGACY_TAGS: [(&str, ElementKind); 10] = [
    ("a", ElementKind::Char),
    ("b", ElementKind::Bool),
    ("u", ElementKind::U32),
    ("e", ElementKind::S32),
    ("h", ElementKind::S16),
    ("l", ElementKind::S64),
    ("s", ElementKind::F32),
    ("i", ElementKind::F64),
    ("c", ElementKind::C64),
    ("y", ElementKind::S8),
];

impl ElementKind {
    /// Every kind, in tag table order.
    pub fn all() -> impl Iterator<Item = ElementKind> {
        TAGS.iter().map(|&(_, k)| k)
    }

    /// The literal syntax tag of this kind (empty for `Generic`).
    pub fn tag(self) -> &'static str {
        TAGS.iter()
            .find(|&&(_, k)| k == self)
            .map_or("", |&(t, _)| t)
    }

    /// Look up a kind by its tag.
    pub fn from_tag(tag: &str) -> Option<ElementKind> {
        TAGS.iter().find(|&&(t, _)| t == tag).map(|&(_, k)| k)
    }

    /// Look up a kind by a deprecated one-letter tag.
    pub fn from_legacy_tag(tag: &str) -> Option<ElementKind> {
        let kind = LEGACY_TAGS.iter().find(|&&(t, _)| t == tag).map(|&(_, k)| k)?;
        warn!(
            "element kind tag {:?} is deprecated, use {:?} instead",
            tag,
            kind.tag()
        );
        Some(kind)
    }

    /// Size in bytes of one element in binary I/O.
    ///
    /// `Generic` has no binary form. `Bool` is transferred in whole words
    /// and reports the word size.
    pub fn byte_size(self) -> Option<usize> {
        use self::ElementKind::*;
        Some(match self {
            Generic => return None,
            Bool | U64 | S64 | F64 => 8,
            U8 | S8 => 1,
            U16 | S16 => 2,
            U32 | S32 | F32 | Char => 4,
            C64 => 16,
        })
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ElementKind::Generic => f.write_str("generic"),
            k => f.write_str(k.tag()),
        }
    }
}

/// An opaque value owned by the host.
///
/// The engine only moves these around; equality and printing are delegated
/// to the host.
pub trait HostValue: fmt::Debug + fmt::Display {
    fn host_eq(&self, other: &dyn HostValue) -> bool;
    fn as_any(&self) -> &dyn Any;
}

pub type HostRef = Rc<dyn HostValue>;

/// A dynamically typed element.
#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    U8(u8),
    S8(i8),
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    U64(u64),
    S64(i64),
    F32(f32),
    F64(f64),
    C64(Complex64),
    Char(char),
    /// A nested array.
    Array(ArrayView),
    Object(HostRef),
    /// Content of freshly allocated generic storage.
    Unspecified,
}

impl Value {
    pub fn object<H: HostValue + 'static>(h: H) -> Value {
        Value::Object(Rc::new(h))
    }

    /// The element kind that stores this value without conversion.
    pub fn natural_kind(&self) -> ElementKind {
        match self {
            Value::Bool(_) => ElementKind::Bool,
            Value::U8(_) => ElementKind::U8,
            Value::S8(_) => ElementKind::S8,
            Value::U16(_) => ElementKind::U16,
            Value::S16(_) => ElementKind::S16,
            Value::U32(_) => ElementKind::U32,
            Value::S32(_) => ElementKind::S32,
            Value::U64(_) => ElementKind::U64,
            Value::S64(_) => ElementKind::S64,
            Value::F32(_) => ElementKind::F32,
            Value::F64(_) => ElementKind::F64,
            Value::C64(_) => ElementKind::C64,
            Value::Char(_) => ElementKind::Char,
            Value::Array(_) | Value::Object(_) | Value::Unspecified => ElementKind::Generic,
        }
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::S8(_) => "s8",
            Value::U16(_) => "u16",
            Value::S16(_) => "s16",
            Value::U32(_) => "u32",
            Value::S32(_) => "s32",
            Value::U64(_) => "u64",
            Value::S64(_) => "s64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::C64(_) => "c64",
            Value::Char(_) => "char",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Unspecified => "unspecified",
        }
    }

    /// The value as an exact integer, if it is one.
    pub fn as_integer(&self) -> Option<i128> {
        Some(match *self {
            Value::U8(x) => x.into(),
            Value::S8(x) => x.into(),
            Value::U16(x) => x.into(),
            Value::S16(x) => x.into(),
            Value::U32(x) => x.into(),
            Value::S32(x) => x.into(),
            Value::U64(x) => x.into(),
            Value::S64(x) => x.into(),
            _ => return None,
        })
    }

    /// The value as a real number, if it is an integer or a float.
    pub fn as_real(&self) -> Option<f64> {
        match *self {
            Value::F32(x) => Some(x.into()),
            Value::F64(x) => Some(x),
            _ => self.as_integer().and_then(|i| i.to_f64()),
        }
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match *self {
            Value::C64(z) => Some(z),
            _ => self.as_real().map(|re| Complex64::new(re, 0.)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::C64(a), Value::C64(b)) => a == b,
            (Value::F32(_) | Value::F64(_), Value::F32(_) | Value::F64(_)) => {
                self.as_real() == other.as_real()
            }
            (Value::Array(a), Value::Array(b)) => crate::elementwise::equal(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b) || a.host_eq(&**b),
            (Value::Unspecified, Value::Unspecified) => true,
            _ => match (self.as_integer(), other.as_integer()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

fn write_real(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        f.write_str("+nan.0")
    } else if x.is_infinite() {
        f.write_str(if x > 0. { "+inf.0" } else { "-inf.0" })
    } else {
        write!(f, "{:?}", x)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.write_str(if *b { "#t" } else { "#f" }),
            Value::F32(x) => write_real(f, (*x).into()),
            Value::F64(x) => write_real(f, *x),
            Value::C64(z) => {
                write_real(f, z.re)?;
                if !(z.im < 0. || z.im.is_infinite() || z.im.is_nan()) {
                    f.write_str("+")?;
                }
                write_real(f, z.im)?;
                f.write_str("i")
            }
            Value::Char(c) => match *c {
                ' ' => f.write_str("#\\space"),
                '\n' => f.write_str("#\\newline"),
                '\t' => f.write_str("#\\tab"),
                '\0' => f.write_str("#\\nul"),
                c => write!(f, "#\\{}", c),
            },
            Value::Array(a) => fmt::Display::fmt(a, f),
            Value::Object(h) => fmt::Display::fmt(&**h, f),
            Value::Unspecified => f.write_str("#<unspecified>"),
            v => match v.as_integer() {
                Some(i) => write!(f, "{}", i),
                None => Ok(()),
            },
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(x: $t) -> Value {
                    Value::$variant(x)
                }
            }
        )*
    };
}

value_from!(bool => Bool, u8 => U8, i8 => S8, u16 => U16, i16 => S16,
            u32 => U32, i32 => S32, u64 => U64, i64 => S64,
            f32 => F32, f64 => F64, Complex64 => C64, char => Char,
            ArrayView => Array);

impl From<HostRef> for Value {
    fn from(h: HostRef) -> Value {
        Value::Object(h)
    }
}

/// Indexed access to the typed contents of a storage.
///
/// Indices are validated by the caller.
pub trait ElementBuffer<A> {
    fn len(&self) -> usize;
    fn get(&self, index: usize) -> A;
    fn set(&mut self, index: usize, elem: A);
}

impl<A: Clone> ElementBuffer<A> for Vec<A> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> A {
        self[index].clone()
    }

    #[inline]
    fn set(&mut self, index: usize, elem: A) {
        self[index] = elem;
    }
}

impl ElementBuffer<bool> for BitVector {
    #[inline]
    fn len(&self) -> usize {
        BitVector::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        BitVector::get(self, index).unwrap_or(false)
    }

    #[inline]
    fn set(&mut self, index: usize, elem: bool) {
        BitVector::set(self, index, elem)
    }
}

/// A native element type and the storage variant holding it.
///
/// Implemented for `bool`, the fixed width integers, `f32`, `f64`,
/// `Complex64`, `char`, and `Value` (the generic kind).
pub trait Element: Clone + fmt::Debug + PartialEq + 'static {
    const KIND: ElementKind;
    type Buffer: ElementBuffer<Self>;

    fn default_elem() -> Self;
    fn from_value(v: &Value) -> Result<Self, ArrayError>;
    fn into_value(self) -> Value;

    fn buffer(data: &StorageData) -> Option<&Self::Buffer>;
    fn buffer_mut(data: &mut StorageData) -> Option<&mut Self::Buffer>;
    fn data_from_vec(v: Vec<Self>) -> StorageData;
    fn data_from_elem(len: usize, elem: Self) -> StorageData;
}

macro_rules! int_element {
    ($($t:ty => $kind:ident),*) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$kind;
                vec_buffer!($t, $kind);

                fn default_elem() -> Self {
                    0
                }

                fn from_value(v: &Value) -> Result<Self, ArrayError> {
                    let i = v.as_integer().ok_or_else(|| wrong_type(Self::KIND, v.type_name()))?;
                    <$t>::try_from(i).map_err(|_| {
                        out_of_range(i, <$t as Bounded>::min_value(), <$t as Bounded>::max_value())
                    })
                }

                #[inline]
                fn into_value(self) -> Value {
                    Value::$kind(self)
                }
            }
        )*
    };
}

int_element!(u8 => U8, i8 => S8, u16 => U16, i16 => S16,
             u32 => U32, i32 => S32, u64 => U64, i64 => S64);

impl Element for f32 {
    const KIND: ElementKind = ElementKind::F32;
    vec_buffer!(f32, F32);

    fn default_elem() -> Self {
        0.
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        match *v {
            Value::F32(x) => Ok(x),
            _ => v
                .as_real()
                .map(|x| x as f32)
                .ok_or_else(|| wrong_type(Self::KIND, v.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::F32(self)
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::F64;
    vec_buffer!(f64, F64);

    fn default_elem() -> Self {
        0.
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        v.as_real().ok_or_else(|| wrong_type(Self::KIND, v.type_name()))
    }

    fn into_value(self) -> Value {
        Value::F64(self)
    }
}

impl Element for Complex64 {
    const KIND: ElementKind = ElementKind::C64;
    vec_buffer!(Complex64, C64);

    fn default_elem() -> Self {
        Complex64::new(0., 0.)
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        v.as_complex().ok_or_else(|| wrong_type(Self::KIND, v.type_name()))
    }

    fn into_value(self) -> Value {
        Value::C64(self)
    }
}

impl Element for char {
    const KIND: ElementKind = ElementKind::Char;
    vec_buffer!(char, Char);

    fn default_elem() -> Self {
        '\0'
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        match *v {
            Value::Char(c) => Ok(c),
            _ => Err(wrong_type(Self::KIND, v.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::Char(self)
    }
}

impl Element for Value {
    const KIND: ElementKind = ElementKind::Generic;
    vec_buffer!(Value, Generic);

    fn default_elem() -> Self {
        Value::Unspecified
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        Ok(v.clone())
    }

    fn into_value(self) -> Value {
        self
    }
}

impl Element for bool {
    const KIND: ElementKind = ElementKind::Bool;
    type Buffer = BitVector;

    fn default_elem() -> Self {
        false
    }

    fn from_value(v: &Value) -> Result<Self, ArrayError> {
        match *v {
            Value::Bool(b) => Ok(b),
            _ => Err(wrong_type(Self::KIND, v.type_name())),
        }
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn buffer(data: &StorageData) -> Option<&BitVector> {
        match data {
            StorageData::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn buffer_mut(data: &mut StorageData) -> Option<&mut BitVector> {
        match data {
            StorageData::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn data_from_vec(v: Vec<bool>) -> StorageData {
        StorageData::Bool(v.into_iter().collect())
    }

    fn data_from_elem(len: usize, elem: bool) -> StorageData {
        StorageData::Bool(BitVector::from_elem(len, elem))
    }
}
