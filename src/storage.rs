// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::bitvec::BitVector;
use crate::element::{Complex64, Element, ElementBuffer, ElementKind, Value};
use crate::error::{index_out_of_range, wrong_type, ArrayError};

/// The typed contents of a storage.
#[derive(Clone, Debug)]
pub enum StorageData {
    Generic(Vec<Value>),
    Bool(BitVector),
    U8(Vec<u8>),
    S8(Vec<i8>),
    U16(Vec<u16>),
    S16(Vec<i16>),
    U32(Vec<u32>),
    S32(Vec<i32>),
    U64(Vec<u64>),
    S64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex64>),
    Char(Vec<char>),
}

impl StorageData {
    pub fn kind(&self) -> ElementKind {
        match self {
            StorageData::Generic(_) => ElementKind::Generic,
            StorageData::Bool(_) => ElementKind::Bool,
            StorageData::U8(_) => ElementKind::U8,
            StorageData::S8(_) => ElementKind::S8,
            StorageData::U16(_) => ElementKind::U16,
            StorageData::S16(_) => ElementKind::S16,
            StorageData::U32(_) => ElementKind::U32,
            StorageData::S32(_) => ElementKind::S32,
            StorageData::U64(_) => ElementKind::U64,
            StorageData::S64(_) => ElementKind::S64,
            StorageData::F32(_) => ElementKind::F32,
            StorageData::F64(_) => ElementKind::F64,
            StorageData::C64(_) => ElementKind::C64,
            StorageData::Char(_) => ElementKind::Char,
        }
    }

    pub fn len(&self) -> usize {
        with_element_type!(self.kind(), A => A::buffer(self).map_or(0, |b| b.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A flat, fixed-size buffer of one element kind, shared by every view
/// over it.
///
/// Cloning a `Storage` clones the handle; all clones see the same contents.
/// The kind and length never change after creation.
#[derive(Clone)]
pub struct Storage {
    kind: ElementKind,
    len: usize,
    data: Rc<RefCell<StorageData>>,
}

impl Storage {
    /// Allocate `len` elements of `kind`, filled with zero, `false`, NUL,
    /// or `Value::Unspecified`.
    pub fn new(kind: ElementKind, len: usize) -> Storage {
        let data = with_element_type!(kind, A => A::data_from_elem(len, A::default_elem()));
        Storage::from_data(data)
    }

    pub fn from_data(data: StorageData) -> Storage {
        Storage {
            kind: data.kind(),
            len: data.len(),
            data: Rc::new(RefCell::new(data)),
        }
    }

    pub fn from_vec<A: Element>(v: Vec<A>) -> Storage {
        Storage::from_data(A::data_from_vec(v))
    }

    pub fn from_bits(bits: BitVector) -> Storage {
        Storage::from_data(StorageData::Bool(bits))
    }

    #[inline]
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` and `other` are handles to the same buffer.
    pub fn ptr_eq(&self, other: &Storage) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn check_index(&self, index: usize) -> Result<(), ArrayError> {
        if index < self.len {
            Ok(())
        } else {
            Err(index_out_of_range(index, self.len))
        }
    }

    pub fn get(&self, index: usize) -> Result<Value, ArrayError> {
        self.check_index(index)?;
        with_element_type!(self.kind, A => self.get_typed::<A>(index).map(Element::into_value))
    }

    /// Store `value`, converting it to the storage's kind.
    pub fn set(&self, index: usize, value: &Value) -> Result<(), ArrayError> {
        self.check_index(index)?;
        with_element_type!(self.kind, A => self.set_typed::<A>(index, A::from_value(value)?))
    }

    pub(crate) fn get_typed<A: Element>(&self, index: usize) -> Result<A, ArrayError> {
        let data = self.borrow();
        A::buffer(&data)
            .map(|b| b.get(index))
            .ok_or_else(|| wrong_type(A::KIND, self.kind))
    }

    pub(crate) fn set_typed<A: Element>(&self, index: usize, elem: A) -> Result<(), ArrayError> {
        let mut data = self.borrow_mut();
        match A::buffer_mut(&mut data) {
            Some(b) => {
                b.set(index, elem);
                Ok(())
            }
            None => Err(wrong_type(A::KIND, self.kind)),
        }
    }

    pub(crate) fn borrow(&self) -> Ref<'_, StorageData> {
        self.data.borrow()
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, StorageData> {
        self.data.borrow_mut()
    }

    /// Borrow the packed bits of a boolean storage.
    ///
    /// The borrow must be released before the storage is accessed again.
    pub fn bits(&self) -> Result<Ref<'_, BitVector>, ArrayError> {
        Ref::filter_map(self.data.borrow(), |d| match d {
            StorageData::Bool(b) => Some(b),
            _ => None,
        })
        .map_err(|_| wrong_type(ElementKind::Bool, self.kind))
    }

    pub fn bits_mut(&self) -> Result<RefMut<'_, BitVector>, ArrayError> {
        RefMut::filter_map(self.data.borrow_mut(), |d| match d {
            StorageData::Bool(b) => Some(b),
            _ => None,
        })
        .map_err(|_| wrong_type(ElementKind::Bool, self.kind))
    }

    /// Copy out the whole contents.
    pub fn to_data(&self) -> StorageData {
        self.borrow().clone()
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("kind", &self.kind)
            .field("len", &self.len)
            .finish()
    }
}
