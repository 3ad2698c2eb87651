// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binary transfer of view elements in native byte order.
//!
//! `start` and `end` select the half-open range of row-major element
//! positions to transfer. Complex elements are written as the real part
//! followed by the imaginary part, characters as their `u32` code point.
//! Packed booleans travel as whole 64-bit words, so for them `start` must
//! be a multiple of 64.
use std::io::{self, Read, Write};
use std::ops::Range;

use log::debug;

use crate::bitvec::WORD_BITS;
use crate::element::{Complex64, ElementKind};
use crate::elementwise;
use crate::error::{wrong_type, ArrayError};
use crate::storage::StorageData;
use crate::ArrayView;

trait NativeBytes: Sized {
    const SIZE: usize;
    fn put(&self, out: &mut Vec<u8>);
    fn take(bytes: &[u8]) -> Result<Self, ArrayError>;
}

macro_rules! native_bytes {
    ($($t:ty),*) => {
        $(
            impl NativeBytes for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                #[inline]
                fn put(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn take(bytes: &[u8]) -> Result<Self, ArrayError> {
                    let mut b = [0; std::mem::size_of::<$t>()];
                    b.copy_from_slice(bytes);
                    Ok(<$t>::from_ne_bytes(b))
                }
            }
        )*
    };
}

native_bytes!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl NativeBytes for Complex64 {
    const SIZE: usize = 16;

    fn put(&self, out: &mut Vec<u8>) {
        self.re.put(out);
        self.im.put(out);
    }

    fn take(bytes: &[u8]) -> Result<Self, ArrayError> {
        Ok(Complex64::new(f64::take(&bytes[..8])?, f64::take(&bytes[8..])?))
    }
}

impl NativeBytes for char {
    const SIZE: usize = 4;

    fn put(&self, out: &mut Vec<u8>) {
        u32::from(*self).put(out);
    }

    fn take(bytes: &[u8]) -> Result<Self, ArrayError> {
        let code = u32::take(bytes)?;
        char::from_u32(code)
            .ok_or_else(|| ArrayError::BadContents(format!("invalid character code {:#x}", code)))
    }
}

/// Evaluate `$body` with `$v` bound to the element vector of every
/// fixed-size kind; `$other` handles the remaining kinds.
macro_rules! with_native_vec {
    ($data:expr, $v:ident => $body:expr, $other:ident => $fallback:expr) => {
        match $data {
            StorageData::U8($v) => $body,
            StorageData::S8($v) => $body,
            StorageData::U16($v) => $body,
            StorageData::S16($v) => $body,
            StorageData::U32($v) => $body,
            StorageData::S32($v) => $body,
            StorageData::U64($v) => $body,
            StorageData::S64($v) => $body,
            StorageData::F32($v) => $body,
            StorageData::F64($v) => $body,
            StorageData::C64($v) => $body,
            StorageData::Char($v) => $body,
            $other => $fallback,
        }
    };
}

fn encode<T: NativeBytes>(elems: &[T], out: &mut Vec<u8>) {
    for x in elems {
        x.put(out);
    }
}

fn decode<T: NativeBytes>(bytes: &[u8], elems: &mut [T]) -> Result<(), ArrayError> {
    for (x, b) in elems.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
        *x = T::take(b)?;
    }
    Ok(())
}

/// Validate optional `start` and `end` against `len` elements.
fn element_range(start: Option<usize>, end: Option<usize>, len: usize) -> Result<Range<usize>, ArrayError> {
    let start_pos = match start {
        Some(s) if s >= len => {
            return Err(ArrayError::OutOfRange {
                value: s as i128,
                lower: 0,
                upper: len as i128 - 1,
            })
        }
        Some(s) => s,
        None => 0,
    };
    let end_pos = match end {
        Some(e) if e <= start_pos || e > len => {
            return Err(ArrayError::OutOfRange {
                value: e as i128,
                lower: start_pos as i128 + 1,
                upper: len as i128,
            })
        }
        Some(e) => e,
        None => len,
    };
    Ok(start_pos..end_pos)
}

fn element_size(view: &ArrayView) -> Result<usize, ArrayError> {
    view.kind()
        .byte_size()
        .ok_or_else(|| wrong_type("binary element kind", view.kind()))
}

fn check_word_start(kind: ElementKind, start: usize) -> Result<(), ArrayError> {
    if kind == ElementKind::Bool && start % WORD_BITS != 0 {
        return Err(ArrayError::OutOfRange {
            value: start as i128,
            lower: 0,
            upper: 0,
        });
    }
    Ok(())
}

/// Read elements of `view` from `reader`.
///
/// Reads until the selected range is filled or the reader reports end of
/// stream, and returns the number of whole elements stored. Elements
/// outside of what was read keep their values.
///
/// **Errors** with `UnexpectedEndOfStream` if the stream ends inside an
/// element, with `OutOfRange` for an invalid `start` or `end`, and with
/// `WrongType` for generic views.
///
/// ```rust
/// use ndshare::{io, ArrayView};
///
/// let v = ArrayView::from_vec(vec![0u16; 3]);
/// let bytes: Vec<u8> = [7u16, 8].iter().flat_map(|x| x.to_ne_bytes()).collect();
/// assert_eq!(io::read_into(&v, &mut &bytes[..], None, None).unwrap(), 2);
/// assert_eq!(v.to_vec::<u16>().unwrap(), vec![7, 8, 0]);
/// ```
pub fn read_into<R>(view: &ArrayView, reader: &mut R, start: Option<usize>, end: Option<usize>) -> Result<usize, ArrayError>
where
    R: Read + ?Sized,
{
    let size = element_size(view)?;
    let cra = view.to_contiguous(true)?;
    let range = element_range(start, end, cra.len())?;
    check_word_start(cra.kind(), range.start)?;

    let want = match cra.kind() {
        ElementKind::Bool => num_integer::Integer::div_ceil(&range.len(), &WORD_BITS) * size,
        _ => range.len() * size,
    };
    let mut bytes = vec![0; want];
    let got = fill_buf(reader, &mut bytes)?;
    let leftover = got % size;
    if leftover != 0 {
        return Err(ArrayError::UnexpectedEndOfStream { leftover });
    }
    bytes.truncate(got);

    let first = cra.base() as usize + range.start;
    let count = {
        let mut data = cra.storage.borrow_mut();
        with_native_vec!(&mut *data,
            v => {
                let n = got / size;
                decode(&bytes, &mut v[first..first + n])?;
                n
            },
            other => match other {
                StorageData::Bool(bits) => {
                    let n = (got / size * WORD_BITS).min(range.len());
                    for (k, w) in bytes.chunks_exact(size).enumerate() {
                        let w = u64::take(w)?;
                        for b in 0..WORD_BITS {
                            let e = k * WORD_BITS + b;
                            if e < n {
                                bits.set(first + e, w >> b & 1 == 1);
                            }
                        }
                    }
                    n
                }
                _ => return Err(wrong_type("binary element kind", view.kind())),
            }
        )
    };
    if count < range.len() {
        debug!("read_into: short read of {} of {} elements", count, range.len());
    }
    if !cra.shares_storage(view) {
        elementwise::copy(&cra, view)?;
    }
    Ok(count)
}

fn fill_buf<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<usize, ArrayError> {
    let mut got = 0;
    while got < buf.len() {
        match reader.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(got)
}

/// Write elements of `view` to `writer` and return the number written.
///
/// **Errors** with `OutOfRange` for an invalid `start` or `end`, and with
/// `WrongType` for generic views.
pub fn write_from<W>(view: &ArrayView, writer: &mut W, start: Option<usize>, end: Option<usize>) -> Result<usize, ArrayError>
where
    W: Write + ?Sized,
{
    element_size(view)?;
    let cra = view.to_contiguous(true)?;
    let range = element_range(start, end, cra.len())?;
    check_word_start(cra.kind(), range.start)?;

    let first = cra.base() as usize + range.start;
    let last = cra.base() as usize + range.end;
    let mut bytes = Vec::new();
    {
        let data = cra.storage.borrow();
        with_native_vec!(&*data,
            v => encode(&v[first..last], &mut bytes),
            other => match other {
                StorageData::Bool(bits) => {
                    for w0 in (first..last).step_by(WORD_BITS) {
                        let mut w = 0u64;
                        for e in w0..(w0 + WORD_BITS).min(last) {
                            if bits.get(e) == Some(true) {
                                w |= 1u64 << (e - w0);
                            }
                        }
                        w.put(&mut bytes);
                    }
                }
                _ => return Err(wrong_type("binary element kind", view.kind())),
            }
        )
    }
    writer.write_all(&bytes)?;
    Ok(range.len())
}
