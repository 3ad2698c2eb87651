// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Packed bit vectors and their bulk primitives.
//!
//! A [`BitVector`] stores one bit per element in 64-bit words, element `i`
//! in bit `i % 64` of word `i / 64`. The unused high bits of the final word
//! hold unspecified values and every primitive masks them out.
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use num_integer::Integer;

use crate::error::{index_out_of_range, ArrayError};

/// Number of elements packed into one storage word.
pub const WORD_BITS: usize = 64;

/// Set bits in each value of a nibble.
const NIBBLE_COUNT: [usize; 16] = [0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4];

#[inline]
fn count_word(mut w: u64) -> usize {
    let mut c = 0;
    while w != 0 {
        c += NIBBLE_COUNT[(w & 0xf) as usize];
        w >>= 4;
    }
    c
}

/// Mask of the in-range bits of the last word of a vector of `len` bits.
#[inline]
fn tail_mask(len: usize) -> u64 {
    match len % WORD_BITS {
        0 => !0,
        r => (1u64 << r) - 1,
    }
}

#[inline]
fn words_for(len: usize) -> usize {
    Integer::div_ceil(&len, &WORD_BITS)
}

/// A packed vector of booleans.
#[derive(Clone, Default)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    /// Create a vector of `len` clear bits.
    pub fn new(len: usize) -> Self {
        Self::from_elem(len, false)
    }

    /// Create a vector of `len` bits all equal to `bit`.
    pub fn from_elem(len: usize, bit: bool) -> Self {
        let fill = if bit { !0 } else { 0 };
        BitVector {
            words: vec![fill; words_for(len)],
            len,
        }
    }

    /// Create a vector from raw storage words.
    ///
    /// Words past the `ceil(len / 64)` needed to hold `len` bits are dropped.
    ///
    /// **Panics** if `words` cannot hold `len` bits.
    pub fn from_words(mut words: Vec<u64>, len: usize) -> Self {
        let n = words_for(len);
        assert!(words.len() >= n, "too few words for {} bits", len);
        words.truncate(n);
        BitVector { words, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The storage words. Bits past `len` in the last word are unspecified.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// Return the bit at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index < self.len {
            Some(self.words[index / WORD_BITS] >> (index % WORD_BITS) & 1 == 1)
        } else {
            None
        }
    }

    /// Set the bit at `index`.
    ///
    /// **Panics** if `index` is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) {
        assert!(index < self.len, "bit index {} out of bounds for length {}", index, self.len);
        let word = &mut self.words[index / WORD_BITS];
        let mask = 1u64 << (index % WORD_BITS);
        if bit {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.words[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1)
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        if self.len == 0 {
            return true;
        }
        let n = self.words.len();
        self.words[..n - 1] == other.words[..n - 1]
            && (self.words[n - 1] ^ other.words[n - 1]) & tail_mask(self.len) == 0
    }
}

impl Eq for BitVector {}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in iter {
            if len % WORD_BITS == 0 {
                words.push(0);
            }
            if bit {
                if let Some(w) = words.last_mut() {
                    *w |= 1u64 << (len % WORD_BITS);
                }
            }
            len += 1;
        }
        BitVector { words, len }
    }
}

/// Parse a string of `0` and `1` characters; character `i` becomes bit `i`.
impl FromStr for BitVector {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                c => Err(ArrayError::BadContents(format!(
                    "invalid character {:?} in bit string",
                    c
                ))),
            })
            .collect()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#*")?;
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Selection of positions for [`masked_set`] and [`masked_count`].
#[derive(Copy, Clone, Debug)]
pub enum Selector<'a> {
    /// Positions where the mask holds a set bit; the mask must have the
    /// same length as the target.
    Mask(&'a BitVector),
    /// Explicit element indices.
    Indices(&'a [usize]),
}

impl<'a> Selector<'a> {
    fn check(&self, v: &BitVector) -> Result<(), ArrayError> {
        match *self {
            Selector::Mask(mask) => {
                if mask.len() != v.len() {
                    return Err(ArrayError::LengthMismatch {
                        expected: v.len(),
                        found: mask.len(),
                    });
                }
            }
            Selector::Indices(indices) => {
                if let Some(&i) = indices.iter().find(|&&i| i >= v.len()) {
                    return Err(index_out_of_range(i, v.len()));
                }
            }
        }
        Ok(())
    }
}

/// Count the bits of `v` equal to `polarity`.
pub fn population_count(v: &BitVector, polarity: bool) -> usize {
    if v.len == 0 {
        return 0;
    }
    let n = v.words.len();
    let flip = if polarity { 0 } else { !0 };
    let mut count = 0;
    for &w in &v.words[..n - 1] {
        count += count_word(w ^ flip);
    }
    let last = (v.words[n - 1] ^ flip) << (WORD_BITS - 1 - (v.len - 1) % WORD_BITS);
    count + count_word(last)
}

/// Return the index of the first element equal to `item` at or after `start`.
///
/// `start == v.len()` is allowed and finds nothing; a larger `start` is an
/// `OutOfRange` error.
pub fn find_position(item: bool, v: &BitVector, start: usize) -> Result<Option<usize>, ArrayError> {
    if start > v.len {
        return Err(ArrayError::OutOfRange {
            value: start as i128,
            lower: 0,
            upper: v.len as i128,
        });
    }
    if start == v.len {
        return Ok(None);
    }
    let first = start / WORD_BITS;
    let last = (v.len - 1) / WORD_BITS;
    let flip = if item { 0 } else { !0 };
    for wi in first..=last {
        let mut w = v.words[wi] ^ flip;
        if wi == first {
            w &= !0u64 << (start % WORD_BITS);
        }
        if wi == last {
            w &= tail_mask(v.len);
        }
        if w != 0 {
            return Ok(Some(wi * WORD_BITS + w.trailing_zeros() as usize));
        }
    }
    Ok(None)
}

/// Set every position of `v` selected by `keys` to `value`.
///
/// All keys are validated before anything is written.
pub fn masked_set(v: &mut BitVector, keys: Selector<'_>, value: bool) -> Result<(), ArrayError> {
    keys.check(v)?;
    match keys {
        Selector::Mask(mask) => {
            for (w, &m) in v.words.iter_mut().zip(&mask.words) {
                if value {
                    *w |= m;
                } else {
                    *w &= !m;
                }
            }
        }
        Selector::Indices(indices) => {
            for &i in indices {
                v.set(i, value);
            }
        }
    }
    Ok(())
}

/// Count the positions of `v` selected by `keys` whose bit equals `value`.
///
/// Repeated explicit indices are counted once per occurrence.
pub fn masked_count(v: &BitVector, keys: Selector<'_>, value: bool) -> Result<usize, ArrayError> {
    keys.check(v)?;
    let count = match keys {
        Selector::Mask(_) if v.len == 0 => 0,
        Selector::Mask(mask) => {
            let flip = if value { 0 } else { !0 };
            let n = v.words.len();
            v.words
                .iter()
                .zip(&mask.words)
                .enumerate()
                .map(|(i, (&w, &m))| {
                    let mut sel = (w ^ flip) & m;
                    if i + 1 == n {
                        sel &= tail_mask(v.len);
                    }
                    count_word(sel)
                })
                .sum()
        }
        Selector::Indices(indices) => indices
            .iter()
            .filter(|&&i| v.get(i) == Some(value))
            .count(),
    };
    Ok(count)
}

/// Negate every element of `v` in place.
pub fn invert(v: &mut BitVector) {
    for w in &mut v.words {
        *w = !*w;
    }
}
