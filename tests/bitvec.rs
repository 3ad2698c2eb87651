use quickcheck::quickcheck;

use ndshare::bitvec::{find_position, invert, masked_count, masked_set, population_count};
use ndshare::{BitVector, ErrorKind, Selector};

fn bits(s: &str) -> BitVector {
    s.parse().unwrap()
}

#[test]
fn parse_and_print() {
    let v = bits("0110");
    assert_eq!(v.len(), 4);
    assert_eq!(v.get(1), Some(true));
    assert_eq!(v.get(4), None);
    assert_eq!(v.to_string(), "#*0110");
    assert_eq!("01x".parse::<BitVector>().unwrap_err().kind(), ErrorKind::BadContents);
}

#[test]
fn find_first_set() {
    assert_eq!(find_position(true, &bits("000101"), 0).unwrap(), Some(3));
    assert_eq!(find_position(false, &bits("0001111"), 3).unwrap(), None);
    assert_eq!(find_position(true, &bits("0001111"), 7).unwrap(), None);
    assert_eq!(find_position(true, &bits("01"), 3).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
fn find_across_words() {
    let mut v = BitVector::new(200);
    v.set(130, true);
    assert_eq!(find_position(true, &v, 1).unwrap(), Some(130));
    assert_eq!(find_position(true, &v, 131).unwrap(), None);
    invert(&mut v);
    assert_eq!(find_position(false, &v, 64).unwrap(), Some(130));
}

#[test]
fn set_by_indices() {
    let mut v = bits("01000010");
    masked_set(&mut v, Selector::Indices(&[5, 2, 7]), true).unwrap();
    assert_eq!(v, bits("01100111"));
}

#[test]
fn set_by_mask() {
    let mut v = bits("01000010");
    masked_set(&mut v, Selector::Mask(&bits("10010001")), true).unwrap();
    assert_eq!(v, bits("11010011"));
    masked_set(&mut v, Selector::Mask(&bits("11000000")), false).unwrap();
    assert_eq!(v, bits("00010011"));
}

#[test]
fn count_selected() {
    let v = bits("01110111");
    assert_eq!(masked_count(&v, Selector::Mask(&bits("11001101")), true).unwrap(), 3);
    assert_eq!(masked_count(&v, Selector::Indices(&[7, 0, 4]), false).unwrap(), 2);
}

#[test]
fn bad_selectors_change_nothing() {
    let mut v = bits("0000");
    let err = masked_set(&mut v, Selector::Mask(&bits("111")), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
    let err = masked_set(&mut v, Selector::Indices(&[1, 4]), true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(v, bits("0000"));
    assert_eq!(masked_count(&v, Selector::Indices(&[9]), true).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
fn invert_ignores_tail() {
    let mut v = bits("101");
    invert(&mut v);
    assert_eq!(v, bits("010"));
    assert_eq!(population_count(&v, true), 1);
    assert_eq!(population_count(&v, false), 2);
    assert_eq!(population_count(&BitVector::new(0), true), 0);
}

quickcheck! {
    fn population_counts_sum_to_len(v: Vec<bool>) -> bool {
        let n = v.iter().filter(|&&b| b).count();
        let bv: BitVector = v.iter().copied().collect();
        population_count(&bv, true) == n && population_count(&bv, false) == v.len() - n
    }

    fn from_words_counts_only_len_bits(words: Vec<u64>, len: usize) -> bool {
        let len = if words.is_empty() { 0 } else { len % (words.len() * 64 + 1) };
        let bv = BitVector::from_words(words, len);
        let set = bv.iter().filter(|&b| b).count();
        population_count(&bv, true) == set
            && population_count(&bv, false) == len - set
            && masked_count(&bv, Selector::Mask(&bv), true).unwrap() == set
            && bv == bv.iter().collect::<BitVector>()
    }

    fn find_matches_iterator(v: Vec<bool>, start: usize) -> bool {
        let bv: BitVector = v.iter().copied().collect();
        let start = if v.is_empty() { 0 } else { start % (v.len() + 1) };
        let expected = v.iter().skip(start).position(|&b| b).map(|p| p + start);
        find_position(true, &bv, start).unwrap() == expected
    }
}
