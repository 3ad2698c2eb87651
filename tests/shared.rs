use defmac::defmac;
use itertools::iproduct;
use quickcheck::quickcheck;

use ndshare::{make_shared_view, ArrayView, DimSpec, ElementKind, ErrorKind, Storage, Value};

fn a23() -> ArrayView {
    ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(3)], vec![1, 2, 3, 4, 5, 6]).unwrap()
}

#[test]
fn transpose_by_map() {
    let a = a23();
    let t = make_shared_view(&a, |c| vec![c[1], c[0]], &[DimSpec::Len(3), DimSpec::Len(2)]).unwrap();
    assert_eq!(t.to_vec::<i32>().unwrap(), vec![1, 4, 2, 5, 3, 6]);
    assert_eq!(t, a.transpose_axes(&[1, 0]).unwrap());
    assert!(!t.is_contiguous());
    assert!(t.shares_storage(&a));
}

#[test]
fn shift_lower_bounds() {
    let a = a23();
    let s = make_shared_view(&a, |c| vec![c[0] - 1, c[1] - 10], &[DimSpec::Bounds(1, 2), DimSpec::Bounds(10, 12)]).unwrap();
    assert_eq!(s.get(&[2, 11]).unwrap(), Value::S32(5));
    assert_eq!(s.base(), 0);
    assert!(s.is_contiguous());
    let back = make_shared_view(&s, |c| vec![c[0] + 1, c[1] + 10], &[DimSpec::Len(2), DimSpec::Len(3)]).unwrap();
    assert_eq!(back, a);
}

#[test]
fn split_vector_into_matrix() {
    let v = ArrayView::from_vec((0..12).collect::<Vec<u8>>());
    let m = make_shared_view(&v, |c| vec![4 * c[0] + c[1]], &[DimSpec::Len(3), DimSpec::Len(4)]).unwrap();
    assert_eq!(m.strides(), vec![4, 1]);
    assert!(m.is_contiguous());
    assert_eq!(m.get(&[2, 1]).unwrap(), Value::U8(9));
}

#[test]
fn column_write_through() {
    let a = ArrayView::new(ElementKind::Generic, &[DimSpec::Len(3), DimSpec::Len(3)]).unwrap();
    let col = make_shared_view(&a, |c| vec![c[0], 1], &[DimSpec::Len(3)]).unwrap();
    ndshare::elementwise::fill(&col, 'x').unwrap();
    for (i, j) in iproduct!(0..3, 0..3) {
        let expected = if j == 1 { Value::Char('x') } else { Value::Unspecified };
        assert_eq!(a.get(&[i, j]).unwrap(), expected);
    }
}

#[test]
fn map_outside_source() {
    let a = a23();
    let err = make_shared_view(&a, |c| vec![c[0], c[0] + 3], &[DimSpec::Len(2)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    // every sample is inside, but the strides reach past the end
    let s = Storage::new(ElementKind::F64, 4);
    let err = make_shared_view(&s, |c| vec![3 * c[0]], &[DimSpec::Len(3)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MappingOutOfRange);
}

#[test]
fn nested_shared_views_respect_their_window() {
    let v = ArrayView::from_vec((0..10).collect::<Vec<i16>>());
    let window = make_shared_view(&v, |c| vec![c[0] + 3], &[DimSpec::Len(4)]).unwrap();
    // step outside the window (but inside the storage)
    let err = make_shared_view(&window, |c| vec![c[0] * 2], &[DimSpec::Len(3)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MappingOutOfRange);
    let odd = make_shared_view(&window, |c| vec![2 * c[0] + 1], &[DimSpec::Len(2)]).unwrap();
    assert_eq!(odd.to_vec::<i16>().unwrap(), vec![4, 6]);
}

#[test]
fn empty_requested_axes() {
    defmac!(empty dims => {
        let a = a23();
        let e = make_shared_view(&a, |_| vec![100, 100], dims).unwrap();
        assert!(e.is_empty());
        assert!(e.shares_storage(&a));
    });
    empty!(&[DimSpec::Len(0)]);
    empty!(&[DimSpec::Len(4), DimSpec::Len(0)]);
    empty!(&[DimSpec::Bounds(5, 4), DimSpec::Len(2)]);
}

quickcheck! {
    fn slices_agree_with_source(rows: u8, cols: u8, r0: u8, c0: u8) -> bool {
        let (rows, cols) = (rows as usize % 6 + 1, cols as usize % 6 + 1);
        let (r0, c0) = (r0 as i64 % rows as i64, c0 as i64 % cols as i64);
        let n = (rows * cols) as i32;
        let a = ArrayView::from_shape_vec(&[DimSpec::Len(rows), DimSpec::Len(cols)], (0..n).collect::<Vec<i32>>()).unwrap();
        let h = rows as i64 - r0;
        let w = cols as i64 - c0;
        let s = make_shared_view(&a, |c| vec![c[0] + r0, c[1] + c0], &[DimSpec::Len(h as usize), DimSpec::Len(w as usize)]).unwrap();
        iproduct!(0..h, 0..w).all(|(i, j)| s.get(&[i, j]).unwrap() == a.get(&[i + r0, j + c0]).unwrap())
    }

    fn reversal_is_an_involution(len: u8) -> bool {
        let len = len as usize % 20 + 1;
        let n = len as i64;
        let v = ArrayView::from_vec((0..n).collect::<Vec<i64>>());
        let r = make_shared_view(&v, |c| vec![n - 1 - c[0]], &[DimSpec::Len(len)]).unwrap();
        let rr = make_shared_view(&r, |c| vec![n - 1 - c[0]], &[DimSpec::Len(len)]).unwrap();
        rr == v && rr.base() == 0 && rr.strides() == vec![1]
    }
}
