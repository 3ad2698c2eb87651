use itertools::iproduct;
use quickcheck::quickcheck;

use ndshare::{make_shared_view, ArrayView, DimSpec, ElementKind, Value};

fn a23() -> ArrayView {
    ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(3)], vec![1, 2, 3, 4, 5, 6]).unwrap()
}

#[test]
fn flatten_dense() {
    let a = a23();
    let f = a.flatten(true).unwrap();
    assert_eq!(f.rank(), 1);
    assert_eq!(f.to_vec::<i32>().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    assert!(f.shares_storage(&a));
}

#[test]
fn flatten_transposed() {
    let t = a23().transpose_axes(&[1, 0]).unwrap();
    assert!(t.flatten(true).is_none());
    assert!(t.flatten(false).is_none());
}

#[test]
fn flatten_every_other_column() {
    let a = ArrayView::from_shape_vec(&[DimSpec::Len(2), DimSpec::Len(4)], (0..8).collect::<Vec<u32>>()).unwrap();
    let v = ArrayView::from_vec((0..8).collect::<Vec<u32>>());
    let odd = make_shared_view(&v, |c| vec![2 * c[0] + 1], &[DimSpec::Len(4)]).unwrap();
    assert!(odd.flatten(true).is_none());
    assert_eq!(odd.flatten(false).unwrap().to_vec::<u32>().unwrap(), vec![1, 3, 5, 7]);
    let cols = make_shared_view(&a, |c| vec![c[0], 2 * c[1]], &[DimSpec::Len(2), DimSpec::Len(2)]).unwrap();
    assert!(cols.is_contiguous());
    assert!(cols.flatten(true).is_none());
    assert_eq!(cols.flatten(false).unwrap().to_vec::<u32>().unwrap(), vec![0, 2, 4, 6]);
}

#[test]
fn flatten_rank_zero() {
    let s = ArrayView::scalar(1.5f32).unwrap();
    let f = s.flatten(true).unwrap();
    assert_eq!(f.shape(), vec![1]);
    assert_eq!(f.get(&[0]).unwrap(), Value::F32(1.5));
}

#[test]
fn to_contiguous_keeps_dense_views() {
    let a = a23();
    let c = a.to_contiguous(false).unwrap();
    assert!(c.shares_storage(&a));
}

#[test]
fn to_contiguous_copies_strided_views() {
    let a = ArrayView::new(ElementKind::S64, &[DimSpec::Bounds(1, 3), DimSpec::Len(2)]).unwrap();
    ndshare::elementwise::index_map(&a, |c| Value::S64(10 * c[0] + c[1])).unwrap();
    let t = a.transpose_axes(&[1, 0]).unwrap();
    let c = t.to_contiguous(true).unwrap();
    assert!(!c.shares_storage(&t));
    assert_eq!(c.dims()[1].bounds(), (1, 3));
    assert!(c.flatten(true).is_some());
    assert_eq!(c, t);

    let blank = t.to_contiguous(false).unwrap();
    assert_eq!(blank.to_vec::<i64>().unwrap(), vec![0; 6]);
}

/// Row-major position of `coords` within `dims`.
fn flattened_index(view: &ArrayView, coords: &[i64]) -> i64 {
    view.dims()
        .iter()
        .zip(coords)
        .fold(0, |acc, (d, &c)| acc * d.len() as i64 + (c - d.lower))
}

quickcheck! {
    fn flatten_preserves_linear_index(rows: u8, cols: u8, lower: i8, reverse: bool) -> bool {
        let (rows, cols) = (rows as usize % 5 + 1, cols as usize % 5 + 1);
        let lower = lower as i64;
        let base = ArrayView::new(ElementKind::U8, &[DimSpec::Len(rows), DimSpec::Len(cols)]).unwrap();
        let r = rows as i64 - 1;
        let v = make_shared_view(&base, |c| {
            let i = c[0] - lower;
            vec![if reverse { r - i } else { i }, c[1]]
        }, &[DimSpec::Bounds(lower, lower + r), DimSpec::Len(cols)]).unwrap();
        match v.flatten(true) {
            // a reversed outer axis breaks row-major density
            None => reverse && rows > 1,
            Some(f) => iproduct!(lower..=lower + r, 0..cols as i64).all(|(i, j)| {
                v.linear_index(&[i, j]).unwrap() == f.linear_index(&[flattened_index(&v, &[i, j])]).unwrap()
            }),
        }
    }
}

#[test]
fn packed_views_flatten_strictly_only_on_whole_words() {
    let dense = ArrayView::new(ElementKind::Bool, &[DimSpec::Len(2), DimSpec::Len(3)]).unwrap();
    assert!(dense.flatten(true).is_none());
    assert!(dense.flatten(false).is_some());
    let c = dense.to_contiguous(false).unwrap();
    assert!(!c.shares_storage(&dense));

    let vector = ArrayView::new(ElementKind::Bool, &[DimSpec::Len(6)]).unwrap();
    assert!(vector.flatten(true).is_some());
    let words = ArrayView::new(ElementKind::Bool, &[DimSpec::Len(2), DimSpec::Len(128)]).unwrap();
    assert!(words.flatten(true).is_some());
}
