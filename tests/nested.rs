use ndshare::nested::{from_nested_inferred, from_nested_list, to_nested_list, Nested};
use ndshare::{ArrayView, DimSpec, ElementKind, ErrorKind, Value};

fn rows() -> Nested {
    Nested::List(vec![Nested::items(vec![1, 2, 3]), Nested::items(vec![4, 5, 6])])
}

#[test]
fn nested_round_trip() {
    let a = from_nested_list(&[DimSpec::Len(2), DimSpec::Len(3)], ElementKind::S16, &rows()).unwrap();
    assert_eq!(a.to_vec::<i16>().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    let back = to_nested_list(&a).unwrap();
    let expected = Nested::List(vec![
        Nested::items(vec![1i16, 2, 3]),
        Nested::items(vec![4i16, 5, 6]),
    ]);
    assert_eq!(back, expected);
}

#[test]
fn nested_list_of_transposed_view() {
    let a = from_nested_list(&[DimSpec::Len(2), DimSpec::Len(3)], ElementKind::S32, &rows()).unwrap();
    let t = a.reversed_axes();
    let expected = Nested::List(vec![
        Nested::items(vec![1, 4]),
        Nested::items(vec![2, 5]),
        Nested::items(vec![3, 6]),
    ]);
    assert_eq!(to_nested_list(&t).unwrap(), expected);
}

#[test]
fn nesting_must_match_the_axes() {
    let dims = [DimSpec::Len(2), DimSpec::Len(3)];
    let flat = Nested::items(vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(from_nested_list(&dims, ElementKind::S32, &flat).unwrap_err().kind(), ErrorKind::BadContents);
    let deep = Nested::List(vec![Nested::List(vec![rows()])]);
    let err = from_nested_list(&[DimSpec::Len(1)], ElementKind::Generic, &deep).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadContents);
    let short = Nested::List(vec![Nested::items(vec![1, 2, 3])]);
    assert_eq!(from_nested_list(&dims, ElementKind::S32, &short).unwrap_err().kind(), ErrorKind::BadContents);
}

#[test]
fn items_are_converted_to_the_kind() {
    let a = from_nested_list(&[DimSpec::Len(2)], ElementKind::F64, &Nested::items(vec![1, 2])).unwrap();
    assert_eq!(a.to_vec::<f64>().unwrap(), vec![1., 2.]);
    let err = from_nested_list(&[DimSpec::Len(1)], ElementKind::U8, &Nested::items(vec![300])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn inferred_bounds() {
    let a = from_nested_inferred(ElementKind::S32, &[1, -1], &rows()).unwrap();
    assert_eq!(a.dims()[0].bounds(), (1, 2));
    assert_eq!(a.dims()[1].bounds(), (-1, 1));
    assert_eq!(a.get(&[2, 1]).unwrap(), Value::S32(6));
}

#[test]
fn inferred_from_empty_list() {
    let a = from_nested_inferred(ElementKind::U8, &[0, 3], &Nested::List(vec![])).unwrap();
    assert_eq!(a.shape(), vec![0, 0]);
    assert_eq!(a.dims()[1].bounds(), (3, 2));
    assert_eq!(to_nested_list(&a).unwrap(), Nested::List(vec![]));
}

#[test]
fn generic_items_may_be_arrays() {
    let inner = ArrayView::from_vec(vec![1u8]);
    let list = Nested::List(vec![Nested::Item(Value::Array(inner.clone())), Nested::Item(Value::Char('x'))]);
    let a = from_nested_inferred(ElementKind::Generic, &[0], &list).unwrap();
    assert_eq!(a.get(&[0]).unwrap(), Value::Array(inner));
}
