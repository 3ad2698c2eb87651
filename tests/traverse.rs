use ndshare::{make_shared_view, traverse, ArrayView, DimSpec, ElementKind, ErrorKind};

fn range_view(shape: &[usize]) -> ArrayView {
    let n = shape.iter().product::<usize>() as i32;
    let dims: Vec<DimSpec> = shape.iter().map(|&s| DimSpec::Len(s)).collect();
    ArrayView::from_shape_vec(&dims, (0..n).collect::<Vec<i32>>()).unwrap()
}

#[test]
fn empty_traversal_calls_nothing() {
    let a = ArrayView::new(ElementKind::S32, &[DimSpec::Len(3), DimSpec::Len(0)]).unwrap();
    let b = ArrayView::new(ElementKind::S32, &[DimSpec::Len(3), DimSpec::Len(0)]).unwrap();
    let mut calls = 0;
    assert!(traverse(&a, &[&b], |_, _| {
        calls += 1;
        true
    })
    .unwrap());
    assert_eq!(calls, 0);

    let c = ArrayView::new(ElementKind::S32, &[DimSpec::Len(0), DimSpec::Len(3)]).unwrap();
    assert!(traverse(&c, &[], |_, _| {
        calls += 1;
        true
    })
    .unwrap());
    assert_eq!(calls, 0);
}

#[test]
fn rank_mismatch() {
    let a = range_view(&[2, 3]);
    let b = range_view(&[6]);
    let err = traverse(&a, &[&a, &b], |_, _| true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    match err {
        ndshare::ArrayError::ShapeMismatch { operand, .. } => assert_eq!(operand, 2),
        e => panic!("unexpected {}", e),
    }
}

#[test]
fn source_must_cover_destination() {
    let a = range_view(&[2, 3]);
    let small = range_view(&[2, 2]);
    assert_eq!(traverse(&a, &[&small], |_, _| true).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    let shifted = ArrayView::new(ElementKind::S32, &[DimSpec::Len(2), DimSpec::Bounds(1, 3)]).unwrap();
    assert_eq!(traverse(&a, &[&shifted], |_, _| true).unwrap_err().kind(), ErrorKind::ShapeMismatch);

    // larger sources are fine
    let big = range_view(&[3, 4]);
    assert!(traverse(&a, &[&big], |_, _| true).unwrap());
}

#[test]
fn early_stop() {
    let a = range_view(&[4, 3]);
    let t = a.transpose_axes(&[1, 0]).unwrap();
    let mut calls = 0;
    let done = traverse(&t, &[], |_, _| {
        calls += 1;
        calls < 2
    })
    .unwrap();
    assert!(!done);
    assert_eq!(calls, 2);
}

#[test]
fn blocks_align_by_coordinates() {
    // destination is the centre of the source
    let src = range_view(&[4, 4]);
    let dest = ArrayView::new(ElementKind::S32, &[DimSpec::Bounds(1, 2), DimSpec::Bounds(1, 2)]).unwrap();
    let mut seen = Vec::new();
    traverse(&dest, &[&src], |d, s| {
        assert_eq!(d.len(), s[0].len());
        for n in 0..d.len() as i64 {
            seen.push(s[0].get(&[n]).unwrap().as_integer().unwrap());
        }
        true
    })
    .unwrap();
    assert_eq!(seen, vec![5, 6, 9, 10]);
}

#[test]
fn outer_axes_last_fastest() {
    let a = range_view(&[2, 3, 2]);
    let t = a.transpose_axes(&[2, 1, 0]).unwrap();
    let mut firsts = Vec::new();
    traverse(&t, &[], |d, _| {
        firsts.push(d.get(&[0]).unwrap().as_integer().unwrap());
        true
    })
    .unwrap();
    // t has shape (2, 3, 2) with strides (1, 2, 6): only the last axis is a block
    assert_eq!(firsts, vec![0, 2, 4, 1, 3, 5]);
}

#[test]
fn negative_strides() {
    let a = range_view(&[6]);
    let r = make_shared_view(&a, |c| vec![5 - c[0]], &[DimSpec::Len(6)]).unwrap();
    let mut got = Vec::new();
    traverse(&r, &[&a], |d, s| {
        for n in 0..d.len() as i64 {
            got.push((
                d.get(&[n]).unwrap().as_integer().unwrap(),
                s[0].get(&[n]).unwrap().as_integer().unwrap(),
            ));
        }
        true
    })
    .unwrap();
    assert_eq!(got, vec![(5, 0), (4, 1), (3, 2), (2, 3), (1, 4), (0, 5)]);
}
