//! Histogram-family behavior: tagged edges, bare counts, and range-bound
//! sanitizing.

use dq_array::{OperandRef, ScalarBound, UnitArray};
use dq_dispatch::{ops, DispatchError};
use dq_units::{kilometer, meter, second};

fn tagged(values: &[f64], unit: dq_units::Unit) -> UnitArray {
    UnitArray::from_vec(values.to_vec(), unit)
}

#[test]
fn edges_carry_the_sample_unit_and_counts_are_bare() {
    let a = tagged(&[0.5, 1.5, 1.6, 2.5], meter());
    let range = Some((
        ScalarBound::tagged(0.0, meter()),
        ScalarBound::tagged(3.0, meter()),
    ));
    let (counts, edges) = ops::histogram(OperandRef::from(&a), 3, range).unwrap();
    assert_eq!(counts.as_slice().unwrap(), &[1.0, 2.0, 1.0]);
    assert_eq!(edges.unit(), &meter());
    assert_eq!(edges.data().as_slice().unwrap(), &[0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn range_bounds_convert_into_the_sample_unit() {
    // Samples in meters, bounds in kilometers: edges come out in meters.
    let a = tagged(&[100.0, 600.0, 900.0], meter());
    let range = Some((
        ScalarBound::tagged(0.0, kilometer()),
        ScalarBound::tagged(1.0, kilometer()),
    ));
    let (counts, edges) = ops::histogram(OperandRef::from(&a), 2, range).unwrap();
    assert_eq!(counts.as_slice().unwrap(), &[1.0, 2.0]);
    assert_eq!(edges.unit(), &meter());
    assert_eq!(edges.data().as_slice().unwrap(), &[0.0, 500.0, 1000.0]);
}

#[test]
fn a_bare_range_bound_is_an_error() {
    let a = tagged(&[1.0, 2.0], meter());
    let range = Some((ScalarBound::bare(0.0), ScalarBound::tagged(3.0, meter())));
    let err = ops::histogram(OperandRef::from(&a), 2, range).unwrap_err();
    assert!(matches!(err, DispatchError::MissingRangeUnit { .. }));
}

#[test]
fn an_incompatible_range_bound_is_a_conversion_error() {
    let a = tagged(&[1.0, 2.0], meter());
    let range = Some((
        ScalarBound::tagged(0.0, second()),
        ScalarBound::tagged(3.0, second()),
    ));
    let err = ops::histogram(OperandRef::from(&a), 2, range).unwrap_err();
    assert!(matches!(err, DispatchError::Units(_)));
}

#[test]
fn omitted_range_falls_back_to_data_extent() {
    let a = tagged(&[0.0, 1.0, 2.0, 3.0], meter());
    let (counts, edges) = ops::histogram(OperandRef::from(&a), 3, None).unwrap();
    assert_eq!(counts.iter().sum::<f64>(), 4.0);
    assert_eq!(edges.unit(), &meter());
    assert_eq!(edges.data().len(), 4);
}

#[test]
fn histogram2d_tags_each_edge_axis_with_its_own_unit() {
    let x = tagged(&[0.5, 1.5], meter());
    let y = tagged(&[0.5, 0.5], second());
    let ranges = Some(vec![
        (ScalarBound::tagged(0.0, meter()), ScalarBound::tagged(2.0, meter())),
        (ScalarBound::tagged(0.0, second()), ScalarBound::tagged(1.0, second())),
    ]);
    let (counts, xedges, yedges) =
        ops::histogram2d(OperandRef::from(&x), OperandRef::from(&y), 2, ranges).unwrap();
    assert_eq!(counts.shape(), &[2, 2]);
    assert_eq!(counts.iter().sum::<f64>(), 2.0);
    assert_eq!(xedges.unit(), &meter());
    assert_eq!(yedges.unit(), &second());
}

#[test]
fn histogramdd_returns_one_edge_array_per_dimension() {
    let x = tagged(&[0.1, 0.9], meter());
    let y = tagged(&[0.1, 0.9], second());
    let z = tagged(&[0.1, 0.9], kilometer());
    let out = ops::histogramdd(
        vec![
            OperandRef::from(&x),
            OperandRef::from(&y),
            OperandRef::from(&z),
        ],
        2,
        None,
    )
    .unwrap();
    assert_eq!(out.counts.shape(), &[2, 2, 2]);
    assert_eq!(out.edges.len(), 3);
    assert_eq!(out.edges[0].unit(), &meter());
    assert_eq!(out.edges[1].unit(), &second());
    assert_eq!(out.edges[2].unit(), &kilometer());
}
