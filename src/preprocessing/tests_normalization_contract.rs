// =========================================================================
// Min-Max normalization contract
//
// Every fitted feature lands in [feature_min, feature_max], the observed
// extremes map exactly onto the bounds, and inverse_transform undoes it.
// =========================================================================

use super::*;
use proptest::prelude::*;

fn prices() -> Matrix<f64> {
    Matrix::from_rows(&[
        [11_500.0, 27_000.0, 120_000.0],
        [12_000.0, 26_000.0, 125_000.0],
        [13_500.0, 28_000.0, 118_000.0],
        [12_500.0, 27_500.0, 130_000.0],
    ])
    .expect("valid matrix")
}

#[test]
fn minmax_output_is_bounded_with_exact_extremes() {
    let x = prices();
    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&x).expect("fit_transform");

    for j in 0..x.n_cols() {
        let column = scaled.column(j);
        assert!(column.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(column.iter().any(|&v| v == 0.0), "column {j} has no 0");
        assert!(column.iter().any(|&v| (v - 1.0).abs() < 1e-12), "column {j} has no 1");
    }
    assert_eq!(scaler.data_min().expect("fitted"), &[11_500.0, 26_000.0, 118_000.0]);
    assert_eq!(scaler.data_max().expect("fitted"), &[13_500.0, 28_000.0, 130_000.0]);
}

#[test]
fn minmax_custom_range() {
    let x = Matrix::from_rows(&[[0.0], [5.0], [10.0]]).expect("valid matrix");
    let mut scaler = MinMaxScaler::new().with_range(-1.0, 1.0);
    let scaled = scaler.fit_transform(&x).expect("fit_transform");
    assert_eq!(scaled.column(0), vec![-1.0, 0.0, 1.0]);
}

#[test]
fn minmax_constant_feature_maps_to_min() {
    let x = Matrix::from_rows(&[[7.0, 1.0], [7.0, 2.0], [7.0, 3.0]]).expect("valid matrix");
    let scaled = MinMaxScaler::new().with_range(0.25, 1.0).fit_transform(&x).expect("fit");
    assert!(scaled.column(0).iter().all(|&v| v == 0.25));
}

#[test]
fn minmax_inverse_restores_input() {
    let x = prices();
    let mut scaler = MinMaxScaler::new();
    let scaled = scaler.fit_transform(&x).expect("fit_transform");
    let restored = scaler.inverse_transform(&scaled).expect("inverse");
    for (a, b) in restored.as_slice().iter().zip(x.as_slice()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn minmax_rejects_unfitted_and_mismatched_input() {
    let scaler = MinMaxScaler::new();
    assert!(!scaler.is_fitted());
    assert!(scaler.transform(&prices()).is_err());

    let mut fitted = MinMaxScaler::new();
    fitted.fit(&prices()).expect("fit");
    let narrow = Matrix::from_rows(&[[1.0, 2.0]]).expect("valid matrix");
    assert!(matches!(
        fitted.transform(&narrow),
        Err(PanganError::DimensionMismatch { .. })
    ));
}

#[test]
fn minmax_rejects_bad_range_and_empty_input() {
    let mut inverted = MinMaxScaler::new().with_range(1.0, 0.0);
    assert!(inverted.fit(&prices()).unwrap_err().is_parameter_error());

    let empty = Matrix::from_vec(0, 3, vec![]).expect("valid dims");
    assert!(matches!(
        MinMaxScaler::new().fit(&empty),
        Err(PanganError::EmptyInput { .. })
    ));
}

#[test]
fn minmax_rejects_non_finite() {
    let x = Matrix::from_rows(&[[1.0, f64::NAN]]).expect("valid matrix");
    assert!(matches!(
        MinMaxScaler::new().fit(&x),
        Err(PanganError::NonFinite { row: 0, col: 1 })
    ));
}

#[test]
fn normalize_frame_scales_commodity_rows_across_cities() {
    let frame = DataFrame::new(
        vec!["Beras".to_string(), "Gula Pasir".to_string()],
        vec![
            ("Bogor".to_string(), vec![10.0, 20.0]),
            ("Depok".to_string(), vec![12.0, 20.0]),
            ("Bekasi".to_string(), vec![14.0, 20.0]),
        ],
    )
    .expect("valid frame");

    let normalized = normalize_frame(&frame, true).expect("normalize");
    assert_eq!(normalized.index(), frame.index());
    assert_eq!(normalized.column_names(), frame.column_names());
    assert_eq!(normalized.row(0).expect("Beras"), vec![0.0, 0.5, 1.0]);
    assert_eq!(normalized.row(1).expect("Gula"), vec![0.0, 0.0, 0.0]);
}

#[test]
fn normalize_frame_without_transpose_scales_columns() {
    let frame = DataFrame::with_default_index(vec![
        ("a".to_string(), vec![1.0, 3.0]),
        ("b".to_string(), vec![5.0, 4.0]),
    ])
    .expect("valid frame");

    let normalized = normalize_frame(&frame, false).expect("normalize");
    assert!(!normalized.has_labelled_index());
    assert_eq!(normalized.column("a").expect("a"), &[0.0, 1.0]);
    assert_eq!(normalized.column("b").expect("b"), &[1.0, 0.0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_minmax_bounded(
        rows in prop::collection::vec(prop::collection::vec(-1.0e6f64..1.0e6, 3), 1..20),
    ) {
        let x = Matrix::from_rows(&rows).expect("equal row lengths");
        let scaled = MinMaxScaler::new().fit_transform(&x).expect("fit");
        for &v in scaled.as_slice() {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&v), "value {} out of range", v);
        }
    }
}
