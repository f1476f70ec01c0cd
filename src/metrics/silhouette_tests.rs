use super::*;
use crate::cluster::cluster;
use proptest::prelude::*;

fn column(values: &[f64]) -> Matrix<f64> {
    Matrix::from_vec(values.len(), 1, values.to_vec()).expect("valid column")
}

#[test]
fn test_hand_computed_values() {
    // 0 and 2 share a cluster, 10 is alone.
    let analysis = silhouette(&column(&[0.0, 2.0, 10.0]), &[0, 0, 1]).expect("two clusters");
    let s = analysis.per_row();
    assert!((s[0] - 0.8).abs() < 1e-12);
    assert!((s[1] - 0.75).abs() < 1e-12);
    // Singleton: a(i) = 0, so s(i) = b / b = 1.
    assert!((s[2] - 1.0).abs() < 1e-12);
    assert!((analysis.mean() - 0.85).abs() < 1e-12);
}

#[test]
fn test_negative_for_misassigned_row() {
    let s = silhouette_samples(&column(&[0.0, 10.0, 11.0]), &[0, 0, 1]).expect("two clusters");
    assert!((s[1] + 0.9).abs() < 1e-12);
}

#[test]
fn test_end_to_end_two_blobs() {
    let x = Matrix::from_rows(&[[1.0, 1.0], [1.0, 2.0], [10.0, 10.0], [10.0, 11.0]])
        .expect("valid matrix");
    let (labels, _) = cluster(&x, 2, 0).expect("fit");
    let l = labels.as_slice();
    assert_eq!(l[0], l[1]);
    assert_eq!(l[2], l[3]);
    assert_ne!(l[0], l[2]);

    let score = silhouette_score(&x, l).expect("two clusters");
    assert!(score > 0.9, "mean silhouette {score} should exceed 0.9");
}

#[test]
fn test_single_label_is_degenerate() {
    let err = silhouette(&column(&[1.0, 2.0, 3.0]), &[4, 4, 4]).unwrap_err();
    assert!(matches!(err, PanganError::DegenerateClustering { n_labels: 1 }));
}

#[test]
fn test_label_length_mismatch() {
    let err = silhouette(&column(&[1.0, 2.0, 3.0]), &[0, 1]).unwrap_err();
    assert!(matches!(err, PanganError::DimensionMismatch { .. }));
}

#[test]
fn test_empty_input() {
    let x = Matrix::from_vec(0, 1, vec![]).expect("valid dims");
    assert!(matches!(
        silhouette(&x, &[]),
        Err(PanganError::EmptyInput { .. })
    ));
}

#[test]
fn test_identical_rows_score_zero_without_nan() {
    let x = Matrix::from_rows(&[[3.0, 3.0]; 6]).expect("valid matrix");
    let (labels, _) = cluster(&x, 3, 1).expect("fit on identical rows");
    let analysis = silhouette(&x, labels.as_slice()).expect("three non-empty clusters");

    assert!(analysis.per_row().iter().all(|v| !v.is_nan()));
    assert!(analysis.per_row().iter().all(|&v| v == 0.0));
    assert_eq!(analysis.mean(), 0.0);
}

#[test]
fn test_all_singletons_defined() {
    let x = column(&[0.0, 4.0, 9.0]);
    let (labels, _) = cluster(&x, 3, 0).expect("k = rows");
    let s = silhouette_samples(&x, labels.as_slice()).expect("three clusters");
    assert!(s.iter().all(|&v| v.is_finite()));
    assert!(s.iter().all(|&v| (v - 1.0).abs() < 1e-12));
}

#[test]
fn test_non_contiguous_labels() {
    let a = silhouette(&column(&[0.0, 2.0, 10.0]), &[0, 0, 1]).expect("two clusters");
    let b = silhouette(&column(&[0.0, 2.0, 10.0]), &[5, 5, 9]).expect("two clusters");
    assert_eq!(a.per_row(), b.per_row());
    assert_eq!(b.per_cluster()[1].cluster, 9);
}

#[test]
fn test_per_cluster_sorted_and_grouped() {
    let analysis = silhouette(&column(&[0.0, 2.0, 10.0, 0.5]), &[0, 0, 1, 0]).expect("two clusters");
    let groups = analysis.per_cluster();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].cluster, 0);
    assert_eq!(groups[0].values.len(), 3);
    assert!(groups[0].values.windows(2).all(|w| w[0] <= w[1]));
    let mean0 = groups[0].values.iter().sum::<f64>() / 3.0;
    assert!((groups[0].mean - mean0).abs() < 1e-12);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_bounded_and_mean_exact(
        rows in prop::collection::vec(prop::collection::vec(-50.0f64..50.0, 2), 3..15),
        seed in 0u64..500,
    ) {
        let x = Matrix::from_rows(&rows).expect("equal row lengths");
        let k = 2 + (seed as usize) % (x.n_rows() - 1);
        let (labels, _) = cluster(&x, k, seed).expect("valid k");
        let analysis = silhouette(&x, labels.as_slice()).expect("k >= 2 non-empty clusters");

        for &v in analysis.per_row() {
            prop_assert!((-1.0..=1.0).contains(&v), "silhouette {} out of bounds", v);
        }
        let mean = analysis.per_row().iter().sum::<f64>() / analysis.per_row().len() as f64;
        prop_assert!((analysis.mean() - mean).abs() <= 1e-9);
    }
}

#[test]
fn test_overflowing_distances_rejected() {
    let err = silhouette(&column(&[1e300, -1e300, 0.0]), &[0, 1, 1]).unwrap_err();
    assert!(matches!(err, PanganError::InvalidParameter { .. }));
}

#[test]
fn test_non_finite_rejected() {
    let err = silhouette(&column(&[0.0, f64::NAN, 1.0]), &[0, 1, 1]).unwrap_err();
    assert!(matches!(err, PanganError::NonFinite { row: 1, col: 0 }));
}
