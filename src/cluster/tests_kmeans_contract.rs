// =========================================================================
// K-Means partition contract
//
// Every fit must be a complete partition: one label per row, labels in
// [0, K), every cluster non-empty, each centroid the mean of its members.
// =========================================================================

use super::*;
use crate::error::PanganError;
use proptest::prelude::*;

fn two_blobs() -> Matrix<f64> {
    Matrix::from_rows(&[[1.0, 1.0], [1.0, 2.0], [10.0, 10.0], [10.0, 11.0]])
        .expect("valid matrix")
}

fn assert_complete_partition(x: &Matrix<f64>, labels: &ClusterAssignment, centroids: &Matrix<f64>, k: usize) {
    assert_eq!(labels.len(), x.n_rows());
    assert_eq!(labels.n_clusters(), k);
    assert_eq!(centroids.shape(), (k, x.n_cols()));
    for (i, &l) in labels.as_slice().iter().enumerate() {
        assert!(l < k, "label[{i}] = {l}, expected < {k}");
    }
    for (c, &count) in labels.counts().iter().enumerate() {
        assert!(count > 0, "cluster {c} is empty");
    }
}

#[test]
fn labels_cover_every_k_from_two_to_rows() {
    let x = Matrix::from_rows(&[
        [0.0, 0.0],
        [0.5, 0.2],
        [4.0, 4.0],
        [4.2, 3.9],
        [9.0, 0.5],
        [8.7, 0.1],
        [2.0, 7.0],
    ])
    .expect("valid matrix");

    for k in 2..=x.n_rows() {
        let (labels, centroids) = cluster(&x, k, 0).expect("valid k");
        assert_complete_partition(&x, &labels, &centroids, k);
    }
}

#[test]
fn same_seed_is_idempotent() {
    let x = Matrix::from_rows(&[
        [3.0, 1.0, 2.0],
        [2.5, 1.5, 2.1],
        [7.0, 9.0, 1.0],
        [6.5, 8.0, 1.5],
        [0.0, 4.0, 8.0],
        [0.2, 4.4, 7.5],
    ])
    .expect("valid matrix");

    let first = KMeans::new(3).with_random_state(17).fit(&x).expect("fit");
    let second = KMeans::new(3).with_random_state(17).fit(&x).expect("fit");
    assert_eq!(first, second);
}

#[test]
fn different_seeds_each_yield_valid_partitions() {
    // K-Means is non-convex: different seeds may land in different local
    // optima, so only partition validity is asserted across seeds.
    let x = Matrix::from_rows(&[
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [0.5, 0.5],
        [2.0, 2.0],
    ])
    .expect("valid matrix");

    for seed in 0..20 {
        let fit = KMeans::new(3)
            .with_random_state(seed)
            .with_n_init(1)
            .fit(&x)
            .expect("fit");
        assert_complete_partition(&x, fit.labels(), fit.centroids(), 3);
    }
}

#[test]
fn two_well_separated_blobs() {
    let x = two_blobs();
    let (labels, _) = cluster(&x, 2, 0).expect("fit");
    let l = labels.as_slice();
    assert_eq!(l[0], l[1]);
    assert_eq!(l[2], l[3]);
    assert_ne!(l[0], l[2]);
}

#[test]
fn identical_rows_do_not_crash() {
    let x = Matrix::from_rows(&[[2.0, 2.0]; 5]).expect("valid matrix");
    for k in 2..=5 {
        let (labels, centroids) = cluster(&x, k, 3).expect("fit on identical rows");
        assert_complete_partition(&x, &labels, &centroids, k);
        assert!(centroids.as_slice().iter().all(|&v| v == 2.0));
    }
}

#[test]
fn k_equal_rows_gives_singletons() {
    let x = Matrix::from_rows(&[[0.0], [3.0], [7.0], [20.0]]).expect("valid matrix");
    let (labels, centroids) = cluster(&x, 4, 5).expect("fit");
    assert_eq!(labels.counts(), vec![1, 1, 1, 1]);
    for i in 0..4 {
        assert_eq!(centroids.row(labels.label(i)), x.row(i));
    }
}

#[test]
fn single_row_is_invalid_parameter_for_any_k() {
    let x = Matrix::from_rows(&[[4.0, 5.0, 6.0]]).expect("valid matrix");
    for k in 2..=10 {
        let err = cluster(&x, k, 0).unwrap_err();
        assert!(
            matches!(err, PanganError::InvalidParameter { .. }),
            "k={k}: expected InvalidParameter, got {err:?}"
        );
    }
}

#[test]
fn k_below_two_is_invalid_parameter() {
    for k in [0, 1] {
        assert!(cluster(&two_blobs(), k, 0).unwrap_err().is_parameter_error());
    }
}

#[test]
fn empty_matrix_is_empty_input() {
    let x = Matrix::from_vec(0, 2, vec![]).expect("valid matrix");
    assert!(matches!(
        cluster(&x, 2, 0),
        Err(PanganError::EmptyInput { .. })
    ));
}

#[test]
fn centroid_is_mean_of_members() {
    let x = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [20.0, 20.0], [22.0, 24.0], [21.0, 22.0]])
        .expect("valid matrix");
    let (labels, centroids) = cluster(&x, 2, 9).expect("fit");

    for c in 0..2 {
        let members = labels.members(c);
        for f in 0..2 {
            let mean = members.iter().map(|&i| x.get(i, f)).sum::<f64>() / members.len() as f64;
            assert!((centroids.get(c, f) - mean).abs() < 1e-12);
        }
    }
}

#[test]
fn nearest_centroid_assignment() {
    let x = Matrix::from_rows(&[
        [0.0, 0.0],
        [0.1, 0.1],
        [0.2, 0.2],
        [10.0, 10.0],
        [10.1, 10.1],
        [10.2, 10.2],
    ])
    .expect("valid matrix");
    let (labels, centroids) = cluster(&x, 2, 42).expect("fit");

    for i in 0..x.n_rows() {
        let assigned = labels.label(i);
        let d_assigned = crate::primitives::squared_euclidean(x.row(i), centroids.row(assigned));
        for c in 0..2 {
            let d_other = crate::primitives::squared_euclidean(x.row(i), centroids.row(c));
            assert!(d_assigned <= d_other + 1e-12);
        }
    }
}

#[test]
fn more_clusters_never_increase_inertia_on_blobs() {
    let x = two_blobs();
    let two = KMeans::new(2).fit(&x).expect("fit");
    let four = KMeans::new(4).fit(&x).expect("fit");
    assert!(four.inertia() <= two.inertia());
    assert!(four.inertia().abs() < 1e-12);
}

#[test]
fn assignment_helpers() {
    let labels = ClusterAssignment::new(vec![2, 0, 2, 1], 3);
    assert_eq!(labels.len(), 4);
    assert!(!labels.is_empty());
    assert_eq!(labels.n_distinct(), 3);
    assert_eq!(labels.members(2), vec![0, 2]);
    assert_eq!(labels.clone().into_vec(), vec![2, 0, 2, 1]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_partition_is_complete(
        rows in prop::collection::vec(prop::collection::vec(-100.0f64..100.0, 3), 2..12),
        k_seed in 0usize..100,
        seed in 0u64..1000,
    ) {
        let x = Matrix::from_rows(&rows).expect("equal row lengths");
        let k = 2 + k_seed % (x.n_rows() - 1);
        let fit = KMeans::new(k).with_random_state(seed).with_n_init(2).fit(&x).expect("valid k");

        prop_assert_eq!(fit.labels().len(), x.n_rows());
        prop_assert!(fit.labels().as_slice().iter().all(|&l| l < k));
        prop_assert!(fit.labels().counts().iter().all(|&c| c > 0));
        prop_assert!(fit.inertia() >= 0.0);

        let again = KMeans::new(k).with_random_state(seed).with_n_init(2).fit(&x).expect("valid k");
        prop_assert_eq!(fit, again);
    }
}
