use lloyd::cluster::{EmptyPolicy, InitMethod, KMeans};
use lloyd::{numeric, DataSet, Error, Value};

fn build_data() -> DataSet {
    DataSet::from_numeric(&[
        vec![10.0, 3.0],
        vec![3.0, 10.0],
        vec![2.0, 8.0],
        vec![2.0, 5.0],
        vec![3.0, 8.0],
        vec![10.0, 3.0],
        vec![1.0, 3.0],
        vec![8.0, 1.0],
        vec![2.0, 9.0],
        vec![2.0, 5.0],
        vec![3.0, 3.0],
        vec![9.0, 4.0],
    ])
    .unwrap()
    .with_labels(["X", "Y"])
    .unwrap()
}

// k-means produces an empty cluster on the second pass with starting indices [0, 1, 2].
fn empty_cluster_data() -> DataSet {
    DataSet::from_numeric(&[
        vec![-0.1, 0.0],
        vec![0.0, 0.0],
        vec![0.1, 0.0],
        vec![-0.1, 10.0],
        vec![0.1, 10.0],
        vec![0.2, 10.0],
    ])
    .unwrap()
}

fn sse_data() -> DataSet {
    DataSet::from_numeric(&[
        vec![1.0, 1.0],
        vec![1.0, 2.0],
        vec![2.0, 1.0],
        vec![2.0, 2.0],
        vec![8.0, 8.0],
        vec![8.0, 9.0],
        vec![9.0, 8.0],
        vec![9.0, 9.0],
    ])
    .unwrap()
}

// Three unit squares far apart. The optimal partition has SSE 3 * 4 * 0.5 = 6.
fn three_squares() -> DataSet {
    let mut rows = Vec::new();
    for (x, y) in [(0.0, 0.0), (20.0, 0.0), (0.0, 20.0)] {
        for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)] {
            rows.push(vec![x + dx, y + dy]);
        }
    }
    DataSet::from_numeric(&rows).unwrap()
}

fn invalid_message(err: Error) -> String {
    match err {
        Error::InvalidArgument { message, .. } => message,
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
}

#[test]
fn test_build_partitions_every_observation() {
    let data = build_data();
    let model = KMeans::new(4).with_seed(11).fit(&data).unwrap();

    assert!(model.n_clusters() <= 4);
    assert_eq!(model.clusters().len(), model.centroids().len());

    let mut seen: Vec<usize> = model
        .clusters()
        .iter()
        .flat_map(|c| c.indices().iter().copied())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..data.len()).collect::<Vec<_>>());

    for cluster in model.clusters() {
        for item in cluster.items(&data) {
            assert!(data.items().contains(item));
        }
    }
    assert_eq!(model.data_labels().unwrap(), ["X".to_string(), "Y".to_string()]);
}

#[test]
fn test_classify_returns_nearest_centroid() {
    let data = build_data();
    let model = KMeans::new(4).with_seed(3).fit(&data).unwrap();
    let item = numeric(&[10.0, 0.0]);
    let c = model.classify(&item).unwrap();
    assert!(c < model.n_clusters());

    let min = model.distance(&model.centroids()[c], &item).unwrap();
    for centroid in model.centroids() {
        assert!(model.distance(centroid, &item).unwrap() >= min);
    }
}

#[test]
fn test_default_distance() {
    let kmeans = KMeans::new(2);
    let a: Vec<Value> = vec![1.into(), 10.into(), "Chicago".into(), 2.into()];
    let b: Vec<Value> = vec![10.into(), 10.into(), "London".into(), 50.into()];
    assert_eq!(kmeans.distance(&a, &b).unwrap(), 2385.0);

    let nil = vec![Value::Missing, Value::Missing];
    assert!(matches!(
        kmeans.distance(&numeric(&[1.0, 10.0]), &nil),
        Err(Error::TypeMismatch { .. })
    ));

    let kmeans = kmeans.with_distance(lloyd::Manhattan);
    assert_eq!(kmeans.distance(&a, &b).unwrap(), 57.0);
}

#[test]
fn test_max_iterations() {
    let model = KMeans::new(4).with_max_iter(1).fit(&build_data()).unwrap();
    assert_eq!(model.iterations(), 1);
}

#[test]
fn test_centroid_indices() {
    let data = build_data();
    KMeans::new(4).fit(&data).unwrap();
    KMeans::new(4).with_centroid_indices([0, 1, 2, 3]).fit(&data).unwrap();

    let err = KMeans::new(2)
        .with_centroid_indices([0, 1, 2, 3])
        .fit(&data)
        .unwrap_err();
    assert_eq!(
        invalid_message(err),
        "length of centroid indices differs from the specified number of clusters"
    );

    let bad = data.len() + 10;
    let err = KMeans::new(4)
        .with_centroid_indices([0, 1, 2, bad])
        .fit(&data)
        .unwrap_err();
    assert_eq!(invalid_message(err), format!("invalid centroid index {bad}"));
}

#[test]
fn test_empty_data_set() {
    let data = DataSet::new(vec![]).unwrap();
    assert_eq!(KMeans::new(1).fit(&data).unwrap_err(), Error::EmptyInput);
}

#[test]
fn test_random_seed_reproducible() {
    let data = build_data();
    let a = KMeans::new(4).with_seed(1).fit(&data).unwrap();
    let b = KMeans::new(4).with_seed(1).fit(&data).unwrap();
    assert_eq!(a.centroids(), b.centroids());
    assert_eq!(a.sse(), b.sse());
}

#[test]
fn test_kmeans_plus_plus_reproducible() {
    let data = build_data();
    let fit = || {
        KMeans::new(4)
            .with_init_method(InitMethod::KmeansPlusPlus)
            .with_seed(1)
            .fit(&data)
            .unwrap()
    };
    assert_eq!(fit().centroids(), fit().centroids());
}

#[test]
fn test_restarts_never_worse() {
    let data = DataSet::from_numeric(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![20.0, 20.0],
        vec![20.0, 21.0],
    ])
    .unwrap();
    for seed in 0..10 {
        let one = KMeans::new(2).with_seed(seed).fit(&data).unwrap().sse();
        let five = KMeans::new(2).with_seed(seed).with_restarts(5).fit(&data).unwrap().sse();
        assert!(five <= one, "seed {seed}: {five} > {one}");
    }
}

#[test]
fn test_restarts_keep_first_best_attempt() {
    let data = three_squares();
    let fit = |restarts| {
        KMeans::new(3)
            .with_init_method(InitMethod::KmeansPlusPlus)
            .with_seed(99)
            .with_restarts(restarts)
            .fit(&data)
            .unwrap()
    };

    // k-means++ puts one seed in each square, so the first pass is final.
    let first = fit(1);
    assert_eq!(first.sse(), 6.0);
    assert_eq!(first.iterations(), 2);
    for group in first.labels().chunks(4) {
        assert!(group.iter().all(|&l| l == group[0]));
    }

    // Later attempts can only tie, and a tie keeps attempt 0, with or without
    // the `parallel` feature.
    for restarts in [2, 7, 16] {
        let many = fit(restarts);
        assert_eq!(many.sse(), 6.0, "restarts {restarts}");
        assert_eq!(many.iterations(), first.iterations());
        assert_eq!(many.labels(), first.labels());
        assert_eq!(many.centroids(), first.centroids());
    }
    assert_eq!(first.centroids().len(), 3);
}

#[test]
fn test_eliminate_is_default_and_drops_cluster() {
    let data = empty_cluster_data();
    let model = KMeans::new(3).with_centroid_indices([0, 1, 2]).fit(&data).unwrap();

    assert_eq!(model.on_empty(), EmptyPolicy::Eliminate);
    assert_eq!(model.on_empty().to_string(), "eliminate");
    assert_eq!(model.clusters().len(), 2);
    assert_eq!(model.centroids().len(), 2);

    let total: usize = model.clusters().iter().map(|c| c.len()).sum();
    assert_eq!(total, data.len());
}

#[test]
fn test_terminate_fails_build() {
    let err = KMeans::new(3)
        .with_centroid_indices([0, 1, 2])
        .with_on_empty(EmptyPolicy::Terminate)
        .fit(&empty_cluster_data())
        .unwrap_err();
    assert_eq!(err, Error::EmptyCluster { cluster: 0, iteration: 2 });
}

#[test]
fn test_reseeding_policies_keep_all_clusters() {
    let data = empty_cluster_data();
    for policy in [EmptyPolicy::Random, EmptyPolicy::Outlier] {
        for seed in 0..5 {
            let model = KMeans::new(3)
                .with_centroid_indices([0, 1, 2])
                .with_on_empty(policy)
                .with_seed(seed)
                .fit(&data)
                .unwrap();
            assert_eq!(model.clusters().len(), 3, "{policy} seed {seed}");
            assert!(model.clusters().iter().all(|c| !c.is_empty()));
        }
    }
}

#[test]
fn test_unknown_on_empty_rejected() {
    let err = "ldkfje".parse::<EmptyPolicy>().unwrap_err();
    assert_eq!(invalid_message(err), "invalid value for on_empty: ldkfje");
}

#[test]
fn test_sse() {
    let model = KMeans::new(2).with_centroid_indices([0, 4]).fit(&sse_data()).unwrap();
    assert!((model.sse() - 4.0).abs() < 1e-4);
    assert_eq!(model.centroids()[0], numeric(&[1.5, 1.5]));
    assert_eq!(model.centroids()[1], numeric(&[8.5, 8.5]));
}

#[test]
fn test_track_history() {
    let data = build_data();
    let model = KMeans::new(3)
        .with_max_iter(1)
        .with_history(true)
        .with_seed(1)
        .fit(&data)
        .unwrap();
    let history = model.history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].assignments.len(), data.len());
    assert_eq!(history[0].centroids.len(), 3);

    let model = KMeans::new(3).fit(&data).unwrap();
    assert!(model.history().is_none());
}

#[test]
fn test_history_follows_iterations() {
    let model = KMeans::new(2)
        .with_centroid_indices([0, 1])
        .with_history(true)
        .fit(&sse_data())
        .unwrap();
    let history = model.history().unwrap();
    assert_eq!(history.len(), model.iterations());
    let last = history.last().unwrap();
    assert_eq!(last.assignments, model.labels());
    assert_eq!(last.centroids, model.centroids());
}
