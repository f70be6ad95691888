//! K-means on a small mixed-type dataset, once per empty-cluster policy.
//!
//! Run with `RUST_LOG=lloyd=debug` to see per-iteration logging.

use lloyd::cluster::{EmptyPolicy, InitMethod, KMeans};
use lloyd::{DataSet, Value};
use tracing_subscriber::EnvFilter;

fn main() -> lloyd::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated groups in 2D, plus a city column the default
    // metric ignores.
    let rows: Vec<(f64, f64, &str)> = vec![
        // Group A (near origin)
        (0.0, 0.0, "Lisbon"),
        (0.1, 0.2, "Porto"),
        (0.2, 0.1, "Lisbon"),
        (-0.1, 0.1, "Faro"),
        // Group B (near (5, 5))
        (5.0, 5.0, "Oslo"),
        (5.1, 4.9, "Bergen"),
        (4.9, 5.1, "Oslo"),
        (5.2, 5.2, "Tromso"),
        // Group C (near (10, 0))
        (10.0, 0.0, "Quito"),
        (10.1, 0.1, "Lima"),
        (9.9, -0.1, "Quito"),
        (10.2, 0.2, "Cusco"),
    ];
    let data = DataSet::new(
        rows.iter()
            .map(|&(x, y, city)| vec![Value::from(x), Value::from(y), Value::from(city)])
            .collect(),
    )?
    .with_labels(["x", "y", "city"])?;

    for policy in [EmptyPolicy::Eliminate, EmptyPolicy::Random, EmptyPolicy::Outlier] {
        let model = KMeans::new(3)
            .with_init_method(InitMethod::KmeansPlusPlus)
            .with_restarts(5)
            .with_on_empty(policy)
            .with_seed(42)
            .fit(&data)?;

        println!(
            "=== on_empty={} (iterations={}, sse={:.3}) ===",
            model.on_empty(),
            model.iterations(),
            model.sse()
        );
        for (c, cluster) in model.clusters().iter().enumerate() {
            let centroid: Vec<String> = model.centroids()[c].iter().map(|v| v.to_string()).collect();
            println!("  cluster {c} [{}]", centroid.join(", "));
            for item in cluster.items(&data) {
                println!("    {:5.1} {:5.1} {}", item[0], item[1], item[2]);
            }
        }
    }

    let model = KMeans::new(3).with_seed(7).with_restarts(3).fit(&data)?;
    let query = vec![Value::from(9.5), Value::from(0.5), Value::from("Bogota")];
    println!("\n(9.5, 0.5) => cluster {}", model.classify(&query)?);

    Ok(())
}
