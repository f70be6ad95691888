use super::distance::Distance;
use crate::data::{Observation, Value};
use crate::error::{Error, Result};

/// Index of, and distance to, the nearest centroid. Ties go to the lowest index.
pub(crate) fn nearest<D: Distance + ?Sized>(
    dist: &D,
    point: &[Value],
    centroids: &[Observation],
) -> Result<(usize, f64)> {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (c, centroid) in centroids.iter().enumerate() {
        let d = dist.distance(point, centroid)?;
        if d < best_dist {
            best_dist = d;
            best = c;
        }
    }
    Ok((best, best_dist))
}

/// Assignment step: nearest centroid for every observation.
pub(crate) fn assign<D: Distance + ?Sized>(
    dist: &D,
    data: &[Observation],
    centroids: &[Observation],
) -> Result<Vec<usize>> {
    data.iter()
        .map(|point| nearest(dist, point, centroids).map(|(c, _)| c))
        .collect()
}

/// Member count per cluster.
pub(crate) fn counts(labels: &[usize], k: usize) -> Vec<usize> {
    let mut counts = vec![0usize; k];
    for &l in labels {
        counts[l] += 1;
    }
    counts
}

/// Update step: replace each non-empty cluster's centroid with the mean of its members.
///
/// Numeric coordinates are averaged. Non-numeric coordinates are copied from
/// the first member in data-set order. A coordinate that is numeric for some
/// members and not for others is a type mismatch. Empty clusters keep their
/// centroid.
pub(crate) fn update(data: &[Observation], labels: &[usize], centroids: &mut [Observation]) -> Result<()> {
    let k = centroids.len();
    let width = centroids.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0f64; width]; k];
    let mut numeric_counts = vec![vec![0usize; width]; k];
    let mut first_member: Vec<Option<usize>> = vec![None; k];

    for (i, point) in data.iter().enumerate() {
        let c = labels[i];
        first_member[c].get_or_insert(i);
        for (j, v) in point.iter().enumerate() {
            if let Some(x) = v.as_f64() {
                sums[c][j] += x;
                numeric_counts[c][j] += 1;
            }
        }
    }

    let sizes = counts(labels, k);
    for c in 0..k {
        let Some(first) = first_member[c] else {
            continue;
        };
        let mut centroid = Vec::with_capacity(width);
        for j in 0..width {
            let seen = numeric_counts[c][j];
            if seen == sizes[c] {
                centroid.push(Value::Number(sums[c][j] / seen as f64));
            } else if seen == 0 {
                centroid.push(data[first][j].clone());
            } else {
                return Err(Error::TypeMismatch { index: j });
            }
        }
        centroids[c] = centroid;
    }
    Ok(())
}

/// Sum over observations of the distance to their assigned centroid.
pub(crate) fn sse<D: Distance + ?Sized>(
    dist: &D,
    data: &[Observation],
    labels: &[usize],
    centroids: &[Observation],
) -> Result<f64> {
    data.iter()
        .zip(labels)
        .map(|(point, &c)| dist.distance(point, &centroids[c]))
        .sum()
}
