//! Replicate statistics for plot lines.

use super::ObservableSeries;

/// Replicates at one x value, summarized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregatePoint {
    /// Time.
    pub x: f64,
    /// Mean of the measured replicates.
    pub mean: f64,
    /// Population standard deviation (ddof = 0).
    pub sd: f64,
    /// Standard error of the mean.
    pub sem: f64,
    /// Number of replicates.
    pub n: usize,
    /// Mean simulated value, if any replicate had one.
    pub simulated: Option<f64>,
}

/// Collapse replicates sharing an x value, sorted by x.
pub fn aggregate(series: &ObservableSeries) -> Vec<AggregatePoint> {
    let mut buckets: Vec<(f64, Vec<f64>, Vec<f64>)> = Vec::new();
    for p in &series.points {
        let bucket = match buckets.iter().position(|(x, _, _)| *x == p.x) {
            Some(i) => &mut buckets[i],
            None => {
                buckets.push((p.x, Vec::new(), Vec::new()));
                let last = buckets.len() - 1;
                &mut buckets[last]
            },
        };
        bucket.1.push(p.measured);
        if let Some(sim) = p.simulated {
            bucket.2.push(sim);
        }
    }

    let mut points: Vec<AggregatePoint> = buckets
        .into_iter()
        .map(|(x, measured, simulated)| {
            let n = measured.len();
            let avg = mean(&measured);
            let sd = (measured.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n as f64).sqrt();
            AggregatePoint {
                x,
                mean: avg,
                sd,
                sem: sd / (n as f64).sqrt(),
                n,
                simulated: (!simulated.is_empty()).then(|| mean(&simulated)),
            }
        })
        .collect();

    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

/// Squared Pearson correlation between measured and simulated values.
///
/// Returns 0.0 for empty or mismatched input, or when either side is constant.
pub fn r_squared(measured: &[f64], simulated: &[f64]) -> f64 {
    if measured.is_empty() || measured.len() != simulated.len() {
        return 0.0;
    }

    let mx = mean(measured);
    let my = mean(simulated);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in measured.iter().zip(simulated) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
    }

    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }
    (sxy * sxy) / (sxx * syy)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::SeriesPoint;

    fn point(x: f64, measured: f64, simulated: Option<f64>) -> SeriesPoint {
        SeriesPoint {
            x,
            measured,
            simulated,
            noise: None,
        }
    }

    #[test]
    fn aggregates_replicates_and_sorts_by_time() {
        let series = ObservableSeries {
            label: "obs".to_string(),
            points: vec![
                point(10.0, 4.0, None),
                point(0.0, 1.0, Some(1.0)),
                point(0.0, 3.0, Some(3.0)),
                point(10.0, 4.0, None),
            ],
        };

        let agg = aggregate(&series);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].x, 0.0);
        assert_eq!(agg[0].n, 2);
        assert_eq!(agg[0].mean, 2.0);
        assert_eq!(agg[0].sd, 1.0);
        assert!((agg[0].sem - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(agg[0].simulated, Some(2.0));
        assert_eq!(agg[1].sd, 0.0);
        assert_eq!(agg[1].simulated, None);
    }

    #[test]
    fn steady_state_sorts_last() {
        let series = ObservableSeries {
            label: "obs".to_string(),
            points: vec![point(f64::INFINITY, 1.0, None), point(5.0, 1.0, None)],
        };
        let agg = aggregate(&series);
        assert_eq!(agg[0].x, 5.0);
        assert!(agg[1].x.is_infinite());
    }

    #[test]
    fn r_squared_of_linear_relation_is_one() {
        let r2 = r_squared(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn r_squared_degenerate_inputs() {
        assert_eq!(r_squared(&[], &[]), 0.0);
        assert_eq!(r_squared(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(r_squared(&[1.0, 1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn r_squared_partial_correlation() {
        // x = [1,2,3], y = [1,3,2]: r = 0.5
        let r2 = r_squared(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]);
        assert!((r2 - 0.25).abs() < 1e-12);
    }
}
