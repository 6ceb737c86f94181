//! Best-deployment selection and improvement over the baseline deployment.

use std::fmt;

use crate::analysis::{
    aggregate::{PivotTable, BASELINE_DEPLOYMENT},
    metric::Metric,
};

/// Percentage advantage of the best deployment over the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Improvement {
    /// Rounded to two decimals; `0.0` when nothing is claimed.
    Percent(f64),
    /// Baseline throughput is exactly zero and the best is positive.
    Infinite,
}

impl Improvement {
    pub const NONE: Improvement = Improvement::Percent(0.0);

    pub fn as_f64(self) -> f64 {
        match self {
            Improvement::Percent(p) => p,
            Improvement::Infinite => f64::INFINITY,
        }
    }
}

impl fmt::Display for Improvement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Improvement::Percent(p) => write!(f, "{:.2}%", p),
            Improvement::Infinite => f.write_str("Inf%"),
        }
    }
}

/// Outcome for one workload slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// `None` when every deployment lacks data for the slice.
    pub best: Option<String>,
    pub improvement: Improvement,
}

impl Comparison {
    fn no_data() -> Self {
        Self {
            best: None,
            improvement: Improvement::NONE,
        }
    }

    /// Winner's name, or `"N/A"`.
    pub fn best_label(&self) -> &str {
        self.best.as_deref().unwrap_or("N/A")
    }
}

/// Rounds to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Picks the best deployment of one row and its improvement over the baseline.
///
/// `values[i]` belongs to `deployments[i]`. Ties go to the earliest column,
/// which is the baseline whenever it takes part.
pub fn compare_row(deployments: &[String], values: &[Option<f64>], metric: Metric) -> Comparison {
    let higher_better = metric.is_higher_better();

    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let Some(v) = *v else { continue };
        let better = match best {
            None => true,
            Some((_, b)) if higher_better => v > b,
            Some((_, b)) => v < b,
        };
        if better {
            best = Some((i, v));
        }
    }

    let Some((best_idx, best_val)) = best else {
        return Comparison::no_data();
    };
    let best_name = deployments.get(best_idx).cloned();

    let baseline = deployments
        .iter()
        .position(|d| d == BASELINE_DEPLOYMENT)
        .and_then(|i| values.get(i).copied().flatten());

    let Some(baseline) = baseline else {
        return Comparison {
            best: best_name,
            improvement: Improvement::NONE,
        };
    };

    let improvement = if higher_better {
        if baseline == 0.0 {
            if best_val > 0.0 {
                Improvement::Infinite
            } else {
                Improvement::NONE
            }
        } else if best_val > baseline {
            Improvement::Percent(round2(100.0 * (best_val - baseline) / baseline))
        } else {
            Improvement::NONE
        }
    } else if baseline == 0.0 {
        // nothing beats an instant response
        Improvement::NONE
    } else if best_val < baseline {
        Improvement::Percent(round2(100.0 * (baseline - best_val) / baseline))
    } else {
        Improvement::NONE
    };

    Comparison {
        best: best_name,
        improvement,
    }
}

/// [`compare_row`] over every row of `pivot`, in row order.
pub fn compare_table(pivot: &PivotTable) -> Vec<Comparison> {
    pivot
        .rows
        .iter()
        .map(|row| compare_row(&pivot.deployments, &row.values, pivot.metric))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn latency_improvement_over_baseline() {
        let deps = names(&["no-features", "prefix-cache"]);
        let c = compare_row(&deps, &[Some(100.0), Some(80.0)], Metric::MeanTtftMs);
        assert_eq!(c.best.as_deref(), Some("prefix-cache"));
        assert_eq!(c.improvement, Improvement::Percent(20.0));
        assert_eq!(c.improvement.to_string(), "20.00%");
    }

    #[test]
    fn throughput_improvement_over_baseline() {
        let deps = names(&["no-features", "kv-aware"]);
        let c = compare_row(&deps, &[Some(10.0), Some(15.0)], Metric::RequestThroughput);
        assert_eq!(c.best.as_deref(), Some("kv-aware"));
        assert_eq!(c.improvement, Improvement::Percent(50.0));
    }

    #[test]
    fn all_missing_is_not_available() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[None, None], Metric::MeanItlMs);
        assert_eq!(c.best, None);
        assert_eq!(c.best_label(), "N/A");
        assert_eq!(c.improvement, Improvement::NONE);
    }

    #[test]
    fn missing_baseline_claims_nothing() {
        let deps = names(&["no-features", "a", "b"]);
        for metric in Metric::ALL {
            let c = compare_row(&deps, &[None, Some(3.0), Some(7.0)], metric);
            assert_eq!(c.improvement, Improvement::NONE);
            let expected = if metric.is_higher_better() { "b" } else { "a" };
            assert_eq!(c.best.as_deref(), Some(expected));
        }
    }

    #[test]
    fn zero_throughput_baseline_is_infinite() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[Some(0.0), Some(4.0)], Metric::RequestThroughput);
        assert_eq!(c.improvement, Improvement::Infinite);
        assert_eq!(c.improvement.to_string(), "Inf%");
        assert!(c.improvement.as_f64().is_infinite());

        let c = compare_row(&deps, &[Some(0.0), Some(0.0)], Metric::RequestThroughput);
        assert_eq!(c.improvement, Improvement::NONE);
        assert_eq!(c.best.as_deref(), Some("no-features"));
    }

    #[test]
    fn zero_latency_baseline_claims_nothing() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[Some(0.0), Some(5.0)], Metric::MeanTpotMs);
        assert_eq!(c.best.as_deref(), Some("no-features"));
        assert_eq!(c.improvement, Improvement::NONE);
    }

    #[test]
    fn baseline_best_is_zero_percent() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[Some(50.0), Some(60.0)], Metric::MeanTtftMs);
        assert_eq!(c.best.as_deref(), Some("no-features"));
        assert_eq!(c.improvement, Improvement::NONE);

        let c = compare_row(&deps, &[Some(50.0), Some(40.0)], Metric::RequestThroughput);
        assert_eq!(c.best.as_deref(), Some("no-features"));
        assert_eq!(c.improvement, Improvement::NONE);
    }

    #[test]
    fn ties_go_to_baseline() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[Some(5.0), Some(5.0)], Metric::MeanItlMs);
        assert_eq!(c.best.as_deref(), Some("no-features"));
    }

    #[test]
    fn missing_cell_does_not_win() {
        let deps = names(&["no-features", "a", "b"]);
        let c = compare_row(&deps, &[Some(100.0), None, Some(90.0)], Metric::MeanTtftMs);
        assert_eq!(c.best.as_deref(), Some("b"));
        assert_eq!(c.improvement, Improvement::Percent(10.0));
    }

    #[test]
    fn best_is_extremum_of_present_values() {
        let deps = names(&["no-features", "a", "b", "c"]);
        let values = [Some(12.0), Some(3.5), None, Some(40.25)];
        for metric in Metric::ALL {
            let c = compare_row(&deps, &values, metric);
            let idx = deps.iter().position(|d| Some(d.as_str()) == c.best.as_deref()).unwrap();
            let best = values[idx].unwrap();
            for v in values.iter().flatten() {
                if metric.is_higher_better() {
                    assert!(best >= *v);
                } else {
                    assert!(best <= *v);
                }
            }
        }
    }

    #[test]
    fn percentages_have_two_decimals() {
        let deps = names(&["no-features", "a"]);
        let c = compare_row(&deps, &[Some(3.0), Some(2.0)], Metric::MeanTtftMs);
        let Improvement::Percent(p) = c.improvement else {
            panic!("expected a finite percentage");
        };
        assert_eq!(p, 33.33);
        assert_eq!(round2(p), p);
    }

    #[test]
    fn compare_table_follows_row_order() {
        use crate::analysis::aggregate::PivotRow;
        let pivot = PivotTable {
            metric: Metric::RequestThroughput,
            deployments: names(&["no-features", "a"]),
            rows: vec![
                PivotRow { num_prompts: 10, rate: "1".into(), values: vec![Some(10.0), Some(15.0)] },
                PivotRow { num_prompts: 10, rate: "2".into(), values: vec![None, None] },
            ],
        };
        let comps = compare_table(&pivot);
        assert_eq!(comps.len(), 2);
        assert_eq!(comps[0].improvement, Improvement::Percent(50.0));
        assert_eq!(comps[1].best, None);
    }
}
