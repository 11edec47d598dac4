use sigma_types::{ComparisonReport, ComponentDiff, ComponentSummary, PerComponent, SigmaReport};

/// Разница `b − a` по каждой компоненте.
pub fn compare(
    a: &SigmaReport,
    b: &SigmaReport,
) -> ComparisonReport {
    ComparisonReport {
        components: PerComponent::from_fn(|c| diff_summary(a.summary.get(c), b.summary.get(c))),
    }
}

pub fn diff_summary(
    a: &ComponentSummary,
    b: &ComponentSummary,
) -> ComponentDiff {
    let mean_diff = b.mean - a.mean;
    let rms_diff = b.rms - a.rms;

    ComponentDiff {
        mean_diff,
        rms_diff,
        max_diff: b.max - a.max,
        std_diff: b.std - a.std,
        mean_diff_pct: relative_pct(mean_diff, a.mean),
        rms_diff_pct: relative_pct(rms_diff, a.rms),
    }
}

/// `diff / base * 100`.
///
/// При `base == 0`: ±∞ по знаку `diff`, 0 если и `diff == 0`.
pub fn relative_pct(
    diff: f64,
    base: f64,
) -> f64 {
    if base == 0.0 {
        if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(diff)
        }
    } else {
        diff / base * 100.0
    }
}

#[cfg(test)]
mod tests {
    use sigma_types::{EpochSigma, EpochTime};

    use super::*;
    use crate::stats::summarize;

    fn report(values: &[(f64, f64, f64)]) -> SigmaReport {
        summarize(
            values
                .iter()
                .map(|&(e, n, u)| EpochSigma::new(EpochTime::Label("t".into()), e, n, u))
                .collect(),
        )
    }

    #[test]
    fn test_self_comparison_is_zero() {
        let r = report(&[(1.0, 2.0, 3.0), (2.0, 3.0, 4.0)]);
        let cmp = compare(&r, &r);

        for (_, d) in cmp.components.iter() {
            assert_eq!(*d, ComponentDiff::default());
        }
    }

    #[test]
    fn test_zero_base_gives_signed_infinity() {
        let a = report(&[(0.0, 0.0, 0.0)]);
        let b = report(&[(5.0, 5.0, 5.0)]);

        let cmp = compare(&a, &b);
        assert_eq!(cmp.components.horizontal.mean_diff, 5.0);
        assert_eq!(cmp.components.horizontal.mean_diff_pct, f64::INFINITY);

        let back = compare(&b, &a);
        assert_eq!(back.components.e.mean_diff_pct, -100.0);

        let neg = diff_summary(&ComponentSummary::default(), &ComponentSummary {
            mean: -1.0,
            ..Default::default()
        });
        assert_eq!(neg.mean_diff_pct, f64::NEG_INFINITY);
    }

    #[test]
    fn test_relative_pct() {
        assert_eq!(relative_pct(1.0, 4.0), 25.0);
        assert_eq!(relative_pct(0.0, 0.0), 0.0);
        assert_eq!(relative_pct(-2.0, 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_reports_compare_to_zero() {
        let cmp = compare(&report(&[]), &report(&[]));
        assert_eq!(cmp, ComparisonReport::default());
    }
}
