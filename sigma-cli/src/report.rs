//! Текстовое представление результатов для терминала.

use std::fmt;

use sigma_core::{Analysis, Comparison, ScatterReport, SyncSurvey};
use sigma_types::{Component, GAUSSIAN_WITHIN_1_SIGMA_PCT, GAUSSIAN_WITHIN_2_SIGMA_PCT};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Отчёт по одному файлу.
pub struct AnalysisView<'a> {
    pub label: &'a str,
    pub analysis: &'a Analysis,
}

/// Сравнение двух файлов.
pub struct ComparisonView<'a> {
    pub labels: (&'a str, &'a str),
    pub comparison: &'a Comparison,
}

pub struct ScatterView<'a>(pub &'a ScatterReport);

pub struct SurveyView<'a>(pub &'a SyncSurvey);

impl fmt::Display for AnalysisView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let a = self.analysis;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  File          : {}", self.label)?;
        writeln!(f, "  Format        : {}", a.format)?;
        writeln!(f, "  Epochs        : {}", a.report.count)?;
        if a.read_stats.lines_skipped > 0 {
            writeln!(f, "  Skipped lines : {}", a.read_stats.lines_skipped)?;
        }
        if let Some(d) = &a.decode_stats {
            writeln!(
                f,
                "  SBF blocks    : {} decoded, {} unknown, {} failed ({} sync markers)",
                d.blocks_decoded, d.blocks_unknown, d.blocks_failed, d.sync_markers
            )?;
        }
        writeln!(f, "{RULE}")?;

        if a.report.is_empty() {
            writeln!(f, "  No usable epochs")?;
        } else {
            writeln!(
                f,
                "  {:<11} {:>10} {:>10} {:>10} {:>10} {:>10} {:>7} {:>7}",
                "sigma, mm", "mean", "min", "max", "std", "rms", "≤1σ %", "≤2σ %"
            )?;
            for c in Component::ALL {
                let s = a.report.summary.get(c);
                let d = a.report.distribution.get(c);
                writeln!(
                    f,
                    "  {:<11} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>7.1} {:>7.1}",
                    c.as_str(),
                    s.mean,
                    s.min,
                    s.max,
                    s.std,
                    s.rms,
                    d.within_1_sigma,
                    d.within_2_sigma
                )?;
            }
            writeln!(
                f,
                "  (expected for a normal distribution: {GAUSSIAN_WITHIN_1_SIGMA_PCT}% / {GAUSSIAN_WITHIN_2_SIGMA_PCT}%)"
            )?;
        }

        for w in &a.warnings {
            writeln!(f, "  ⚠ {w}")?;
        }
        write!(f, "{RULE}")
    }
}

impl fmt::Display for ComparisonView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let cmp = self.comparison;

        writeln!(
            f,
            "{}",
            AnalysisView {
                label: self.labels.0,
                analysis: &cmp.first,
            }
        )?;
        writeln!(
            f,
            "{}",
            AnalysisView {
                label: self.labels.1,
                analysis: &cmp.second,
            }
        )?;

        writeln!(f, "  Difference (second − first), mm")?;
        writeln!(
            f,
            "  {:<11} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "mean", "rms", "max", "std", "mean %", "rms %"
        )?;
        for (c, d) in cmp.comparison.components.iter() {
            writeln!(
                f,
                "  {:<11} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10} {:>10}",
                c.as_str(),
                d.mean_diff,
                d.rms_diff,
                d.max_diff,
                d.std_diff,
                fmt_pct(d.mean_diff_pct),
                fmt_pct(d.rms_diff_pct)
            )?;
        }
        write!(f, "{RULE}")
    }
}

impl fmt::Display for ScatterView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  Positions     : {}", r.count)?;
        if r.read_stats.lines_skipped > 0 {
            writeln!(f, "  Skipped lines : {}", r.read_stats.lines_skipped)?;
        }
        if let Some(scale) = &r.scale {
            writeln!(
                f,
                "  Scale         : {:.1} m/° lat, {:.1} m/° lon",
                scale.lat_m, scale.lon_m
            )?;
        }
        writeln!(f, "{RULE}")?;

        for c in &r.components {
            writeln!(f, "  {} component", c.name)?;
            writeln!(f, "    Sigma (std dev)    : {:.3} m", c.sigma_m)?;
            writeln!(f, "    Mean               : {:.8}", c.mean)?;
            writeln!(
                f,
                "    Provided sigma     : {:.3} m (min {:.3}, max {:.3})",
                c.provided_sigma_m.mean, c.provided_sigma_m.min, c.provided_sigma_m.max
            )?;
            writeln!(
                f,
                "    Within 1σ / 2σ     : {:.1}% / {:.1}% (expected {GAUSSIAN_WITHIN_1_SIGMA_PCT}% / {GAUSSIAN_WITHIN_2_SIGMA_PCT}%)",
                c.within_1_sigma, c.within_2_sigma
            )?;
        }

        if let Some(p) = &r.position {
            writeln!(f, "  3D position")?;
            writeln!(f, "    Sigma              : {:.3} m", p.sigma_m)?;
            writeln!(
                f,
                "    Within 1σ / 2σ     : {:.1}% / {:.1}%",
                p.within_1_sigma, p.within_2_sigma
            )?;
        }

        if r.count > 0 {
            writeln!(f, "  Overall sigma        : {:.3} m", r.overall_sigma_m)?;
        }
        write!(f, "{RULE}")
    }
}

impl fmt::Display for SurveyView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let s = self.0;

        writeln!(f, "{RULE}")?;
        writeln!(f, "  Bytes         : {}", s.buffer_len)?;
        writeln!(f, "  Sync markers  : {}", s.sync_markers)?;

        if !s.common_distances.is_empty() {
            let distances: Vec<String> = s
                .common_distances
                .iter()
                .map(|(d, n)| format!("{d} B × {n}"))
                .collect();
            writeln!(f, "  Common steps  : {}", distances.join(", "))?;
        }

        for h in &s.samples {
            writeln!(
                f,
                "  @{:<10} crc=0x{:04x} id/len=0x{:04x} id=0x{:04x} class={}",
                h.offset, h.crc, h.id_length, h.block_id, h.length_class
            )?;
        }

        writeln!(f, "  Valid blocks by id:")?;
        for (id, n) in &s.block_ids {
            writeln!(f, "    0x{id:04x} : {n}")?;
        }
        writeln!(f, "  Valid blocks by length:")?;
        for (len, n) in &s.block_lengths {
            writeln!(f, "    {len:>6} B : {n}")?;
        }
        write!(f, "{RULE}")
    }
}

/// Проценты: ±∞ печатается словом.
fn fmt_pct(v: f64) -> String {
    if v == f64::INFINITY {
        "+inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v:.1}")
    }
}

#[cfg(test)]
mod tests {
    use sigma_core::{analyze_bytes, compare_analyses, FileFormat};

    use super::*;

    #[test]
    fn test_analysis_view_lists_components() {
        let analysis = analyze_bytes(
            b"2024/01/15 10:00:00.000 59.9 10.7 45.0 1 0.01 0.02 0.03 12 0\n",
            FileFormat::Llh,
        )
        .unwrap();
        let text = AnalysisView {
            label: "a.llh",
            analysis: &analysis,
        }
        .to_string();

        for c in Component::ALL {
            assert!(text.contains(c.as_str()), "нет компоненты {c}");
        }
        assert!(text.contains("a.llh"));
    }

    #[test]
    fn test_empty_analysis_view() {
        let analysis = analyze_bytes(b"", FileFormat::Xyz).unwrap();
        let text = AnalysisView {
            label: "empty.xyz",
            analysis: &analysis,
        }
        .to_string();

        assert!(text.contains("No usable epochs"));
    }

    #[test]
    fn test_comparison_view_prints_infinity() {
        let empty = analyze_bytes(b"", FileFormat::Llh).unwrap();
        let rinex = analyze_bytes(
            format!("{:<60}APPROX POSITION XYZ\n", "").as_bytes(),
            FileFormat::Rinex,
        )
        .unwrap();
        let cmp = compare_analyses(empty, rinex);
        let text = ComparisonView {
            labels: ("a", "b"),
            comparison: &cmp,
        }
        .to_string();

        assert!(text.contains("+inf"));
        assert!(text.contains("RINEX sigma uses fixed nominal accuracy"));
    }

    #[test]
    fn test_fmt_pct() {
        assert_eq!(fmt_pct(f64::INFINITY), "+inf");
        assert_eq!(fmt_pct(f64::NEG_INFINITY), "-inf");
        assert_eq!(fmt_pct(12.345), "12.3");
    }
}
