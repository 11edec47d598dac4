use std::io::Write;

use serde::Serialize;
use sigma_types::{ComponentSummary, SigmaReport};

/// Знаков после запятой в выводимых отчётах (мм).
pub const REPORT_DECIMALS: u32 = 3;

pub fn to_json_string<T: Serialize>(
    value: &T,
    pretty: bool,
) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub fn write_json<T: Serialize, W: Write>(
    writer: W,
    value: &T,
    pretty: bool,
) -> serde_json::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)
    } else {
        serde_json::to_writer(writer, value)
    }
}

/// Округление до `decimals` знаков; бесконечности и NaN не трогаются.
pub fn round_to(
    value: f64,
    decimals: u32,
) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Копия отчёта с округлёнными значениями эпох и сводок.
///
/// Проценты распределения не округляются.
pub fn round_report(
    report: &SigmaReport,
    decimals: u32,
) -> SigmaReport {
    let epochs = report
        .epochs
        .iter()
        .map(|e| {
            let mut e = e.clone();
            e.e_mm = round_to(e.e_mm, decimals);
            e.n_mm = round_to(e.n_mm, decimals);
            e.u_mm = round_to(e.u_mm, decimals);
            e
        })
        .collect();

    SigmaReport {
        epochs,
        summary: report.summary.map(|s| ComponentSummary {
            mean: round_to(s.mean, decimals),
            min: round_to(s.min, decimals),
            max: round_to(s.max, decimals),
            std: round_to(s.std, decimals),
            rms: round_to(s.rms, decimals),
        }),
        distribution: report.distribution,
        count: report.count,
    }
}
