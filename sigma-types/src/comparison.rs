use serde::{Serialize, Serializer};

use crate::PerComponent;

/// Разница статистик одной компоненты (второй отчёт минус первый).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDiff {
    pub mean_diff: f64,
    pub rms_diff: f64,
    pub max_diff: f64,
    pub std_diff: f64,
    /// `mean_diff / first.mean * 100`, ±∞ при `first.mean == 0`
    #[serde(serialize_with = "serialize_pct")]
    pub mean_diff_pct: f64,
    /// `rms_diff / first.rms * 100`, ±∞ при `first.rms == 0`
    #[serde(serialize_with = "serialize_pct")]
    pub rms_diff_pct: f64,
}

/// Отчёт сравнения двух [`SigmaReport`](crate::SigmaReport).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonReport {
    pub components: PerComponent<ComponentDiff>,
}

/// В JSON нет литерала бесконечности: ±∞ пишется строкой `"Infinity"` /
/// `"-Infinity"`.
fn serialize_pct<S: Serializer>(
    value: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        let s = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        serializer.serialize_str(s)
    } else {
        serializer.serialize_f64(*value)
    }
}
