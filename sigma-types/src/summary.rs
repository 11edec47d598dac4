use serde::Serialize;

use crate::{EpochSigma, PerComponent};

/// Ожидаемая доля нормального распределения в пределах 1σ, %.
pub const GAUSSIAN_WITHIN_1_SIGMA_PCT: f64 = 68.27;

/// Ожидаемая доля нормального распределения в пределах 2σ, %.
pub const GAUSSIAN_WITHIN_2_SIGMA_PCT: f64 = 95.45;

/// Сводная статистика одной компоненты (миллиметры).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComponentSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Популяционное СКО (деление на N)
    pub std: f64,
    pub rms: f64,
}

/// Доля значений в пределах K·std от среднего, %.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Distribution {
    #[serde(rename = "within1Sigma")]
    pub within_1_sigma: f64,
    #[serde(rename = "within2Sigma")]
    pub within_2_sigma: f64,
}

/// Отчёт по одной последовательности эпох.
///
/// `count == 0` — штатное состояние «нет данных», а не ошибка: все сводки
/// нулевые.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SigmaReport {
    pub epochs: Vec<EpochSigma>,
    pub summary: PerComponent<ComponentSummary>,
    pub distribution: PerComponent<Distribution>,
    pub count: usize,
}

impl SigmaReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
