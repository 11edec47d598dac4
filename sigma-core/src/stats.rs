//! Сводная статистика по последовательности эпох.

use sigma_types::{
    Component, ComponentSummary, Distribution, EpochSigma, PerComponent, SigmaReport,
};

/// Строит отчёт по эпохам. Пустой вход даёт `count == 0` и нулевые сводки.
pub fn summarize(epochs: Vec<EpochSigma>) -> SigmaReport {
    let values = PerComponent::from_fn(|c| component_values(&epochs, c));

    SigmaReport {
        summary: PerComponent::from_fn(|c| summarize_values(values.get(c))),
        distribution: PerComponent::from_fn(|c| distribution(values.get(c))),
        count: epochs.len(),
        epochs,
    }
}

/// Значения одной компоненты по всем эпохам.
pub fn component_values(
    epochs: &[EpochSigma],
    component: Component,
) -> Vec<f64> {
    epochs.iter().map(|e| e.value(component)).collect()
}

/// mean / min / max / популяционное std / rms.
pub fn summarize_values(values: &[f64]) -> ComponentSummary {
    if values.is_empty() {
        return ComponentSummary::default();
    }

    let n = values.len() as f64;
    let mean = mean(values);
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    ComponentSummary {
        mean,
        min,
        max,
        std: population_std(values, mean),
        rms: (values.iter().map(|v| v * v).sum::<f64>() / n).sqrt(),
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// СКО с делением на N.
pub fn population_std(
    values: &[f64],
    mean: f64,
) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Доля значений с `|x - mean| <= k * std`, %.
pub fn within_k_sigma(
    values: &[f64],
    mean: f64,
    std: f64,
    k: f64,
) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let inside = values
        .iter()
        .filter(|v| (*v - mean).abs() <= k * std)
        .count();

    inside as f64 / values.len() as f64 * 100.0
}

/// Доли в пределах 1σ и 2σ.
pub fn distribution(values: &[f64]) -> Distribution {
    let mean = mean(values);
    let std = population_std(values, mean);

    Distribution {
        within_1_sigma: within_k_sigma(values, mean, std, 1.0),
        within_2_sigma: within_k_sigma(values, mean, std, 2.0),
    }
}
