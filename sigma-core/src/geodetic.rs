//! Разброс координат по ASCII решениям (LLH / XYZ).
//!
//! В отличие от [`crate::stats`], который агрегирует sigma, заявленную
//! приёмником, здесь sigma оценивается по самим координатам: СКО отклонений от
//! среднего положения. Заявленная sigma выводится рядом для сравнения.

use log::{debug, info, warn};
use serde::Serialize;
use sigma_types::{SigmaError, SigmaResult};

use crate::{
    format::FileFormat,
    readers::{
        ascii::{parse_number, parse_sigma},
        is_ignorable_line, AsciiLayout, ReadStats, MIN_TOKENS,
    },
    stats::{mean, population_std, within_k_sigma},
};

/// Метров в одном градусе широты.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

/// Колонки координат (общие для LLH и XYZ).
const POSITION_COLUMNS: [usize; 3] = [2, 3, 4];

/// Колонки заявленной sigma координат: после статуса и числа спутников.
///
/// Не совпадают с колонками LLH отчёта по sigma ([`AsciiLayout::sigma_columns`]).
pub const PROVIDED_SIGMA_COLUMNS: [usize; 3] = [7, 8, 9];

/// Пересчёт градусов в метры, один на весь набор данных.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeScale {
    pub lat_m: f64,
    pub lon_m: f64,
}

impl DegreeScale {
    /// Долготный масштаб `cos(средняя широта) * 111320`.
    pub fn at_mean_latitude(mean_lat_deg: f64) -> Self {
        Self {
            lat_m: METERS_PER_DEGREE_LAT,
            lon_m: mean_lat_deg.to_radians().cos() * METERS_PER_DEGREE_LAT,
        }
    }
}

/// Одна строка решения: координаты и заявленная sigma.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    pub time: String,
    /// lat/lon (градусы) и высота (м) либо X/Y/Z (м)
    pub coords: [f64; 3],
    /// Заявленная sigma в единицах соответствующей координаты
    pub provided_sigma: [f64; 3],
}

/// Заявленная sigma компоненты, в метрах.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProvidedSigma {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterComponent {
    pub name: &'static str,
    /// СКО отклонений от среднего, м
    pub sigma_m: f64,
    /// Среднее в исходных единицах (градусы для lat/lon)
    pub mean: f64,
    pub provided_sigma_m: ProvidedSigma,
    #[serde(rename = "within1Sigma")]
    pub within_1_sigma: f64,
    #[serde(rename = "within2Sigma")]
    pub within_2_sigma: f64,
}

/// Разброс 3D положения: расстояния от среднего положения.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionScatter {
    pub sigma_m: f64,
    #[serde(rename = "within1Sigma")]
    pub within_1_sigma: f64,
    #[serde(rename = "within2Sigma")]
    pub within_2_sigma: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterReport {
    pub count: usize,
    pub components: Vec<ScatterComponent>,
    /// `sqrt(Σ sigma²)` по компонентам
    pub overall_sigma_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<DegreeScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionScatter>,
    #[serde(rename = "readStats")]
    pub read_stats: ReadStats,
}

/// Читает координаты из LLH / XYZ текста. Повреждённые строки пропускаются.
pub fn read_positions(
    text: &str,
    layout: AsciiLayout,
) -> (Vec<PositionSample>, ReadStats) {
    let mut samples = Vec::new();
    let mut stats = ReadStats::default();

    for (idx, line) in text.lines().enumerate() {
        stats.lines_read += 1;
        if is_ignorable_line(line) {
            continue;
        }

        match parse_position(line) {
            Ok(sample) => {
                samples.push(sample);
                stats.epochs += 1;
            }
            Err(e) => {
                stats.lines_skipped += 1;
                debug!("{} line {}: {e}", layout.format(), idx + 1);
            }
        }
    }

    (samples, stats)
}

fn parse_position(line: &str) -> SigmaResult<PositionSample> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(SigmaError::malformed(format!(
            "expected at least {MIN_TOKENS} columns, got {}",
            tokens.len()
        )));
    }

    let mut coords = [0.0; 3];
    for (slot, col) in coords.iter_mut().zip(POSITION_COLUMNS) {
        *slot = parse_number(&tokens, col)?;
    }

    let mut provided_sigma = [0.0; 3];
    for (slot, col) in provided_sigma.iter_mut().zip(PROVIDED_SIGMA_COLUMNS) {
        *slot = parse_sigma(&tokens, col)?;
    }

    Ok(PositionSample {
        time: format!("{} {}", tokens[0], tokens[1]),
        coords,
        provided_sigma,
    })
}

/// Разброс LLH: широта и долгота в метрах через [`DegreeScale`], высота как
/// есть.
pub fn scatter_llh(samples: &[PositionSample]) -> ScatterReport {
    if samples.is_empty() {
        return ScatterReport::default();
    }

    let lat_mean = mean(&column(samples, |s| s.coords[0]));
    let scale = DegreeScale::at_mean_latitude(lat_mean);
    let factors = [scale.lat_m, scale.lon_m, 1.0];

    let components: Vec<ScatterComponent> = ["Latitude", "Longitude", "Height"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| scatter_component(samples, i, name, factors[i]))
        .collect();

    info!("LLH scatter over {} samples", samples.len());

    ScatterReport {
        count: samples.len(),
        overall_sigma_m: overall_sigma(&components),
        components,
        scale: Some(scale),
        position: None,
        ..Default::default()
    }
}

/// Разброс XYZ по осям плюс анализ 3D положения.
pub fn scatter_xyz(samples: &[PositionSample]) -> ScatterReport {
    if samples.is_empty() {
        return ScatterReport::default();
    }

    let components: Vec<ScatterComponent> = ["X", "Y", "Z"]
        .into_iter()
        .enumerate()
        .map(|(i, name)| scatter_component(samples, i, name, 1.0))
        .collect();

    info!("XYZ scatter over {} samples", samples.len());

    ScatterReport {
        count: samples.len(),
        overall_sigma_m: overall_sigma(&components),
        components,
        scale: None,
        position: Some(position_scatter(samples)),
        ..Default::default()
    }
}

/// Разброс по тексту файла заданного формата (только LLH и XYZ).
pub fn scatter_text(
    text: &str,
    format: FileFormat,
) -> SigmaResult<ScatterReport> {
    let layout = match format {
        FileFormat::Llh => AsciiLayout::Llh,
        FileFormat::Xyz => AsciiLayout::Xyz,
        other => {
            return Err(SigmaError::unsupported_format(format!(
                "scatter analysis needs LLH or XYZ coordinates, got {other}"
            )))
        }
    };

    let (samples, read_stats) = read_positions(text, layout);
    if read_stats.lines_skipped > 0 {
        warn!(
            "{}: skipped {} malformed line(s)",
            layout.format(),
            read_stats.lines_skipped
        );
    }

    let report = match layout {
        AsciiLayout::Llh => scatter_llh(&samples),
        AsciiLayout::Xyz => scatter_xyz(&samples),
    };

    Ok(ScatterReport {
        read_stats,
        ..report
    })
}

fn column<F: Fn(&PositionSample) -> f64>(
    samples: &[PositionSample],
    f: F,
) -> Vec<f64> {
    samples.iter().map(f).collect()
}

/// `factor` переводит единицы компоненты в метры (1.0 для метров).
fn scatter_component(
    samples: &[PositionSample],
    idx: usize,
    name: &'static str,
    factor: f64,
) -> ScatterComponent {
    let values = column(samples, |s| s.coords[idx]);
    let values_mean = mean(&values);
    let deviations_m: Vec<f64> = values.iter().map(|v| (v - values_mean) * factor).collect();
    let sigma_m = population_std(&deviations_m, 0.0);

    let provided: Vec<f64> = column(samples, |s| s.provided_sigma[idx] * factor);
    let provided_sigma_m = ProvidedSigma {
        mean: mean(&provided),
        min: provided.iter().copied().fold(f64::INFINITY, f64::min),
        max: provided.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    };

    ScatterComponent {
        name,
        sigma_m,
        mean: values_mean,
        provided_sigma_m,
        within_1_sigma: within_k_sigma(&deviations_m, 0.0, sigma_m, 1.0),
        within_2_sigma: within_k_sigma(&deviations_m, 0.0, sigma_m, 2.0),
    }
}

fn overall_sigma(components: &[ScatterComponent]) -> f64 {
    components
        .iter()
        .map(|c| c.sigma_m * c.sigma_m)
        .sum::<f64>()
        .sqrt()
}

fn position_scatter(samples: &[PositionSample]) -> PositionScatter {
    let center: Vec<f64> = (0..3)
        .map(|i| mean(&column(samples, |s| s.coords[i])))
        .collect();

    let distances: Vec<f64> = samples
        .iter()
        .map(|s| {
            s.coords
                .iter()
                .zip(&center)
                .map(|(c, m)| (c - m).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect();

    let sigma_m = population_std(&distances, mean(&distances));
    let share = |k: f64| {
        distances.iter().filter(|d| **d <= k * sigma_m).count() as f64 / distances.len() as f64
            * 100.0
    };

    PositionScatter {
        sigma_m,
        within_1_sigma: share(1.0),
        within_2_sigma: share(2.0),
    }
}
