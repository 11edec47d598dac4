//! Точки входа уровня файла: чтение, определение формата, отчёт.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;
use sigma_types::{Approximation, ComparisonReport, SigmaError, SigmaReport, SigmaResult};

use crate::{
    compare::compare,
    format::FileFormat,
    geodetic::{scatter_text, ScatterReport},
    readers::{reader_for, ReadStats},
    sbf::{survey, DecodeStats, SyncSurvey},
    stats::summarize,
};

/// Ограничение размера входа по умолчанию (16 МБ, как у веб-загрузки).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// `None` — без ограничения
    pub max_input_bytes: Option<u64>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
        }
    }
}

/// Отчёт по одному источнику вместе с диагностикой чтения.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub format: FileFormat,
    #[serde(flatten)]
    pub report: SigmaReport,
    pub warnings: Vec<Approximation>,
    #[serde(rename = "readStats")]
    pub read_stats: ReadStats,
    #[serde(rename = "decodeStats", skip_serializing_if = "Option::is_none")]
    pub decode_stats: Option<DecodeStats>,
}

/// Два отчёта и их разница (второй минус первый).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: Analysis,
    pub second: Analysis,
    pub comparison: ComparisonReport,
}

/// Читает файл целиком, проверяя существование и размер.
pub fn read_source(
    path: &Path,
    options: &AnalysisOptions,
) -> SigmaResult<Vec<u8>> {
    let meta = fs::metadata(path).map_err(|e| not_found_or_io(e, path))?;

    if let Some(limit) = options.max_input_bytes {
        if meta.len() > limit {
            return Err(SigmaError::InputTooLarge {
                size: meta.len(),
                limit,
            });
        }
    }

    fs::read(path).map_err(|e| not_found_or_io(e, path))
}

fn not_found_or_io(
    e: std::io::Error,
    path: &Path,
) -> SigmaError {
    if e.kind() == ErrorKind::NotFound {
        SigmaError::SourceNotFound(path.to_path_buf())
    } else {
        SigmaError::Io(e)
    }
}

/// Отчёт по содержимому в памяти.
pub fn analyze_bytes(
    bytes: &[u8],
    format: FileFormat,
) -> SigmaResult<Analysis> {
    let outcome = reader_for(format).read(bytes)?;
    let report = summarize(outcome.epochs);

    info!("{format}: {} epochs summarized", report.count);

    Ok(Analysis {
        format,
        report,
        warnings: outcome.warnings,
        read_stats: outcome.stats,
        decode_stats: outcome.decode,
    })
}

/// Формат определяется по расширению до чтения файла.
pub fn analyze_path(
    path: &Path,
    options: &AnalysisOptions,
) -> SigmaResult<Analysis> {
    let format = FileFormat::from_path(path)?;
    let bytes = read_source(path, options)?;

    analyze_bytes(&bytes, format)
}

pub fn compare_analyses(
    first: Analysis,
    second: Analysis,
) -> Comparison {
    let comparison = compare(&first.report, &second.report);
    Comparison {
        first,
        second,
        comparison,
    }
}

pub fn compare_paths(
    first: &Path,
    second: &Path,
    options: &AnalysisOptions,
) -> SigmaResult<Comparison> {
    Ok(compare_analyses(
        analyze_path(first, options)?,
        analyze_path(second, options)?,
    ))
}

/// Разброс координат LLH / XYZ файла.
pub fn scatter_path(
    path: &Path,
    options: &AnalysisOptions,
) -> SigmaResult<ScatterReport> {
    let format = FileFormat::from_path(path)?;
    let bytes = read_source(path, options)?;

    scatter_text(&String::from_utf8_lossy(&bytes), format)
}

/// Обзор sync-маркеров SBF файла (расширение не проверяется).
pub fn inspect_path(
    path: &Path,
    options: &AnalysisOptions,
) -> SigmaResult<SyncSurvey> {
    Ok(survey(&read_source(path, options)?))
}

/// Ключ кэша результатов: канонический путь, если он доступен.
pub fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
