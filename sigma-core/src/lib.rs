//! Извлечение и сравнение sigma GNSS решений.
//!
//! Конвейер: декодер SBF блоков ([`sbf`]) → читатели форматов ([`readers`]),
//! приводящие любой источник к последовательности [`EpochSigma`] → сводная
//! статистика ([`stats`]) → сравнение двух отчётов ([`compare`]).
//!
//! # Быстрый старт
//!
//! ```no_run
//! use std::path::Path;
//! use sigma_core::{analyze_path, compare_analyses, AnalysisOptions};
//!
//! let options = AnalysisOptions::default();
//! let base = analyze_path(Path::new("base.sbf"), &options)?;
//! let rover = analyze_path(Path::new("rover.llh"), &options)?;
//!
//! let cmp = compare_analyses(base, rover);
//! println!("{}", cmp.comparison.components.horizontal.mean_diff_pct);
//! # Ok::<(), sigma_types::SigmaError>(())
//! ```

pub mod analysis;
pub mod binary;
pub mod cache;
pub mod compare;
pub mod format;
pub mod geodetic;
pub mod readers;
pub mod sbf;
pub mod serialization;
pub mod stats;

pub use analysis::*;
pub use cache::*;
pub use compare::*;
pub use format::*;
pub use geodetic::*;
pub use readers::{reader_for, EpochReader, ReadOutcome, ReadStats};
pub use sbf::{BlockRegistry, DecodeStats, SbfDecoder, SyncSurvey};
pub use serialization::*;
pub use stats::*;

pub use sigma_types::{
    Approximation, ComparisonReport, Component, EpochSigma, EpochTime, PerComponent,
    SigmaError, SigmaReport, SigmaResult,
};

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
