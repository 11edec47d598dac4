//! Читатели исходных форматов.
//!
//! Каждый читатель превращает содержимое файла в последовательность
//! [`EpochSigma`] в порядке появления записей. Повреждённые строки и блоки
//! пропускаются с записью в лог; фатальны только ошибки уровня файла.

pub mod ascii;
pub mod rinex;
pub mod sbf;

pub use ascii::*;
pub use rinex::*;
pub use sbf::*;

use log::warn;
use serde::Serialize;
use sigma_types::{Approximation, EpochSigma, SigmaResult};

use crate::{format::FileFormat, sbf::DecodeStats};

/// Множитель метры → миллиметры.
pub const MM_PER_M: f64 = 1000.0;

/// Статистика, накопленная текстовым читателем.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadStats {
    /// Всего просмотрено строк.
    pub lines_read: u64,
    /// Строки, отброшенные как повреждённые (комментарии не считаются).
    pub lines_skipped: u64,
    /// Получено эпох.
    pub epochs: u64,
}

/// Итог чтения одного источника.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutcome {
    pub epochs: Vec<EpochSigma>,
    /// Приближения, использованные при чтении (без повторов).
    pub warnings: Vec<Approximation>,
    pub stats: ReadStats,
    /// Только для SBF.
    pub decode: Option<DecodeStats>,
}

impl ReadOutcome {
    /// Добавляет предупреждение, если его ещё нет, и пишет его в лог.
    pub fn raise(
        &mut self,
        approximation: Approximation,
    ) {
        if !self.warnings.contains(&approximation) {
            warn!("{approximation}");
            self.warnings.push(approximation);
        }
    }

    pub fn push_epoch(
        &mut self,
        epoch: EpochSigma,
    ) {
        self.epochs.push(epoch);
        self.stats.epochs += 1;
    }
}

/// Читатель одного формата.
pub trait EpochReader {
    fn format(&self) -> FileFormat;

    fn read(
        &self,
        input: &[u8],
    ) -> SigmaResult<ReadOutcome>;
}

/// Читатель по умолчанию для формата.
pub fn reader_for(format: FileFormat) -> Box<dyn EpochReader> {
    match format {
        FileFormat::Sbf => Box::new(SbfReader::new()),
        FileFormat::Xyz => Box::new(AsciiReader::new(AsciiLayout::Xyz)),
        FileFormat::Llh => Box::new(AsciiReader::new(AsciiLayout::Llh)),
        FileFormat::Rinex => Box::new(RinexReader),
    }
}

/// Строка — комментарий (`%`, `#`) или пустая.
pub(crate) fn is_ignorable_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('%') || trimmed.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_for_matches_format() {
        for format in [
            FileFormat::Sbf,
            FileFormat::Xyz,
            FileFormat::Llh,
            FileFormat::Rinex,
        ] {
            assert_eq!(reader_for(format).format(), format);
        }
    }

    #[test]
    fn test_warnings_are_deduplicated() {
        let mut outcome = ReadOutcome::default();
        outcome.raise(Approximation::NominalRinexAccuracy);
        outcome.raise(Approximation::NominalRinexAccuracy);

        assert_eq!(outcome.warnings, vec![Approximation::NominalRinexAccuracy]);
    }

    #[test]
    fn test_ignorable_lines() {
        assert!(is_ignorable_line(""));
        assert!(is_ignorable_line("   "));
        assert!(is_ignorable_line("% header"));
        assert!(is_ignorable_line("  # note"));
        assert!(!is_ignorable_line("2024/01/15 10:00:00.000 1 2 3"));
    }
}
