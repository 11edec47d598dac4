use log::{debug, info, warn};
use sigma_types::{EpochSigma, EpochTime, SigmaError, SigmaResult};

use super::{is_ignorable_line, EpochReader, ReadOutcome, MM_PER_M};
use crate::format::FileFormat;

/// Минимальное число токенов в строке данных.
pub const MIN_TOKENS: usize = 10;

/// Раскладка колонок ASCII файла.
///
/// ```text
/// LLH: date time lat lon height Q  sde sdn sdu ...
/// XYZ: date time x   y   z      Q  ns  sdx sdy sdz ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsciiLayout {
    Llh,
    Xyz,
}

impl AsciiLayout {
    /// Индексы колонок sigma (E, N, U).
    pub fn sigma_columns(&self) -> [usize; 3] {
        match self {
            AsciiLayout::Llh => [6, 7, 8],
            AsciiLayout::Xyz => [7, 8, 9],
        }
    }

    pub fn format(&self) -> FileFormat {
        match self {
            AsciiLayout::Llh => FileFormat::Llh,
            AsciiLayout::Xyz => FileFormat::Xyz,
        }
    }
}

/// Читатель ASCII файлов LLH и XYZ.
#[derive(Debug, Clone, Copy)]
pub struct AsciiReader {
    layout: AsciiLayout,
}

impl AsciiReader {
    pub fn new(layout: AsciiLayout) -> Self {
        Self { layout }
    }

    /// Читает текст построчно.
    pub fn read_str(
        &self,
        text: &str,
    ) -> ReadOutcome {
        let mut outcome = ReadOutcome::default();

        for (idx, line) in text.lines().enumerate() {
            outcome.stats.lines_read += 1;

            match parse_line(line, self.layout) {
                Ok(Some(epoch)) => outcome.push_epoch(epoch),
                Ok(None) => {}
                Err(e) => {
                    outcome.stats.lines_skipped += 1;
                    debug!("{} line {}: {e}", self.layout.format(), idx + 1);
                }
            }
        }

        if outcome.stats.lines_skipped > 0 {
            warn!(
                "{}: skipped {} malformed line(s)",
                self.layout.format(),
                outcome.stats.lines_skipped
            );
        }
        info!(
            "{}: {} lines, {} epochs",
            self.layout.format(),
            outcome.stats.lines_read,
            outcome.stats.epochs
        );

        outcome
    }
}

impl EpochReader for AsciiReader {
    fn format(&self) -> FileFormat {
        self.layout.format()
    }

    fn read(
        &self,
        input: &[u8],
    ) -> SigmaResult<ReadOutcome> {
        Ok(self.read_str(&String::from_utf8_lossy(input)))
    }
}

/// Разбирает одну строку.
///
/// `Ok(None)` для комментариев и пустых строк; `Err` для строки, которую
/// нужно пропустить.
pub fn parse_line(
    line: &str,
    layout: AsciiLayout,
) -> SigmaResult<Option<EpochSigma>> {
    if is_ignorable_line(line) {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(SigmaError::malformed(format!(
            "expected at least {MIN_TOKENS} columns, got {}",
            tokens.len()
        )));
    }

    let [e_col, n_col, u_col] = layout.sigma_columns();
    let time = EpochTime::Label(format!("{} {}", tokens[0], tokens[1]));

    Ok(Some(EpochSigma::new(
        time,
        parse_sigma_mm(&tokens, e_col)?,
        parse_sigma_mm(&tokens, n_col)?,
        parse_sigma_mm(&tokens, u_col)?,
    )))
}

/// Sigma в миллиметрах; переполнение при пересчёте из метров — ошибка строки.
fn parse_sigma_mm(
    tokens: &[&str],
    col: usize,
) -> SigmaResult<f64> {
    let mm = parse_sigma(tokens, col)? * MM_PER_M;

    if !mm.is_finite() {
        return Err(SigmaError::malformed(format!(
            "column {col}: sigma overflows in millimetres"
        )));
    }

    Ok(mm)
}

/// Неотрицательное конечное число из колонки `col`.
pub(crate) fn parse_sigma(
    tokens: &[&str],
    col: usize,
) -> SigmaResult<f64> {
    let value = parse_number(tokens, col)?;

    if value < 0.0 {
        return Err(SigmaError::malformed(format!(
            "negative sigma {value} in column {col}"
        )));
    }

    Ok(value)
}

/// Конечное число из колонки `col`.
pub(crate) fn parse_number(
    tokens: &[&str],
    col: usize,
) -> SigmaResult<f64> {
    let token = tokens
        .get(col)
        .ok_or_else(|| SigmaError::malformed(format!("missing column {col}")))?;

    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SigmaError::malformed(format!(
            "column {col}: '{token}' is not a finite number"
        ))),
    }
}
