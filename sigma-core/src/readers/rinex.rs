//! Заглушка RINEX: sigma не вычисляется из наблюдений.
//!
//! Для каждой записи заголовка `APPROX POSITION XYZ` выдаётся одна эпоха с
//! номинальной точностью. Результат всегда сопровождается предупреждением
//! [`Approximation::NominalRinexAccuracy`].

use log::{debug, info};
use sigma_types::{Approximation, EpochSigma, EpochTime, SigmaResult};

use super::{EpochReader, ReadOutcome};
use crate::format::FileFormat;

/// Номинальная горизонтальная sigma (E и N), мм
pub const RINEX_NOMINAL_HORIZONTAL_MM: f64 = 10_000.0;

/// Номинальная вертикальная sigma, мм
pub const RINEX_NOMINAL_VERTICAL_MM: f64 = 15_000.0;

pub const LABEL_APPROX_POSITION: &str = "APPROX POSITION XYZ";
pub const LABEL_FIRST_OBS: &str = "TIME OF FIRST OBS";
pub const LABEL_END_OF_HEADER: &str = "END OF HEADER";

/// Метка заголовка RINEX занимает колонки 61-80.
const HEADER_VALUE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct RinexReader;

impl RinexReader {
    pub fn read_str(
        &self,
        text: &str,
    ) -> ReadOutcome {
        let mut outcome = ReadOutcome::default();
        let mut first_obs: Option<String> = None;
        let mut approx_positions = 0usize;

        // Метка времени известна только после всего заголовка: в RINEX
        // `TIME OF FIRST OBS` обычно идёт после `APPROX POSITION XYZ`.
        for line in text.lines() {
            outcome.stats.lines_read += 1;

            if line.contains(LABEL_END_OF_HEADER) {
                debug!("RINEX header ends at line {}", outcome.stats.lines_read);
                break;
            }

            if line.contains(LABEL_FIRST_OBS) {
                first_obs = Some(format_first_obs(header_value(line)));
            } else if line.contains(LABEL_APPROX_POSITION) {
                approx_positions += 1;
            }
        }

        let label = first_obs.unwrap_or_else(|| LABEL_APPROX_POSITION.to_string());
        for _ in 0..approx_positions {
            outcome.push_epoch(EpochSigma::new(
                EpochTime::Label(label.clone()),
                RINEX_NOMINAL_HORIZONTAL_MM,
                RINEX_NOMINAL_HORIZONTAL_MM,
                RINEX_NOMINAL_VERTICAL_MM,
            ));
        }

        outcome.raise(Approximation::NominalRinexAccuracy);
        info!(
            "RINEX: {} header lines, {} nominal epochs",
            outcome.stats.lines_read, outcome.stats.epochs
        );

        outcome
    }
}

impl EpochReader for RinexReader {
    fn format(&self) -> FileFormat {
        FileFormat::Rinex
    }

    fn read(
        &self,
        input: &[u8],
    ) -> SigmaResult<ReadOutcome> {
        Ok(self.read_str(&String::from_utf8_lossy(input)))
    }
}

/// Поле значения записи заголовка (колонки 1-60).
fn header_value(line: &str) -> &str {
    line.get(..HEADER_VALUE_WIDTH).unwrap_or(line)
}

/// `"  2024     1    15    10     0    0.0000000     GPS"` →
/// `"2024/01/15 10:00:00.0000000"`.
///
/// Если поля не разбираются, возвращает значение как есть, со сжатыми
/// пробелами.
fn format_first_obs(value: &str) -> String {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    parse_first_obs(&tokens).unwrap_or_else(|| tokens.join(" "))
}

fn parse_first_obs(tokens: &[&str]) -> Option<String> {
    let year: u32 = tokens.first()?.parse().ok()?;
    let month: u32 = tokens.get(1)?.parse().ok()?;
    let day: u32 = tokens.get(2)?.parse().ok()?;
    let hour: u32 = tokens.get(3)?.parse().ok()?;
    let minute: u32 = tokens.get(4)?.parse().ok()?;
    let seconds = *tokens.get(5)?;
    seconds.parse::<f64>().ok()?;

    // Секунды до двух цифр целой части: "0.0000000" → "00.0000000"
    let pad = if seconds.find('.') == Some(1) { "0" } else { "" };

    Some(format!(
        "{year:04}/{month:02}/{day:02} {hour:02}:{minute:02}:{pad}{seconds}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_line(
        value: &str,
        label: &str,
    ) -> String {
        format!("{value:<60}{label:<20}")
    }

    #[test]
    fn test_one_nominal_epoch_per_approx_position() {
        let text = [
            header_line("     3.04           OBSERVATION DATA    M", "RINEX VERSION / TYPE"),
            header_line("  3172000.0000   604000.0000  5491000.0000", LABEL_APPROX_POSITION),
            header_line("  3172001.0000   604001.0000  5491001.0000", LABEL_APPROX_POSITION),
            header_line("", LABEL_END_OF_HEADER),
            header_line("  1.0 2.0 3.0", LABEL_APPROX_POSITION),
        ]
        .join("\n");

        let outcome = RinexReader.read_str(&text);

        assert_eq!(outcome.epochs.len(), 2, "после END OF HEADER записи не читаются");
        for epoch in &outcome.epochs {
            assert_eq!(epoch.e_mm, 10_000.0);
            assert_eq!(epoch.n_mm, 10_000.0);
            assert_eq!(epoch.u_mm, 15_000.0);
            assert_eq!(epoch.time.to_string(), LABEL_APPROX_POSITION);
        }
        assert_eq!(outcome.warnings, vec![Approximation::NominalRinexAccuracy]);
    }

    #[test]
    fn test_first_obs_time_used_as_label() {
        let text = [
            header_line(
                "  2024     1    15    10     0    0.0000000     GPS",
                LABEL_FIRST_OBS,
            ),
            header_line("  3172000.0000   604000.0000  5491000.0000", LABEL_APPROX_POSITION),
        ]
        .join("\n");

        let outcome = RinexReader.read_str(&text);

        assert_eq!(
            outcome.epochs[0].time.to_string(),
            "2024/01/15 10:00:00.0000000"
        );
    }

    #[test]
    fn test_first_obs_after_approx_position_still_labels_epoch() {
        let text = [
            header_line("     3.04           OBSERVATION DATA    M", "RINEX VERSION / TYPE"),
            header_line("  3172000.0000   604000.0000  5491000.0000", LABEL_APPROX_POSITION),
            header_line(
                "  2024     1    15    10     0    0.0000000     GPS",
                LABEL_FIRST_OBS,
            ),
            header_line("", LABEL_END_OF_HEADER),
            header_line(
                "  2030     1     1     0     0    0.0000000     GPS",
                LABEL_FIRST_OBS,
            ),
        ]
        .join("\n");

        let outcome = RinexReader.read_str(&text);

        assert_eq!(outcome.epochs.len(), 1);
        assert_eq!(
            outcome.epochs[0].time.to_string(),
            "2024/01/15 10:00:00.0000000"
        );
    }

    #[test]
    fn test_warning_raised_without_epochs() {
        let outcome = RinexReader.read_str("garbage\n");

        assert!(outcome.epochs.is_empty());
        assert_eq!(outcome.warnings, vec![Approximation::NominalRinexAccuracy]);
    }

    #[test]
    fn test_unparsable_first_obs_kept_verbatim() {
        assert_eq!(format_first_obs("  soon   GPS "), "soon GPS");
        assert_eq!(
            format_first_obs("  2023    12    31    23    59   59.5000000"),
            "2023/12/31 23:59:59.5000000"
        );
    }
}
