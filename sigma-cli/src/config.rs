use std::path::PathBuf;

use sigma_core::{AnalysisOptions, DEFAULT_MAX_INPUT_BYTES, DEFAULT_RESULT_CACHE_CAPACITY, REPORT_DECIMALS};

/// Формат вывода отчёта.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Таблица для терминала
    Text,
    /// Компактный JSON
    Json,
    /// JSON с отступами
    JsonPretty,
}

/// Полная конфигурация запуска анализатора.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Формат вывода
    pub output_format: OutputFormat,
    /// Куда писать результат (None = stdout)
    pub output_path: Option<PathBuf>,
    /// Ограничение размера входного файла (None = без ограничения)
    pub max_input_bytes: Option<u64>,
    /// Знаков после запятой в JSON отчёте
    pub decimals: u32,
    /// Сколько результатов держать в кэше сессии
    pub cache_capacity: usize,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl AnalyzerConfig {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            max_input_bytes: self.max_input_bytes,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OutputFormat, AnalyzerConfig
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for OutputFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonPretty => write!(f, "json-pretty"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "pretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!(
                "Unknown output format: '{s}'. Use: text, json, json-pretty"
            )),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Text,
            output_path: None,
            max_input_bytes: Some(DEFAULT_MAX_INPUT_BYTES),
            decimals: REPORT_DECIMALS,
            cache_capacity: DEFAULT_RESULT_CACHE_CAPACITY,
        }
    }
}

/// Парсит ограничение размера в байты.
///
/// Поддерживает суффиксы: `GB`, `MB`, `KB`, `B` (степени 1024,
/// регистронезависимо). `none` и `unlimited` снимают ограничение.
///
/// # Примеры
/// ```
/// use sigma_cli::config::parse_size_limit;
/// assert_eq!(parse_size_limit("16MB").unwrap(), Some(16 * 1024 * 1024));
/// assert_eq!(parse_size_limit("1.5kb").unwrap(), Some(1536));
/// assert_eq!(parse_size_limit("4096").unwrap(), Some(4096));
/// assert_eq!(parse_size_limit("none").unwrap(), None);
/// ```
pub fn parse_size_limit(s: &str) -> Result<Option<u64>, String> {
    let s = s.trim();
    let lower = s.to_lowercase();

    if matches!(lower.as_str(), "none" | "unlimited" | "off") {
        return Ok(None);
    }

    let (num_str, mult) = if let Some(v) = lower.strip_suffix("gb") {
        (v.trim(), 1024_f64 * 1024.0 * 1024.0)
    } else if let Some(v) = lower.strip_suffix("mb") {
        (v.trim(), 1024_f64 * 1024.0)
    } else if let Some(v) = lower.strip_suffix("kb") {
        (v.trim(), 1024_f64)
    } else if let Some(v) = lower.strip_suffix('b') {
        (v.trim(), 1_f64)
    } else {
        // Без суффикса — байты
        return s
            .parse::<u64>()
            .map(Some)
            .map_err(|e| format!("Invalid size '{s}': {e}"));
    };

    let n: f64 = num_str
        .parse()
        .map_err(|e| format!("Invalid size value '{num_str}': {e}"))?;

    if !n.is_finite() || n < 0.0 {
        return Err(format!("Invalid size value '{num_str}'"));
    }

    Ok(Some((n * mult).round() as u64))
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_limit() {
        assert_eq!(parse_size_limit("16MB").unwrap(), Some(16 * 1024 * 1024));
        assert_eq!(parse_size_limit("2 GB").unwrap(), Some(2 * 1024 * 1024 * 1024));
        assert_eq!(parse_size_limit("512kb").unwrap(), Some(512 * 1024));
        assert_eq!(parse_size_limit("100B").unwrap(), Some(100));
        assert_eq!(parse_size_limit("100").unwrap(), Some(100));
        assert_eq!(parse_size_limit("unlimited").unwrap(), None);
        assert!(parse_size_limit("abc").is_err());
        assert!(parse_size_limit("-5MB").is_err());
    }

    #[test]
    fn test_output_format_fromstr() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "json-pretty".parse::<OutputFormat>().unwrap(),
            OutputFormat::JsonPretty
        );
        assert!("pdf".parse::<OutputFormat>().is_err());

        for f in [OutputFormat::Text, OutputFormat::Json, OutputFormat::JsonPretty] {
            assert_eq!(f.to_string().parse::<OutputFormat>().unwrap(), f);
        }
    }

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();

        assert_eq!(config.max_input_bytes, Some(16 * 1024 * 1024));
        assert_eq!(config.cache_capacity, 10);
        assert_eq!(config.analysis_options().max_input_bytes, config.max_input_bytes);
    }
}
