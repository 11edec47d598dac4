use std::path::Path;

use serde::Serialize;
use sigma_types::{SigmaError, SigmaResult};

/// Кодировка исходного файла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Septentrio Binary Format
    Sbf,
    /// ASCII, декартовы координаты
    Xyz,
    /// ASCII, широта/долгота/высота
    Llh,
    /// RINEX наблюдения (только заголовок)
    Rinex,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl FileFormat {
    /// Определяет формат по расширению (без учёта регистра).
    pub fn from_path(path: &Path) -> SigmaResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                SigmaError::unsupported_format(format!("{} has no extension", path.display()))
            })?;

        Self::from_extension(ext)
    }

    pub fn from_extension(ext: &str) -> SigmaResult<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "sbf" => Ok(FileFormat::Sbf),
            "xyz" => Ok(FileFormat::Xyz),
            "llh" => Ok(FileFormat::Llh),
            "rnx" | "obs" => Ok(FileFormat::Rinex),
            _ => Err(SigmaError::unsupported_format(format!(".{ext}"))),
        }
    }

    /// `true` для форматов, которые читаются как текст.
    pub fn is_text(&self) -> bool {
        !matches!(self, FileFormat::Sbf)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для FileFormat
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for FileFormat {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            FileFormat::Sbf => write!(f, "sbf"),
            FileFormat::Xyz => write!(f, "xyz"),
            FileFormat::Llh => write!(f, "llh"),
            FileFormat::Rinex => write!(f, "rinex"),
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = SigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rinex" => Ok(FileFormat::Rinex),
            other => Self::from_extension(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_detect_by_extension() {
        let cases = [
            ("a.sbf", FileFormat::Sbf),
            ("a.SBF", FileFormat::Sbf),
            ("dir/b.xyz", FileFormat::Xyz),
            ("c.Llh", FileFormat::Llh),
            ("d.rnx", FileFormat::Rinex),
            ("e.OBS", FileFormat::Rinex),
        ];

        for (path, expected) in cases {
            assert_eq!(
                FileFormat::from_path(&PathBuf::from(path)).unwrap(),
                expected,
                "{path}"
            );
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = FileFormat::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, SigmaError::UnsupportedFormat(_)));

        assert!(FileFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        for f in [
            FileFormat::Sbf,
            FileFormat::Xyz,
            FileFormat::Llh,
            FileFormat::Rinex,
        ] {
            assert_eq!(f.to_string().parse::<FileFormat>().unwrap(), f);
        }
        assert_eq!("obs".parse::<FileFormat>().unwrap(), FileFormat::Rinex);
        assert!("pdf".parse::<FileFormat>().is_err());
    }
}
