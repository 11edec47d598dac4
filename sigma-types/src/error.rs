use std::path::PathBuf;

use thiserror::Error;

/// Результат для операций sigma
pub type SigmaResult<T> = std::result::Result<T, SigmaError>;

/// Типы ошибок извлечения и обработки sigma.
///
/// Фатальны только `UnsupportedFormat`, `SourceNotFound`, `InputTooLarge` и
/// `Io`: они относятся ко всему файлу. `MalformedRecord` и `Truncated`
/// возникают на уровне одной строки или блока, такая запись пропускается, а
/// проход продолжается.
#[derive(Debug, Error)]
pub enum SigmaError {
    /// Неизвестное расширение файла
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Исходный файл не найден
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Повреждённая строка или блок
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Чтение за пределами буфера
    #[error("Truncated data: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Вход превышает внешний лимит размера
    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SigmaError {
    /// Удобные конструкторы
    pub fn malformed<S: Into<String>>(s: S) -> Self {
        Self::MalformedRecord(s.into())
    }

    pub fn unsupported_format<S: Into<String>>(s: S) -> Self {
        Self::UnsupportedFormat(s.into())
    }

    /// `true` для ошибок уровня записи, после которых проход продолжается.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SigmaError::MalformedRecord(_) | SigmaError::Truncated { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(SigmaError::malformed("bad line").is_recoverable());
        assert!(SigmaError::Truncated {
            offset: 84,
            needed: 4,
            available: 2
        }
        .is_recoverable());
        assert!(!SigmaError::unsupported_format(".txt").is_recoverable());
        assert!(!SigmaError::SourceNotFound(PathBuf::from("a.sbf")).is_recoverable());
    }

    #[test]
    fn test_error_messages() {
        let err = SigmaError::Truncated {
            offset: 8,
            needed: 8,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Truncated data: need 8 bytes at offset 8, have 3"
        );

        let err = SigmaError::SourceNotFound(PathBuf::from("/tmp/missing.llh"));
        assert!(err.to_string().contains("missing.llh"));
    }
}
