use sigma_types::SigmaError;
use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Ошибка чтения или анализа входного файла
    #[error("{0}")]
    Sigma(#[from] SigmaError),

    /// Ошибка сериализации отчёта
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка записи результата
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Неверные аргументы или конфигурация
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    /// Код завершения процесса.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            _ => 1,
        }
    }
}
