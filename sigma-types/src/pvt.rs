use chrono::{DateTime, Utc};

/// Декодированный блок PVTGeodetic.
#[derive(Debug, Clone, PartialEq)]
pub struct PvtGeodetic {
    /// Time-of-week, секунды
    pub tow_seconds: f64,
    /// Номер GPS недели
    pub week: u16,
    /// Режим решения (как в потоке)
    pub mode: u8,
    /// Код ошибки решения (как в потоке)
    pub error: u8,
    /// Широта, градусы, в диапазоне [-90, 90]
    pub lat_deg: f64,
    /// Долгота, градусы, в диапазоне (-180, 180]
    pub lon_deg: f64,
    /// Высота, метры
    pub height_m: f64,
    /// Sigma по востоку, метры (равная доля горизонтальной точности)
    pub sigma_east_m: f64,
    /// Sigma по северу, метры (равная доля горизонтальной точности)
    pub sigma_north_m: f64,
    /// Sigma по вертикали, метры
    pub sigma_up_m: f64,
    /// GPS эпоха + неделя + TOW, без leap seconds
    pub timestamp: DateTime<Utc>,
}
