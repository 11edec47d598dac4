use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::Component;

/// Формат вывода GPS-времени эпохи.
pub const EPOCH_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Время эпохи: момент из бинарного потока или текстовая метка из ASCII файла.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpochTime {
    /// Момент GPS времени (без поправки на leap seconds)
    Gps(DateTime<Utc>),
    /// Текст как есть, например `"2024/01/15 10:00:00.000"`
    Label(String),
}

/// Каноническая запись неопределённости одной эпохи (миллиметры).
///
/// Все три значения неотрицательны: читатели отбрасывают строки и блоки,
/// которые дали бы отрицательное или нечисловое значение.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpochSigma {
    pub time: EpochTime,
    #[serde(rename = "E_mm")]
    pub e_mm: f64,
    #[serde(rename = "N_mm")]
    pub n_mm: f64,
    #[serde(rename = "U_mm")]
    pub u_mm: f64,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl EpochSigma {
    pub fn new(
        time: EpochTime,
        e_mm: f64,
        n_mm: f64,
        u_mm: f64,
    ) -> Self {
        Self {
            time,
            e_mm,
            n_mm,
            u_mm,
        }
    }

    /// Горизонтальная sigma: `sqrt((E² + N²) / 2)`.
    pub fn horizontal_mm(&self) -> f64 {
        ((self.e_mm * self.e_mm + self.n_mm * self.n_mm) / 2.0).sqrt()
    }

    /// Вертикальная sigma равна `U`.
    pub fn vertical_mm(&self) -> f64 {
        self.u_mm
    }

    pub fn value(
        &self,
        component: Component,
    ) -> f64 {
        match component {
            Component::Horizontal => self.horizontal_mm(),
            Component::Vertical => self.vertical_mm(),
            Component::E => self.e_mm,
            Component::N => self.n_mm,
            Component::U => self.u_mm,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для EpochTime
////////////////////////////////////////////////////////////////////////////////

impl std::fmt::Display for EpochTime {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            EpochTime::Gps(t) => write!(f, "{}", t.format(EPOCH_TIME_FORMAT)),
            EpochTime::Label(s) => f.write_str(s),
        }
    }
}

impl Serialize for EpochTime {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<DateTime<Utc>> for EpochTime {
    fn from(t: DateTime<Utc>) -> Self {
        EpochTime::Gps(t)
    }
}

impl From<String> for EpochTime {
    fn from(s: String) -> Self {
        EpochTime::Label(s)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_horizontal_from_east_north() {
        let epoch = EpochSigma::new(EpochTime::Label("t".into()), 3.0, 4.0, 7.0);

        // sqrt((9 + 16) / 2) = 3.5355...
        assert!((epoch.horizontal_mm() - 3.535_533_905_932_737_6).abs() < 1e-12);
        assert_eq!(epoch.vertical_mm(), 7.0);
        assert_eq!(epoch.value(Component::N), 4.0);
    }

    #[test]
    fn test_epoch_serialized_keys() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let epoch = EpochSigma::new(t.into(), 1.0, 2.0, 3.0);
        let json = serde_json::to_value(&epoch).unwrap();

        assert_eq!(json["time"], "2024/01/15 10:00:00.000000");
        assert_eq!(json["E_mm"], 1.0);
        assert_eq!(json["N_mm"], 2.0);
        assert_eq!(json["U_mm"], 3.0);
    }
}
