use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use chrono::{DateTime, Utc};
use sigma_types::{PvtGeodetic, SigmaError, SigmaResult};

use super::{
    Block, RawBlock, PVT_H_ACCURACY_OFFSET, PVT_MIN_PAYLOAD, PVT_V_ACCURACY_OFFSET,
};
use crate::binary::{peek_u32_le, read_f64_le, read_u16_le, read_u32_le, read_u8};

/// 1980-01-06T00:00:00 в Unix миллисекундах
pub const GPS_EPOCH_UNIX_MS: i64 = 315_964_800_000;

/// Длительность GPS недели в миллисекундах
pub const GPS_WEEK_MS: i64 = 604_800_000;

/// Знаменатель дробной части Q8.24
const Q8_24_SCALE: f64 = 16_777_216.0;

/// Декодер для реестра: [`RawBlock`] → [`Block::PvtGeodetic`].
pub fn decode_pvt_geodetic_block(raw: &RawBlock<'_>) -> SigmaResult<Block> {
    decode_pvt_geodetic(raw.payload).map(Block::PvtGeodetic)
}

/// Разбирает payload блока PVTGeodetic.
///
/// Если payload короче 92 байт, обе точности равны 0 (это не ошибка).
pub fn decode_pvt_geodetic(payload: &[u8]) -> SigmaResult<PvtGeodetic> {
    if payload.len() < PVT_MIN_PAYLOAD {
        return Err(SigmaError::malformed(format!(
            "PVTGeodetic payload too short: {} < {PVT_MIN_PAYLOAD} bytes",
            payload.len()
        )));
    }

    let mut off = 0;
    let tow_ms = read_u32_le(payload, &mut off)?;
    let week = read_u16_le(payload, &mut off)?;
    let mode = read_u8(payload, &mut off)?;
    let error = read_u8(payload, &mut off)?;
    let lat_rad = read_f64_le(payload, &mut off)?;
    let lon_rad = read_f64_le(payload, &mut off)?;
    let height_m = read_f64_le(payload, &mut off)?;

    let (h_accuracy_m, v_accuracy_m) = if payload.len() >= PVT_V_ACCURACY_OFFSET + 4 {
        (
            q8_24_to_f64(peek_u32_le(payload, PVT_H_ACCURACY_OFFSET)?),
            q8_24_to_f64(peek_u32_le(payload, PVT_V_ACCURACY_OFFSET)?),
        )
    } else {
        (0.0, 0.0)
    };

    // Горизонтальная точность не раскладывается на E/N: делим поровну
    let sigma_en = h_accuracy_m / SQRT_2;

    Ok(PvtGeodetic {
        tow_seconds: tow_ms as f64 / 1000.0,
        week,
        mode,
        error,
        lat_deg: normalize_latitude(lat_rad).to_degrees(),
        lon_deg: normalize_longitude(lon_rad).to_degrees(),
        height_m,
        sigma_east_m: sigma_en,
        sigma_north_m: sigma_en,
        sigma_up_m: v_accuracy_m,
        timestamp: gps_timestamp(week, tow_ms)?,
    })
}

/// Q8.24: старшие 8 бит — целая часть, младшие 24 — дробная (метры).
pub fn q8_24_to_f64(raw: u32) -> f64 {
    (raw >> 24) as f64 + (raw & 0x00FF_FFFF) as f64 / Q8_24_SCALE
}

/// GPS эпоха + `week` недель + `tow_ms`, без поправки на leap seconds.
pub fn gps_timestamp(
    week: u16,
    tow_ms: u32,
) -> SigmaResult<DateTime<Utc>> {
    let ms = GPS_EPOCH_UNIX_MS + week as i64 * GPS_WEEK_MS + tow_ms as i64;

    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| SigmaError::malformed(format!("GPS time out of range: week={week}, tow={tow_ms}ms")))
}

/// Приводит угол к `(-π, π]`.
fn wrap_to_pi(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Широта в `[-π/2, π/2]`: сначала `(-π, π]`, затем отражение через полюс.
pub fn normalize_latitude(lat_rad: f64) -> f64 {
    let lat = wrap_to_pi(lat_rad);

    if lat > FRAC_PI_2 {
        PI - lat
    } else if lat < -FRAC_PI_2 {
        -PI - lat
    } else {
        lat
    }
}

/// Долгота в `(-π, π]`.
pub fn normalize_longitude(lon_rad: f64) -> f64 {
    wrap_to_pi(lon_rad)
}
