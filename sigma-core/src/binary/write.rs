//! Кодировщик SBF блоков для тестов и бенчмарков.
//!
//! Приёмник пишет SBF сам, штатного кодировщика у формата нет. Здесь он
//! зеркально повторяет раскладку, которую ожидает декодер, чтобы синтетические
//! файлы проходили через тот же путь, что и настоящие.

use byteorder::{ByteOrder, LittleEndian};
use sigma_types::{SigmaError, SigmaResult};

use crate::sbf::{
    PVT_GEODETIC_ID, PVT_H_ACCURACY_OFFSET, PVT_V_ACCURACY_OFFSET, SBF_HEADER_SIZE, SBF_ID_MASK,
    SBF_SYNC,
};

/// Размер payload, в который помещаются обе точности.
pub const PVT_FIXTURE_PAYLOAD_LEN: usize = PVT_V_ACCURACY_OFFSET + 4;

pub fn write_u16_le(
    buf: &mut [u8],
    off: &mut usize,
    val: u16,
) {
    LittleEndian::write_u16(&mut buf[*off..*off + 2], val);
    *off += 2;
}

pub fn write_u32_le(
    buf: &mut [u8],
    off: &mut usize,
    val: u32,
) {
    LittleEndian::write_u32(&mut buf[*off..*off + 4], val);
    *off += 4;
}

pub fn write_f64_le(
    buf: &mut [u8],
    off: &mut usize,
    val: f64,
) {
    LittleEndian::write_f64(&mut buf[*off..*off + 8], val);
    *off += 8;
}

/// Собирает блок: sync, CRC = 0, id с классом длины 0, escape-длина, payload.
pub fn encode_block(
    block_id: u16,
    payload: &[u8],
) -> SigmaResult<Vec<u8>> {
    if block_id > SBF_ID_MASK {
        return Err(SigmaError::malformed(format!(
            "block id 0x{block_id:04x} does not fit in 13 bits"
        )));
    }

    let length = u16::try_from(SBF_HEADER_SIZE + payload.len()).map_err(|_| {
        SigmaError::malformed(format!(
            "payload of {} bytes exceeds SBF block length range",
            payload.len()
        ))
    })?;

    let mut buf = vec![0u8; SBF_HEADER_SIZE];
    buf[0..2].copy_from_slice(&SBF_SYNC);

    let mut off = 2;
    write_u16_le(&mut buf, &mut off, 0); // CRC не проверяется
    write_u16_le(&mut buf, &mut off, block_id);
    write_u16_le(&mut buf, &mut off, length);

    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Метры в Q8.24 (обратное к декодированию, с насыщением до 255.999…).
pub fn meters_to_q8_24(meters: f64) -> u32 {
    if !meters.is_finite() || meters <= 0.0 {
        return 0;
    }

    let int_part = meters.trunc().min(255.0) as u32;
    let frac = ((meters - meters.trunc()) * 16_777_216.0).round() as u32;

    (int_part << 24) | frac.min(0x00FF_FFFF)
}

/// Параметры синтетического блока PVTGeodetic.
#[derive(Debug, Clone)]
pub struct PvtGeodeticFixture {
    pub tow_ms: u32,
    pub week: u16,
    pub mode: u8,
    pub error: u8,
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub height_m: f64,
    pub h_accuracy_m: f64,
    pub v_accuracy_m: f64,
    /// Длина payload; меньше [`PVT_FIXTURE_PAYLOAD_LEN`] — усечённый блок
    pub payload_len: usize,
}

impl PvtGeodeticFixture {
    pub fn payload(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.payload_len.max(PVT_FIXTURE_PAYLOAD_LEN)];
        let mut off = 0;

        write_u32_le(&mut buf, &mut off, self.tow_ms);
        write_u16_le(&mut buf, &mut off, self.week);
        buf[off] = self.mode;
        buf[off + 1] = self.error;
        off += 2;
        write_f64_le(&mut buf, &mut off, self.lat_rad);
        write_f64_le(&mut buf, &mut off, self.lon_rad);
        write_f64_le(&mut buf, &mut off, self.height_m);

        let mut off = PVT_H_ACCURACY_OFFSET;
        write_u32_le(&mut buf, &mut off, meters_to_q8_24(self.h_accuracy_m));
        write_u32_le(&mut buf, &mut off, meters_to_q8_24(self.v_accuracy_m));

        buf.truncate(self.payload_len);
        buf
    }

    /// Полный блок с sync-маркером.
    pub fn encode(&self) -> SigmaResult<Vec<u8>> {
        encode_block(PVT_GEODETIC_ID, &self.payload())
    }
}

impl Default for PvtGeodeticFixture {
    fn default() -> Self {
        Self {
            tow_ms: 345_600_000,
            week: 2_296,
            mode: 4,
            error: 0,
            lat_rad: 59.9_f64.to_radians(),
            lon_rad: 10.7_f64.to_radians(),
            height_m: 45.0,
            h_accuracy_m: 0.5,
            v_accuracy_m: 0.75,
            payload_len: PVT_FIXTURE_PAYLOAD_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_block_byte_layout() {
        let bytes = encode_block(0x0FA2, &[0xAA; 4]).unwrap();

        assert_eq!(&bytes[0..2], b"$@", "sync");
        assert_eq!(&bytes[2..4], &[0, 0], "CRC");
        assert_eq!(&bytes[4..6], &[0xA2, 0x0F], "id, класс длины 0");
        assert_eq!(&bytes[6..8], &[12, 0], "escape-длина = 8 + 4");
        assert_eq!(&bytes[8..], &[0xAA; 4]);
    }

    #[test]
    fn test_encode_block_rejects_wide_id() {
        assert!(encode_block(0x2000, &[]).is_err());
        assert!(encode_block(0x0001, &vec![0u8; 70_000]).is_err());
    }

    #[test]
    fn test_q8_24_encoding() {
        assert_eq!(meters_to_q8_24(1.0), 0x0100_0000);
        assert_eq!(meters_to_q8_24(0.5), 0x0080_0000);
        assert_eq!(meters_to_q8_24(-3.0), 0);
        assert_eq!(meters_to_q8_24(f64::NAN), 0);
    }

    #[test]
    fn test_fixture_payload_truncation() {
        let fixture = PvtGeodeticFixture {
            payload_len: 84,
            ..Default::default()
        };

        assert_eq!(fixture.payload().len(), 84);
        assert_eq!(PvtGeodeticFixture::default().payload().len(), 92);
    }
}
