//! Декодер Septentrio Binary Format (SBF).
//!
//! Раскладка блока (смещения от sync-маркера, все числа little-endian):
//!
//! ```text
//! [0..2]  SYNC        "$@"
//! [2..4]  CRC         u16  — читается, но не проверяется
//! [4..6]  ID/LENGTH   u16  — id = младшие 13 бит, класс длины = старшие 3
//! [6..8]  LENGTH      u16  — escape-длина, только при классе длины 0
//! [8..]   PAYLOAD     blockLength - 8 байт
//! ```
//!
//! Сканер проверяет каждое смещение буфера, в том числе внутри уже найденных
//! блоков: ложные совпадения отсеиваются проверкой длины.

pub mod block;
pub mod pvt;
pub mod scanner;
pub mod survey;

pub use block::*;
pub use pvt::*;
pub use scanner::*;
pub use survey::*;

/// Sync-маркер блока: b"$@"
pub const SBF_SYNC: [u8; 2] = [b'$', b'@'];

/// Заголовок блока: sync + CRC + id/length + escape-длина
pub const SBF_HEADER_SIZE: usize = 8;

/// Маска 13-битного идентификатора блока
pub const SBF_ID_MASK: u16 = 0x1FFF;

/// Сдвиг 3-битного класса длины
pub const SBF_LENGTH_SHIFT: u32 = 13;

/// Идентификатор блока PVTGeodetic
pub const PVT_GEODETIC_ID: u16 = 0x0FA2;

/// Минимальный payload PVTGeodetic (блок от 92 байт)
pub const PVT_MIN_PAYLOAD: usize = 84;

/// Смещение горизонтальной точности в payload (92 от начала блока)
pub const PVT_H_ACCURACY_OFFSET: usize = 84;

/// Смещение вертикальной точности в payload (96 от начала блока)
pub const PVT_V_ACCURACY_OFFSET: usize = 88;
