use log::debug;
use serde::Serialize;
use sigma_types::{SigmaError, SigmaResult};

use super::{SBF_HEADER_SIZE, SBF_ID_MASK, SBF_LENGTH_SHIFT, SBF_SYNC};
use crate::binary::read_u16_le;

/// Структурно корректный блок, найденный сканером.
///
/// Payload заимствуется из исходного буфера и живёт не дольше одного прохода.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawBlock<'a> {
    /// Смещение sync-маркера в буфере
    pub offset: usize,
    /// 13-битный идентификатор
    pub block_id: u16,
    /// Полная длина блока вместе с заголовком
    pub length: usize,
    /// CRC как в потоке (не проверяется)
    pub crc: u16,
    /// Байты `[offset + 8, offset + length)`
    pub payload: &'a [u8],
}

/// Статистика, накопленная за один проход декодера.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeStats {
    /// Все вхождения "$@", включая ложные.
    pub sync_markers: u64,
    /// Блоки, разобранные зарегистрированным декодером.
    pub blocks_decoded: u64,
    /// Структурно корректные блоки без декодера.
    pub blocks_unknown: u64,
    /// Кандидаты с усечённым заголовком или недопустимой длиной.
    pub blocks_rejected: u64,
    /// Блоки, на которых декодер вернул ошибку.
    pub blocks_failed: u64,
}

/// Ленивый проход по буферу: по одному [`RawBlock`] на каждый принятый
/// sync-маркер.
///
/// Каждое смещение проверяется ровно один раз, так что проход завершается за
/// O(len) проверок при любых входных данных.
pub struct BlockScanner<'a> {
    buf: &'a [u8],
    pos: usize,
    stats: DecodeStats,
}

/// Сканирует `buf` в поиске SBF блоков.
pub fn scan(buf: &[u8]) -> BlockScanner<'_> {
    BlockScanner::new(buf)
}

impl<'a> BlockScanner<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            stats: DecodeStats::default(),
        }
    }

    /// Статистика сканирования (заполнены `sync_markers` и `blocks_rejected`).
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos + 1 < self.buf.len() {
            let at = self.pos;
            self.pos += 1;

            if self.buf[at..at + 2] != SBF_SYNC {
                continue;
            }

            self.stats.sync_markers += 1;

            match parse_block_at(self.buf, at) {
                Ok(block) => return Some(block),
                Err(e) => {
                    self.stats.blocks_rejected += 1;
                    debug!("Rejected sync candidate at {at}: {e}");
                }
            }
        }

        None
    }
}

/// Разбирает заголовок блока, sync-маркер которого стоит в `buf[at]`.
pub fn parse_block_at(
    buf: &[u8],
    at: usize,
) -> SigmaResult<RawBlock<'_>> {
    let rest = buf.get(at..).unwrap_or_default();

    if rest.len() < SBF_HEADER_SIZE {
        return Err(SigmaError::Truncated {
            offset: at,
            needed: SBF_HEADER_SIZE,
            available: rest.len(),
        });
    }

    let mut off = SBF_SYNC.len();
    let crc = read_u16_le(rest, &mut off)?;
    let id_length = read_u16_le(rest, &mut off)?;

    let block_id = id_length & SBF_ID_MASK;
    let mut length = (id_length >> SBF_LENGTH_SHIFT) as usize;

    if length == 0 {
        length = read_u16_le(rest, &mut off)? as usize;
    }

    if length < SBF_HEADER_SIZE || length > rest.len() {
        return Err(SigmaError::malformed(format!(
            "block 0x{block_id:04x} at {at}: length {length} outside [{SBF_HEADER_SIZE}, {}]",
            rest.len()
        )));
    }

    Ok(RawBlock {
        offset: at,
        block_id,
        length,
        crc,
        payload: &rest[SBF_HEADER_SIZE..length],
    })
}
