use std::collections::HashMap;

use log::{debug, info, warn};
use sigma_types::{PvtGeodetic, SigmaResult};

use super::{decode_pvt_geodetic_block, scan, DecodeStats, RawBlock, PVT_GEODETIC_ID};

/// Функция-декодер одного типа блока.
pub type BlockDecoder = fn(&RawBlock<'_>) -> SigmaResult<Block>;

/// Декодированный блок.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    PvtGeodetic(PvtGeodetic),
    /// Структурно корректный блок без зарегистрированного декодера
    Unknown { block_id: u16, length: usize },
}

impl Block {
    pub fn block_id(&self) -> u16 {
        match self {
            Block::PvtGeodetic(_) => PVT_GEODETIC_ID,
            Block::Unknown { block_id, .. } => *block_id,
        }
    }
}

/// Реестр декодеров: `block_id` → функция.
///
/// Новый тип блока добавляется через [`BlockRegistry::register`], сканер при
/// этом не меняется.
#[derive(Clone)]
pub struct BlockRegistry {
    decoders: HashMap<u16, BlockDecoder>,
}

impl BlockRegistry {
    /// Реестр без единого декодера: все блоки станут [`Block::Unknown`].
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Регистрирует декодер, возвращая предыдущий для этого id.
    pub fn register(
        &mut self,
        block_id: u16,
        decoder: BlockDecoder,
    ) -> Option<BlockDecoder> {
        self.decoders.insert(block_id, decoder)
    }

    pub fn is_registered(
        &self,
        block_id: u16,
    ) -> bool {
        self.decoders.contains_key(&block_id)
    }

    /// Декодирует блок. `Ok(None)` для незарегистрированного id.
    pub fn decode(
        &self,
        raw: &RawBlock<'_>,
    ) -> SigmaResult<Option<Block>> {
        match self.decoders.get(&raw.block_id) {
            Some(decoder) => decoder(raw).map(Some),
            None => Ok(None),
        }
    }
}

impl Default for BlockRegistry {
    /// По умолчанию зарегистрирован только PVTGeodetic (0x0FA2).
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PVT_GEODETIC_ID, decode_pvt_geodetic_block);
        registry
    }
}

impl std::fmt::Debug for BlockRegistry {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let mut ids: Vec<u16> = self.decoders.keys().copied().collect();
        ids.sort_unstable();

        f.debug_struct("BlockRegistry")
            .field("block_ids", &ids)
            .finish()
    }
}

/// Результат одного прохода [`SbfDecoder::decode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBlocks {
    pub blocks: Vec<Block>,
    pub stats: DecodeStats,
}

impl DecodedBlocks {
    /// Только записи PVTGeodetic, в порядке появления в потоке.
    pub fn pvt_records(&self) -> impl Iterator<Item = &PvtGeodetic> {
        self.blocks.iter().filter_map(|b| match b {
            Block::PvtGeodetic(pvt) => Some(pvt),
            Block::Unknown { .. } => None,
        })
    }
}

/// Сканер + реестр. Состояния между вызовами не хранит.
#[derive(Debug, Clone, Default)]
pub struct SbfDecoder {
    registry: BlockRegistry,
}

impl SbfDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: BlockRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Полный проход по буферу.
    ///
    /// Ошибка декодирования одного блока логируется и учитывается в
    /// `blocks_failed`; сканирование продолжается со следующего смещения.
    pub fn decode(
        &self,
        buf: &[u8],
    ) -> DecodedBlocks {
        let mut scanner = scan(buf);
        let mut blocks = Vec::new();
        let mut decoded = 0u64;
        let mut unknown = 0u64;
        let mut failed = 0u64;

        for raw in scanner.by_ref() {
            match self.registry.decode(&raw) {
                Ok(Some(block)) => {
                    decoded += 1;
                    blocks.push(block);
                }
                Ok(None) => {
                    unknown += 1;
                    debug!(
                        "Block 0x{:04x} ({} bytes) at {} has no decoder",
                        raw.block_id, raw.length, raw.offset
                    );
                    blocks.push(Block::Unknown {
                        block_id: raw.block_id,
                        length: raw.length,
                    });
                }
                Err(e) => {
                    failed += 1;
                    warn!(
                        "Failed to decode block 0x{:04x} at offset {}: {e}",
                        raw.block_id, raw.offset
                    );
                }
            }
        }

        let stats = DecodeStats {
            blocks_decoded: decoded,
            blocks_unknown: unknown,
            blocks_failed: failed,
            ..*scanner.stats()
        };

        info!(
            "SBF pass: {} bytes, {} sync markers, {} decoded, {} unknown, {} rejected, {} failed",
            buf.len(),
            stats.sync_markers,
            stats.blocks_decoded,
            stats.blocks_unknown,
            stats.blocks_rejected,
            stats.blocks_failed
        );

        DecodedBlocks { blocks, stats }
    }
}

#[cfg(test)]
mod tests {
    use sigma_types::SigmaError;

    use super::*;
    use crate::binary::{encode_block, PvtGeodeticFixture};

    fn always_fails(_: &RawBlock<'_>) -> SigmaResult<Block> {
        Err(SigmaError::malformed("test decoder"))
    }

    #[test]
    fn test_default_registry_has_pvt_only() {
        let registry = BlockRegistry::default();

        assert!(registry.is_registered(PVT_GEODETIC_ID));
        assert!(!registry.is_registered(0x1703));
        assert!(!BlockRegistry::empty().is_registered(PVT_GEODETIC_ID));
    }

    #[test]
    fn test_decode_mixed_stream() {
        let mut buf = PvtGeodeticFixture::default().encode().unwrap();
        buf.extend_from_slice(&encode_block(0x1703, &[0; 12]).unwrap());
        buf.extend_from_slice(&PvtGeodeticFixture::default().encode().unwrap());

        let out = SbfDecoder::new().decode(&buf);

        assert_eq!(out.blocks.len(), 3);
        assert_eq!(out.pvt_records().count(), 2);
        assert_eq!(out.blocks[1].block_id(), 0x1703);
        assert_eq!(out.stats.blocks_decoded, 2);
        assert_eq!(out.stats.blocks_unknown, 1);
        assert_eq!(out.stats.blocks_failed, 0);
    }

    #[test]
    fn test_short_pvt_block_counted_as_failed() {
        let short = PvtGeodeticFixture {
            payload_len: 40,
            ..Default::default()
        };
        let mut buf = short.encode().unwrap();
        buf.extend_from_slice(&PvtGeodeticFixture::default().encode().unwrap());

        let out = SbfDecoder::new().decode(&buf);

        assert_eq!(out.stats.blocks_failed, 1);
        assert_eq!(out.pvt_records().count(), 1, "следующий блок должен декодироваться");
    }

    #[test]
    fn test_custom_registry_overrides_decoder() {
        let mut registry = BlockRegistry::empty();
        assert!(registry.register(0x1703, always_fails).is_none());

        let buf = encode_block(0x1703, &[1, 2, 3]).unwrap();
        let out = SbfDecoder::with_registry(registry).decode(&buf);

        assert!(out.blocks.is_empty());
        assert_eq!(out.stats.blocks_failed, 1);
    }
}
