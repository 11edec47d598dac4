use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{scan, SBF_ID_MASK, SBF_LENGTH_SHIFT, SBF_SYNC};
use crate::binary::read_u16_le;

/// Сколько наиболее частых расстояний между маркерами выводить.
pub const SURVEY_TOP_DISTANCES: usize = 3;

/// Сколько первых кандидатов разбирать подробно.
pub const SURVEY_SAMPLE_CANDIDATES: usize = 10;

/// Сырые поля заголовка у кандидата, без проверки длины.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateHeader {
    pub offset: usize,
    pub crc: u16,
    pub id_length: u16,
    pub block_id: u16,
    pub length_class: u16,
}

/// Структура SBF файла: где маркеры, с каким шагом, какие блоки.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSurvey {
    pub buffer_len: usize,
    pub sync_markers: usize,
    /// `(расстояние, число вхождений)`, по убыванию частоты
    pub common_distances: Vec<(usize, usize)>,
    pub samples: Vec<CandidateHeader>,
    /// Гистограмма id структурно корректных блоков
    pub block_ids: BTreeMap<u16, usize>,
    /// Гистограмма полных длин структурно корректных блоков
    pub block_lengths: BTreeMap<usize, usize>,
}

/// Обследует буфер: все вхождения "$@", шаг между ними и гистограммы блоков.
pub fn survey(buf: &[u8]) -> SyncSurvey {
    let positions: Vec<usize> = buf
        .windows(SBF_SYNC.len())
        .enumerate()
        .filter(|(_, w)| *w == SBF_SYNC)
        .map(|(i, _)| i)
        .collect();

    let mut distances: HashMap<usize, usize> = HashMap::new();
    for pair in positions.windows(2) {
        *distances.entry(pair[1] - pair[0]).or_default() += 1;
    }

    let mut common_distances: Vec<(usize, usize)> = distances.into_iter().collect();
    common_distances.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    common_distances.truncate(SURVEY_TOP_DISTANCES);

    let samples = positions
        .iter()
        .take(SURVEY_SAMPLE_CANDIDATES)
        .filter_map(|&at| candidate_header(buf, at))
        .collect();

    let mut block_ids = BTreeMap::new();
    let mut block_lengths = BTreeMap::new();
    for raw in scan(buf) {
        *block_ids.entry(raw.block_id).or_default() += 1;
        *block_lengths.entry(raw.length).or_default() += 1;
    }

    SyncSurvey {
        buffer_len: buf.len(),
        sync_markers: positions.len(),
        common_distances,
        samples,
        block_ids,
        block_lengths,
    }
}

fn candidate_header(
    buf: &[u8],
    at: usize,
) -> Option<CandidateHeader> {
    let mut off = at + SBF_SYNC.len();
    let crc = read_u16_le(buf, &mut off).ok()?;
    let id_length = read_u16_le(buf, &mut off).ok()?;

    Some(CandidateHeader {
        offset: at,
        crc,
        id_length,
        block_id: id_length & SBF_ID_MASK,
        length_class: id_length >> SBF_LENGTH_SHIFT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{encode_block, PvtGeodeticFixture};

    #[test]
    fn test_survey_of_regular_stream() {
        let block = PvtGeodeticFixture::default().encode().unwrap();
        let buf: Vec<u8> = block.iter().copied().cycle().take(block.len() * 4).collect();

        let s = survey(&buf);

        assert_eq!(s.sync_markers, 4);
        assert_eq!(s.common_distances, vec![(block.len(), 3)]);
        assert_eq!(s.block_ids.get(&0x0FA2), Some(&4));
        assert_eq!(s.block_lengths.get(&block.len()), Some(&4));
        assert_eq!(s.samples.len(), 4);
        assert_eq!(s.samples[0].length_class, 0);
    }

    #[test]
    fn test_survey_orders_distances_by_frequency() {
        let a = encode_block(0x0001, &[0; 2]).unwrap(); // 10 байт
        let b = encode_block(0x0002, &[0; 6]).unwrap(); // 14 байт
        let mut buf = Vec::new();
        for chunk in [&a, &a, &a, &b, &a] {
            buf.extend_from_slice(chunk);
        }

        let s = survey(&buf);

        assert_eq!(s.common_distances[0], (10, 3));
        assert_eq!(s.common_distances[1], (14, 1));
        assert_eq!(s.block_ids.len(), 2);
    }

    #[test]
    fn test_survey_of_empty_buffer() {
        let s = survey(&[]);

        assert_eq!(s.sync_markers, 0);
        assert!(s.common_distances.is_empty());
        assert!(s.block_ids.is_empty());
    }
}
