use log::info;
use sigma_types::{Approximation, EpochSigma, EpochTime, PvtGeodetic, SigmaResult};

use super::{EpochReader, ReadOutcome, MM_PER_M};
use crate::{format::FileFormat, sbf::SbfDecoder};

/// Читатель SBF: эпохи берутся только из блоков PVTGeodetic.
#[derive(Debug, Clone, Default)]
pub struct SbfReader {
    decoder: SbfDecoder,
}

impl SbfReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decoder(decoder: SbfDecoder) -> Self {
        Self { decoder }
    }

    pub fn read_bytes(
        &self,
        buf: &[u8],
    ) -> ReadOutcome {
        let decoded = self.decoder.decode(buf);
        let mut outcome = ReadOutcome {
            decode: Some(decoded.stats),
            ..Default::default()
        };

        for pvt in decoded.pvt_records() {
            outcome.push_epoch(pvt_to_epoch(pvt));
        }

        if !outcome.epochs.is_empty() {
            outcome.raise(Approximation::UnverifiedFixedPointAccuracy);
            outcome.raise(Approximation::EqualSplitHorizontal);
        }

        info!("SBF: {} PVTGeodetic epochs", outcome.stats.epochs);
        outcome
    }
}

impl EpochReader for SbfReader {
    fn format(&self) -> FileFormat {
        FileFormat::Sbf
    }

    fn read(
        &self,
        input: &[u8],
    ) -> SigmaResult<ReadOutcome> {
        Ok(self.read_bytes(input))
    }
}

/// Метры → миллиметры, время GPS без leap seconds.
pub fn pvt_to_epoch(pvt: &PvtGeodetic) -> EpochSigma {
    EpochSigma::new(
        EpochTime::Gps(pvt.timestamp),
        pvt.sigma_east_m * MM_PER_M,
        pvt.sigma_north_m * MM_PER_M,
        pvt.sigma_up_m * MM_PER_M,
    )
}
