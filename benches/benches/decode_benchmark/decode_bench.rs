//! Скорость сканирования SBF и расчёта статистики.
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sigma_core::{
    binary::{encode_block, PvtGeodeticFixture},
    sbf::{scan, survey, SbfDecoder},
    stats::summarize,
    EpochSigma, EpochTime,
};

/// PVTGeodetic вперемешку с неизвестными блоками и мусором.
fn sbf_stream(blocks: u32) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut raw = Vec::new();

    for i in 0..blocks {
        let fixture = PvtGeodeticFixture {
            tow_ms: i * 100,
            h_accuracy_m: rng.gen_range(0.1..2.0),
            v_accuracy_m: rng.gen_range(0.2..3.0),
            ..Default::default()
        };
        if let Ok(block) = fixture.encode() {
            raw.extend_from_slice(&block);
        }
        if let Ok(block) = encode_block(0x1703, &[0u8; 48]) {
            raw.extend_from_slice(&block);
        }
        let junk = rng.gen_range(0..16);
        raw.extend((0..junk).map(|_| rng.gen::<u8>()));
    }
    raw
}

fn epochs(n: usize) -> Vec<EpochSigma> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n)
        .map(|i| EpochSigma {
            time: EpochTime::Label(format!("epoch {i}")),
            e_mm: rng.gen_range(5.0..50.0),
            n_mm: rng.gen_range(5.0..50.0),
            u_mm: rng.gen_range(10.0..90.0),
        })
        .collect()
}

fn benchmark(c: &mut Criterion) {
    let mut sbf_grp = c.benchmark_group("sbf");

    for blocks in [100u32, 10_000] {
        let raw = sbf_stream(blocks);
        sbf_grp.throughput(Throughput::Bytes(raw.len() as u64));

        sbf_grp.bench_with_input(BenchmarkId::new("scan", blocks), &raw, |b, raw| {
            b.iter(|| scan(black_box(raw)).count())
        });
        sbf_grp.bench_with_input(BenchmarkId::new("decode", blocks), &raw, |b, raw| {
            let decoder = SbfDecoder::new();
            b.iter(|| decoder.decode(black_box(raw)))
        });
        sbf_grp.bench_with_input(BenchmarkId::new("survey", blocks), &raw, |b, raw| {
            b.iter(|| survey(black_box(raw)))
        });
    }
    sbf_grp.finish();

    let mut stats_grp = c.benchmark_group("stats");
    for n in [1_000usize, 100_000] {
        let input = epochs(n);
        stats_grp.throughput(Throughput::Elements(n as u64));
        stats_grp.bench_with_input(BenchmarkId::new("summarize", n), &input, |b, input| {
            b.iter(|| summarize(black_box(input.clone())))
        });
    }
    stats_grp.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
