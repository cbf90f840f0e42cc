//! Criterion benchmarks for structure growth.
//!
//! Run with: `cargo bench -p keystone_structures`

use criterion::{Criterion, criterion_group, criterion_main};
use keystone_structures::batch::{BatchPolicy, plan_batch};
use keystone_structures::catalog::PieceCatalog;
use keystone_structures::config::GenerationConfig;
use keystone_structures::generator::{StructureRequest, generate};
use keystone_structures::piece::PieceKind;
use keystone_structures::types::{BlockCoord, Material};
use keystone_structures::world::SparseWorld;
use std::hint::black_box;

/// Lava sea at y <= 31, bridges start at y = 48.
fn nether() -> SparseWorld {
    SparseWorld::with_floor(31, Material::Lava, Material::Air)
}

fn bench_fortress(c: &mut Criterion) {
    let catalog = PieceCatalog::from_config(&GenerationConfig::nether_fortress()).unwrap();
    let request = StructureRequest::new(
        PieceKind::FortressBridgeIntersection,
        BlockCoord::new(0, 48, 0),
        0x5eed,
    );
    c.bench_function("fortress_64_pieces", |b| {
        b.iter(|| {
            let mut world = nether();
            black_box(generate(&mut world, &catalog, black_box(&request)).unwrap())
        })
    });
}

fn bench_stronghold(c: &mut Criterion) {
    let catalog = PieceCatalog::from_config(&GenerationConfig::stronghold()).unwrap();
    let request = StructureRequest::new(PieceKind::StrongholdCorridor, BlockCoord::new(0, 30, 0), 7);
    c.bench_function("stronghold_64_pieces", |b| {
        b.iter(|| {
            let mut world = SparseWorld::new(Material::Stone);
            black_box(generate(&mut world, &catalog, black_box(&request)).unwrap())
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let catalog = PieceCatalog::from_config(&GenerationConfig::default()).unwrap();
    let base = nether();
    let requests: Vec<_> = (0..16)
        .map(|i| {
            StructureRequest::new(
                PieceKind::FortressBridgeIntersection,
                BlockCoord::new(i * 400, 48, 0),
                i as u64,
            )
        })
        .collect();
    c.bench_function("fortress_batch_16", |b| {
        b.iter(|| black_box(plan_batch(&base, &catalog, &requests, BatchPolicy::AbortAll).unwrap()))
    });
}

criterion_group!(benches, bench_fortress, bench_stronghold, bench_batch);
criterion_main!(benches);
