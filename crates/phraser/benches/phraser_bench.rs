// Criterion benchmarks for phraser.
//
// Uses the email fixture from tests/data, repeated to a few thousand rows.
//
// Run:
//   cargo bench -p phraser

use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use phraser::{CommonTerms, PhraseConfig, PhraseModel, persist};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn load_rows() -> Vec<Value> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/emails.jsonl");
    std::fs::read_to_string(&path)
        .unwrap_or_default()
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect()
}

fn corpus(repeat: usize) -> Vec<Value> {
    let rows = load_rows();
    (0..repeat).flat_map(|_| rows.iter().cloned()).collect()
}

fn config() -> PhraseConfig {
    PhraseConfig::default()
        .with_threshold(1.0)
        .with_min_count(10)
        .with_common_terms(CommonTerms::defaults())
}

fn trained() -> PhraseModel {
    let mut model = PhraseModel::new(config()).expect("valid config");
    model.train(&corpus(50)).expect("training");
    model
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Train on 3000 rows.
fn bench_train(c: &mut Criterion) {
    let rows = corpus(500);
    c.bench_function("train_3000_rows", |b| {
        b.iter(|| {
            let mut model = PhraseModel::new(config()).expect("valid config");
            model.train(std::hint::black_box(&rows)).expect("training");
            std::hint::black_box(model.phraser().map(|p| p.len()).unwrap_or(0));
        });
    });
}

/// Phrase every body of the fixture.
fn bench_apply(c: &mut Criterion) {
    let model = trained();
    let texts: Vec<String> = load_rows()
        .iter()
        .filter_map(|r| r["clean_body"].as_str().map(str::to_string))
        .collect();
    c.bench_function("apply_fixture_bodies", |b| {
        b.iter(|| {
            for text in &texts {
                std::hint::black_box(model.apply(text).ok());
            }
        });
    });
}

/// Encode and decode a trained model.
fn bench_persist(c: &mut Criterion) {
    let model = trained();
    let phraser = model.phraser().expect("trained");
    let bytes = persist::to_bytes(phraser).expect("encode");
    c.bench_function("model_to_bytes", |b| {
        b.iter(|| std::hint::black_box(persist::to_bytes(phraser).ok()));
    });
    c.bench_function("model_from_bytes", |b| {
        b.iter(|| std::hint::black_box(persist::from_bytes(&bytes).ok()));
    });
}

criterion_group!(benches, bench_train, bench_apply, bench_persist);
criterion_main!(benches);
