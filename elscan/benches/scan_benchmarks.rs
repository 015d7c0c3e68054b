use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use elscan::{
    search::{CrossSearchEngine, ScanBudget, SkipBand},
    Analyzer, Dictionary, ElsConfig, FixedMode, NormalizationPolicy, TextNormalizer,
};
use std::num::NonZeroUsize;

const CANTO: &str = "Nel mezzo del cammin di nostra vita mi ritrovai per una selva oscura, \
    ché la diritta via era smarrita. Ahi quanto a dir qual era è cosa dura \
    esta selva selvaggia e aspra e forte che nel pensier rinova la paura! \
    Tant'è amara che poco è più morte; ma per trattar del ben ch'i' vi trovai, \
    dirò de l'altre cose ch'i' v'ho scorte. ";

fn create_text(repeats: usize) -> String {
    CANTO.repeat(repeats)
}

fn dictionary() -> Dictionary {
    Dictionary::classic(4, NormalizationPolicy::Alphanumeric)
}

fn bench_text_scaling(c: &mut Criterion) {
    let dictionary = dictionary();
    let engine = CrossSearchEngine::new(SkipBand::full());

    let mut group = c.benchmark_group("Text Scaling");
    group.sample_size(10);
    for repeats in [1, 4, 16] {
        let text = TextNormalizer::default().normalize(&create_text(repeats));
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| {
                black_box(
                    engine
                        .search(text, &dictionary, &ScanBudget::unlimited())
                        .unwrap(),
                )
            });
        });
    }
    group.finish();
}

fn bench_band_width(c: &mut Criterion) {
    let dictionary = dictionary();
    let text = TextNormalizer::default().normalize(&create_text(8));

    let mut group = c.benchmark_group("Band Width");
    group.sample_size(10);
    for width in [3, 12, 48] {
        let engine = CrossSearchEngine::new(SkipBand::from_skip(2, width).unwrap());
        group.bench_function(format!("width_{}", width), |b| {
            b.iter(|| {
                black_box(
                    engine
                        .search(&text, &dictionary, &ScanBudget::unlimited())
                        .unwrap(),
                )
            });
        });
    }
    group.finish();
}

fn bench_thread_scaling(c: &mut Criterion) {
    let raw = create_text(8);

    let mut group = c.benchmark_group("Thread Scaling");
    group.sample_size(10);
    for threads in [1, 2, 4] {
        let config = ElsConfig {
            skip: 50,
            mode: FixedMode::Dictionary,
            thread_count: NonZeroUsize::new(threads).unwrap(),
            ..ElsConfig::default()
        };
        let analyzer = Analyzer::new(config, dictionary()).unwrap();
        group.bench_function(format!("threads_{}", threads), |b| {
            b.iter(|| black_box(analyzer.analyze_section(&raw).unwrap()));
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = bench_text_scaling, bench_band_width, bench_thread_scaling
}

criterion_main!(benches);
