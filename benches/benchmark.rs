use criterion::{criterion_group, criterion_main, Criterion};
use feature_vectorizer::FeatureExtractor;

const SPORTS: [&str; 8] = ["team", "match", "striker", "goal", "coach", "league", "season", "won"];
const POLITICS: [&str; 8] = ["senate", "vote", "bill", "party", "campaign", "policy", "minister", "passed"];
const COMMON: [&str; 6] = ["the", "a", "after", "new", "with", "strong"];

/// deterministic short documents, no I/O
fn synthetic_documents(count: usize) -> Vec<String> {
    let mut state: u32 = 0x9e37_79b9;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as usize
    };
    (0..count)
        .map(|i| {
            let topic = if i % 2 == 0 { &SPORTS } else { &POLITICS };
            (0..10)
                .map(|j| if j % 3 == 0 { COMMON[next() % COMMON.len()] } else { topic[next() % topic.len()] })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn feature_benchmark(c: &mut Criterion) {
    let docs = synthetic_documents(2000);

    c.bench_function("build_vocabulary", |b| {
        b.iter(|| {
            let mut extractor = FeatureExtractor::new();
            extractor.build_vocabulary(&docs)
        });
    });

    let mut extractor = FeatureExtractor::new();
    extractor.build_vocabulary(&docs);
    extractor.build_ngram_vocabulary(&docs, 2);

    c.bench_function("bag_of_words", |b| {
        b.iter(|| extractor.bag_of_words(&docs));
    });

    c.bench_function("ngram_features", |b| {
        b.iter(|| extractor.ngram_features(&docs, 2));
    });

    c.bench_function("tfidf", |b| {
        b.iter(|| extractor.tfidf(&docs).expect("synthetic documents are never empty"));
    });
}

criterion_group!(benches, feature_benchmark);
criterion_main!(benches);
