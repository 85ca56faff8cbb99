use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fuzzyset::{FuzzySet, FuzzySetConfig};

fn corpus() -> Vec<String> {
    let stems = ["apple", "banana", "cherry", "grape", "lemon", "mango", "orange", "peach"];
    (0..2000)
        .map(|i| format!("{} {}", stems[i % stems.len()], i))
        .collect()
}

fn bench_add(c: &mut Criterion) {
    let values = corpus();
    c.bench_function("add 2000", |b| {
        b.iter(|| FuzzySet::new(black_box(values.iter().cloned()), FuzzySetConfig::default()))
    });
}

fn bench_search(c: &mut Criterion) {
    let values = corpus();
    let set = FuzzySet::new(values.iter().cloned(), FuzzySetConfig::default()).unwrap();
    let cosine = FuzzySet::new(values, FuzzySetConfig::new().with_levenshtein(false)).unwrap();

    c.bench_function("search levenshtein", |b| {
        b.iter(|| set.search(black_box("bananna 1234"), None))
    });
    c.bench_function("search cosine", |b| {
        b.iter(|| cosine.search(black_box("bananna 1234"), None))
    });
}

criterion_group!(benches, bench_add, bench_search);
criterion_main!(benches);
