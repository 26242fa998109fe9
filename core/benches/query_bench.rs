use criterion::{criterion_group, criterion_main, Criterion};
use tse_core::eval::evaluate_query;
use tse_core::rank::rank;
use tse_core::tokenizer::page_words;
use tse_core::{InvertedIndex, Query};

const TEXT: &str = "the quick brown fox jumps over the lazy dog while the cat watches \
    from the window and the bird sings about foxes dogs cats and windows";

fn build_index(docs: u32) -> InvertedIndex {
    let mut idx = InvertedIndex::new();
    for doc_id in 1..=docs {
        for (i, w) in page_words(TEXT).enumerate() {
            if (i as u32 + doc_id) % 3 != 0 {
                idx.insert_occurrence(&w, doc_id);
            }
        }
    }
    idx
}

fn bench_query(c: &mut Criterion) {
    let idx = build_index(2_000);
    let q = Query::parse("quick and fox or lazy dog or window").unwrap();
    c.bench_function("evaluate_and_rank", |b| b.iter(|| rank(&evaluate_query(&idx, &q))));
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("page_words", |b| b.iter(|| page_words(TEXT).count()));
}

criterion_group!(benches, bench_query, bench_tokenize);
criterion_main!(benches);
