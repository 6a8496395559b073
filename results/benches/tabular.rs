//! This benchmark measures the throughput of the CSV and TSV results parsers,
//! with both refill strategies of the input layer.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_api::binding::ResultBinding;
use tessera_api::handler::{NodeFactory, ResultsHandler};
use tessera_api::parser::ResultsParser;
use tessera_io::{ReaderOptions, SourceKind};
use tessera_results::csv::SparqlCsvParser;
use tessera_results::tsv::SparqlTsvParser;

const ROWS: usize = 2000;

/// Counts rows without keeping them.
#[derive(Default)]
struct Counter(usize);

impl NodeFactory for Counter {}

impl ResultsHandler for Counter {
    fn handle_boolean_result(&mut self, _value: bool) {}

    fn handle_result(&mut self, binding: ResultBinding) -> bool {
        self.0 += binding.bound_count();
        true
    }
}

fn csv_doc() -> String {
    let mut doc = String::from("s,label,n\r\n");
    for i in 0..ROWS {
        doc.push_str(&format!(
            "http://example.org/item/{i},\"item, number {i}\",_:b{i}\r\n"
        ));
    }
    doc
}

fn tsv_doc() -> String {
    let mut doc = String::from("?s\t?label\t?n\n");
    for i in 0..ROWS {
        doc.push_str(&format!(
            "<http://example.org/item/{i}>\t\"item number {i}\"@en\t{i}.5e1\n"
        ));
    }
    doc
}

fn csv(c: &mut Criterion) {
    let doc = csv_doc();
    for kind in [SourceKind::Memory, SourceKind::Stream] {
        let parser = SparqlCsvParser::new().with_reader_options(ReaderOptions::new().with_kind(kind));
        c.bench_with_input(
            BenchmarkId::new("csv", format!("{kind:?}")),
            black_box(&doc),
            |b, doc| {
                b.iter(|| {
                    let mut counter = Counter::default();
                    parser.load(&mut counter, doc.as_bytes()).unwrap();
                    black_box(counter.0)
                });
            },
        );
    }
}

fn tsv(c: &mut Criterion) {
    let doc = tsv_doc();
    for kind in [SourceKind::Memory, SourceKind::Stream] {
        let parser = SparqlTsvParser::new().with_reader_options(ReaderOptions::new().with_kind(kind));
        c.bench_with_input(
            BenchmarkId::new("tsv", format!("{kind:?}")),
            black_box(&doc),
            |b, doc| {
                b.iter(|| {
                    let mut counter = Counter::default();
                    parser.load(&mut counter, doc.as_bytes()).unwrap();
                    black_box(counter.0)
                });
            },
        );
    }
}

criterion_group!(benches, csv, tsv);
criterion_main!(benches);
