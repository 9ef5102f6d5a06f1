use criterion::{Criterion, criterion_group, criterion_main};
use wikitree_syntax::parse;
use wikitree_syntax::scanner::Scanner;
mod common;

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_wikitext_content(100);
    group.bench_function("scan_spans", |b| {
        b.iter(|| {
            let spans = Scanner::new(std::hint::black_box(content.as_bytes())).collect_spans();
            std::hint::black_box(spans)
        });
    });

    group.bench_function("parse_page", |b| {
        b.iter(|| {
            let doc = parse(std::hint::black_box(content.as_bytes()));
            std::hint::black_box(doc)
        });
    });

    let emphasis = common::generate_ambiguous_emphasis(1000);
    group.bench_function("ambiguous_emphasis", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(emphasis.as_bytes()))));
    });

    let nested = common::generate_nested_templates(200);
    group.bench_function("nested_templates", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(nested.as_bytes()))));
    });

    let stray = format!("{}{}", "{{".repeat(10_000), "]".repeat(10_000));
    group.bench_function("stray_closers", |b| {
        b.iter(|| std::hint::black_box(parse(std::hint::black_box(stray.as_bytes()))));
    });

    group.finish();
}

criterion_group!(benches, bench_parsing);
criterion_main!(benches);
