//! This bench parses a synthetic catalog of prerequisite texts, mixing the
//! shapes found in real course listings.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use prereqs::{PrerequisiteParser, PrerequisiteRecord};

const SHAPES: [&str; 8] = [
    "CSE 1010 and CSE 1729",
    "MATH 1131Q or MATH 1151Q",
    "CSE 2100 and (MATH 2210Q or MATH 2410Q); open to juniors or higher.",
    "Prerequisite: CHEM 1127Q. Corequisite: CHEM 1128Q.",
    "Permission of instructor required",
    "CSE 1010 and CSE 1729 or MATH 2210Q",
    "PHYS 1201Q, PHYS 1202Q, minimum grade of C",
    "",
];

/// Generates a catalog of `size` prerequisite texts.
fn catalog(size: usize) -> Vec<String> {
    SHAPES
        .iter()
        .cycle()
        .take(size)
        .enumerate()
        .map(|(i, text)| text.replace("1010", &format!("{:04}", 1000 + i % 9000)))
        .collect()
}

fn parse_single(c: &mut Criterion) {
    let parser = PrerequisiteParser::default();
    c.bench_function("parse grouped text", |b| {
        b.iter(|| parser.parse(black_box(SHAPES[2])));
    });
}

fn parse_catalog(c: &mut Criterion) {
    let parser = PrerequisiteParser::default();
    let texts = catalog(5_000);
    c.bench_function("parse catalog", |b| {
        b.iter(|| PrerequisiteRecord::batch(&parser, black_box(texts.as_slice())));
    });
}

criterion_group!(benches, parse_single, parse_catalog);
criterion_main!(benches);
