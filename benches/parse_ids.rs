// benches/parse_ids.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use steam_bins::{ batch, ids };

/// A messy identifier file: mixed separators, duplicates, junk tokens.
fn sample(n: u32) -> String {
    let mut s = String::new();
    for i in 0..n {
        let id = 400_000 + (i * 7919) % 50_000;
        match i % 5 {
            0 => s.push_str(&format!("{id},\n")),
            1 => s.push_str(&format!("{id} ")),
            2 => s.push_str(&format!("{id}, ")),
            3 => s.push_str(&format!("{id}\r\n")),
            _ => s.push_str(&format!("x{id} {id}\t")),
        }
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let text = sample(20_000);

    c.bench_function("parse_identifiers_20k", |b| {
        b.iter(|| {
            let ids = ids::parse_identifiers(black_box(&text));
            black_box(ids.len())
        })
    });

    let parsed = ids::parse_identifiers(&text);
    c.bench_function("batches_of_100", |b| {
        b.iter(|| black_box(batch::batches(black_box(&parsed), 100).count()))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
