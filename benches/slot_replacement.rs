//! Benchmarks for slot substitution.
//!
//! Covers the two costs paid per template file: matching the destination
//! path against the slot path globs, and the single-pass token replacement.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::{Path, PathBuf};
use stencil::config::ScaffoldConfig;
use stencil::slots::SlotReplacer;

fn config_with_slots(custom: usize) -> ScaffoldConfig {
    let mut config = ScaffoldConfig::new("acme-widget", "Ada Lovelace")
        .with_slot_path("**/*.md")
        .with_slot_path("**/package.json")
        .with_slot_path("src/**/*.ts");
    for i in 0..custom {
        config = config.with_slot(format!("[SLOT_{}]", i), format!("value-{}", i));
    }
    config
}

/// A README-sized document with a token every few lines.
fn document(lines: usize, custom: usize) -> String {
    let mut doc = String::new();
    for i in 0..lines {
        match i % 4 {
            0 => doc.push_str("# [REPO_NAME] by [AUTHOR_NAME]\n"),
            1 if custom > 0 => doc.push_str(&format!("Setting: [SLOT_{}]\n", i % custom)),
            _ => doc.push_str("Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n"),
        }
    }
    doc
}

fn project_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for i in 0..50 {
        paths.push(root.join(format!("src/module{}/index.ts", i)));
        paths.push(root.join(format!("src/module{}/styles.css", i)));
    }
    for i in 0..20 {
        paths.push(root.join(format!("docs/guide/chapter{}.md", i)));
    }
    paths.push(root.join("package.json"));
    paths.push(root.join("package-lock.json"));
    paths.push(root.join("README.md"));
    paths
}

fn bench_replace_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_all");

    for custom in [0, 8, 64] {
        let replacer = SlotReplacer::new(&config_with_slots(custom)).unwrap();
        let doc = document(400, custom);
        group.bench_with_input(BenchmarkId::new("custom_slots", custom), &doc, |b, doc| {
            b.iter(|| replacer.replace_all(black_box(doc)).len())
        });
    }

    // no tokens at all, the borrowed fast path
    let replacer = SlotReplacer::new(&config_with_slots(0)).unwrap();
    let plain = "Lorem ipsum dolor sit amet.\n".repeat(400);
    group.bench_function("no_tokens", |b| {
        b.iter(|| replacer.replace_all(black_box(&plain)).len())
    });

    group.finish();
}

fn bench_path_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_paths");
    let replacer = SlotReplacer::new(&config_with_slots(0)).unwrap();
    let root = PathBuf::from("/tmp/acme-widget");
    let paths = project_paths(&root);

    group.bench_function("relative_to_root", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|p| replacer.applies_to(black_box(p), Some(&root)))
                .count()
        })
    });

    group.bench_function("absolute_only", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|p| replacer.applies_to(black_box(p), None))
                .count()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_replace_all, bench_path_matching);
criterion_main!(benches);
