// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use csp_recon::{extract_domains, CspAnalyzer};

fn csp_extraction_benchmark(c: &mut Criterion) {
    let csp = "default-src 'self'; \
        script-src 'self' https://cdn.example.com https://www.googletagmanager.com/gtm.js \
        https://static.example.net/lib/app.js; \
        connect-src https://api.example.com wss://ws.example.com; \
        img-src data: https://images.example.org; report-uri https://csp.example.com/report";
    let analyzer = CspAnalyzer::new();

    c.bench_function("csp_analyze", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(csp))))
    });
}

fn script_scan_benchmark(c: &mut Criterion) {
    let chunk = r#"!function(e){var t="https://api.example.com/v1/events",n='https://cdn.example.net/x.js';
        e.fetch(t,{method:"POST"}).then(function(r){return r.json()});}(window);"#;
    let script = chunk.repeat(500);

    c.bench_function("script_scan", |b| {
        b.iter(|| black_box(extract_domains(black_box(&script))))
    });
}

criterion_group!(benches, csp_extraction_benchmark, script_scan_benchmark);
criterion_main!(benches);
