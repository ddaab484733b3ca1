//! Benchmarks for page rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kdocs_render::{DocMenuEntry, PageRenderer, Theme};

const TEMPLATE: &str = concat!(
    r#"<aside data-name="note" class="aside"><div class="note">@BODY@</div></aside>"#,
    r#"<aside data-name="note-container" class="box"><div class="notes">@BODY@</div></aside>"#,
    r#"<aside data-name="card" class="box"><div class="card @ARGS@">@BODY@</div></aside>"#,
    r#"<aside data-name="hint" class="macro"><em>@ARGS@</em></aside>"#,
    "<html><title>@name@</title><nav>@menu@</nav>@body@</html>",
);

/// Generate a document mixing prose, macros, boxes and asides.
fn generate_source(sections: usize) -> String {
    let mut md = String::from("# Document Title\n\nIntro paragraph.\n\n");
    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        md.push_str(&format!("### @hint remember {i}\n\n"));
        md.push_str("# ~card wide\n\nCard **body** text.\n\n# ~\n\n");
        md.push_str(&format!("# ~note\n\nSide note {i}.\n\n# ~\n\n"));
        md.push_str("https://youtu.be/abc123\n\n");
    }
    md
}

fn theme() -> Theme {
    Theme {
        name: Some("Bench".to_owned()),
        doc_menu: vec![DocMenuEntry::group(
            "Docs",
            (0..10)
                .map(|i| DocMenuEntry::link(format!("Page {i}"), format!("/docs/{i}")))
                .collect(),
        )],
        ..Theme::default()
    }
}

fn bench_render_simple(c: &mut Criterion) {
    let renderer = PageRenderer::new();
    let theme = Theme::default();

    c.bench_function("render_simple_page", |b| {
        b.iter(|| renderer.render("@body@", "# Hello\n\nSimple content.", &theme, None));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = PageRenderer::new();
    let theme = theme();

    let mut group = c.benchmark_group("render_by_size");
    for sections in [5, 20, 100] {
        let source = generate_source(sections);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("sections", sections),
            &source,
            |b, source| b.iter(|| renderer.render(TEMPLATE, source, &theme, None)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_render_simple, bench_render_varying_sizes);
criterion_main!(benches);
