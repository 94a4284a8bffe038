//! Benchmarks for wrap-point computation and cache behavior
//!
//! Run with: cargo bench layout

use softwrap::{
    ContentType, Document, FixedWidthProvider, FontMetrics, Injection, SoftWrapEngine,
};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn prose_document(lines: usize) -> Document {
    let line = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor incididunt ut labore\n";
    Document::with_text(&line.repeat(lines))
}

fn markup_document(lines: usize) -> Document {
    let line = "<div class=\"row\"><span class=\"cell\">alpha beta gamma delta epsilon zeta</span></div>\n";
    let text = line.repeat(lines);
    let len = text.chars().count();
    Document::with_injections(&text, ContentType::PlainText, vec![Injection::new(0..len, ContentType::Html)])
        .unwrap()
}

fn engine(document: Document, width: i32) -> SoftWrapEngine {
    SoftWrapEngine::new(
        document,
        FontMetrics::new(8.0, 16.0),
        Box::new(FixedWidthProvider(width)),
    )
}

// ============================================================================
// Cold layout: every line computed from scratch
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn wrap_prose_cold(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| engine(prose_document(lines), 480))
        .bench_local_values(|mut engine| {
            let range = 0..engine.document().line_count();
            divan::black_box(engine.wrap_points(range).unwrap().count())
        });
}

#[divan::bench(args = [100, 1_000])]
fn wrap_markup_cold(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| engine(markup_document(lines), 480))
        .bench_local_values(|mut engine| {
            let range = 0..engine.document().line_count();
            divan::black_box(engine.wrap_points(range).unwrap().count())
        });
}

// ============================================================================
// Warm cache: repeated queries and single-line edits
// ============================================================================

#[divan::bench(args = [1_000, 10_000])]
fn wrap_prose_cached(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut engine = engine(prose_document(lines), 480);
            let range = 0..engine.document().line_count();
            engine.wrap_points(range).unwrap().count();
            engine
        })
        .bench_local_values(|mut engine| {
            let range = 0..engine.document().line_count();
            divan::black_box(engine.wrap_points(range).unwrap().count())
        });
}

#[divan::bench(args = [1_000, 10_000])]
fn edit_then_requery(bencher: divan::Bencher, lines: usize) {
    bencher
        .with_inputs(|| {
            let mut engine = engine(prose_document(lines), 480);
            let range = 0..engine.document().line_count();
            engine.wrap_points(range).unwrap().count();
            engine
        })
        .bench_local_values(|mut engine| {
            engine.insert_char(10, 'x').unwrap();
            let range = 0..engine.document().line_count();
            divan::black_box(engine.wrap_points(range).unwrap().count())
        });
}

// ============================================================================
// Single very long line (forced breaks dominate)
// ============================================================================

#[divan::bench(args = [10_000, 100_000])]
fn wrap_single_long_line(bencher: divan::Bencher, chars: usize) {
    bencher
        .with_inputs(|| engine(Document::with_text(&"x".repeat(chars)), 480))
        .bench_local_values(|mut engine| {
            divan::black_box(engine.wrap_points(0..1).unwrap().count())
        });
}
