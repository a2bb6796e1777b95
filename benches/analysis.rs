//! Benchmarks for chatlens text repair and aggregation.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench analysis -- aggregate`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatlens::Message;
use chatlens::analysis::{InsightSummary, aggregate};
use chatlens::config::AnalysisConfig;
use chatlens::loader::parse_export_str;
use chatlens::output::{to_csv, to_json};
use chatlens::text::{extract_emojis, repair};

// =============================================================================
// Test Data Generators
// =============================================================================

/// UTF-8 bytes re-read as Latin-1, like the exports store them.
fn mojibake(text: &str) -> String {
    text.bytes().map(char::from).collect()
}

const TEXTS: &[&str] = &[
    "Hello there, how are you doing today?",
    "Привет! Как дела? 😂😂",
    "lol ❤️ see you at the movies 🍿",
    "pizza tonight? 🍕🔥👍🏽",
    "Ça va très bien, merci",
];

fn generate_messages(count: usize) -> Vec<Message> {
    (0..count)
        .map(|i| {
            let sender = if i % 3 == 0 { "Alice" } else { "Bob" };
            let content = mojibake(TEXTS[i % TEXTS.len()]);
            let mut message = Message::new(sender, content)
                .with_timestamp_ms(1_705_314_600_000 + i as i64 * 90_000);
            if i % 7 == 0 {
                message = message.with_reaction(mojibake("❤"), "Alice");
            }
            if i % 11 == 0 {
                message = message.with_photos(1);
            }
            if i % 13 == 0 {
                message = message.with_link("https://www.youtube.com/watch?v=abc");
            }
            message
        })
        .collect()
}

fn generate_export_json(count: usize) -> String {
    let messages: Vec<String> = generate_messages(count)
        .iter()
        .rev()
        .map(|m| serde_json::to_string(m).unwrap())
        .collect();
    format!(r#"{{"participants": [], "messages": [{}]}}"#, messages.join(",\n"))
}

// =============================================================================
// Text Benchmarks
// =============================================================================

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");
    let inputs: Vec<(&str, String)> = vec![
        ("clean", "Hello there, how are you doing today?".to_string()),
        ("cyrillic", mojibake("Привет! Как дела?")),
        ("emoji", mojibake("😂😂 ❤️ 👍🏽")),
    ];

    for (name, text) in &inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(repair(black_box(text)).len()));
        });
    }
    group.finish();
}

fn bench_extract_emojis(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_emojis");
    let inputs: Vec<(&str, String)> = vec![
        ("no_emoji", "Hello there, how are you doing today?".to_string()),
        ("repaired", "pizza tonight? 🍕🔥👍🏽 🇰🇿 👨‍👩‍👧".to_string()),
        ("mojibake", mojibake("pizza tonight? 🍕🔥👍🏽 🇰🇿 👨‍👩‍👧")),
    ];

    for (name, text) in &inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| black_box(extract_emojis(black_box(text))));
        });
    }
    group.finish();
}

// =============================================================================
// Analysis Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let config = AnalysisConfig::default();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let messages = generate_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(aggregate(black_box(messages), &config)));
        });
    }
    group.finish();
}

fn bench_insight_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("insight_summary");
    let messages = generate_messages(10_000);
    let snapshot = aggregate(&messages, &AnalysisConfig::default());

    group.bench_function("build", |b| {
        b.iter(|| black_box(InsightSummary::build(&snapshot, black_box(&messages))));
    });
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let messages = generate_messages(10_000);
    let snapshot = aggregate(&messages, &AnalysisConfig::default());

    group.bench_function("snapshot_json", |b| {
        b.iter(|| black_box(to_json(black_box(&snapshot)).unwrap()));
    });
    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("messages_csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&messages)).unwrap()));
    });
    group.finish();
}

// =============================================================================
// Full Pipeline
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let config = AnalysisConfig::default().with_sort_input(true);

    for size in [1_000_usize, 10_000] {
        let json = generate_export_json(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| {
                let messages = parse_export_str(black_box(json)).unwrap();
                let snapshot = aggregate(&messages, &config);
                black_box(to_json(&snapshot).unwrap())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_repair,
    bench_extract_emojis,
    bench_aggregate,
    bench_insight_summary,
    bench_output,
    bench_full_pipeline,
);

criterion_main!(benches);
