//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chatlens::analysis::{InsightSummary, StatisticsSnapshot, aggregate, aggregate_chunked};
use chatlens::cache::SnapshotCache;
use chatlens::cli::{Args, OutputFormat};
use chatlens::loader::load_exports;
use chatlens::output::{write_csv, write_json};
use chatlens::progress::stderr_progress;
use chatlens::{ChatlensError, Message};

/// Messages per progress report.
const PROGRESS_CHUNK: usize = 10_000;

/// Number of ranked entries shown in the terminal report.
const REPORT_TOP: usize = 5;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();
    let output_path = args.output_path();

    // Print header
    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for input in &args.inputs {
        println!("📂 Input:   {}", input.display());
    }
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", args.format);
    if let Some(ref cache) = args.cache {
        println!("🗄️  Cache:   {}", cache.display());
    }
    println!();

    // Step 1: Load
    println!("⏳ Loading exports...");
    let load_start = Instant::now();
    let messages = load_exports(args.inputs.as_slice())?;
    println!(
        "   Found {} messages ({:.2}s)",
        messages.len(),
        load_start.elapsed().as_secs_f64()
    );

    // Step 2: Analyze (or reuse the cached snapshot)
    let analyze_start = Instant::now();
    let snapshot = analyze(args, &messages)?;
    println!(
        "   Analyzed in {:.2}s",
        analyze_start.elapsed().as_secs_f64()
    );

    // Step 3: Write output in selected format
    println!("💾 Writing {}...", args.format);
    match args.format {
        OutputFormat::Json => write_json(&snapshot, &output_path)?,
        OutputFormat::Csv => write_csv(&messages, &output_path)?,
        OutputFormat::Summary => {
            let summary = InsightSummary::build(&snapshot, &messages);
            std::fs::write(&output_path, summary.to_json()?)?;
        }
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    print_report(&snapshot);

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = messages.len() as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

fn analyze(args: &Args, messages: &[Message]) -> Result<StatisticsSnapshot, ChatlensError> {
    let cache = args.cache.as_ref().map(SnapshotCache::new);
    let config = args.analysis_config();

    if let Some(snapshot) = cache
        .as_ref()
        .and_then(|c| c.get_fresh(messages.len(), &config))
    {
        println!("📊 Using cached statistics");
        return Ok(snapshot);
    }

    println!("📊 Analyzing messages...");
    let snapshot = if args.progress {
        aggregate_chunked(messages, &config, PROGRESS_CHUNK, &stderr_progress())
    } else {
        aggregate(messages, &config)
    };

    if let Some(cache) = cache {
        if let Err(e) = cache.store(&snapshot, messages.len(), &config) {
            warn!(path = %cache.path().display(), error = %e, "could not write snapshot cache");
        }
    }
    Ok(snapshot)
}

fn print_report(snapshot: &StatisticsSnapshot) {
    println!();
    println!("📊 Summary:");
    println!("   Messages:      {}", snapshot.total_messages);
    println!("   Participants:  {}", snapshot.participants.join(", "));
    for (name, count) in &snapshot.messages_by_participant {
        println!("     {name}: {count}");
    }
    println!(
        "   Words:         {} ({} unique, {:.1} per message)",
        snapshot.total_words, snapshot.unique_words, snapshot.average_words_per_message
    );
    println!(
        "   Active days:   {} (longest streak {})",
        snapshot.active_days(),
        snapshot.longest_streak
    );
    if let Some(hour) = snapshot.busiest_hour() {
        println!("   Busiest hour:  {hour:02}:00 UTC");
    }
    if let Some(day) = snapshot.busiest_day() {
        println!("   Busiest day:   {} ({} messages)", day.date, day.count);
    }
    println!(
        "   Media:         {} messages, {} attachments",
        snapshot.media_messages,
        snapshot.media_by_type.total()
    );
    println!("   Links:         {}", snapshot.links_shared.len());
    println!("   Reactions:     {}", snapshot.total_reactions());

    if !snapshot.top_words.is_empty() {
        let words: Vec<String> = snapshot
            .top_words
            .iter()
            .take(REPORT_TOP)
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!("   Top words:     {}", words.join(", "));
    }
    if !snapshot.top_emojis.is_empty() {
        let emojis: Vec<String> = snapshot
            .top_emojis
            .iter()
            .take(REPORT_TOP)
            .map(|e| format!("{} ({})", e.emoji, e.count))
            .collect();
        println!("   Top emojis:    {}", emojis.join(" "));
    }

    let scores = &snapshot.engagement_scores;
    println!();
    println!("💬 Engagement:");
    println!("   Reply efficiency:   {:.0}", scores.reply_efficiency);
    println!("   Initiation balance: {:.0}", scores.initiation_balance);
    println!("   Consistency:        {:.0}", scores.conversation_consistency);
    println!("   Double-text ratio:  {:.0}", scores.double_text_ratio);
}
