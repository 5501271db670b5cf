//! Domain Sift - dictionary-driven domain availability scanning
//!
//! Splits every word of a dictionary against a TLD set, checks each
//! candidate's registration status, and checkpoints categorized results so
//! long, rate-limited scans survive interruption.

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::Ordering;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use domain_sift::{
    words, DomainSiftError, LookupClient, Result, ScanConfig, ScanController, ScanSummary,
    ScanTermination,
};

struct CliOptions {
    config: ScanConfig,
    word_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the library
    if let Err(e) = domain_sift::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args: Vec<String> = env::args().collect();

    // Check for help
    if args.iter().skip(1).any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let cli = match parse_args(&args[1..]) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 Use --help for usage information");
            process::exit(2);
        }
    };

    // Keep the guard alive for the lifetime of the process so buffered
    // file log lines are flushed on exit.
    let _log_guard = init_logging(&cli.config.results_dir);

    if let Err(e) = run_scan(cli).await {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }

    Ok(())
}

/// Parse command line options, with `DOMAIN_SIFT_*` env fallbacks.
fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut config = ScanConfig::default();
    let mut word_file = None;

    if let Ok(dir) = env::var("DOMAIN_SIFT_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }
    if let Ok(tlds) = env::var("DOMAIN_SIFT_TLDS") {
        config.tlds = parse_tld_list(&tlds);
    }

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--limit" | "-n" => {
                let raw = flag_value(&mut iter, arg)?;
                let limit = raw.parse::<usize>().map_err(|_| {
                    DomainSiftError::config(format!("Invalid word limit: {}", raw))
                })?;
                config.word_limit = Some(limit);
            }
            "--tlds" => {
                config.tlds = parse_tld_list(flag_value(&mut iter, arg)?);
            }
            "--method" => {
                config.method = flag_value(&mut iter, arg)?.parse()?;
            }
            "--results-dir" => {
                config.results_dir = PathBuf::from(flag_value(&mut iter, arg)?);
            }
            "--delay-ms" => {
                let raw = flag_value(&mut iter, arg)?;
                let ms = raw.parse::<u64>().map_err(|_| {
                    DomainSiftError::config(format!("Invalid delay: {}", raw))
                })?;
                config.request_delay = Duration::from_millis(ms);
            }
            other if other.starts_with('-') => {
                return Err(DomainSiftError::config(format!("Unknown option: {}", other)));
            }
            other => {
                word_file = Some(PathBuf::from(other));
            }
        }
    }

    if config.tlds.is_empty() {
        return Err(DomainSiftError::config("TLD set cannot be empty"));
    }

    Ok(CliOptions { config, word_file })
}

fn flag_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a String> {
    iter.next()
        .ok_or_else(|| DomainSiftError::config(format!("Missing value for {}", flag)))
}

fn parse_tld_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Leveled logs to stdout and a daily-rotating file under the results dir.
fn init_logging(results_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(results_dir.join("logs"), "domain-sift.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domain_sift=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .init();

    guard
}

/// Main scan workflow
async fn run_scan(cli: CliOptions) -> Result<()> {
    println!("🔍 Domain Sift - dictionary-driven domain availability scanning");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    let word_list = match &cli.word_file {
        Some(path) => {
            let list = words::load_word_file(path)?;
            println!("📖 Loaded {} words from {}", list.len(), path.display());
            list
        }
        None => {
            let list = words::starter_words();
            println!(
                "📖 No word list given; using the built-in starter list ({} words)",
                list.len()
            );
            list
        }
    };

    let effective_total = cli
        .config
        .word_limit
        .map(|l| l.min(word_list.len()))
        .unwrap_or(word_list.len());
    println!(
        "🌐 Checking splits against {} TLDs via {} ({} words)",
        cli.config.tlds.len(),
        cli.config.method,
        effective_total
    );
    println!();

    let lookup = LookupClient::new(cli.config.method, cli.config.lookup_timeout)?;
    let mut controller = ScanController::new(cli.config, lookup)?;

    // Graceful ctrl-c: observed between lookups, always checkpoints.
    let cancel = controller.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            eprintln!("🛑 Interrupt received - checkpointing before exit...");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let bar = ProgressBar::new(effective_total as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} words {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );

    let summary = controller
        .run(&word_list, |progress| {
            bar.set_position(progress.words_processed);
            bar.set_message(format!("✅ {} available", progress.available_count));
        })
        .await?;
    bar.finish_and_clear();

    print_summary(&summary);
    Ok(())
}

/// Display the final summary in a clean format
fn print_summary(summary: &ScanSummary) {
    println!();

    if summary.termination == ScanTermination::Interrupted {
        println!("🛑 Scan interrupted - progress saved for the next run");
        println!();
    }

    if !summary.available.is_empty() {
        println!("🎉 Available Domains ({}):", summary.available.len());
        println!("─────────────────────────");
        for domain in &summary.available {
            println!("✅ {}", domain);
        }
        println!();
    }

    println!("📈 Summary ({}):", summary.termination);
    println!("   ✅ Available: {}", summary.available.len());
    println!("   ❌ Unavailable: {}", summary.unavailable_count);
    if summary.error_count > 0 {
        println!("   ⚠️  Errors: {}", summary.error_count);
    }
    println!("   📊 Total checked: {}", summary.checked_count);
    println!(
        "   📝 Words processed: {} ({} lookups this run)",
        summary.words_processed, summary.lookups_performed
    );

    println!();
    if summary.available.is_empty() {
        println!("😔 No available domains found yet. Try a bigger word list!");
    } else {
        println!(
            "🎉 Great! You have {} available domain(s) to choose from!",
            summary.available.len()
        );
    }
}

/// Print help information
fn print_help() {
    println!("🔍 Domain Sift - dictionary-driven domain availability scanning");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-sift [OPTIONS] [WORDLIST]");
    println!();
    println!("ARGS:");
    println!("    WORDLIST           Word list file, one word per line");
    println!("                       (omit to scan the built-in starter list)");
    println!();
    println!("OPTIONS:");
    println!("    -n, --limit N      Only process the first N words");
    println!("    --tlds LIST        Comma-separated TLD set (default: com,net,org,info,biz,us,co,io,tech)");
    println!("    --method NAME      Lookup backend: whois or rdap (default: whois)");
    println!("    --results-dir DIR  Checkpoint directory (default: results)");
    println!("    --delay-ms N       Delay between lookups in milliseconds (default: 1000)");
    println!("    -h, --help         Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    domain-sift words.txt                  # Scan a dictionary file");
    println!("    domain-sift --limit 1000 words.txt     # First 1000 words only");
    println!("    domain-sift --tlds co,io words.txt     # Custom TLD set");
    println!("    domain-sift --method rdap words.txt    # RDAP instead of WHOIS");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    DOMAIN_SIFT_RESULTS_DIR   Default checkpoint directory");
    println!("    DOMAIN_SIFT_TLDS          Default TLD set (comma-separated)");
    println!("    RUST_LOG                  Log filter (default: domain_sift=info)");
    println!();
    println!("Interrupted scans resume automatically: checked domains are");
    println!("checkpointed to the results directory and never re-queried.");
    println!();
    println!("Made with ❤️ and 🦀 Rust");
}
