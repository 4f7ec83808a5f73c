use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use lowtide_core::{HttpSource, ScrapeConfig, ScrapeConfigBuilder, TideScraper, read_locations};
use owo_colors::OwoColorize;
use time::{Date, OffsetDateTime};
use time::macros::format_description;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const FAILURES_HELP: &str = "Locations that cannot be fetched or parsed are left out of the JSON \
and listed on stderr. Use --strict to exit with an error when that happens.";

/// Report the daylight low tides of a list of beaches as JSON
#[derive(Parser, Debug)]
#[command(name = "lowtide")]
#[command(version)]
#[command(about = "Report daylight low tides for a list of beaches", long_about = None)]
#[command(after_help = FAILURES_HELP)]
struct Args {
    /// File with one "<beach>, <city>" per line
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output file (default: today's date, e.g. 2024-05-12, in the current directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only print the JSON to stdout
    #[arg(long, conflicts_with = "output")]
    no_file: bool,

    /// Config file (default: <config dir>/lowtide/config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the location pages
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Number of locations fetched at once
    #[arg(long, value_name = "NUM")]
    concurrency: Option<usize>,

    /// Only read this many days of each tide table
    #[arg(long, value_name = "DAYS")]
    max_days: Option<u32>,

    /// Exit with an error if any location could not be scraped
    #[arg(long)]
    strict: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    fn apply_overrides(&self, config: ScrapeConfig) -> ScrapeConfig {
        let mut builder = ScrapeConfigBuilder::from_config(config);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(concurrency) = self.concurrency {
            builder = builder.concurrency(concurrency);
        }
        if self.max_days.is_some() {
            builder = builder.max_days(self.max_days);
        }
        builder.build()
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "lowtide=debug,lowtide_core=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(verbose)
        .with_writer(io::stderr)
        .init();
}

/// Today's local date, or the UTC date when the offset is unknown.
///
/// Must run before any other thread exists: `now_local` refuses to read the
/// offset in a multi-threaded process.
fn local_date() -> Date {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()).date()
}

/// `YYYY-MM-DD` file name for `date`.
fn dated_output_path(date: Date) -> anyhow::Result<PathBuf> {
    let name = date
        .format(format_description!("[year]-[month]-[day]"))
        .context("Failed to format today's date")?;
    Ok(PathBuf::from(name))
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    fs::write(path, json).with_context(|| format!("Failed to write to file: {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let today = local_date();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?
        .block_on(run(args, today))
}

async fn run(args: Args, today: Date) -> anyhow::Result<()> {

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "lowtide", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let input = args.input.as_deref().context("No input file given")?;

    if args.verbose {
        echo::print_step(1, 3, &format!("Reading locations from {}", input.display().bright_white()));
    }

    let config = ScrapeConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply_overrides(config);
    let locations =
        read_locations(input).with_context(|| format!("Failed to read locations: {}", input.display()))?;

    if args.verbose {
        eprintln!("  {} {}", "Locations:".dimmed(), locations.len().to_string().bright_white());
        eprintln!("  {} {}", "Base URL:".dimmed(), config.base_url.bright_white());
        eprintln!();
        echo::print_step(2, 3, "Scraping tide tables");
    }

    let started = Instant::now();
    let source = HttpSource::new(config.fetch.clone()).context("Failed to build HTTP client")?;
    let scraper = TideScraper::new(source, config);
    let report = scraper.scrape_low_tides(&locations).await.context("Failed to scrape locations")?;

    if args.verbose {
        echo::print_report_summary(&report, started.elapsed());
    }

    let json = report.to_json_pretty().context("Failed to render JSON")?;

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(json.len()).bright_white());
        eprintln!();
    }

    if !args.no_file {
        let path = match &args.output {
            Some(path) => path.clone(),
            None => dated_output_path(today)?,
        };
        write_output(&path, &json)?;
        if args.verbose {
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
    }

    println!("{}", json);

    if !report.failures.is_empty() {
        echo::print_warning(&format!("{} location(s) could not be scraped", report.failures.len()));
        echo::print_failures(&report.failures);
        if args.strict {
            anyhow::bail!("{} location(s) failed", report.failures.len());
        }
    }

    Ok(())
}
