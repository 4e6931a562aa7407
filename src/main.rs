//! Command-line runner for the Krishi Rakshak agent.
//!
//! Prints one report (or one error object) on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use krishi_rakshak::core_modules::confidence::{ConfidenceSource, RandomConfidence};
use krishi_rakshak::{AgentConfig, KrishiRakshak, Locale, report};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Output format for the report
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Indented key-value text
    Text,
}

#[derive(Parser, Debug)]
#[command(name = "krishi-rakshak")]
#[command(author, version, about = "Pest severity, natural treatment and effectiveness from farm images")]
#[command(long_about = r#"
Estimates pest damage on a farm image from its color statistics, recommends a
natural treatment in the requested language, and, given a second image taken
after treatment, estimates how effective the treatment was.

The confidence value in the report is a placeholder, not a model output.

When no BEFORE image is given, the paths and language are asked for interactively.

Example:
  krishi-rakshak field_before.jpg
  krishi-rakshak field_before.jpg --after field_after.jpg --lang hi
"#)]
struct Cli {
    /// Image taken before treatment
    before: Option<PathBuf>,

    /// Image taken after treatment
    #[arg(short, long, value_name = "PATH")]
    after: Option<PathBuf>,

    /// Language of the recommendation (en, hi, kn); unknown codes fall back to en
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Seed for the placeholder confidence, for reproducible reports
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Paths and language for one run, from flags or from the prompts.
struct Request {
    before: PathBuf,
    after: Option<PathBuf>,
    locale: Locale,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let request = match cli.before.clone() {
        Some(before) => Request {
            before,
            after: cli.after.clone(),
            locale: Locale::from_code(&cli.lang),
        },
        None => prompt_request()?,
    };

    info!("Starting Krishi Rakshak");

    match cli.seed {
        Some(seed) => execute(RandomConfidence::seeded(seed), &request, cli.output),
        None => execute(RandomConfidence::new(), &request, cli.output),
    }
}

fn execute<C: ConfidenceSource>(
    confidence_source: C,
    request: &Request,
    output: OutputFormat,
) -> Result<ExitCode> {
    let mut agent = KrishiRakshak::new(AgentConfig::default(), confidence_source);
    let result = agent.run(&request.before, request.after.as_deref(), request.locale);

    let (rendered, code) = match (&result, output) {
        (Ok(agent_report), OutputFormat::Json) => (report::to_json(agent_report)?, ExitCode::SUCCESS),
        (Ok(agent_report), OutputFormat::Text) => (report::to_text(agent_report), ExitCode::SUCCESS),
        (Err(error), OutputFormat::Json) => (report::to_json(error)?, ExitCode::FAILURE),
        (Err(error), OutputFormat::Text) => (format!("error ({}): {}\n", error.kind(), error), ExitCode::FAILURE),
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rendered.trim_end()).context("failed to write report")?;
    Ok(code)
}

fn prompt_request() -> Result<Request> {
    let before = prompt("Enter path to 'before treatment' farm image: ")?;
    let after = prompt("Enter path to 'after treatment' image (or press Enter to skip): ")?;
    let lang = prompt("Enter language (en / hi / kn): ")?;

    Ok(Request {
        before: PathBuf::from(before),
        after: (!after.is_empty()).then(|| PathBuf::from(after)),
        locale: Locale::from_code(&lang),
    })
}

fn prompt(message: &str) -> Result<String> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{message}").context("failed to write prompt")?;
    stderr.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
