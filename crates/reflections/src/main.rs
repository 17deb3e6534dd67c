use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use url::Url;

use reflections_core::{Language, ReflectionError, DEFAULT_LANGUAGE};
use reflections_query::QueryService;
use reflections_state::{FilePreferences, StateSync, UrlParams};
use reflections_store::{DatasetSource, JsonStore, SqliteStore};

mod config;
mod format;

use config::ProjectConfig;

#[derive(Parser, Debug)]
#[command(
    name = "reflections",
    about = "Read-only lookups over the multilingual daily reflections dataset",
    version
)]
struct Cli {
    /// Language: en, es, fr, pt-br (legacy spellings accepted)
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    /// Path to the SQLite database
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Directory of per-language JSON documents (wins over --db)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Width of formatted output blocks
    #[arg(long, global = true, default_value_t = 80)]
    width: usize,

    /// Emit JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show today's reflection and remember the selection
    Today,
    /// Show the reflection for a specific date (YYYY-MM-DD)
    Date { date: NaiveDate },
    /// Adopt a shared link and show its reflection
    Open { url: Url },
    /// Step the remembered selection one day forward
    Next,
    /// Step the remembered selection one day back
    Prev,
    /// Print the shareable URL for the remembered selection
    Share,
    /// Show one random reflection
    Random,
    /// Search reflections by keyword (empty keyword matches everything)
    Search { keyword: String },
    /// List all reflections for a month (1-12)
    Month {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
    /// Compare one date across all languages
    Multilingual { date: NaiveDate },
    /// Show dataset statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        if let Some(hint) = remediation_hint(&e) {
            eprintln!("{} {}", "hint:".yellow().bold(), hint);
        }
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = ProjectConfig::load(&working_dir)?.unwrap_or_default();

    let service = QueryService::new(resolve_source(&cli, &config));
    let today = Local::now().date_naive();

    match &cli.command {
        Command::Today
        | Command::Date { .. }
        | Command::Open { .. }
        | Command::Next
        | Command::Prev
        | Command::Share => run_selection_command(&cli, &config, &service, today),
        Command::Random => {
            let reflection = service.get_random(resolve_language(&cli, &config)?)?;
            print_reflection(&cli, &reflection)
        }
        Command::Search { keyword } => {
            let language = resolve_language(&cli, &config)?;
            let results = service.search(language, keyword)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            println!(
                "{}",
                format!(
                    "Found {} reflection(s) matching '{}' ({})",
                    results.len(),
                    keyword,
                    language
                )
                .bold()
            );
            for reflection in &results {
                println!();
                println!("{}", format::render_summary(reflection, cli.width));
            }
            Ok(())
        }
        Command::Month { month } => {
            let language = resolve_language(&cli, &config)?;
            let results = service.get_month(language, *month)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            println!(
                "{}",
                format!("{} reflection(s) in month {} ({})", results.len(), month, language)
                    .bold()
            );
            for reflection in &results {
                println!();
                println!("{}", format::render_summary(reflection, cli.width));
            }
            Ok(())
        }
        Command::Multilingual { date } => {
            let reflections = service.get_multilingual(*date)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reflections)?);
            } else if reflections.is_empty() {
                println!("{}", format!("No reflections found for {}.", date).dimmed());
            } else {
                println!("{}", format::render_multilingual(&reflections, *date, cli.width));
            }
            Ok(())
        }
        Command::Stats => {
            let stats = service.statistics()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("{}", format::render_statistics(&stats, cli.width));
            }
            Ok(())
        }
    }
}

/// Commands that operate on the remembered (language, date) selection.
fn run_selection_command(
    cli: &Cli,
    config: &ProjectConfig,
    service: &QueryService<Box<dyn DatasetSource>>,
    today: NaiveDate,
) -> Result<()> {
    let params = match &cli.command {
        Command::Open { url } => UrlParams::from_url(url),
        _ => UrlParams::default(),
    };

    let mut sync = StateSync::initialize(FilePreferences::default(), &params, today);
    if let Some(language) = language_override(cli, config)? {
        sync.set_language(language);
    }

    match &cli.command {
        Command::Today => {
            sync.jump_to_today(today);
        }
        Command::Date { date } => {
            sync.set_date(*date);
        }
        Command::Open { .. } => {}
        Command::Next => {
            sync.next_day();
        }
        Command::Prev => {
            sync.previous_day();
        }
        Command::Share => {
            let base = config
                .site
                .base_url
                .as_deref()
                .context("no site base URL configured for shareable links")?;
            let base = Url::parse(base)
                .with_context(|| format!("invalid [site].base_url '{}'", base))?;
            println!("{}", sync.canonical_url(&base));
            return Ok(());
        }
        _ => unreachable!("not a selection command"),
    }

    let selection = *sync.selection();
    match service.get_by_date(selection.language, selection.date)? {
        Some(reflection) => print_reflection(cli, &reflection),
        None => {
            println!(
                "{}",
                format!(
                    "No reflection found for {} ({}).",
                    selection.date, selection.language
                )
                .dimmed()
            );
            Ok(())
        }
    }
}

fn print_reflection(cli: &Cli, reflection: &reflections_core::Reflection) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(reflection)?);
    } else {
        println!("{}", format::render_reflection(reflection, cli.width));
    }
    Ok(())
}

/// Dataset location precedence: flags first, then `reflections.toml`,
/// then the conventional `data/reflections.db`.
fn resolve_source(cli: &Cli, config: &ProjectConfig) -> Box<dyn DatasetSource> {
    if let Some(dir) = &cli.data_dir {
        Box::new(JsonStore::new(dir))
    } else if let Some(db) = &cli.db {
        Box::new(SqliteStore::new(db))
    } else if let Some(dir) = &config.data.json_dir {
        Box::new(JsonStore::new(dir))
    } else if let Some(db) = &config.data.db {
        Box::new(SqliteStore::new(db))
    } else {
        Box::new(SqliteStore::new(PathBuf::from("data/reflections.db")))
    }
}

/// An explicit language request, if any: `--lang` beats the config
/// file. `None` means "leave the remembered/default language alone".
fn language_override(cli: &Cli, config: &ProjectConfig) -> Result<Option<Language>> {
    if let Some(language) = cli.lang {
        return Ok(Some(language));
    }
    match &config.language {
        Some(code) => Ok(Some(code.parse::<Language>()?)),
        None => Ok(None),
    }
}

/// Language for the collection-wide commands.
fn resolve_language(cli: &Cli, config: &ProjectConfig) -> Result<Language> {
    Ok(language_override(cli, config)?.unwrap_or(DEFAULT_LANGUAGE))
}

fn remediation_hint(e: &anyhow::Error) -> Option<&'static str> {
    match e.downcast_ref::<ReflectionError>()? {
        ReflectionError::DataUnavailable(_) => Some(
            "ensure the dataset exists: point --db at reflections.db or --data-dir at the \
             per-language JSON documents, or set [data] in reflections.toml",
        ),
        ReflectionError::DataCorrupt(_) => {
            Some("the dataset files are malformed; re-export them from the source database")
        }
        ReflectionError::EmptyDataset { .. } => {
            Some("the dataset loaded but has no entries; check which files are deployed")
        }
        ReflectionError::UnsupportedLanguage(_) => {
            Some("supported languages: en, es, fr, pt-br")
        }
    }
}
