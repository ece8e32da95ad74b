use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use itinera_core::{
    assign_ids, dedupe_activities, estimate_cost, estimate_cost_for_label, infer_type, require_days,
    sample_itinerary, trip_days, GenerateResponse, ImportResponse, TripDetails,
};
use itinera_ingest::{import_document, parse_itinerary, parse_or_sample};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod output;
mod state;

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "itinera",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ITINERA_BUILD_SHA"), ")"),
    about = "Turn free-text trip plans into structured itineraries"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: $ITINERA_HOME/config.toml or ~/.itinera/config.toml)
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Trip length and destination, shared by the parsing commands.
#[derive(clap::Args, Debug)]
struct TripArgs {
    /// Destination used when a line names no place
    #[arg(long)]
    destination: Option<String>,

    /// Number of trip days; activities beyond it are dropped
    #[arg(long, conflicts_with_all = ["start", "end"])]
    days: Option<u32>,

    /// First day of the trip (YYYY-MM-DD), used with --end
    #[arg(long, requires = "end")]
    start: Option<NaiveDate>,

    /// Last day of the trip (YYYY-MM-DD), used with --start
    #[arg(long, requires = "start")]
    end: Option<NaiveDate>,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output format (default from config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse itinerary text (a model completion or notes) into activities
    Parse {
        /// Text file to parse, or "-" for stdin
        file: PathBuf,

        #[command(flatten)]
        trip: TripArgs,

        #[command(flatten)]
        out: OutputArgs,

        /// Drop repeated activities (same day and title)
        #[arg(long)]
        dedupe: bool,

        /// Return an empty itinerary instead of the sample when nothing parses
        #[arg(long)]
        no_sample: bool,

        /// Print the generate-endpoint body ({success, itinerary, tripDetails}) instead
        #[arg(long)]
        envelope: bool,
    },

    /// Import a Google Docs JSON export (or a plain text file) and parse it
    ImportDoc {
        /// Google Docs `documents.get` JSON, or a .txt/.md file
        #[arg(long)]
        file: PathBuf,

        #[command(flatten)]
        trip: TripArgs,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Deterministic cost estimate for a seed and activity type
    Estimate {
        /// Seed (activity id); defaults to the title length when --title is given
        #[arg(long)]
        seed: Option<u64>,

        /// Activity type label (accommodation, restaurant, transport, shopping, activity)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Infer type and seed from a title
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the placeholder itinerary used when parsing yields nothing
    Sample {
        #[arg(long)]
        destination: Option<String>,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let cfg = config::load_config(cli.config_file.as_deref())?;

    match cli.command {
        Command::Parse {
            file,
            trip,
            out,
            dedupe,
            no_sample,
            envelope,
        } => {
            let text = read_input(&file)?;
            let destination = resolve_destination(&trip, &cfg);
            let days = resolve_days(&trip, &cfg)?;

            if envelope {
                let details = TripDetails {
                    destination,
                    start_date: trip.start,
                    end_date: trip.end,
                    total_days: days,
                    travelers: None,
                };
                let body = GenerateResponse::new(text, details);
                println!("{}", output::to_json(&body, pretty(&out, &cfg))?);
                return Ok(());
            }

            let mut result = if no_sample || !cfg.defaults.sample_fallback {
                parse_itinerary(&text, &destination, days)
            } else {
                parse_or_sample(&text, &destination, days)
            };
            if dedupe {
                let before = result.activities.len();
                result.activities = dedupe_activities(result.activities);
                debug!(removed = before - result.activities.len(), "deduplicated activities");
            }
            assign_ids(&mut result.activities, 1);
            info!(activities = result.activities.len(), days, "parsed {}", file.display());

            let format = out.format.unwrap_or(cfg.output.format);
            print!("{}", ensure_newline(output::render(&result, format, pretty(&out, &cfg))?));
        }

        Command::ImportDoc { file, trip, compact } => {
            let raw = std::fs::read_to_string(&file).with_context(|| format!("read {}", file.display()))?;
            let destination = resolve_destination(&trip, &cfg);
            let days = resolve_days(&trip, &cfg)?;

            let mut resp = if is_json(&file) {
                import_document(&raw, &destination, days)
                    .with_context(|| format!("importing {}", file.display()))?
            } else {
                let title = file
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let itinerary = parse_itinerary(&raw, &destination, days);
                ImportResponse::new(title, raw, itinerary)
            };
            assign_ids(&mut resp.itinerary.activities, 1);
            info!(
                title = %resp.document_title,
                activities = resp.itinerary.activities.len(),
                "imported document"
            );

            println!("{}", output::to_json(&resp, !compact && cfg.output.pretty)?);
        }

        Command::Estimate { seed, kind, title } => {
            let cost = match (seed, kind, title) {
                (seed, Some(kind), title) => {
                    let seed = seed
                        .or_else(|| title.map(|t| t.chars().count() as u64))
                        .context("pass --seed or --title")?;
                    estimate_cost_for_label(seed, &kind)
                }
                (seed, None, Some(title)) => {
                    let seed = seed.unwrap_or(title.chars().count() as u64);
                    estimate_cost(seed, infer_type(&title))
                }
                (_, None, None) => bail!("pass --type or --title"),
            };
            println!("{:.2}", cost);
        }

        Command::Sample { destination, out } => {
            let destination = destination.unwrap_or_else(|| cfg.defaults.destination.clone());
            let mut result = sample_itinerary(&destination);
            assign_ids(&mut result.activities, 1);
            let format = out.format.unwrap_or(cfg.output.format);
            print!("{}", ensure_newline(output::render(&result, format, pretty(&out, &cfg))?));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let (path, written) = config::init_config(cli.config_file.as_deref())?;
                if written {
                    println!("Wrote {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s).context("read stdin")?;
        return Ok(s);
    }
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    std::fs::read_to_string(file).with_context(|| format!("read {}", file.display()))
}

fn resolve_destination(trip: &TripArgs, cfg: &Config) -> String {
    trip.destination
        .clone()
        .unwrap_or_else(|| cfg.defaults.destination.clone())
}

/// `--days`, else the `--start/--end` span, else the configured default.
fn resolve_days(trip: &TripArgs, cfg: &Config) -> Result<u32> {
    let days = match (trip.days, trip.start, trip.end) {
        (Some(d), _, _) => d,
        (None, Some(start), Some(end)) => trip_days(start, end)?,
        _ => cfg.defaults.days,
    };
    Ok(require_days(days)?)
}

fn pretty(out: &OutputArgs, cfg: &Config) -> bool {
    !out.compact && cfg.output.pretty
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn ensure_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(days: Option<u32>, start: Option<&str>, end: Option<&str>) -> TripArgs {
        TripArgs {
            destination: None,
            days,
            start: start.map(|s| s.parse().unwrap()),
            end: end.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn test_resolve_days_precedence() {
        let cfg = Config::default();
        assert_eq!(resolve_days(&trip(Some(5), None, None), &cfg).unwrap(), 5);
        assert_eq!(
            resolve_days(&trip(None, Some("2026-07-01"), Some("2026-07-03")), &cfg).unwrap(),
            3
        );
        assert_eq!(resolve_days(&trip(None, None, None), &cfg).unwrap(), cfg.defaults.days);
    }

    #[test]
    fn test_resolve_days_rejects_bad_input() {
        let cfg = Config::default();
        assert!(resolve_days(&trip(Some(0), None, None), &cfg).is_err());
        assert!(resolve_days(&trip(None, Some("2026-07-03"), Some("2026-07-01")), &cfg).is_err());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "itinera", "parse", "plan.md", "--destination", "Rome", "--days", "2", "--format", "csv",
        ])
        .unwrap();
        match cli.command {
            Command::Parse { trip, out, .. } => {
                assert_eq!(trip.destination.as_deref(), Some("Rome"));
                assert_eq!(trip.days, Some(2));
                assert_eq!(out.format, Some(OutputFormat::Csv));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_days_conflicts_with_dates() {
        let res = Cli::try_parse_from([
            "itinera", "parse", "plan.md", "--days", "2", "--start", "2026-07-01", "--end", "2026-07-02",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(Path::new("doc.JSON")));
        assert!(!is_json(Path::new("notes.txt")));
    }
}
