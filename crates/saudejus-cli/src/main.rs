mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use saudejus_core::{FilterCriteria, YearRange, cases, normalize_label};
use saudejus_store::{FusionStore, RecordStore, Session, View};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saudejus", version, about = "Health-litigation decisions in Brazilian courts")]
struct Cli {
    /// Case records to load (.json or .parquet). Defaults to the built-in simulated dataset.
    #[arg(long, env = "SAUDEJUS_DATA", global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the year bounds and courts available for filtering
    Options,
    /// Render the dashboard for the given filters
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print chart datasets and records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the filtered records to a .json or .parquet file
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run a SQL query against the `cases` table
    Sql { query: String },
}

#[derive(Args)]
struct FilterArgs {
    /// First decision year (inclusive). Defaults to the earliest year in the data.
    #[arg(long)]
    from: Option<i32>,
    /// Last decision year (inclusive). Defaults to the latest year in the data.
    #[arg(long)]
    to: Option<i32>,
    /// Court to include; repeat or comma-separate. Defaults to all courts.
    #[arg(long = "court", value_delimiter = ',')]
    courts: Vec<String>,
}

impl FilterArgs {
    /// Build criteria, filling unset controls from the store defaults.
    fn criteria(&self, store: &RecordStore) -> anyhow::Result<FilterCriteria> {
        let Some(defaults) = store.default_criteria() else {
            bail!("no case records loaded");
        };
        let year_range = YearRange::new(
            self.from.unwrap_or(defaults.year_range.min),
            self.to.unwrap_or(defaults.year_range.max),
        );
        if self.courts.is_empty() {
            return Ok(FilterCriteria::new(year_range, defaults.courts));
        }
        Ok(FilterCriteria::new(
            year_range,
            self.courts.iter().map(|c| normalize_label(c)),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("saudejus v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let store = load_store(cli.data.as_deref())?;

    match cli.command {
        Command::Options => display::print_options(&store),
        Command::Dashboard { filters, json } => {
            let view = apply(store, &filters)?;
            if json {
                display::print_dashboard_json(&view)?;
            } else {
                display::print_dashboard(&view)?;
            }
        }
        Command::Export { filters, out } => {
            let view = apply(store, &filters)?;
            export(&view, &out)?;
            eprintln!("  Wrote {} records to {}", view.records.len(), out.display());
        }
        Command::Sql { query } => {
            let fusion = FusionStore::new(&store).context("building SQL context")?;
            let batches = fusion.query(&query).await.context("running query")?;
            println!("{}", arrow::util::pretty::pretty_format_batches(&batches)?);
        }
    }
    Ok(())
}

fn load_store(path: Option<&Path>) -> anyhow::Result<RecordStore> {
    match path {
        Some(p) => RecordStore::open(p).with_context(|| format!("loading {}", p.display())),
        None => RecordStore::simulated().context("building simulated dataset"),
    }
}

fn apply(store: RecordStore, filters: &FilterArgs) -> anyhow::Result<View> {
    let criteria = filters.criteria(&store)?;
    let mut session = Session::new(store);
    Ok(session.apply(&criteria)?)
}

fn export(view: &View, out: &Path) -> anyhow::Result<()> {
    let ext = out.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext.to_ascii_lowercase().as_str() {
        "json" => {
            let file = std::fs::File::create(out)
                .with_context(|| format!("creating {}", out.display()))?;
            serde_json::to_writer_pretty(std::io::BufWriter::new(file), &view.records)?;
        }
        "parquet" => {
            let batch = cases::to_record_batch(&view.records)?;
            saudejus_store::write_parquet(out, &batch)?;
        }
        _ => bail!("unsupported export format: {}", out.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("saudejus").chain(args.iter().copied())).unwrap()
    }

    fn filters(cli: Cli) -> FilterArgs {
        match cli.command {
            Command::Dashboard { filters, .. } | Command::Export { filters, .. } => filters,
            _ => panic!("expected a filtering subcommand"),
        }
    }

    #[test]
    fn defaults_select_whole_store() {
        let store = RecordStore::simulated().unwrap();
        let criteria = filters(parse(&["dashboard"])).criteria(&store).unwrap();
        assert_eq!(criteria, store.default_criteria().unwrap());
    }

    #[test]
    fn court_flags_are_normalized() {
        let store = RecordStore::simulated().unwrap();
        let cli = parse(&[
            "dashboard", "--court", " TJSP", "--court", "tjrj,TjMg", "--from", "2020",
        ]);
        let criteria = filters(cli).criteria(&store).unwrap();
        let courts: Vec<&str> = criteria.courts.iter().map(String::as_str).collect();
        assert_eq!(courts, vec!["Tjmg", "Tjrj", "Tjsp"]);
        assert_eq!(criteria.year_range, YearRange::new(2020, 2024));
    }

    #[test]
    fn unknown_court_fails_validation() {
        let store = RecordStore::simulated().unwrap();
        let cli = parse(&["dashboard", "--court", "STF"]);
        assert!(apply(store, &filters(cli)).is_err());
    }

    #[test]
    fn empty_store_has_no_filters() {
        let store = RecordStore::from_raw(Vec::new()).unwrap();
        assert!(filters(parse(&["dashboard"])).criteria(&store).is_err());
    }

    #[test]
    fn export_json_round_trips_through_store() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("cases.json");
        let store = RecordStore::simulated().unwrap();
        let cli = parse(&["export", "--out", "cases.json", "--from", "2023"]);
        let view = apply(store, &filters(cli)).unwrap();
        export(&view, &out).unwrap();

        let reopened = RecordStore::open(&out).unwrap();
        assert_eq!(reopened.records(), view.records.as_slice());
        assert_eq!(reopened.len(), 6);
    }

    #[test]
    fn export_parquet_round_trips_through_store() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("cases.parquet");
        let store = RecordStore::simulated().unwrap();
        let cli = parse(&["export", "--out", "cases.parquet", "--court", "tjrs"]);
        let view = apply(store, &filters(cli)).unwrap();
        export(&view, &out).unwrap();

        let reopened = RecordStore::open(&out).unwrap();
        assert_eq!(reopened.courts(), vec!["Tjrs"]);
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn export_rejects_unknown_format() {
        let store = RecordStore::simulated().unwrap();
        let view = apply(store, &filters(parse(&["dashboard"]))).unwrap();
        assert!(export(&view, Path::new("cases.csv")).is_err());
    }
}
