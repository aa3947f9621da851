use anyhow::{bail, Context};
use celestial_neo::extract::{load_approaches, load_neos};
use celestial_neo::query::{create_filters, limit, QueryCriteria};
use celestial_neo::write::{write_to_csv, write_to_json};
use celestial_neo::{LinkedApproach, NeoDatabase};
use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neo")]
#[command(about = "Explore near-Earth objects and their close approaches")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the CSV file of near-Earth objects
    #[arg(long, global = true, default_value = "data/neos.csv")]
    neofile: PathBuf,

    /// Path to the JSON file of close approaches
    #[arg(long, global = true, default_value = "data/cad.json")]
    cadfile: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one NEO by designation or name
    Inspect(InspectArgs),
    /// Find close approaches matching the given criteria
    Query(QueryArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["pdes", "name"])))]
struct InspectArgs {
    /// Primary designation, e.g. "433" or "2019 AB"
    #[arg(long)]
    pdes: Option<String>,

    /// IAU name, e.g. "Eros"
    #[arg(long)]
    name: Option<String>,

    /// Also list every close approach of the NEO
    #[arg(long)]
    approaches: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start_date: Option<NaiveDate>,
    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end_date: Option<NaiveDate>,
    /// Minimum approach distance in au
    #[arg(long)]
    min_distance: Option<f64>,
    /// Maximum approach distance in au
    #[arg(long)]
    max_distance: Option<f64>,
    /// Minimum relative velocity in km/s
    #[arg(long)]
    min_velocity: Option<f64>,
    /// Maximum relative velocity in km/s
    #[arg(long)]
    max_velocity: Option<f64>,
    /// Minimum NEO diameter in km
    #[arg(long)]
    min_diameter: Option<f64>,
    /// Maximum NEO diameter in km
    #[arg(long)]
    max_diameter: Option<f64>,
    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    hazardous: bool,
    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    not_hazardous: bool,
    /// Maximum number of results; 0 or negative for no limit
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    limit: i64,
    /// Write results to this .csv or .json file instead of stdout
    #[arg(short, long)]
    outfile: Option<PathBuf>,
}

impl QueryArgs {
    fn criteria(&self) -> QueryCriteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        };
        QueryCriteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }

    fn limit(&self) -> Option<usize> {
        usize::try_from(self.limit).ok()
    }
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            _ => bail!("Output file {:?} must end in .csv or .json", path),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Inspect(args) => {
            let db = load_database(&cli.neofile, &cli.cadfile)?;
            inspect(&db, args);
        }
        Commands::Query(args) => {
            let output = args
                .outfile
                .as_deref()
                .map(|path| OutputFormat::from_path(path).map(|format| (path, format)))
                .transpose()?;
            let db = load_database(&cli.neofile, &cli.cadfile)?;
            query(&db, args, output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_database(neofile: &Path, cadfile: &Path) -> anyhow::Result<NeoDatabase> {
    let neos = load_neos(neofile)
        .with_context(|| format!("Failed to load NEOs from {:?}", neofile))?;
    let approaches = load_approaches(cadfile)
        .with_context(|| format!("Failed to load close approaches from {:?}", cadfile))?;
    Ok(NeoDatabase::new(neos, approaches))
}

fn inspect(db: &NeoDatabase, args: &InspectArgs) {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (None, Some(name)) => db.get_neo_by_name(name),
        (None, None) => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return;
    };

    println!("{}", neo);
    if args.approaches {
        for approach in db.approaches_of(neo) {
            println!("- {}", approach);
        }
    }
}

fn query(
    db: &NeoDatabase,
    args: &QueryArgs,
    output: Option<(&Path, OutputFormat)>,
) -> anyhow::Result<()> {
    let filters = create_filters(&args.criteria());
    let results = limit(db.query(&filters), args.limit());

    match output {
        None => print_results(results),
        Some((path, format)) => {
            let written = write_results(results, path, format)
                .with_context(|| format!("Failed to write results to {:?}", path))?;
            println!("Wrote {} close approaches to {:?}", written, path);
        }
    }
    Ok(())
}

fn print_results<'db>(results: impl Iterator<Item = LinkedApproach<'db>>) {
    let mut shown = 0;
    for approach in results {
        println!("{}", approach);
        shown += 1;
    }
    if shown == 0 {
        println!("No close approaches match the search criteria.");
    }
}

fn write_results<'db>(
    results: impl Iterator<Item = LinkedApproach<'db>>,
    path: &Path,
    format: OutputFormat,
) -> celestial_neo::Result<usize> {
    match format {
        OutputFormat::Csv => write_to_csv(results, path),
        OutputFormat::Json => write_to_json(results, path),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", s, e))
}
