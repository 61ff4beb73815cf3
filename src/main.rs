use analytics::{DashboardEngine, DateRange, FilterState, room_types};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::HotelRecord;
use elasticity::{CurvePoint, ElasticityInput, ElasticityResult};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod render;

/// The main entry point for the hotel pricing insights tool.
fn main() -> ExitCode {
    // Optional .env file with HOTEL__* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Every failure ends up here as one message.
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// The whole error chain on a single line.
fn error_message(error: &anyhow::Error) -> String {
    format!("Error: {error:#}")
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => configuration::load_config_from(path),
        None => configuration::load_config(),
    }
    .context("Failed to load configuration")?;

    let _log_guard = configuration::init_tracing(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded");

    dispatch(cli.command, &config)
}

fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Report(args) => handle_report(args, config),
        Commands::RoomTypes(args) => handle_room_types(args, config),
        Commands::Elasticity(args) => handle_elasticity(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Competitive hotel price analysis: filter a pricing/occupancy export,
/// summarise it, and estimate price elasticity of demand.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of ./config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard report for a date range and set of room types.
    Report(ReportArgs),
    /// List the room types available within a date range.
    RoomTypes(DatasetArgs),
    /// Compute price elasticity of demand from two price/quantity observations.
    Elasticity(ElasticityArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// The CSV file to analyse (defaults to the configured example dataset).
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// First day of the date range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the date range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Room type to include; repeat for several. Defaults to every type in the range.
    #[arg(long = "room-type", value_name = "ROOM_TYPE")]
    room_types: Vec<String>,

    /// Select no room types at all; the report is then built over an empty subset.
    #[arg(long, conflicts_with = "room_types")]
    no_room_types: bool,

    /// Output format (defaults to the configured one).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Args)]
struct ElasticityArgs {
    #[arg(long)]
    initial_price: f64,

    #[arg(long)]
    new_price: f64,

    #[arg(long)]
    initial_quantity: f64,

    #[arg(long)]
    new_quantity: f64,

    /// Number of points on the demand curve (defaults to the configured value).
    #[arg(long)]
    samples: Option<usize>,

    /// Output format (defaults to the configured one).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let records = load(&args.dataset, config)?;
    let range = resolve_range(&args.dataset, &records)?;

    let filter = if args.no_room_types {
        FilterState::new(range, Vec::<String>::new())
    } else if args.room_types.is_empty() {
        FilterState::all_room_types(range, &records)
    } else {
        let known = room_types(&records);
        for requested in &args.room_types {
            if !known.contains(requested) {
                tracing::warn!(room_type = %requested, "Room type does not occur in the dataset");
            }
        }
        FilterState::new(range, args.room_types)
    };

    let engine = DashboardEngine::new(config.data.preview_rows, config.report.histogram_bins);
    let report = engine
        .build(&records, &filter)
        .context("Failed to compute the dashboard report")?;

    match args.format.unwrap_or(config.report.format) {
        OutputFormat::Table => render::print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn handle_room_types(args: DatasetArgs, config: &Config) -> Result<()> {
    let records = load(&args, config)?;
    let range = resolve_range(&args, &records)?;
    let in_range = records
        .iter()
        .filter(|r| r.date.is_some_and(|d| range.contains(d)));

    render::print_room_types(&room_types(in_range));
    Ok(())
}

/// JSON shape of the `elasticity` command.
#[derive(Serialize)]
struct ElasticityOutput<'a> {
    #[serde(flatten)]
    result: &'a ElasticityResult,
    interpretation: &'static str,
    observations: [CurvePoint; 2],
    demand_curve: &'a [CurvePoint],
}

fn handle_elasticity(args: ElasticityArgs, config: &Config) -> Result<()> {
    let input = ElasticityInput::new(
        args.initial_price,
        args.new_price,
        args.initial_quantity,
        args.new_quantity,
    )?;
    let result = input
        .compute_with_tolerance(config.elasticity.unit_tolerance)
        .context("Price elasticity is undefined for these observations")?;
    let samples = args.samples.unwrap_or(config.elasticity.curve_samples);
    let curve = result.demand_curve(samples);

    match args.format.unwrap_or(config.report.format) {
        OutputFormat::Table => render::print_elasticity(&result, &curve),
        OutputFormat::Json => {
            let output = ElasticityOutput {
                result: &result,
                interpretation: result.classification.interpretation(),
                observations: result.observations(),
                demand_curve: &curve,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

// ==============================================================================
// Helpers
// ==============================================================================

fn load(args: &DatasetArgs, config: &Config) -> Result<Vec<HotelRecord>> {
    let path: &Path = args.file.as_deref().unwrap_or(&config.data.path);
    dataset::load_records_from_path(path)
        .with_context(|| format!("Error reading file {}", path.display()))
}

/// The requested range, with missing bounds taken from the dataset's own span.
fn resolve_range(args: &DatasetArgs, records: &[HotelRecord]) -> Result<DateRange> {
    let span = DateRange::span(records);
    let start = args
        .from
        .or(span.map(|s| s.start()))
        .ok_or_else(|| anyhow!("The dataset has no readable dates; pass --from and --to"))?;
    let end = args
        .to
        .or(span.map(|s| s.end()))
        .ok_or_else(|| anyhow!("The dataset has no readable dates; pass --from and --to"))?;
    Ok(DateRange::new(start, end)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Date,Room_Type,Price,Competitor_Price,Quantity_Sold,Occupancy_Rate,Day_of_Week,Lead_Time,Promotion,Event_Nearby";

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_accepts_repeated_room_types() {
        let cli = Cli::try_parse_from([
            "hotel-insights",
            "report",
            "--from",
            "2024-01-01",
            "--room-type",
            "Deluxe",
            "--room-type",
            "Suite",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Report(args) => {
                assert_eq!(args.room_types, vec!["Deluxe", "Suite"]);
                assert_eq!(args.dataset.from, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(args.dataset.to, None);
                assert_eq!(args.format, Some(OutputFormat::Json));
            }
            _ => panic!("expected the report command"),
        }
    }

    #[test]
    fn report_can_select_no_room_types() {
        let cli = Cli::try_parse_from(["hotel-insights", "report", "--no-room-types"]).unwrap();
        match cli.command {
            Commands::Report(args) => {
                assert!(args.no_room_types);
                assert!(args.room_types.is_empty());
            }
            _ => panic!("expected the report command"),
        }

        let conflicting = Cli::try_parse_from([
            "hotel-insights",
            "report",
            "--no-room-types",
            "--room-type",
            "Suite",
        ]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn empty_room_type_selection_builds_a_report() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{HEADER}\n2024-03-02,Deluxe,100,90,1,50%,Saturday,3,None,None\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from([
            "hotel-insights",
            "report",
            "--file",
            path,
            "--no-room-types",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(dispatch(cli.command, &Config::default()).is_ok());
    }

    #[test]
    fn malformed_csv_fails_with_one_line_message() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "{HEADER}\n2024-03-02,Deluxe,100,90,1,50%,Saturday,3,None,None\n\
             2024-03-03,Deluxe,cheap,90,1,50%,Sunday,3,None,None\n"
        )
        .unwrap();
        let path = file.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["hotel-insights", "report", "--file", path]).unwrap();

        let err = dispatch(cli.command, &Config::default()).unwrap_err();
        let message = error_message(&err);
        assert!(message.starts_with("Error: Error reading file"));
        assert!(message.contains("Malformed row at line 3"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn missing_file_fails_with_one_line_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");

        let mut config = Config::default();
        config.data.path = path;
        let cli = Cli::try_parse_from(["hotel-insights", "room-types"]).unwrap();
        let message = error_message(&dispatch(cli.command, &config).unwrap_err());
        assert!(message.contains("absent.csv"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn equal_prices_fail_the_elasticity_command() {
        let cli = Cli::try_parse_from([
            "hotel-insights",
            "elasticity",
            "--initial-price",
            "100",
            "--new-price",
            "100",
            "--initial-quantity",
            "50",
            "--new-quantity",
            "40",
        ])
        .unwrap();

        let message = error_message(&dispatch(cli.command, &Config::default()).unwrap_err());
        assert!(message.contains("Price elasticity is undefined"));
        assert!(message.contains("Division by zero"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn missing_bounds_default_to_dataset_span() {
        let csv = "Date,Room_Type,Price,Competitor_Price,Quantity_Sold,Occupancy_Rate,Day_of_Week,Lead_Time,Promotion,Event_Nearby\n\
                   2024-03-02,Deluxe,100,90,1,50%,Saturday,3,None,None\n\
                   2024-03-09,Deluxe,100,90,1,50%,Saturday,3,None,None\n";
        let records = dataset::load_records(csv.as_bytes()).unwrap();
        let args = DatasetArgs {
            file: None,
            from: NaiveDate::from_ymd_opt(2024, 3, 5),
            to: None,
        };

        let range = resolve_range(&args, &records).unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn inverted_range_is_an_error() {
        let args = DatasetArgs {
            file: None,
            from: NaiveDate::from_ymd_opt(2024, 3, 9),
            to: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert!(resolve_range(&args, &[]).is_err());
    }

    #[test]
    fn elasticity_json_includes_curve_and_interpretation() {
        let result = ElasticityInput::new(100.0, 120.0, 50.0, 40.0)
            .unwrap()
            .compute()
            .unwrap();
        let curve = result.demand_curve(3);
        let output = ElasticityOutput {
            result: &result,
            interpretation: result.classification.interpretation(),
            observations: result.observations(),
            demand_curve: &curve,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["elasticity"], -1.0);
        assert_eq!(json["classification"], "unit_elastic");
        assert_eq!(json["demand_curve"].as_array().unwrap().len(), 3);
    }
}
