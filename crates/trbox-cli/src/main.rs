mod demo;
mod logging;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use trbox_core::{Model, PrettyPrintOptions, Solution};
use trbox_fixtures::{
    ExpectedResults, FixtureConfig, TestModel, model_by_name, registered_models,
    solution_from_results,
};
use trbox_trust::{PartitionConfig, TrustRegionInterface};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "trbox fixture checks and trust-region partitioning"
)]
struct Cli {
    /// Log filter (e.g. `debug`, `trbox_trust=debug`); overrides TRBOX_TRACE
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered test models
    List(ListArgs),
    /// Generate a test model and print it
    Show(ShowArgs),
    /// Import a solution file into a model and validate it against expected results
    Check(CheckArgs),
    /// Partition the reference black-box model and print the result
    PartitionDemo(DemoArgs),
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Test model description, e.g. LP_unique_duals
    name: String,

    /// Print every constraint instead of a preview
    #[arg(long)]
    full: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Test model description, e.g. LP_unique_duals
    name: String,

    /// JSON solution file to import
    #[arg(long)]
    solution: PathBuf,

    /// Layout of the solution file
    #[arg(long, value_enum, default_value = "solution")]
    input: SolutionInput,

    /// Absolute tolerance for each compared value
    #[arg(long)]
    tolerance: Option<f64>,

    /// Directory holding expected results; overrides TRBOX_RESULTS_DIR
    #[arg(long)]
    results_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Pass `x0 - x1` to a one-argument black box instead of `x0, x1`
    #[arg(long)]
    compound: bool,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// How `check --solution` files are laid out.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum SolutionInput {
    /// A serialized `Solution` keyed by component id
    Solution,
    /// Values and suffix values keyed by component name
    Results,
}

#[derive(Debug, Serialize)]
struct ModelRow {
    name: &'static str,
    capabilities: Vec<&'static str>,
    results_file: String,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;
    match cli.command {
        Command::List(args) => list_command(args),
        Command::Show(args) => show_command(args),
        Command::Check(args) => check_command(args),
        Command::PartitionDemo(args) => demo_command(args),
    }
}

fn list_command(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rows = model_rows();
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            println!("{:<24} {:<24} {}", "model", "capabilities", "results");
            for row in &rows {
                println!(
                    "{:<24} {:<24} {}",
                    row.name,
                    row.capabilities.join(","),
                    row.results_file
                );
            }
        }
    }
    Ok(())
}

fn model_rows() -> Vec<ModelRow> {
    registered_models()
        .iter()
        .map(|fixture| ModelRow {
            name: fixture.description(),
            capabilities: fixture.capabilities().into_iter().collect(),
            results_file: fixture.results_file(),
        })
        .collect()
}

fn show_command(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut fixture = model_by_name(&args.name)?;
    let model = fixture.generate_model()?;
    let options = if args.full {
        PrettyPrintOptions::full()
    } else {
        PrettyPrintOptions::preview()
    };
    println!("{}", model.format_ascii(options));
    Ok(())
}

fn check_command(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FixtureConfig::new();
    if let Some(dir) = args.results_dir {
        config = config.with_results_dir(dir);
    }
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }

    let mut fixture = model_by_name(&args.name)?;
    fixture.generate_model()?;
    let expected = fixture.expected_results(&config)?;

    let model = fixture
        .model_mut()
        .ok_or_else(|| format!("model '{}' was not generated", args.name))?;
    let solution = load_submitted(model, &args.solution, args.input)?;
    model.load_solution(&solution)?;

    fixture.validate_current_solution(&expected, config.tolerance())?;
    println!(
        "{}: {} matches expected results ({} entries, tolerance {})",
        args.name,
        args.solution.display(),
        expected.len(),
        config.tolerance()
    );
    Ok(())
}

fn load_submitted(
    model: &Model,
    path: &Path,
    input: SolutionInput,
) -> Result<Solution, Box<dyn std::error::Error>> {
    match input {
        SolutionInput::Solution => {
            let text = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            let solution = serde_json::from_str(&text)
                .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
            Ok(solution)
        }
        SolutionInput::Results => {
            let submitted = ExpectedResults::load(path)?;
            Ok(solution_from_results(model, &submitted)?)
        }
    }
}

fn demo_command(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (model, bb) = demo::build_model(args.compound)?;
    let interface = TrustRegionInterface::new(model, &[bb], PartitionConfig::new())?;
    let report = demo::PartitionReport::new(&interface);
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            println!("lx = {}  ly = {}  lz = {}", report.lx, report.ly, report.lz);
            println!("x: {}", report.inputs.join(", "));
            println!("y: {}", report.outputs.join(", "));
            println!("z: {}", report.states.join(", "));
            println!();
            println!("{}", interface.model().format_ascii(PrettyPrintOptions::full()));
            println!();
            println!("conset");
            for line in &report.conset {
                println!(" {line}");
            }
            if !report.input_links.is_empty() {
                println!("input links");
                for line in &report.input_links {
                    println!(" {line}");
                }
            }
        }
    }
    Ok(())
}
