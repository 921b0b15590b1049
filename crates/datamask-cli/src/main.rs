mod atomic;
mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use datamask_core::masked_file_name;
use datamask_engine::output::csv::write_table;
use datamask_engine::source::csv::read_table_csv;
use datamask_engine::{
    Classification, ColumnClassifier, FakerGenerator, GenerationError, MaskingEngine, MaskingError,
    strategy_for,
};
use thiserror::Error;

use atomic::{write_bytes_atomic, write_json_atomic};
use logging::init_logging;
use settings::{MaskSettings, load_settings};

const REPORT_FILE: &str = "mask_report.json";

#[derive(Debug, Error)]
enum CliError {
    #[error("masking error: {0}")]
    Masking(#[from] MaskingError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Parser, Debug)]
#[command(name = "datamask", version, about = "Classify and mask sensitive table columns")]
struct Cli {
    /// Settings file (defaults to ./datamask.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the headers of a CSV file with their detected category.
    Columns(ColumnsArgs),
    /// Classify literal header strings.
    Classify(ClassifyArgs),
    /// Mask the selected columns of a CSV file.
    Mask(MaskArgs),
}

#[derive(Args, Debug)]
struct ColumnsArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Print the classifications as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Fuzzy score a header must exceed for identifier/email keywords.
    #[arg(long)]
    threshold: Option<u8>,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    #[arg(value_name = "HEADER", required = true)]
    headers: Vec<String>,
    /// Print the classifications as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Fuzzy score a header must exceed for identifier/email keywords.
    #[arg(long)]
    threshold: Option<u8>,
}

#[derive(Args, Debug)]
struct MaskArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// Column names to mask, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    columns: Vec<String>,
    /// Output directory for the masked file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Seed for reproducible synthetic values.
    #[arg(long)]
    seed: Option<u64>,
    /// Fuzzy score a header must exceed for identifier/email keywords.
    #[arg(long)]
    threshold: Option<u8>,
    /// Also write mask_report.json next to the masked file.
    #[arg(long, default_value_t = false)]
    report: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    init_logging(cli.log_json || settings.log_json)?;

    match cli.command {
        Command::Columns(args) => run_columns(args, &settings),
        Command::Classify(args) => run_classify(args, &settings),
        Command::Mask(args) => run_mask(args, &settings),
    }
}

fn run_columns(args: ColumnsArgs, settings: &MaskSettings) -> Result<(), CliError> {
    ensure_csv(&args.file)?;
    let table = read_table_csv(&args.file)?;
    let classifier = classifier_for(args.threshold, settings)?;

    let classifications: Vec<Classification> = table
        .column_names()
        .into_iter()
        .map(|header| classifier.explain(header))
        .collect();

    tracing::info!(
        event = "columns_detected",
        file = %args.file.display(),
        columns = classifications.len(),
        rows = table.row_count()
    );
    print_classifications(&classifications, args.json)
}

fn run_classify(args: ClassifyArgs, settings: &MaskSettings) -> Result<(), CliError> {
    let classifier = classifier_for(args.threshold, settings)?;
    let classifications: Vec<Classification> = args
        .headers
        .iter()
        .map(|header| classifier.explain(header))
        .collect();
    print_classifications(&classifications, args.json)
}

fn run_mask(args: MaskArgs, settings: &MaskSettings) -> Result<(), CliError> {
    ensure_csv(&args.file)?;

    let mut options = settings.mask_options();
    if let Some(threshold) = args.threshold {
        options.fuzzy_threshold = checked_threshold(threshold)?;
    }
    let out_dir = args.out_dir.unwrap_or_else(|| settings.out_dir.clone());
    let seed = args.seed.or(settings.seed);

    let today = chrono::Local::now().date_naive();
    let generator = match seed {
        Some(seed) => FakerGenerator::seeded(seed, today),
        None => FakerGenerator::from_entropy(today)?,
    };

    let timer = Instant::now();
    let mut table = read_table_csv(&args.file)?;
    tracing::info!(
        event = "table_loaded",
        file = %args.file.display(),
        rows = table.row_count(),
        columns = table.columns.len()
    );

    let mut engine = MaskingEngine::new(options, Box::new(generator));
    let report = engine.mask_table(&mut table, &args.columns)?;

    let mut buffer = Vec::new();
    let rows = write_table(&mut buffer, &table)?;

    let input_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out_path = out_dir.join(masked_file_name(&input_name));
    write_bytes_atomic(&out_path, &buffer)?;
    tracing::info!(
        event = "masked_file_written",
        path = %out_path.display(),
        rows,
        bytes = buffer.len(),
        run_id = %report.run_id
    );

    if args.report {
        let report_path = out_dir.join(REPORT_FILE);
        write_json_atomic(&report_path, &report)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    for warning in &report.warnings {
        eprintln!("warning: {}", warning.message);
    }
    println!("{}", out_path.display());

    tracing::info!(
        event = "mask_finished",
        run_id = %report.run_id,
        cells_masked = report.cells_masked_total,
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

fn classifier_for(threshold: Option<u8>, settings: &MaskSettings) -> Result<ColumnClassifier, CliError> {
    let threshold = checked_threshold(threshold.unwrap_or(settings.fuzzy_threshold))?;
    Ok(ColumnClassifier::with_threshold(threshold))
}

fn checked_threshold(threshold: u8) -> Result<u8, CliError> {
    if threshold > 100 {
        return Err(CliError::InvalidConfig(format!(
            "threshold must be between 0 and 100, got {threshold}"
        )));
    }
    Ok(threshold)
}

fn ensure_csv(path: &Path) -> Result<(), CliError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("csv") => Ok(()),
        Some("xlsx") | Some("xls") => Err(CliError::UnsupportedFormat(format!(
            "{}: spreadsheets are not supported, export the sheet to CSV first",
            path.display()
        ))),
        _ => Err(CliError::UnsupportedFormat(format!(
            "{}: expected a .csv file",
            path.display()
        ))),
    }
}

fn print_classifications(classifications: &[Classification], json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(classifications)?);
        return Ok(());
    }

    for classification in classifications {
        let strategy = strategy_for(classification.category);
        let keyword = classification.keyword.as_deref().unwrap_or("-");
        let score = classification
            .score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}\t{}\t{}\t{}\t{}",
            classification.header,
            classification.category,
            strategy.id(),
            keyword,
            score
        );
    }
    Ok(())
}
