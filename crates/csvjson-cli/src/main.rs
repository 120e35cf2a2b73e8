//! Command-line interface for csvjson.
//!
//! This binary is a thin façade over [`csvjson_core`]: it parses arguments with
//! [`clap`], configures [`tracing`] based logging on standard error, opens the
//! input and output, and reports conversion errors with a recovery hint.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_log::LogTracer;
use tracing_subscriber::FmtSubscriber;

use csvjson_core::error::{ConfigError, IoErrorExt};
use csvjson_core::{ConvertOptions, CsvJsonError, ReaderOptions, convert};

#[derive(Parser, Debug)]
#[command(
    name = "csvjson",
    version,
    about = "Convert a CSV file into JSON or GeoJSON",
    long_about = "Convert a CSV file into a JSON array of objects, an object keyed by one column,\n\
                  or a GeoJSON FeatureCollection of points built from latitude/longitude columns."
)]
/// Command-line arguments and options for `csvjson`.
struct Cli {
    /// The CSV file to operate on. Reads standard input when omitted or "-".
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write JSON to this file instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output an object keyed by this column instead of an array. Values must be unique.
    #[arg(short, long, value_name = "COLUMN")]
    key: Option<String>,

    /// Indent the output JSON this many spaces. 0 means compact output.
    #[arg(short, long, value_name = "N")]
    indent: Option<usize>,

    /// Column holding latitudes. Together with --lon, outputs GeoJSON.
    #[arg(long, value_name = "COLUMN", requires = "lon")]
    lat: Option<String>,

    /// Column holding longitudes. Together with --lat, outputs GeoJSON.
    #[arg(long, value_name = "COLUMN", requires = "lat")]
    lon: Option<String>,

    /// Delimiting character of the input CSV file.
    #[arg(short, long, value_name = "CHAR", conflicts_with = "tabs")]
    delimiter: Option<char>,

    /// Specify that the input CSV file is delimited with tabs.
    #[arg(short, long)]
    tabs: bool,

    /// Character used to quote strings in the input CSV file.
    #[arg(short, long, value_name = "CHAR")]
    quotechar: Option<char>,

    /// Specify that the input CSV file has no header row. Columns are named column1, column2, ...
    #[arg(short = 'H', long)]
    no_header_row: bool,

    /// Ignore whitespace around fields.
    #[arg(short = 'S', long)]
    skipinitialspace: bool,

    /// Enable verbose (INFO level) logging output.
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug (DEBUG level) logging output with detailed diagnostics.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn reader_options(&self) -> Result<ReaderOptions, CsvJsonError> {
        let mut options = ReaderOptions::new()
            .with_header(!self.no_header_row)
            .with_trim(self.skipinitialspace);

        if self.tabs {
            options = options.with_delimiter(b'\t');
        } else if let Some(delimiter) = self.delimiter {
            options = options.with_delimiter(ascii_byte("delimiter", delimiter)?);
        }
        if let Some(quote) = self.quotechar {
            options = options.with_quote(ascii_byte("quotechar", quote)?);
        }
        Ok(options)
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            key_column: self.key.clone(),
            indent: self.indent,
            lat_column: self.lat.clone(),
            lon_column: self.lon.clone(),
        }
    }

    fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }
}

fn ascii_byte(option: &str, value: char) -> Result<u8, CsvJsonError> {
    u8::try_from(value)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            ConfigError::InvalidOption {
                option: option.to_string(),
                message: format!("'{value}' is not a single ASCII character"),
            }
            .into()
        })
}

/// Entry point for the `csvjson` command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_level()) {
        eprintln!("Failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        },
    }
}

fn init_logging(level: Level) -> Result<()> {
    // Bridge logs from the `log` crate to the `tracing` ecosystem.
    LogTracer::init()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let reader_options = cli.reader_options()?;
    let options = cli.convert_options();
    debug!("Reader options: {reader_options:?}");
    debug!("Convert options: {options:?}");

    let input = open_input(cli.input.as_ref())?;

    // The output is opened only after the whole document has converted.
    let mut buffer = Vec::new();
    convert(input, &mut buffer, &reader_options, &options)?;

    match &cli.output {
        Some(path) => {
            info!("Writing {} byte(s) to {}", buffer.len(), path.display());
            let mut file = File::create(path).with_write_context("JSON", path)?;
            file.write_all(&buffer).with_write_context("JSON", path)?;
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&buffer).with_write_context("JSON", "-")?;
            stdout.flush().with_write_context("JSON", "-")?;
        },
    }
    Ok(())
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn Read>, CsvJsonError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            info!("Reading {}", path.display());
            let file = File::open(path).with_read_context("CSV", path)?;
            Ok(Box::new(BufReader::new(file)))
        },
        _ => {
            info!("Reading standard input");
            Ok(Box::new(io::stdin().lock()))
        },
    }
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<CsvJsonError>() {
        Some(err) => {
            eprintln!("{}", err.user_message());
            if let Some(suggestion) = err.recovery_suggestion() {
                eprintln!("Hint: {suggestion}");
            }
        },
        None => eprintln!("Error: {err:#}"),
    }
}
