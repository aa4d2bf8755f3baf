pub mod boolean;
pub mod cli;
pub mod config;
pub mod date;
pub mod description;
pub mod detect;
pub mod error;
pub mod frequency;
pub mod io_utils;
pub mod lexer;
pub mod locale;
pub mod number;
pub mod parser;
pub mod tokens;

use std::{env, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser as _;
use log::{LevelFilter, debug, info};

use crate::{
    cli::{Cli, Commands},
    detect::{ColumnDetection, DetectOptions},
};

pub use config::ParserConfig;
pub use description::{FieldDescription, NumberFormat};
pub use parser::Parser;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_columndet", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Detect(args) => handle_detect(&args),
        Commands::Sniff(args) => handle_sniff(&args),
    }
}

fn handle_detect(args: &cli::DetectArgs) -> Result<()> {
    let config = args.parser.resolve()?;
    debug!("Parser settings: {config:?}");
    let parser = Parser::new(config)?;
    let options = DetectOptions {
        delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        has_headers: !args.no_header,
        sample_rows: args.sample_rows,
    };
    info!(
        "Detecting columns of '{}' with delimiter '{}'",
        args.input.display(),
        printable_delimiter(options.delimiter)
    );
    let columns = detect::detect_columns(&args.input, &options, &parser)?;
    if args.json {
        let json = serde_json::to_string_pretty(&columns).context("Serializing detection")?;
        println!("{json}");
        Ok(())
    } else {
        write_detection_csv(&columns)
    }
}

fn write_detection_csv(columns: &[ColumnDetection]) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(b',');
    writer.write_record(["index", "column", "type"])?;
    for column in columns {
        writer.write_record([
            column.index.to_string(),
            column.name.clone(),
            column.description.to_string(),
        ])?;
    }
    writer.flush().context("Writing detection output")
}

fn handle_sniff(args: &cli::SniffArgs) -> Result<()> {
    let config = args.parser.resolve()?;
    let parser = Parser::new(config)?;
    let values = if !args.values.is_empty() {
        args.values.clone()
    } else {
        let path = args.input.as_deref().unwrap_or(Path::new("-"));
        let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
        io_utils::read_lines(path, encoding)
            .with_context(|| format!("Reading values from {path:?}"))?
    };
    debug!("Sniffing {} value(s)", values.len());
    println!("{}", parser.parse(&values));
    Ok(())
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
