use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::{config::ParserConfig, detect::DEFAULT_SAMPLE_ROWS};

#[derive(Debug, Parser)]
#[command(author, version, about = "Detect column types and formats of delimited text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect the type and format of every column of a CSV file
    Detect(DetectArgs),
    /// Detect the type and format of a single column of values
    Sniff(SniffArgs),
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// Input CSV file to inspect (`-` reads standard input)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Number of data rows to sample (0 means full scan)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub sample_rows: usize,
    /// Treat the first row as data and name columns field_0, field_1, ...
    #[arg(long = "no-header")]
    pub no_header: bool,
    /// Print the result as a JSON array instead of CSV
    #[arg(long)]
    pub json: bool,
    #[command(flatten)]
    pub parser: ParserArgs,
}

#[derive(Debug, Args)]
pub struct SniffArgs {
    /// Values of the column; one per line from standard input when omitted
    pub values: Vec<String>,
    /// Read the values, one per line, from this file instead
    #[arg(short = 'i', long = "input", conflicts_with = "values")]
    pub input: Option<PathBuf>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    #[command(flatten)]
    pub parser: ParserArgs,
}

#[derive(Debug, Args, Clone, Default)]
pub struct ParserArgs {
    /// YAML file with parser settings; flags below override it
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Share of values that must agree before a decision is taken, in (0, 1]
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Read a lone '.' as a thousands separator rather than a decimal point
    #[arg(long = "prefer-comma-decimal")]
    pub prefer_comma_decimal: bool,
    /// Keep guessing a numeric layout even when many values do not fit it
    #[arg(long = "lenient-numeric")]
    pub lenient_numeric: bool,
    /// Classify zero-padded numbers as integers instead of text
    #[arg(long = "leading-zero-integers")]
    pub leading_zero_integers: bool,
}

impl ParserArgs {
    /// The configuration file (or the defaults) with the flags applied.
    pub fn resolve(&self) -> Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => ParserConfig::load(path)?,
            None => ParserConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.prefer_comma_decimal {
            config.prefer_dot_as_decimal_separator = false;
        }
        if self.lenient_numeric {
            config.strict_numeric_errors = false;
        }
        if self.leading_zero_integers {
            config.leading_zero_as_text = false;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
