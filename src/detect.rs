//! Classify every column of a delimited file from a sample of its rows.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};
use serde::Serialize;

use crate::{
    description::FieldDescription,
    io_utils::{self, DEFAULT_CSV_DELIMITER},
    parser::Parser,
};

pub const DEFAULT_SAMPLE_ROWS: usize = 1000;

#[derive(Debug, Clone)]
pub struct DetectOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub has_headers: bool,
    /// Data rows to read; 0 reads everything.
    pub sample_rows: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
            has_headers: true,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDetection {
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub description: FieldDescription,
}

fn generate_field_names(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("field_{idx}")).collect()
}

pub fn detect_columns(
    path: &Path,
    options: &DetectOptions,
    parser: &Parser,
) -> Result<Vec<ColumnDetection>> {
    let reader = io_utils::open_csv_reader_from_path(path, options.delimiter, options.has_headers)?;
    detect_from_reader(reader, options, parser)
        .with_context(|| format!("Detecting column types of {path:?}"))
}

pub fn detect_from_reader<R: Read>(
    mut reader: csv::Reader<R>,
    options: &DetectOptions,
    parser: &Parser,
) -> Result<Vec<ColumnDetection>> {
    let headers = if options.has_headers {
        Some(io_utils::reader_headers(&mut reader, options.encoding)?)
    } else {
        None
    };

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.as_ref().map_or(0, Vec::len)];
    let mut record = csv::ByteRecord::new();
    let mut processed = 0usize;
    while options.sample_rows == 0 || processed < options.sample_rows {
        if !reader
            .read_byte_record(&mut record)
            .with_context(|| format!("Reading data row {}", processed + 1))?
        {
            break;
        }
        let fields = io_utils::decode_record(&record, options.encoding)
            .with_context(|| format!("Decoding data row {}", processed + 1))?;
        if fields.len() > columns.len() {
            columns.resize_with(fields.len(), Vec::new);
        }
        for (column, field) in columns.iter_mut().zip(fields) {
            column.push(field);
        }
        processed += 1;
    }
    debug!("Sampled {processed} row(s) across {} column(s)", columns.len());

    let mut names = headers.unwrap_or_default();
    if names.len() < columns.len() {
        let generated = generate_field_names(columns.len());
        names.extend(generated.into_iter().skip(names.len()));
    }

    Ok(columns
        .iter()
        .zip(names)
        .enumerate()
        .map(|(index, (values, name))| {
            let description = parser.parse(values);
            info!("Column '{name}' detected as {description}");
            ColumnDetection {
                index,
                name,
                description,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(data: &str, options: &DetectOptions) -> Vec<(String, String)> {
        let reader = io_utils::open_csv_reader(data.as_bytes(), options.delimiter, options.has_headers);
        detect_from_reader(reader, options, &Parser::default())
            .expect("detect")
            .into_iter()
            .map(|c| (c.name, c.description.to_string()))
            .collect()
    }

    #[test]
    fn classifies_each_column_independently() {
        let data = "id,active,amount\n1,true,\"1,234.50\"\n2,false,\"12,345\"\n3,true,\"1,234\"\n";
        assert_eq!(
            detect(data, &DetectOptions::default()),
            vec![
                ("id".to_string(), "integer".to_string()),
                ("active".to_string(), "boolean/true/false".to_string()),
                ("amount".to_string(), "float/,/.".to_string()),
            ]
        );
    }

    #[test]
    fn headerless_input_gets_generated_names() {
        let options = DetectOptions {
            has_headers: false,
            delimiter: b';',
            ..DetectOptions::default()
        };
        let detected = detect("0;x\n1;y\n1;z\n", &options);
        assert_eq!(detected[0], ("field_0".to_string(), "boolean/1/0".to_string()));
        assert_eq!(detected[1], ("field_1".to_string(), "text".to_string()));
    }

    #[test]
    fn sample_rows_limits_the_read() {
        let options = DetectOptions {
            sample_rows: 2,
            ..DetectOptions::default()
        };
        let detected = detect("flag\n0\n1\nnot a flag\n", &options);
        assert_eq!(detected[0].1, "boolean/1/0");
    }
}
