//! Input plumbing for the command line: encoding and delimiter resolution,
//! CSV reader/writer construction and byte decoding.
//!
//! The `-` path stands for standard input.

use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'")),
        None => Ok(UTF_8),
    }
}

/// An explicit delimiter wins; otherwise `.tsv` files use tabs and everything
/// else commas.
pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Rows may have differing lengths; short rows simply contribute nothing to
/// the missing columns.
pub fn open_csv_reader<R>(reader: R, delimiter: u8, has_headers: bool) -> csv::Reader<R>
where
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true)
        .from_reader(reader)
}

pub fn open_csv_reader_from_path(
    path: &Path,
    delimiter: u8,
    has_headers: bool,
) -> Result<csv::Reader<Box<dyn Read>>> {
    Ok(open_csv_reader(open_input(path)?, delimiter, has_headers))
}

pub fn open_csv_writer(delimiter: u8) -> csv::Writer<Box<dyn Write>> {
    let output: Box<dyn Write> = Box::new(io::stdout().lock());
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .double_quote(true)
        .from_writer(output)
}

/// Every line of a text input, decoded.
pub fn read_lines(path: &Path, encoding: &'static Encoding) -> Result<Vec<String>> {
    let mut bytes = Vec::new();
    BufReader::new(open_input(path)?)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Reading {path:?}"))?;
    let text = decode_bytes(&bytes, encoding)?;
    Ok(text.lines().map(str::to_string).collect())
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader.byte_headers().context("Reading CSV header row")?.clone();
    decode_record(&headers, encoding)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn delimiter_follows_extension_unless_given() {
        assert_eq!(resolve_input_delimiter(&PathBuf::from("a.tsv"), None), b'\t');
        assert_eq!(resolve_input_delimiter(&PathBuf::from("a.TSV"), None), b'\t');
        assert_eq!(resolve_input_delimiter(&PathBuf::from("a.csv"), None), b',');
        assert_eq!(resolve_input_delimiter(&PathBuf::from("a.tsv"), Some(b';')), b';');
    }

    #[test]
    fn encodings_resolve_by_label() {
        assert_eq!(resolve_encoding(None).expect("default"), UTF_8);
        assert_eq!(
            resolve_encoding(Some(" latin1 ")).expect("latin1").name(),
            "windows-1252"
        );
        assert!(resolve_encoding(Some("klingon")).is_err());
    }

    #[test]
    fn decodes_legacy_bytes() {
        let latin1 = resolve_encoding(Some("latin1")).expect("latin1");
        assert_eq!(decode_bytes(b"entr\xe9e", latin1).expect("decode"), "entrée");
        assert!(decode_bytes(b"entr\xe9e", UTF_8).is_err());
    }

    #[test]
    fn read_lines_decodes_the_whole_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"caf\xe9\n\n12\n").expect("write");
        let latin1 = resolve_encoding(Some("latin1")).expect("latin1");
        let lines = read_lines(file.path(), latin1).expect("lines");
        assert_eq!(lines, vec!["café".to_string(), String::new(), "12".to_string()]);
    }
}
