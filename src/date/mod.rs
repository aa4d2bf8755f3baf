//! Date and datetime detection.
//!
//! A date column is described as a sequence of [`DatePart`]s, one per token
//! position (or per two-digit group of a packed block). Each part carries its
//! semantic role and the format text it contributes. [`describe`] validates a
//! finished sequence and turns it into a `date/...` or `datetime/...`
//! description.

mod block;
mod hms;
mod sniffer;
mod ymd;

use std::collections::BTreeMap;

use crate::{
    description::FieldDescription,
    error::{Sniff, SniffError},
};

pub use block::{hms_block, packed_date, packed_datetime, ymd_block};
pub use hms::HmsClassifier;
pub use sniffer::DateSniffer;
pub use ymd::{day_or_month, literal_name_part, numeric_two_digit_part, numeric_variable_width_part};

pub const TIMEZONE_FORMAT: &str = "XXX";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateCode {
    /// First two digits of a four-digit year.
    YearPart1,
    /// Last two digits of a year.
    YearPart2,
    Year,
    Month,
    Day,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Timezone,
    Text,
}

impl DateCode {
    pub fn is_time(self) -> bool {
        matches!(
            self,
            DateCode::Hours | DateCode::Minutes | DateCode::Seconds | DateCode::Milliseconds
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePart {
    pub code: DateCode,
    pub text: String,
    pub locale: Option<&'static str>,
}

impl DatePart {
    pub fn new(code: DateCode, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
            locale: None,
        }
    }

    pub fn with_locale(code: DateCode, text: impl Into<String>, locale: &'static str) -> Self {
        Self {
            code,
            text: text.into(),
            locale: Some(locale),
        }
    }

    /// Literal text copied into the format. `/` is escaped.
    pub fn literal(text: &str) -> Self {
        Self::new(DateCode::Text, text.replace('/', "\\/"))
    }
}

/// Validate a finished part sequence and build its description.
///
/// Two-digit year tails count as years. At least one part must be a real date
/// component, and apart from days no component may appear twice.
pub fn describe(parts: Vec<DatePart>) -> Sniff<FieldDescription> {
    let parts: Vec<DatePart> = parts
        .into_iter()
        .map(|part| match part.code {
            DateCode::YearPart2 => DatePart { code: DateCode::Year, ..part },
            _ => part,
        })
        .collect();

    let mut counts: BTreeMap<DateCode, usize> = BTreeMap::new();
    for part in parts.iter().filter(|p| !matches!(p.code, DateCode::Text | DateCode::Timezone)) {
        *counts.entry(part.code).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return Err(SniffError::unrecognized("only literal text, no date component"));
    }
    if let Some((code, count)) = counts
        .iter()
        .find(|(code, count)| **code != DateCode::Day && **count > 1)
    {
        return Err(SniffError::unrecognized(format!(
            "{code:?} appears {count} times"
        )));
    }

    let locale = parts.iter().find_map(|p| p.locale);
    let format: String = parts.iter().map(|p| p.text.as_str()).collect();
    let description = FieldDescription::date(format, locale);
    if parts.iter().any(|p| p.code.is_time()) {
        Ok(description.with_time())
    } else {
        Ok(description)
    }
}
