//! Detected column descriptions and their canonical slash-delimited labels.
//!
//! Labels look like `integer/,`, `float//.`, `date/dd\/MM\/yyyy/fr_FR` or
//! `currency/pre/$/float/,/.`. A literal `/` inside a date format is written
//! `\/` and is not a segment boundary. Absent optional values render as an
//! empty segment.

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Integer {
        thousands_separator: Option<String>,
    },
    Float {
        thousands_separator: Option<String>,
        decimal_separator: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldDescription {
    Boolean {
        true_word: String,
        false_word: String,
    },
    Integer {
        thousands_separator: Option<String>,
    },
    Float {
        thousands_separator: Option<String>,
        decimal_separator: String,
    },
    Date {
        format: String,
        locale: Option<String>,
    },
    Datetime {
        format: String,
        locale: Option<String>,
    },
    Currency {
        prefixed: bool,
        symbol: Option<String>,
        number: NumberFormat,
    },
    Percentage {
        prefixed: bool,
        sign: Option<String>,
        number: NumberFormat,
    },
    Text,
}

impl NumberFormat {
    pub fn integer(thousands_separator: Option<&str>) -> Self {
        NumberFormat::Integer {
            thousands_separator: thousands_separator.map(str::to_string),
        }
    }

    pub fn float(thousands_separator: Option<&str>, decimal_separator: &str) -> Self {
        NumberFormat::Float {
            thousands_separator: thousands_separator.map(str::to_string),
            decimal_separator: decimal_separator.to_string(),
        }
    }
}

impl From<NumberFormat> for FieldDescription {
    fn from(number: NumberFormat) -> Self {
        match number {
            NumberFormat::Integer {
                thousands_separator,
            } => FieldDescription::Integer {
                thousands_separator,
            },
            NumberFormat::Float {
                thousands_separator,
                decimal_separator,
            } => FieldDescription::Float {
                thousands_separator,
                decimal_separator,
            },
        }
    }
}

impl FieldDescription {
    pub fn boolean(true_word: &str, false_word: &str) -> Self {
        FieldDescription::Boolean {
            true_word: true_word.to_string(),
            false_word: false_word.to_string(),
        }
    }

    pub fn date(format: impl Into<String>, locale: Option<&str>) -> Self {
        FieldDescription::Date {
            format: format.into(),
            locale: locale.map(str::to_string),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldDescription::Text)
    }

    /// Leading label segment.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldDescription::Boolean { .. } => "boolean",
            FieldDescription::Integer { .. } => "integer",
            FieldDescription::Float { .. } => "float",
            FieldDescription::Date { .. } => "date",
            FieldDescription::Datetime { .. } => "datetime",
            FieldDescription::Currency { .. } => "currency",
            FieldDescription::Percentage { .. } => "percentage",
            FieldDescription::Text => "text",
        }
    }

    /// Promote a date to a datetime with the same format and locale. Other
    /// descriptions are returned unchanged.
    pub fn with_time(self) -> Self {
        match self {
            FieldDescription::Date { format, locale } => FieldDescription::Datetime { format, locale },
            other @ (FieldDescription::Boolean { .. }
            | FieldDescription::Integer { .. }
            | FieldDescription::Float { .. }
            | FieldDescription::Datetime { .. }
            | FieldDescription::Currency { .. }
            | FieldDescription::Percentage { .. }
            | FieldDescription::Text) => other,
        }
    }
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn position(prefixed: bool) -> &'static str {
    if prefixed { "pre" } else { "post" }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::Integer {
                thousands_separator: None,
            } => f.write_str("integer"),
            NumberFormat::Integer {
                thousands_separator: Some(sep),
            } => write!(f, "integer/{sep}"),
            NumberFormat::Float {
                thousands_separator,
                decimal_separator,
            } => write!(f, "float/{}/{decimal_separator}", or_empty(thousands_separator)),
        }
    }
}

impl fmt::Display for FieldDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDescription::Boolean {
                true_word,
                false_word,
            } => write!(f, "boolean/{true_word}/{false_word}"),
            FieldDescription::Integer {
                thousands_separator: None,
            } => f.write_str("integer"),
            FieldDescription::Integer {
                thousands_separator: Some(sep),
            } => write!(f, "integer/{sep}"),
            FieldDescription::Float {
                thousands_separator,
                decimal_separator,
            } => write!(f, "float/{}/{decimal_separator}", or_empty(thousands_separator)),
            FieldDescription::Date { format, locale } => match locale {
                Some(locale) => write!(f, "date/{format}/{locale}"),
                None => write!(f, "date/{format}"),
            },
            FieldDescription::Datetime { format, locale } => match locale {
                Some(locale) => write!(f, "datetime/{format}/{locale}"),
                None => write!(f, "datetime/{format}"),
            },
            FieldDescription::Currency {
                prefixed,
                symbol,
                number,
            } => write!(f, "currency/{}/{}/{number}", position(*prefixed), or_empty(symbol)),
            FieldDescription::Percentage {
                prefixed,
                sign,
                number,
            } => write!(f, "percentage/{}/{}/{number}", position(*prefixed), or_empty(sign)),
            FieldDescription::Text => f.write_str("text"),
        }
    }
}

/// Split a label on `/`, leaving `\/` escapes inside their segment.
fn split_segments(label: &str) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut chars = label.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'/') => {
                if let Some(current) = segments.last_mut() {
                    current.push('\\');
                    current.push('/');
                }
                chars.next();
            }
            '/' => segments.push(String::new()),
            other => {
                if let Some(current) = segments.last_mut() {
                    current.push(other);
                }
            }
        }
    }
    segments
}

fn optional(segment: &str) -> Option<String> {
    (!segment.is_empty()).then(|| segment.to_string())
}

fn parse_position(segment: &str) -> Result<bool> {
    match segment {
        "pre" => Ok(true),
        "post" => Ok(false),
        other => Err(anyhow!("Expected 'pre' or 'post' but found '{other}'")),
    }
}

fn parse_number(segments: &[String]) -> Result<NumberFormat> {
    match segments {
        [kind] if kind == "integer" => Ok(NumberFormat::Integer {
            thousands_separator: None,
        }),
        [kind, sep] if kind == "integer" => Ok(NumberFormat::Integer {
            thousands_separator: optional(sep),
        }),
        [kind, sep, decimal] if kind == "float" => {
            if decimal.is_empty() {
                bail!("Float label requires a decimal separator");
            }
            Ok(NumberFormat::Float {
                thousands_separator: optional(sep),
                decimal_separator: decimal.clone(),
            })
        }
        _ => Err(anyhow!("Unsupported number label '{}'", segments.join("/"))),
    }
}

impl FromStr for NumberFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_number(&split_segments(value))
    }
}

impl FromStr for FieldDescription {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let segments = split_segments(value);
        let (kind, rest) = segments
            .split_first()
            .ok_or_else(|| anyhow!("Empty field label"))?;
        match (kind.as_str(), rest) {
            ("text", []) => Ok(FieldDescription::Text),
            ("integer" | "float", _) => parse_number(&segments).map(FieldDescription::from),
            ("boolean", [true_word, false_word]) => {
                Ok(FieldDescription::boolean(true_word, false_word))
            }
            ("date" | "datetime", [format, locale @ ..]) if locale.len() <= 1 => {
                if format.is_empty() {
                    bail!("Date label '{value}' has an empty format");
                }
                let description = FieldDescription::Date {
                    format: format.clone(),
                    locale: locale.first().and_then(|l| optional(l)),
                };
                Ok(if kind == "datetime" {
                    description.with_time()
                } else {
                    description
                })
            }
            ("currency", [pos, symbol, number @ ..]) if !number.is_empty() => {
                Ok(FieldDescription::Currency {
                    prefixed: parse_position(pos)?,
                    symbol: optional(symbol),
                    number: parse_number(number)?,
                })
            }
            ("percentage", [pos, sign, number @ ..]) if !number.is_empty() => {
                Ok(FieldDescription::Percentage {
                    prefixed: parse_position(pos)?,
                    sign: optional(sign),
                    number: parse_number(number)?,
                })
            }
            _ => Err(anyhow!("Unsupported field label '{value}'")),
        }
    }
}

impl Serialize for FieldDescription {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldDescription {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        FieldDescription::from_str(&label).map_err(|err| de::Error::custom(err.to_string()))
    }
}
