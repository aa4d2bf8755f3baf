//! Integer and float layout detection.
//!
//! Each row is read from its end: an optional trailing digit group, then the
//! decimal separator candidate, then digit groups of exactly three digits
//! separated by the grouping separator. Separator candidates are counted over
//! the whole column and resolved by agreement.

use log::debug;

use crate::{
    description::NumberFormat,
    error::{Sniff, SniffError},
    frequency::Frequencies,
    lexer::OpCode,
    tokens::TokenSlice,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberSniffer {
    pub threshold: f64,
    pub prefer_dot_as_decimal_separator: bool,
    /// Abstain when too many rows do not fit a numeric layout.
    pub strict_errors: bool,
}

#[derive(Debug, Default)]
struct Candidates {
    decimal: Frequencies<String>,
    grouping: Frequencies<String>,
    errors: usize,
}

impl Candidates {
    /// Returns false when the row does not fit a numeric layout.
    fn record_row(&mut self, row: TokenSlice<'_>) -> bool {
        let row = match row.split_last() {
            Some((last, rest)) if last.opcode == OpCode::Number => rest,
            _ => row,
        };
        let mut row = match row.split_last() {
            Some((sep, rest)) if sep.opcode.is_separator_or_space() => {
                self.decimal.record(sep.text.clone());
                rest
            }
            _ => return false,
        };
        loop {
            let Some((group, rest)) = row.split_last() else {
                return true;
            };
            if group.opcode != OpCode::Number {
                return false;
            }
            if !rest.is_empty() && group.width() != 3 {
                return false;
            }
            match rest.split_last() {
                None => return true,
                Some((sep, before)) => {
                    if sep.opcode.is_separator_or_space() {
                        self.grouping.record(sep.text.clone());
                    }
                    row = before;
                }
            }
        }
    }
}

impl NumberSniffer {
    pub fn new(threshold: f64, prefer_dot_as_decimal_separator: bool) -> Self {
        Self {
            threshold,
            prefer_dot_as_decimal_separator,
            strict_errors: true,
        }
    }

    pub fn with_strict_errors(mut self, strict: bool) -> Self {
        self.strict_errors = strict;
        self
    }

    /// Rows must already be stripped of any sign, currency or percentage
    /// wrapper.
    pub fn sniff<'a, I>(&self, rows: I) -> Sniff<NumberFormat>
    where
        I: IntoIterator<Item = TokenSlice<'a>>,
    {
        let mut candidates = Candidates::default();
        let mut total = 0usize;
        for row in rows {
            total += 1;
            if row.is_empty() {
                candidates.errors += 1;
                continue;
            }
            if row.len() == 1 {
                continue;
            }
            if !candidates.record_row(row) {
                candidates.errors += 1;
            }
        }
        if total == 0 {
            return Err(SniffError::Empty);
        }
        let valid = (total - candidates.errors) as f64 / total as f64;
        if valid < self.threshold {
            if self.strict_errors {
                return Err(SniffError::TooManyErrors {
                    errors: candidates.errors,
                    rows: total,
                });
            }
            debug!(
                "{} of {} row(s) do not fit a numeric layout; continuing",
                candidates.errors, total
            );
        }

        let grouping = candidates.grouping.pick_unique(self.threshold).ok();
        let decimals: Vec<String> = candidates
            .decimal
            .pick_top_n(2, self.threshold)?
            .into_iter()
            .filter(|sep| Some(sep) != grouping.as_ref())
            .collect();
        Ok(self.decide(grouping.as_deref(), &decimals))
    }

    fn decide(&self, grouping: Option<&str>, decimals: &[String]) -> NumberFormat {
        match (decimals, grouping) {
            ([], grouping) => NumberFormat::integer(grouping),
            ([single], None) if single == "." => {
                if self.prefer_dot_as_decimal_separator {
                    NumberFormat::float(None, ".")
                } else {
                    NumberFormat::integer(Some("."))
                }
            }
            ([single], None) if single.chars().all(char::is_whitespace) => {
                NumberFormat::integer(Some(single.as_str()))
            }
            ([first, ..], grouping) => NumberFormat::float(grouping, first),
        }
    }
}
