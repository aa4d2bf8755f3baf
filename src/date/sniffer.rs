use std::collections::BTreeSet;

use log::debug;

use super::{
    DateCode, DatePart, HmsClassifier, TIMEZONE_FORMAT, describe,
    ymd::{literal_name_part, numeric_variable_width_part},
};
use crate::{
    description::FieldDescription,
    error::{Sniff, SniffError},
    lexer::OpCode,
    tokens::{ColumnInfos, TokenRow},
};

/// Reads a multi-token date column position by position, allocating year,
/// month and day first and then the time components.
#[derive(Debug)]
pub struct DateSniffer<'a> {
    rows: &'a [TokenRow],
    threshold: f64,
}

fn ymd_known(seen: &BTreeSet<DateCode>) -> bool {
    seen.contains(&DateCode::Month)
        && seen.contains(&DateCode::Day)
        && (seen.contains(&DateCode::Year) || seen.contains(&DateCode::YearPart2))
}

fn hms_known(seen: &BTreeSet<DateCode>) -> bool {
    seen.contains(&DateCode::Hours)
        && seen.contains(&DateCode::Minutes)
        && seen.contains(&DateCode::Seconds)
}

impl<'a> DateSniffer<'a> {
    /// `rows` should all have the same number of tokens; positions past the
    /// shortest row are ignored.
    pub fn new(rows: &'a [TokenRow], threshold: f64) -> Self {
        Self { rows, threshold }
    }

    pub fn sniff(&self) -> Sniff<FieldDescription> {
        let width = self.rows.iter().map(TokenRow::len).min().unwrap_or(0);
        let mut seen = BTreeSet::new();
        let mut hms = HmsClassifier::new();
        let mut parts = Vec::with_capacity(width);

        for index in 0..width {
            let column = ColumnInfos::at_position(self.rows, index, self.threshold);
            if let Ok(token) = column.unique_token()
                && token.opcode != OpCode::Number
            {
                if matches!(token.opcode, OpCode::PercentageSign | OpCode::CurrencySign) {
                    return Err(SniffError::unrecognized(format!(
                        "'{}' wraps a number, not a date",
                        token.text
                    )));
                }
                if matches!(token.text.as_str(), "+" | "-") && ymd_known(&seen) && hms_known(&seen) {
                    parts.push(DatePart::new(DateCode::Timezone, TIMEZONE_FORMAT));
                    break;
                }
                parts.push(DatePart::literal(&token.text));
                continue;
            }

            let part = if !ymd_known(&seen) {
                literal_name_part(&column)
                    .or_else(|_| numeric_variable_width_part(&column.texts(), self.threshold))
                    .inspect_err(|err| debug!("Position {index} is not a date component: {err}"))?
            } else if !(hms_known(&seen) && seen.contains(&DateCode::Milliseconds)) {
                hms.classify(&column)
                    .unwrap_or_else(|_| DatePart::literal(column.representative_text()))
            } else {
                DatePart::literal(column.representative_text())
            };
            if part.code != DateCode::Text {
                seen.insert(part.code);
            }
            parts.push(part);
        }
        describe(parts)
    }
}
