use std::collections::BTreeSet;

use super::{DateCode, DatePart, ymd::numeric_values};
use crate::{
    error::{Sniff, SniffError},
    lexer::OpCode,
    tokens::ColumnInfos,
};

/// Time components in the only order they are accepted, with their
/// exclusive upper bound.
pub(super) const TIME_STEPS: [(DateCode, &str, u32); 4] = [
    (DateCode::Hours, "HH", 24),
    (DateCode::Minutes, "mm", 60),
    (DateCode::Seconds, "ss", 60),
    (DateCode::Milliseconds, "SSS", 1000),
];

/// Hands out hours, minutes, seconds and milliseconds in that order, one per
/// accepted column. Owned by a single date classification.
#[derive(Debug, Default)]
pub struct HmsClassifier {
    confirmed: BTreeSet<DateCode>,
}

impl HmsClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmed(&self) -> &BTreeSet<DateCode> {
        &self.confirmed
    }

    /// Accept `column` as the next time component. A rejected column leaves
    /// the classifier unchanged.
    pub fn classify(&mut self, column: &ColumnInfos) -> Sniff<DatePart> {
        let opcode = column.unique_opcode()?;
        if opcode != OpCode::Number {
            return Err(SniffError::unrecognized(format!("{opcode} is not a time component")));
        }
        let (code, format, bound) = TIME_STEPS
            .into_iter()
            .find(|(code, _, _)| !self.confirmed.contains(code))
            .ok_or_else(|| SniffError::unrecognized("time is already complete"))?;
        let values = numeric_values(&column.texts())?;
        match values.last() {
            Some(max) if *max < bound => {
                self.confirmed.insert(code);
                Ok(DatePart::new(code, format))
            }
            _ => Err(SniffError::unrecognized(format!(
                "{code:?} must stay below {bound}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenRow;

    fn column(values: &[&str]) -> ColumnInfos {
        let rows: Vec<TokenRow> = values.iter().map(|v| TokenRow::lex(v)).collect();
        ColumnInfos::at_position(&rows, 0, 0.95)
    }

    #[test]
    fn accepts_components_in_order() {
        let mut hms = HmsClassifier::new();
        let codes: Vec<DateCode> = [
            column(&["08", "17", "23"]),
            column(&["00", "30", "59"]),
            column(&["01", "45"]),
            column(&["000", "999"]),
        ]
        .iter()
        .map(|c| hms.classify(c).map(|p| p.code))
        .collect::<Sniff<_>>()
        .expect("full time");
        assert_eq!(
            codes,
            vec![
                DateCode::Hours,
                DateCode::Minutes,
                DateCode::Seconds,
                DateCode::Milliseconds
            ]
        );
        assert!(hms.classify(&column(&["1"])).is_err());
    }

    #[test]
    fn rejection_does_not_advance() {
        let mut hms = HmsClassifier::new();
        assert!(hms.classify(&column(&["24", "10"])).is_err());
        assert!(hms.confirmed().is_empty());
        assert!(hms.classify(&column(&["abc"])).is_err());
        let part = hms.classify(&column(&["23"])).expect("hours");
        assert_eq!(part.text, "HH");
    }
}
