//! Packed numeric blocks such as `20200918` or `200918102030`.

use std::collections::BTreeSet;

use super::{
    DateCode, DatePart, describe,
    hms::TIME_STEPS,
    ymd::{day_or_month, numeric_two_digit_part, numeric_values},
};
use crate::{
    description::FieldDescription,
    error::{Sniff, SniffError},
    tokens::ColumnInfos,
};

/// Distinct values of every two-character group, group by group.
fn two_digit_groups(column: &ColumnInfos, width: usize) -> Vec<BTreeSet<String>> {
    let mut groups = vec![BTreeSet::new(); width / 2];
    for text in column.texts() {
        let chars: Vec<char> = text.chars().collect();
        for (group, pair) in groups.iter_mut().zip(chars.chunks(2)) {
            group.insert(pair.iter().collect::<String>());
        }
    }
    groups
}

/// Split a 6- or 8-digit block into year, month and day parts.
pub fn ymd_block(column: &ColumnInfos) -> Sniff<Vec<DatePart>> {
    let width = column.unique_width()?;
    if width != 6 && width != 8 {
        return Err(SniffError::unrecognized(format!(
            "a date block has 6 or 8 digits, not {width}"
        )));
    }
    let groups = two_digit_groups(column, width);
    let parts = groups
        .iter()
        .map(numeric_two_digit_part)
        .collect::<Sniff<Vec<_>>>()?;

    let mut merged = Vec::with_capacity(parts.len());
    let mut index = 0;
    while index < parts.len() {
        let part = &parts[index];
        match part.code {
            DateCode::YearPart1 if width == 8 && index + 1 < parts.len() => {
                merged.push(DatePart::new(DateCode::Year, "yyyy"));
                index += 1;
            }
            DateCode::YearPart1 | DateCode::YearPart2 if index == 0 => {
                merged.push(DatePart::new(DateCode::Year, "yy"));
            }
            DateCode::YearPart1 => {
                let values = numeric_values(&groups[index])?;
                let (min, max) = match (values.first(), values.last()) {
                    (Some(min), Some(max)) => (*min, *max),
                    _ => return Err(SniffError::Empty),
                };
                merged.push(day_or_month(min, max)?);
            }
            DateCode::YearPart2 => merged.push(DatePart::new(DateCode::Year, "yy")),
            _ => merged.push(part.clone()),
        }
        index += 1;
    }
    Ok(merged)
}

/// Split a 6-digit block into hours, minutes and seconds. All three groups
/// must be in range at once.
pub fn hms_block(column: &ColumnInfos) -> Sniff<Vec<DatePart>> {
    let width = column.unique_width()?;
    if width != 6 {
        return Err(SniffError::unrecognized(format!(
            "a time block has 6 digits, not {width}"
        )));
    }
    two_digit_groups(column, width)
        .iter()
        .zip(TIME_STEPS)
        .map(|(group, (code, format, bound))| {
            let values = numeric_values(group)?;
            match values.last() {
                Some(max) if *max < bound => Ok(DatePart::new(code, format)),
                _ => Err(SniffError::unrecognized(format!(
                    "{code:?} must stay below {bound}"
                ))),
            }
        })
        .collect()
}

pub fn packed_date(column: &ColumnInfos) -> Sniff<FieldDescription> {
    describe(ymd_block(column)?)
}

/// A 12- or 14-digit block: a date block followed by a 6-digit time block.
pub fn packed_datetime(column: &ColumnInfos) -> Sniff<FieldDescription> {
    let (date, time) = column.split_at(-6);
    let mut parts = ymd_block(&date)?;
    parts.extend(hms_block(&time)?);
    describe(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenRow;

    fn column(values: &[&str]) -> ColumnInfos {
        let rows: Vec<TokenRow> = values.iter().map(|v| TokenRow::lex(v)).collect();
        ColumnInfos::at_position(&rows, 0, 0.95)
    }

    fn label(description: Sniff<FieldDescription>) -> Option<String> {
        description.ok().map(|d| d.to_string())
    }

    #[test]
    fn eight_digit_years_absorb_their_second_half() {
        let days = column(&["20200918", "20200920", "20201001", "20201015", "20201124"]);
        assert_eq!(label(packed_date(&days)), Some("date/yyyyMMdd".to_string()));
        let us = column(&["09152019", "10302020", "11072021", "12252020"]);
        assert_eq!(label(packed_date(&us)), Some("date/MMddyyyy".to_string()));
    }

    #[test]
    fn six_digit_blocks_use_two_digit_years() {
        let short = column(&["200918", "201015", "201124", "210103"]);
        assert_eq!(label(packed_date(&short)), Some("date/yyMMdd".to_string()));
    }

    #[test]
    fn time_block_checks_all_groups() {
        let ok = column(&["102030", "235959", "000000"]);
        assert_eq!(hms_block(&ok).map(|parts| parts.len()), Ok(3));
        assert!(hms_block(&column(&["246000"])).is_err());
        assert!(hms_block(&column(&["1020"])).is_err());
    }

    #[test]
    fn packed_datetime_splits_off_the_time() {
        let stamps = column(&["20200918102030", "20201015235959", "20201124000001"]);
        assert_eq!(
            label(packed_datetime(&stamps)),
            Some("datetime/yyyyMMddHHmmss".to_string())
        );
    }

    #[test]
    fn other_widths_are_not_date_blocks() {
        assert!(ymd_block(&column(&["12345"])).is_err());
        assert!(packed_date(&column(&["99999999"])).is_err());
    }
}
