use std::collections::BTreeSet;

use super::{DateCode, DatePart};
use crate::{
    error::{Sniff, SniffError},
    frequency::Frequencies,
    lexer::OpCode,
    locale::locale_data,
    tokens::ColumnInfos,
};

const CENTURY_PREFIXES: [u32; 4] = [18, 19, 20, 21];

pub(super) fn numeric_values(texts: &BTreeSet<String>) -> Sniff<BTreeSet<u32>> {
    if texts.is_empty() {
        return Err(SniffError::Empty);
    }
    texts
        .iter()
        .map(|text| {
            text.parse::<u32>()
                .map_err(|_| SniffError::unrecognized(format!("'{text}' is not a number")))
        })
        .collect()
}

fn bounds(values: &BTreeSet<u32>) -> Sniff<(u32, u32)> {
    match (values.first(), values.last()) {
        (Some(min), Some(max)) => Ok((*min, *max)),
        _ => Err(SniffError::Empty),
    }
}

/// Month or day names of one locale.
pub fn literal_name_part(column: &ColumnInfos) -> Sniff<DatePart> {
    let opcode = column.unique_opcode()?;
    if opcode != OpCode::Text {
        return Err(SniffError::unrecognized(format!("{opcode} is not a name")));
    }
    let texts = column.texts();
    let (locale, kind) = locale_data()
        .find_name_table(&texts)
        .ok_or_else(|| SniffError::unrecognized("no locale knows these names"))?;
    let code = if kind.is_month() {
        DateCode::Month
    } else {
        DateCode::Day
    };
    Ok(DatePart::with_locale(code, kind.format_code(), locale.name))
}

/// Classify one two-digit group of a packed block.
pub fn numeric_two_digit_part(texts: &BTreeSet<String>) -> Sniff<DatePart> {
    let values = numeric_values(texts)?;
    let (min, max) = bounds(&values)?;
    let centuries: BTreeSet<u32> = CENTURY_PREFIXES.into_iter().collect();
    if values.contains(&0) {
        Ok(DatePart::new(DateCode::YearPart2, "yy"))
    } else if values.symmetric_difference(&centuries).count() <= 3 {
        Ok(DatePart::new(DateCode::YearPart1, "yy"))
    } else if min >= 1 && max <= 12 {
        Ok(DatePart::new(DateCode::Month, "MM"))
    } else if max > 31 {
        Ok(DatePart::new(DateCode::YearPart2, "yy"))
    } else if max > 12 {
        Ok(DatePart::new(DateCode::Day, "dd"))
    } else {
        Err(SniffError::unrecognized(format!(
            "values {min}..={max} fit no date component"
        )))
    }
}

/// Classify a free-standing numeric date component by its width and range.
pub fn numeric_variable_width_part(texts: &BTreeSet<String>, threshold: f64) -> Sniff<DatePart> {
    let values = numeric_values(texts)?;
    let (min, max) = bounds(&values)?;
    let widths: Frequencies<usize> = texts.iter().map(|t| t.chars().count()).collect();
    match widths.pick_unique(threshold) {
        Ok(4) => Ok(DatePart::new(DateCode::Year, "yyyy")),
        Ok(2) if min == 0 || max > 31 => Ok(DatePart::new(DateCode::Year, "yy")),
        Ok(2) => day_or_month(min, max),
        Ok(width) => Err(SniffError::unrecognized(format!(
            "width {width} is not a date component"
        ))),
        Err(_) if widths.values().max() == Some(&2) => day_or_month(min, max),
        Err(err) => Err(err),
    }
}

pub fn day_or_month(min: u32, max: u32) -> Sniff<DatePart> {
    if 1 <= min && min <= max && max <= 12 {
        Ok(DatePart::new(DateCode::Month, "MM"))
    } else if 12 < max && max <= 31 {
        Ok(DatePart::new(DateCode::Day, "dd"))
    } else {
        Err(SniffError::unrecognized(format!(
            "values {min}..={max} are neither days nor months"
        )))
    }
}
