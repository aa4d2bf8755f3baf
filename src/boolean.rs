use crate::{
    description::FieldDescription,
    error::{Sniff, SniffError},
    frequency::Frequencies,
    locale::locale_data,
};

/// Recognise a column of locale true/false words.
///
/// The two dominant case-folded words must both belong to one locale's pair;
/// the first matching locale in search order wins and its own words are used.
pub fn sniff_boolean<'a, I>(values: I, threshold: f64) -> Sniff<FieldDescription>
where
    I: IntoIterator<Item = &'a str>,
{
    let counts: Frequencies<String> = values.into_iter().map(str::to_lowercase).collect();
    let words = counts.pick_top_n(2, threshold)?;
    if words.is_empty() {
        return Err(SniffError::Empty);
    }
    let locale = locale_data()
        .find_boolean_pair(words.iter().map(String::as_str))
        .ok_or_else(|| SniffError::unrecognized(format!("{words:?} are not boolean words")))?;
    Ok(FieldDescription::boolean(locale.true_word, locale.false_word))
}
