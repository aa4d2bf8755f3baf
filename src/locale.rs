//! Built-in locale tables.
//!
//! The tables are plain data: one [`Locale`] record per locale, searched in a
//! fixed order (`en_US` first, then alphabetical). Names are stored
//! case-folded so they can be compared against case-folded sample values. The
//! aggregated separator, percentage and currency sets are computed once, on
//! first use, and never change afterwards.

use std::{collections::BTreeSet, sync::OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub name: &'static str,
    pub true_word: &'static str,
    pub false_word: &'static str,
    pub months: [&'static str; 12],
    pub months_abbreviated: [&'static str; 12],
    pub days: [&'static str; 7],
    pub days_abbreviated: [&'static str; 7],
    pub thousands_separator: &'static str,
    pub decimal_separator: &'static str,
    pub date_separator: &'static str,
    pub time_separator: &'static str,
    pub currency_symbol: &'static str,
    pub currency_code: &'static str,
}

/// Which name table of a locale matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NameKind {
    Month,
    MonthAbbreviated,
    Day,
    DayAbbreviated,
}

impl NameKind {
    pub const SEARCH_ORDER: [NameKind; 4] = [
        NameKind::Month,
        NameKind::MonthAbbreviated,
        NameKind::Day,
        NameKind::DayAbbreviated,
    ];

    pub fn format_code(self) -> &'static str {
        match self {
            NameKind::Month => "MMMM",
            NameKind::MonthAbbreviated => "MMM",
            NameKind::Day => "EEEE",
            NameKind::DayAbbreviated => "EEE",
        }
    }

    pub fn is_month(self) -> bool {
        matches!(self, NameKind::Month | NameKind::MonthAbbreviated)
    }
}

impl Locale {
    pub fn names(&self, kind: NameKind) -> &[&'static str] {
        match kind {
            NameKind::Month => &self.months,
            NameKind::MonthAbbreviated => &self.months_abbreviated,
            NameKind::Day => &self.days,
            NameKind::DayAbbreviated => &self.days_abbreviated,
        }
    }
}

const LOCALES: &[Locale] = &[
    Locale {
        name: "en_US",
        true_word: "true",
        false_word: "false",
        months: [
            "january", "february", "march", "april", "may", "june", "july", "august",
            "september", "october", "november", "december",
        ],
        months_abbreviated: [
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
        ],
        days: [
            "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
        ],
        days_abbreviated: ["sun", "mon", "tue", "wed", "thu", "fri", "sat"],
        thousands_separator: ",",
        decimal_separator: ".",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "$",
        currency_code: "usd",
    },
    Locale {
        name: "de_CH",
        true_word: "wahr",
        false_word: "falsch",
        months: [
            "januar", "februar", "märz", "april", "mai", "juni", "juli", "august",
            "september", "oktober", "november", "dezember",
        ],
        months_abbreviated: [
            "jan", "feb", "mär", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "dez",
        ],
        days: [
            "sonntag", "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag",
        ],
        days_abbreviated: ["so", "mo", "di", "mi", "do", "fr", "sa"],
        thousands_separator: "'",
        decimal_separator: ".",
        date_separator: ".",
        time_separator: ":",
        currency_symbol: "chf",
        currency_code: "chf",
    },
    Locale {
        name: "de_DE",
        true_word: "wahr",
        false_word: "falsch",
        months: [
            "januar", "februar", "märz", "april", "mai", "juni", "juli", "august",
            "september", "oktober", "november", "dezember",
        ],
        months_abbreviated: [
            "jan", "feb", "mär", "apr", "mai", "jun", "jul", "aug", "sep", "okt", "nov", "dez",
        ],
        days: [
            "sonntag", "montag", "dienstag", "mittwoch", "donnerstag", "freitag", "samstag",
        ],
        days_abbreviated: ["so", "mo", "di", "mi", "do", "fr", "sa"],
        thousands_separator: ".",
        decimal_separator: ",",
        date_separator: ".",
        time_separator: ":",
        currency_symbol: "€",
        currency_code: "eur",
    },
    Locale {
        name: "en_GB",
        true_word: "true",
        false_word: "false",
        months: [
            "january", "february", "march", "april", "may", "june", "july", "august",
            "september", "october", "november", "december",
        ],
        months_abbreviated: [
            "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
        ],
        days: [
            "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
        ],
        days_abbreviated: ["sun", "mon", "tue", "wed", "thu", "fri", "sat"],
        thousands_separator: ",",
        decimal_separator: ".",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "£",
        currency_code: "gbp",
    },
    Locale {
        name: "es_ES",
        true_word: "verdadero",
        false_word: "falso",
        months: [
            "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
            "septiembre", "octubre", "noviembre", "diciembre",
        ],
        months_abbreviated: [
            "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
        ],
        days: [
            "domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado",
        ],
        days_abbreviated: ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"],
        thousands_separator: ".",
        decimal_separator: ",",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "€",
        currency_code: "eur",
    },
    Locale {
        name: "fr_FR",
        true_word: "vrai",
        false_word: "faux",
        months: [
            "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
            "septembre", "octobre", "novembre", "décembre",
        ],
        months_abbreviated: [
            "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
            "nov.", "déc.",
        ],
        days: [
            "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
        ],
        days_abbreviated: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
        thousands_separator: "\u{202f}",
        decimal_separator: ",",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "€",
        currency_code: "eur",
    },
    Locale {
        name: "it_IT",
        true_word: "vero",
        false_word: "falso",
        months: [
            "gennaio", "febbraio", "marzo", "aprile", "maggio", "giugno", "luglio", "agosto",
            "settembre", "ottobre", "novembre", "dicembre",
        ],
        months_abbreviated: [
            "gen", "feb", "mar", "apr", "mag", "giu", "lug", "ago", "set", "ott", "nov", "dic",
        ],
        days: [
            "domenica", "lunedì", "martedì", "mercoledì", "giovedì", "venerdì", "sabato",
        ],
        days_abbreviated: ["dom", "lun", "mar", "mer", "gio", "ven", "sab"],
        thousands_separator: ".",
        decimal_separator: ",",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "€",
        currency_code: "eur",
    },
    Locale {
        name: "nl_NL",
        true_word: "waar",
        false_word: "onwaar",
        months: [
            "januari", "februari", "maart", "april", "mei", "juni", "juli", "augustus",
            "september", "oktober", "november", "december",
        ],
        months_abbreviated: [
            "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
        ],
        days: [
            "zondag", "maandag", "dinsdag", "woensdag", "donderdag", "vrijdag", "zaterdag",
        ],
        days_abbreviated: ["zo", "ma", "di", "wo", "do", "vr", "za"],
        thousands_separator: ".",
        decimal_separator: ",",
        date_separator: "-",
        time_separator: ":",
        currency_symbol: "€",
        currency_code: "eur",
    },
    Locale {
        name: "pt_BR",
        true_word: "verdadeiro",
        false_word: "falso",
        months: [
            "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
            "setembro", "outubro", "novembro", "dezembro",
        ],
        months_abbreviated: [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ],
        days: [
            "domingo", "segunda", "terça", "quarta", "quinta", "sexta", "sábado",
        ],
        days_abbreviated: ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"],
        thousands_separator: ".",
        decimal_separator: ",",
        date_separator: "/",
        time_separator: ":",
        currency_symbol: "r$",
        currency_code: "brl",
    },
    Locale {
        name: "sv_SE",
        true_word: "sant",
        false_word: "falskt",
        months: [
            "januari", "februari", "mars", "april", "maj", "juni", "juli", "augusti",
            "september", "oktober", "november", "december",
        ],
        months_abbreviated: [
            "jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
        ],
        days: [
            "söndag", "måndag", "tisdag", "onsdag", "torsdag", "fredag", "lördag",
        ],
        days_abbreviated: ["sön", "mån", "tis", "ons", "tor", "fre", "lör"],
        thousands_separator: "\u{a0}",
        decimal_separator: ",",
        date_separator: "-",
        time_separator: ":",
        currency_symbol: "kr",
        currency_code: "sek",
    },
];

const PERCENTAGE_SIGNS: &[&str] = &["%"];

#[derive(Debug)]
pub struct LocaleData {
    locales: &'static [Locale],
    number_separators: BTreeSet<&'static str>,
    date_separators: BTreeSet<&'static str>,
    percentage_signs: BTreeSet<&'static str>,
    currency_symbols: BTreeSet<&'static str>,
    currency_codes: BTreeSet<&'static str>,
}

static LOCALE_DATA: OnceLock<LocaleData> = OnceLock::new();

/// The process-wide, read-only locale tables.
pub fn locale_data() -> &'static LocaleData {
    LOCALE_DATA.get_or_init(|| LocaleData::from_locales(LOCALES))
}

impl LocaleData {
    fn from_locales(locales: &'static [Locale]) -> Self {
        let mut data = LocaleData {
            locales,
            number_separators: BTreeSet::new(),
            date_separators: BTreeSet::new(),
            percentage_signs: PERCENTAGE_SIGNS.iter().copied().collect(),
            currency_symbols: BTreeSet::new(),
            currency_codes: BTreeSet::new(),
        };
        for locale in locales {
            data.number_separators.insert(locale.thousands_separator);
            data.number_separators.insert(locale.decimal_separator);
            data.date_separators.insert(locale.date_separator);
            data.date_separators.insert(locale.time_separator);
            data.currency_symbols.insert(locale.currency_symbol);
            data.currency_codes.insert(locale.currency_code);
        }
        data
    }

    pub fn locales(&self) -> &'static [Locale] {
        self.locales
    }

    pub fn is_number_separator(&self, text: &str) -> bool {
        self.number_separators.contains(text)
    }

    pub fn is_date_separator(&self, text: &str) -> bool {
        self.date_separators.contains(text)
    }

    pub fn is_percentage_sign(&self, text: &str) -> bool {
        self.percentage_signs.contains(text)
    }

    pub fn is_currency(&self, text: &str) -> bool {
        self.currency_symbols.contains(text) || self.currency_codes.contains(text)
    }

    /// The first locale (in search order) whose boolean pair covers every
    /// given word. Words must already be case-folded.
    pub fn find_boolean_pair<'a, I>(&self, words: I) -> Option<&'static Locale>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        self.locales.iter().find(|locale| {
            words
                .clone()
                .into_iter()
                .all(|word| word == locale.true_word || word == locale.false_word)
        })
    }

    /// The first locale and name table containing every value.
    pub fn find_name_table(&self, values: &BTreeSet<String>) -> Option<(&'static Locale, NameKind)> {
        if values.is_empty() {
            return None;
        }
        self.locales.iter().find_map(|locale| {
            NameKind::SEARCH_ORDER.into_iter().find_map(|kind| {
                let names = locale.names(kind);
                values
                    .iter()
                    .all(|value| names.contains(&value.as_str()))
                    .then_some((locale, kind))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_sets_span_all_locales() {
        let data = locale_data();
        assert!(data.is_number_separator(","));
        assert!(data.is_number_separator("."));
        assert!(data.is_number_separator("'"));
        assert!(data.is_date_separator("."));
        assert!(data.is_date_separator("-"));
        assert!(data.is_date_separator(":"));
        assert!(!data.is_date_separator(","));
        assert!(data.is_percentage_sign("%"));
        assert!(data.is_currency("€"));
        assert!(data.is_currency("eur"));
        assert!(!data.is_currency("euro"));
    }

    #[test]
    fn boolean_pairs_follow_search_order() {
        let data = locale_data();
        let english = data.find_boolean_pair(["true", "false"]).expect("english pair");
        assert_eq!(english.name, "en_US");
        let french = data.find_boolean_pair(["faux"]).expect("french pair");
        assert_eq!(french.name, "fr_FR");
        assert!(data.find_boolean_pair(["true", "faux"]).is_none());
    }

    #[test]
    fn name_tables_match_case_folded_values() {
        let data = locale_data();
        let values: BTreeSet<String> = ["sept.", "oct."].iter().map(|s| s.to_string()).collect();
        let (locale, kind) = data.find_name_table(&values).expect("french months");
        assert_eq!(locale.name, "fr_FR");
        assert_eq!(kind, NameKind::MonthAbbreviated);

        let values: BTreeSet<String> = ["monday", "friday"].iter().map(|s| s.to_string()).collect();
        let (locale, kind) = data.find_name_table(&values).expect("english days");
        assert_eq!(locale.name, "en_US");
        assert_eq!(kind, NameKind::Day);
    }
}
