use csv_columndet::{FieldDescription, NumberFormat, Parser, ParserConfig};
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Zéü ,.;:_$€%-]{1,6}"
}

fn separator_strategy() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just(",".to_string()),
        Just(".".to_string()),
        Just(" ".to_string()),
        Just("'".to_string()),
    ])
}

fn number_strategy() -> impl Strategy<Value = NumberFormat> {
    prop_oneof![
        separator_strategy().prop_map(|sep| NumberFormat::Integer {
            thousands_separator: sep,
        }),
        (separator_strategy(), prop_oneof![Just(","), Just(".")]).prop_map(|(sep, decimal)| {
            NumberFormat::Float {
                thousands_separator: sep,
                decimal_separator: decimal.to_string(),
            }
        }),
    ]
}

fn date_format_strategy() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("yyyy"),
        Just("yy"),
        Just("MM"),
        Just("MMMM"),
        Just("dd"),
        Just("HH"),
        Just("mm"),
        Just("ss"),
        Just("-"),
        Just(" "),
        Just(":"),
        Just("\\/"),
        Just("XXX"),
    ];
    proptest::collection::vec(piece, 1..8).prop_map(|pieces| pieces.concat())
}

fn description_strategy() -> impl Strategy<Value = FieldDescription> {
    let locale = proptest::option::of("[a-z]{2}_[A-Z]{2}");
    prop_oneof![
        Just(FieldDescription::Text),
        (word_strategy(), word_strategy())
            .prop_map(|(t, f)| FieldDescription::boolean(&t, &f)),
        number_strategy().prop_map(FieldDescription::from),
        (date_format_strategy(), locale, any::<bool>()).prop_map(
            |(format, locale, with_time)| {
                let date = FieldDescription::Date { format, locale };
                if with_time { date.with_time() } else { date }
            }
        ),
        (any::<bool>(), proptest::option::of(word_strategy()), number_strategy()).prop_map(
            |(prefixed, symbol, number)| FieldDescription::Currency {
                prefixed,
                symbol,
                number,
            }
        ),
        (any::<bool>(), proptest::option::of(Just("%".to_string())), number_strategy())
            .prop_map(|(prefixed, sign, number)| FieldDescription::Percentage {
                prefixed,
                sign,
                number,
            }),
    ]
}

fn apply_grouping(digits: &str, separator: &str) -> String {
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

proptest! {
    #[test]
    fn labels_round_trip(description in description_strategy()) {
        let label = description.to_string();
        let parsed: FieldDescription = label.parse().expect("label parses");
        prop_assert_eq!(parsed, description);
    }

    #[test]
    fn parse_is_total_and_repeatable(values in proptest::collection::vec(".{0,12}", 0..20)) {
        let parser = Parser::default();
        let first = parser.parse(&values);
        let label = first.to_string();
        prop_assert!(label.parse::<FieldDescription>().is_ok(), "unparseable label {}", label);
        prop_assert_eq!(parser.parse(&values), first);
    }

    #[test]
    fn grouped_floats_are_recognised(
        integers in proptest::collection::vec(1_000u32..10_000_000, 5..30),
        fractions in proptest::collection::vec(10u32..100, 5..30),
        dot_decimal in any::<bool>(),
    ) {
        let (grouping, decimal) = if dot_decimal { (",", ".") } else { (".", ",") };
        let mut values: Vec<String> = integers
            .iter()
            .zip(fractions.iter())
            .map(|(int, frac)| format!("{}{decimal}{frac}", apply_grouping(&int.to_string(), grouping)))
            .collect();
        values.push(format!("1{grouping}234{grouping}567{decimal}25"));
        values.push(format!("12{decimal}5"));
        let parser = Parser::new(ParserConfig::default().with_prefer_dot_as_decimal_separator(dot_decimal))
            .expect("valid config");
        prop_assert_eq!(
            parser.parse(&values),
            FieldDescription::from(NumberFormat::float(Some(grouping), decimal))
        );
    }
}
