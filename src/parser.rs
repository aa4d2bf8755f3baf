//! Column classification.
//!
//! [`Parser::parse`] lexes the sample and first tries a *sized* reading, used
//! when the rows agree on a token count: one token goes to the single-token
//! sniffer, several go to the date state machine. When that abstains, the
//! *unsized* reading looks at the ends of the rows for a numeric tail and an
//! optional percentage or currency wrapper. Whatever cannot be placed is text.

use anyhow::Result;
use log::debug;

use crate::{
    boolean::sniff_boolean,
    config::ParserConfig,
    date::{DateSniffer, packed_date, packed_datetime},
    description::{FieldDescription, NumberFormat},
    error::{Sniff, SniffError},
    frequency::Frequencies,
    lexer::{OpCode, Token},
    number::NumberSniffer,
    tokens::{ColumnInfos, RowsInfos, TokenRow, TokenSlice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Prefix,
    Suffix,
}

fn is_sign(token: &Token) -> bool {
    matches!(token.text.as_str(), "+" | "-")
}

fn is_numeric_head(token: &Token) -> bool {
    token.opcode == OpCode::Number || is_sign(token)
}

fn has_opcode(opcode: OpCode) -> impl Fn(&Token) -> bool {
    move |token| token.opcode == opcode
}

fn strip_sign(row: TokenSlice<'_>) -> TokenSlice<'_> {
    match row.split_first() {
        Some((head, rest)) if is_sign(head) => rest.trim_start_matches(Token::is_space),
        _ => row,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn threshold(&self) -> f64 {
        self.config.threshold
    }

    fn number_sniffer(&self) -> NumberSniffer {
        NumberSniffer::new(self.threshold(), self.config.prefer_dot_as_decimal_separator)
            .with_strict_errors(self.config.strict_numeric_errors)
    }

    /// Classify one column from sample values. Never fails: anything that
    /// cannot be recognised is text.
    pub fn parse<I, S>(&self, values: I) -> FieldDescription
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<TokenRow> = values
            .into_iter()
            .map(|value| TokenRow::lex(value.as_ref()))
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return FieldDescription::Text;
        }
        let infos = RowsInfos::new(&rows, self.threshold());
        infos
            .unique_len()
            .and_then(|len| self.parse_sized(&rows, len))
            .or_else(|err| {
                debug!("Sized reading abstained: {err}");
                self.parse_unsized(&infos)
            })
            .unwrap_or_else(|err| {
                debug!("Unsized reading abstained: {err}");
                FieldDescription::Text
            })
    }

    fn parse_sized(&self, rows: &[TokenRow], len: usize) -> Sniff<FieldDescription> {
        let rows: Vec<TokenRow> = rows.iter().filter(|row| row.len() == len).cloned().collect();
        if len == 1 {
            self.sniff_single_token(&rows)
        } else {
            DateSniffer::new(&rows, self.threshold()).sniff()
        }
    }

    fn sniff_single_token(&self, rows: &[TokenRow]) -> Sniff<FieldDescription> {
        let column = ColumnInfos::at_position(rows, 0, self.threshold());
        match column.unique_opcode()? {
            OpCode::Number => Ok(self.sniff_number_token(&column)),
            OpCode::Text => Ok(sniff_boolean(
                column.tokens().iter().map(|t| t.text.as_str()),
                self.threshold(),
            )
            .unwrap_or_else(|err| {
                debug!("Single words are not booleans: {err}");
                FieldDescription::Text
            })),
            _ => Ok(FieldDescription::Text),
        }
    }

    fn sniff_number_token(&self, column: &ColumnInfos) -> FieldDescription {
        let texts = column.texts();
        let packed = match column.unique_width() {
            Ok(1) if texts.iter().all(|t| t == "0" || t == "1") => {
                return FieldDescription::boolean("1", "0");
            }
            Ok(6 | 8) => packed_date(column),
            Ok(12 | 14) => packed_datetime(column),
            Ok(width) => Err(SniffError::unrecognized(format!(
                "width {width} is not a packed date"
            ))),
            Err(err) => Err(err),
        };
        packed.unwrap_or_else(|err| {
            debug!("Digits are not a packed date: {err}");
            let leading_zero = texts.iter().any(|t| t.len() > 1 && t.starts_with('0'));
            if self.config.leading_zero_as_text && leading_zero {
                FieldDescription::Text
            } else {
                NumberFormat::integer(None).into()
            }
        })
    }

    fn parse_unsized(&self, infos: &RowsInfos<'_>) -> Sniff<FieldDescription> {
        let numeric_tail = infos.last_matches(has_opcode(OpCode::Number));
        if numeric_tail && infos.first_matches(is_numeric_head) {
            let rows = infos.rows().iter().map(|row| strip_sign(row.as_slice()));
            return self.number_sniffer().sniff(rows).map(FieldDescription::from);
        }
        if numeric_tail && infos.first_matches(has_opcode(OpCode::PercentageSign)) {
            return self.wrapped(infos, OpCode::PercentageSign, Side::Prefix);
        }
        if numeric_tail && infos.first_matches(has_opcode(OpCode::CurrencySign)) {
            return self.wrapped(infos, OpCode::CurrencySign, Side::Prefix);
        }
        let numeric_head = infos.first_matches(is_numeric_head);
        if numeric_head && infos.last_matches(has_opcode(OpCode::PercentageSign)) {
            return self.wrapped(infos, OpCode::PercentageSign, Side::Suffix);
        }
        if numeric_head && infos.last_matches(has_opcode(OpCode::CurrencySign)) {
            return self.wrapped(infos, OpCode::CurrencySign, Side::Suffix);
        }
        Err(SniffError::unrecognized("no numeric tail or wrapper"))
    }

    /// Strip a percentage or currency wrapper and read the number inside.
    fn wrapped(&self, infos: &RowsInfos<'_>, wrapper: OpCode, side: Side) -> Sniff<FieldDescription> {
        let is_wrapper = |token: &Token| token.opcode == wrapper || token.is_space();
        let ends: Frequencies<String> = infos
            .rows()
            .iter()
            .filter_map(|row| match side {
                Side::Prefix => row.tokens.first(),
                Side::Suffix => row.tokens.last(),
            })
            .map(|token| token.text.clone())
            .collect();
        let symbol = ends.pick_unique(self.threshold()).ok();
        let rows = infos.rows().iter().map(|row| {
            let slice = row.as_slice();
            match side {
                Side::Prefix => strip_sign(slice.trim_start_matches(is_wrapper)),
                Side::Suffix => strip_sign(slice.trim_end_matches(is_wrapper)),
            }
        });
        let number = self.number_sniffer().sniff(rows)?;
        let prefixed = side == Side::Prefix;
        Ok(match wrapper {
            OpCode::PercentageSign => FieldDescription::Percentage {
                prefixed,
                sign: symbol,
                number,
            },
            _ => FieldDescription::Currency {
                prefixed,
                symbol,
                number,
            },
        })
    }
}
