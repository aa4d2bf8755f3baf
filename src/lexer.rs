//! Character-class tokenizer.
//!
//! A value is cut into runs of characters sharing one class. Runs that are
//! neither digits nor whitespace are then looked up in the locale separator
//! tables and reclassified into the most specific matching [`OpCode`].

use std::fmt;

use crate::locale::locale_data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpCode {
    Number,
    Space,
    Text,
    Operator,
    Punctuation,
    DateSeparator,
    NumberSeparator,
    DateOrNumberSeparator,
    PercentageSign,
    CurrencySign,
}

impl OpCode {
    pub fn is_number_separator(self) -> bool {
        matches!(self, OpCode::NumberSeparator | OpCode::DateOrNumberSeparator)
    }

    pub fn is_separator_or_space(self) -> bool {
        self.is_number_separator() || self == OpCode::Space
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpCode::Number => "number",
            OpCode::Space => "space",
            OpCode::Text => "text",
            OpCode::Operator => "operator",
            OpCode::Punctuation => "punctuation",
            OpCode::DateSeparator => "date-separator",
            OpCode::NumberSeparator => "number-separator",
            OpCode::DateOrNumberSeparator => "date-or-number-separator",
            OpCode::PercentageSign => "percentage-sign",
            OpCode::CurrencySign => "currency-sign",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    pub opcode: OpCode,
    pub text: String,
}

impl Token {
    pub fn new(opcode: OpCode, text: impl Into<String>) -> Self {
        Self {
            opcode,
            text: text.into(),
        }
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_space(&self) -> bool {
        self.opcode == OpCode::Space
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.opcode, self.text)
    }
}

fn char_class(ch: char) -> OpCode {
    if ch.is_ascii_digit() {
        OpCode::Number
    } else if ch.is_whitespace() {
        OpCode::Space
    } else if "+-*/=<>^~|".contains(ch) {
        OpCode::Operator
    } else if ch.is_ascii_punctuation() {
        OpCode::Punctuation
    } else {
        OpCode::Text
    }
}

/// Static reclassification of a structural run by its literal text.
fn refine(opcode: OpCode, text: &str) -> OpCode {
    if matches!(opcode, OpCode::Number | OpCode::Space) {
        return opcode;
    }
    let data = locale_data();
    let folded = text.to_lowercase();
    let date = data.is_date_separator(&folded);
    let number = data.is_number_separator(&folded);
    match (date, number) {
        (true, true) => OpCode::DateOrNumberSeparator,
        (true, false) => OpCode::DateSeparator,
        (false, true) => OpCode::NumberSeparator,
        _ if data.is_percentage_sign(&folded) => OpCode::PercentageSign,
        _ if data.is_currency(&folded) => OpCode::CurrencySign,
        _ => opcode,
    }
}

/// Tokenize one raw value. Surrounding whitespace is ignored; an empty or
/// blank value yields no tokens.
pub fn lex(value: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<(OpCode, String)> = None;
    for ch in value.trim().chars() {
        let class = char_class(ch);
        match current.as_mut() {
            Some((opcode, run)) if *opcode == class || (*opcode == OpCode::Text && ch == '.') => {
                run.push(ch);
            }
            _ => {
                if let Some((opcode, run)) = current.take() {
                    tokens.push(Token::new(refine(opcode, &run), run));
                }
                current = Some((class, ch.to_string()));
            }
        }
    }
    if let Some((opcode, run)) = current {
        tokens.push(Token::new(refine(opcode, &run), run));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opcodes(value: &str) -> Vec<OpCode> {
        lex(value).into_iter().map(|token| token.opcode).collect()
    }

    #[test]
    fn blank_values_have_no_tokens() {
        assert!(lex("").is_empty());
        assert!(lex("  \t ").is_empty());
    }

    #[test]
    fn runs_of_one_class_are_coalesced() {
        let tokens = lex(" 2020-09-18 ");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["2020", "-", "09", "-", "18"]);
        assert_eq!(
            opcodes("2020-09-18"),
            vec![
                OpCode::Number,
                OpCode::DateSeparator,
                OpCode::Number,
                OpCode::DateSeparator,
                OpCode::Number,
            ]
        );
    }

    #[test]
    fn separators_are_reclassified_by_locale_tables() {
        assert_eq!(
            opcodes("1,234.50"),
            vec![
                OpCode::Number,
                OpCode::NumberSeparator,
                OpCode::Number,
                OpCode::DateOrNumberSeparator,
                OpCode::Number,
            ]
        );
        assert_eq!(opcodes("12 %")[2], OpCode::PercentageSign);
        assert_eq!(opcodes("$12")[0], OpCode::CurrencySign);
        assert_eq!(opcodes("12 EUR")[2], OpCode::CurrencySign);
        assert_eq!(opcodes("12:30")[1], OpCode::DateSeparator);
    }

    #[test]
    fn dot_extends_a_text_run() {
        let tokens = lex("janv. 2020");
        assert_eq!(tokens[0], Token::new(OpCode::Text, "janv."));
        assert_eq!(tokens[1].opcode, OpCode::Space);
        assert_eq!(tokens[2], Token::new(OpCode::Number, "2020"));
    }

    #[test]
    fn unknown_structure_keeps_its_class() {
        assert_eq!(opcodes("a_b"), vec![OpCode::Text, OpCode::Punctuation, OpCode::Text]);
        assert_eq!(opcodes("x+"), vec![OpCode::Text, OpCode::Operator]);
        assert_eq!(opcodes("entrée"), vec![OpCode::Text]);
    }
}
