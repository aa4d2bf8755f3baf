//! Token rows and the column/row aggregates the sniffers decide on.

use std::collections::BTreeSet;

use crate::{
    error::Sniff,
    frequency::Frequencies,
    lexer::{OpCode, Token, lex},
};

/// The tokens of one sample value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenRow {
    pub tokens: Vec<Token>,
}

impl TokenRow {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn lex(value: &str) -> Self {
        Self::new(lex(value))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> TokenSlice<'_> {
        TokenSlice::new(&self.tokens)
    }
}

/// A read-only view over part of a [`TokenRow`]. Trimming returns a shorter
/// view and never touches the underlying row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSlice<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenSlice<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'a, Token> {
        self.tokens.iter()
    }

    pub fn first(&self) -> Option<&'a Token> {
        self.tokens.first()
    }

    pub fn last(&self) -> Option<&'a Token> {
        self.tokens.last()
    }

    /// The single token of a one-token view.
    pub fn only(&self) -> Option<&'a Token> {
        match self.tokens {
            [token] => Some(token),
            _ => None,
        }
    }

    pub fn split_first(&self) -> Option<(&'a Token, TokenSlice<'a>)> {
        self.tokens
            .split_first()
            .map(|(head, rest)| (head, TokenSlice::new(rest)))
    }

    pub fn split_last(&self) -> Option<(&'a Token, TokenSlice<'a>)> {
        self.tokens
            .split_last()
            .map(|(tail, rest)| (tail, TokenSlice::new(rest)))
    }

    pub fn trim_start_matches<P>(&self, predicate: P) -> TokenSlice<'a>
    where
        P: Fn(&Token) -> bool,
    {
        let skip = self.tokens.iter().take_while(|t| predicate(t)).count();
        TokenSlice::new(&self.tokens[skip..])
    }

    pub fn trim_end_matches<P>(&self, predicate: P) -> TokenSlice<'a>
    where
        P: Fn(&Token) -> bool,
    {
        let skip = self.tokens.iter().rev().take_while(|t| predicate(t)).count();
        TokenSlice::new(&self.tokens[..self.tokens.len() - skip])
    }
}

/// Tokens found at one position across all rows of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfos {
    tokens: Vec<Token>,
    threshold: f64,
}

impl ColumnInfos {
    pub fn new(tokens: Vec<Token>, threshold: f64) -> Self {
        Self { tokens, threshold }
    }

    /// The `index`-th token of every row long enough to have one.
    pub fn at_position(rows: &[TokenRow], index: usize, threshold: f64) -> Self {
        let tokens = rows
            .iter()
            .filter_map(|row| row.tokens.get(index).cloned())
            .collect();
        Self::new(tokens, threshold)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Non-space tokens, or every token when the column is only whitespace.
    fn significant(&self) -> impl Iterator<Item = &Token> + Clone {
        let has_content = self.tokens.iter().any(|t| !t.is_space());
        self.tokens
            .iter()
            .filter(move |t| !has_content || !t.is_space())
    }

    pub fn unique_width(&self) -> Sniff<usize> {
        self.significant()
            .map(Token::width)
            .collect::<Frequencies<_>>()
            .pick_unique(self.threshold)
    }

    pub fn unique_opcode(&self) -> Sniff<OpCode> {
        self.significant()
            .map(|t| t.opcode)
            .collect::<Frequencies<_>>()
            .pick_unique(self.threshold)
    }

    pub fn unique_token(&self) -> Sniff<Token> {
        self.significant()
            .cloned()
            .collect::<Frequencies<_>>()
            .pick_unique(self.threshold)
    }

    /// Distinct case-folded texts.
    pub fn texts(&self) -> BTreeSet<String> {
        self.significant().map(|t| t.text.to_lowercase()).collect()
    }

    /// Raw text of the first significant token.
    pub fn representative_text(&self) -> &str {
        self.significant()
            .next()
            .map(|t| t.text.as_str())
            .unwrap_or_default()
    }

    /// Cut every token at a character offset; negative offsets count from the
    /// end of each token. Both halves keep the token's opcode.
    pub fn split_at(&self, offset: isize) -> (ColumnInfos, ColumnInfos) {
        let (left, right): (Vec<_>, Vec<_>) = self
            .tokens
            .iter()
            .map(|token| {
                let width = token.width();
                let at = if offset < 0 {
                    width.saturating_sub(offset.unsigned_abs())
                } else {
                    offset.unsigned_abs().min(width)
                };
                let byte_at = token
                    .text
                    .char_indices()
                    .nth(at)
                    .map_or(token.text.len(), |(idx, _)| idx);
                let (head, tail) = token.text.split_at(byte_at);
                (
                    Token::new(token.opcode, head),
                    Token::new(token.opcode, tail),
                )
            })
            .unzip();
        (
            ColumnInfos::new(left, self.threshold),
            ColumnInfos::new(right, self.threshold),
        )
    }
}

/// Row-level view of a sample: length distribution and end-of-row majority
/// predicates.
#[derive(Debug, Clone)]
pub struct RowsInfos<'a> {
    rows: &'a [TokenRow],
    lengths: Frequencies<usize>,
    threshold: f64,
}

impl<'a> RowsInfos<'a> {
    pub fn new(rows: &'a [TokenRow], threshold: f64) -> Self {
        Self {
            rows,
            lengths: rows.iter().map(TokenRow::len).collect(),
            threshold,
        }
    }

    pub fn rows(&self) -> &'a [TokenRow] {
        self.rows
    }

    pub fn unique_len(&self) -> Sniff<usize> {
        self.lengths.pick_unique(self.threshold)
    }

    pub fn column(&self, index: usize) -> ColumnInfos {
        ColumnInfos::at_position(self.rows, index, self.threshold)
    }

    fn majority<F>(&self, matching: F) -> bool
    where
        F: Fn(&TokenRow) -> bool,
    {
        let hits = self.rows.iter().filter(|row| matching(row)).count();
        hits as f64 > self.threshold * self.rows.len() as f64
    }

    /// True iff the first token of more than `threshold` of the rows
    /// satisfies `predicate`.
    pub fn first_matches<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Token) -> bool,
    {
        self.majority(|row| row.tokens.first().is_some_and(&predicate))
    }

    pub fn last_matches<P>(&self, predicate: P) -> bool
    where
        P: Fn(&Token) -> bool,
    {
        self.majority(|row| row.tokens.last().is_some_and(&predicate))
    }
}
