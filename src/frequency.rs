//! Frequency tables and the two agreement rules built on them.
//!
//! Every decision where a column has to "agree" on something (a width, an
//! opcode, a separator, a row length) goes through [`Frequencies::pick_unique`]
//! or [`Frequencies::pick_top_n`]. Ties are broken by the natural order of the
//! values so that decisions never depend on insertion or hashing order.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::error::{Sniff, SniffError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies<T: Ord> {
    counts: BTreeMap<T, usize>,
    total: usize,
}

impl<T: Ord> Default for Frequencies<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T: Ord + Clone> Frequencies<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.counts.keys()
    }

    /// Values ordered by descending count, then ascending value.
    pub fn most_common(&self) -> Vec<(T, usize)> {
        self.counts
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }

    /// The most frequent value, provided its share of the total is strictly
    /// greater than `threshold`.
    pub fn pick_unique(&self, threshold: f64) -> Sniff<T> {
        let (value, count) = self
            .most_common()
            .into_iter()
            .next()
            .ok_or(SniffError::Empty)?;
        if count as f64 > threshold * self.total as f64 {
            Ok(value)
        } else {
            Err(SniffError::Ambiguous {
                top: count,
                total: self.total,
            })
        }
    }

    /// Up to `n` values, most frequent first. With more than `n` distinct
    /// values the `n` most frequent must together exceed `threshold`.
    pub fn pick_top_n(&self, n: usize, threshold: f64) -> Sniff<Vec<T>> {
        let ranked = self.most_common();
        if ranked.len() <= n {
            return Ok(ranked.into_iter().map(|(value, _)| value).collect());
        }
        let top = ranked.into_iter().take(n).collect::<Vec<_>>();
        let covered = top.iter().map(|(_, count)| count).sum::<usize>();
        if covered as f64 > threshold * self.total as f64 {
            Ok(top.into_iter().map(|(value, _)| value).collect())
        } else {
            Err(SniffError::Ambiguous {
                top: covered,
                total: self.total,
            })
        }
    }
}

impl<T: Ord + Clone> FromIterator<T> for Frequencies<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut frequencies = Frequencies::new();
        for value in iter {
            frequencies.record(value);
        }
        frequencies
    }
}
