// Top-N selection over a frequency table.

use std::cmp::Ordering;
use std::str::FromStr;

use super::frequency::{FrequencyTable, ScoredWord};
use crate::error::CloudError;

/// Which end of the score ordering survives truncation.
///
/// `LowestFirst` is the default: it sorts ascending before cutting, which
/// keeps the N *least* prominent words. `count_words` callers get that
/// unless they ask otherwise. The renderer always asks for `HighestFirst`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionOrder {
    #[default]
    LowestFirst,
    HighestFirst,
}

impl FromStr for SelectionOrder {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowest" | "lowest-first" | "asc" | "ascending" => Ok(Self::LowestFirst),
            "highest" | "highest-first" | "desc" | "descending" => Ok(Self::HighestFirst),
            other => Err(CloudError::Configuration(format!(
                "unknown selection order '{other}' (expected lowest or highest)"
            ))),
        }
    }
}

/// Return a new table with at most `n` entries, ordered per `order`.
///
/// The sort is stable, so equal scores keep their first-seen order. The
/// input is left untouched. `n == 0` always yields an empty table.
pub fn select_top(table: &FrequencyTable, n: usize, order: SelectionOrder) -> FrequencyTable {
    let mut entries: Vec<&ScoredWord> = table.iter().collect();
    match order {
        SelectionOrder::LowestFirst => entries.sort_by(|a, b| {
            a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal)
        }),
        SelectionOrder::HighestFirst => entries.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        }),
    }
    entries.into_iter().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, f64)]) -> FrequencyTable {
        pairs
            .iter()
            .map(|(w, s)| ScoredWord {
                word: w.to_string(),
                score: *s,
            })
            .collect()
    }

    fn words(table: &FrequencyTable) -> Vec<&str> {
        table.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn lowest_first_keeps_smallest_scores() {
        let t = table(&[("big", 9.0), ("small", 1.0), ("mid", 4.0)]);
        let picked = select_top(&t, 2, SelectionOrder::LowestFirst);
        assert_eq!(words(&picked), vec!["small", "mid"]);
    }

    #[test]
    fn highest_first_keeps_largest_scores() {
        let t = table(&[("big", 9.0), ("small", 1.0), ("mid", 4.0)]);
        let picked = select_top(&t, 2, SelectionOrder::HighestFirst);
        assert_eq!(words(&picked), vec!["big", "mid"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let t = table(&[("b", 2.0), ("a", 2.0), ("c", 1.0), ("d", 2.0)]);
        let low = select_top(&t, 3, SelectionOrder::LowestFirst);
        assert_eq!(words(&low), vec!["c", "b", "a"]);
        let high = select_top(&t, 2, SelectionOrder::HighestFirst);
        assert_eq!(words(&high), vec!["b", "a"]);
    }

    #[test]
    fn zero_selects_nothing() {
        let t = table(&[("x", 1.0)]);
        assert!(select_top(&t, 0, SelectionOrder::LowestFirst).is_empty());
        assert!(select_top(&t, 0, SelectionOrder::HighestFirst).is_empty());
    }

    #[test]
    fn large_n_returns_everything_unchanged() {
        let t = table(&[("x", 1.5), ("y", 0.5)]);
        let picked = select_top(&t, 10, SelectionOrder::LowestFirst);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.to_map(), t.to_map());
        // input untouched
        assert_eq!(words(&t), vec!["x", "y"]);
    }

    #[test]
    fn parses_order_names() {
        assert_eq!(
            "highest".parse::<SelectionOrder>().unwrap(),
            SelectionOrder::HighestFirst
        );
        assert_eq!(
            "ASC".parse::<SelectionOrder>().unwrap(),
            SelectionOrder::LowestFirst
        );
        assert!("sideways".parse::<SelectionOrder>().is_err());
        assert_eq!(SelectionOrder::default(), SelectionOrder::LowestFirst);
    }
}
