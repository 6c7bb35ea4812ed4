// Length-weighted word frequency scoring.
//
// Every non-stop-word token adds sqrt(len) to its word's score, which favors
// longer words without letting length dominate linearly.

use std::collections::HashMap;

use super::stopwords::StopwordSet;

/// One entry of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub word: String,
    pub score: f64,
}

/// Word -> score mapping that remembers first-seen order.
///
/// Insertion order is what breaks ties when the table is later sorted, so it
/// is kept explicitly instead of relying on hash order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<ScoredWord>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `word`'s score, inserting it at 0 on first sight.
    pub fn add(&mut self, word: &str, amount: f64) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].score += amount,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push(ScoredWord {
                    word: word.to_string(),
                    score: amount,
                });
            }
        }
    }

    /// Sum another table into this one, word by word.
    ///
    /// Associative and commutative in the scores, so partial tables built
    /// from independent texts can be combined in any grouping.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for entry in &other.entries {
            self.add(&entry.word, entry.score);
        }
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.index.get(word).map(|&i| self.entries[i].score)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredWord> {
        self.entries.iter()
    }

    /// Highest score in the table, or 0.0 when empty.
    pub fn max_score(&self) -> f64 {
        self.entries.iter().map(|e| e.score).fold(0.0, f64::max)
    }

    /// Flatten into a plain map (order is lost).
    pub fn to_map(&self) -> HashMap<String, f64> {
        self.entries
            .iter()
            .map(|e| (e.word.clone(), e.score))
            .collect()
    }
}

impl FromIterator<ScoredWord> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = ScoredWord>>(iter: T) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.add(&entry.word, entry.score);
        }
        table
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a ScoredWord;
    type IntoIter = std::slice::Iter<'a, ScoredWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Score already-normalized text.
///
/// Splits on whitespace, skips stop words and adds `sqrt(token length)` per
/// remaining occurrence. Pure digits count like any other token.
pub fn score(normalized: &str, stopwords: &StopwordSet) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for token in normalized.split_whitespace() {
        if stopwords.contains(token) {
            continue;
        }
        table.add(token, (token.chars().count() as f64).sqrt());
    }
    table
}

/// Normalize and score each text on its own, then merge the partial tables.
///
/// Gives the same scores as scoring the space-joined blob; this is the shape
/// to use if the per-text work is ever spread across threads.
pub fn score_texts<S: AsRef<str>>(texts: &[S], stopwords: &StopwordSet) -> FrequencyTable {
    texts
        .iter()
        .map(|text| score(&super::normalize::normalize(text.as_ref()), stopwords))
        .fold(FrequencyTable::new(), |mut acc, partial| {
            acc.merge(&partial);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_sqrt_len_times_occurrences() {
        let table = score("rust go rust rust", &StopwordSet::empty());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("rust"), Some(3.0 * 4f64.sqrt()));
        assert_eq!(table.get("go"), Some(2f64.sqrt()));
    }

    #[test]
    fn stop_words_are_never_keys() {
        let stopwords = StopwordSet::from_words(["the", "a"]);
        let table = score("the cat and a hat the end", &stopwords);
        assert!(!table.contains("the"));
        assert!(!table.contains("a"));
        assert!(table.contains("cat"));
    }

    #[test]
    fn digits_are_scored() {
        let table = score("2024 2024", &StopwordSet::empty());
        assert_eq!(table.get("2024"), Some(4.0));
    }

    #[test]
    fn keeps_first_seen_order() {
        let table = score("beta alpha beta gamma", &StopwordSet::empty());
        let words: Vec<&str> = table.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn empty_text_scores_empty() {
        assert!(score("", &StopwordSet::empty()).is_empty());
    }

    #[test]
    fn merge_sums_shared_words() {
        let mut a = score("one two", &StopwordSet::empty());
        let b = score("two three", &StopwordSet::empty());
        a.merge(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.get("two"), Some(2.0 * 3f64.sqrt()));
    }

    #[test]
    fn score_texts_matches_joined_blob() {
        let texts = vec![
            "Shipping a new crate today!".to_string(),
            "The crate ships with docs @friend".to_string(),
        ];
        let stopwords = StopwordSet::from_words(["the", "a", "with"]);
        let merged = score_texts(&texts, &stopwords);
        let joined = score(
            &super::super::normalize::normalize(&texts.join(" ")),
            &stopwords,
        );
        assert_eq!(merged.to_map(), joined.to_map());
    }

    #[test]
    fn max_score_of_empty_is_zero() {
        assert_eq!(FrequencyTable::new().max_score(), 0.0);
    }
}
