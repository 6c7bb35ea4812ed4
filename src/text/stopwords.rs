// Stop word set: words that never make it into a frequency table.
//
// Built once from the `stop-words` lists and then handed to the scorer
// explicitly, so tests (and callers with their own vocabulary) can swap in
// any set they like.

use std::collections::HashSet;
use std::str::FromStr;

use stop_words::{get, LANGUAGE};

use crate::error::CloudError;

/// Languages whose stop word lists can be combined into a [`StopwordSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwordLanguage {
    English,
    Arabic,
    French,
    German,
    Spanish,
    Italian,
    Portuguese,
}

impl StopwordLanguage {
    fn list(self) -> Vec<String> {
        let language = match self {
            Self::English => LANGUAGE::English,
            Self::Arabic => LANGUAGE::Arabic,
            Self::French => LANGUAGE::French,
            Self::German => LANGUAGE::German,
            Self::Spanish => LANGUAGE::Spanish,
            Self::Italian => LANGUAGE::Italian,
            Self::Portuguese => LANGUAGE::Portuguese,
        };
        get(language)
    }
}

impl FromStr for StopwordLanguage {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "arabic" | "ar" => Ok(Self::Arabic),
            "french" | "fr" => Ok(Self::French),
            "german" | "de" => Ok(Self::German),
            "spanish" | "es" => Ok(Self::Spanish),
            "italian" | "it" => Ok(Self::Italian),
            "portuguese" | "pt" => Ok(Self::Portuguese),
            other => Err(CloudError::Configuration(format!(
                "unknown stop word language '{other}'"
            ))),
        }
    }
}

/// A case-normalized set of stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// An empty set: nothing gets filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The English list from the `stop-words` crate.
    pub fn english() -> Self {
        Self::from_languages(&[StopwordLanguage::English])
    }

    /// Union of the lists for every given language.
    pub fn from_languages(languages: &[StopwordLanguage]) -> Self {
        let mut set = Self::empty();
        for language in languages {
            set.extend(language.list());
        }
        set
    }

    /// Build a set from arbitrary words (lower-cased on the way in).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        set.extend(words);
        set
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // Tokens from the normalizer are already lowercase; only pay for the
        // allocation when they are not.
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
