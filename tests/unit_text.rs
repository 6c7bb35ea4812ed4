// Unit tests for the text pipeline: normalize -> score -> select.
//
// Property-style checks over a handful of representative inputs, plus the
// worked scenarios the pipeline is expected to reproduce exactly.

use tweetcloud::text::{
    normalize, score, score_texts, select_top, FrequencyTable, ScoredWord, SelectionOrder,
    StopwordSet,
};

const SAMPLES: &[&str] = &[
    "Hello world! http://x.co",
    "@bob hello again",
    "RT @news: BREAKING!!! Markets up 3% https://t.co/xyz #stocks",
    "Ünïcödé, emoji 🎉 and tabs\tand\nnewlines",
    "email me: someone@example.com or call 555-0100",
    "",
    "   ",
];

fn table(pairs: &[(&str, f64)]) -> FrequencyTable {
    pairs
        .iter()
        .map(|(w, s)| ScoredWord {
            word: w.to_string(),
            score: *s,
        })
        .collect()
}

// ============================================================
// Normalizer properties
// ============================================================

#[test]
fn normalized_output_is_lowercase_alphanumeric_and_single_spaced() {
    for input in SAMPLES {
        let out = normalize(input);
        assert!(
            out.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' '),
            "unexpected character in {out:?}"
        );
        assert!(!out.contains("  "), "double space in {out:?}");
        assert_eq!(out.trim(), out);
    }
}

#[test]
fn no_mention_survives() {
    for input in SAMPLES {
        assert!(!normalize(input).contains('@'));
    }
    assert_eq!(normalize("thanks @Alice and @bob99!"), "thanks and");
}

#[test]
fn normalize_is_idempotent() {
    for input in SAMPLES {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }
}

// ============================================================
// Scorer properties
// ============================================================

#[test]
fn score_equals_sqrt_len_times_count_without_stopwords() {
    let text = normalize("Rust rust RUST! go go tokio");
    let t = score(&text, &StopwordSet::empty());
    assert_eq!(t.get("rust"), Some(3.0 * 2.0));
    assert_eq!(t.get("go"), Some(2.0 * 2f64.sqrt()));
    assert_eq!(t.get("tokio"), Some(5f64.sqrt()));
}

#[test]
fn stopwords_never_appear_as_keys() {
    let stopwords = StopwordSet::english();
    for input in SAMPLES {
        let t = score(&normalize(input), &stopwords);
        for entry in t.iter() {
            assert!(!stopwords.contains(&entry.word), "{} leaked", entry.word);
        }
    }
}

#[test]
fn keys_are_non_empty_and_whitespace_free() {
    for input in SAMPLES {
        let t = score(&normalize(input), &StopwordSet::empty());
        for entry in t.iter() {
            assert!(!entry.word.is_empty());
            assert!(!entry.word.contains(char::is_whitespace));
        }
    }
}

#[test]
fn concatenation_order_does_not_change_scores() {
    let posts = ["Launching the new release today", "release notes are up"];
    let messages = ["did you see the release", "today is launch day"];
    let stopwords = StopwordSet::from_words(["the", "is", "are", "you"]);

    let forward = format!("{} {}", posts.join(" "), messages.join(" "));
    let backward = format!("{} {}", messages.join(" "), posts.join(" "));

    let a = score(&normalize(&forward), &stopwords);
    let b = score(&normalize(&backward), &stopwords);
    assert_eq!(a.to_map(), b.to_map());
}

#[test]
fn per_text_scoring_merges_to_the_same_table() {
    let texts: Vec<String> = SAMPLES.iter().map(|s| s.to_string()).collect();
    let stopwords = StopwordSet::from_words(["and"]);
    let merged = score_texts(&texts, &stopwords);
    let joined = score(&normalize(&texts.join(" ")), &stopwords);
    assert_eq!(merged.to_map(), joined.to_map());
}

// ============================================================
// Selector properties
// ============================================================

#[test]
fn selection_size_is_min_of_n_and_table_size() {
    let t = table(&[("a", 3.0), ("b", 1.0), ("c", 2.0)]);
    for n in 0..6 {
        for order in [SelectionOrder::LowestFirst, SelectionOrder::HighestFirst] {
            assert_eq!(select_top(&t, n, order).len(), n.min(t.len()));
        }
    }
}

#[test]
fn selecting_everything_keeps_scores() {
    let t = table(&[("a", 3.0), ("b", 1.0), ("c", 2.0)]);
    let all = select_top(&t, t.len(), SelectionOrder::LowestFirst);
    assert_eq!(all.to_map(), t.to_map());
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn scenario_mentions_urls_and_stopwords_removed() {
    let posts = ["Hello world! http://x.co", "@bob hello again"];
    let stopwords = StopwordSet::from_words(["hello"]);

    let t = score(&normalize(&posts.join(" ")), &stopwords);

    assert_eq!(t.len(), 2);
    assert_eq!(t.get("world"), Some(5f64.sqrt()));
    assert_eq!(t.get("again"), Some(5f64.sqrt()));
}

#[test]
fn scenario_empty_input_yields_empty_everything() {
    let t = score(&normalize(""), &StopwordSet::english());
    assert!(t.is_empty());
    for n in [0, 1, 50] {
        assert!(select_top(&t, n, SelectionOrder::HighestFirst).is_empty());
    }
}

#[test]
fn scenario_zero_selection_is_empty() {
    let t = score("plenty of words in this table", &StopwordSet::empty());
    assert!(!t.is_empty());
    assert!(select_top(&t, 0, SelectionOrder::LowestFirst).is_empty());
    assert!(select_top(&t, 0, SelectionOrder::HighestFirst).is_empty());
}
