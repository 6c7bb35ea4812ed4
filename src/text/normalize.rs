// Text normalization: turns a blob of raw post/message text into a single
// line of lowercase, space-separated ASCII alphanumeric tokens.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Matches the three kinds of noise stripped before tokenizing.
///
/// Alternation order matters: a mention or URL has to win over the
/// single-character class, otherwise `http://x.co` would survive as the
/// tokens `http x co`. Runs on already-lowercased text.
fn noise_pattern() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| {
        Regex::new(r"(@[a-z0-9]+)|(\w+://\S+)|([^0-9a-z\s])")
            .expect("noise pattern is a valid regex")
    })
}

/// Normalize a text blob for tokenization.
///
/// Lowercases, removes `@mentions`, URLs and every character that is not an
/// ASCII letter, digit or whitespace, then collapses whitespace runs into
/// single spaces and trims both ends. Removed spans become a space, so
/// `"don't"` yields the two tokens `don t`.
///
/// Total over all input: the empty string maps to the empty string, and the
/// output is a fixed point (`normalize(&normalize(x)) == normalize(x)`).
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = noise_pattern().replace_all(&lowered, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join a collection of raw texts into one blob, separated by spaces.
///
/// The separator keeps the last word of one item from fusing with the first
/// word of the next.
pub fn join_texts<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
