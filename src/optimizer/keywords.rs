//! Keyword extraction with stop-word filtering.
//!
//! Titles are tokenized, lowercased and stripped of punctuation; short
//! tokens and common English function words are discarded. What remains
//! is the ordered list of content-bearing words used for hashtag
//! building and for the keyword-preservation metric.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Common English function words and irregular verb forms.
///
/// Hand-curated; membership is checked after lowercasing, so the list
/// only carries lowercase entries.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old",
    "see", "two", "who", "boy", "did", "she", "use", "way", "will", "with", "any", "each", "man",
    "men", "own", "take", "than", "too", "upon", "very", "want", "well", "went", "were", "work",
    "year", "been", "call", "first", "food", "hand", "last", "part", "place", "same", "here",
    "home", "house", "large", "show", "small", "spell", "thing", "walk", "why", "about", "after",
    "again", "could", "every", "found", "great", "learn", "never", "often", "other", "said",
    "some", "sound", "still", "those", "under", "water", "where", "which", "would", "write",
    "right", "many", "think", "more", "number", "no", "people", "them", "these", "time", "up",
    "week", "what", "when", "while", "your", "a", "an", "of", "to", "in", "is", "on", "that",
    "by", "this", "have", "from", "or", "as", "be", "at", "so", "we", "he", "me", "my", "us",
    "they", "it", "do", "go", "if", "mr", "mrs", "say", "says", "got", "set", "make", "made",
    "put", "seem", "seems", "took", "come", "came", "saw", "know", "knew", "thought", "look",
    "looked", "give", "gave", "used", "find", "tell", "told", "become", "became", "leave",
    "left", "feel", "felt", "bring", "brought", "begin", "began", "keep", "kept", "hold",
    "held", "wrote", "stand", "stood", "hear", "heard", "let", "mean", "meant", "meet", "met",
    "run", "pay", "paid", "sit", "sat", "speak", "spoke", "lie", "lay", "lead", "led", "read",
    "grow", "grew", "fall", "fell", "send", "sent", "build", "built", "live", "lived", "hurt",
    "need", "cut", "burn", "burnt", "deal", "dealt", "hang", "hung", "shine", "shone",
    "stretch", "stretched", "speed", "sped", "spill", "spilt", "spin", "spun", "spread",
    "spring", "sprang", "steal", "stole", "stick", "stuck", "swear", "swore", "swing", "swung",
    "teach", "taught", "tear", "tore", "wake", "woke", "wear", "wore", "win", "won",
    "withdraw", "withdrew", "break", "broke",
];

/// Minimum token length (exclusive) for a token to count as a keyword.
const MIN_KEYWORD_LEN: usize = 3;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref STOP_WORD_SET: HashSet<&'static str> = STOP_WORDS.iter().copied().collect();
}

/// True if the (lowercase) token is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Extract the ordered list of content-bearing keywords from a title.
///
/// Tokens are lowercased, stripped of punctuation and kept when longer
/// than three characters and not in the stop-word set. Insertion order
/// follows the original token order; duplicate tokens are kept.
pub fn extract_keywords(title: &str) -> Vec<String> {
    let lowered = title.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .filter(|w| !is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_content_words_in_order() {
        let keywords = extract_keywords("5 tips for better sleep");
        assert_eq!(keywords, vec!["tips", "better", "sleep"]);
    }

    #[test]
    fn strips_punctuation_and_lowercases() {
        let keywords = extract_keywords("Cooking Pasta, The Italian Way!");
        assert_eq!(keywords, vec!["cooking", "pasta", "italian"]);
    }

    #[test]
    fn short_tokens_are_dropped() {
        // "tip" has exactly three characters and is excluded
        let keywords = extract_keywords("tip jars everywhere");
        assert_eq!(keywords, vec!["jars", "everywhere"]);
    }

    #[test]
    fn all_stop_words_yield_nothing() {
        assert!(extract_keywords("the and but for").is_empty());
        assert!(extract_keywords("which would where these").is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn duplicates_are_preserved() {
        let keywords = extract_keywords("pasta pasta pasta");
        assert_eq!(keywords, vec!["pasta", "pasta", "pasta"]);
    }

    #[test]
    fn stop_word_membership() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("withdraw"));
        assert!(!is_stop_word("pasta"));
    }
}
