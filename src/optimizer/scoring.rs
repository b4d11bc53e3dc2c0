//! Readability and engagement signal scoring.
//!
//! All signals are independent and total over their input domain:
//! degenerate titles (empty, no keywords) score zero instead of
//! erroring. The engagement score combines the signals into a single
//! value clamped to [0, 100].

use super::keywords::extract_keywords;
use super::platform::Platform;
use lazy_static::lazy_static;
use regex::Regex;

/// Power words counted by the canonical scorer (case-insensitive
/// substring matches).
const SCORED_POWER_WORDS: &[&str] = &[
    "proven",
    "ultimate",
    "secret",
    "shocking",
    "breakthrough",
    "instant",
    "guaranteed",
    "exclusive",
    "master",
    "essential",
    "complete",
    "definitive",
    "new",
    "free",
    "best",
    "top",
    "amazing",
];

/// Emotional triggers counted by the canonical scorer.
const SCORED_TRIGGERS: &[&str] = &[
    "surprising",
    "shocking",
    "incredible",
    "amazing",
    "unbelievable",
    "mind-blowing",
    "extraordinary",
    "astounding",
    "phenomenal",
];

/// Wider word lists used only by the legacy scoring profile.
const LEGACY_POWER_WORDS: &[&str] = &[
    "best",
    "top",
    "ultimate",
    "complete",
    "essential",
    "proven",
    "effective",
    "powerful",
    "game-changing",
    "revolutionary",
    "secret",
    "exclusive",
    "limited",
    "new",
    "free",
    "amazing",
    "incredible",
    "shocking",
    "mind-blowing",
    "unbelievable",
    "advanced",
    "simple",
    "easy",
    "quick",
    "fast",
    "perfect",
    "awesome",
    "fantastic",
];

const LEGACY_TRIGGERS: &[&str] = &[
    "surprising",
    "shocking",
    "incredible",
    "amazing",
    "unbelievable",
    "mind-blowing",
    "extraordinary",
    "astounding",
    "phenomenal",
    "life-changing",
    "eye-opening",
    "groundbreaking",
    "revolutionary",
    "stunning",
    "astonishing",
    "remarkable",
];

/// Optimal-length table used only by the legacy profile; it diverges
/// from the platform profiles on X and Instagram.
fn legacy_optimal_length(platform: Platform) -> usize {
    match platform {
        Platform::X => 70,
        Platform::YouTube => 60,
        Platform::Instagram => 125,
        Platform::Facebook => 60,
        Platform::Other => 70,
    }
}

const BASE_SCORE: f64 = 50.0;
const MIN_DENSITY_TOKEN_LEN: usize = 2;

lazy_static! {
    static ref SYLLABLE_SUFFIX: Regex = Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").unwrap();
    static ref VOWEL_GROUP: Regex = Regex::new(r"[aeiouy]{1,2}").unwrap();
}

/// Which engagement weighting scheme to apply.
///
/// `Standard` is the canonical profile; `Legacy` is an alternative
/// weighting kept for reference comparisons only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringProfile {
    #[default]
    Standard,
    Legacy,
}

/// Approximate the syllable count of a single word.
///
/// Reduced vowel-group heuristic: collapse silent trailing e/ed/es,
/// drop a leading y, count vowel-group runs of up to two vowels, and
/// add one for a trailing "le" not preceded by a vowel.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let stripped = SYLLABLE_SUFFIX.replace(&word, "");
    let stripped = stripped.strip_prefix('y').unwrap_or(&stripped);
    let groups = VOWEL_GROUP.find_iter(stripped).count();
    let count = if groups == 0 { 1 } else { groups };

    if stripped.len() > 2 && stripped.ends_with("le") {
        let before_le = stripped.chars().rev().nth(2);
        if !matches!(before_le, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return count + 1;
        }
    }

    count.max(1)
}

/// Flesch-Reading-Ease style readability score for a title, in [0, 100].
///
/// Titles are treated as a single sentence; titles longer than ten
/// words take a flat penalty for scan cost. An empty title scores 0.
pub fn readability(title: &str) -> i32 {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }

    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let word_count = words.len() as f64;
    let avg_syllables = syllables as f64 / word_count;

    let mut score = 206.835 - 1.015 * word_count - 84.6 * avg_syllables;
    if words.len() > 10 {
        score -= 10.0;
    }

    (score.round() as i32).clamp(0, 100)
}

/// Count canonical power words present in the title.
pub fn count_power_words(title: &str) -> usize {
    let lower = title.to_lowercase();
    SCORED_POWER_WORDS.iter().filter(|w| lower.contains(*w)).count()
}

/// Count canonical emotional triggers present in the title.
pub fn count_emotional_triggers(title: &str) -> usize {
    let lower = title.to_lowercase();
    SCORED_TRIGGERS.iter().filter(|w| lower.contains(*w)).count()
}

/// Fraction of the original title's keywords still present in the
/// optimized title. Returns 0.0 when the original has no keywords.
pub fn keyword_preservation(original: &str, optimized: &str) -> f64 {
    let keywords = extract_keywords(original);
    if keywords.is_empty() {
        return 0.0;
    }

    let optimized_lower = optimized.to_lowercase();
    let preserved = keywords
        .iter()
        .filter(|k| optimized_lower.contains(k.as_str()))
        .count();
    preserved as f64 / keywords.len() as f64
}

/// Percentage of original whitespace tokens (longer than two chars)
/// that reappear verbatim, case-insensitively, among the optimized
/// tokens. Returns 0.0 for an empty original.
pub fn keyword_density(original: &str, optimized: &str) -> f64 {
    let original_lower = original.to_lowercase();
    let optimized_lower = optimized.to_lowercase();
    let original_words: Vec<&str> = original_lower.split_whitespace().collect();
    if original_words.is_empty() {
        return 0.0;
    }
    let optimized_words: Vec<&str> = optimized_lower.split_whitespace().collect();

    let matches = original_words
        .iter()
        .filter(|w| w.chars().count() > MIN_DENSITY_TOKEN_LEN && optimized_words.contains(w))
        .count();
    matches as f64 / original_words.len() as f64 * 100.0
}

/// Combined engagement score in [0, 100].
pub fn engagement_score(
    title: &str,
    original: &str,
    platform: Platform,
    profile: ScoringProfile,
) -> i32 {
    match profile {
        ScoringProfile::Standard => standard_engagement_score(title, original, platform),
        ScoringProfile::Legacy => legacy_engagement_score(title, platform),
    }
}

fn standard_engagement_score(title: &str, original: &str, platform: Platform) -> i32 {
    let mut score = BASE_SCORE;

    // power words: 5 points each, capped at 15
    score += (count_power_words(title) as f64 * 5.0).min(15.0);

    // emotional triggers: 7 points each, capped at 21
    score += (count_emotional_triggers(title) as f64 * 7.0).min(21.0);

    // question format
    if title.ends_with('?') {
        score += 10.0;
    }

    // numeral presence
    if title.chars().any(|c| c.is_ascii_digit()) {
        score += 8.0;
    }

    // proximity to the platform's optimal length
    let optimal = platform.profile().optimal_length as f64;
    let diff = (title.chars().count() as f64 - optimal).abs();
    if diff <= 10.0 {
        score += 10.0 - diff;
    } else {
        score -= (diff / 5.0).min(15.0);
    }

    // keyword preservation: up to 5 points
    score += keyword_preservation(original, title) * 5.0;

    (score.round() as i32).clamp(0, 100)
}

fn legacy_engagement_score(title: &str, platform: Platform) -> i32 {
    let mut score = BASE_SCORE;
    let lower = title.to_lowercase();
    let len = title.chars().count() as f64;

    // stepped length bonus against the legacy optimal-length table
    let diff = (len - legacy_optimal_length(platform) as f64).abs();
    if diff <= 5.0 {
        score += 15.0;
    } else if diff <= 10.0 {
        score += 10.0;
    } else if diff <= 20.0 {
        score += 5.0;
    } else {
        score -= (diff / 3.0).min(15.0);
    }

    let power_words = LEGACY_POWER_WORDS.iter().filter(|w| lower.contains(*w)).count();
    score += (power_words as f64 * 3.0).min(15.0);

    let triggers = LEGACY_TRIGGERS.iter().filter(|w| lower.contains(*w)).count();
    score += (triggers as f64 * 4.0).min(16.0);

    if title.ends_with('?') {
        score += 8.0;
    }
    if title.chars().any(|c| c.is_ascii_digit()) {
        score += 6.0;
    }

    // moderate capitalization rewarded, shouting penalized
    let total_chars = title.chars().count();
    if total_chars > 0 {
        let caps = title.chars().filter(|c| c.is_ascii_uppercase()).count();
        let ratio = caps as f64 / total_chars as f64;
        if ratio > 0.0 && ratio <= 0.3 {
            score += (ratio * 20.0).min(5.0);
        } else if ratio > 0.3 {
            score -= 5.0;
        }
    }

    // light punctuation rewarded, clutter penalized
    let specials = title
        .chars()
        .filter(|c| "!@#$%^&*(),.?\":{}|<>".contains(*c))
        .count();
    if specials > 0 && specials <= 2 {
        score += (specials as f64 * 2.5).min(5.0);
    } else if specials > 2 {
        score -= (specials as f64).min(10.0);
    }

    score += legacy_platform_bonus(title, &lower, platform);

    (score.round() as i32).clamp(0, 100)
}

fn legacy_platform_bonus(title: &str, lower: &str, platform: Platform) -> f64 {
    let bonus_applies = match platform {
        Platform::X => title.chars().count() < 100 && title.contains('#'),
        Platform::YouTube => {
            title.chars().any(|c| c.is_ascii_digit())
                || lower.contains("secret")
                || lower.contains("hidden")
        }
        Platform::Instagram => title.chars().any(is_emoji),
        Platform::Facebook => {
            title.ends_with('?') || LEGACY_TRIGGERS.iter().any(|t| lower.contains(t))
        }
        Platform::Other => false,
    };
    if bonus_applies {
        5.0
    } else {
        0.0
    }
}

fn is_emoji(c: char) -> bool {
    matches!(c,
        '\u{1F300}'..='\u{1F5FF}'
        | '\u{1F600}'..='\u{1F64F}'
        | '\u{1F680}'..='\u{1F6FF}'
        | '\u{1F1E0}'..='\u{1F1FF}'
        | '\u{2B50}'
        | '\u{2728}'
        | '\u{1F4AF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syllable_counts_for_common_words() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("sleep"), 1);
        assert_eq!(count_syllables("better"), 2);
        assert_eq!(count_syllables("banana"), 3);
    }

    #[test]
    fn syllable_silent_e_is_collapsed() {
        // "make" -> "mak" -> one vowel group
        assert_eq!(count_syllables("make"), 1);
        // "baked" -> "bak" -> one vowel group
        assert_eq!(count_syllables("baked"), 1);
    }

    #[test]
    fn syllable_trailing_le_adds_one() {
        // consonant + "le" endings get the extra syllable on top of the
        // two counted vowel groups
        assert_eq!(count_syllables("table"), 3);
        assert_eq!(count_syllables("little"), 3);
        // vowel + "le" does not
        assert_eq!(count_syllables("male"), 2);
    }

    #[test]
    fn readability_empty_is_zero() {
        assert_eq!(readability(""), 0);
        assert_eq!(readability("   "), 0);
    }

    #[test]
    fn readability_stays_in_bounds() {
        assert!(readability("cat") <= 100);
        let long = "extraordinarily complicated multisyllabic terminology ".repeat(5);
        let score = readability(&long);
        assert!((0..=100).contains(&score));
    }

    #[test]
    fn readability_penalizes_very_long_titles() {
        let ten = "better butter copper dinner fellow garden hammer jolly kitten lemon";
        let eleven = "better butter copper dinner fellow garden hammer jolly kitten lemon window";
        // the eleventh word costs the flat penalty on top of the
        // per-word term
        assert!(readability(eleven) < readability(ten));
    }

    #[test]
    fn power_and_trigger_counts_are_case_insensitive() {
        assert_eq!(count_power_words("The ULTIMATE Secret Guide"), 2);
        assert_eq!(count_emotional_triggers("Shocking and Surprising news"), 2);
        assert_eq!(count_power_words("plain words"), 0);
    }

    #[test]
    fn preservation_of_identity_is_full() {
        let title = "cooking pasta tonight";
        assert_eq!(keyword_preservation(title, title), 1.0);
    }

    #[test]
    fn preservation_without_keywords_is_zero() {
        assert_eq!(keyword_preservation("the and but for", "anything"), 0.0);
        assert_eq!(keyword_preservation("", "anything"), 0.0);
    }

    #[test]
    fn preservation_is_fractional() {
        let ratio = keyword_preservation("cooking pasta tonight", "cooking rice tonight");
        assert!((ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn density_counts_verbatim_token_matches() {
        // "cook" and "pasta" reappear; "how" and "to" are too short to
        // count, but still sit in the denominator
        let density = keyword_density("how to cook pasta", "cook pasta now");
        assert!((density - 50.0).abs() < 1e-9);
    }

    #[test]
    fn density_of_empty_original_is_zero() {
        assert_eq!(keyword_density("", "anything"), 0.0);
    }

    #[test]
    fn engagement_is_bounded_for_arbitrary_input() {
        let titles = [
            "",
            "?",
            "SHOUTING VERY LOUDLY!!!",
            "Ultimate Proven Secret Best New Free Top Amazing Complete guide?",
            &"x".repeat(500),
        ];
        for title in titles {
            for profile in [ScoringProfile::Standard, ScoringProfile::Legacy] {
                let score = engagement_score(title, "original words here", Platform::YouTube, profile);
                assert!((0..=100).contains(&score), "{} out of bounds for {:?}", score, profile);
            }
        }
    }

    #[test]
    fn engagement_rewards_question_and_digit() {
        let base = engagement_score("cooking pasta fast", "cooking pasta fast", Platform::Other, ScoringProfile::Standard);
        let question = engagement_score("cooking pasta fast?", "cooking pasta fast", Platform::Other, ScoringProfile::Standard);
        assert!(question > base);
    }

    #[test]
    fn engagement_zero_keyword_original_contributes_nothing() {
        // all-stop-word original: preservation factor adds 0
        let with_keywords = engagement_score("great pasta tips", "great pasta tips", Platform::Other, ScoringProfile::Standard);
        let without = engagement_score("great pasta tips", "the and but for", Platform::Other, ScoringProfile::Standard);
        assert_eq!(with_keywords - without, 5);
    }

    #[test]
    fn legacy_profile_differs_from_standard() {
        let title = "🔥 Amazing Pasta Secrets Revealed Here Today";
        let standard = engagement_score(title, title, Platform::Instagram, ScoringProfile::Standard);
        let legacy = engagement_score(title, title, Platform::Instagram, ScoringProfile::Legacy);
        // the two weighting schemes are intentionally not merged
        assert_ne!(standard, legacy);
    }
}
