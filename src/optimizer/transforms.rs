//! Heuristic title transforms.
//!
//! Each transform is a pure function from a title (plus parameters) to a
//! new title. They are total: empty or degenerate input falls through as
//! a no-op or a minimal insertion, never an error. Randomized choices go
//! through the injected [`Picker`].

use super::picker::Picker;

/// Categorized power words used for insertion.
pub const POWER_WORD_CATEGORIES: &[&[&str]] = &[
    // descriptive
    &["Ultimate", "Complete", "Comprehensive", "Essential", "Definitive", "Advanced"],
    // benefit
    &["Proven", "Effective", "Powerful", "Game-changing", "Revolutionary", "Breakthrough"],
    // urgency
    &["Exclusive", "Limited", "Rare", "Secret", "Insider", "Premium"],
    // action
    &["Instant", "Quick", "Easy", "Simple", "Effortless", "Immediate"],
];

/// Short flat list used only for presence detection (case-sensitive).
///
/// Narrower than the categorized insertion table above: a title
/// carrying e.g. "Comprehensive" is not detected and can receive a
/// second power word.
const POWER_WORD_MARKERS: &[&str] = &[
    "New", "Free", "Best", "Top", "Ultimate", "Complete", "Exclusive", "Proven", "Instant",
    "Amazing",
];

/// Emotional trigger words used for insertion.
pub const EMOTIONAL_TRIGGERS: &[&str] = &[
    "Surprising",
    "Shocking",
    "Incredible",
    "Mind-blowing",
    "Unbelievable",
    "Stunning",
    "Astonishing",
    "Remarkable",
    "Extraordinary",
    "Phenomenal",
    "Life-changing",
    "Eye-opening",
    "Groundbreaking",
    "Revolutionary",
];

/// Short list used only for presence detection (case-sensitive).
const EMOTIONAL_TRIGGER_MARKERS: &[&str] =
    &["Surprising", "Shocking", "Incredible", "Mind-blowing", "Unbelievable"];

/// Small numerals favored by listicle titles.
const NUMERALS: &[&str] = &["5", "7", "10", "3"];

/// Emoji palette for visual-first platforms.
const EMOJIS: &[&str] = &["🔥", "⭐", "💡", "🚀", "🎯", "✨", "🌟", "💯"];

/// Minimum token length (exclusive) for a token to become a hashtag.
const MIN_HASHTAG_TOKEN_LEN: usize = 3;

/// True if the title contains one of the canonical power-word markers.
pub fn has_power_word(title: &str) -> bool {
    POWER_WORD_MARKERS.iter().any(|w| title.contains(w))
}

/// True if the title contains one of the canonical trigger markers.
pub fn has_emotional_trigger(title: &str) -> bool {
    EMOTIONAL_TRIGGER_MARKERS.iter().any(|w| title.contains(w))
}

/// Append up to `count` hashtags built from the first `count` whitespace
/// tokens longer than three characters, in their original order. When
/// fewer tokens qualify, fewer hashtags are appended.
pub fn add_hashtags(title: &str, count: usize) -> String {
    let words: Vec<&str> = title.split_whitespace().collect();
    let hashtags: Vec<String> = words
        .iter()
        .take(count)
        .filter(|w| w.chars().count() > MIN_HASHTAG_TOKEN_LEN)
        .map(|w| format!("#{}", w))
        .collect();

    if hashtags.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, hashtags.join(" "))
    }
}

/// Prepend up to `count` power words drawn from the categorized table,
/// skipping insertion whenever a marker word is already present.
pub fn add_power_words(title: &str, count: usize, picker: &dyn Picker) -> String {
    let mut result = title.to_string();
    for _ in 0..count {
        if !has_power_word(&result) {
            let category = POWER_WORD_CATEGORIES[picker.pick_index(POWER_WORD_CATEGORIES.len())];
            let word = category[picker.pick_index(category.len())];
            result = format!("{} {}", word, result);
        }
    }
    result
}

/// Prepend one emotional trigger unless a marker trigger is present.
pub fn add_emotional_trigger(title: &str, picker: &dyn Picker) -> String {
    if has_emotional_trigger(title) {
        return title.to_string();
    }
    let trigger = EMOTIONAL_TRIGGERS[picker.pick_index(EMOTIONAL_TRIGGERS.len())];
    format!("{} {}", trigger, title)
}

/// Prepend a small numeral unless the title already contains a digit.
pub fn add_numeral(title: &str, picker: &dyn Picker) -> String {
    if title.chars().any(|c| c.is_ascii_digit()) {
        return title.to_string();
    }
    let numeral = NUMERALS[picker.pick_index(NUMERALS.len())];
    format!("{} {}", numeral, title)
}

/// Append ` [<year>]` unless the year string already occurs. Idempotent.
pub fn add_year_bracket(title: &str, year: i32) -> String {
    let year_str = year.to_string();
    if title.contains(&year_str) {
        return title.to_string();
    }
    format!("{} [{}]", title, year_str)
}

/// Uppercase the first two whitespace tokens as a crude emphasis signal.
pub fn front_load_keywords(title: &str) -> String {
    let mut words: Vec<String> = title.split_whitespace().map(|w| w.to_string()).collect();
    if words.len() >= 2 {
        words[0] = words[0].to_uppercase();
        words[1] = words[1].to_uppercase();
    }
    words.join(" ")
}

/// Prepend one emoji from the fixed palette.
pub fn add_emoji(title: &str, picker: &dyn Picker) -> String {
    let emoji = EMOJIS[picker.pick_index(EMOJIS.len())];
    format!("{} {}", emoji, title)
}

/// Append `?` unless the title already ends with one. Idempotent.
pub fn convert_to_question(title: &str) -> String {
    if title.ends_with('?') {
        title.to_string()
    } else {
        format!("{}?", title)
    }
}

/// Lowercase the whole title, then capitalize the first character of
/// each space-delimited token. Idempotent.
pub fn title_case(title: &str) -> String {
    title
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::picker::SequencePicker;

    #[test]
    fn hashtags_come_from_leading_long_tokens() {
        assert_eq!(add_hashtags("great pasta recipes", 2), "great pasta recipes #great #pasta");
        // "how" and "to" are too short; only the qualifying token within
        // the first three is used
        assert_eq!(add_hashtags("how to cook pasta", 3), "how to cook pasta #cook");
    }

    #[test]
    fn hashtags_noop_when_nothing_qualifies() {
        assert_eq!(add_hashtags("how to do it", 2), "how to do it");
        assert_eq!(add_hashtags("", 3), "");
    }

    #[test]
    fn power_word_prepends_once() {
        let picker = SequencePicker::zeros();
        let result = add_power_words("cook pasta", 1, &picker);
        assert_eq!(result, "Ultimate cook pasta");
    }

    #[test]
    fn power_word_skips_when_marker_present() {
        let picker = SequencePicker::zeros();
        assert_eq!(add_power_words("Best pasta tips", 1, &picker), "Best pasta tips");
    }

    #[test]
    fn power_word_detection_is_asymmetric() {
        // "Comprehensive" comes from the insertion table but is not a
        // marker, so a second insertion still happens
        let picker = SequencePicker::new(vec![0, 2]);
        let result = add_power_words("Comprehensive pasta guide", 1, &picker);
        assert_eq!(result, "Comprehensive Comprehensive pasta guide");
    }

    #[test]
    fn emotional_trigger_prepends_unless_present() {
        let picker = SequencePicker::zeros();
        assert_eq!(add_emotional_trigger("cook pasta", &picker), "Surprising cook pasta");
        assert_eq!(
            add_emotional_trigger("Shocking pasta facts", &picker),
            "Shocking pasta facts"
        );
    }

    #[test]
    fn numeral_noop_on_existing_digit() {
        let picker = SequencePicker::zeros();
        assert_eq!(add_numeral("5 tips for sleep", &picker), "5 tips for sleep");
        assert_eq!(add_numeral("tips for sleep", &picker), "5 tips for sleep");
    }

    #[test]
    fn year_bracket_is_idempotent() {
        let once = add_year_bracket("sleep tips", 2026);
        assert_eq!(once, "sleep tips [2026]");
        assert_eq!(add_year_bracket(&once, 2026), once);
    }

    #[test]
    fn year_bracket_skips_existing_year_anywhere() {
        assert_eq!(add_year_bracket("best of 2026 roundup", 2026), "best of 2026 roundup");
    }

    #[test]
    fn front_load_uppercases_first_two_words() {
        assert_eq!(front_load_keywords("cook pasta fast"), "COOK PASTA fast");
        // single word stays untouched
        assert_eq!(front_load_keywords("pasta"), "pasta");
    }

    #[test]
    fn emoji_prepends_from_palette() {
        let picker = SequencePicker::zeros();
        assert_eq!(add_emoji("pasta night", &picker), "🔥 pasta night");
    }

    #[test]
    fn question_conversion_is_idempotent() {
        let once = convert_to_question("how to cook pasta");
        assert_eq!(once, "how to cook pasta?");
        assert_eq!(convert_to_question(&once), once);
    }

    #[test]
    fn title_case_capitalizes_each_token() {
        assert_eq!(title_case("how TO cook PASTA"), "How To Cook Pasta");
    }

    #[test]
    fn title_case_is_idempotent() {
        let once = title_case("5 tips for BETTER sleep");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn title_case_leaves_non_letter_prefixes_alone() {
        assert_eq!(title_case("#cook [2026]"), "#cook [2026]");
    }
}
