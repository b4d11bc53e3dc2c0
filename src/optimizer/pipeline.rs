//! The platform optimizer: sequences heuristic transforms per platform
//! and enforces the character budget.

use super::picker::Picker;
use super::platform::Platform;
use super::transforms;
use chrono::Datelike;

/// Number of hashtags appended for X.
const X_HASHTAG_COUNT: usize = 1;
/// Number of hashtags appended for Instagram.
const INSTAGRAM_HASHTAG_COUNT: usize = 3;

/// Optimize a title for a platform using the local heuristic pipeline.
///
/// Applies the platform-specific transform sequence, then the general
/// transforms (title case, one power word, one emotional trigger), then
/// truncates to the platform's character budget. The current UTC year is
/// used for year brackets.
pub fn optimize(title: &str, platform: Platform, picker: &dyn Picker) -> String {
    optimize_with_year(title, platform, picker, chrono::Utc::now().year())
}

/// Same as [`optimize`] with an explicit year, so tests can pin it.
pub fn optimize_with_year(
    title: &str,
    platform: Platform,
    picker: &dyn Picker,
    year: i32,
) -> String {
    let platform_staged = apply_platform_transforms(title, platform, picker, year);
    let general_staged = apply_general_transforms(&platform_staged, picker);
    truncate_to_limit(&general_staged, platform.profile().char_limit)
}

fn apply_platform_transforms(
    title: &str,
    platform: Platform,
    picker: &dyn Picker,
    year: i32,
) -> String {
    match platform {
        Platform::X => {
            let t = transforms::add_hashtags(title, X_HASHTAG_COUNT);
            transforms::add_power_words(&t, 1, picker)
        }
        Platform::YouTube => {
            let t = transforms::add_numeral(title, picker);
            let t = transforms::add_year_bracket(&t, year);
            transforms::front_load_keywords(&t)
        }
        Platform::Instagram => {
            let t = transforms::add_emoji(title, picker);
            transforms::add_hashtags(&t, INSTAGRAM_HASHTAG_COUNT)
        }
        Platform::Facebook => {
            let t = transforms::convert_to_question(title);
            transforms::add_emotional_trigger(&t, picker)
        }
        // No platform-specific stage outside the fixed set.
        Platform::Other => title.to_string(),
    }
}

fn apply_general_transforms(title: &str, picker: &dyn Picker) -> String {
    let t = transforms::title_case(title);
    let t = transforms::add_power_words(&t, 1, picker);
    transforms::add_emotional_trigger(&t, picker)
}

/// Cut to `limit - 3` characters and append an ellipsis when the title
/// exceeds the budget.
fn truncate_to_limit(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }
    let cut: String = title.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", cut)
}
