//! Prompt construction for the title and analysis completions.

use crate::optimizer::Platform;

/// Token budget for the optimized-title completion.
pub const TITLE_MAX_TOKENS: u32 = 200;

/// Token budget for the analysis completion.
pub const ANALYSIS_MAX_TOKENS: u32 = 1000;

/// Fixed system prompt establishing the SEO-strategist persona.
pub const SYSTEM_PROMPT: &str = "\
You are an expert SEO strategist and social content optimization assistant. You specialize in \
crafting high-performing, SEO-friendly titles and hooks for content across different platforms \
(especially Instagram, Facebook, YouTube, and X/Twitter).

Your primary goal is to maximize both discoverability (search, recommendations, hashtags, \
keywords) and engagement (click-through rate, watch time, saves, shares, comments) while \
preserving the original meaning and intent of the content.

Platform-specific behavior:
- YOUTUBE: aim for roughly 55-70 characters, include the primary keyword near the start, \
combine SEO and CTR with structures like \"[Number] Ways to [achieve goal]\".
- INSTAGRAM: front-load primary keywords and the main promise in the first line, keep it \
concise but descriptive, favor 3-8 niche hashtags over hashtag stuffing.
- FACEBOOK: prioritize clarity and benefit in the first 60-80 characters, avoid clickbait \
or misleading language.
- X/TWITTER: treat the first ~70-120 characters as a standalone headline, front-load the \
strongest keyphrase, use at most 0-3 relevant hashtags.

Style constraints: maintain the original meaning, be specific and concrete, prefer clear over \
clever, never fabricate numbers or claims, and use power words sparingly and meaningfully.";

/// Build the user prompt requesting a single optimized title.
pub fn title_prompt(original_title: &str, platform: Platform) -> String {
    let profile = platform.profile();
    format!(
        "Rewrite this title for {platform}:\n\n\
original_title: \"{original_title}\"\n\
platform: {platform}\n\
max_length: {limit} characters\n\n\
Platform guidelines:\n{guidelines}\n\n\
Return ONLY the single best optimized title, with no quotes and no explanation.",
        platform = platform,
        original_title = original_title,
        limit = profile.char_limit,
        guidelines = profile.style_guidelines,
    )
}

/// Build the user prompt requesting a sectioned SEO analysis.
pub fn analysis_prompt(original_title: &str, optimized_title: &str, platform: Platform) -> String {
    let profile = platform.profile();
    format!(
        "Conduct a comprehensive SEO audit of this title optimization for {platform}:\n\n\
Original Title: \"{original}\"\n\
Optimized Title: \"{optimized}\"\n\
Platform: {platform}\n\n\
Provide an in-depth analysis with these sections:\n\n\
## 1. Keyword Strategy Analysis\n\
- Keyword mapping between original and optimized\n\
- Keyword placement effectiveness\n\n\
## 2. Platform Algorithm Optimization\n\
- {factors}\n\
- Character length effectiveness ({length}/{limit})\n\
- Best practice compliance\n\n\
## 3. Psychological Effectiveness\n\
- Attention capture mechanisms\n\
- Emotional resonance and curiosity gap\n\n\
## 4. Technical SEO Validation\n\
- Readability assessment\n\
- Keyword prominence analysis\n\n\
## 5. Content Creator Recommendations\n\
- Specific suggestions for improvement\n\
- Alternative approaches to consider\n\n\
Format with markdown headers (##) and bullet points. Include specific metrics and \
actionable recommendations.",
        platform = platform,
        original = original_title,
        optimized = optimized_title,
        factors = profile.algorithm_factors,
        length = optimized_title.chars().count(),
        limit = profile.char_limit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_carries_input_and_budget() {
        let prompt = title_prompt("5 tips for better sleep", Platform::YouTube);
        assert!(prompt.contains("5 tips for better sleep"));
        assert!(prompt.contains("youtube"));
        assert!(prompt.contains("100 characters"));
    }

    #[test]
    fn analysis_prompt_has_five_sections() {
        let prompt = analysis_prompt("old title", "New Title", Platform::Facebook);
        assert_eq!(prompt.matches("## ").count(), 5);
        assert!(prompt.contains("old title"));
        assert!(prompt.contains("New Title"));
        assert!(prompt.contains("9/80"));
    }

    #[test]
    fn system_prompt_mentions_all_four_networks() {
        for network in ["YOUTUBE", "INSTAGRAM", "FACEBOOK", "X/TWITTER"] {
            assert!(SYSTEM_PROMPT.contains(network));
        }
    }
}
