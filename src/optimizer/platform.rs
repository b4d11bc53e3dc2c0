//! Target platform model and per-platform constants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported target platforms.
///
/// Unrecognized platform names parse to [`Platform::Other`] instead of
/// failing: behavior degrades to defaults, it never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    X,
    YouTube,
    Instagram,
    Facebook,
    Other,
}

impl FromStr for Platform {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "x" | "twitter" => Platform::X,
            "youtube" => Platform::YouTube,
            "instagram" => Platform::Instagram,
            "facebook" => Platform::Facebook,
            _ => Platform::Other,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::X => "x",
            Platform::YouTube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Other => "other",
        };
        write!(f, "{}", name)
    }
}

/// Read-only per-platform constants.
#[derive(Debug, Clone, Copy)]
pub struct PlatformProfile {
    /// Hard character budget for a title on this platform.
    pub char_limit: usize,
    /// Length the engagement scorer rewards proximity to.
    pub optimal_length: usize,
    /// What the platform's ranking system is known to reward.
    pub algorithm_factors: &'static str,
    /// Style guidance surfaced in the analysis output.
    pub style_guidelines: &'static str,
}

const X_PROFILE: PlatformProfile = PlatformProfile {
    char_limit: 280,
    optimal_length: 100,
    algorithm_factors: "Engagement velocity in the first 30 minutes, hashtag relevance, \
account authority and media attachments drive distribution.",
    style_guidelines: "Aim for 81-100 characters, include 1-2 relevant hashtags, lean on \
question structures and timely topics.",
};

const YOUTUBE_PROFILE: PlatformProfile = PlatformProfile {
    char_limit: 100,
    optimal_length: 60,
    algorithm_factors: "Click-through rate, watch time and retention, session duration and \
viewer engagement decide recommendations.",
    style_guidelines: "Target 41-60 characters for search, include listicle numbers, use \
year brackets and front-load the primary keyword.",
};

const INSTAGRAM_PROFILE: PlatformProfile = PlatformProfile {
    char_limit: 2200,
    optimal_length: 150,
    algorithm_factors: "Saves and shares, comment quality, Explore-page engagement and \
Reels completion rate carry the most weight.",
    style_guidelines: "Keep the first line short for the feed preview, add 3-5 targeted \
hashtags and 1-2 emojis for visual appeal.",
};

const FACEBOOK_PROFILE: PlatformProfile = PlatformProfile {
    char_limit: 80,
    optimal_length: 60,
    algorithm_factors: "Meaningful interactions, shareability, video completion and page \
trust are preferred by the feed ranking.",
    style_guidelines: "Keep preview text to 40-60 characters, use question formats to \
invite comments and keep the sentiment positive.",
};

/// Fallback for platforms outside the fixed set: X's character budget
/// and guideline texts with a generic optimal length.
const OTHER_PROFILE: PlatformProfile = PlatformProfile {
    char_limit: 280,
    optimal_length: 70,
    algorithm_factors: X_PROFILE.algorithm_factors,
    style_guidelines: X_PROFILE.style_guidelines,
};

impl Platform {
    /// Look up the read-only constants for this platform.
    pub fn profile(&self) -> &'static PlatformProfile {
        match self {
            Platform::X => &X_PROFILE,
            Platform::YouTube => &YOUTUBE_PROFILE,
            Platform::Instagram => &INSTAGRAM_PROFILE,
            Platform::Facebook => &FACEBOOK_PROFILE,
            Platform::Other => &OTHER_PROFILE,
        }
    }
}
