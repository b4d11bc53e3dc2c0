//! Analysis rendering: turns scorer metrics or free-form LLM markdown
//! into labeled sections for progressive-disclosure display.

use super::platform::Platform;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One expandable section of the analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub header: String,
    pub body: String,
}

impl AnalysisSection {
    fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }
}

/// Metrics bundle fed into the fixed analysis template.
#[derive(Debug, Clone)]
pub struct TitleMetrics {
    pub keywords: Vec<String>,
    pub readability: i32,
    pub engagement_score: i32,
    pub power_word_count: usize,
    pub trigger_count: usize,
    pub keyword_preservation: f64,
    pub keyword_density: f64,
    pub optimized_length: usize,
}

/// Readability below this threshold triggers a simplification tip.
const LOW_READABILITY: i32 = 50;
/// Preservation below this fraction triggers a keep-your-keywords tip.
const LOW_PRESERVATION: f64 = 0.5;
/// Length deviations beyond this many characters trigger a length tip.
const LENGTH_TOLERANCE: usize = 10;

lazy_static! {
    static ref HEADER_LINE: Regex = Regex::new(r"^#{1,2}\s+(.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref LIST_ITEM: Regex = Regex::new(r"^[-*]\s+(.*)$").unwrap();
}

/// Render the fixed metrics template into labeled sections.
pub fn render_metrics(title: &str, platform: Platform, metrics: &TitleMetrics) -> Vec<AnalysisSection> {
    let profile = platform.profile();

    let keyword_line = if metrics.keywords.is_empty() {
        "No content-bearing keywords were found in the original title.".to_string()
    } else {
        format!("Primary keywords identified: {}.", metrics.keywords.join(", "))
    };
    let keyword_strategy = format!(
        "{}<br><strong>Keyword preservation:</strong> {:.0}%<br>\
<strong>Keyword density:</strong> {:.0}%",
        keyword_line,
        metrics.keyword_preservation * 100.0,
        metrics.keyword_density,
    );

    let engagement_factors = format!(
        "<strong>Power words:</strong> {}<br><strong>Emotional triggers:</strong> {}<br>\
<strong>Question format:</strong> {}<br><strong>Contains a number:</strong> {}<br>{}",
        metrics.power_word_count,
        metrics.trigger_count,
        yes_no(title.ends_with('?')),
        yes_no(title.chars().any(|c| c.is_ascii_digit())),
        profile.algorithm_factors,
    );

    let technical = format!(
        "<strong>Readability:</strong> {}/100<br><strong>Engagement score:</strong> {}/100<br>\
<strong>Length:</strong> {} of {} characters (optimal around {})",
        metrics.readability,
        metrics.engagement_score,
        metrics.optimized_length,
        profile.char_limit,
        profile.optimal_length,
    );

    let tips = render_tips(title, platform, metrics);

    vec![
        AnalysisSection::new("Keyword Strategy", keyword_strategy),
        AnalysisSection::new("Engagement Factors", engagement_factors),
        AnalysisSection::new("Technical Metrics", technical),
        AnalysisSection::new("Optimization Tips", tips),
    ]
}

fn render_tips(title: &str, platform: Platform, metrics: &TitleMetrics) -> String {
    let profile = platform.profile();
    let mut tips: Vec<&str> = Vec::new();

    if metrics.readability < LOW_READABILITY {
        tips.push("Use shorter, simpler words to make the title easier to scan.");
    }
    if !metrics.keywords.is_empty() && metrics.keyword_preservation < LOW_PRESERVATION {
        tips.push("Keep more of the original keywords so the topic stays searchable.");
    }
    if metrics.optimized_length > profile.optimal_length + LENGTH_TOLERANCE {
        tips.push("Shorten the title towards the platform's optimal length.");
    } else if metrics.optimized_length + LENGTH_TOLERANCE < profile.optimal_length {
        tips.push("A slightly longer, more descriptive title tends to perform better here.");
    }
    if !title.chars().any(|c| c.is_ascii_digit()) {
        tips.push("Consider adding a number; listicle framing lifts click-through.");
    }
    if platform == Platform::Facebook && !title.ends_with('?') {
        tips.push("Question phrasing invites comments on this platform.");
    }

    if tips.is_empty() {
        format!("{}<br>{}", "The title hits the main optimization marks.", profile.style_guidelines)
    } else {
        tips.iter().map(|t| format!("<li>{}</li>", t)).collect::<Vec<_>>().join("")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Best-effort reflow of markdown-like LLM output into sections.
///
/// Lines starting with `#` or `##` open a new section; `**bold**` spans
/// become `<strong>`, `- ` list markers become `<li>` items and plain
/// line breaks become `<br>` separators. Malformed markdown is not
/// validated; text before the first header lands in a preamble section.
pub fn reflow_markdown(text: &str) -> Vec<AnalysisSection> {
    let mut sections: Vec<AnalysisSection> = Vec::new();
    let mut header: Option<String> = None;
    let mut body_lines: Vec<String> = Vec::new();

    let flush =
        |header: &mut Option<String>, body_lines: &mut Vec<String>, sections: &mut Vec<AnalysisSection>| {
            let has_content = body_lines.iter().any(|l| !l.trim().is_empty());
            if header.is_some() || has_content {
                sections.push(AnalysisSection::new(
                    header.take().unwrap_or_else(|| "Analysis".to_string()),
                    body_lines.join("<br>"),
                ));
            }
            body_lines.clear();
        };

    for line in text.lines() {
        let line = line.trim_end();
        if let Some(captures) = HEADER_LINE.captures(line) {
            flush(&mut header, &mut body_lines, &mut sections);
            header = Some(captures[1].trim().to_string());
            continue;
        }

        let formatted = if let Some(captures) = LIST_ITEM.captures(line) {
            format!("<li>{}</li>", BOLD.replace_all(&captures[1], "<strong>$1</strong>"))
        } else {
            BOLD.replace_all(line, "<strong>$1</strong>").to_string()
        };
        body_lines.push(formatted);
    }
    flush(&mut header, &mut body_lines, &mut sections);

    sections
}
