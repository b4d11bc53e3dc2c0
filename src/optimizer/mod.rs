//! Local title-optimization pipeline: keyword extraction, heuristic
//! transforms, per-platform sequencing, signal scoring and analysis
//! rendering. Fully synchronous and side-effect free; randomness is
//! injected through [`picker::Picker`].

pub mod analysis;
pub mod keywords;
pub mod picker;
pub mod pipeline;
pub mod platform;
pub mod scoring;
pub mod transforms;

pub use analysis::{reflow_markdown, render_metrics, AnalysisSection, TitleMetrics};
pub use keywords::extract_keywords;
pub use picker::{Picker, SequencePicker, UniformPicker};
pub use pipeline::{optimize, optimize_with_year};
pub use platform::{Platform, PlatformProfile};
pub use scoring::{
    count_emotional_triggers, count_power_words, engagement_score, keyword_density,
    keyword_preservation, readability, ScoringProfile,
};
