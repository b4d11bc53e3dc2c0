//! Title generation orchestration.
//!
//! Tries the configured LLM providers (primary, then fallback) with
//! bounded retries; any failure drops the request onto the local
//! heuristic pipeline, which always succeeds on valid input. Signal
//! metrics are computed locally in both cases.

use crate::llm::{
    prompts, CompletionOptions, LlmError, LlmProvider, Message, RetryPolicy,
};
use crate::optimizer::{
    self, analysis, scoring, AnalysisSection, Picker, Platform, ScoringProfile, TitleMetrics,
    UniformPicker,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Sampling temperature for both completions.
const TEMPERATURE: f32 = 0.7;

/// Validation failures reported to the caller.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Which path produced the optimized title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    Llm,
    Heuristic,
}

/// Outcome of one generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub original_title: String,
    pub optimized_title: String,
    pub platform: Platform,
    pub source: GenerationSource,
    pub engagement_score: i32,
    pub readability: i32,
    pub keyword_preservation: f64,
    pub keyword_density: f64,
    pub analysis: Vec<AnalysisSection>,
}

/// Orchestrates LLM completion with heuristic fallback.
pub struct GenerationService {
    primary: Option<Arc<dyn LlmProvider>>,
    fallback: Option<Arc<dyn LlmProvider>>,
    retry: RetryPolicy,
    timeout: Duration,
    picker: Box<dyn Picker>,
    scoring_profile: ScoringProfile,
}

impl GenerationService {
    pub fn new(
        primary: Option<Arc<dyn LlmProvider>>,
        fallback: Option<Arc<dyn LlmProvider>>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            retry,
            timeout,
            picker: Box::new(UniformPicker),
            scoring_profile: ScoringProfile::Standard,
        }
    }

    /// Heuristic-only service; used when no LLM endpoint is configured.
    pub fn heuristic_only() -> Self {
        Self::new(None, None, RetryPolicy::default(), Duration::from_secs(30))
    }

    /// Replace the random-choice strategy (deterministic tests).
    pub fn with_picker(mut self, picker: Box<dyn Picker>) -> Self {
        self.picker = picker;
        self
    }

    fn llm_configured(&self) -> bool {
        self.primary.is_some() || self.fallback.is_some()
    }

    /// Run one generation request.
    pub async fn generate(
        &self,
        title: &str,
        platform: Platform,
    ) -> Result<GenerationResult, GenerateError> {
        let original = title.trim();
        if original.is_empty() {
            return Err(GenerateError::InvalidInput("title must not be empty"));
        }

        let (optimized, source) = match self.llm_title(original, platform).await {
            Some(llm_title) => (llm_title, GenerationSource::Llm),
            None => (
                optimizer::optimize(original, platform, self.picker.as_ref()),
                GenerationSource::Heuristic,
            ),
        };

        let metrics = self.compute_metrics(original, &optimized, platform);
        let analysis_sections = match source {
            GenerationSource::Llm => self
                .llm_analysis(original, &optimized, platform)
                .await
                .unwrap_or_else(|| analysis::render_metrics(&optimized, platform, &metrics)),
            GenerationSource::Heuristic => {
                analysis::render_metrics(&optimized, platform, &metrics)
            }
        };

        Ok(GenerationResult {
            original_title: original.to_string(),
            optimized_title: optimized,
            platform,
            source,
            engagement_score: metrics.engagement_score,
            readability: metrics.readability,
            keyword_preservation: metrics.keyword_preservation,
            keyword_density: metrics.keyword_density,
            analysis: analysis_sections,
        })
    }

    fn compute_metrics(&self, original: &str, optimized: &str, platform: Platform) -> TitleMetrics {
        TitleMetrics {
            keywords: optimizer::extract_keywords(original),
            readability: scoring::readability(optimized),
            engagement_score: scoring::engagement_score(
                optimized,
                original,
                platform,
                self.scoring_profile,
            ),
            power_word_count: scoring::count_power_words(optimized),
            trigger_count: scoring::count_emotional_triggers(optimized),
            keyword_preservation: scoring::keyword_preservation(original, optimized),
            keyword_density: scoring::keyword_density(original, optimized),
            optimized_length: optimized.chars().count(),
        }
    }

    async fn llm_title(&self, original: &str, platform: Platform) -> Option<String> {
        if !self.llm_configured() {
            return None;
        }

        let messages = [
            Message::system(prompts::SYSTEM_PROMPT),
            Message::user(prompts::title_prompt(original, platform)),
        ];
        match self
            .complete_with_retry(&messages, prompts::TITLE_MAX_TOKENS)
            .await
        {
            Ok(content) => {
                let title = content.trim().trim_matches('"').trim().to_string();
                if title.is_empty() {
                    None
                } else {
                    Some(title)
                }
            }
            Err(err) => {
                warn!("Title generation failed, using heuristic fallback: {}", err);
                None
            }
        }
    }

    async fn llm_analysis(
        &self,
        original: &str,
        optimized: &str,
        platform: Platform,
    ) -> Option<Vec<AnalysisSection>> {
        let messages = [
            Message::system(prompts::SYSTEM_PROMPT),
            Message::user(prompts::analysis_prompt(original, optimized, platform)),
        ];
        match self
            .complete_with_retry(&messages, prompts::ANALYSIS_MAX_TOKENS)
            .await
        {
            Ok(content) => {
                let sections = analysis::reflow_markdown(&content);
                if sections.is_empty() {
                    None
                } else {
                    Some(sections)
                }
            }
            Err(err) => {
                warn!("Analysis generation failed, rendering metrics instead: {}", err);
                None
            }
        }
    }

    async fn complete_with_retry(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let options = CompletionOptions {
            temperature: TEMPERATURE,
            max_tokens: Some(max_tokens),
            timeout: self.timeout,
        };

        let mut attempt = 0;
        loop {
            match self.complete_once(messages, &options).await {
                Ok(content) => return Ok(content),
                Err(err) => {
                    if !self.retry.should_retry(attempt) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_after(attempt);
                    debug!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Completion failed, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// One attempt: primary first, fallback provider on primary failure.
    async fn complete_once(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let primary_err = match &self.primary {
            Some(provider) => match provider.complete(messages, options).await {
                Ok(response) => return Ok(response.content),
                Err(err) => {
                    warn!(provider = provider.name(), "Primary provider failed: {}", err);
                    Some(err)
                }
            },
            None => None,
        };

        match &self.fallback {
            Some(provider) => provider
                .complete(messages, options)
                .await
                .map(|response| response.content),
            None => Err(primary_err
                .unwrap_or_else(|| LlmError::Connection("no provider configured".to_string()))),
        }
    }
}
