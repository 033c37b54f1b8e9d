use std::time::Instant;
use tracing::debug;

use crate::domain::extract_domains;
use crate::indicators::{Indicator, IndicatorContext, REGISTRY};
use crate::patterns::CompiledPatterns;
use crate::reputation::{DomainReputationProvider, SimulatedReputation};
use crate::stats::{AnalysisResult, Metadata, ParameterVector};
use crate::urls::{extract_urls, text_length};

/// Computes the phishing parameter vector of a piece of email or URL text.
///
/// Holds only the compiled patterns, so one analyzer can serve any number of concurrent
/// calls.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'p> {
    patterns: &'p CompiledPatterns,
}

impl Default for Analyzer<'static> {
    fn default() -> Self {
        Self::new(CompiledPatterns::embedded())
    }
}

impl<'p> Analyzer<'p> {
    pub fn new(patterns: &'p CompiledPatterns) -> Self {
        Self { patterns }
    }

    pub fn patterns(&self) -> &'p CompiledPatterns {
        self.patterns
    }

    /// Runs extraction once and evaluates every indicator against it.
    ///
    /// Never fails: malformed input degrades to neutral values.
    pub fn analyze(
        &self,
        content: &str,
        provider: &mut dyn DomainReputationProvider,
    ) -> AnalysisResult {
        let start_time = Instant::now();

        let urls = extract_urls(content);
        let domains = extract_domains(&urls);
        let ctx = IndicatorContext {
            urls: &urls,
            domains: &domains,
            content,
            patterns: self.patterns,
        };

        let mut values = [0i64; Indicator::COUNT];
        for (slot, &(_, indicator)) in values.iter_mut().zip(REGISTRY.iter()) {
            *slot = indicator(&ctx, &mut *provider);
        }

        let metadata = Metadata {
            urls_found: urls.len(),
            domains_analyzed: domains.len(),
            content_length: text_length(content),
        };

        debug!(
            action = "complete",
            component = "analysis",
            urls_found = metadata.urls_found,
            domains_analyzed = metadata.domains_analyzed,
            content_length = metadata.content_length,
            duration_us = start_time.elapsed().as_micros(),
            "Analysis completed"
        );

        AnalysisResult {
            parameters: ParameterVector::new(values),
            metadata,
        }
    }
}

/// Analyzes `content` with the embedded patterns and entropy-seeded simulated reputation.
pub fn analyze(content: &str) -> AnalysisResult {
    let analyzer = Analyzer::default();
    let mut provider = SimulatedReputation::from_entropy(analyzer.patterns());
    analyzer.analyze(content, &mut provider)
}
