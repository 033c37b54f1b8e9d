use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

// Include default patterns at compile time
const DEFAULT_PATTERNS_JSON: &str = include_str!("../default_indicator_patterns.json");

/// File picked up from the working directory when no explicit pattern file is given.
pub const DEFAULT_PATTERN_FILE: &str = "indicator_patterns.json";

static EMBEDDED: Lazy<CompiledPatterns> = Lazy::new(|| {
    PatternSet::embedded()
        .and_then(|set| set.compile(false))
        .unwrap_or_else(|e| panic!("embedded indicator patterns are invalid: {e:#}"))
});

/// Heuristic membership lists behind the indicator suite.
///
/// None of these lists are derived from anything; they are plain data and can be
/// replaced wholesale through a pattern file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSet {
    /// Case-insensitive substrings marking a redirecting URL.
    pub redirection_keywords: Vec<String>,
    /// URL shortener hosts, matched as case-sensitive substrings of the URL.
    pub shortener_domains: Vec<String>,
    /// Regex sources tested against every hostname.
    pub suspicious_domain_patterns: Vec<String>,
    pub legitimate_tlds: Vec<String>,
    pub well_known_domains: Vec<String>,
    pub mouse_over_events: Vec<String>,
    pub right_click_events: Vec<String>,
    /// Regex sources, matched case-insensitively against the raw content.
    pub forwarding_patterns: Vec<String>,
}

impl PatternSet {
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(DEFAULT_PATTERNS_JSON)
            .context("Failed to decode embedded default patterns")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse pattern file {:?}", path))
    }

    /// With `strict` set an invalid regex aborts compilation; otherwise it is logged and
    /// skipped.
    pub fn compile(&self, strict: bool) -> Result<CompiledPatterns> {
        let suspicious_domains = compile_regexes(
            "suspicious_domain_patterns",
            &self.suspicious_domain_patterns,
            false,
            strict,
        )?;
        let forwarding = compile_regexes(
            "forwarding_patterns",
            &self.forwarding_patterns,
            true,
            strict,
        )?;
        let forwarding = RegexSetBuilder::new(forwarding.iter().map(Regex::as_str))
            .case_insensitive(true)
            .crlf(true)
            .build()
            .context("Failed to build forwarding pattern set")?;

        Ok(CompiledPatterns {
            redirection: keyword_regex(&self.redirection_keywords)?,
            shorteners: non_empty(&self.shortener_domains),
            suspicious_domains,
            legitimate_tlds: non_empty(&self.legitimate_tlds),
            well_known_domains: non_empty(&self.well_known_domains),
            mouse_over: keyword_regex(&self.mouse_over_events)?,
            right_click: keyword_regex(&self.right_click_events)?,
            forwarding,
        })
    }
}

/// Ready-to-match form of a [`PatternSet`].
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub redirection: Option<Regex>,
    pub shorteners: Vec<String>,
    pub suspicious_domains: Vec<Regex>,
    pub legitimate_tlds: Vec<String>,
    pub well_known_domains: Vec<String>,
    pub mouse_over: Option<Regex>,
    pub right_click: Option<Regex>,
    pub forwarding: RegexSet,
}

impl CompiledPatterns {
    /// Shared compiled copy of the embedded defaults.
    pub fn embedded() -> &'static CompiledPatterns {
        &EMBEDDED
    }
}

// An empty entry would match every input through `contains`/`ends_with`.
fn non_empty(entries: &[String]) -> Vec<String> {
    entries.iter().filter(|e| !e.is_empty()).cloned().collect()
}

/// Folds literal keywords into one case-insensitive alternation; `None` when empty.
fn keyword_regex(keywords: &[String]) -> Result<Option<Regex>> {
    let alternatives: Vec<String> = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| regex::escape(k))
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }

    let regex = RegexBuilder::new(&alternatives.join("|"))
        .case_insensitive(true)
        .build()
        .context("Failed to build keyword pattern")?;
    Ok(Some(regex))
}

fn compile_regexes(
    list: &str,
    sources: &[String],
    case_insensitive: bool,
    strict: bool,
) -> Result<Vec<Regex>> {
    let mut compiled = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        match RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .crlf(true)
            .build()
        {
            Ok(regex) => compiled.push(regex),
            Err(e) if strict => {
                anyhow::bail!("Invalid regex pattern in {} at entry {}: {}", list, index + 1, e)
            }
            Err(e) => {
                warn!(action = "parse", component = "regex_pattern", list, entry = index + 1, error = %e, "Invalid regex pattern")
            }
        }
    }
    Ok(compiled)
}

pub fn load_patterns(pattern_file_path: Option<&Path>) -> Result<CompiledPatterns> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "pattern_loading",
        "Starting indicator pattern loading"
    );

    let patterns = if let Some(path) = pattern_file_path {
        info!(action = "load", component = "pattern_file", file_path = ?path, "Loading patterns from specified file");
        if !path.exists() {
            anyhow::bail!("Pattern file not found: {:?}", path);
        }
        PatternSet::from_file(path)?.compile(true)?
    } else {
        let default_file = Path::new(DEFAULT_PATTERN_FILE);
        if default_file.exists() {
            info!(action = "load", component = "default_pattern_file", file_path = ?default_file, "Loading patterns from default file");
            PatternSet::from_file(default_file)?.compile(false)?
        } else {
            info!(
                action = "load",
                component = "embedded_patterns",
                "Using embedded default patterns"
            );
            CompiledPatterns::embedded().clone()
        }
    };

    let pattern_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "pattern_loading",
        suspicious_domain_patterns = patterns.suspicious_domains.len(),
        forwarding_patterns = patterns.forwarding.len(),
        duration_ms = pattern_time.as_millis(),
        "Successfully compiled patterns"
    );
    Ok(patterns)
}

pub fn init_default_patterns() -> Result<()> {
    init_patterns_at(Path::new(DEFAULT_PATTERN_FILE))?;
    println!("Created {} with default patterns", DEFAULT_PATTERN_FILE);
    Ok(())
}

fn init_patterns_at(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        );
    }

    fs::write(path, DEFAULT_PATTERNS_JSON)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
