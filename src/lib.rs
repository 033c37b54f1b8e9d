pub mod analyzer;
pub mod args;
pub mod domain;
pub mod indicators;
pub mod inputs;
pub mod patterns;
pub mod report;
pub mod reputation;
pub mod risk;
pub mod stats;
pub mod urls;
pub mod utils;

pub use analyzer::{analyze, Analyzer};
pub use args::Args;
pub use domain::{extract_domains, DomainSet};
pub use indicators::{Indicator, Polarity};
pub use patterns::{init_default_patterns, load_patterns, CompiledPatterns, PatternSet};
pub use report::run_analysis;
pub use reputation::{DomainReputationProvider, SimulatedReputation};
pub use stats::{AnalysisResult, Metadata, ParameterVector};
pub use urls::extract_urls;
