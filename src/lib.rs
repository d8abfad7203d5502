pub mod analyzer;
pub mod classifier;
pub mod indicators;
pub mod lexicon;

pub use analyzer::{AnalysisReport, EmailText, FeatureScores, ScamAnalyzer};
pub use classifier::RiskTier;
pub use indicators::scam_indicators;
pub use lexicon::{ConfigError, FeatureWeights, Lexicon, LexiconConfig, SuspiciousPattern};
