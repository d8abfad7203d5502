use crate::classifier::RiskTier;
use crate::indicators;
use crate::lexicon::{ConfigError, Lexicon};
use log::debug;
use serde::Serialize;

/// Subject and body concatenated, in both case representations. The grammar
/// heuristic needs the original case; everything else matches on the folded
/// copy.
#[derive(Debug, Clone)]
pub struct EmailText {
    pub original: String,
    pub folded: String,
}

impl EmailText {
    pub fn new(subject: &str, body: &str) -> Self {
        let original = format!("{} {}", subject, body);
        let folded = original.to_lowercase();
        Self { original, folded }
    }
}

/// Raw per-feature scores before weighting. Keyword, pattern and urgency
/// scale by 2.0 and can individually exceed 1.0; only the weighted aggregate
/// is clamped.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureScores {
    pub keyword: f64,
    pub pattern: f64,
    pub urgency: f64,
    pub grammar: f64,
}

/// One-line analysis result: score, tier and the human-readable indicators.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub score: f64,
    pub tier: RiskTier,
    pub indicators: Vec<String>,
}

/// The scoring pipeline. Holds the immutable lexicon; every method is a pure
/// function of its inputs and safe to call from multiple threads.
pub struct ScamAnalyzer {
    lexicon: Lexicon,
}

impl ScamAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn with_default_lexicon() -> Result<Self, ConfigError> {
        Ok(Self::new(Lexicon::default_lexicon()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Scam probability in [0.0, 1.0].
    pub fn analyze(&self, subject: &str, body: &str, sender: &str) -> f64 {
        let text = EmailText::new(subject, body);
        let scores = self.feature_scores(&text);

        debug!(
            "features for <{}>: keyword={:.3} pattern={:.3} urgency={:.3} grammar={:.3}",
            sender, scores.keyword, scores.pattern, scores.urgency, scores.grammar
        );

        self.aggregate(&scores)
    }

    /// Human-readable reasons the email looks suspicious, independent of the
    /// numeric score.
    pub fn explain(&self, subject: &str, body: &str, sender: &str) -> Vec<String> {
        indicators::scam_indicators(&self.lexicon, subject, body, sender)
    }

    /// Score, tier and indicators in one call.
    pub fn report(&self, subject: &str, body: &str, sender: &str) -> AnalysisReport {
        let score = self.analyze(subject, body, sender);
        AnalysisReport {
            score,
            tier: RiskTier::classify(score),
            indicators: self.explain(subject, body, sender),
        }
    }

    pub fn feature_scores(&self, text: &EmailText) -> FeatureScores {
        FeatureScores {
            keyword: self.keyword_score(text),
            pattern: self.pattern_score(text),
            urgency: self.urgency_score(text),
            grammar: self.grammar_score(text),
        }
    }

    /// Fraction of scam keywords present as substrings, scaled by 2.0.
    /// Substring containment is intentional: "urgent" also matches inside
    /// "urgently". Each keyword counts at most once.
    fn keyword_score(&self, text: &EmailText) -> f64 {
        density(&self.lexicon.scam_keywords, &text.folded)
    }

    /// Fraction of suspicious patterns with at least one match, scaled by 2.0.
    fn pattern_score(&self, text: &EmailText) -> f64 {
        if self.lexicon.patterns.is_empty() {
            return 0.0;
        }
        let matches = self
            .lexicon
            .patterns
            .iter()
            .filter(|p| p.is_match(&text.folded))
            .count();
        matches as f64 / self.lexicon.patterns.len() as f64 * 2.0
    }

    /// Fraction of urgency phrases present, scaled by 2.0.
    fn urgency_score(&self, text: &EmailText) -> f64 {
        density(&self.lexicon.urgency_phrases, &text.folded)
    }

    /// Shallow grammar/style heuristics: each fired check is one issue,
    /// capped at five. The uppercase count runs on the original-case text.
    fn grammar_score(&self, text: &EmailText) -> f64 {
        let mut issues = 0u32;

        let uppercase = text
            .original
            .chars()
            .filter(|c| c.is_ascii_uppercase())
            .count();
        if uppercase > 20 {
            issues += 1;
        }

        if text.folded.matches('!').count() > 5 {
            issues += 1;
        }

        for mistake in &self.lexicon.grammar_mistakes {
            if text.folded.contains(mistake.as_str()) {
                issues += 1;
            }
        }

        (f64::from(issues) / 5.0).min(1.0)
    }

    fn aggregate(&self, scores: &FeatureScores) -> f64 {
        let weights = &self.lexicon.weights;
        let weighted = scores.keyword * weights.keyword
            + scores.pattern * weights.pattern
            + scores.urgency * weights.urgency
            + scores.grammar * weights.grammar;
        weighted.min(1.0)
    }
}

fn density(phrases: &[String], folded: &str) -> f64 {
    if phrases.is_empty() {
        return 0.0;
    }
    let matches = phrases.iter().filter(|p| folded.contains(p.as_str())).count();
    matches as f64 / phrases.len() as f64 * 2.0
}
