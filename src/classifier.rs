use serde::Serialize;
use std::fmt;

/// Discrete risk tier derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Safe,
    Suspicious,
    Dangerous,
}

impl RiskTier {
    /// Thresholds are inclusive on the lower bound of each tier.
    pub fn classify(score: f64) -> Self {
        if score < 0.3 {
            RiskTier::Safe
        } else if score < 0.7 {
            RiskTier::Suspicious
        } else {
            RiskTier::Dangerous
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Safe => "SAFE",
            RiskTier::Suspicious => "SUSPICIOUS",
            RiskTier::Dangerous => "DANGEROUS",
        };
        f.write_str(label)
    }
}
