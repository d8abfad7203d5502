use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Raised only while building a lexicon; per-email analysis never fails.
#[derive(Debug)]
pub enum ConfigError {
    InvalidWeights { sum: f64 },
    BadPattern(regex::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWeights { sum } => {
                write!(f, "feature weights must sum to 1.0 (got {sum})")
            }
            ConfigError::BadPattern(e) => write!(f, "invalid lexicon pattern: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::BadPattern(e) => Some(e),
            ConfigError::InvalidWeights { .. } => None,
        }
    }
}

impl From<regex::Error> for ConfigError {
    fn from(e: regex::Error) -> Self {
        ConfigError::BadPattern(e)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub keyword: f64,
    pub pattern: f64,
    pub urgency: f64,
    pub grammar: f64,
}

impl FeatureWeights {
    pub fn new(keyword: f64, pattern: f64, urgency: f64, grammar: f64) -> Result<Self, ConfigError> {
        Self {
            keyword,
            pattern,
            urgency,
            grammar,
        }
        .validate()
    }

    /// The weights must sum to 1.0; the aggregate is clamped regardless, but
    /// a table that does not sum to 1.0 is a configuration mistake.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let sum = self.keyword + self.pattern + self.urgency + self.grammar;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::InvalidWeights { sum });
        }
        Ok(self)
    }
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            keyword: 0.4,
            pattern: 0.3,
            urgency: 0.2,
            grammar: 0.1,
        }
    }
}

/// Serializable lexicon source. Every field has a built-in default, so a
/// YAML override only needs to name the lists it wants to replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub scam_keywords: Vec<String>,
    pub urgency_phrases: Vec<String>,
    pub grammar_mistakes: Vec<String>,
    pub allowed_url_domains: Vec<String>,
    pub free_mail_providers: Vec<String>,
    pub weights: FeatureWeights,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            scam_keywords: to_strings(&[
                "urgent",
                "million dollars",
                "lottery",
                "winner",
                "inheritance",
                "bank transfer",
                "foreign prince",
                "claim your prize",
                "wire transfer",
                "confidential",
                "business proposal",
                "investment opportunity",
                "unclaimed",
                "congratulations",
                "lucky winner",
                "offshore",
                "account details",
            ]),
            urgency_phrases: to_strings(&[
                "urgent",
                "immediate",
                "act now",
                "limited time",
                "expires soon",
                "today only",
                "last chance",
                "deadline",
                "quickly",
                "hurry",
            ]),
            grammar_mistakes: to_strings(&[
                "your the",
                "you is",
                "we is",
                "they is",
                "i is",
                "kindly do the needful",
                "revert back",
                "please to",
            ]),
            allowed_url_domains: to_strings(&[
                "google.com",
                "yahoo.com",
                "microsoft.com",
                "apple.com",
                "amazon.com",
            ]),
            free_mail_providers: to_strings(&["gmail", "yahoo", "outlook", "hotmail", "aol"]),
            weights: FeatureWeights::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const URL_TOKEN_PATTERN: &str = r"https?://\S+";
const BANK_DETAILS_PATTERN: &str = r"(?i)bank\s+(?:account|details|information|routing)";
const PERSONAL_INFO_PATTERN: &str =
    r"(?i)send\s+(?:your|ur)\s+(?:password|credit card|ssn|social security)";

/// A compiled suspicious pattern. The URL check cannot be a single regex:
/// the `regex` crate rejects negative lookahead, so URL tokens are found
/// first and then filtered against an anchored allow-prefix.
#[derive(Debug)]
pub enum SuspiciousPattern {
    UnknownUrl { token: Regex, allowed: Regex },
    Phrase(Regex),
}

impl SuspiciousPattern {
    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// First matching substring, if any. Used verbatim in indicator output.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<&'t str> {
        match self {
            SuspiciousPattern::UnknownUrl { token, allowed } => token
                .find_iter(text)
                .map(|m| m.as_str())
                .find(|url| !allowed.is_match(url)),
            SuspiciousPattern::Phrase(re) => re.find(text).map(|m| m.as_str()),
        }
    }
}

/// Immutable word lists, compiled patterns and feature weights. Built once
/// at startup and shared read-only by every analysis call.
#[derive(Debug)]
pub struct Lexicon {
    pub scam_keywords: Vec<String>,
    pub urgency_phrases: Vec<String>,
    pub grammar_mistakes: Vec<String>,
    pub patterns: Vec<SuspiciousPattern>,
    pub sender_allowlist: Regex,
    pub weights: FeatureWeights,
}

impl Lexicon {
    /// Build the lexicon shipped with the crate.
    pub fn default_lexicon() -> Result<Self, ConfigError> {
        Self::from_config(LexiconConfig::default())
    }

    pub fn from_config(config: LexiconConfig) -> Result<Self, ConfigError> {
        let weights = config.weights.validate()?;

        if config.scam_keywords.is_empty() {
            warn!("lexicon has no scam keywords; the keyword feature will always score 0");
        }

        let allowed = if config.allowed_url_domains.is_empty() {
            warn!("lexicon has no allowed URL domains; every URL will be flagged");
            // Matches nothing.
            Regex::new(r"\b\B")?
        } else {
            let alternatives = config
                .allowed_url_domains
                .iter()
                .map(|d| regex::escape(d))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"^https?://www\.(?:{alternatives})"))?
        };

        let patterns = vec![
            SuspiciousPattern::UnknownUrl {
                token: Regex::new(URL_TOKEN_PATTERN)?,
                allowed,
            },
            SuspiciousPattern::Phrase(Regex::new(BANK_DETAILS_PATTERN)?),
            SuspiciousPattern::Phrase(Regex::new(PERSONAL_INFO_PATTERN)?),
        ];

        let providers = config
            .free_mail_providers
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let sender_allowlist = Regex::new(&format!(r"@(?:{providers})\.com$"))?;

        Ok(Self {
            // Matching is case-insensitive by folding the lists once here.
            scam_keywords: lowercase_all(config.scam_keywords),
            urgency_phrases: lowercase_all(config.urgency_phrases),
            grammar_mistakes: lowercase_all(config.grammar_mistakes),
            patterns,
            sender_allowlist,
            weights,
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: LexiconConfig = serde_yaml::from_str(&content)?;
        Ok(Self::from_config(config)?)
    }
}

fn lowercase_all(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_builds() {
        let lexicon = Lexicon::default_lexicon().unwrap();
        assert_eq!(lexicon.scam_keywords.len(), 17);
        assert_eq!(lexicon.urgency_phrases.len(), 10);
        assert_eq!(lexicon.grammar_mistakes.len(), 8);
        assert_eq!(lexicon.patterns.len(), 3);
    }

    #[test]
    fn test_default_weights_validate() {
        assert!(FeatureWeights::default().validate().is_ok());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let err = FeatureWeights::new(0.5, 0.3, 0.2, 0.1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights { .. }));

        let mut config = LexiconConfig::default();
        config.weights.keyword = 0.9;
        assert!(Lexicon::from_config(config).is_err());
    }

    #[test]
    fn test_url_pattern_respects_allowlist() {
        let lexicon = Lexicon::default_lexicon().unwrap();
        let url = &lexicon.patterns[0];

        assert!(!url.is_match("see https://www.google.com/maps for directions"));
        assert!(!url.is_match("docs at http://www.microsoft.com/office"));
        assert_eq!(
            url.first_match("click http://secure-bank-verify.com now"),
            Some("http://secure-bank-verify.com")
        );
        // Missing the www. prefix counts as unknown, by design.
        assert!(url.is_match("https://google.com/search"));
        assert!(!url.is_match("no links here"));
    }

    #[test]
    fn test_bank_details_pattern() {
        let lexicon = Lexicon::default_lexicon().unwrap();
        let bank = &lexicon.patterns[1];

        assert_eq!(
            bank.first_match("please send your bank account details"),
            Some("bank account")
        );
        assert!(bank.is_match("Bank   routing numbers"));
        assert!(!bank.is_match("bank holiday notice"));
    }

    #[test]
    fn test_personal_info_pattern() {
        let lexicon = Lexicon::default_lexicon().unwrap();
        let personal = &lexicon.patterns[2];

        assert!(personal.is_match("send your password to us"));
        assert!(personal.is_match("send ur social security number"));
        assert!(!personal.is_match("send the report"));
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = LexiconConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: LexiconConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.scam_keywords, config.scam_keywords);
        assert_eq!(parsed.free_mail_providers, config.free_mail_providers);
    }

    #[test]
    fn test_partial_yaml_override_keeps_defaults() {
        let parsed: LexiconConfig =
            serde_yaml::from_str("scam_keywords:\n  - ponzi\n  - get rich quick\n").unwrap();
        assert_eq!(parsed.scam_keywords, vec!["ponzi", "get rich quick"]);
        assert_eq!(parsed.urgency_phrases.len(), 10);
        let lexicon = Lexicon::from_config(parsed).unwrap();
        assert_eq!(lexicon.scam_keywords.len(), 2);
    }
}
