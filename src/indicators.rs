use crate::analyzer::EmailText;
use crate::lexicon::Lexicon;

/// Re-scan the email and explain what looks wrong, in fixed order: keyword
/// hits (lexicon order), then pattern hits with the exact matched text, then
/// the sender-domain check. Empty when nothing triggers.
pub fn scam_indicators(lexicon: &Lexicon, subject: &str, body: &str, sender: &str) -> Vec<String> {
    let text = EmailText::new(subject, body);
    let mut indicators = Vec::new();

    for keyword in &lexicon.scam_keywords {
        if text.folded.contains(keyword.as_str()) {
            indicators.push(format!("Contains suspicious keyword: {}", keyword));
        }
    }

    for pattern in &lexicon.patterns {
        if let Some(found) = pattern.first_match(&text.folded) {
            indicators.push(format!("Contains suspicious pattern: {}", found));
        }
    }

    if !lexicon.sender_allowlist.is_match(sender) {
        indicators.push(format!("Sender domain may be suspicious: {}", sender));
    }

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::default_lexicon().unwrap()
    }

    #[test]
    fn test_empty_for_clean_email_from_free_mail() {
        let indicators = scam_indicators(
            &lexicon(),
            "Lunch on Friday?",
            "Shall we try the new place around the corner?",
            "friend@gmail.com",
        );
        assert!(indicators.is_empty());
    }

    #[test]
    fn test_free_mail_senders_never_flagged() {
        let lexicon = lexicon();
        for sender in [
            "user@gmail.com",
            "user@yahoo.com",
            "user@outlook.com",
            "user@hotmail.com",
            "user@aol.com",
        ] {
            let indicators = scam_indicators(&lexicon, "hello", "hello", sender);
            assert!(
                !indicators.iter().any(|i| i.contains("Sender domain")),
                "{sender} should not be flagged"
            );
        }
    }

    #[test]
    fn test_unknown_sender_always_flagged() {
        let indicators = scam_indicators(
            &lexicon(),
            "hello",
            "hello",
            "agent@international-lottery-winner.org",
        );
        assert_eq!(
            indicators,
            vec![
                "Sender domain may be suspicious: agent@international-lottery-winner.org"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_empty_sender_is_flagged_not_fatal() {
        let indicators = scam_indicators(&lexicon(), "", "", "");
        assert_eq!(indicators, vec!["Sender domain may be suspicious: ".to_string()]);
    }

    #[test]
    fn test_indicator_ordering() {
        let indicators = scam_indicators(
            &lexicon(),
            "Lottery winner",
            "Visit http://claim-prize.example and share your bank details",
            "noreply@claim-prize.example",
        );
        assert_eq!(
            indicators,
            vec![
                "Contains suspicious keyword: lottery".to_string(),
                "Contains suspicious keyword: winner".to_string(),
                "Contains suspicious pattern: http://claim-prize.example".to_string(),
                "Contains suspicious pattern: bank details".to_string(),
                "Sender domain may be suspicious: noreply@claim-prize.example".to_string(),
            ]
        );
    }

    #[test]
    fn test_pattern_indicator_reports_first_match() {
        let indicators = scam_indicators(
            &lexicon(),
            "",
            "bank routing or bank account, either works",
            "user@gmail.com",
        );
        assert_eq!(
            indicators,
            vec!["Contains suspicious pattern: bank routing".to_string()]
        );
    }
}
