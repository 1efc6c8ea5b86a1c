use once_cell::sync::Lazy;
use regex::Regex;

use super::ConversationalIntent;
use crate::normalize::normalize_lower;

// Whole-message patterns: the text must start with the trigger phrase.
// Order matters, "que tal estas" is a greeting before it is small talk.
static CONVERSATIONAL_PATTERNS: Lazy<Vec<(Regex, ConversationalIntent)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"^(?:hola|buenas|hey|que tal)\b.*$").unwrap(),
            ConversationalIntent::Greeting,
        ),
        (
            Regex::new(r"^(?:adios|nos vemos|hasta luego)\b.*$").unwrap(),
            ConversationalIntent::Farewell,
        ),
        (
            Regex::new(r"^(?:gracias|muchas gracias|mil gracias)\b.*$").unwrap(),
            ConversationalIntent::Thanks,
        ),
        (
            Regex::new(r"^(?:como estas|como te va|que tal estas)\b.*$").unwrap(),
            ConversationalIntent::Smalltalk,
        ),
    ]
});

/// Classify a message as courtesy or query.
pub fn classify_conversational(text: &str) -> ConversationalIntent {
    let normalized = normalize_lower(text.trim());
    let normalized = normalized.trim();

    CONVERSATIONAL_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(normalized))
        .map(|(_, intent)| *intent)
        .unwrap_or(ConversationalIntent::Query)
}
