//! Canned replies that never reach the language model

use sme_advisor_config::prompts;
use sme_advisor_text_processing::ConversationalIntent;

/// Fixed reply for a courtesy message; `None` for queries.
pub fn courtesy_reply(intent: ConversationalIntent) -> Option<&'static str> {
    match intent {
        ConversationalIntent::Greeting => Some(prompts::GREETING_REPLY),
        ConversationalIntent::Farewell => Some(prompts::FAREWELL_REPLY),
        ConversationalIntent::Thanks => Some(prompts::THANKS_REPLY),
        ConversationalIntent::Smalltalk => Some(prompts::SMALLTALK_REPLY),
        ConversationalIntent::Query => None,
    }
}

/// Confirmation after a preference was stored
pub fn saved_preference_reply(key: &str, value: &str) -> String {
    format!(
        "Listo. Guarde {} = {}. Si quieres verlos, escribe: mis datos.",
        key, value
    )
}

/// Strip LaTeX inline-math delimiters the model sometimes emits.
pub fn clean_math_delimiters(text: &str) -> String {
    text.replace("\\(", "(").replace("\\)", ")")
}
