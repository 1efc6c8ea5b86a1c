//! Preference commands embedded in chat text
//!
//! `guardar: sector=retail` and `recordar ciudad: Bogota` store a key/value
//! pair for the user; `mis datos` and friends list what was stored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, normalize_lower};

static SAVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<verb>guardar|recordar)\s*[:\-]?\s*(?P<key>[^:=]+?)\s*[:=]\s*(?P<value>.+)$")
        .unwrap()
});

static SHOW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:mis datos|mis preferencias|ver datos|ver preferencias)$").unwrap());

/// A parsed "save" instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceCommand {
    /// Lower-cased, diacritic-free key
    pub key: String,
    /// Value exactly as typed, trimmed
    pub value: String,
}

impl PreferenceCommand {
    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

/// Parse `guardar`/`recordar` commands.
///
/// The command shape is checked on the normalized text, but the value is cut
/// from the original so its casing and accents survive.
pub fn parse_save_command(text: &str) -> Option<PreferenceCommand> {
    let normalized = normalize_lower(text.trim());
    let caps = SAVE_PATTERN.captures(&normalized)?;
    let verb_len = caps.name("verb")?.end();

    let original = text.trim();
    let rest = skip_normalized(original, verb_len).trim_start();
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('-'))
        .unwrap_or(rest)
        .trim_start();

    let (raw_key, raw_value) = rest.split_once(|c: char| c == ':' || c == '=')?;

    let key = normalize(&raw_key.trim().to_lowercase()).trim().to_string();
    let value = raw_value.trim().to_string();
    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some(PreferenceCommand { key, value })
}

/// Suffix of `text` after the prefix whose normalized form is `normalized_len`
/// bytes long. Characters that fold to nothing (`¡`, `¿`) take no room.
fn skip_normalized(text: &str, normalized_len: usize) -> &str {
    let mut consumed = 0;
    for (idx, ch) in text.char_indices() {
        if consumed >= normalized_len {
            return &text[idx..];
        }
        consumed += normalize_lower(ch.encode_utf8(&mut [0; 4])).len();
    }
    ""
}

/// True for the fixed "show my data" phrases.
pub fn is_show_preferences(text: &str) -> bool {
    let normalized = normalize_lower(text.trim());
    SHOW_PATTERN.is_match(normalized.trim())
}
