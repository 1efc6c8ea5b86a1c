//! Presentation of stored preferences

use sme_advisor_core::StoredPreference;

fn sorted_by_key(items: &[StoredPreference]) -> Vec<&StoredPreference> {
    let mut sorted: Vec<&StoredPreference> = items.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));
    sorted
}

/// Reply listing the user's data, or a hint on how to save some.
pub fn format_preferences(items: &[StoredPreference]) -> String {
    if items.is_empty() {
        return "No tengo datos guardados. Puedes decir por ejemplo: \
                guardar: sector=alimentos o guardar: ciudad=Bogota."
            .to_string();
    }

    let mut lines = vec!["Estos son los datos guardados:".to_string(), String::new()];
    lines.extend(
        sorted_by_key(items)
            .into_iter()
            .map(|item| format!("- {}: {}", item.key, item.value)),
    );
    lines.push(String::new());
    lines.push("Si quieres actualizar alguno, escribe: guardar: clave=valor".to_string());
    lines.join("\n")
}

/// Context line handed to the language model; empty without preferences.
pub fn build_preference_context(items: &[StoredPreference]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = sorted_by_key(items)
        .into_iter()
        .map(|item| format!("{}={}", item.key, item.value))
        .collect();
    format!("Datos del usuario: {}", parts.join(", "))
}
