use once_cell::sync::Lazy;
use regex::Regex;

use super::TopicIntent;
use crate::normalize::normalize_lower;

// Topic keyword patterns (priority order - first topic with a hit wins)
static TOPIC_PATTERNS: Lazy<Vec<(TopicIntent, Vec<Regex>)>> = Lazy::new(|| {
    let compile = |patterns: &[&str]| -> Vec<Regex> {
        patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
    };
    vec![
        (
            TopicIntent::BreakEven,
            compile(&[
                r"punto de equilibrio",
                r"break\s*even",
                r"umbral de rentabilidad",
                r"equilibrio financiero",
            ]),
        ),
        (
            TopicIntent::Cashflow,
            compile(&[r"flujo de caja", r"caja neta", r"caja mensual"]),
        ),
        (
            TopicIntent::Margins,
            compile(&[r"margen", r"rentabilidad", r"margen bruto", r"margen neto"]),
        ),
        (
            TopicIntent::Liquidity,
            compile(&[r"razon corriente", r"liquidez", r"activo corriente"]),
        ),
        (
            TopicIntent::Debt,
            compile(&[r"deuda", r"endeudamiento", r"ebitda", r"cobertura de intereses"]),
        ),
    ]
});

// Words that signal the user wants a number, not advice
static CALC_TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"calcula|calcular|cuanto|formula|numero|margen|punto de equilibrio").unwrap()
});

static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// Detect the financial topic of a message by keyword search.
pub fn detect_topic(text: &str) -> TopicIntent {
    let normalized = normalize_lower(text);

    TOPIC_PATTERNS
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| p.is_match(&normalized)))
        .map(|(topic, _)| *topic)
        .unwrap_or(TopicIntent::General)
}

/// Decide whether a message on `topic` should go to the local calculator.
///
/// Cash-flow keywords alone are too generic, so that topic additionally
/// requires a digit somewhere in the text unless a trigger word is present.
pub fn should_use_calculator(text: &str, topic: TopicIntent) -> bool {
    if topic == TopicIntent::General {
        return false;
    }

    let normalized = normalize_lower(text);
    if CALC_TRIGGER.is_match(&normalized) {
        return true;
    }

    match topic {
        TopicIntent::BreakEven | TopicIntent::Margins | TopicIntent::Liquidity | TopicIntent::Debt => {
            true
        }
        TopicIntent::Cashflow => DIGIT.is_match(&normalized),
        TopicIntent::General => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_topic() {
        assert_eq!(detect_topic("Quiero mi punto de equilibrio"), TopicIntent::BreakEven);
        assert_eq!(detect_topic("analisis break even"), TopicIntent::BreakEven);
        assert_eq!(detect_topic("flujo de caja de marzo"), TopicIntent::Cashflow);
        assert_eq!(detect_topic("mi margen neto"), TopicIntent::Margins);
        assert_eq!(detect_topic("Razón corriente de la empresa"), TopicIntent::Liquidity);
        assert_eq!(detect_topic("nivel de endeudamiento"), TopicIntent::Debt);
        assert_eq!(detect_topic("que impuestos debo pagar"), TopicIntent::General);
    }

    #[test]
    fn test_priority_order() {
        // Break-even outranks margins even though "rentabilidad" matches both
        assert_eq!(detect_topic("umbral de rentabilidad"), TopicIntent::BreakEven);
        // Cashflow outranks debt
        assert_eq!(detect_topic("flujo de caja y deuda"), TopicIntent::Cashflow);
        assert_eq!(detect_topic("BREAKEVEN"), TopicIntent::BreakEven);
    }

    #[test]
    fn test_general_never_calculates() {
        assert!(!should_use_calculator("calcula mis impuestos", TopicIntent::General));
    }

    #[test]
    fn test_trigger_words() {
        assert!(should_use_calculator("¿Cuánto es mi flujo de caja?", TopicIntent::Cashflow));
        assert!(should_use_calculator("calcular flujo de caja", TopicIntent::Cashflow));
    }

    #[test]
    fn test_strong_topics_always_calculate() {
        assert!(should_use_calculator("hablame de liquidez", TopicIntent::Liquidity));
        assert!(should_use_calculator("que es el ebitda", TopicIntent::Debt));
        assert!(should_use_calculator("equilibrio financiero", TopicIntent::BreakEven));
    }

    #[test]
    fn test_cashflow_needs_digits() {
        assert!(!should_use_calculator(
            "como mejorar mi flujo de caja",
            TopicIntent::Cashflow
        ));
        assert!(should_use_calculator(
            "flujo de caja: ingresos 2000000 gastos 1500000",
            TopicIntent::Cashflow
        ));
    }
}
