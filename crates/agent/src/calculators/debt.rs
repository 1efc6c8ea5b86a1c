//! Leverage (debt / EBITDA) and interest coverage (EBITDA / interest)
//!
//! Operating income stands in for EBITDA when EBITDA is missing or zero.

use sme_advisor_text_processing::{extract_amounts, format_ratio, AmountField};

use super::{render, CalculatorResult};

pub fn calculate(text: &str) -> Option<CalculatorResult> {
    let amounts = extract_amounts(text);
    let debt = amounts.get(AmountField::TotalDebt);
    let ebitda = amounts
        .get(AmountField::Ebitda)
        .filter(|v| *v != 0.0)
        .or_else(|| amounts.get(AmountField::OperatingIncome))
        .filter(|v| *v != 0.0);
    let interest = amounts.get(AmountField::InterestExpense).filter(|v| *v != 0.0);

    let mut lines = Vec::new();
    if let (Some(debt), Some(ebitda)) = (debt, ebitda) {
        lines.push(format!("- Deuda/EBITDA: {}", format_ratio(debt / ebitda)));
    }
    if let (Some(interest), Some(ebitda)) = (interest, ebitda) {
        lines.push(format!("- Cobertura de intereses: {}", format_ratio(ebitda / interest)));
    }

    if lines.is_empty() {
        return None;
    }

    Some(CalculatorResult::computed(render(
        "Con los datos suministrados, estos son los indicadores de deuda:",
        &lines,
        "Ajusta los calculos con datos mensuales comparables.",
        "Si quieres, analizamos escenarios de pago y sensibilidad.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_indicators() {
        let result = calculate("deuda total 300.000.000, ebitda 100.000.000, intereses 20.000.000").unwrap();
        let text = result.text();
        assert!(text.contains("- Deuda/EBITDA: 3.00\n- Cobertura de intereses: 5.00"));
    }

    #[test]
    fn test_operating_income_as_proxy() {
        let result = calculate("pasivo total 500 y utilidad operativa 250").unwrap();
        assert!(result.text().contains("- Deuda/EBITDA: 2.00"));
        assert!(!result.text().contains("Cobertura"));
    }

    #[test]
    fn test_zero_ebitda_falls_back_to_operating_income() {
        let result = calculate("deuda total 100 ebitda 0 utilidad operativa 50").unwrap();
        assert!(result.text().contains("- Deuda/EBITDA: 2.00"));
    }

    #[test]
    fn test_coverage_only() {
        let result = calculate("endeudamiento: ebitda 90 gastos financieros 30").unwrap();
        assert!(result.text().contains("- Cobertura de intereses: 3.00"));
        assert!(!result.text().contains("Deuda/EBITDA"));
    }

    #[test]
    fn test_nothing_computable() {
        assert!(calculate("cuanta deuda total 100 puedo tomar").is_none());
        assert!(calculate("ebitda 100 intereses 0").is_none());
    }
}
