//! Net cash flow = income - expenses

use sme_advisor_text_processing::{extract_amounts, format_currency, AmountField};

use super::{render, CalculatorResult};

pub fn calculate(text: &str) -> Option<CalculatorResult> {
    let amounts = extract_amounts(text);
    let income = amounts.get(AmountField::Sales)?;
    let expenses = amounts.get(AmountField::Expenses)?;

    let net = income - expenses;
    Some(CalculatorResult::computed(render(
        "Con los datos suministrados, el flujo de caja neto estimado es:",
        &[
            format!("- Ingresos: {}", format_currency(income)),
            format!("- Egresos: {}", format_currency(expenses)),
            format!("- Neto: {}", format_currency(net)),
        ],
        "Este calculo no incluye impuestos ni pagos extraordinarios.",
        "Si quieres, puedo desagregar por semanas o categorias.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_cash_flow() {
        let result = calculate("ingresos 2000000 gastos 1500000").unwrap();
        let text = result.text();
        assert!(text.contains("flujo de caja neto"));
        assert!(text.contains("- Ingresos: $2,000,000"));
        assert!(text.contains("- Egresos: $1,500,000"));
        assert!(text.contains("- Neto: $500,000"));
    }

    #[test]
    fn test_negative_net() {
        let result = calculate("ventas 1.000.000 egresos 1.500.000").unwrap();
        assert!(result.text().contains("- Neto: $-500,000"));
    }

    #[test]
    fn test_requires_both_sides() {
        assert!(calculate("flujo de caja con ingresos 2000000").is_none());
        assert!(calculate("egresos 1500000").is_none());
    }
}
