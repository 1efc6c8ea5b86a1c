//! Gross and net margins over sales

use sme_advisor_text_processing::{extract_amounts, format_currency, format_percent, AmountField};

use super::{render, CalculatorResult};

pub fn calculate(text: &str) -> Option<CalculatorResult> {
    let amounts = extract_amounts(text);
    let sales = amounts.get(AmountField::Sales)?;

    let mut lines = Vec::new();
    if let Some(cost_of_sales) = amounts.get(AmountField::CostOfSales) {
        let gross = ratio_or_zero(sales - cost_of_sales, sales);
        lines.push(format!("- Margen bruto: {}", format_percent(gross)));
    }
    if let Some(net_income) = amounts.get(AmountField::NetIncome) {
        let net = ratio_or_zero(net_income, sales);
        lines.push(format!("- Margen neto: {}", format_percent(net)));
    }

    // Sales alone is not an answer
    if lines.is_empty() {
        return None;
    }

    lines.insert(0, format!("- Ventas: {}", format_currency(sales)));
    Some(CalculatorResult::computed(render(
        "Con los datos suministrados, estos son los margenes estimados:",
        &lines,
        "Revisa costos indirectos para explicar variaciones del margen.",
        "Si quieres, calculo margenes por producto o canal.",
    )))
}

fn ratio_or_zero(numerator: f64, sales: f64) -> f64 {
    if sales == 0.0 {
        0.0
    } else {
        numerator / sales
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gross_and_net() {
        let result =
            calculate("margen con ventas 1.000.000, costo de ventas 600.000 y utilidad neta 100.000")
                .unwrap();
        let text = result.text();
        assert!(text.contains("- Ventas: $1,000,000\n- Margen bruto: 40.0%\n- Margen neto: 10.0%"));
    }

    #[test]
    fn test_only_net_margin() {
        let result = calculate("ventas 500 ganancia neta 50").unwrap();
        assert!(result.text().contains("- Margen neto: 10.0%"));
        assert!(!result.text().contains("Margen bruto"));
    }

    #[test]
    fn test_sales_alone_declines() {
        assert!(calculate("cual es mi margen si vendo ventas 1000000").is_none());
    }

    #[test]
    fn test_requires_sales() {
        assert!(calculate("utilidad neta 100").is_none());
    }

    #[test]
    fn test_zero_sales_guarded() {
        let result = calculate("ventas 0 utilidad neta 100").unwrap();
        assert!(result.text().contains("- Margen neto: 0.0%"));
    }
}
