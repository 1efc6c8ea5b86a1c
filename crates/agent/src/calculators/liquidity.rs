//! Current ratio = current assets / current liabilities

use sme_advisor_text_processing::{extract_amounts, format_currency, format_ratio, AmountField};

use super::{render, CalculatorResult};

pub fn calculate(text: &str) -> Option<CalculatorResult> {
    let amounts = extract_amounts(text);
    let assets = amounts.get(AmountField::CurrentAssets)?;
    let liabilities = amounts.get(AmountField::CurrentLiabilities)?;

    let ratio = if liabilities == 0.0 {
        0.0
    } else {
        assets / liabilities
    };

    Some(CalculatorResult::computed(render(
        "Con los datos suministrados, la razon corriente estimada es:",
        &[
            format!("- Activo corriente: {}", format_currency(assets)),
            format!("- Pasivo corriente: {}", format_currency(liabilities)),
            format!("- Razon corriente: {}", format_ratio(ratio)),
        ],
        "Un valor bajo puede presionar la caja de corto plazo.",
        "Si quieres, revisamos liquidez proyectada y capital de trabajo.",
    )))
}
