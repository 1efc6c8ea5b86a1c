//! Break-even point
//!
//! With a contribution margin percentage: sales = fixed costs / margin.
//! With unit price and variable cost: units = fixed costs / (price - cost),
//! sales = units * price. The margin percentage takes precedence.

use sme_advisor_text_processing::{
    extract_amounts, extract_percent, format_currency, format_percent, format_units, AmountField,
};

use super::{render, CalculatorResult};

const MARGIN_KEYWORD: &str = "margen de contribucion";

const MISSING_FIXED_COSTS: &str = "costos fijos mensuales";
const MISSING_PRICE_OR_MARGIN: &str = "precio promedio por unidad o margen de contribucion (%)";
const MISSING_VARIABLE_COST: &str = "costo variable unitario";

const INTRO: &str = "Con los datos suministrados, el punto de equilibrio estimado es:";

pub fn calculate(text: &str) -> CalculatorResult {
    let amounts = extract_amounts(text);
    let fixed_costs = amounts.get(AmountField::FixedCosts);
    let price = amounts.get(AmountField::UnitPrice);
    let variable_cost = amounts.get(AmountField::VariableUnitCost);
    let margin = extract_percent(text, MARGIN_KEYWORD);

    let mut missing = Vec::new();
    if fixed_costs.is_none() {
        missing.push(MISSING_FIXED_COSTS);
    }
    if price.is_none() && margin.is_none() {
        missing.push(MISSING_PRICE_OR_MARGIN);
    }
    // A margin percentage alone is enough; variable cost only matters with a price
    if variable_cost.is_none() && margin.is_none() && price.is_some() {
        missing.push(MISSING_VARIABLE_COST);
    }

    if !missing.is_empty() {
        return missing_data(&missing);
    }

    let Some(fixed_costs) = fixed_costs else {
        return missing_data(&[MISSING_FIXED_COSTS]);
    };

    if let Some(margin) = margin {
        return with_margin(fixed_costs, margin);
    }

    match (price, variable_cost) {
        (Some(price), Some(variable_cost)) => with_unit_costs(fixed_costs, price, variable_cost),
        _ => missing_data(&[MISSING_PRICE_OR_MARGIN]),
    }
}

fn missing_data(items: &[&str]) -> CalculatorResult {
    let steps: Vec<String> = items.iter().map(|item| format!("- Necesito {}.", item)).collect();
    CalculatorResult::missing_data(format!(
        "Puedo calcular el punto de equilibrio, pero necesito algunos datos.\n\n\
         {}\n\n\
         - Separar costos fijos y variables mejora la precision.\n\n\
         Cuando tengas los datos, compartelos y hago el calculo.",
        steps.join("\n")
    ))
}

fn with_margin(fixed_costs: f64, margin: f64) -> CalculatorResult {
    if margin <= 0.0 {
        return CalculatorResult::invalid(
            "El margen de contribucion debe ser mayor a 0%. \
             Revisa los datos y vuelve a intentarlo.",
        );
    }

    let sales = fixed_costs / margin;
    CalculatorResult::computed(render(
        INTRO,
        &[
            format!("- Costos fijos: {}", format_currency(fixed_costs)),
            format!("- Margen de contribucion: {}", format_percent(margin)),
            format!("- Ventas de equilibrio: {}", format_currency(sales)),
        ],
        "Si el margen baja, el punto de equilibrio sube.",
        "Si quieres, puedo convertir esto a unidades o ajustar con datos mas precisos.",
    ))
}

fn with_unit_costs(fixed_costs: f64, price: f64, variable_cost: f64) -> CalculatorResult {
    let contribution = price - variable_cost;
    if contribution <= 0.0 {
        return CalculatorResult::invalid(
            "El margen unitario es menor o igual a cero. \
             Necesitas un precio mayor o un costo variable menor para equilibrio.",
        );
    }

    let units = fixed_costs / contribution;
    let sales = units * price;
    CalculatorResult::computed(render(
        INTRO,
        &[
            format!("- Costos fijos: {}", format_currency(fixed_costs)),
            format!("- Precio unitario: {}", format_currency(price)),
            format!("- Costo variable unitario: {}", format_currency(variable_cost)),
            format!("- Unidades de equilibrio: {}", format_units(units)),
            format!("- Ventas de equilibrio: {}", format_currency(sales)),
        ],
        "Si los costos variables cambian, el equilibrio tambien cambia.",
        "Si quieres, revisamos escenarios y sensibilidad con mas datos.",
    ))
}
