//! Labeled amount extraction
//!
//! Scans a message for quantities introduced by a Spanish label
//! ("ventas 2.000.000", "costos fijos: 800.000"). Each field has an ordered
//! list of labels; the first label that matches and yields a parseable
//! number wins. Fields that cannot be found are absent, never zero.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::normalize::normalize_lower;
use crate::numbers::{parse_number, NUMBER_PATTERN};

/// Quantities the calculators know how to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    Sales,
    FixedCosts,
    VariableUnitCost,
    UnitPrice,
    Expenses,
    CostOfSales,
    NetIncome,
    CurrentAssets,
    CurrentLiabilities,
    TotalDebt,
    Ebitda,
    InterestExpense,
    OperatingIncome,
}

impl AmountField {
    pub const ALL: [AmountField; 13] = [
        AmountField::Sales,
        AmountField::FixedCosts,
        AmountField::VariableUnitCost,
        AmountField::UnitPrice,
        AmountField::Expenses,
        AmountField::CostOfSales,
        AmountField::NetIncome,
        AmountField::CurrentAssets,
        AmountField::CurrentLiabilities,
        AmountField::TotalDebt,
        AmountField::Ebitda,
        AmountField::InterestExpense,
        AmountField::OperatingIncome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::FixedCosts => "fixed_costs",
            Self::VariableUnitCost => "variable_unit_cost",
            Self::UnitPrice => "unit_price",
            Self::Expenses => "expenses",
            Self::CostOfSales => "cost_of_sales",
            Self::NetIncome => "net_income",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::TotalDebt => "total_debt",
            Self::Ebitda => "ebitda",
            Self::InterestExpense => "interest_expense",
            Self::OperatingIncome => "operating_income",
        }
    }

    /// Label patterns in priority order
    fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Sales => &[r"ventas?", r"ingresos?"],
            Self::FixedCosts => &[r"costos? fijos?", r"gastos? fijos?"],
            Self::VariableUnitCost => &[r"costo variable", r"costo unitario"],
            Self::UnitPrice => &[r"precio", r"ticket promedio"],
            Self::Expenses => &[r"egresos?", r"gastos?"],
            Self::CostOfSales => &[r"costo de ventas", r"costo ventas"],
            Self::NetIncome => &[r"utilidad neta", r"ganancia neta"],
            Self::CurrentAssets => &[r"activo corriente", r"activos corrientes"],
            Self::CurrentLiabilities => &[r"pasivo corriente", r"pasivos corrientes"],
            Self::TotalDebt => &[r"deuda total", r"pasivo total"],
            Self::Ebitda => &[r"ebitda"],
            Self::InterestExpense => &[r"intereses", r"gastos? financieros"],
            Self::OperatingIncome => &[r"utilidad operativa"],
        }
    }
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Label, then anything but a digit, then the number
static FIELD_PATTERNS: Lazy<Vec<(AmountField, Vec<Regex>)>> = Lazy::new(|| {
    AmountField::ALL
        .iter()
        .map(|field| {
            let patterns = field
                .labels()
                .iter()
                .map(|label| {
                    Regex::new(&format!(r"{}[^\d]*(?P<number>{})", label, NUMBER_PATTERN)).unwrap()
                })
                .collect();
            (*field, patterns)
        })
        .collect()
});

/// Sparse set of extracted amounts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountSet {
    values: BTreeMap<AmountField, f64>,
}

impl AmountSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `field`, or `None` when it was not found
    pub fn get(&self, field: AmountField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(AmountField, f64)> for AmountSet {
    fn from_iter<I: IntoIterator<Item = (AmountField, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Extract every labeled amount present in `text`.
pub fn extract_amounts(text: &str) -> AmountSet {
    let normalized = normalize_lower(text);

    let amounts: AmountSet = FIELD_PATTERNS
        .iter()
        .filter_map(|(field, patterns)| {
            find_value(&normalized, patterns).map(|value| (*field, value))
        })
        .collect();

    tracing::debug!(fields = amounts.len(), "Extracted amounts");
    amounts
}

fn find_value(normalized: &str, patterns: &[Regex]) -> Option<f64> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(normalized)
            .and_then(|caps| caps.name("number"))
            .and_then(|m| parse_number(m.as_str()))
    })
}

/// Find `keyword` followed by a signed number and a literal `%`; returns
/// the fraction (`35%` -> `0.35`, `-20%` -> `-0.2`).
pub fn extract_percent(text: &str, keyword: &str) -> Option<f64> {
    let normalized = normalize_lower(text);
    let keyword = regex::escape(&normalize_lower(keyword));
    let pattern = Regex::new(&format!(
        r"{}[^\d]*?(?P<sign>-\s*)?(?P<number>\d+(?:[.,]\d+)?)\s*%",
        keyword
    ))
    .ok()?;

    let caps = pattern.captures(&normalized)?;
    let value = parse_number(caps.name("number")?.as_str())?;
    let sign = if caps.name("sign").is_some() { -1.0 } else { 1.0 };
    Some(sign * value / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_even_inputs() {
        let amounts = extract_amounts("costos fijos 1000000 precio 10000 costo variable 4000");
        assert_eq!(amounts.get(AmountField::FixedCosts), Some(1_000_000.0));
        assert_eq!(amounts.get(AmountField::UnitPrice), Some(10_000.0));
        assert_eq!(amounts.get(AmountField::VariableUnitCost), Some(4_000.0));
        assert_eq!(amounts.get(AmountField::Sales), None);
    }

    #[test]
    fn test_label_priority_within_field() {
        // "ventas" is tried before "ingresos"
        let amounts = extract_amounts("ingresos 900 y ventas 1.500");
        assert_eq!(amounts.get(AmountField::Sales), Some(1500.0));

        let amounts = extract_amounts("ingresos 2000000 gastos 1500000");
        assert_eq!(amounts.get(AmountField::Sales), Some(2_000_000.0));
        assert_eq!(amounts.get(AmountField::Expenses), Some(1_500_000.0));
    }

    #[test]
    fn test_accents_and_separators() {
        let amounts = extract_amounts("Activo corriente: $12.500.000; pasivo corriente $5.000.000");
        assert_eq!(amounts.get(AmountField::CurrentAssets), Some(12_500_000.0));
        assert_eq!(amounts.get(AmountField::CurrentLiabilities), Some(5_000_000.0));
    }

    #[test]
    fn test_absent_is_not_zero() {
        let amounts = extract_amounts("tengo deuda total pero no se cuanto");
        assert_eq!(amounts.get(AmountField::TotalDebt), None);
        assert!(amounts.is_empty());
    }

    #[test]
    fn test_debt_fields() {
        let amounts = extract_amounts("deuda total 300 millones, ebitda 100, gastos financieros 20");
        assert_eq!(amounts.get(AmountField::TotalDebt), Some(300.0));
        assert_eq!(amounts.get(AmountField::Ebitda), Some(100.0));
        assert_eq!(amounts.get(AmountField::InterestExpense), Some(20.0));
    }

    #[test]
    fn test_extract_percent() {
        let text = "Costos fijos 500.000 y margen de contribución del 40%";
        assert_eq!(extract_percent(text, "margen de contribucion"), Some(0.4));
        assert_eq!(extract_percent("margen de contribucion 12,5 %", "margen de contribucion"), Some(0.125));
        assert_eq!(extract_percent("margen de contribucion 40", "margen de contribucion"), None);
        assert_eq!(extract_percent("sin margen", "margen de contribucion"), None);
    }

    #[test]
    fn test_extract_negative_percent() {
        assert_eq!(extract_percent("margen de contribucion -20%", "margen de contribucion"), Some(-0.2));
        assert_eq!(extract_percent("margen de contribucion: - 5 %", "margen de contribucion"), Some(-0.05));
        // A dash followed by words is punctuation, not a sign
        assert_eq!(extract_percent("margen de contribucion - del 40%", "margen de contribucion"), Some(0.4));
    }
}
