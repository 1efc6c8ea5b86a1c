//! Text Processing for the SME advisor
//!
//! This crate turns free-form Spanish chat messages into structured signals:
//! - **Normalization**: accent folding so matching ignores diacritics
//! - **Numbers**: separator-agnostic parsing and currency/ratio/percent formatting
//! - **Intent Detection**: courtesy classification and financial topic detection
//! - **Amount Extraction**: labeled quantities (ventas, costos fijos, ...)
//! - **Preferences**: `guardar`/`recordar` and `mis datos` commands
//!
//! Every function is pure and total; a parse miss is `None`, never an error.
//!
//! # Example
//!
//! ```
//! use sme_advisor_text_processing::{extract_amounts, AmountField};
//!
//! let amounts = extract_amounts("Ingresos 2.000.000 y egresos 1.500.000");
//! assert_eq!(amounts.get(AmountField::Sales), Some(2_000_000.0));
//! assert_eq!(amounts.get(AmountField::Expenses), Some(1_500_000.0));
//! ```

pub mod amounts;
pub mod intent;
pub mod normalize;
pub mod numbers;
pub mod preferences;

pub use amounts::{extract_amounts, extract_percent, AmountField, AmountSet};
pub use intent::{
    classify_conversational, detect_topic, should_use_calculator, ConversationalIntent, TopicIntent,
};
pub use normalize::{normalize, normalize_lower};
pub use numbers::{format_currency, format_percent, format_ratio, format_units, parse_number};
pub use preferences::{is_show_preferences, parse_save_command, PreferenceCommand};
