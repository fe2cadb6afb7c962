use serde::Serialize;

use crate::domain::{Horizon, OrderedMap};

/// Placeholder for a horizon reported as `null`.
pub const MISSING_RETURN: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnLine {
    pub horizon: Horizon,
    pub label: &'static str,
    pub value: Option<f64>,
    pub formatted: String,
    pub tone: Tone,
}

/// `+12.3%` / `-3.2%`, one decimal.
pub fn format_return(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.1}%", value.abs())
    } else {
        format!("{value:.1}%")
    }
}

/// One line per horizon present in `returns`, in display order. A horizon
/// with a `null` value renders the placeholder; an absent key is skipped.
pub fn summarize(returns: &OrderedMap<Option<f64>>) -> Vec<ReturnLine> {
    Horizon::ORDERED
        .into_iter()
        .filter_map(|horizon| {
            let value = *returns.get(horizon.key())?;
            let (formatted, tone) = match value {
                Some(v) if v >= 0.0 => (format_return(v), Tone::Positive),
                Some(v) => (format_return(v), Tone::Negative),
                None => (MISSING_RETURN.to_string(), Tone::Neutral),
            };
            Some(ReturnLine {
                horizon,
                label: horizon.label(),
                value,
                formatted,
                tone,
            })
        })
        .collect()
}
