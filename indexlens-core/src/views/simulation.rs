//! "What if I invested X" breakdown across the largest holdings.

use serde::Serialize;

use crate::domain::{ConstituentRecord, IndexSnapshot, ProductMapping};
use crate::labels::{Rgba, SIMULATION_PALETTE, SIMULATION_REMAINDER};

/// Number of individually listed holdings.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulatedHolding {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub weight: f64,
    /// Whole-unit amount, rounded half up.
    pub invested: f64,
    pub product: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub amount: f64,
    pub top: Vec<SimulatedHolding>,
    pub other_amount: f64,
    pub other_count: usize,
}

/// One segment of the proportional bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSegment {
    pub label: String,
    pub weight: f64,
    pub color: Rgba,
}

/// Half-up rounding for the non-negative amounts the simulator produces.
pub fn round_half_up(x: f64) -> f64 {
    x.round()
}

/// Whole yen with thousands separators, e.g. `¥1,000,000`.
pub fn format_yen(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}¥{grouped}")
}

/// Split `amount` across the five heaviest constituents and the remainder.
///
/// Each bucket is rounded on its own; the rounding residue is not
/// redistributed, so the buckets may not sum exactly to `amount`.
pub fn simulate(amount: f64, constituents: &[ConstituentRecord], total_count: usize) -> Simulation {
    let amount = if amount.is_finite() && amount > 0.0 { amount } else { 0.0 };

    let mut ranked: Vec<&ConstituentRecord> = constituents.iter().collect();
    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let top: Vec<SimulatedHolding> = ranked
        .into_iter()
        .take(TOP_N)
        .map(|c| SimulatedHolding {
            ticker: c.ticker.clone(),
            name: c.name.clone(),
            sector: c.sector.clone(),
            weight: c.weight,
            invested: round_half_up(amount * c.weight / 100.0),
            product: None,
        })
        .collect();

    let top_weight: f64 = top.iter().map(|h| h.weight).sum();

    Simulation {
        amount,
        other_amount: round_half_up(amount * (100.0 - top_weight) / 100.0),
        other_count: total_count.saturating_sub(TOP_N),
        top,
    }
}

/// [`simulate`] over a snapshot, with each holding enriched from `products`.
pub fn simulate_snapshot(amount: f64, snapshot: &IndexSnapshot, products: &ProductMapping) -> Simulation {
    let mut sim = simulate(amount, &snapshot.constituents, snapshot.constituent_count());
    for holding in &mut sim.top {
        holding.product = products.lookup(&holding.ticker, &holding.name).map(str::to_string);
    }
    sim
}

impl Simulation {
    pub fn top_weight(&self) -> f64 {
        self.top.iter().map(|h| h.weight).sum()
    }

    pub fn total_invested(&self) -> f64 {
        self.top.iter().map(|h| h.invested).sum::<f64>() + self.other_amount
    }

    /// Top holdings in palette order followed by a gray remainder.
    pub fn bar_segments(&self) -> Vec<BarSegment> {
        let mut segments: Vec<BarSegment> = self
            .top
            .iter()
            .zip(SIMULATION_PALETTE)
            .map(|(h, color)| BarSegment {
                label: h.ticker.clone(),
                weight: h.weight,
                color,
            })
            .collect();
        segments.push(BarSegment {
            label: "その他".to_string(),
            weight: (100.0 - self.top_weight()).max(0.0),
            color: SIMULATION_REMAINDER,
        });
        segments
    }
}
