//! Display labels, icons, and stable colors for sectors, countries and
//! regions.
//!
//! Each table is a closed match with an explicit fallback: unknown sectors
//! keep their raw name as label, and every unknown key resolves to the gray
//! `FALLBACK` / `FALLBACK_REGION` color.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGBA color with alpha in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// `#rrggbb`, dropping alpha.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

const BLUE: (u8, u8, u8) = (59, 130, 246);
const VIOLET: (u8, u8, u8) = (139, 92, 246);
const PINK: (u8, u8, u8) = (236, 72, 153);
const EMERALD: (u8, u8, u8) = (16, 185, 129);
const AMBER: (u8, u8, u8) = (245, 158, 11);
const RED: (u8, u8, u8) = (239, 68, 68);
const SKY: (u8, u8, u8) = (14, 165, 233);
const PURPLE: (u8, u8, u8) = (168, 85, 247);
const GREEN: (u8, u8, u8) = (34, 197, 94);
const ORANGE: (u8, u8, u8) = (249, 115, 22);
const SLATE: (u8, u8, u8) = (100, 116, 139);
const CYAN: (u8, u8, u8) = (6, 182, 212);
const YELLOW: (u8, u8, u8) = (234, 179, 8);
const ROSE: (u8, u8, u8) = (244, 63, 94);
const LIME: (u8, u8, u8) = (132, 204, 22);

const fn chart((r, g, b): (u8, u8, u8)) -> Rgba {
    Rgba::new(r, g, b, 0.8)
}

const fn region((r, g, b): (u8, u8, u8)) -> Rgba {
    Rgba::new(r, g, b, 0.85)
}

/// Color for any sector or country without an entry.
pub const FALLBACK: Rgba = Rgba::new(148, 163, 184, 0.8);
/// Color for any region without an entry.
pub const FALLBACK_REGION: Rgba = Rgba::new(148, 163, 184, 0.85);

/// Segment colors for the top-five simulation bar, in rank order.
pub const SIMULATION_PALETTE: [Rgba; 5] = [
    Rgba::opaque(0x3b, 0x82, 0xf6),
    Rgba::opaque(0x10, 0xb9, 0x81),
    Rgba::opaque(0xf5, 0x9e, 0x0b),
    Rgba::opaque(0xef, 0x44, 0x44),
    Rgba::opaque(0x8b, 0x5c, 0xf6),
];
/// Remainder segment of the simulation bar.
pub const SIMULATION_REMAINDER: Rgba = Rgba::opaque(0xcb, 0xd5, 0xe1);

/// Sector color. Covers GICS names and the Japanese TOPIX-style groupings.
pub fn sector_color(sector: &str) -> Rgba {
    match sector {
        "Information Technology" => chart(BLUE),
        "Financials" => chart(EMERALD),
        "Health Care" => chart(PINK),
        "Consumer Discretionary" => chart(AMBER),
        "Industrials" => chart(SLATE),
        "Communication Services" | "Telecommunication Services" => chart(VIOLET),
        "Consumer Staples" => chart(GREEN),
        "Energy" => chart(RED),
        "Utilities" => chart(SKY),
        "Materials" => chart(ORANGE),
        "Real Estate" => chart(PURPLE),
        "電気機器" => chart(BLUE),
        "情報・通信" => chart(VIOLET),
        "医薬品" => chart(PINK),
        "自動車・輸送機" => chart(SLATE),
        "銀行" => chart(EMERALD),
        "卸売" => chart(AMBER),
        "機械" => chart(SKY),
        "化学" => chart(ORANGE),
        "小売" => chart(GREEN),
        "保険" => chart(PURPLE),
        _ => FALLBACK,
    }
}

pub fn country_color(country: &str) -> Rgba {
    match country {
        "United States" => chart(BLUE),
        "Japan" => chart(RED),
        "United Kingdom" => chart(EMERALD),
        "China" => chart(AMBER),
        "France" => chart(VIOLET),
        "Germany" => chart(SLATE),
        "Canada" => chart(PINK),
        "Switzerland" => chart(GREEN),
        "Australia" => chart(ORANGE),
        "Taiwan" => chart(SKY),
        "India" => chart(PURPLE),
        "South Korea" => chart(CYAN),
        "Netherlands" => chart(YELLOW),
        "Hong Kong" => chart(ROSE),
        "Italy" => chart(LIME),
        _ => FALLBACK,
    }
}

pub fn region_color(name: &str) -> Rgba {
    match name {
        "North America" => region(BLUE),
        "Europe" => region(VIOLET),
        "Pacific" => region(EMERALD),
        "Emerging Markets" => region(AMBER),
        "Emerging Markets - Asia" => region(ORANGE),
        "Emerging Markets - Other" => region(RED),
        _ => FALLBACK_REGION,
    }
}

/// Japanese display label for a sector. Unknown sectors keep their raw name.
pub fn sector_label(sector: &str) -> &str {
    match sector {
        "Information Technology" => "情報・ハイテク",
        "Health Care" => "ヘルスケア",
        "Financials" => "金融",
        "Consumer Discretionary" => "一般消費財",
        "Communication Services" => "通信・サービス",
        "Industrials" => "資本財",
        "Consumer Staples" => "生活必需品",
        "Energy" => "エネルギー",
        "Utilities" => "公益事業",
        "Materials" => "素材",
        "Real Estate" => "不動産",
        "Technology" => "テクノロジー",
        "Unknown" => "その他",
        other => other,
    }
}

/// Icon shown on compact change cards. Fallback: 🏢.
pub fn sector_icon(sector: &str) -> &'static str {
    match sector {
        "Information Technology" => "💻",
        "Communication Services" => "📡",
        "Health Care" => "💊",
        "Financials" => "🏦",
        "Consumer Discretionary" => "👜",
        "Consumer Staples" => "🛒",
        "Industrials" => "🏗️",
        "Energy" => "⚡",
        "Materials" => "🧱",
        "Real Estate" => "🏠",
        "Utilities" => "💡",
        _ => "🏢",
    }
}
