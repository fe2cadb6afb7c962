//! Change-history timeline.
//!
//! Changes and narrative events are bucketed by calendar day, emitted newest
//! first, and each bucket is classified into one of three layouts:
//!
//! 1. `Summary`: the day carries a count-only rebalance record.
//! 2. `Bulk`: four or more adds and removes on the same day.
//! 3. `Standard`: adds, removes, then a generic line for anything else.
//!
//! Classification is evaluated in that order; the first match wins.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::domain::{
    ChangeEntry, ChangeKind, IndexId, ItemizedChange, NarrativeEvent, ProductMapping, SummaryChange,
};
use crate::labels::sector_icon;
use crate::params::TypeFilter;

/// Label shown when the timeline has no groups.
pub const EMPTY_TIMELINE: &str = "履歴なし";

/// Minimum number of adds plus removes that switches a day to the bulk layout.
pub const BULK_THRESHOLD: usize = 4;

/// A run of text, flagged when it carries a Japan marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSegment {
    pub text: String,
    pub flagged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn badge(self) -> &'static str {
        match self {
            Direction::In => "IN",
            Direction::Out => "OUT",
        }
    }
}

/// One added or removed company, enriched for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeCard {
    pub direction: Direction,
    pub ticker: String,
    pub name: String,
    pub sector: Option<String>,
    pub icon: &'static str,
    pub product: Option<String>,
    /// Japanese company inside the all-country index.
    pub japan: bool,
    pub description: Option<String>,
}

impl ChangeCard {
    pub fn highlighted(&self) -> bool {
        self.product.is_some() || self.japan
    }
}

/// Fallback line for records that are neither adds nor removes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericLine {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub added_count: Option<u32>,
    pub removed_count: Option<u32>,
    pub description: Vec<TextSegment>,
    pub notes: Vec<TextSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layout", rename_all = "lowercase")]
pub enum GroupLayout {
    Summary(SummaryCard),
    Bulk {
        added: Vec<ChangeCard>,
        removed: Vec<ChangeCard>,
        note: Option<String>,
    },
    Standard {
        added: Vec<ChangeCard>,
        removed: Vec<ChangeCard>,
        other: Vec<GenericLine>,
    },
}

/// All changes and events sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    /// Changes in input order.
    pub changes: Vec<ChangeEntry>,
    /// Events in input order.
    pub events: Vec<NarrativeEvent>,
    pub layout: GroupLayout,
}

/// Build the timeline for `index`. Groups are strictly descending by date.
pub fn build_timeline(
    changes: &[ChangeEntry],
    events: &[NarrativeEvent],
    index: IndexId,
    filter: TypeFilter,
    products: &ProductMapping,
) -> Vec<DateGroup> {
    let mut buckets: BTreeMap<NaiveDate, (Vec<ChangeEntry>, Vec<NarrativeEvent>)> = BTreeMap::new();

    for change in changes.iter().filter(|c| filter.admits(&c.kind())) {
        buckets.entry(change.date()).or_default().0.push(change.clone());
    }

    for event in events.iter().filter(|e| e.applies_to(index)) {
        let Some(date) = event.anchor_date() else {
            debug!(year = event.year, "event year out of range, skipped");
            continue;
        };
        buckets.entry(date).or_default().1.push(event.clone());
    }

    let groups: Vec<DateGroup> = buckets
        .into_iter()
        .rev()
        .map(|(date, (changes, events))| {
            let layout = classify(&changes, index, products);
            DateGroup { date, changes, events, layout }
        })
        .collect();

    debug!(index = %index, filter = filter.as_str(), groups = groups.len(), "timeline built");
    groups
}

fn classify(changes: &[ChangeEntry], index: IndexId, products: &ProductMapping) -> GroupLayout {
    if let Some(summary) = changes.iter().find_map(ChangeEntry::as_summary) {
        return GroupLayout::Summary(summary_card(summary));
    }

    let itemized = || changes.iter().filter_map(ChangeEntry::as_itemized);
    let cards = |kind: ChangeKind, direction: Direction| -> Vec<ChangeCard> {
        itemized()
            .filter(|c| c.kind == kind)
            .map(|c| change_card(c, direction, index, products))
            .collect()
    };

    let added = cards(ChangeKind::Add, Direction::In);
    let removed = cards(ChangeKind::Remove, Direction::Out);

    if added.len() + removed.len() >= BULK_THRESHOLD {
        let note = changes
            .iter()
            .filter_map(ChangeEntry::notes)
            .find(|n| !n.is_empty())
            .map(str::to_string);
        return GroupLayout::Bulk { added, removed, note };
    }

    let other = itemized()
        .filter(|c| !matches!(c.kind, ChangeKind::Add | ChangeKind::Remove))
        .map(generic_line)
        .collect();

    GroupLayout::Standard { added, removed, other }
}

fn summary_card(summary: &SummaryChange) -> SummaryCard {
    SummaryCard {
        added_count: summary.added_count,
        removed_count: summary.removed_count,
        description: highlight_markers(summary.description.as_deref().unwrap_or("")),
        notes: highlight_markers(summary.notes.as_deref().unwrap_or("")),
    }
}

fn change_card(
    change: &ItemizedChange,
    direction: Direction,
    index: IndexId,
    products: &ProductMapping,
) -> ChangeCard {
    let sector = change.sector.clone().filter(|s| !s.is_empty());
    ChangeCard {
        direction,
        ticker: change.ticker_str().to_string(),
        name: change.name_str().to_string(),
        icon: sector_icon(sector.as_deref().unwrap_or("")),
        sector,
        product: products
            .lookup(change.ticker_str(), change.name_str())
            .map(str::to_string),
        japan: index.is_all_country() && change.country.as_deref() == Some("Japan"),
        description: change.description.clone(),
    }
}

fn generic_line(change: &ItemizedChange) -> GenericLine {
    let text = change
        .description
        .as_deref()
        .or(change.name.as_deref())
        .or(change.ticker.as_deref())
        .unwrap_or("");
    let label = match change.kind.as_str() {
        "" => "other",
        kind => kind,
    };
    GenericLine {
        label: label.to_string(),
        text: text.to_string(),
    }
}

fn marker_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"日本[:：][^。\n<]*|\(JP\)").ok())
        .as_ref()
}

/// Split `text` into runs, flagging each `日本:`/`日本：` clause (up to the
/// next `。`, newline, `<` or end of text) and every literal `(JP)`.
pub fn highlight_markers(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let matches = marker_pattern().into_iter().flat_map(|re| re.find_iter(text));
    for m in matches {
        if m.start() > cursor {
            segments.push(TextSegment { text: text[cursor..m.start()].to_string(), flagged: false });
        }
        segments.push(TextSegment { text: m.as_str().to_string(), flagged: true });
        cursor = m.end();
    }
    if cursor < text.len() {
        segments.push(TextSegment { text: text[cursor..].to_string(), flagged: false });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(json: &str) -> ChangeEntry {
        serde_json::from_str(json).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(year: i32, indices: &[&str]) -> NarrativeEvent {
        NarrativeEvent {
            year,
            description: format!("event {year}"),
            details: String::new(),
            indices: indices.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn groups_descend_by_date() {
        let changes = vec![
            change(r#"{"date": "2020-03-01", "type": "add", "ticker": "A"}"#),
            change(r#"{"date": "2024-06-01", "type": "add", "ticker": "B"}"#),
            change(r#"{"date": "2022-01-15", "type": "remove", "ticker": "C"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Sp500, TypeFilter::All, &ProductMapping::default());
        let dates: Vec<_> = groups.iter().map(|g| g.date).collect();
        assert_eq!(dates, vec![day(2024, 6, 1), day(2022, 1, 15), day(2020, 3, 1)]);
    }

    #[test]
    fn same_day_changes_share_a_group_in_input_order() {
        let changes = vec![
            change(r#"{"date": "2024-06-24", "type": "remove", "ticker": "ILMN"}"#),
            change(r#"{"date": "2024-06-24", "type": "add", "ticker": "ARM"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Nasdaq100, TypeFilter::All, &ProductMapping::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].changes, changes);
    }

    #[test]
    fn events_anchor_to_new_year_and_respect_index() {
        let events = vec![event(2008, &["sp500", "topix"]), event(2011, &["topix"])];
        let groups = build_timeline(&[], &events, IndexId::Sp500, TypeFilter::All, &ProductMapping::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].date, day(2008, 1, 1));
        assert_eq!(groups[0].events.len(), 1);
    }

    #[test]
    fn events_ignore_type_filter() {
        let changes = vec![change(r#"{"date": "2021-05-01", "type": "add", "ticker": "A"}"#)];
        let events = vec![event(2020, &["sp500"])];
        let groups = build_timeline(&changes, &events, IndexId::Sp500, TypeFilter::Remove, &ProductMapping::default());
        assert_eq!(groups.len(), 1);
        assert!(groups[0].changes.is_empty());
        assert_eq!(groups[0].events.len(), 1);
    }

    #[test]
    fn five_changes_take_bulk_layout() {
        let changes = vec![
            change(r#"{"date": "2025-03-24", "type": "add", "ticker": "DASH", "notes": ""}"#),
            change(r#"{"date": "2025-03-24", "type": "add", "ticker": "TKO", "notes": "四半期入替"}"#),
            change(r#"{"date": "2025-03-24", "type": "remove", "ticker": "BWA"}"#),
            change(r#"{"date": "2025-03-24", "type": "remove", "ticker": "TFX"}"#),
            change(r#"{"date": "2025-03-24", "type": "remove", "ticker": "CE"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Sp500, TypeFilter::All, &ProductMapping::default());
        match &groups[0].layout {
            GroupLayout::Bulk { added, removed, note } => {
                assert_eq!(added.len(), 2);
                assert_eq!(removed.len(), 3);
                assert_eq!(note.as_deref(), Some("四半期入替"));
                assert_eq!(removed[0].direction.badge(), "OUT");
            }
            other => panic!("expected bulk layout, got {other:?}"),
        }
    }

    #[test]
    fn summary_wins_over_bulk() {
        let changes = vec![
            change(r#"{"date": "2025-11-24", "type": "add", "ticker": "A"}"#),
            change(r#"{"date": "2025-11-24", "type": "add", "ticker": "B"}"#),
            change(r#"{"date": "2025-11-24", "type": "add", "ticker": "C"}"#),
            change(r#"{"date": "2025-11-24", "type": "add", "ticker": "D"}"#),
            change(r#"{"date": "2025-11-24", "type": "rebalance", "addedCount": 45, "removedCount": 42,
                       "notes": "日本: 3銘柄追加。米国: 12銘柄"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Acwi, TypeFilter::All, &ProductMapping::default());
        match &groups[0].layout {
            GroupLayout::Summary(card) => {
                assert_eq!(card.added_count, Some(45));
                assert_eq!(card.removed_count, Some(42));
                assert_eq!(card.notes[0], TextSegment { text: "日本: 3銘柄追加".into(), flagged: true });
            }
            other => panic!("expected summary layout, got {other:?}"),
        }
    }

    #[test]
    fn standard_layout_keeps_unknown_and_itemized_rebalance() {
        let changes = vec![
            change(r#"{"date": "2020-08-31", "type": "add", "ticker": "TSLA"}"#),
            change(r#"{"date": "2020-08-31", "type": "split", "description": "4:1 split"}"#),
            change(r#"{"date": "2020-08-31", "type": "rebalance", "ticker": "AAPL", "name": "Apple"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Sp500, TypeFilter::All, &ProductMapping::default());
        match &groups[0].layout {
            GroupLayout::Standard { added, removed, other } => {
                assert_eq!(added.len(), 1);
                assert!(removed.is_empty());
                assert_eq!(
                    other,
                    &vec![
                        GenericLine { label: "split".into(), text: "4:1 split".into() },
                        GenericLine { label: "rebalance".into(), text: "Apple".into() },
                    ]
                );
            }
            other => panic!("expected standard layout, got {other:?}"),
        }
    }

    #[test]
    fn untyped_record_becomes_other_line() {
        let changes = vec![
            change(r#"{"date": "2024-03-18", "type": "add", "ticker": "SMCI"}"#),
            change(r#"{"date": "2024-03-18", "description": "index methodology note"}"#),
        ];
        let groups = build_timeline(&changes, &[], IndexId::Sp500, TypeFilter::All, &ProductMapping::default());
        match &groups[0].layout {
            GroupLayout::Standard { added, other, .. } => {
                assert_eq!(added.len(), 1);
                assert_eq!(
                    other,
                    &vec![GenericLine { label: "other".into(), text: "index methodology note".into() }]
                );
            }
            other => panic!("expected standard layout, got {other:?}"),
        }

        let adds = build_timeline(&changes, &[], IndexId::Sp500, TypeFilter::Add, &ProductMapping::default());
        assert_eq!(adds.len(), 1);
        assert!(matches!(&adds[0].layout, GroupLayout::Standard { other, .. } if other.is_empty()));
    }

    #[test]
    fn cards_are_enriched() {
        let products: ProductMapping = [("7203", "プリウス")].into_iter().collect();
        let changes = vec![change(
            r#"{"date": "2024-05-31", "type": "add", "ticker": "7203 JP", "name": "Toyota",
                "sector": "Consumer Discretionary", "country": "Japan"}"#,
        )];
        let groups = build_timeline(&changes, &[], IndexId::Acwi, TypeFilter::All, &products);
        let GroupLayout::Standard { added, .. } = &groups[0].layout else {
            panic!("expected standard layout");
        };
        assert_eq!(added[0].product.as_deref(), Some("プリウス"));
        assert!(added[0].japan);
        assert_eq!(added[0].icon, "👜");
        assert!(added[0].highlighted());

        let groups = build_timeline(&changes, &[], IndexId::Topix, TypeFilter::All, &products);
        let GroupLayout::Standard { added, .. } = &groups[0].layout else {
            panic!("expected standard layout");
        };
        assert!(!added[0].japan);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = build_timeline(&[], &[], IndexId::Topix, TypeFilter::All, &ProductMapping::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn markers_split_text() {
        let segments = highlight_markers("MSCI定期見直し(JP)。日本：5銘柄\n他");
        let flagged: Vec<_> = segments.iter().filter(|s| s.flagged).map(|s| s.text.as_str()).collect();
        assert_eq!(flagged, vec!["(JP)", "日本：5銘柄"]);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, "MSCI定期見直し(JP)。日本：5銘柄\n他");
    }

    #[test]
    fn markers_on_empty_text() {
        assert!(highlight_markers("").is_empty());
        assert!(!highlight_markers("no markers")[0].flagged);
    }
}
