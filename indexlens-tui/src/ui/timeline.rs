//! Panel 2: constituent change history, newest first.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use indexlens_core::data::DataStore;
use indexlens_core::domain::dates::format_day;
use indexlens_core::labels::sector_label;
use indexlens_core::views::timeline::{Direction, GenericLine};
use indexlens_core::views::{build_timeline, ChangeCard, DateGroup, GroupLayout, TextSegment, EMPTY_TIMELINE};

use super::{placeholder, visible};
use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let groups = build_timeline(
        store.changes(),
        store.events(),
        store.index(),
        app.params.type_filter,
        store.products(),
    );

    let header = Line::from(vec![
        Span::styled("種別 ", theme::muted()),
        Span::styled(app.params.type_filter.as_str(), theme::accent_bold()),
        Span::styled(" [f]   ", theme::muted()),
        Span::styled(format!("{} 日分", groups.len()), theme::muted()),
    ]);

    let body = if groups.is_empty() {
        vec![placeholder(EMPTY_TIMELINE)]
    } else {
        timeline_lines(&groups)
    };

    let height = area.height.saturating_sub(2) as usize;
    let mut lines = vec![header, Line::from("")];
    lines.extend(visible(body, app.scroll, height));
    f.render_widget(Paragraph::new(lines), area);
}

fn timeline_lines(groups: &[DateGroup]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(Line::from(Span::styled(
            format!("■ {}", format_day(Some(group.date))),
            theme::accent_bold(),
        )));

        for event in &group.events {
            lines.push(Line::from(vec![
                Span::styled("  ◆ ", theme::warning()),
                Span::styled(event.description.clone(), theme::text()),
            ]));
            if !event.details.is_empty() {
                lines.push(Line::from(Span::styled(format!("    {}", event.details), theme::muted())));
            }
        }

        match &group.layout {
            GroupLayout::Summary(card) => {
                let counts = format!(
                    "  +{} / -{}  ",
                    count(card.added_count),
                    count(card.removed_count)
                );
                let mut spans = vec![Span::styled(counts, theme::text())];
                spans.extend(segment_spans(&card.description));
                lines.push(Line::from(spans));
                if !card.notes.is_empty() {
                    let mut spans = vec![Span::raw("    ")];
                    spans.extend(segment_spans(&card.notes));
                    lines.push(Line::from(spans));
                }
            }
            GroupLayout::Bulk { added, removed, note } => {
                lines.push(Line::from(Span::styled(
                    format!("  一括入替  IN {} / OUT {}", added.len(), removed.len()),
                    theme::text(),
                )));
                if let Some(note) = note {
                    lines.push(Line::from(Span::styled(format!("    {note}"), theme::muted())));
                }
                lines.push(ticker_row(Direction::In, added));
                lines.push(ticker_row(Direction::Out, removed));
            }
            GroupLayout::Standard { added, removed, other } => {
                lines.extend(added.iter().chain(removed).map(card_line));
                lines.extend(other.iter().map(generic_line));
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

fn count(n: Option<u32>) -> String {
    n.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string())
}

fn badge(direction: Direction) -> Span<'static> {
    let style = match direction {
        Direction::In => theme::added(),
        Direction::Out => theme::removed(),
    };
    Span::styled(format!("  {:<4}", direction.badge()), style)
}

fn ticker_row(direction: Direction, cards: &[ChangeCard]) -> Line<'static> {
    let mut spans = vec![badge(direction)];
    for card in cards {
        let style = if card.highlighted() { theme::highlight() } else { theme::text() };
        spans.push(Span::styled(format!("{} ", card.ticker), style));
    }
    Line::from(spans)
}

fn card_line(card: &ChangeCard) -> Line<'static> {
    let name_style = if card.highlighted() { theme::highlight() } else { theme::text() };
    let mut spans = vec![
        badge(card.direction),
        Span::raw(format!("{} ", card.icon)),
        Span::styled(format!("{:<6} ", card.ticker), theme::accent()),
        Span::styled(card.name.clone(), name_style),
    ];
    if let Some(sector) = &card.sector {
        spans.push(Span::styled(format!("  {}", sector_label(sector)), theme::muted()));
    }
    if let Some(product) = &card.product {
        spans.push(Span::styled(format!("  ({product})"), theme::highlight()));
    }
    if let Some(description) = &card.description {
        spans.push(Span::styled(format!("  {description}"), theme::muted()));
    }
    Line::from(spans)
}

fn generic_line(line: &GenericLine) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  [{}] ", line.label), theme::muted()),
        Span::styled(line.text.clone(), theme::text()),
    ])
}

fn segment_spans(segments: &[TextSegment]) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|s| {
            let style = if s.flagged { theme::highlight() } else { theme::text() };
            Span::styled(s.text.clone(), style)
        })
        .collect()
}
