//! Panel 4: how an investment splits across the largest holdings.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Row, Table};
use ratatui::Frame;

use indexlens_core::data::DataStore;
use indexlens_core::views::{format_yen, simulate_snapshot, BarSegment};

use crate::app::{AppState, InputMode};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let sim = simulate_snapshot(app.params.amount, store.snapshot(), store.products());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(4),
        ])
        .split(area);

    f.render_widget(Paragraph::new(amount_line(app)), chunks[0]);

    let bar_width = chunks[1].width as usize;
    f.render_widget(Paragraph::new(bar_line(&sim.bar_segments(), bar_width)), chunks[1]);

    let mut rows: Vec<Row> = sim
        .top
        .iter()
        .map(|h| {
            Row::new(vec![
                h.ticker.clone(),
                h.name.clone(),
                format!("{:>6.2}%", h.weight),
                format_yen(h.invested),
                h.product.clone().unwrap_or_default(),
            ])
            .style(theme::text())
        })
        .collect();
    rows.push(
        Row::new(vec![
            "その他".to_string(),
            format!("{} 社", sim.other_count),
            format!("{:>6.2}%", (100.0 - sim.top_weight()).max(0.0)),
            format_yen(sim.other_amount),
            String::new(),
        ])
        .style(theme::muted()),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(24),
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Min(10),
        ],
    )
    .header(Row::new(["Ticker", "Name", "Weight", "投資額", "主な製品"]).style(theme::accent_bold()));
    f.render_widget(table, chunks[2]);
}

fn amount_line(app: &AppState) -> Line<'static> {
    let mut spans = vec![Span::styled("投資額 [a] ", theme::muted())];
    if app.input_mode == InputMode::Amount {
        spans.push(Span::styled(format!("¥{}▏", app.amount_input), theme::accent_bold()));
        if app.amount_debounce.is_pending() {
            spans.push(Span::styled(" …", theme::muted()));
        }
    } else {
        spans.push(Span::styled(format_yen(app.params.amount), theme::text()));
    }
    Line::from(spans)
}

/// One stacked bar, each segment's width proportional to its weight.
fn bar_line(segments: &[BarSegment], width: usize) -> Line<'static> {
    let total: f64 = segments.iter().map(|s| s.weight.max(0.0)).sum();
    if total <= 0.0 || width == 0 {
        return Line::from("");
    }
    let spans = segment_widths(segments, width)
        .into_iter()
        .zip(segments)
        .filter(|(cells, _)| *cells > 0)
        .map(|(cells, s)| Span::styled("█".repeat(cells), theme::swatch(s.color)))
        .collect::<Vec<_>>();
    Line::from(spans)
}

/// Cell counts per segment summing to at most `width`.
fn segment_widths(segments: &[BarSegment], width: usize) -> Vec<usize> {
    let total: f64 = segments.iter().map(|s| s.weight.max(0.0)).sum();
    let mut used = 0;
    segments
        .iter()
        .map(|s| {
            let cells = ((s.weight.max(0.0) / total) * width as f64).round() as usize;
            let cells = cells.min(width - used);
            used += cells;
            cells
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexlens_core::labels::{SIMULATION_PALETTE, SIMULATION_REMAINDER};

    use crate::app::Panel;
    use crate::test_helpers::{loaded_app, render_text};

    fn segment(weight: f64) -> BarSegment {
        BarSegment {
            label: String::new(),
            weight,
            color: SIMULATION_PALETTE[0],
        }
    }

    #[test]
    fn widths_are_proportional_and_bounded() {
        let segments = vec![segment(50.0), segment(25.0), segment(25.0)];
        assert_eq!(segment_widths(&segments, 40), vec![20, 10, 10]);

        let thirds = vec![segment(1.0), segment(1.0), segment(1.0)];
        assert!(segment_widths(&thirds, 10).iter().sum::<usize>() <= 10);
    }

    #[test]
    fn empty_bar_for_zero_weights() {
        let segments = vec![BarSegment {
            label: "その他".into(),
            weight: 0.0,
            color: SIMULATION_REMAINDER,
        }];
        assert!(bar_line(&segments, 20).spans.is_empty());
    }

    #[test]
    fn renders_top_holdings() {
        let (mut app, _cmd_rx, _resp_tx) = loaded_app("sp500");
        app.active_panel = Panel::Simulation;
        let text = render_text(&app, 120, 20);
        assert!(text.contains("¥74,100"));
        assert!(text.contains("¥718,900"));
    }
}
