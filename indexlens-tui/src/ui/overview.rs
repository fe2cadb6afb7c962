//! Panel 1: index card, trailing returns, price chart and breakdowns.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};
use ratatui::Frame;

use indexlens_core::data::DataStore;
use indexlens_core::views::{overview, window, Overview, PriceWindow, Slice};

use super::{placeholder, weight_bar};
use crate::app::AppState;
use crate::theme;

const BAR_WIDTH: usize = 20;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let view = overview(store);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Percentage(45),
            Constraint::Min(4),
        ])
        .split(area);

    render_header(f, rows[0], &view);
    render_prices(f, rows[1], app, store);
    render_breakdowns(f, rows[2], &view);
}

fn render_header(f: &mut Frame, area: Rect, view: &Overview) {
    let mut lines = vec![Line::from(vec![
        Span::styled(view.display_name, theme::accent_bold()),
        Span::styled(
            format!("   構成銘柄数 {}   最終更新 {}", view.constituent_count, view.last_updated),
            theme::muted(),
        ),
    ])];

    if view.returns.is_empty() {
        lines.push(placeholder("リターンデータなし"));
    } else {
        let mut spans = Vec::new();
        for line in &view.returns {
            spans.push(Span::styled(format!("{} ", line.label), theme::muted()));
            spans.push(Span::styled(format!("{}   ", line.formatted), theme::tone(line.tone)));
        }
        lines.push(Line::from(spans));
    }

    if let Some(meta) = &view.metadata {
        if !meta.description.is_empty() {
            lines.push(Line::from(Span::styled(meta.description.clone(), theme::text())));
        }
        let mut facts = Vec::new();
        if !meta.inception_date.is_empty() {
            facts.push(format!("算出開始 {}", meta.inception_date));
        }
        if !meta.rebalance.is_empty() {
            facts.push(format!("リバランス {}", meta.rebalance));
        }
        if !meta.trusts.is_empty() {
            facts.push(format!("投資信託 {}", meta.trusts.join(" / ")));
        }
        if !facts.is_empty() {
            lines.push(Line::from(Span::styled(facts.join("   "), theme::muted())));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_prices(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let title = format!(" 価格推移 {} [p] ", app.params.period.as_str());
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(Span::styled(title, theme::accent()));

    let Some(series) = store.prices() else {
        f.render_widget(Paragraph::new(placeholder("価格データなし")).block(block), area);
        return;
    };

    let win = window(series, app.params.period, app.view.current_year);
    match price_chart_data(&win) {
        Some(data) => render_chart(f, area, block, &win, &data),
        None => f.render_widget(Paragraph::new(placeholder("価格データなし")).block(block), area),
    }
}

fn price_chart_data(win: &PriceWindow<'_>) -> Option<Vec<(f64, f64)>> {
    if win.is_empty() {
        return None;
    }
    Some(
        win.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect(),
    )
}

fn render_chart(f: &mut Frame, area: Rect, block: Block, win: &PriceWindow<'_>, data: &[(f64, f64)]) {
    let (lo, hi) = win.bounds().unwrap_or((0.0, 1.0));
    let padding = ((hi - lo).abs() * 0.05).max(1.0);
    let y_min = lo - padding;
    let y_max = hi + padding;
    let x_max = win.len().saturating_sub(1) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(win.first_label().unwrap_or_default().to_string(), theme::muted()),
                    Span::styled(win.last_label().unwrap_or_default().to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{:.0}", y_min), theme::muted()),
                    Span::styled(format!("{:.0}", y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_breakdowns(f: &mut Frame, area: Rect, view: &Overview) {
    if view.regions.is_empty() && view.top_countries.is_empty() {
        f.render_widget(slice_list("セクター構成", &view.sectors), area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
        ])
        .split(area);
    f.render_widget(slice_list("セクター構成", &view.sectors), columns[0]);
    f.render_widget(slice_list("地域構成", &view.regions), columns[1]);
    f.render_widget(slice_list("国別 上位10", &view.top_countries), columns[2]);
}

fn slice_list<'a>(title: &'a str, slices: &'a [Slice]) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme::muted())
        .title(Span::styled(title, theme::accent()));

    if slices.is_empty() {
        return Paragraph::new(placeholder("データなし")).block(block);
    }

    let max = slices.iter().map(|s| s.weight).fold(0.0, f64::max);
    let lines: Vec<Line> = slices
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(weight_bar(s.weight, max, BAR_WIDTH), theme::swatch(s.color)),
                Span::raw(" "),
                Span::styled(format!("{:>5.1}% ", s.weight), theme::text()),
                Span::styled(s.label.as_str(), theme::muted()),
            ])
        })
        .collect();
    Paragraph::new(lines).block(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexlens_core::domain::PriceSeries;
    use indexlens_core::params::PricePeriod;

    use crate::test_helpers::{loaded_app, render_text};

    #[test]
    fn empty_window_has_no_chart_data() {
        let series = PriceSeries::default();
        let win = window(&series, PricePeriod::All, 2026);
        assert!(price_chart_data(&win).is_none());
    }

    #[test]
    fn chart_points_are_indexed() {
        let series = PriceSeries {
            dates: vec!["2024-12".into(), "2025-12".into()],
            values: vec![100.0, 120.0],
            ..PriceSeries::default()
        };
        let data = price_chart_data(&window(&series, PricePeriod::All, 2026)).unwrap();
        assert_eq!(data, vec![(0.0, 100.0), (1.0, 120.0)]);
    }

    #[test]
    fn period_shows_in_chart_title() {
        let (mut app, _cmd_rx, _resp_tx) = loaded_app("sp500");
        app.cycle_period();
        let text = render_text(&app, 120, 40);
        assert!(text.contains("1y [p]"));
        assert!(text.contains("+16.4%"));
    }
}
