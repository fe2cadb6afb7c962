//! Panel 5: leading sectors (and countries) year by year.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use indexlens_core::data::DataStore;
use indexlens_core::labels::{country_color, sector_color, sector_label};
use indexlens_core::views::{composition_history, CategoryShare, YearBreakdown};

use super::{placeholder, visible, weight_bar};
use crate::app::AppState;
use crate::theme;

const BAR_WIDTH: usize = 30;

pub fn render(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let Some(series) = store.historical() else {
        f.render_widget(Paragraph::new(placeholder("構成推移データなし")), area);
        return;
    };

    let history = composition_history(series, app.view.top_n);
    let mut lines = Vec::new();
    if let Some(note) = &series.note {
        lines.push(Line::from(Span::styled(format!("※ {note}"), theme::warning())));
        lines.push(Line::from(""));
    }
    if history.is_empty() {
        lines.push(placeholder("構成推移データなし"));
    }
    // Newest year on top.
    for year in history.iter().rev() {
        lines.extend(year_lines(year));
    }

    let height = area.height as usize;
    f.render_widget(Paragraph::new(visible(lines, app.scroll, height)), area);
}

fn year_lines(year: &YearBreakdown) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(year.year.clone(), theme::accent_bold()))];
    if let Some(note) = &year.note {
        lines.push(Line::from(Span::styled(format!("  {note}"), theme::muted())));
    }
    lines.extend(
        year.sectors
            .iter()
            .map(|s| share_line(s, sector_label(&s.name).to_string(), theme::swatch(sector_color(&s.name)))),
    );
    if let Some(countries) = &year.countries {
        lines.push(Line::from(Span::styled("  国別", theme::muted())));
        lines.extend(
            countries
                .iter()
                .map(|c| share_line(c, c.name.clone(), theme::swatch(country_color(&c.name)))),
        );
    }
    lines.push(Line::from(""));
    lines
}

fn share_line(share: &CategoryShare, label: String, bar_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:>5.1}% ", share.weight), theme::text()),
        Span::styled(weight_bar(share.weight, 100.0, BAR_WIDTH), bar_style),
        Span::raw(" "),
        Span::styled(label, theme::muted()),
    ])
}
