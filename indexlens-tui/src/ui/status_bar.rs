//! Bottom status bar: panel hints, applied parameters, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, InputMode, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match app.input_mode {
        InputMode::Normal => " 1:Overview 2:Timeline 3:List 4:Sim 5:History 6:Help",
        InputMode::Search => " SEARCH  Enter:apply Esc:clear",
        InputMode::Amount => " AMOUNT  Enter:done",
    };
    spans.push(Span::styled(hints, theme::muted()));
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!(
            "{} {} {} {}",
            app.params.index,
            app.params.type_filter.as_str(),
            app.params.sort.column.as_str(),
            app.params.period.as_str()
        ),
        theme::accent(),
    ));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Error => theme::error(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
