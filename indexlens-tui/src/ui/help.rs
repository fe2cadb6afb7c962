//! Panel 6: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-6", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "i", "Next index (reloads all data)");
    key(&mut lines, "R", "Reload the current index");
    key(&mut lines, "j / k, PgDn / PgUp", "Scroll timeline, table or history");
    key(&mut lines, "q, Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1: Overview");
    key(&mut lines, "p", "Cycle price period (1y, 5y, 10y, 15y, all)");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2: Timeline");
    key(&mut lines, "f", "Cycle change type (all, add, remove, rebalance)");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3: Constituents");
    key(&mut lines, "/", "Search ticker or name; applies after a short pause");
    key(&mut lines, "Enter / Esc", "Apply now / clear search");
    key(&mut lines, "s", "Sort by next column");
    key(&mut lines, "r", "Reverse sort direction");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4: Simulation");
    key(&mut lines, "a", "Edit amount: digits, Backspace");
    key(&mut lines, "Enter / Esc", "Finish editing");

    f.render_widget(Paragraph::new(lines), area);
}

fn section(lines: &mut Vec<Line<'_>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
