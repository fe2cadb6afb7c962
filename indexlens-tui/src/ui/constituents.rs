//! Panel 3: searchable, sortable constituent table.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Row, Table};
use ratatui::Frame;

use indexlens_core::data::DataStore;
use indexlens_core::domain::dates::format_day;
use indexlens_core::labels::sector_label;
use indexlens_core::params::{SortColumn, SortDirection, SortSpec};
use indexlens_core::views::query;

use crate::app::{AppState, InputMode};
use crate::theme;

const COLUMNS: [(SortColumn, &str); 5] = [
    (SortColumn::Ticker, "Ticker"),
    (SortColumn::Name, "Name"),
    (SortColumn::Sector, "Sector"),
    (SortColumn::Weight, "Weight"),
    (SortColumn::DateAdded, "Added"),
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState, store: &DataStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let result = query(
        store.constituents(),
        &app.params.search,
        app.params.sort,
        app.view.display_cap,
    );

    f.render_widget(Paragraph::new(search_line(app)), chunks[0]);

    let header = Row::new(COLUMNS.map(|(column, title)| header_cell(column, title, app.params.sort)))
        .style(theme::accent_bold());

    let body_height = chunks[1].height.saturating_sub(1) as usize;
    let max_scroll = result.rows.len().saturating_sub(body_height);
    let rows: Vec<Row> = result
        .rows
        .iter()
        .skip(app.scroll.min(max_scroll))
        .map(|c| {
            Row::new(vec![
                c.ticker.clone(),
                c.name.clone(),
                sector_label(&c.sector).to_string(),
                format!("{:>6.2}%", c.weight),
                format_day(c.date_added),
            ])
            .style(theme::text())
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
    )
    .header(header);
    f.render_widget(table, chunks[1]);

    let mut footer = vec![Span::styled(
        format!("{} 件中 {} 件表示", result.matched(), result.rows.len()),
        theme::muted(),
    )];
    if result.truncated_count > 0 {
        footer.push(Span::styled(
            format!("  (他 {} 件は検索で絞り込んでください)", result.truncated_count),
            theme::warning(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(footer)), chunks[2]);
}

fn search_line(app: &AppState) -> Line<'static> {
    let editing = app.input_mode == InputMode::Search;
    let mut spans = vec![Span::styled("検索 [/] ", theme::muted())];
    if editing {
        spans.push(Span::styled(format!("{}▏", app.search_input), theme::accent_bold()));
        if app.search_debounce.is_pending() {
            spans.push(Span::styled(" …", theme::muted()));
        }
    } else if app.params.search.is_empty() {
        spans.push(Span::styled("(なし)", theme::muted()));
    } else {
        spans.push(Span::styled(app.params.search.clone(), theme::text()));
    }
    spans.push(Span::styled("   並び替え [s] 列  [r] 昇順/降順", theme::muted()));
    Line::from(spans)
}

fn header_cell(column: SortColumn, title: &str, sort: SortSpec) -> String {
    if column != sort.column {
        return title.to_string();
    }
    let arrow = match sort.direction {
        SortDirection::Asc => '▲',
        SortDirection::Desc => '▼',
    };
    format!("{title} {arrow}")
}
