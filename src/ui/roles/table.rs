//! Rendering of the roles table screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::roles::{PageMove, RoleStatus};
use crate::ui::theme::{
    ACTIVE_HIGHLIGHT, DISABLED_TEXT, GLOBAL_BORDER, HEADER_BACKGROUND, HEADER_TEXT, STATUS_ERROR,
    STATUS_OK,
};

use super::state::RoleListState;

/// Column titles, left to right.
pub const COLUMNS: [&str; 4] = ["ID", "Name", "Status", "Actions"];

/// What the search line shows.
pub struct SearchLine<'a> {
    pub text: &'a str,
    pub editing: bool,
}

/// Draw the whole roles screen into `area`.
pub fn render_role_table(frame: &mut Frame, area: Rect, state: &RoleListState, search: SearchLine) {
    let regions = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    frame.render_widget(search_bar(&search), regions[0]);

    let mut table_state = TableState::default();
    if !state.items.is_empty() {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table(state), regions[1], &mut table_state);

    frame.render_widget(footer(state), regions[2]);
}

fn search_bar(search: &SearchLine) -> Paragraph<'static> {
    let cursor = if search.editing { "▏" } else { "" };
    let text = if search.text.is_empty() && !search.editing {
        Span::styled("Search by Name (/)", Style::default().fg(DISABLED_TEXT))
    } else {
        Span::styled(
            format!("{}{}", search.text, cursor),
            Style::default().fg(HEADER_TEXT),
        )
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), text])).block(
        Block::default()
            .title(" Roles ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

fn status_style(status: RoleStatus) -> Style {
    match status {
        RoleStatus::Active => Style::default().fg(STATUS_OK),
        RoleStatus::Inactive => Style::default().fg(STATUS_ERROR),
    }
}

fn table(state: &RoleListState) -> Table<'static> {
    let header = Row::new(COLUMNS.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(HEADER_TEXT)
            .bg(HEADER_BACKGROUND)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.items.iter().map(|role| {
        Row::new(vec![
            Cell::from(role.id.to_string()),
            Cell::from(role.name.clone()),
            Cell::from(role.status.as_str()).style(status_style(role.status)),
            Cell::from("[e]dit [d]elete"),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

/// Pagination line: range, page size and which moves are available.
pub fn pagination_label(state: &RoleListState) -> String {
    let query = &state.query;
    let arrow = |page_move: PageMove, glyph: &'static str| {
        match page_move.target(query.page_index, state.total_count, query.page_size) {
            Some(_) => glyph,
            None => " ",
        }
    };

    format!(
        "Rows per page: {}  {}  {} {} {} {}",
        query.page_size,
        state.range_label(),
        arrow(PageMove::First, "⏮"),
        arrow(PageMove::Previous, "◀"),
        arrow(PageMove::Next, "▶"),
        arrow(PageMove::Last, "⏭"),
    )
}

fn footer(state: &RoleListState) -> Paragraph<'static> {
    let mut spans = vec![Span::styled(
        format!(" {}", pagination_label(state)),
        Style::default().fg(HEADER_TEXT),
    )];

    if state.loading {
        spans.push(Span::styled("  loading…", Style::default().fg(DISABLED_TEXT)));
    }

    if let Some(failure) = &state.last_failure {
        spans.push(Span::styled(
            format!("  {} failed: {}", failure.action.label(), failure.message),
            Style::default().fg(STATUS_ERROR),
        ));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" [a]dd  e[x]port  [s]ize  [/]search  [q]uit ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}
