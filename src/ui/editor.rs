//! Role editor panel.
//!
//! Only shows what was handed over; saving lives with the role form service.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::handoff::EditorSeed;
use crate::ui::theme::{DISABLED_TEXT, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR};

fn title(seed: Option<&EditorSeed>) -> String {
    match seed {
        Some(EditorSeed::Create) => " New Role ".to_string(),
        Some(EditorSeed::Edit(role)) => format!(" Edit Role #{} ", role.id),
        None => " Role ".to_string(),
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<8}", label),
            Style::default().fg(DISABLED_TEXT),
        ),
        Span::styled(value, Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD)),
    ])
}

/// Draw the editor over `area`. `None` means the handoff had expired.
pub fn render_editor(frame: &mut Frame, area: Rect, seed: Option<&EditorSeed>) {
    let mut lines = vec![Line::from("")];
    match seed {
        Some(EditorSeed::Create) => {
            lines.push(field("Name", String::new()));
            lines.push(field("Status", "Active".to_string()));
        }
        Some(EditorSeed::Edit(role)) => {
            lines.push(field("ID", role.id.to_string()));
            lines.push(field("Name", role.name.clone()));
            lines.push(field("Status", role.status.to_string()));
        }
        None => lines.push(Line::from(Span::styled(
            "  Nothing to edit, the selection expired.",
            Style::default().fg(STATUS_ERROR),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc to return to the list",
        Style::default().fg(DISABLED_TEXT),
    )));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(title(seed))
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(POPUP_BORDER)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::{Role, RoleStatus};

    #[test]
    fn title_names_the_seed() {
        assert_eq!(title(Some(&EditorSeed::Create)), " New Role ");
        let role = Role {
            id: 12,
            name: "Ops".into(),
            status: RoleStatus::Active,
        };
        assert_eq!(title(Some(&EditorSeed::Edit(role))), " Edit Role #12 ");
        assert_eq!(title(None), " Role ");
    }
}
