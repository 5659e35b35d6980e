use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::controller::{QueryChange, RoleListController};
use crate::handoff::{EditorSeed, Route};
use crate::roles::PageMove;
use crate::ui::editor::render_editor;
use crate::ui::roles::{render_role_table, SearchLine};

/// Which screen is in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Roles,
    Editor(Option<EditorSeed>),
}

/// How keys are interpreted right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browsing,
    Searching,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    SelectNext,
    SelectPrevious,
    Move(PageMove),
    CyclePageSize,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    FinishSearch,
    Add,
    Edit,
    Delete,
    Export,
    CloseEditor,
}

/// Map a key press to an action for the given mode.
pub fn key_action(mode: InputMode, key: KeyEvent) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    match mode {
        InputMode::Searching => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(KeyAction::FinishSearch),
            KeyCode::Backspace => Some(KeyAction::SearchBackspace),
            KeyCode::Char(c) => Some(KeyAction::SearchInput(c)),
            _ => None,
        },
        InputMode::Editor => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(KeyAction::CloseEditor),
            _ => None,
        },
        InputMode::Browsing => match key.code {
            KeyCode::Char('q') => Some(KeyAction::Quit),
            KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::SelectPrevious),
            KeyCode::Left => Some(KeyAction::Move(PageMove::Previous)),
            KeyCode::Right => Some(KeyAction::Move(PageMove::Next)),
            KeyCode::Home => Some(KeyAction::Move(PageMove::First)),
            KeyCode::End => Some(KeyAction::Move(PageMove::Last)),
            KeyCode::Char('s') => Some(KeyAction::CyclePageSize),
            KeyCode::Char('/') => Some(KeyAction::StartSearch),
            KeyCode::Char('a') => Some(KeyAction::Add),
            KeyCode::Char('e') | KeyCode::Enter => Some(KeyAction::Edit),
            KeyCode::Char('d') | KeyCode::Delete => Some(KeyAction::Delete),
            KeyCode::Char('x') => Some(KeyAction::Export),
            _ => None,
        },
    }
}

pub struct App {
    controller: RoleListController,
    screen: Screen,
    searching: bool,
    search_draft: String,
    should_quit: bool,
}

impl App {
    pub fn new(controller: RoleListController) -> Self {
        let search_draft = controller.snapshot().query.search_text;
        Self {
            controller,
            screen: Screen::Roles,
            searching: false,
            search_draft,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn input_mode(&self) -> InputMode {
        match (&self.screen, self.searching) {
            (Screen::Editor(_), _) => InputMode::Editor,
            (Screen::Roles, true) => InputMode::Searching,
            (Screen::Roles, false) => InputMode::Browsing,
        }
    }

    /// Follow a route requested by the controller.
    pub fn on_navigate(&mut self, route: Route) {
        match route {
            Route::RoleEditor { ticket } => {
                let seed = self.controller.handoff().take(ticket);
                if seed.is_none() {
                    tracing::warn!(?ticket, "Editor opened with an expired handoff");
                }
                self.screen = Screen::Editor(seed);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = key_action(self.input_mode(), key) {
            self.apply(action);
        }
    }

    /// Apply the change now, in key order, and fetch in the background.
    fn change_query(&self, change: QueryChange) {
        if let Some(fetch) = self.controller.issue_query(change) {
            let controller = self.controller.clone();
            tokio::spawn(async move { controller.complete(fetch).await });
        }
    }

    fn change_search(&self) {
        self.change_query(QueryChange::SearchText(self.search_draft.clone()));
    }

    fn apply(&mut self, action: KeyAction) {
        let controller = self.controller.clone();
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SelectNext => controller.select_next(),
            KeyAction::SelectPrevious => controller.select_previous(),
            KeyAction::Move(page_move) => self.change_query(QueryChange::Move(page_move)),
            KeyAction::CyclePageSize => self.change_query(QueryChange::CyclePageSize),
            KeyAction::StartSearch => self.searching = true,
            KeyAction::SearchInput(c) => {
                self.search_draft.push(c);
                self.change_search();
            }
            KeyAction::SearchBackspace => {
                if self.search_draft.pop().is_some() {
                    self.change_search();
                }
            }
            KeyAction::FinishSearch => self.searching = false,
            KeyAction::Add => controller.add(),
            KeyAction::Edit => {
                if let Some(role) = controller.snapshot().selected_role() {
                    let role_id = role.id;
                    tokio::spawn(async move {
                        // Failure is already recorded in the state for the footer
                        let _ = controller.edit(role_id).await;
                    });
                }
            }
            KeyAction::Delete => {
                if let Some(role) = controller.snapshot().selected_role() {
                    let role_id = role.id;
                    tokio::spawn(async move { controller.delete(role_id).await });
                }
            }
            KeyAction::Export => {
                tokio::spawn(async move {
                    controller.export().await;
                });
            }
            KeyAction::CloseEditor => self.screen = Screen::Roles,
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.controller.snapshot();
        render_role_table(
            frame,
            area,
            &state,
            SearchLine {
                text: &self.search_draft,
                editing: self.searching,
            },
        );

        if let Screen::Editor(seed) = &self.screen {
            render_editor(frame, centered_rect(48, 9, area), seed.as_ref());
        }
    }
}

/// Create a centered rect of given size.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
