//! 工作区浏览器：左侧工作区树，右侧当前文档
//!
//! 职责：
//! - 持有 Store，并把视图回调接回 `SetActiveDocument`
//! - 分发键盘/鼠标事件
//! - 编辑模式下把输入写入编辑缓冲区

use crate::app::theme::UiTheme;
use crate::kernel::{Action, Settings, Store};
use crate::models::{DocumentId, WorkspaceId};
use crate::tui::view::{EventResult, View};
use crate::views::{DocumentView, TreeStyle, TreeViewProps, WorkspaceTreeView};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const TREE_WIDTH_PERCENT: u16 = 40;

pub struct Browser {
    store: Store,
    tree_view: WorkspaceTreeView,
    document_view: DocumentView,
    theme: UiTheme,
    workspace_glyph: String,
}

impl Browser {
    pub fn new(store: Store, settings: &Settings) -> Self {
        let style = TreeStyle {
            indent_width: settings.tree.indent_width,
            glyphs: settings.tree.glyphs(),
        };
        let workspace_glyph = style.glyphs.workspace.to_string();
        Self {
            store,
            tree_view: WorkspaceTreeView::new(style),
            document_view: DocumentView::new(),
            theme: UiTheme::from_settings(&settings.theme),
            workspace_glyph,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.store.dispatch(action).state_changed
    }

    fn active_workspace_id(&self) -> Option<WorkspaceId> {
        self.store.state().active_workspace_id.clone()
    }

    fn is_editing(&self) -> bool {
        self.store.state().edit.is_some()
    }

    /// Runs the document callback for `row` and feeds the selection back into the store.
    fn activate_row(&mut self, row: usize) -> bool {
        let Some(workspace_id) = self.active_workspace_id() else {
            return false;
        };
        self.tree_view.rows(&self.store, &workspace_id);

        let mut selected: Option<DocumentId> = None;
        self.tree_view
            .activate_row(row, &mut |id| selected = Some(id));
        match selected {
            Some(id) => self.dispatch(Action::SetActiveDocument(id)),
            None => false,
        }
    }

    fn handle_edit_key(&mut self, event: &KeyEvent) -> EventResult {
        let action = match (event.code, event.modifiers) {
            (KeyCode::Esc, _) => Action::EditCommit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::EditCancel,
            (KeyCode::Enter, _) => Action::EditInsert('\n'),
            (KeyCode::Backspace, _) => Action::EditBackspace,
            (KeyCode::Char(ch), m) if !m.contains(KeyModifiers::CONTROL) => Action::EditInsert(ch),
            _ => return EventResult::Ignored,
        };
        self.dispatch(action);
        EventResult::Consumed
    }

    fn handle_key(&mut self, event: &KeyEvent) -> EventResult {
        if event.kind == KeyEventKind::Release {
            return EventResult::Ignored;
        }
        if self.is_editing() {
            return self.handle_edit_key(event);
        }

        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                return EventResult::Quit;
            }
            (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
                self.dispatch(Action::ExplorerMoveSelection { delta: 1 });
            }
            (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
                self.dispatch(Action::ExplorerMoveSelection { delta: -1 });
            }
            (KeyCode::Enter, _) => {
                let row = self.store.state().explorer.selected;
                self.activate_row(row);
            }
            (KeyCode::Tab, _) => {
                self.dispatch(Action::CycleWorkspace);
            }
            (KeyCode::Char('i'), _) => {
                self.dispatch(Action::EditBegin);
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> EventResult {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return EventResult::Ignored;
        }
        if !self.tree_view.contains(event.column, event.row) {
            return EventResult::Ignored;
        }

        let scroll_offset = self.store.state().explorer.scroll_offset;
        let mut selected: Option<DocumentId> = None;
        let row = self
            .tree_view
            .click(event, scroll_offset, &mut |id| selected = Some(id));
        if let (Some(row), Some(id)) = (row, selected) {
            self.dispatch(Action::ExplorerSelectRow { row });
            self.dispatch(Action::SetActiveDocument(id));
        }
        EventResult::Consumed
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let text = match self.store.current_workspace() {
            Some(ws) => format!(
                "{} {}  (view: {}, edit: {})",
                self.workspace_glyph,
                ws.name,
                ws.view_permission.len(),
                ws.edit_permission.len()
            ),
            None => "No workspace selected (Tab to cycle)".to_string(),
        };
        let header = Paragraph::new(Span::styled(text, Style::default().fg(self.theme.header_fg)));
        frame.render_widget(header, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let hint = if self.is_editing() {
            "Esc save | Ctrl+C discard"
        } else {
            "j/k move | Enter open | Tab workspace | i edit | q quit"
        };
        let status = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(self.theme.muted_fg),
        )));
        frame.render_widget(status, area);
    }
}

impl View for Browser {
    fn handle_input(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_status(frame, chunks[2]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(TREE_WIDTH_PERCENT),
                Constraint::Percentage(100 - TREE_WIDTH_PERCENT),
            ])
            .split(chunks[1]);

        self.store.dispatch(Action::ExplorerSetViewHeight {
            height: body[0].height as usize,
        });

        if let Some(workspace_id) = self.active_workspace_id() {
            let state = self.store.state();
            let props = TreeViewProps {
                workspace_id: &workspace_id,
                active_document_id: state.active_document_id.as_ref(),
                selected_row: Some(state.explorer.selected),
                scroll_offset: state.explorer.scroll_offset,
            };
            self.tree_view
                .render(frame, body[0], &self.store, props, &self.theme);
        }

        self.document_view.render(
            frame,
            body[1],
            self.store.active_document(),
            self.store.state().edit.as_ref(),
            &self.theme,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/browser.rs"]
mod tests;
