//! Workspace tree view (pure rendering + hit testing).

use crate::app::theme::UiTheme;
use crate::kernel::Store;
use crate::models::{
    flatten_tree, row_label, DocumentId, TreeGlyphs, TreeItemKind, TreeRow, WorkspaceId,
};
use crossterm::event::MouseEvent;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStyle {
    pub indent_width: usize,
    pub glyphs: TreeGlyphs,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            indent_width: 2,
            glyphs: TreeGlyphs::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeViewProps<'a> {
    pub workspace_id: &'a WorkspaceId,
    pub active_document_id: Option<&'a DocumentId>,
    /// Keyboard cursor row, highlighted independently of the active document.
    pub selected_row: Option<usize>,
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    workspace_id: WorkspaceId,
    revision: u64,
}

struct RowCache {
    key: CacheKey,
    rows: Vec<TreeRow>,
}

pub struct WorkspaceTreeView {
    style: TreeStyle,
    area: Option<Rect>,
    cache: Option<RowCache>,
}

impl WorkspaceTreeView {
    pub fn new(style: TreeStyle) -> Self {
        Self {
            style,
            area: None,
            cache: None,
        }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area
            .map(|a| x >= a.x && x < a.x + a.width && y >= a.y && y < a.y + a.height)
            .unwrap_or(false)
    }

    /// Rows of `workspace_id`, re-derived only when the workspace or the data revision changed.
    pub fn rows(&mut self, store: &Store, workspace_id: &WorkspaceId) -> &[TreeRow] {
        let key = CacheKey {
            workspace_id: workspace_id.clone(),
            revision: store.state().revision,
        };
        if !self.is_cached(&key) {
            let rows = flatten_tree(&store.workspace_tree(workspace_id));
            tracing::trace!(workspace = %workspace_id, rows = rows.len(), "tree rows derived");
            self.cache = Some(RowCache { key, rows });
        }
        self.cached_rows()
    }

    fn is_cached(&self, key: &CacheKey) -> bool {
        self.cache.as_ref().is_some_and(|cache| &cache.key == key)
    }

    fn cached_rows(&self) -> &[TreeRow] {
        self.cache
            .as_ref()
            .map(|cache| cache.rows.as_slice())
            .unwrap_or(&[])
    }

    fn hit_test_row(&self, event: &MouseEvent, scroll_offset: usize) -> Option<usize> {
        let area = self.area?;
        if event.column < area.x || event.column >= area.x + area.width {
            return None;
        }
        if event.row < area.y || event.row >= area.y + area.height {
            return None;
        }

        let row = (event.row - area.y) as usize + scroll_offset;
        (row < self.cached_rows().len()).then_some(row)
    }

    /// Fires `on_select_document` when `row` is a document row; folder rows are inert.
    pub fn activate_row(
        &self,
        row: usize,
        on_select_document: &mut dyn FnMut(DocumentId),
    ) -> bool {
        match self.cached_rows().get(row) {
            Some(row) if row.kind == TreeItemKind::Document => {
                on_select_document(DocumentId::new(row.id.clone()));
                true
            }
            _ => false,
        }
    }

    /// Hit-tests a click against the last render and activates the row under it.
    pub fn click(
        &self,
        event: &MouseEvent,
        scroll_offset: usize,
        on_select_document: &mut dyn FnMut(DocumentId),
    ) -> Option<usize> {
        let row = self.hit_test_row(event, scroll_offset)?;
        self.activate_row(row, on_select_document);
        Some(row)
    }

    fn render_row(
        &self,
        row: &TreeRow,
        is_active: bool,
        is_selected: bool,
        width: usize,
        theme: &UiTheme,
    ) -> Line<'static> {
        let indent = " ".repeat(row.level as usize * self.style.indent_width);
        let label = row_label(row, &self.style.glyphs);
        let text = truncate_to_width(&format!("{indent}{label}"), width);

        let mut style = match row.kind {
            TreeItemKind::Document => Style::default().fg(theme.document_fg),
            TreeItemKind::Folder | TreeItemKind::Workspace => Style::default().fg(theme.folder_fg),
        };
        if is_active {
            style = style
                .bg(theme.active_bg)
                .fg(theme.active_fg)
                .add_modifier(Modifier::BOLD);
        }
        if is_selected {
            style = style.add_modifier(Modifier::REVERSED);
        }

        Line::from(Span::styled(text, style))
    }

    fn render_lines(
        &self,
        rows: &[TreeRow],
        props: &TreeViewProps<'_>,
        area: Rect,
        theme: &UiTheme,
    ) -> Vec<Line<'static>> {
        let visible_height = area.height as usize;
        let start = props.scroll_offset.min(rows.len());
        let end = (start + visible_height).min(rows.len());

        rows[start..end]
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let is_active = row.kind == TreeItemKind::Document
                    && props.active_document_id.is_some_and(|id| id == row.id.as_str());
                let is_selected = props.selected_row == Some(start + i);
                self.render_row(row, is_active, is_selected, area.width as usize, theme)
            })
            .collect()
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        store: &Store,
        props: TreeViewProps<'_>,
        theme: &UiTheme,
    ) {
        self.area = Some(area);
        self.rows(store, props.workspace_id);

        let lines = self.render_lines(self.cached_rows(), &props, area, theme);
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../../tests/unit/views/explorer/workspace_tree_view.rs"]
mod tests;
