//! Active document pane: name, modification age and content (or the edit buffer).

use crate::app::theme::UiTheme;
use crate::kernel::EditState;
use crate::models::Document;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use std::time::{Duration, SystemTime};

pub struct DocumentView;

impl DocumentView {
    pub fn new() -> Self {
        Self
    }

    pub fn lines(
        &self,
        document: Option<&Document>,
        edit: Option<&EditState>,
        now: SystemTime,
        theme: &UiTheme,
    ) -> Vec<Line<'static>> {
        let Some(doc) = document else {
            return vec![Line::from(Span::styled(
                "No document selected",
                Style::default().fg(theme.muted_fg),
            ))];
        };

        let age = now
            .duration_since(doc.last_modified)
            .unwrap_or(Duration::ZERO);
        let mut lines = vec![
            Line::from(Span::styled(
                doc.name.to_string(),
                Style::default()
                    .fg(theme.header_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("modified {}", format_age(age)),
                Style::default().fg(theme.muted_fg),
            )),
            Line::default(),
        ];

        let editing = edit.filter(|edit| edit.document_id == doc.id);
        let body = editing.map_or(doc.content.as_str(), |edit| edit.buffer.as_str());
        lines.extend(body.lines().map(|line| Line::from(line.to_string())));
        if editing.is_some() {
            let cursor = Span::styled("▏", Style::default().fg(theme.accent_fg));
            let inline = !body.is_empty() && !body.ends_with('\n');
            match lines.last_mut() {
                Some(last) if inline => last.spans.push(cursor),
                _ => lines.push(Line::from(cursor)),
            }
        }

        lines
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        document: Option<&Document>,
        edit: Option<&EditState>,
        theme: &UiTheme,
    ) {
        let title = if edit.is_some() { " Editing " } else { " Document " };
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(theme.border))
            .title(title);
        let lines = self.lines(document, edit, SystemTime::now(), theme);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

impl Default for DocumentView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..=4 => "just now".to_string(),
        5..=59 => format!("{secs}s ago"),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/document.rs"]
mod tests;
