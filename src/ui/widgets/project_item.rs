//! A single project card.

use crate::domain::{DragEvent, Draggable, DropEffect, Project, TEXT_PLAIN};
use ratatui::prelude::*;

/// Rows a card occupies: title, people, description, spacer
pub const ITEM_HEIGHT: u16 = 4;

/// View of one project, draggable between columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    project: Project,
}

impl ProjectItem {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// "1 person" or "N persons"
    pub fn persons(&self) -> String {
        match self.project.people {
            1 => "1 person".to_string(),
            n => format!("{} persons", n),
        }
    }

    /// Card text, one line per row of [`ITEM_HEIGHT`] minus the spacer
    pub fn lines(&self, width: usize, selected: bool, dragging: bool) -> Vec<Line<'static>> {
        let title_style = if dragging {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC)
        } else if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        let marker = match (dragging, selected) {
            (true, _) => "≡ ",
            (false, true) => "> ",
            _ => "  ",
        };

        vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(truncate(&self.project.title, width.saturating_sub(2)), title_style),
            ]),
            Line::from(Span::styled(
                format!("  {} assigned", self.persons()),
                Style::default().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("  {}", truncate(&self.project.description, width.saturating_sub(2))),
                Style::default().fg(Color::Gray),
            )),
        ]
    }
}

impl Draggable for ProjectItem {
    fn drag_start_handler(&mut self, event: &mut DragEvent) {
        let transfer = event.data_transfer.get_or_insert_with(Default::default);
        transfer.set_data(TEXT_PLAIN, self.project.id.as_str());
        transfer.effect_allowed = DropEffect::Move;
        tracing::debug!(id = %self.project.id, "drag started");
    }

    fn drag_end_handler(&mut self, event: &mut DragEvent) {
        // The payload is only valid for the duration of the gesture
        if let Some(transfer) = event.data_transfer.as_mut() {
            transfer.clear_data();
        }
        tracing::debug!(
            id = %self.project.id,
            accepted = event.default_prevented(),
            "drag ended"
        );
    }
}

/// Cut `text` to `max` characters, marking the cut with an ellipsis
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}
