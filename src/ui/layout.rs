//! Main layout rendering for the TUI.

use crate::app::{App, AppView};
use crate::domain::ProjectStatus;
use crate::ui::widgets::help::HelpWidget;
use crate::ui::widgets::project_form::ProjectFormDialog;
use crate::ui::widgets::project_list::ProjectListWidget;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Screen regions of the board view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardAreas {
    pub header: Rect,
    pub active: Rect,
    pub finished: Rect,
    pub footer: Rect,
}

impl BoardAreas {
    /// Split a frame into header, the two columns and footer
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Columns
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        Self {
            header: chunks[0],
            active: columns[0],
            finished: columns[1],
            footer: chunks[2],
        }
    }

    pub fn column(&self, status: ProjectStatus) -> Rect {
        match status {
            ProjectStatus::Active => self.active,
            ProjectStatus::Finished => self.finished,
        }
    }

    /// Column containing the screen position, if any
    pub fn column_at(&self, x: u16, y: u16) -> Option<ProjectStatus> {
        let position = Position::new(x, y);
        [ProjectStatus::Active, ProjectStatus::Finished]
            .into_iter()
            .find(|status| self.column(*status).contains(position))
    }
}

/// Draw the main application UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.view {
        AppView::Board => draw_board(frame, app, area),
        AppView::NewProject => draw_new_project(frame, app, area),
        AppView::Help => draw_help(frame, app, area),
    }

    // Draw error message overlay if present
    if let Some(ref error) = app.error_message {
        draw_error_overlay(frame, error, area);
    }

    if let Some(ref msg) = app.status_message {
        draw_status_message(frame, msg, area);
    }
}

/// Draw a status message at the bottom of the screen
fn draw_status_message(frame: &mut Frame, message: &str, area: Rect) {
    let msg_area = Rect {
        x: area.x + 2,
        y: area.y + area.height.saturating_sub(4),
        width: area.width.saturating_sub(4).min(
            u16::try_from(message.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(4),
        ),
        height: 3.min(area.height),
    };

    frame.render_widget(Clear, msg_area);

    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );

    frame.render_widget(status, msg_area);
}

/// Draw the header, both columns and the key hints
fn draw_board(frame: &mut Frame, app: &App, area: Rect) {
    let areas = BoardAreas::new(area);

    let store = app.store();
    let header_text = format!(
        "project-board | {} active, {} finished",
        store.count_by_status(ProjectStatus::Active),
        store.count_by_status(ProjectStatus::Finished),
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, areas.header);

    let dragging = app.drag().map(|drag| drag.project_id());
    for status in [ProjectStatus::Active, ProjectStatus::Finished] {
        let list = app.list(status);
        let projects = list.projects();
        let widget = ProjectListWidget::new(list.title(), &projects, list.selected_index())
            .focused(app.focused == status)
            .droppable(list.is_droppable())
            .dragging(dragging);
        frame.render_widget(widget, areas.column(status));
    }

    let footer = Paragraph::new(footer_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, areas.footer);
}

/// Key hints for the board, matching the enabled bindings
fn footer_text(app: &App) -> String {
    let (updown, leftright) = if app.config.ui.vim_navigation {
        ("j/k", "h/l")
    } else {
        ("↑/↓", "←/→")
    };
    match app.drag() {
        Some(drag) => format!(
            " Dragging '{}' | {leftright}: Target | Space/Enter: Drop | Esc: Cancel ",
            drag.title()
        ),
        None => format!(
            " {updown}: Navigate | {leftright}: Column | Space: Pick up | m: Move | n: New | ?: Help | q: Quit "
        ),
    }
}

/// Draw the new-project form over the board
fn draw_new_project(frame: &mut Frame, app: &App, area: Rect) {
    draw_board(frame, app, area);

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(ProjectFormDialog::new(&app.form), popup_area);
}

/// Draw help view showing all keybindings
fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(HelpWidget::new(&app.help_lines, app.help_scroll), area);
}

/// Draw error overlay
fn draw_error_overlay(frame: &mut Frame, error: &str, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Error"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(error_widget, popup_area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
