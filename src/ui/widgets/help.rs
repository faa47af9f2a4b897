//! Help view listing the bindings that are active for this session.

use crate::config::BoardConfig;
use crate::ui::input::InputHandler;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// One titled group of key/description rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

impl HelpSection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.rows.push((key.into(), description.into()));
        self
    }
}

/// Sections matching how `input` maps keys and what `config` enables
pub fn help_sections(input: &InputHandler, config: &BoardConfig) -> Vec<HelpSection> {
    let vim = input.vim_navigation();
    let key = |arrow: &str, letter: &str| {
        if vim {
            format!("{arrow}/{letter}")
        } else {
            arrow.to_string()
        }
    };

    let mut sections = vec![
        HelpSection::new("Navigation")
            .row(key("↑", "k"), "Previous project")
            .row(key("↓", "j"), "Next project")
            .row(key("←", "h"), "Focus active column")
            .row(key("→", "l"), "Focus finished column")
            .row("Tab", "Switch column")
            .row(key("Home", "g"), "First project")
            .row(key("End", "G"), "Last project"),
        HelpSection::new("Projects")
            .row("n", "Add a new project")
            .row("m", "Move selected project to the other column")
            .row("?", "Show this help")
            .row("q", "Quit"),
        HelpSection::new("Drag and Drop (keyboard)")
            .row("Space", "Pick up selected project")
            .row(format!("{}, {}", key("←", "h"), key("→", "l")), "Drag over a column")
            .row("Space/Enter", "Drop on the column")
            .row("Esc", "Cancel the drag"),
    ];

    if config.ui.mouse {
        sections.push(
            HelpSection::new("Drag and Drop (mouse)")
                .row("Press", "Pick up the card under the pointer")
                .row("Drag", "Drag over a column")
                .row("Release", "Drop (outside a column cancels)")
                .row("Wheel", "Move the selection"),
        );
    }

    let form = &config.form;
    sections.push(
        HelpSection::new("New Project Form")
            .row("Tab/↓", "Next field")
            .row("Shift+Tab/↑", "Previous field")
            .row("Enter", "Add project")
            .row("Esc", "Close without adding")
            .row("Title", "Required")
            .row(
                "Description",
                format!(
                    "{} to {} characters",
                    form.description_min_length, form.description_max_length
                ),
            )
            .row(
                "People",
                format!("{} to {}", form.min_people, form.max_people),
            ),
    );

    sections
}

/// Render sections as styled lines
pub fn help_lines(sections: &[HelpSection]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "  project-board Help  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for section in sections {
        lines.push(Line::from(Span::styled(
            format!("─── {} ───", section.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in &section.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:14}"), Style::default().fg(Color::Green)),
                Span::raw(description.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Scroll position of the help view, bounded by content and viewport
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HelpScroll {
    offset: usize,
    max_offset: usize,
    page: usize,
}

impl HelpScroll {
    /// Recompute bounds for `content_lines` inside a frame `viewport_height` tall
    pub fn fit(&mut self, content_lines: usize, viewport_height: u16) {
        let visible = usize::from(viewport_height.saturating_sub(2));
        self.max_offset = content_lines.saturating_sub(visible);
        self.page = visible.saturating_sub(2).max(1);
        self.offset = self.offset.min(self.max_offset);
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset);
    }

    pub fn page_up(&mut self) {
        self.up(self.page);
    }

    pub fn page_down(&mut self) {
        self.down(self.page);
    }

    pub fn top(&mut self) {
        self.offset = 0;
    }

    pub fn bottom(&mut self) {
        self.offset = self.max_offset;
    }
}

/// Help view widget
pub struct HelpWidget<'a> {
    lines: &'a [Line<'static>],
    scroll: HelpScroll,
}

impl<'a> HelpWidget<'a> {
    pub fn new(lines: &'a [Line<'static>], scroll: HelpScroll) -> Self {
        Self { lines, scroll }
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (?) ");
        if self.scroll.max_offset > 0 {
            block = block.title_bottom(
                Line::from(format!(
                    " {}/{} ",
                    self.scroll.offset + 1,
                    self.scroll.max_offset + 1
                ))
                .right_aligned(),
            );
        }

        let offset = u16::try_from(self.scroll.offset).unwrap_or(u16::MAX);
        Paragraph::new(self.lines.to_vec())
            .block(block)
            .scroll((offset, 0))
            .render(area, buf);
    }
}
