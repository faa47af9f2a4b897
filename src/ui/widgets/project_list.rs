//! Project column: one per status, fed by a store listener.

use crate::domain::{DragEvent, DropTarget, Project, ProjectStatus, TEXT_PLAIN};
use crate::error::StoreResult;
use crate::services::ProjectStore;
use crate::ui::widgets::project_item::{ProjectItem, ITEM_HEIGHT};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// A column of projects sharing one status.
///
/// On construction the column registers a listener with the store; every
/// snapshot the store publishes replaces the column's projects with the ones
/// whose status matches. The column is also the drop target for that status.
pub struct ProjectList {
    kind: ProjectStatus,
    store: Rc<ProjectStore>,
    assigned: Rc<RefCell<Vec<Project>>>,
    droppable: bool,
    selected: usize,
}

impl ProjectList {
    /// Create the column and subscribe it to `store`
    pub fn new(kind: ProjectStatus, store: Rc<ProjectStore>) -> StoreResult<Self> {
        let assigned = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&assigned);
        store.add_listener(Box::new(move |projects: &[Project]| {
            let relevant: Vec<Project> = projects
                .iter()
                .filter(|p| p.status == kind)
                .cloned()
                .collect();
            tracing::trace!(column = %kind, count = relevant.len(), "column re-rendered");
            *sink.borrow_mut() = relevant;
            Ok(())
        }))?;

        Ok(Self {
            kind,
            store,
            assigned,
            droppable: false,
            selected: 0,
        })
    }

    pub fn kind(&self) -> ProjectStatus {
        self.kind
    }

    /// Heading, e.g. "ACTIVE PROJECTS"
    pub fn title(&self) -> String {
        format!("{} PROJECTS", self.kind.as_str().to_uppercase())
    }

    /// Projects currently shown, in store order
    pub fn projects(&self) -> Ref<'_, Vec<Project>> {
        self.assigned.borrow()
    }

    pub fn len(&self) -> usize {
        self.assigned.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.borrow().is_empty()
    }

    /// Whether the drop-zone marker is showing
    pub fn is_droppable(&self) -> bool {
        self.droppable
    }

    /// Selected index, clamped to the current list
    pub fn selected_index(&self) -> usize {
        self.selected.min(self.len().saturating_sub(1))
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.len().saturating_sub(1));
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected_index().saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        self.select(self.selected_index() + 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.len().saturating_sub(1);
    }

    /// Card for the selected project
    pub fn selected_item(&self) -> Option<ProjectItem> {
        self.item(self.selected_index())
    }

    pub fn item(&self, index: usize) -> Option<ProjectItem> {
        self.assigned.borrow().get(index).cloned().map(ProjectItem::new)
    }
}

impl DropTarget for ProjectList {
    fn drag_over_handler(&mut self, event: &mut DragEvent) {
        let accepts = event
            .data_transfer
            .as_ref()
            .is_some_and(|dt| dt.has_type(TEXT_PLAIN));
        if accepts {
            event.prevent_default();
            self.droppable = true;
        }
    }

    fn drop_handler(&mut self, event: &mut DragEvent) -> StoreResult<()> {
        self.droppable = false;
        let Some(id) = event.plain_text().map(str::to_owned) else {
            return Ok(());
        };
        if self.store.move_project(&id, self.kind)? {
            tracing::info!(id = %id, column = %self.kind, "project dropped");
        }
        Ok(())
    }

    fn drag_leave_handler(&mut self, _event: &mut DragEvent) {
        self.droppable = false;
    }
}

/// Index of the first card drawn when `selected` must stay visible
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    (selected + 1).saturating_sub(visible)
}

/// Widget for rendering a [`ProjectList`]
pub struct ProjectListWidget<'a> {
    title: String,
    projects: &'a [Project],
    selected: usize,
    focused: bool,
    droppable: bool,
    dragging: Option<&'a str>,
}

impl<'a> ProjectListWidget<'a> {
    pub fn new(title: String, projects: &'a [Project], selected: usize) -> Self {
        Self {
            title,
            projects,
            selected,
            focused: false,
            droppable: false,
            dragging: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Highlight the column as a valid drop zone
    pub fn droppable(mut self, droppable: bool) -> Self {
        self.droppable = droppable;
        self
    }

    /// Id of the card currently being dragged, if any
    pub fn dragging(mut self, id: Option<&'a str>) -> Self {
        self.dragging = id;
        self
    }

    fn block(&self) -> Block<'static> {
        let (border_style, border_type) = if self.droppable {
            (Style::default().fg(Color::Green), BorderType::Double)
        } else if self.focused {
            (Style::default().fg(Color::Cyan), BorderType::Plain)
        } else {
            (Style::default().fg(Color::DarkGray), BorderType::Plain)
        };

        Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(format!(" {} ({}) ", self.title, self.projects.len()))
    }

    /// Which card is drawn at row `y`, given the column's outer `area`
    pub fn item_at(area: Rect, selected: usize, count: usize, y: u16) -> Option<usize> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if y < inner.y || y >= inner.y + inner.height {
            return None;
        }
        let visible = (inner.height / ITEM_HEIGHT) as usize;
        let offset = scroll_offset(selected, visible);
        let index = offset + ((y - inner.y) / ITEM_HEIGHT) as usize;
        (index < count).then_some(index)
    }
}

impl Widget for ProjectListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);

        if self.projects.is_empty() {
            let hint = if self.droppable {
                "Drop here"
            } else {
                "No projects"
            };
            Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(inner, buf);
            return;
        }

        let visible = (inner.height / ITEM_HEIGHT) as usize;
        let offset = scroll_offset(self.selected, visible);

        for (slot, (idx, project)) in self
            .projects
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + slot as u16 * ITEM_HEIGHT;
            let is_selected = self.focused && idx == self.selected;
            let is_dragging = self.dragging == Some(project.id.as_str());

            let card = ProjectItem::new(project.clone());
            let card_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: ITEM_HEIGHT - 1,
            };
            if is_selected {
                buf.set_style(card_area, Style::default().bg(Color::DarkGray));
            }
            Paragraph::new(card.lines(inner.width as usize, is_selected, is_dragging))
                .render(card_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> (Rc<ProjectStore>, ProjectList, ProjectList) {
        let store = Rc::new(ProjectStore::new());
        let active = ProjectList::new(ProjectStatus::Active, Rc::clone(&store)).unwrap();
        let finished = ProjectList::new(ProjectStatus::Finished, Rc::clone(&store)).unwrap();
        (store, active, finished)
    }

    fn payload(id: &str) -> DragEvent {
        let mut event = DragEvent::new();
        event
            .data_transfer
            .as_mut()
            .unwrap()
            .set_data(TEXT_PLAIN, id);
        event
    }

    #[test]
    fn test_columns_filter_by_status() {
        let (store, active, finished) = board();
        let a = store.add_project("A", "desc", 3).unwrap();
        store.add_project("B", "desc2", 2).unwrap();
        store.move_project(a.as_str(), ProjectStatus::Finished).unwrap();

        let active_titles: Vec<String> = active.projects().iter().map(|p| p.title.clone()).collect();
        let finished_titles: Vec<String> =
            finished.projects().iter().map(|p| p.title.clone()).collect();
        assert_eq!(active_titles, vec!["B"]);
        assert_eq!(finished_titles, vec!["A"]);
    }

    #[test]
    fn test_titles() {
        let (_store, active, finished) = board();
        assert_eq!(active.title(), "ACTIVE PROJECTS");
        assert_eq!(finished.title(), "FINISHED PROJECTS");
    }

    #[test]
    fn test_drag_over_marks_drop_zone() {
        let (_store, _active, mut finished) = board();
        let mut event = payload("whatever");

        finished.drag_over_handler(&mut event);
        assert!(event.default_prevented());
        assert!(finished.is_droppable());

        finished.drag_leave_handler(&mut event);
        assert!(!finished.is_droppable());
    }

    #[test]
    fn test_drag_over_ignores_foreign_payload() {
        let (_store, _active, mut finished) = board();
        let mut event = DragEvent::new();
        event
            .data_transfer
            .as_mut()
            .unwrap()
            .set_data("text/uri-list", "https://example.com");

        finished.drag_over_handler(&mut event);
        assert!(!event.default_prevented());
        assert!(!finished.is_droppable());

        let mut empty = DragEvent::default();
        finished.drag_over_handler(&mut empty);
        assert!(!finished.is_droppable());
    }

    #[test]
    fn test_drop_moves_project() {
        let (store, active, mut finished) = board();
        let id = store.add_project("A", "desc", 3).unwrap();
        let mut event = payload(id.as_str());

        finished.drag_over_handler(&mut event);
        finished.drop_handler(&mut event).unwrap();

        assert!(active.is_empty());
        assert_eq!(finished.len(), 1);
        assert!(!finished.is_droppable());
        assert_eq!(store.get(id.as_str()).unwrap().status, ProjectStatus::Finished);
    }

    #[test]
    fn test_drop_unknown_id_is_inert() {
        let (store, active, mut finished) = board();
        store.add_project("A", "desc", 3).unwrap();
        let before = store.snapshot();

        finished.drop_handler(&mut payload("missing")).unwrap();
        finished.drop_handler(&mut DragEvent::default()).unwrap();

        assert_eq!(store.snapshot(), before);
        assert_eq!(active.len(), 1);
        assert!(finished.is_empty());
    }

    #[test]
    fn test_selection_clamps_after_update() {
        let (store, mut active, _finished) = board();
        let ids: Vec<_> = (0..3)
            .map(|i| store.add_project(format!("P{i}"), "desc", 1).unwrap())
            .collect();

        active.select_last();
        assert_eq!(active.selected_index(), 2);

        store.move_project(ids[2].as_str(), ProjectStatus::Finished).unwrap();
        assert_eq!(active.selected_index(), 1);

        active.select_next();
        assert_eq!(active.selected_index(), 1);
        active.select_first();
        active.select_previous();
        assert_eq!(active.selected_index(), 0);
    }

    #[test]
    fn test_item_hit_testing() {
        let area = Rect::new(0, 0, 30, 2 + ITEM_HEIGHT * 3);
        // Border row
        assert_eq!(ProjectListWidget::item_at(area, 0, 5, 0), None);
        assert_eq!(ProjectListWidget::item_at(area, 0, 5, 1), Some(0));
        assert_eq!(ProjectListWidget::item_at(area, 0, 5, 1 + ITEM_HEIGHT), Some(1));
        // Past the last card
        assert_eq!(ProjectListWidget::item_at(area, 0, 1, 1 + ITEM_HEIGHT), None);
        // Scrolled so that index 4 is the last visible card
        assert_eq!(ProjectListWidget::item_at(area, 4, 5, 1), Some(2));
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(3, 3), 1);
        assert_eq!(scroll_offset(5, 0), 5);
    }

    #[test]
    fn test_widget_renders_cards() {
        let (store, active, _finished) = board();
        store.add_project("Launch", "Ship it", 2).unwrap();

        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        let projects = active.projects();
        ProjectListWidget::new(active.title(), &projects, 0)
            .focused(true)
            .render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("ACTIVE PROJECTS (1)"));
        assert!(rendered.contains("Launch"));
        assert!(rendered.contains("2 persons assigned"));
    }
}
