//! Application state and main event loop.

use crate::config::BoardConfig;
use crate::domain::{DragEvent, Draggable, DropTarget, ProjectStatus};
use crate::error::{AppError, Result, StoreResult};
use crate::services::ProjectStore;
use crate::ui::input::{Action, InputHandler, InputMode};
use crate::ui::layout::BoardAreas;
use crate::ui::widgets::help::{help_lines, help_sections, HelpScroll};
use crate::ui::widgets::project_form::{FormAction, ProjectForm, ProjectInput};
use crate::ui::widgets::project_item::ProjectItem;
use crate::ui::widgets::project_list::{ProjectList, ProjectListWidget};
use crossterm::event::{Event, EventStream, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use futures::StreamExt;
use ratatui::prelude::*;
use std::rc::Rc;
use std::time::Duration;

/// Application view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    /// The two project columns
    #[default]
    Board,
    /// New-project form over the board
    NewProject,
    /// Help view showing keybindings
    Help,
}

/// A drag gesture in progress
#[derive(Debug)]
pub struct DragSession {
    source: ProjectItem,
    origin: ProjectStatus,
    event: DragEvent,
    over: Option<ProjectStatus>,
}

impl DragSession {
    /// Id of the dragged project
    pub fn project_id(&self) -> &str {
        self.source.project().id.as_str()
    }

    pub fn title(&self) -> &str {
        &self.source.project().title
    }

    /// Column the card was picked up from
    pub fn origin(&self) -> ProjectStatus {
        self.origin
    }

    /// Column currently under the pointer, if any
    pub fn over(&self) -> Option<ProjectStatus> {
        self.over
    }
}

/// Main application state
pub struct App {
    /// Loaded configuration
    pub config: BoardConfig,
    store: Rc<ProjectStore>,
    active: ProjectList,
    finished: ProjectList,

    // UI State
    /// Current view
    pub view: AppView,
    /// Column receiving navigation keys
    pub focused: ProjectStatus,
    /// Current input mode
    pub input_mode: InputMode,
    /// New-project form
    pub form: ProjectForm,
    /// Drag gesture in progress
    drag: Option<DragSession>,
    /// Error message to display
    pub error_message: Option<String>,
    /// Short confirmation shown until the next key press
    pub status_message: Option<String>,
    /// Help text for the active bindings
    pub help_lines: Vec<Line<'static>>,
    /// Help view scroll position
    pub help_scroll: HelpScroll,
    /// Area of the last drawn frame, used for mouse hit testing
    viewport: Rect,

    // Input handler
    input_handler: InputHandler,

    /// Should quit the application
    pub should_quit: bool,
}

impl App {
    /// Create a new application with an empty store
    pub fn new(config: BoardConfig) -> Result<Self> {
        let store = Rc::new(ProjectStore::new());
        let active = ProjectList::new(ProjectStatus::Active, Rc::clone(&store))?;
        let finished = ProjectList::new(ProjectStatus::Finished, Rc::clone(&store))?;

        let input_handler = InputHandler::new(config.ui.vim_navigation);
        let help_lines = help_lines(&help_sections(&input_handler, &config));

        Ok(Self {
            form: ProjectForm::new(config.form.clone()),
            input_handler,
            config,
            store,
            active,
            finished,
            view: AppView::Board,
            focused: ProjectStatus::Active,
            input_mode: InputMode::Normal,
            drag: None,
            error_message: None,
            status_message: None,
            help_lines,
            help_scroll: HelpScroll::default(),
            viewport: Rect::default(),
            should_quit: false,
        })
    }

    /// The shared project store
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    /// Column for a status
    pub fn list(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    fn list_mut(&mut self, status: ProjectStatus) -> &mut ProjectList {
        match status {
            ProjectStatus::Active => &mut self.active,
            ProjectStatus::Finished => &mut self.finished,
        }
    }

    /// Drag gesture in progress
    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Record the frame area used for mouse hit testing
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Add a validated project and select it
    pub fn add_project(&mut self, input: ProjectInput) -> Result<()> {
        let id = self
            .store
            .add_project(input.title.clone(), input.description, input.people)?;
        tracing::info!(id = %id, "project added");

        self.focused = ProjectStatus::Active;
        self.select_project(ProjectStatus::Active, id.as_str());
        self.status_message = Some(format!("Added project: {}", input.title));
        Ok(())
    }

    /// Select `id` in the column for `status`, if it is shown there
    fn select_project(&mut self, status: ProjectStatus, id: &str) {
        let index = self
            .list(status)
            .projects()
            .iter()
            .position(|p| p.id.as_str() == id);
        if let Some(index) = index {
            self.list_mut(status).select(index);
        }
    }

    /// Start dragging the card at `index` in the `status` column.
    ///
    /// Returns false when a drag is already running or there is no such card.
    pub fn begin_drag(&mut self, status: ProjectStatus, index: usize) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let Some(mut source) = self.list(status).item(index) else {
            return false;
        };

        self.list_mut(status).select(index);
        self.focused = status;

        let mut event = DragEvent::new();
        source.drag_start_handler(&mut event);
        self.drag = Some(DragSession {
            source,
            origin: status,
            event,
            over: None,
        });

        // The pointer starts over the card's own column
        self.drag_over(Some(status));
        true
    }

    /// Move the drag pointer onto `target`, or off every column with `None`
    pub fn drag_over(&mut self, target: Option<ProjectStatus>) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };

        if session.over != target {
            if let Some(previous) = session.over {
                let list = match previous {
                    ProjectStatus::Active => &mut self.active,
                    ProjectStatus::Finished => &mut self.finished,
                };
                list.drag_leave_handler(&mut session.event);
            }
            session.over = target;
        }

        if let Some(target) = target {
            let list = match target {
                ProjectStatus::Active => &mut self.active,
                ProjectStatus::Finished => &mut self.finished,
            };
            session.event.reset_default();
            list.drag_over_handler(&mut session.event);
            self.focused = target;
        }
    }

    /// Finish the gesture, dropping on the column under the pointer.
    ///
    /// The drop only happens if that column accepted the drag. Drag end runs
    /// on the source card in every case.
    pub fn drop_drag(&mut self) -> Result<()> {
        let Some(mut session) = self.drag.take() else {
            return Ok(());
        };

        self.finish_drag(&mut session)?;

        if let Some(target) = session.over {
            let id = session.project_id().to_string();
            self.select_project(target, &id);
            if target != session.origin {
                self.status_message = Some(format!(
                    "Moved '{}' to {} projects",
                    session.title(),
                    target
                ));
            }
        }
        Ok(())
    }

    /// Deliver the drop (or a leave, if the target never accepted) and end
    /// the drag on the source. Drag end runs even when the drop fails.
    fn finish_drag(&mut self, session: &mut DragSession) -> StoreResult<()> {
        let mut outcome = Ok(());
        if let Some(target) = session.over {
            let list = self.list_mut(target);
            if session.event.default_prevented() {
                outcome = list.drop_handler(&mut session.event);
            } else {
                list.drag_leave_handler(&mut session.event);
            }
        }
        session.source.drag_end_handler(&mut session.event);
        outcome
    }

    /// Abort the gesture without dropping
    pub fn cancel_drag(&mut self) {
        let Some(mut session) = self.drag.take() else {
            return;
        };
        if let Some(target) = session.over {
            self.list_mut(target).drag_leave_handler(&mut session.event);
        }
        session.source.drag_end_handler(&mut session.event);
        self.focused = session.origin;
    }

    /// Drag the selected card to the other column in one step
    pub fn move_selected(&mut self) -> Result<()> {
        let from = self.focused;
        let index = self.list(from).selected_index();
        if !self.begin_drag(from, index) {
            return Ok(());
        }
        self.drag_over(Some(from.toggled()));
        self.drop_drag()
    }

    /// Open the new-project form
    pub fn open_form(&mut self) {
        self.view = AppView::NewProject;
        self.input_mode = InputMode::Insert;
    }

    /// Close the form, keeping whatever was typed
    pub fn close_form(&mut self) {
        self.form.error = None;
        self.view = AppView::Board;
        self.input_mode = InputMode::Normal;
    }

    /// Open help view
    pub fn open_help(&mut self) {
        self.help_scroll.fit(self.help_lines.len(), self.viewport.height);
        self.view = AppView::Help;
    }

    /// Close help view
    pub fn close_help(&mut self) {
        self.view = AppView::Board;
    }

    /// Handle keyboard input and return true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.error_message = None;
        self.status_message = None;

        match self.view {
            AppView::Board => {}
            AppView::NewProject => return self.handle_form_key(key),
            AppView::Help => return Ok(self.handle_help_key(key)),
        }

        let Some(action) = self.input_handler.handle_key(key, self.input_mode) else {
            return Ok(false);
        };
        self.handle_board_action(action)
    }

    fn handle_board_action(&mut self, action: Action) -> Result<bool> {
        if self.drag.is_some() {
            match action {
                Action::MoveLeft => self.drag_over(Some(ProjectStatus::Active)),
                Action::MoveRight => self.drag_over(Some(ProjectStatus::Finished)),
                Action::SwitchColumn => self.drag_over(Some(self.focused.toggled())),
                Action::PickUp | Action::Drop => self.drop_drag()?,
                Action::Back => self.cancel_drag(),
                Action::Quit => {
                    self.cancel_drag();
                    return Ok(true);
                }
                _ => {}
            }
            return Ok(false);
        }

        match action {
            Action::MoveUp => self.list_mut(self.focused).select_previous(),
            Action::MoveDown => self.list_mut(self.focused).select_next(),
            Action::MoveLeft => self.focused = ProjectStatus::Active,
            Action::MoveRight => self.focused = ProjectStatus::Finished,
            Action::SwitchColumn => self.focused = self.focused.toggled(),
            Action::Home => self.list_mut(self.focused).select_first(),
            Action::End => self.list_mut(self.focused).select_last(),
            Action::PickUp => {
                let index = self.list(self.focused).selected_index();
                if !self.begin_drag(self.focused, index) {
                    self.error_message = Some("Nothing to pick up in this column".to_string());
                }
            }
            Action::MoveProject => self.move_selected()?,
            Action::NewProject => self.open_form(),
            Action::Help => self.open_help(),
            Action::Quit => return Ok(true),
            Action::Drop | Action::Back => {}
        }
        Ok(false)
    }

    /// Handle keys in the new-project form
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.input_handler.handle_key(key, self.input_mode) == Some(Action::Back) {
            self.close_form();
            return Ok(false);
        }

        match self.form.handle_key(key) {
            FormAction::Submit(input) => {
                self.add_project(input)?;
                self.form.clear();
                self.close_form();
            }
            FormAction::Cancel => self.close_form(),
            FormAction::Rejected(_) | FormAction::None => {}
        }
        Ok(false)
    }

    /// Handle keys in help view
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::PageUp => {
                self.help_scroll.page_up();
                return false;
            }
            KeyCode::PageDown => {
                self.help_scroll.page_down();
                return false;
            }
            _ => {}
        }

        match self.input_handler.handle_key(key, self.input_mode) {
            Some(Action::MoveUp) => self.help_scroll.up(1),
            Some(Action::MoveDown) => self.help_scroll.down(1),
            Some(Action::Home) => self.help_scroll.top(),
            Some(Action::End) => self.help_scroll.bottom(),
            Some(Action::Back | Action::Help | Action::Quit) => self.close_help(),
            _ => {}
        }
        false
    }


    /// Card under a screen position, as (column, index)
    fn card_at(&self, areas: &BoardAreas, column: u16, row: u16) -> Option<(ProjectStatus, usize)> {
        let status = areas.column_at(column, row)?;
        let list = self.list(status);
        let index = ProjectListWidget::item_at(
            areas.column(status),
            list.selected_index(),
            list.len(),
            row,
        )?;
        Some((status, index))
    }

    /// Translate mouse events into drag-and-drop steps
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.view != AppView::Board {
            return Ok(());
        }
        let areas = BoardAreas::new(self.viewport);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.error_message = None;
                self.status_message = None;
                if let Some((status, index)) = self.card_at(&areas, mouse.column, mouse.row) {
                    self.begin_drag(status, index);
                } else if let Some(status) = areas.column_at(mouse.column, mouse.row) {
                    self.focused = status;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let target = areas.column_at(mouse.column, mouse.row);
                self.drag_over(target);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag.is_some() {
                    let target = areas.column_at(mouse.column, mouse.row);
                    self.drag_over(target);
                    if target.is_some() {
                        self.drop_drag()?;
                    } else {
                        self.cancel_drag();
                    }
                }
            }
            MouseEventKind::ScrollUp if self.drag.is_none() => {
                if let Some(status) = areas.column_at(mouse.column, mouse.row) {
                    self.focused = status;
                    self.list_mut(status).select_previous();
                }
            }
            MouseEventKind::ScrollDown if self.drag.is_none() => {
                if let Some(status) = areas.column_at(mouse.column, mouse.row) {
                    self.focused = status;
                    self.list_mut(status).select_next();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Dispatch one terminal event
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                if self.handle_key(key)? {
                    self.should_quit = true;
                }
            }
            Event::Mouse(mouse) if self.config.ui.mouse => self.handle_mouse(mouse)?,
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.help_scroll.fit(self.help_lines.len(), height);
            }
            _ => {}
        }
        Ok(())
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.ui.refresh_rate_ms);
        let mut events = EventStream::new();

        while !self.should_quit {
            let frame = terminal.draw(|f| crate::ui::layout::draw(f, self))?;
            self.viewport = frame.area;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event)?,
                    Some(Err(e)) => return Err(AppError::Terminal(e.to_string())),
                    None => break,
                },
                _ = tokio::time::sleep(tick_rate) => {}
            }
        }

        self.cancel_drag();
        tracing::info!(projects = self.store.len(), "shutting down");
        Ok(())
    }
}
