//! The authoritative project list.

use crate::domain::{Project, ProjectId, ProjectStatus};
use crate::error::{StoreError, StoreResult};
use crate::services::observable::{Listener, Observable};
use std::cell::RefCell;

/// Owns every project on the board and notifies listeners after each change.
///
/// One store is constructed per running UI and shared with the views as an
/// `Rc<ProjectStore>`. Mutations go through [`add_project`](Self::add_project)
/// and [`move_project`](Self::move_project) only; listeners receive owned
/// snapshots, and a mutation or subscription attempted from inside a listener
/// is refused with [`StoreError::Reentrant`] before anything changes.
pub struct ProjectStore {
    projects: RefCell<Vec<Project>>,
    listeners: Observable<Project>,
}

impl ProjectStore {
    /// Create an empty store with no listeners
    pub fn new() -> Self {
        Self {
            projects: RefCell::new(Vec::new()),
            listeners: Observable::new(),
        }
    }

    /// Register a listener for future changes. Past state is not replayed.
    pub fn add_listener(&self, listener: Listener<Project>) -> StoreResult<()> {
        self.listeners.subscribe(listener)
    }

    /// Append a new active project and notify listeners.
    ///
    /// The input is expected to be validated already. The only error comes
    /// from a failing listener, in which case the project stays added.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> StoreResult<ProjectId> {
        self.ensure_idle()?;
        let project = Project::new(title.into(), description.into(), people);
        let id = project.id.clone();
        tracing::debug!(id = %id, title = %project.title, "adding project");

        self.projects.borrow_mut().push(project);
        self.notify()?;
        Ok(id)
    }

    /// Move the project with `id` to `new_status`.
    ///
    /// Returns `Ok(false)` without notifying when no project has that id or
    /// it already has that status.
    pub fn move_project(&self, id: &str, new_status: ProjectStatus) -> StoreResult<bool> {
        self.ensure_idle()?;
        {
            let mut projects = self.projects.borrow_mut();
            let Some(project) = projects.iter_mut().find(|p| p.id.as_str() == id) else {
                tracing::debug!(id, "move ignored: unknown project");
                return Ok(false);
            };
            if project.status == new_status {
                tracing::debug!(id, status = %new_status, "move ignored: status unchanged");
                return Ok(false);
            }
            tracing::debug!(id, from = %project.status, to = %new_status, "moving project");
            project.status = new_status;
        }

        self.notify()?;
        Ok(true)
    }

    /// Copy of the current project list, in insertion order
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Copy of a single project
    pub fn get(&self, id: &str) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|p| p.id.as_str() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    pub fn count_by_status(&self, status: ProjectStatus) -> usize {
        self.projects
            .borrow()
            .iter()
            .filter(|p| p.status == status)
            .count()
    }

    /// Mutations are refused while listeners are being notified
    fn ensure_idle(&self) -> StoreResult<()> {
        if self.listeners.is_publishing() {
            tracing::warn!("store mutation attempted during notification");
            return Err(StoreError::Reentrant);
        }
        Ok(())
    }

    /// Publish a fresh snapshot to every listener
    fn notify(&self) -> StoreResult<()> {
        let snapshot = self.snapshot();
        self.listeners.publish(&snapshot)
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Listener that records every snapshot it receives
    fn recorder(store: &ProjectStore) -> Rc<RefCell<Vec<Vec<Project>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store
            .add_listener(Box::new(move |projects: &[Project]| {
                sink.borrow_mut().push(projects.to_vec());
                Ok(())
            }))
            .unwrap();
        seen
    }

    #[test]
    fn test_add_projects_have_distinct_ids() {
        let store = ProjectStore::new();
        let ids: HashSet<ProjectId> = (0..50)
            .map(|i| store.add_project(format!("P{i}"), "description", 2).unwrap())
            .collect();

        assert_eq!(store.len(), 50);
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_project_is_active() {
        let store = ProjectStore::new();
        let id = store.add_project("A", "desc", 3).unwrap();
        let project = store.get(id.as_str()).unwrap();
        assert_eq!(project.status, ProjectStatus::Active);
        assert_eq!(project.title, "A");
        assert_eq!(project.description, "desc");
        assert_eq!(project.people, 3);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let store = ProjectStore::new();
        store.add_project("A", "desc", 3).unwrap();
        let seen = recorder(&store);
        let before = store.snapshot();

        let moved = store.move_project("no-such-id", ProjectStatus::Finished).unwrap();

        assert!(!moved);
        assert_eq!(store.snapshot(), before);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_move_to_same_status_does_not_notify() {
        let store = ProjectStore::new();
        let id = store.add_project("A", "desc", 3).unwrap();
        let seen = recorder(&store);

        let moved = store.move_project(id.as_str(), ProjectStatus::Active).unwrap();

        assert!(!moved);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_move_notifies_once_with_updated_snapshot() {
        let store = ProjectStore::new();
        let a = store.add_project("A", "desc", 3).unwrap();
        let b = store.add_project("B", "desc2", 2).unwrap();
        let seen = recorder(&store);

        assert!(store.move_project(a.as_str(), ProjectStatus::Finished).unwrap());

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        let snapshot = &seen[0];
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[0].status, ProjectStatus::Finished);
        assert_eq!(snapshot[1].id, b);
        assert_eq!(snapshot[1].status, ProjectStatus::Active);
        assert_eq!(snapshot[1].title, "B");
    }

    #[test]
    fn test_moves_are_bidirectional() {
        let store = ProjectStore::new();
        let id = store.add_project("A", "desc", 3).unwrap();
        assert!(store.move_project(id.as_str(), ProjectStatus::Finished).unwrap());
        assert!(store.move_project(id.as_str(), ProjectStatus::Active).unwrap());
        assert_eq!(store.get(id.as_str()).unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn test_two_listeners_receive_identical_snapshots_in_order() {
        let store = ProjectStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = recorder(&store);
        {
            let order = Rc::clone(&order);
            store
                .add_listener(Box::new(move |_: &[Project]| {
                    order.borrow_mut().push("first");
                    Ok(())
                }))
                .unwrap();
        }
        let second = recorder(&store);
        {
            let order = Rc::clone(&order);
            store
                .add_listener(Box::new(move |_: &[Project]| {
                    order.borrow_mut().push("second");
                    Ok(())
                }))
                .unwrap();
        }

        let id = store.add_project("A", "desc", 3).unwrap();
        store.move_project(id.as_str(), ProjectStatus::Finished).unwrap();

        assert_eq!(first.borrow().len(), 2);
        assert_eq!(*first.borrow(), *second.borrow());
        assert_eq!(*order.borrow(), vec!["first", "second", "first", "second"]);
    }

    #[test]
    fn test_board_scenario() {
        let store = ProjectStore::new();
        let seen = recorder(&store);

        let a = store.add_project("A", "desc", 3).unwrap();
        {
            let seen = seen.borrow();
            let last = seen.last().unwrap();
            assert_eq!(last.len(), 1);
            assert_eq!(last[0].status, ProjectStatus::Active);
            assert_eq!(last[0].people, 3);
        }

        store.add_project("B", "desc2", 2).unwrap();
        {
            let seen = seen.borrow();
            let titles: Vec<&str> = seen.last().unwrap().iter().map(|p| p.title.as_str()).collect();
            assert_eq!(titles, vec!["A", "B"]);
        }

        store.move_project(a.as_str(), ProjectStatus::Finished).unwrap();
        {
            let seen = seen.borrow();
            let last = seen.last().unwrap();
            assert_eq!(last[0].status, ProjectStatus::Finished);
            assert_eq!(last[1].status, ProjectStatus::Active);
        }

        store.move_project(a.as_str(), ProjectStatus::Finished).unwrap();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_late_listener_gets_no_replay() {
        let store = ProjectStore::new();
        store.add_project("A", "desc", 3).unwrap();
        store.add_project("B", "desc2", 2).unwrap();

        let seen = recorder(&store);
        assert!(seen.borrow().is_empty());

        store.add_project("C", "desc3", 1).unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].len(), 3);
    }

    #[test]
    fn test_listener_error_propagates_after_mutation() {
        let store = ProjectStore::new();
        store
            .add_listener(Box::new(|_: &[Project]| Err(ListenerError::new("render failed"))))
            .unwrap();

        let err = store.add_project("A", "desc", 3).unwrap_err();
        assert_eq!(err, StoreError::Listener(ListenerError::new("render failed")));
        // No rollback: the project was appended before notification
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached_from_store() {
        let store = ProjectStore::new();
        let id = store.add_project("A", "desc", 3).unwrap();

        let mut copy = store.snapshot();
        copy[0].status = ProjectStatus::Finished;
        copy.clear();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(id.as_str()).unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn test_count_by_status() {
        let store = ProjectStore::new();
        let a = store.add_project("A", "desc", 3).unwrap();
        store.add_project("B", "desc", 3).unwrap();
        store.move_project(a.as_str(), ProjectStatus::Finished).unwrap();

        assert_eq!(store.count_by_status(ProjectStatus::Active), 1);
        assert_eq!(store.count_by_status(ProjectStatus::Finished), 1);
    }

    #[test]
    fn test_nested_mutation_is_rejected_without_change() {
        let store = Rc::new(ProjectStore::new());
        let a = store.add_project("A", "desc", 3).unwrap();

        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let inner = Rc::clone(&store);
        let sink = Rc::clone(&outcomes);
        let target = a.clone();
        store
            .add_listener(Box::new(move |_: &[Project]| {
                let moved = inner.move_project(target.as_str(), ProjectStatus::Finished);
                let added = inner.add_project("Nested", "desc", 1).map(|_| ());
                sink.borrow_mut().push((moved, added));
                Ok(())
            }))
            .unwrap();
        let seen = recorder(&store);

        store.add_project("B", "desc2", 2).unwrap();

        assert_eq!(
            *outcomes.borrow(),
            vec![(Err(StoreError::Reentrant), Err(StoreError::Reentrant))]
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(a.as_str()).unwrap().status, ProjectStatus::Active);

        // The published snapshot matches what the store holds
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], store.snapshot());
    }

    #[test]
    fn test_nested_subscribe_is_rejected() {
        let store = Rc::new(ProjectStore::new());
        let result = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&store);
        let sink = Rc::clone(&result);
        store
            .add_listener(Box::new(move |_: &[Project]| {
                *sink.borrow_mut() = Some(inner.add_listener(Box::new(|_: &[Project]| Ok(()))));
                Ok(())
            }))
            .unwrap();

        store.add_project("A", "desc", 3).unwrap();
        assert_eq!(*result.borrow(), Some(Err(StoreError::Reentrant)));

        // Outside a notification the store accepts changes again
        assert!(store.add_project("B", "desc", 2).is_ok());
        assert_eq!(store.len(), 2);
    }
}
