//! Drag-and-drop protocol between cards and columns.
//!
//! A gesture runs: `drag_start_handler` on the source card, then
//! `drag_over_handler` on whichever column is under the pointer (repeated,
//! with `drag_leave_handler` when the pointer moves away), then
//! `drop_handler` on the target column, and finally `drag_end_handler` on
//! the source card whether or not a drop happened.

use crate::error::StoreResult;

/// Data-transfer format carrying the dragged project's id
pub const TEXT_PLAIN: &str = "text/plain";

/// Operation a drag source allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Payload channel of a drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    /// Effect advertised by the drag source
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `format`, replacing any previous value for it
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(f, _)| f == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    /// Payload stored under `format`
    pub fn get_data(&self, format: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, d)| d.as_str())
    }

    /// Formats in the order they were set
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    pub fn has_type(&self, format: &str) -> bool {
        self.types().any(|f| f == format)
    }

    pub fn clear_data(&mut self) {
        self.entries.clear();
    }
}

/// Event passed to every drag handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEvent {
    pub data_transfer: Option<DataTransfer>,
    default_prevented: bool,
}

impl DragEvent {
    /// Event with an empty data-transfer channel
    pub fn new() -> Self {
        Self {
            data_transfer: Some(DataTransfer::new()),
            default_prevented: false,
        }
    }

    /// Signal that the current target accepts the drop
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Reset the acceptance flag before dispatching to the next target
    pub fn reset_default(&mut self) {
        self.default_prevented = false;
    }

    /// The `text/plain` payload, if the channel carries one
    pub fn plain_text(&self) -> Option<&str> {
        self.data_transfer.as_ref()?.get_data(TEXT_PLAIN)
    }
}

/// A view that can be picked up and dragged
pub trait Draggable {
    /// Stash this item's identity in the event and allow a move
    fn drag_start_handler(&mut self, event: &mut DragEvent);

    /// Called when the gesture ends, dropped or not
    fn drag_end_handler(&mut self, event: &mut DragEvent);
}

/// A view that accepts dropped items
pub trait DropTarget {
    /// Accept the drag and show the drop-zone marker if the payload is recognised
    fn drag_over_handler(&mut self, event: &mut DragEvent);

    /// Apply the drop. Errors raised while the store notifies are returned as-is.
    fn drop_handler(&mut self, event: &mut DragEvent) -> StoreResult<()>;

    /// Remove the drop-zone marker
    fn drag_leave_handler(&mut self, event: &mut DragEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_data_replaces_same_format() {
        let mut dt = DataTransfer::new();
        dt.set_data(TEXT_PLAIN, "first");
        dt.set_data("text/uri-list", "x");
        dt.set_data(TEXT_PLAIN, "second");

        assert_eq!(dt.get_data(TEXT_PLAIN), Some("second"));
        assert_eq!(dt.types().collect::<Vec<_>>(), vec![TEXT_PLAIN, "text/uri-list"]);
    }

    #[test]
    fn test_missing_format() {
        let dt = DataTransfer::new();
        assert_eq!(dt.get_data(TEXT_PLAIN), None);
        assert!(!dt.has_type(TEXT_PLAIN));
        assert_eq!(dt.effect_allowed, DropEffect::None);
    }

    #[test]
    fn test_event_without_channel() {
        let event = DragEvent::default();
        assert!(event.data_transfer.is_none());
        assert_eq!(event.plain_text(), None);
    }

    #[test]
    fn test_prevent_default() {
        let mut event = DragEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
        event.reset_default();
        assert!(!event.default_prevented());
    }
}
