//! Ordered listener list with subscribe/publish.

use crate::error::{ListenerError, StoreError, StoreResult};
use std::cell::RefCell;

/// Callback invoked with a snapshot every time the owner changes
pub type Listener<T> = Box<dyn FnMut(&[T]) -> Result<(), ListenerError>>;

/// Ordered collection of listeners.
///
/// Single-threaded: listeners run synchronously inside [`publish`](Self::publish)
/// and may not subscribe or publish on the same observable while doing so.
pub struct Observable<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Append a listener. There is no removal and no deduplication.
    pub fn subscribe(&self, listener: Listener<T>) -> StoreResult<()> {
        self.listeners
            .try_borrow_mut()
            .map_err(|_| StoreError::Reentrant)?
            .push(listener);
        Ok(())
    }

    /// Hand `snapshot` to every listener in registration order.
    ///
    /// Stops at the first listener error and returns it.
    pub fn publish(&self, snapshot: &[T]) -> StoreResult<()> {
        let mut listeners = self
            .listeners
            .try_borrow_mut()
            .map_err(|_| StoreError::Reentrant)?;
        for listener in listeners.iter_mut() {
            listener(snapshot)?;
        }
        Ok(())
    }

    /// True while [`publish`](Self::publish) is running the listeners
    pub fn is_publishing(&self) -> bool {
        self.listeners.try_borrow_mut().is_err()
    }

    /// Number of registered listeners; unavailable during a publish
    pub fn listener_count(&self) -> StoreResult<usize> {
        self.listeners
            .try_borrow()
            .map(|listeners| listeners.len())
            .map_err(|_| StoreError::Reentrant)
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_publish_in_registration_order() {
        let observable = Observable::<u32>::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            observable
                .subscribe(Box::new(move |items: &[u32]| {
                    calls.borrow_mut().push((tag, items.to_vec()));
                    Ok(())
                }))
                .unwrap();
        }

        observable.publish(&[1, 2]).unwrap();

        assert_eq!(
            *calls.borrow(),
            vec![
                ("first", vec![1, 2]),
                ("second", vec![1, 2]),
                ("third", vec![1, 2]),
            ]
        );
    }

    #[test]
    fn test_same_listener_twice_runs_twice() {
        let observable = Observable::<u32>::new();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            let count = Rc::clone(&count);
            observable
                .subscribe(Box::new(move |_: &[u32]| {
                    *count.borrow_mut() += 1;
                    Ok(())
                }))
                .unwrap();
        }

        observable.publish(&[]).unwrap();
        assert_eq!(*count.borrow(), 2);
        assert_eq!(observable.listener_count(), Ok(2));
    }

    #[test]
    fn test_listener_error_stops_fanout() {
        let observable = Observable::<u32>::new();
        let reached = Rc::new(RefCell::new(false));

        observable
            .subscribe(Box::new(|_: &[u32]| Err(ListenerError::new("boom"))))
            .unwrap();
        let flag = Rc::clone(&reached);
        observable
            .subscribe(Box::new(move |_: &[u32]| {
                *flag.borrow_mut() = true;
                Ok(())
            }))
            .unwrap();

        let err = observable.publish(&[1]).unwrap_err();
        assert_eq!(err, StoreError::Listener(ListenerError::new("boom")));
        assert!(!*reached.borrow());
    }

    #[test]
    fn test_subscribe_during_publish_is_rejected() {
        let observable = Rc::new(Observable::<u32>::new());
        let result = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&observable);
        let seen = Rc::clone(&result);
        observable
            .subscribe(Box::new(move |_: &[u32]| {
                let outcome = inner.subscribe(Box::new(|_: &[u32]| Ok(())));
                *seen.borrow_mut() = Some(outcome);
                Ok(())
            }))
            .unwrap();

        observable.publish(&[]).unwrap();
        assert_eq!(*result.borrow(), Some(Err(StoreError::Reentrant)));
        assert_eq!(observable.listener_count(), Ok(1));
    }

    #[test]
    fn test_listener_count_during_publish_is_rejected() {
        let observable = Rc::new(Observable::<u32>::new());
        let result = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&observable);
        let seen = Rc::clone(&result);
        observable
            .subscribe(Box::new(move |_: &[u32]| {
                *seen.borrow_mut() = Some((inner.listener_count(), inner.is_publishing()));
                Ok(())
            }))
            .unwrap();

        assert!(!observable.is_publishing());
        observable.publish(&[]).unwrap();
        assert_eq!(*result.borrow(), Some((Err(StoreError::Reentrant), true)));
        assert!(!observable.is_publishing());
    }
}
