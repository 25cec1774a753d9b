//! Synchronous change notification for value containers.
//!
//! A mutation publishes a single [`ValueChange`] to every registered
//! listener, in registration order, on the calling thread, before the
//! mutating call returns. There is no cross-listener ordering guarantee
//! beyond registration order, and no thread-safety: the registry assumes a
//! single logical owner.

use std::fmt;

/// Handle identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Payload of a value-change notification.
///
/// Carries the values removed and added by one mutation; either side may
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange<T> {
    /// Values removed by the mutation, in their prior list order.
    pub removed: Vec<T>,
    /// Values added by the mutation, in list order.
    pub added: Vec<T>,
}

impl<T> ValueChange<T> {
    /// Creates a change carrying both removed and added values.
    #[must_use]
    pub fn new(removed: Vec<T>, added: Vec<T>) -> Self {
        Self { removed, added }
    }

    /// Creates a change that only added values.
    #[must_use]
    pub fn added(values: Vec<T>) -> Self {
        Self {
            removed: Vec::new(),
            added: values,
        }
    }

    /// Creates a change that only removed values.
    #[must_use]
    pub fn removed(values: Vec<T>) -> Self {
        Self {
            removed: values,
            added: Vec::new(),
        }
    }

    /// Returns whether the change carries no values on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

type Handler<T> = Box<dyn FnMut(&ValueChange<T>)>;

/// Ordered set of change listeners.
///
/// Handlers are `FnMut` closures owned by the registry. The registry is
/// runtime state: it is not cloned and does not round-trip through
/// serialization.
pub struct ListenerRegistry<T> {
    entries: Vec<(ListenerId, Handler<T>)>,
    next_id: u64,
}

impl<T> ListenerRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a listener and returns its handle.
    pub fn subscribe(&mut self, handler: impl FnMut(&ValueChange<T>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(handler)));
        id
    }

    /// Removes a listener. Returns whether it was still registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Dispatches `change` to every listener, in registration order.
    pub fn notify(&mut self, change: &ValueChange<T>) {
        for (_, handler) in &mut self.entries {
            handler(change);
        }
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ListenerRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .finish()
    }
}
