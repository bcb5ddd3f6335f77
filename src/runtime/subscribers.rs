//! Listener lists with RAII teardown.
//!
//! Every producer (progress source, scroll spy, frame clock) owns one [`Subscribers`] list. A
//! consumer keeps the returned [`Subscription`] for as long as it is mounted; dropping it (or
//! calling [`Subscription::unsubscribe`]) releases the listener. Everything is single-threaded and
//! frame-driven, so lists are `Rc<RefCell<..>>` and never shared across threads.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    notifying: bool,
    removed_while_notifying: Vec<u64>,
}

impl<T> Inner<T> {
    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(lid, _)| *lid != id);
        if self.notifying {
            self.removed_while_notifying.push(id);
        }
    }
}

/// Ordered listener list for values of type `T`.
pub struct Subscribers<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: 'static> Subscribers<T> {
    /// Empty list.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                next_id: 0,
                listeners: Vec::new(),
                notifying: false,
                removed_while_notifying: Vec::new(),
            })),
        }
    }

    /// Register `listener`. It stays registered while the returned handle lives.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Call every listener once with `value`, in subscription order.
    ///
    /// Listeners may subscribe or unsubscribe while being notified; new listeners are first called
    /// on the next notification.
    pub fn notify(&self, value: &T) {
        let mut running = {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                tracing::warn!("re-entrant notify ignored");
                return;
            }
            inner.notifying = true;
            std::mem::take(&mut inner.listeners)
        };

        for (id, listener) in running.iter_mut() {
            let removed = self
                .inner
                .borrow()
                .removed_while_notifying
                .contains(id);
            if !removed {
                listener(value);
            }
        }

        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed_while_notifying);
        running.retain(|(id, _)| !removed.contains(id));
        running.append(&mut inner.listeners);
        inner.listeners = running;
        inner.notifying = false;
    }

    /// Registered listeners.
    pub fn len(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle keeping one listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/subscribers.rs"]
mod tests;
