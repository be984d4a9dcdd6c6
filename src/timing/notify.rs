//! Change subscriptions for state machines.
//!
//! Each state machine owns a [`ChangeNotifier`] for its snapshot type and calls
//! [`ChangeNotifier::notify`] after every transition that changes what a
//! renderer would draw.

use std::fmt;

/// Handle returned by [`ChangeNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Ordered list of change listeners.
pub struct ChangeNotifier<S> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
}

impl<S> Default for ChangeNotifier<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }
}

impl<S> ChangeNotifier<S> {
    /// Registers a listener; listeners run in subscription order.
    pub fn subscribe(&mut self, listener: impl FnMut(&S) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn notify(&mut self, state: &S) {
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }

    /// Drops every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<S> fmt::Debug for ChangeNotifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_receive_state_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = ChangeNotifier::<u32>::default();

        let sink = Rc::clone(&seen);
        let id = notifier.subscribe(move |value| sink.borrow_mut().push(*value));

        notifier.notify(&1);
        assert!(notifier.unsubscribe(id));
        notifier.notify(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());
    }
}
