//! Reactive state container with get/set/subscribe
//!
//! Writes go through `&mut self`, so only one writer can run per tick. An
//! `update` closure runs to completion, the version is bumped, and only then
//! are subscribers called, in subscription order, with the finished state.
//! Subscribers see a shared reference and cannot write back during
//! notification.

use std::fmt;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl From<SubscriptionId> for u64 {
    fn from(id: SubscriptionId) -> u64 {
        id.0
    }
}

impl From<u64> for SubscriptionId {
    fn from(raw: u64) -> Self {
        SubscriptionId(raw)
    }
}

type Listener<T> = Box<dyn FnMut(&T, u64)>;

pub struct Store<T> {
    state: T,
    version: u64,
    next_subscription: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T> Store<T> {
    pub fn new(state: T) -> Self {
        Self {
            state,
            version: 0,
            next_subscription: 0,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.state
    }

    /// Number of completed writes
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the whole state
    pub fn set(&mut self, state: T) {
        self.state = state;
        self.commit();
    }

    /// Mutate the state in place; observers run after `f` returns
    pub fn update<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = f(&mut self.state);
        self.commit();
        result
    }

    /// Register a listener called after every write with `(state, version)`
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&T, u64) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn commit(&mut self) {
        self.version += 1;
        let version = self.version;
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state, version);
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("version", &self.version)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_update_notifies_after_completion() {
        let mut store = Store::new(vec![1, 2]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state: &Vec<i32>, version| {
            sink.borrow_mut().push((state.len(), version));
        });

        store.update(|v| {
            v.push(3);
            v.push(4);
        });

        // One notification, observing the fully applied state
        assert_eq!(*seen.borrow(), vec![(4, 1)]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = Store::new(0u32);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_, _| *sink.borrow_mut() += 1);

        store.set(1);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set(2);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.version(), 2);
        assert_eq!(*store.get(), 2);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let mut store = Store::new(());
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let sink = Rc::clone(&order);
            store.subscribe(move |_, _| sink.borrow_mut().push(tag));
        }
        store.set(());
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
