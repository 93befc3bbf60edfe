//! # Published values
//!
//! A `Published<T>` owns one value and a list of listeners. Every change of the
//! value notifies the listeners, in subscription order, after the new value is
//! stored. Setting a value equal to the current one notifies nobody, so a
//! listener sees each transition exactly once.
//!
//! Listeners run on the thread that mutates the value; screens mutate their
//! state only from the UI thread.

use std::fmt;

/// Handle returned by `subscribe`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Published<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: PartialEq> Published<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store `value`; returns true (and notifies) only when it differs from the current one
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.notify();
        true
    }

    /// Mutate in place; listeners are notified if the value actually changed
    pub fn update(&mut self, mutate: impl FnOnce(&mut T)) -> bool
    where
        T: Clone,
    {
        let before = self.value.clone();
        mutate(&mut self.value);
        if before == self.value {
            return false;
        }
        self.notify();
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value);
        }
    }
}

impl<T: PartialEq + Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Published<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Published")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn test_set_notifies_on_change_only() {
        let mut published = Published::new(1);
        let (seen, listener) = recorder();
        published.subscribe(listener);

        assert!(published.set(2));
        assert!(!published.set(2));
        assert!(published.set(3));

        assert_eq!(*seen.borrow(), vec![2, 3]);
        assert_eq!(*published.get(), 3);
    }

    #[test]
    fn test_update_notifies_with_new_value() {
        let mut published = Published::new(vec![1]);
        let (seen, listener) = recorder();
        published.subscribe(listener);

        assert!(published.update(|v| v.push(2)));
        assert!(!published.update(|_| {}));

        assert_eq!(*seen.borrow(), vec![vec![1, 2]]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut published = Published::new("a");
        let (seen, listener) = recorder();
        let id = published.subscribe(listener);
        assert_eq!(published.subscriber_count(), 1);

        assert!(published.unsubscribe(id));
        assert!(!published.unsubscribe(id));
        published.set("b");

        assert!(seen.borrow().is_empty());
        assert_eq!(published.subscriber_count(), 0);
    }

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut published = Published::new(0);
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            published.subscribe(move |_| order.borrow_mut().push(tag));
        }

        published.set(1);

        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }
}
