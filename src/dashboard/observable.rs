use std::cell::RefCell;
use std::rc::Rc;

/// Receives every change of a widget value it subscribed to.
pub trait Observer<T> {
    fn on_change(&mut self, value: &T);
}

pub type Subscriber<T> = Rc<RefCell<dyn Observer<T>>>;

/// A widget value plus the panels that depend on it.
///
/// Notification is synchronous and in subscription order: when `set`
/// returns, every subscriber has already recomputed.
pub struct Observable<T> {
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Observable {
            value,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Register `subscriber` and hand it the current value right away.
    pub fn subscribe(&mut self, subscriber: Subscriber<T>) {
        subscriber.borrow_mut().on_change(&self.value);
        self.subscribers.push(subscriber);
    }

    /// Store `value` and notify subscribers. Returns `false` (and notifies
    /// nobody) if the value did not change.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for subscriber in &self.subscribers {
            subscriber.borrow_mut().on_change(&self.value);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<i32>,
    }

    impl Observer<i32> for Recorder {
        fn on_change(&mut self, value: &i32) {
            self.seen.push(*value);
        }
    }

    #[test]
    fn subscribe_delivers_current_value() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut value = Observable::new(3);
        value.subscribe(recorder.clone());
        assert_eq!(recorder.borrow().seen, [3]);
    }

    #[test]
    fn set_notifies_only_on_change() {
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        let mut value = Observable::new(0);
        value.subscribe(a.clone());
        value.subscribe(b.clone());

        assert!(value.set(1));
        assert!(!value.set(1));
        assert!(value.set(2));

        assert_eq!(a.borrow().seen, [0, 1, 2]);
        assert_eq!(b.borrow().seen, [0, 1, 2]);
        assert_eq!(*value.get(), 2);
    }
}
