use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

/// Records the values of its wrappers, in the order they are dropped.
pub struct DropTracker<T> {
    dropped: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone> DropTracker<T> {
    pub fn new() -> Self {
        DropTracker {
            dropped: Rc::default(),
        }
    }

    pub fn wrap(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            dropped: Rc::clone(&self.dropped),
        }
    }

    pub fn wrap_iter<I: IntoIterator<Item = T>>(&self, values: I) -> impl Iterator<Item = Tracked<T>> {
        let dropped = Rc::clone(&self.dropped);
        values.into_iter().map(move |value| Tracked {
            value,
            dropped: Rc::clone(&dropped),
        })
    }

    /// Returns the values dropped since the last call.
    pub fn take(&self) -> Vec<T> {
        mem::take(&mut *self.dropped.borrow_mut())
    }
}

#[derive(Debug)]
pub struct Tracked<T: Clone> {
    value: T,
    dropped: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Clone> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.dropped.borrow_mut().push(self.value.clone());
    }
}
