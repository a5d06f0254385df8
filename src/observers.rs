use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Weakly held subscriber list shared by the store and the table.
///
/// Emitters call [`ObserverList::live`] to snapshot the subscribers and
/// release the borrow before dispatch, so callbacks may subscribe,
/// unsubscribe or query the emitter again.
pub(crate) struct ObserverList<T: ?Sized> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Weak<T>)>>,
}

impl<T: ?Sized> ObserverList<T> {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn add(&self, observer: Weak<T>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, observer));
        id
    }

    pub fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Upgrade every subscriber, dropping the ones that are gone
    pub fn live(&self) -> Vec<Rc<T>> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|(_, weak)| weak.strong_count() > 0);
        entries.iter().filter_map(|(_, weak)| weak.upgrade()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
