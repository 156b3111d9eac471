use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Unbounded FIFO shared between workers.
///
/// Besides single-item push/pop it offers [`BatchQueue::drain_all`], which
/// removes every item present at the moment of the call under one lock. Items
/// pushed concurrently land either in that drain or in the next one, never in
/// both and never in neither.
#[derive(Debug)]
pub struct BatchQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Condvar,
}

impl<T> BatchQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    pub fn push(&self, item: T) {
        self.items.lock().push_back(item);
        self.available.notify_one();
    }

    /// Appends every item, preserving their relative order.
    pub fn put_all<I>(&self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut guard = self.items.lock();
        let before = guard.len();
        guard.extend(items);
        let added = guard.len() - before;
        drop(guard);
        match added {
            0 => {}
            1 => {
                self.available.notify_one();
            }
            _ => {
                self.available.notify_all();
            }
        }
    }

    /// Removes the head, blocking until one is available.
    pub fn pop_blocking(&self) -> T {
        let mut guard = self.items.lock();
        loop {
            if let Some(item) = guard.pop_front() {
                return item;
            }
            self.available.wait(&mut guard);
        }
    }

    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Removes and returns, in enqueue order, everything currently queued.
    pub fn drain_all(&self) -> Vec<T> {
        let taken = std::mem::take(&mut *self.items.lock());
        taken.into()
    }

    /// Current length. Advisory only: other workers may change it right after.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

impl<T> Default for BatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
