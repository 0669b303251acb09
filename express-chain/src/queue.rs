//! FIFO queue of pending callbacks
//!
//! `OrderedQueue` is a thin owning wrapper over `VecDeque`. It carries no lock
//! of its own; the chain guards it.

use std::collections::VecDeque;

/// First-in, first-out container with O(1) push and pop
#[derive(Debug, Clone)]
pub struct OrderedQueue<T> {
    items: VecDeque<T>,
}

impl<T> OrderedQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Append a value at the tail
    pub fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Append a value if one is present; `None` is ignored
    pub fn push_optional(&mut self, value: Option<T>) {
        if let Some(value) = value {
            self.push(value);
        }
    }

    /// Remove and return the head value
    ///
    /// Returns `None` when the queue is empty, leaving it untouched.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Borrow the head value without removing it
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// Drop every queued value and return how many were released
    pub fn clear(&mut self) -> usize {
        let released = self.items.len();
        self.items.clear();
        released
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for OrderedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for OrderedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> FromIterator<T> for OrderedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = OrderedQueue::new();
        for i in 1..=5 {
            queue.push(i);
        }
        assert_eq!(queue.len(), 5);

        let popped: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(popped, vec![1, 2, 3, 4, 5]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut queue: OrderedQueue<u32> = OrderedQueue::new();
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.len(), 0);
        assert!(queue.peek().is_none());
    }

    #[test]
    fn test_push_then_pop_leaves_queue_empty() {
        let mut queue = OrderedQueue::new();
        queue.push("only");
        assert_eq!(queue.peek(), Some(&"only"));
        assert_eq!(queue.pop(), Some("only"));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_empty_payload_is_distinct_from_empty_queue() {
        // A queued `None` payload still pops as `Some(None)`
        let mut queue: OrderedQueue<Option<u8>> = OrderedQueue::new();
        queue.push(None);
        assert_eq!(queue.pop(), Some(None));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_push_optional_ignores_none() {
        let mut queue = OrderedQueue::new();
        queue.push_optional(None);
        queue.push_optional(Some(7));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(7));
    }

    #[test]
    fn test_clear_releases_every_node() {
        for k in [0usize, 1, 4, 32] {
            let drops = Arc::new(AtomicUsize::new(0));
            let mut queue: OrderedQueue<_> =
                (0..k).map(|_| DropCounter(drops.clone())).collect();

            assert_eq!(queue.clear(), k);
            assert!(queue.is_empty());
            assert_eq!(drops.load(Ordering::SeqCst), k);
        }
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut queue = OrderedQueue::new();
        queue.extend([1, 2]);
        assert_eq!(queue.pop(), Some(1));
        queue.push(3);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(queue.pop(), Some(2));
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), None);
    }
}
