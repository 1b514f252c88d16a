use std::collections::VecDeque;

/// Number of entries kept in each recent-activity buffer.
pub const RECENT_CAPACITY: usize = 8;

/// Fixed-capacity list ordered newest first; pushing past capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RecentBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Builds a buffer from entries already ordered newest first.
    pub fn from_newest_first(capacity: usize, entries: Vec<T>) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.items.extend(entries.into_iter().take(buffer.capacity));
        buffer
    }

    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_evicts_oldest() {
        let mut buffer = RecentBuffer::from_newest_first(3, vec![3, 2, 1]);
        buffer.push_front(4);
        assert_eq!(buffer.to_vec(), vec![4, 3, 2]);
    }

    #[test]
    fn seed_longer_than_capacity_is_truncated() {
        let buffer = RecentBuffer::from_newest_first(2, vec!["c", "b", "a"]);
        assert_eq!(buffer.to_vec(), vec!["c", "b"]);
    }
}
