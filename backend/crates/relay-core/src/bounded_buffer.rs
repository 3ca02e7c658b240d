use std::collections::VecDeque;

/// FIFO buffer that never grows past its capacity.
///
/// Inserting into a full buffer evicts from the front (oldest first); the
/// order of the remaining elements is never changed.
#[derive(Debug)]
pub struct BoundedBuffer<T> {
    elements: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedBuffer<T> {
    /// `capacity` is validated by the owning queue; zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            elements: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail, returning how many elements were evicted to make room.
    pub fn push(&mut self, element: T) -> usize {
        let mut evicted = 0;
        while self.elements.len() >= self.capacity {
            self.elements.pop_front();
            evicted += 1;
        }
        self.elements.push_back(element);
        evicted
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop_front()
    }

    /// Remove everything, returning the number of discarded elements.
    pub fn clear(&mut self) -> usize {
        let discarded = self.elements.len();
        self.elements.clear();
        discarded
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}
