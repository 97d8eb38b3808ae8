//! Growable circular buffer with a movable read cursor.
//!
//! [`MovableHeadQueue`] is the storage backing the HPACK dynamic table: a
//! FIFO ring with O(1) enqueue/dequeue plus an O(1) [`set_head`] that
//! repositions the logical read cursor to an absolute backing-array slot.
//! Moving the cursor does not discard data; subsequent dequeues walk the
//! backing array forward from the new slot, wrapping, until every live
//! element has been produced exactly once.
//!
//! [`set_head`]: MovableHeadQueue::set_head

/// A circular FIFO queue whose read cursor can be repositioned in O(1).
#[derive(Debug)]
pub struct MovableHeadQueue<T> {
    slots: Vec<Option<T>>,
    head: usize,
    tail: usize,
    len: usize,
}

const INITIAL_CAPACITY: usize = 4;

impl<T> MovableHeadQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create an empty queue with at least the given slot capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no live elements are held.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Absolute backing-array slot of the current read cursor.
    pub fn head_index(&self) -> usize {
        self.head
    }

    /// Append an element behind the newest one. Amortized O(1); the backing
    /// array doubles when full, compacting live elements to slot 0 in their
    /// current logical order.
    pub fn enqueue(&mut self, item: T) {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.slots[self.tail] = Some(item);
        self.tail = (self.tail + 1) % self.slots.len();
        self.len += 1;
    }

    /// Remove and return the element at the read cursor, advancing the cursor
    /// past any vacated slots. Returns `None` when empty.
    pub fn try_dequeue(&mut self) -> Option<T> {
        while self.len > 0 {
            let taken = self.slots[self.head].take();
            self.head = (self.head + 1) % self.slots.len();
            if taken.is_some() {
                self.len -= 1;
                return taken;
            }
        }
        None
    }

    /// Reposition the read cursor to absolute backing-array slot `index`.
    ///
    /// Live elements are untouched; a full drain afterwards produces them in
    /// backing-array order starting at `index`, wrapping, each exactly once.
    /// `index` must be below the current capacity.
    pub fn set_head(&mut self, index: usize) {
        debug_assert!(index < self.slots.len(), "set_head past capacity");
        self.head = index;
    }

    /// Iterate live elements in cursor order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let capacity = self.slots.len();
        let head = self.head;
        (0..capacity)
            .map(move |offset| &self.slots[(head + offset) % capacity])
            .filter_map(|slot| slot.as_ref())
            .take(self.len)
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = (old_capacity * 2).max(INITIAL_CAPACITY);
        let mut slots = Vec::with_capacity(new_capacity);
        slots.resize_with(new_capacity, || None);

        // Compact into the new array preserving logical order from slot 0.
        let mut next = 0;
        for offset in 0..old_capacity {
            if let Some(item) = self.slots[(self.head + offset) % old_capacity].take() {
                slots[next] = Some(item);
                next += 1;
            }
        }
        debug_assert_eq!(next, self.len);

        self.slots = slots;
        self.head = 0;
        self.tail = self.len % new_capacity;
    }
}

impl<T> Default for MovableHeadQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
