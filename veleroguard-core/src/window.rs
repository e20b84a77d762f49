//! Fixed-Capacity Ring Buffer for Per-Sensor History
//!
//! ## Overview
//!
//! A [`Window`] holds the most recent values reported by one sensor. It is
//! bounded: once `capacity` values are stored, every push overwrites the
//! oldest one. Eviction is pure FIFO, there is no other policy.
//!
//! ## Design Rationale
//!
//! ### Why a Ring and Not a Shifting Vec?
//!
//! Evicting from the front of a `Vec` moves every remaining element. The ring
//! keeps a write position instead, so a push into a full window is a single
//! slot overwrite:
//! - O(1) insertion (overwrites oldest when full)
//! - O(1) access to most recent value
//! - O(n) iteration from oldest to newest
//! - One allocation, sized at construction
//!
//! ### Memory Layout
//!
//! ```text
//! Window with capacity 5 after 7 pushes (v0..v6):
//! ┌────┬────┬────┬────┬────┐
//! │ v5 │ v6 │ v2 │ v3 │ v4 │  ← physical slots
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2, also the oldest value
//!
//! Logical view (iter): [v2, v3, v4, v5, v6]
//! ```
//!
//! ## Thread Safety
//!
//! `Window` is a plain value. Sharing between threads goes through
//! [`WindowStore`](crate::store::WindowStore), which wraps each window in
//! its own mutex.

use crate::stats::WindowStats;

/// Bounded, order-preserving history of one sensor's values
///
/// ## Internal Invariants
///
/// - `len() <= capacity()`
/// - `write_pos < capacity` once the window is full
/// - iteration yields values in arrival order
#[derive(Debug, Clone)]
pub struct Window {
    /// Slot storage, grows to `capacity` and is then overwritten in place
    data: Vec<f64>,

    /// Maximum number of values retained
    capacity: usize,

    /// Slot the next push writes to once the window is full
    write_pos: usize,
}

impl Window {
    /// Creates an empty window that retains at most `capacity` values
    ///
    /// A capacity of zero is raised to one; configuration validation
    /// rejects zero before it gets here.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            write_pos: 0,
        }
    }

    /// Appends a value, evicting the oldest one first if the window is full
    ///
    /// Returns the evicted value, if any.
    ///
    /// ```rust
    /// # use veleroguard_core::window::Window;
    /// let mut window = Window::with_capacity(3);
    /// window.push(1.0);
    /// window.push(2.0);
    /// window.push(3.0);
    ///
    /// // Fourth push drops the first
    /// assert_eq!(window.push(4.0), Some(1.0));
    /// assert_eq!(window.to_vec(), vec![2.0, 3.0, 4.0]);
    /// ```
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.data.len() < self.capacity {
            self.data.push(value);
            self.write_pos = self.data.len() % self.capacity;
            return None;
        }

        let evicted = std::mem::replace(&mut self.data[self.write_pos], value);
        self.write_pos = (self.write_pos + 1) % self.capacity;
        Some(evicted)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Maximum number of values retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent value
    pub fn last(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        self.get(self.len() - 1)
    }

    /// Iterate over values from oldest to newest
    pub fn iter(&self) -> WindowIter<'_> {
        WindowIter {
            window: self,
            index: 0,
        }
    }

    /// Copies the contents out, oldest first
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Mean and sample standard deviation of the current contents
    ///
    /// `None` for an empty window.
    pub fn stats(&self) -> Option<WindowStats> {
        WindowStats::from_values(self.iter())
    }

    /// Gets a value by its logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical:   [A, B, C, D, E]
    ///
    /// logical[i] = physical[(write_pos + i) % capacity]
    /// ```
    ///
    /// Before the window fills, `write_pos` equals `len` modulo capacity
    /// and the data starts at slot 0, so no offset applies.
    fn get(&self, index: usize) -> Option<f64> {
        if index >= self.len() {
            return None;
        }

        let actual_index = if self.is_full() {
            (self.write_pos + index) % self.capacity
        } else {
            index
        };

        self.data.get(actual_index).copied()
    }
}

/// Iterator over window contents, oldest first
pub struct WindowIter<'a> {
    window: &'a Window,
    index: usize,
}

impl<'a> Iterator for WindowIter<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.window.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowIter<'_> {}
