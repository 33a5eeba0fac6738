//! Fixed-Size Circular Buffer for Trend History
//!
//! ## Overview
//!
//! Trend charts only ever show the most recent N samples of a channel. This
//! module provides a ring buffer whose capacity is fixed at compile time
//! through const generics: pushing into a full buffer overwrites the oldest
//! element, so memory use never grows.
//!
//! - O(1) insertion (overwrites oldest when full)
//! - O(1) access to the most recent element
//! - O(n) iteration, oldest first
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<f64, 5> after 7 pushes (values 0..=6):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  5  │  6  │  2  │  3  │  4  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2 (also the oldest element when full)
//!
//! Logical view: [2, 3, 4, 5, 6]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use incubator_core::buffer::CircularBuffer;
//!
//! let mut history: CircularBuffer<f64, 3> = CircularBuffer::new();
//! for v in [36.9, 37.0, 37.1, 37.2] {
//!     history.push(v);
//! }
//!
//! assert_eq!(history.len(), 3);
//! assert_eq!(history.last(), Some(&37.2));
//! assert_eq!(history.recent(2), vec![37.1, 37.2]);
//! ```

/// Fixed-size circular buffer
///
/// ## Type Parameters
///
/// - `T`: element type, copied in and out of the slots
/// - `N`: maximum number of elements kept
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - iteration yields elements in insertion order
#[derive(Clone, Debug)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage array; `None` marks slots never written
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid elements
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty circular buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Creates a buffer already full of `value`
    pub fn filled(value: T) -> Self {
        Self {
            data: [Some(value); N],
            write_pos: 0,
            len: N,
        }
    }

    /// Adds an element, overwriting the oldest one when full
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }

        self.data[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of stored elements
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Most recently pushed element
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Up to `n` most recent elements, oldest first
    pub fn recent(&self, n: usize) -> Vec<T> {
        let skip = self.len.saturating_sub(n);
        self.iter().skip(skip).copied().collect()
    }

    /// Remove all elements
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Element by logical index (0 = oldest, len-1 = newest)
    ///
    /// When the buffer is full the oldest element sits at `write_pos`, so the
    /// logical index is offset by it:
    ///
    /// ```text
    /// Physical:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical:   [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, T: Copy, const N: usize> ExactSizeIterator for CircularBufferIter<'a, T, N> {}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
