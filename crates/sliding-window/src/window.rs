//! Circular Sample Window

use crate::WindowError;

/// Default window capacity (12 samples = 6 s at 2 Hz)
pub const DEFAULT_CAPACITY: usize = 12;

/// Fixed-capacity window of the most recent samples, read newest-first.
///
/// Storage is a circular buffer: `push` overwrites the oldest slot in O(1)
/// and the newest-first view is reconstructed from the write position. All
/// slots start at zero, so a partially filled window reads as zero-padded.
///
/// `len` saturates at `capacity - 1` and the window reports full once
/// `len + 1 >= capacity`. Statistics therefore start on push `capacity - 1`,
/// while the oldest slot still holds its initial zero. Downstream consumers
/// rely on that first-report tick, so it is kept as is.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Pre-allocated storage
    slots: Box<[f64]>,
    /// Next slot to overwrite
    write_pos: usize,
    /// Saturating insert count
    count: usize,
    /// Samples accepted since construction
    total_pushed: u64,
}

impl SlidingWindow {
    /// Create a zero-initialised window with the given capacity
    pub fn new(capacity: usize) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            write_pos: 0,
            count: 0,
            total_pushed: 0,
        })
    }

    /// Create a window with default capacity (12 samples)
    pub fn with_default_capacity() -> Self {
        Self {
            slots: vec![0.0; DEFAULT_CAPACITY].into_boxed_slice(),
            write_pos: 0,
            count: 0,
            total_pushed: 0,
        }
    }

    /// Insert a sample at the newest position, dropping the oldest one
    pub fn push(&mut self, sample: f64) -> Result<(), WindowError> {
        if !sample.is_finite() {
            return Err(WindowError::NonFiniteSample(sample));
        }

        let capacity = self.capacity();
        self.slots[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % capacity;
        self.total_pushed += 1;

        if self.count < capacity - 1 {
            self.count += 1;
        }
        Ok(())
    }

    /// Check whether statistics may run on this window
    pub fn is_full(&self) -> bool {
        self.count + 1 >= self.capacity()
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get the saturating insert count (never exceeds `capacity - 1`)
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if nothing has been pushed yet
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get total samples accepted since construction
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    /// Read the sample at `index` positions behind the newest one
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.capacity() {
            return None;
        }
        Some(self.slots[self.slot_index(index)])
    }

    /// Iterate over all slots, newest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.capacity()).map(move |i| self.slots[self.slot_index(i)])
    }

    /// Copy all slots out, newest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.iter().collect()
    }

    fn slot_index(&self, newest_offset: usize) -> usize {
        let capacity = self.capacity();
        (self.write_pos + capacity - 1 - newest_offset) % capacity
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
