use alloc::collections::VecDeque;

use core::marker::PhantomData;

/// Trait for defining order policies for monotonic queue
///
/// # Methods
///
/// * `should_remove(existing: &T, new: &T) -> bool` - Returns true if the existing element
///   can never again be the window extreme once `new` has arrived
pub trait OrderPolicy<T> {
    /// Returns true if `existing` is dominated by `new`
    fn should_remove(existing: &T, new: &T) -> bool;
}

/// Order policy for minimum
#[derive(Debug, Clone)]
pub struct Min;

/// Order policy for maximum
#[derive(Debug, Clone)]
pub struct Max;

impl<T: PartialOrd> OrderPolicy<T> for Min {
    #[inline]
    fn should_remove(existing: &T, new: &T) -> bool {
        existing > new
    }
}

impl<T: PartialOrd> OrderPolicy<T> for Max {
    #[inline]
    fn should_remove(existing: &T, new: &T) -> bool {
        existing < new
    }
}

// Pair of (series position, value)
type Entry<T> = (usize, T);

/// Monotonic queue over positions of an append-only series
///
/// Entries are kept in increasing position order with values monotonic under `O`,
/// so the front is always the extreme of every position pushed since the last
/// eviction. Each position is pushed and popped at most once, which makes
/// sliding a window across a series O(1) amortized per sample.
///
/// # Type Parameters
///
/// * `T` - The type of the elements in the queue
/// * `O` - The order policy for the queue
#[derive(Debug, Clone)]
pub struct MonotonicQueue<T, O> {
    deque: VecDeque<Entry<T>>,
    _order: PhantomData<O>,
}

impl<T, O> MonotonicQueue<T, O>
where
    T: PartialOrd + Copy,
    O: OrderPolicy<T>,
{
    /// Creates an empty queue sized for windows of `window_size` positions.
    ///
    /// # Arguments
    ///
    /// * `window_size` - The number of positions a window spans
    ///
    /// # Returns
    ///
    /// * `Self` - The `MonotonicQueue` instance
    #[inline]
    pub fn new(window_size: usize) -> Self {
        Self {
            deque: VecDeque::with_capacity(window_size),
            _order: PhantomData,
        }
    }

    /// Pushes the value found at `position`
    ///
    /// Positions must be pushed in strictly increasing order.
    ///
    /// # Arguments
    ///
    /// * `position` - Offset of the value in its series
    /// * `value` - The value to push into the queue
    #[inline]
    pub fn push(&mut self, position: usize, value: T) {
        debug_assert!(self.deque.back().is_none_or(|&(pos, _)| pos < position));

        while let Some(&(_, existing)) = self.deque.back() {
            if O::should_remove(&existing, &value) {
                self.deque.pop_back();
            } else {
                break;
            }
        }
        self.deque.push_back((position, value));
    }

    /// Drops every entry whose position lies before `start`
    ///
    /// # Arguments
    ///
    /// * `start` - First position of the current window
    #[inline]
    pub fn evict_before(&mut self, start: usize) {
        while let Some(&(pos, _)) = self.deque.front() {
            if pos < start {
                self.deque.pop_front();
            } else {
                break;
            }
        }
    }

    /// Returns the extreme value among the retained entries
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The front value, or `None` if the queue is empty
    #[inline]
    pub fn front(&self) -> Option<T> {
        self.deque.front().map(|&(_, value)| value)
    }

    /// Returns the number of retained entries
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.deque.len()
    }

    /// Returns true if the queue is empty
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.deque.is_empty()
    }
}
