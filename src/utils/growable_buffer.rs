use alloc::boxed::Box;

use core::fmt;

use crate::{Error, Result};

/// Capacity allocated by an empty buffer
pub const MIN_CAPACITY: usize = 16;

/// Factor the capacity is multiplied by when a push finds the buffer full
pub const GROWTH_FACTOR: usize = 2;

/// Reserved for a shrink-on-demand policy; buffers never shrink today
pub const SHRINK_FACTOR: usize = 4;

/// A heap-allocated, growable array with signed indexing.
///
/// Backs every input and output series of an indicator. Appends are amortized
/// O(1): when a push finds the buffer full, the storage is reallocated to
/// `capacity * GROWTH_FACTOR` and the live elements are copied over in order.
/// The capacity never decreases.
///
/// Indices are signed: a negative index counts from the end, so `-1` is the
/// most recently pushed element. Any index that falls outside `[0, len)` after
/// normalization is rejected with [`Error::IndexOutOfBounds`].
#[derive(Clone)]
pub struct GrowableBuffer<T> {
    /// Owned backing storage, `buf.len()` is the capacity.
    /// Slots past `len` hold `T::default()`.
    buf: Box<[T]>,
    /// Number of live elements at the front of `buf`.
    len: usize,
}

impl<T: Default + Copy> GrowableBuffer<T> {
    /// Creates an empty buffer with [`MIN_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty buffer able to hold at least `capacity` elements
    /// before reallocating.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Requested capacity, raised to [`MIN_CAPACITY`] if smaller
    ///
    /// # Returns
    ///
    /// * `Self` - The empty buffer
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![T::default(); capacity.max(MIN_CAPACITY)].into_boxed_slice(),
            len: 0,
        }
    }

    /// Appends `value` to the end of the buffer.
    ///
    /// # Arguments
    ///
    /// * `value` - The element to append
    ///
    /// # Returns
    ///
    /// * `usize` - The new length
    ///
    /// # Examples
    ///
    /// ```
    /// use ta_streaming::GrowableBuffer;
    ///
    /// let mut buf = GrowableBuffer::new();
    /// assert_eq!(buf.push(1.5), 1);
    /// assert_eq!(buf.push(2.5), 2);
    /// assert_eq!(buf.get(-1), Ok(2.5));
    /// ```
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.capacity() {
            self.grow();
        }
        self.buf[self.len] = value;
        self.len += 1;
        self.len
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if the buffer is empty.
    pub fn pop(&mut self) -> Result<T> {
        let i = self.normalize(-1)?;
        self.len = i;
        Ok(core::mem::take(&mut self.buf[i]))
    }

    /// Removes and returns the first element, moving the rest down by one.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if the buffer is empty.
    pub fn shift(&mut self) -> Result<T> {
        self.remove_at(0)
    }

    /// Removes and returns the element at `index`, closing the gap by moving
    /// every later element down by one position.
    ///
    /// # Arguments
    ///
    /// * `index` - Signed position of the element, negative counts from the end
    ///
    /// # Returns
    ///
    /// * `Result<T>` - The removed element
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if the normalized index is not in `[0, len)`.
    pub fn remove_at(&mut self, index: isize) -> Result<T> {
        let i = self.normalize(index)?;
        let removed = self.buf[i];
        self.buf.copy_within(i + 1..self.len, i);
        self.len -= 1;
        self.buf[self.len] = T::default();
        Ok(removed)
    }

    /// Shortens the buffer to `len` elements, keeping the capacity.
    /// Has no effect if `len` is not smaller than the current length.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.buf[len..self.len].fill(T::default());
            self.len = len;
        }
    }

    // Reallocates to the next capacity step and moves the live elements over
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.max(1) * GROWTH_FACTOR;
        let mut buf = vec![T::default(); new_capacity].into_boxed_slice();
        buf[..self.len].copy_from_slice(&self.buf[..self.len]);
        self.buf = buf;
        tracing::trace!(old_capacity, new_capacity, "growable buffer reallocated");
    }
}

impl<T> GrowableBuffer<T> {
    /// Returns the number of live elements
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer holds no elements
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the buffer can hold before reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the live elements, oldest first
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.len]
    }

    /// Returns an iterator over the live elements, oldest first
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Resolves a signed index to a position in `[0, len)`.
    ///
    /// # Arguments
    ///
    /// * `index` - The caller's index, negative values count from the end
    ///
    /// # Returns
    ///
    /// * `Result<usize>` - The normalized position
    pub fn normalize(&self, index: isize) -> Result<usize> {
        let resolved = if index < 0 {
            self.len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };

        match resolved {
            Some(i) if i < self.len => Ok(i),
            _ => Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            }),
        }
    }
}

impl<T: Copy> GrowableBuffer<T> {
    /// Returns the element at `index`, counting from the end when negative.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`] if the normalized index is not in `[0, len)`.
    pub fn get(&self, index: isize) -> Result<T> {
        let i = self.normalize(index)?;
        Ok(self.buf[i])
    }

    /// Returns the first element, if any
    #[inline]
    pub fn first(&self) -> Option<T> {
        self.as_slice().first().copied()
    }

    /// Returns the most recently pushed element, if any
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.as_slice().last().copied()
    }
}

impl<T: Default + Copy> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq> PartialEq for GrowableBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Default + Copy> Extend<T> for GrowableBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| {
            self.push(value);
        });
    }
}

impl<T: Default + Copy> FromIterator<T> for GrowableBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buf = Self::new();
        buf.extend(iter);
        buf
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
