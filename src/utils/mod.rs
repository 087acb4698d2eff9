mod growable_buffer;
pub use growable_buffer::{GROWTH_FACTOR, GrowableBuffer, MIN_CAPACITY, SHRINK_FACTOR};

mod monotonic_queue;
pub use monotonic_queue::{Max, Min, MonotonicQueue};
