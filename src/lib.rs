#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

#[macro_use]
extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod error;
pub use error::{Error, Result};

mod utils;
pub use utils::{GROWTH_FACTOR, GrowableBuffer, MIN_CAPACITY, SHRINK_FACTOR};

/// Append-only sequence of samples backing an indicator input or output
pub type Series<T> = GrowableBuffer<T>;

mod period;
pub use period::Period;

mod inputs;
pub use inputs::Inputs;

mod lifecycle;

mod traits;
pub use traits::Indicator;

mod simple_moving_average;
pub use simple_moving_average::SimpleMovingAverage;

mod williams_percent_range;
pub use williams_percent_range::WilliamsPercentRange;
