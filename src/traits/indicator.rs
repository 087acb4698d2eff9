use crate::{Result, Series};

/// Streaming indicator contract shared by every indicator in the crate
///
/// An indicator accumulates samples into its input series and, on every feed,
/// reduces each window of `period` consecutive samples that became complete
/// since the previous feed into exactly one output value. Output that has been
/// emitted is never recomputed or amended, and input can only be appended.
///
/// After any successful feed the output holds one value per window start
/// `o` with `o + period <= input_len()`, in increasing order of `o`, so
/// `output_len() == max(0, input_len() - period + 1)`.
///
/// # Type Parameters
///
/// * `T` - The type of the input samples
/// * `U` - The type of the output values
pub trait Indicator<T, U> {
    /// One logical input sample, e.g. a price or a `(high, low, close)` triple
    type Sample: Copy;

    /// Appends one sample and computes every window it completes
    ///
    /// # Arguments
    ///
    /// * `sample` - The newest sample
    ///
    /// # Returns
    ///
    /// * `Result<&Series<U>>` - The whole output series after the update
    ///
    /// # Errors
    ///
    /// A failing feed leaves the indicator exactly as it was before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_streaming::{Indicator, SimpleMovingAverage};
    /// let mut sma = SimpleMovingAverage::new(2).unwrap();
    /// let inputs = [1.0, 2.0, 3.0, 4.0];
    ///
    /// for i in inputs {
    ///     sma.feed(i).unwrap();
    /// }
    ///
    /// let expected = [1.5, 2.5, 3.5];
    /// assert_eq!(sma.output().as_slice(), &expected);
    /// ```
    fn feed(&mut self, sample: Self::Sample) -> Result<&Series<U>>;

    /// Appends a batch of samples, then computes every window they complete
    ///
    /// Feeding a batch yields the same output as feeding its samples one by one.
    ///
    /// # Arguments
    ///
    /// * `samples` - The new samples, oldest first
    ///
    /// # Returns
    ///
    /// * `Result<&Series<U>>` - The whole output series after the update
    ///
    /// # Errors
    ///
    /// If any sample is rejected none of the batch is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_streaming::{Indicator, SimpleMovingAverage};
    /// let mut batched = SimpleMovingAverage::new(3).unwrap();
    /// batched.feed_batch(&[1.0, 2.0]).unwrap();
    /// batched.feed_batch(&[3.0, 4.0]).unwrap();
    ///
    /// let mut single = SimpleMovingAverage::new(3).unwrap();
    /// single.feed_batch(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    ///
    /// assert_eq!(batched.output(), single.output());
    /// ```
    fn feed_batch(&mut self, samples: &[Self::Sample]) -> Result<&Series<U>>;

    /// Returns the diagnostic name of the indicator
    fn name(&self) -> &'static str;

    /// Returns the window size
    fn period(&self) -> usize;

    /// Returns the number of samples fed so far
    fn input_len(&self) -> usize;

    /// Returns the output series
    fn output(&self) -> &Series<U>;

    /// Returns the start offset of the next window that has not been reduced
    fn cursor(&self) -> usize;

    /// Returns the number of output values
    fn output_len(&self) -> usize {
        self.output().len()
    }

    /// Returns the output value at `index`, where `-1` is the most recent one
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds) when no
    /// output exists at the normalized index.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ta_streaming::{Error, Indicator, SimpleMovingAverage};
    /// let mut sma = SimpleMovingAverage::new(2).unwrap();
    /// sma.feed_batch(&[100.0, 100.0, 1000.0, 2000.0]).unwrap();
    ///
    /// assert_eq!(sma.get(0), Ok(100.0));
    /// assert_eq!(sma.get(-1), Ok(1500.0));
    /// assert_eq!(sma.get(3), Err(Error::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    fn get(&self, index: isize) -> Result<U>
    where
        U: Copy,
    {
        self.output().get(index)
    }

    /// Returns the most recent output value, if any window has completed
    fn last(&self) -> Option<U>
    where
        U: Copy,
    {
        self.output().last()
    }
}
