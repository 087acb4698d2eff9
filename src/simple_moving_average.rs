use num_traits::Float;

use crate::{
    Error, Indicator, Inputs, Kbn, Period, Result, Series,
    lifecycle::{Compute, IndicatorCore},
};

/// # Simple Moving Average
///
/// Trailing arithmetic mean over a sliding window of one input series.
///
/// Each completed window `[o, o + period)` produces exactly one output value,
/// `sum / period`, so feeding `k` samples emits at most `k` new values and
/// fewer only while the series is shorter than the period.
///
/// The window sum is maintained incrementally with Kahan-Babuska-Neumaier
/// compensated summation: the entering sample is added and the leaving sample
/// subtracted, keeping the cost per sample constant regardless of the period
/// while limiting the rounding drift of a long-running sum.
///
/// A window whose mean is not finite (the running sum overflowed) rejects the
/// whole feed with [`Error::NumericOverflow`].
///
/// # Examples
///
/// ```
/// use ta_streaming::{Indicator, SimpleMovingAverage};
///
/// let mut sma = SimpleMovingAverage::new(3).unwrap();
/// let inputs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
///
/// let output = sma.feed_batch(&inputs).unwrap();
///
/// let expected = [2.0, 3.0, 4.0, 5.0];
/// assert_eq!(output.as_slice(), &expected);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleMovingAverage<T> {
    core: IndicatorCore<T, T, 1>,
    running: RunningSum<T>,
}

/// Compensated sum over the samples of the window currently being filled
#[derive(Debug, Clone)]
struct RunningSum<T> {
    /// Sum of `input[cursor..summed)`
    sum: Kbn<T>,
    /// Number of input samples already added to `sum`
    summed: usize,
}

impl<T: Float + Default> SimpleMovingAverage<T> {
    /// Diagnostic name reported by [`Indicator::name`]
    pub const NAME: &'static str = "SimpleMovingAverage";

    /// Creates a new moving average over `period` samples
    ///
    /// # Arguments
    ///
    /// * `period` - The window size
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The indicator, or [`Error::InvalidConfiguration`] if `period` is zero
    pub fn new(period: usize) -> Result<Self> {
        Period::new(period).map(Self::with_period)
    }

    /// Creates a new moving average from an already validated period
    pub fn with_period(period: Period) -> Self {
        Self {
            core: IndicatorCore::new(Self::NAME, period, ["input"]),
            running: RunningSum {
                sum: Kbn::default(),
                summed: 0,
            },
        }
    }

    /// Returns the input series
    pub fn input(&self) -> &Series<T> {
        let [input] = self.core.inputs().as_array();
        input
    }

    /// Returns the named input collection
    pub fn inputs(&self) -> &Inputs<T, 1> {
        self.core.inputs()
    }
}

impl<T: Float + Default> Default for SimpleMovingAverage<T> {
    fn default() -> Self {
        Self::with_period(Period::DEFAULT)
    }
}

impl<T: Float + Default> Compute<T, T, 1> for RunningSum<T> {
    fn compute(
        &mut self,
        inputs: &Inputs<T, 1>,
        cursor: usize,
        period: usize,
        output: &mut Series<T>,
    ) -> Result<usize> {
        let [input] = inputs.as_array();
        let samples = input.as_slice();
        let divisor = T::from(period).ok_or(Error::NumericOverflow { offset: cursor })?;

        // Work on a copy so a rejected window leaves the committed sum untouched
        let mut sum = self.sum.clone();
        let mut summed = self.summed;
        let mut start = cursor;

        while summed < samples.len() {
            sum += samples[summed];
            summed += 1;

            if summed - start < period {
                if !sum.total().is_finite() {
                    return Err(Error::NumericOverflow { offset: start });
                }
            } else {
                let mean = sum.total() / divisor;
                if !mean.is_finite() {
                    return Err(Error::NumericOverflow { offset: start });
                }
                output.push(mean);
                sum -= samples[start];
                start += 1;
            }
        }

        self.sum = sum;
        self.summed = summed;
        Ok(start - cursor)
    }
}

impl<T: Float + Default> Indicator<T, T> for SimpleMovingAverage<T> {
    type Sample = T;

    fn feed(&mut self, sample: T) -> Result<&Series<T>> {
        self.core.feed([[sample]], &mut self.running)
    }

    fn feed_batch(&mut self, samples: &[T]) -> Result<&Series<T>> {
        self.core
            .feed(samples.iter().map(|&sample| [sample]), &mut self.running)
    }

    fn name(&self) -> &'static str {
        self.core.name()
    }

    fn period(&self) -> usize {
        self.core.period()
    }

    fn input_len(&self) -> usize {
        self.core.inputs().len()
    }

    fn output(&self) -> &Series<T> {
        self.core.output()
    }

    fn cursor(&self) -> usize {
        self.core.cursor()
    }
}
