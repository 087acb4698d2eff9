use num_traits::Float;

use crate::{
    Error, Indicator, Inputs, Period, Result, Series,
    lifecycle::{Compute, IndicatorCore},
    utils::{Max, Min, MonotonicQueue},
};

/// # Williams %R
///
/// Range oscillator over three aligned series fed together as one
/// `(high, low, close)` sample.
///
/// For every completed window the output is
///
/// ```text
/// (highest high - close) / (highest high - lowest low)
/// ```
///
/// where `close` is the close of the newest sample in the window. The value is
/// `0` when the close sits at the top of the range and `1` when it sits at the
/// bottom.
///
/// A window whose highest high equals its lowest low has no range to
/// normalize against; it yields `0`, the same value as a close pinned at the
/// top of the range.
///
/// The window extremes come from a pair of monotonic queues, so each sample
/// costs O(1) amortized regardless of the period. A window whose value is not
/// finite (the range overflowed) rejects the whole feed with
/// [`Error::NumericOverflow`].
///
/// # Examples
///
/// ```
/// use ta_streaming::{Indicator, WilliamsPercentRange};
///
/// let mut wpr = WilliamsPercentRange::new(2).unwrap();
/// wpr.feed((10.0, 8.0, 9.0)).unwrap();
/// let output = wpr.feed((12.0, 9.0, 11.0)).unwrap();
///
/// // (12 - 11) / (12 - 8)
/// assert_eq!(output.as_slice(), &[0.25]);
/// ```
#[derive(Debug, Clone)]
pub struct WilliamsPercentRange<T> {
    core: IndicatorCore<T, T, 3>,
    extrema: RangeExtrema<T>,
}

/// Sliding highest high and lowest low
#[derive(Debug, Clone)]
struct RangeExtrema<T> {
    highest: MonotonicQueue<T, Max>,
    lowest: MonotonicQueue<T, Min>,
    /// Number of samples pushed into both queues
    pushed: usize,
}

impl<T: Float + Default> WilliamsPercentRange<T> {
    /// Diagnostic name reported by [`Indicator::name`]
    pub const NAME: &'static str = "WilliamsPercentRange";

    /// Creates a new Williams %R over `period` samples
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

    /// Creates a new Williams %R from an already validated period
    pub fn with_period(period: Period) -> Self {
        Self {
            core: IndicatorCore::new(Self::NAME, period, ["high", "low", "close"]),
            extrema: RangeExtrema::new(period.get()),
        }
    }

    /// Returns the high series
    pub fn high(&self) -> &Series<T> {
        &self.core.inputs().as_array()[0]
    }

    /// Returns the low series
    pub fn low(&self) -> &Series<T> {
        &self.core.inputs().as_array()[1]
    }

    /// Returns the close series
    pub fn close(&self) -> &Series<T> {
        &self.core.inputs().as_array()[2]
    }

    /// Returns the named input collection
    pub fn inputs(&self) -> &Inputs<T, 3> {
        self.core.inputs()
    }
}

impl<T: Float + Default> Default for WilliamsPercentRange<T> {
    fn default() -> Self {
        Self::with_period(Period::DEFAULT)
    }
}

impl<T: Float + Default> RangeExtrema<T> {
    fn new(period: usize) -> Self {
        Self {
            highest: MonotonicQueue::new(period),
            lowest: MonotonicQueue::new(period),
            pushed: 0,
        }
    }

    fn push(&mut self, position: usize, high: T, low: T) {
        self.highest.push(position, high);
        self.lowest.push(position, low);
    }

    // Slides both queues over every unseen sample, emitting each completed window
    fn advance(
        &mut self,
        inputs: &Inputs<T, 3>,
        cursor: usize,
        period: usize,
        output: &mut Series<T>,
    ) -> Result<usize> {
        let [high, low, close] = inputs.as_array();
        let (high, low, close) = (high.as_slice(), low.as_slice(), close.as_slice());
        let mut start = cursor;

        while self.pushed < close.len() {
            let i = self.pushed;
            self.push(i, high[i], low[i]);
            self.pushed += 1;

            if self.pushed - start < period {
                continue;
            }

            self.highest.evict_before(start);
            self.lowest.evict_before(start);
            let (Some(highest), Some(lowest)) = (self.highest.front(), self.lowest.front()) else {
                // Both queues hold at least the sample just pushed
                break;
            };

            let value = if highest == lowest {
                tracing::debug!(offset = start, "degenerate window, range collapsed");
                T::zero()
            } else {
                let (distance, range) = (highest - close[i], highest - lowest);
                // A finite numerator over an infinite range would read as 0
                if !distance.is_finite() || !range.is_finite() {
                    return Err(Error::NumericOverflow { offset: start });
                }
                distance / range
            };
            if !value.is_finite() {
                return Err(Error::NumericOverflow { offset: start });
            }

            output.push(value);
            start += 1;
        }

        Ok(start - cursor)
    }

    // Rebuilds the queues from the samples of the partial window `[cursor, len)`
    fn rebuild(&mut self, inputs: &Inputs<T, 3>, cursor: usize, period: usize, len: usize) {
        let [high, low, _] = inputs.as_array();
        *self = Self::new(period);
        for i in cursor..len {
            self.push(i, high.as_slice()[i], low.as_slice()[i]);
        }
        self.pushed = len;
    }
}

impl<T: Float + Default> Compute<T, T, 3> for RangeExtrema<T> {
    fn compute(
        &mut self,
        inputs: &Inputs<T, 3>,
        cursor: usize,
        period: usize,
        output: &mut Series<T>,
    ) -> Result<usize> {
        let resume = self.pushed;
        match self.advance(inputs, cursor, period, output) {
            Ok(emitted) => Ok(emitted),
            Err(err) => {
                self.rebuild(inputs, cursor, period, resume);
                Err(err)
            }
        }
    }
}

impl<T: Float + Default> Indicator<T, T> for WilliamsPercentRange<T> {
    type Sample = (T, T, T);

    fn feed(&mut self, (high, low, close): (T, T, T)) -> Result<&Series<T>> {
        self.core.feed([[high, low, close]], &mut self.extrema)
    }

    fn feed_batch(&mut self, samples: &[(T, T, T)]) -> Result<&Series<T>> {
        self.core.feed(
            samples.iter().map(|&(high, low, close)| [high, low, close]),
            &mut self.extrema,
        )
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

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use alloc::vec::Vec;

    use assert_approx_eq::assert_approx_eq;

    use super::*;

    // Naive per-window scan
    fn reference(samples: &[(f64, f64, f64)], period: usize) -> Vec<f64> {
        samples
            .windows(period)
            .map(|w| {
                let hh = w.iter().map(|s| s.0).fold(f64::MIN, f64::max);
                let ll = w.iter().map(|s| s.1).fold(f64::MAX, f64::min);
                let close = w[period - 1].2;
                if hh == ll { 0.0 } else { (hh - close) / (hh - ll) }
            })
            .collect()
    }

    fn bars() -> Vec<(f64, f64, f64)> {
        vec![
            (48.70, 47.79, 48.16),
            (48.72, 48.14, 48.61),
            (48.90, 48.39, 48.75),
            (48.87, 48.37, 48.63),
            (48.82, 48.24, 48.74),
            (49.05, 48.64, 49.03),
            (49.20, 48.94, 49.07),
            (49.35, 48.86, 49.32),
            (49.92, 49.50, 49.91),
            (50.19, 49.87, 50.13),
            (50.12, 49.20, 49.53),
            (49.66, 48.90, 49.50),
        ]
    }

    #[test]
    fn test_two_sample_window() {
        let mut wpr = WilliamsPercentRange::new(2).unwrap();
        assert!(wpr.feed((10.0, 8.0, 9.0)).unwrap().is_empty());
        assert_eq!(wpr.feed((12.0, 9.0, 11.0)).unwrap().as_slice(), &[0.25]);
        assert_eq!(wpr.get(-1), Ok(0.25));
    }

    #[test]
    fn test_degenerate_window_is_zero() {
        let mut wpr = WilliamsPercentRange::new(3).unwrap();
        let output = wpr.feed_batch(&[(5.0, 5.0, 5.0); 4]).unwrap();
        assert_eq!(output.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_close_at_range_bounds() {
        let mut wpr = WilliamsPercentRange::new(2).unwrap();
        wpr.feed_batch(&[(10.0, 6.0, 8.0), (10.0, 7.0, 10.0), (9.0, 5.0, 5.0)])
            .unwrap();
        // Close at the highest high, then at the lowest low
        assert_eq!(wpr.output().as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_matches_naive_scan() {
        let samples = bars();
        for period in 1..=samples.len() {
            let mut wpr = WilliamsPercentRange::new(period).unwrap();
            for (n, &sample) in samples.iter().enumerate() {
                let output = wpr.feed(sample).unwrap();
                let expected = reference(&samples[..=n], period);
                assert_eq!(output.len(), expected.len());
                for (e, r) in expected.iter().zip(output.iter()) {
                    assert_approx_eq!(e, r, 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_batches_match_single_feed() {
        let samples = bars();
        let mut batched = WilliamsPercentRange::new(5).unwrap();
        batched.feed_batch(&samples[..3]).unwrap();
        batched.feed_batch(&samples[3..7]).unwrap();
        batched.feed_batch(&samples[7..]).unwrap();

        let mut single = WilliamsPercentRange::new(5).unwrap();
        single.feed_batch(&samples).unwrap();

        assert_eq!(batched.output(), single.output());
        assert_eq!(batched.output_len(), samples.len() - 4);
    }

    #[test]
    fn test_series_stay_aligned() {
        let mut wpr = WilliamsPercentRange::new(3).unwrap();
        wpr.feed_batch(&bars()).unwrap();
        assert_eq!(wpr.high().len(), wpr.input_len());
        assert_eq!(wpr.low().len(), wpr.input_len());
        assert_eq!(wpr.close().len(), wpr.input_len());
        assert_eq!(wpr.inputs().row(-1), Ok([49.66, 48.90, 49.50]));
    }

    #[test]
    fn test_non_finite_triple_rejected_atomically() {
        let mut wpr = WilliamsPercentRange::new(2).unwrap();
        wpr.feed((10.0, 8.0, 9.0)).unwrap();

        assert_eq!(
            wpr.feed((12.0, 9.0, f64::NAN)).unwrap_err(),
            Error::NonFiniteSample { series: "close" }
        );
        assert_eq!(wpr.high().len(), 1);
        assert_eq!(wpr.low().len(), 1);
        assert_eq!(wpr.close().len(), 1);
        assert!(wpr.output().is_empty());
    }

    #[test]
    fn test_overflow_rolls_back_queues() {
        let mut wpr = WilliamsPercentRange::new(2).unwrap();
        wpr.feed((2.0, 1.0, 1.5)).unwrap();

        let err = wpr.feed((f64::MAX, -f64::MAX, -f64::MAX)).unwrap_err();
        assert_eq!(err, Error::NumericOverflow { offset: 0 });
        assert_eq!(wpr.input_len(), 1);
        assert_eq!(wpr.cursor(), 0);

        // The rejected extremes must not leak into the next window
        let output = wpr.feed((3.0, 1.0, 2.0)).unwrap();
        assert_eq!(output.as_slice(), &[0.5]);
    }

    #[test]
    fn test_infinite_range_with_finite_distance_rejected() {
        let mut wpr = WilliamsPercentRange::new(2).unwrap();
        assert!(wpr.feed((f64::MAX, -f64::MAX, 0.0)).unwrap().is_empty());

        // MAX - 0 is finite but MAX - (-MAX) is not
        assert_eq!(
            wpr.feed((f64::MAX, -f64::MAX, 0.0)).unwrap_err(),
            Error::NumericOverflow { offset: 0 }
        );
        assert_eq!(wpr.input_len(), 1);
        assert_eq!(wpr.cursor(), 0);
        assert!(wpr.output().is_empty());
    }

    #[test]
    fn test_default_period_and_name() {
        let wpr = WilliamsPercentRange::<f64>::default();
        assert_eq!(wpr.period(), 14);
        assert_eq!(wpr.name(), "WilliamsPercentRange");
        assert_eq!(wpr.inputs().names(), &["high", "low", "close"]);
    }

    #[test]
    fn test_invalid_period() {
        assert_eq!(
            WilliamsPercentRange::<f64>::new(0).unwrap_err(),
            Error::InvalidConfiguration { period: 0 }
        );
    }
}
