use num_traits::Float;

use crate::{Inputs, Period, Result, Series};

/// The indicator-specific reduction step.
///
/// `compute` appends one value to `output` for every complete window whose
/// start lies at or after `cursor`, in increasing window order, and returns
/// how many windows it consumed. Without new input it must emit nothing.
///
/// On error the caller rolls `inputs` and `output` back to their lengths
/// before the feed. The implementor must leave its own state consistent with
/// that rolled back input.
pub(crate) trait Compute<T, U, const N: usize> {
    fn compute(
        &mut self,
        inputs: &Inputs<T, N>,
        cursor: usize,
        period: usize,
        output: &mut Series<U>,
    ) -> Result<usize>;
}

/// State shared by every indicator: identity, series and the window cursor.
#[derive(Debug, Clone)]
pub(crate) struct IndicatorCore<T, U, const N: usize> {
    name: &'static str,
    period: Period,
    inputs: Inputs<T, N>,
    output: Series<U>,
    /// Start offset of the next window not yet reduced
    cursor: usize,
}

impl<T, U, const N: usize> IndicatorCore<T, U, N>
where
    T: Float + Default,
    U: Default + Copy,
{
    pub(crate) fn new(name: &'static str, period: Period, names: [&'static str; N]) -> Self {
        Self {
            name,
            period,
            inputs: Inputs::new(names),
            output: Series::new(),
            cursor: 0,
        }
    }

    /// Appends `rows` to the inputs and runs `kernel` once over the new windows.
    ///
    /// Every row is checked before anything is appended, and a failing
    /// `compute` is rolled back, so an error leaves inputs, output and cursor
    /// exactly as they were.
    pub(crate) fn feed<I, C>(&mut self, rows: I, kernel: &mut C) -> Result<&Series<U>>
    where
        I: IntoIterator<Item = [T; N]>,
        I::IntoIter: Clone,
        C: Compute<T, U, N>,
    {
        let rows = rows.into_iter();
        for row in rows.clone() {
            self.inputs.check_finite(&row)?;
        }

        let input_len = self.inputs.len();
        let output_len = self.output.len();
        rows.for_each(|row| self.inputs.push_row(row));
        let appended = self.inputs.len() - input_len;

        match kernel.compute(
            &self.inputs,
            self.cursor,
            self.period.get(),
            &mut self.output,
        ) {
            Ok(emitted) => {
                self.cursor += emitted;
                debug_assert_eq!(self.cursor, self.output.len());
                debug_assert!(
                    self.cursor <= (self.inputs.len() + 1).saturating_sub(self.period.get())
                );
                tracing::trace!(
                    indicator = self.name,
                    appended,
                    emitted,
                    cursor = self.cursor,
                    "fed samples"
                );
                Ok(&self.output)
            }
            Err(err) => {
                self.inputs.truncate(input_len);
                self.output.truncate(output_len);
                tracing::debug!(
                    indicator = self.name,
                    appended,
                    error = %err,
                    "feed rolled back"
                );
                Err(err)
            }
        }
    }
}

impl<T, U, const N: usize> IndicatorCore<T, U, N> {
    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) const fn period(&self) -> usize {
        self.period.get()
    }

    pub(crate) const fn inputs(&self) -> &Inputs<T, N> {
        &self.inputs
    }

    pub(crate) const fn output(&self) -> &Series<U> {
        &self.output
    }

    pub(crate) const fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::all)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::Error;

    // Emits the first sample of each window, rejecting any window starting with a negative value
    #[derive(Default)]
    struct FirstOfWindow {
        calls: usize,
    }

    impl Compute<f64, f64, 1> for FirstOfWindow {
        fn compute(
            &mut self,
            inputs: &Inputs<f64, 1>,
            cursor: usize,
            period: usize,
            output: &mut Series<f64>,
        ) -> Result<usize> {
            self.calls += 1;
            let [input] = inputs.as_array();
            let mut start = cursor;
            while start + period <= input.len() {
                let first = input.as_slice()[start];
                if first < 0.0 {
                    return Err(Error::NumericOverflow { offset: start });
                }
                output.push(first);
                start += 1;
            }
            Ok(start - cursor)
        }
    }

    fn indicator(period: usize) -> IndicatorCore<f64, f64, 1> {
        let period = Period::new(period).unwrap();
        IndicatorCore::new("FirstOfWindow", period, ["input"])
    }

    #[test]
    fn test_feed_advances_cursor_by_emitted_windows() {
        let mut core = indicator(3);
        let mut kernel = FirstOfWindow::default();

        core.feed([[1.0], [2.0]], &mut kernel).unwrap();
        assert_eq!(core.cursor(), 0);
        assert!(core.output().is_empty());

        core.feed([[3.0], [4.0], [5.0]], &mut kernel).unwrap();
        assert_eq!(core.cursor(), 3);
        assert_eq!(core.output().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(kernel.calls, 2);
    }

    #[test]
    fn test_empty_feed_emits_nothing() {
        let mut core = indicator(1);
        let mut kernel = FirstOfWindow::default();
        core.feed([[1.0]], &mut kernel).unwrap();
        core.feed(Vec::<[f64; 1]>::new(), &mut kernel).unwrap();
        assert_eq!(core.output().len(), 1);
        assert_eq!(core.cursor(), 1);
        assert_eq!(kernel.calls, 2);
    }

    #[test]
    fn test_non_finite_row_rejected_before_append() {
        let mut core = indicator(1);
        let mut kernel = FirstOfWindow::default();
        let err = core.feed([[1.0], [f64::NAN]], &mut kernel).unwrap_err();

        assert_eq!(err, Error::NonFiniteSample { series: "input" });
        assert!(core.inputs().is_empty());
        assert_eq!(kernel.calls, 0);
    }

    #[test]
    fn test_failed_compute_rolls_back() {
        let mut core = indicator(1);
        let mut kernel = FirstOfWindow::default();
        core.feed([[1.0]], &mut kernel).unwrap();

        let err = core.feed([[2.0], [-1.0], [3.0]], &mut kernel).unwrap_err();
        assert_eq!(err, Error::NumericOverflow { offset: 2 });
        assert_eq!(core.inputs().len(), 1);
        assert_eq!(core.output().as_slice(), &[1.0]);
        assert_eq!(core.cursor(), 1);

        core.feed([[2.0]], &mut kernel).unwrap();
        assert_eq!(core.output().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_accessors() {
        let core = indicator(4);
        assert_eq!(core.name(), "FirstOfWindow");
        assert_eq!(core.period(), 4);
        assert_eq!(core.inputs().names(), &["input"]);
    }
}
