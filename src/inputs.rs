use num_traits::Float;

use crate::{Error, Result, Series};

/// A fixed set of `N` named input series that grow in lockstep.
///
/// Rows are appended to every series at once, so all series always have the
/// same length. Single-series indicators use `N = 1`; Williams %R uses
/// `high`, `low` and `close` with `N = 3`.
#[derive(Debug, Clone)]
pub struct Inputs<T, const N: usize> {
    names: [&'static str; N],
    series: [Series<T>; N],
}

impl<T: Default + Copy, const N: usize> Inputs<T, N> {
    pub(crate) fn new(names: [&'static str; N]) -> Self {
        Self {
            names,
            series: core::array::from_fn(|_| Series::new()),
        }
    }

    // Appends one value to each series
    pub(crate) fn push_row(&mut self, row: [T; N]) {
        for (series, value) in self.series.iter_mut().zip(row) {
            series.push(value);
        }
    }

    // Rolls every series back to `len` samples
    pub(crate) fn truncate(&mut self, len: usize) {
        for series in &mut self.series {
            series.truncate(len);
        }
    }

    /// Returns the values of every series at `index`, in declaration order.
    ///
    /// # Arguments
    ///
    /// * `index` - Signed sample position, negative counts from the newest sample
    ///
    /// # Returns
    ///
    /// * `Result<[T; N]>` - One value per series
    pub fn row(&self, index: isize) -> Result<[T; N]> {
        let i = match self.series.first() {
            Some(series) => series.normalize(index)?,
            None => return Err(Error::IndexOutOfBounds { index, len: 0 }),
        };
        Ok(core::array::from_fn(|s| self.series[s].as_slice()[i]))
    }
}

impl<T: Float, const N: usize> Inputs<T, N> {
    // Rejects a row holding NaN or an infinity, naming the offending series
    pub(crate) fn check_finite(&self, row: &[T; N]) -> Result<()> {
        match self.names.iter().zip(row).find(|(_, value)| !value.is_finite()) {
            Some((&series, _)) => Err(Error::NonFiniteSample { series }),
            None => Ok(()),
        }
    }
}

impl<T, const N: usize> Inputs<T, N> {
    /// Returns the number of samples held by each series
    pub fn len(&self) -> usize {
        self.series.first().map_or(0, Series::len)
    }

    /// Returns true if no sample has been appended yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the series names in declaration order
    pub const fn names(&self) -> &[&'static str; N] {
        &self.names
    }

    /// Looks a series up by name
    pub fn series(&self, name: &str) -> Option<&Series<T>> {
        self.names
            .iter()
            .position(|&n| n == name)
            .map(|i| &self.series[i])
    }

    /// Returns every series in declaration order
    pub const fn as_array(&self) -> &[Series<T>; N] {
        &self.series
    }

    /// Iterates over `(name, series)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Series<T>)> {
        self.names.iter().copied().zip(self.series.iter())
    }
}
