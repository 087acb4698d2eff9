use core::num::NonZeroUsize;

use crate::{Error, Result};

/// Window size of an indicator, guaranteed positive.
///
/// Validation happens once, when the period is built, so an indicator holding
/// a `Period` never has to re-check it.
///
/// # Examples
///
/// ```
/// use ta_streaming::{Error, Period};
///
/// assert_eq!(Period::default().get(), 14);
/// assert_eq!(Period::new(5).map(Period::get), Ok(5));
/// assert_eq!(Period::new(0), Err(Error::InvalidConfiguration { period: 0 }));
/// assert_eq!(Period::try_from(-3_i64), Err(Error::InvalidConfiguration { period: -3 }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period(NonZeroUsize);

impl Period {
    /// Conventional lookback used when none is given
    pub const DEFAULT: Self = match NonZeroUsize::new(14) {
        Some(period) => Self(period),
        None => panic!("default period is non-zero"),
    };

    /// Creates a period of `period` samples.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if `period` is zero.
    pub fn new(period: usize) -> Result<Self> {
        NonZeroUsize::new(period)
            .map(Self)
            .ok_or(Error::InvalidConfiguration { period: 0 })
    }

    /// Returns the number of samples per window
    #[inline]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Period {
    type Error = Error;

    fn try_from(period: usize) -> Result<Self> {
        Self::new(period)
    }
}

impl TryFrom<i64> for Period {
    type Error = Error;

    fn try_from(period: i64) -> Result<Self> {
        usize::try_from(period)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(Error::InvalidConfiguration { period })
    }
}

impl From<Period> for usize {
    fn from(period: Period) -> Self {
        period.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_fourteen() {
        assert_eq!(Period::default().get(), 14);
        assert_eq!(Period::DEFAULT, Period::default());
    }

    #[test]
    fn test_positive_periods_accepted() {
        assert_eq!(Period::new(1).map(Period::get), Ok(1));
        assert_eq!(Period::try_from(30_usize).map(usize::from), Ok(30));
        assert_eq!(Period::try_from(7_i64).map(Period::get), Ok(7));
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(
            Period::new(0),
            Err(Error::InvalidConfiguration { period: 0 })
        );
        assert_eq!(
            Period::try_from(0_i64),
            Err(Error::InvalidConfiguration { period: 0 })
        );
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            Period::try_from(-1_i64),
            Err(Error::InvalidConfiguration { period: -1 })
        );
        assert_eq!(
            Period::try_from(i64::MIN),
            Err(Error::InvalidConfiguration { period: i64::MIN })
        );
    }
}
