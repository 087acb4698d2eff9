use thiserror::Error;

/// Errors raised by series containers and indicators.
///
/// Every failing operation returns one of these before mutating any state, so
/// a caller that observes an error can keep using the value it called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested window size is not positive.
    #[error("invalid configuration: period must be positive, got {period}")]
    InvalidConfiguration {
        /// The rejected period.
        period: i64,
    },

    /// A signed index fell outside `[0, len)` after normalization.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The index as supplied by the caller, before normalization.
        index: isize,
        /// Length of the collection at the time of the access.
        len: usize,
    },

    /// A NaN or infinite value was offered to an indicator.
    #[error("non-finite sample rejected for series `{series}`")]
    NonFiniteSample {
        /// Name of the input series the value was destined for.
        series: &'static str,
    },

    /// The running sum of a window left the representable range.
    #[error("numeric overflow in window starting at offset {offset}")]
    NumericOverflow {
        /// Start offset of the offending window.
        offset: usize,
    },
}

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = Error::InvalidConfiguration { period: -3 };
        assert_eq!(
            err.to_string(),
            "invalid configuration: period must be positive, got -3"
        );
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = Error::IndexOutOfBounds { index: -5, len: 4 };
        assert_eq!(err.to_string(), "index -5 out of bounds for length 4");
    }

    #[test]
    fn test_non_finite_sample_message() {
        let err = Error::NonFiniteSample { series: "close" };
        assert_eq!(
            err.to_string(),
            "non-finite sample rejected for series `close`"
        );
    }

    #[test]
    fn test_numeric_overflow_message() {
        let err = Error::NumericOverflow { offset: 7 };
        assert_eq!(
            err.to_string(),
            "numeric overflow in window starting at offset 7"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::IndexOutOfBounds { index: 1, len: 0 },
            Error::IndexOutOfBounds { index: 1, len: 0 }
        );
        assert_ne!(
            Error::IndexOutOfBounds { index: 1, len: 0 },
            Error::IndexOutOfBounds { index: 2, len: 0 }
        );
    }
}
