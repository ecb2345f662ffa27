//! Tolerating partial failure across a batch of independent calls

use tracing::warn;

use crate::error::{LedgerError, LedgerResult};

pub const DEFAULT_MIN_SUCCESS_RATE: f64 = 0.5;

/// Successful values from a batch, plus how many calls failed
#[derive(Debug, Clone, PartialEq)]
pub struct PartialResults<T> {
    pub values: Vec<T>,
    pub failed: usize,
    /// The fallback was returned instead of the fetched values
    pub used_fallback: bool,
}

/// Keep the successes of a batch when enough of it succeeded
///
/// Below `min_success_rate` the `fallback` is returned if there is one,
/// otherwise `LedgerError::PartialFailure`. An empty batch counts as fully
/// successful.
pub fn handle_partial_failure<T>(
    results: Vec<LedgerResult<T>>,
    min_success_rate: f64,
    fallback: Option<Vec<T>>,
) -> LedgerResult<PartialResults<T>> {
    let total = results.len();
    let mut values = Vec::with_capacity(total);
    let mut failed = 0;

    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(e) => {
                warn!(error = %e, "batch request failed");
                failed += 1;
            }
        }
    }

    let success_rate = if total == 0 {
        1.0
    } else {
        values.len() as f64 / total as f64
    };

    if success_rate >= min_success_rate {
        return Ok(PartialResults {
            values,
            failed,
            used_fallback: false,
        });
    }

    match fallback {
        Some(values) => {
            warn!(failed, total, "too many batch requests failed, using fallback data");
            Ok(PartialResults {
                values,
                failed,
                used_fallback: true,
            })
        }
        None => Err(LedgerError::PartialFailure { failed, total }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net() -> LedgerError {
        LedgerError::Network("down".into())
    }

    #[test]
    fn test_keeps_successes_at_threshold() {
        let out = handle_partial_failure(vec![Ok(1), Err(net())], 0.5, None).unwrap();
        assert_eq!(out.values, vec![1]);
        assert_eq!(out.failed, 1);
        assert!(!out.used_fallback);
    }

    #[test]
    fn test_below_threshold_uses_fallback() {
        let out =
            handle_partial_failure(vec![Ok(1), Err(net()), Err(net())], 0.5, Some(vec![0])).unwrap();
        assert_eq!(out.values, vec![0]);
        assert_eq!(out.failed, 2);
        assert!(out.used_fallback);
    }

    #[test]
    fn test_below_threshold_without_fallback_errors() {
        let err = handle_partial_failure::<u8>(vec![Err(net())], 0.5, None).unwrap_err();
        assert!(matches!(err, LedgerError::PartialFailure { failed: 1, total: 1 }));
    }

    #[test]
    fn test_empty_batch() {
        let out = handle_partial_failure::<u8>(Vec::new(), DEFAULT_MIN_SUCCESS_RATE, None).unwrap();
        assert!(out.values.is_empty());
    }
}
