//! Onset-aligned window extraction.
//!
//! A window covers `[starting_point - pre, starting_point + post]`
//! (inclusive) of the continuous signal.  Windows that do not fit are an
//! error, never padded or truncated.
use std::ops::RangeInclusive;

use ndarray::{s, ArrayView1};

use crate::config::ErpConfig;
use crate::error::ErpError;
use crate::trial::TrialRecord;

/// Signal indices covered by the window around `starting_point`, or `None`
/// when any part of it falls outside `0..signal_len`.
pub fn window_bounds(
    starting_point: i64,
    signal_len: usize,
    cfg: &ErpConfig,
) -> Option<RangeInclusive<usize>> {
    let start = starting_point.checked_sub(i64::try_from(cfg.pre_samples).ok()?)?;
    let end = starting_point.checked_add(i64::try_from(cfg.post_samples).ok()?)?;
    let start = usize::try_from(start).ok()?;
    let end = usize::try_from(end).ok()?;
    (end < signal_len).then_some(start..=end)
}

fn out_of_bounds(
    trial_index: usize,
    trial: &TrialRecord,
    signal_len: usize,
    cfg: &ErpConfig,
) -> ErpError {
    let pre = i64::try_from(cfg.pre_samples).unwrap_or(i64::MAX);
    let post = i64::try_from(cfg.post_samples).unwrap_or(i64::MAX);
    ErpError::WindowOutOfBounds {
        trial: trial_index,
        starting_point: trial.starting_point,
        start: trial.starting_point.saturating_sub(pre),
        end: trial.starting_point.saturating_add(post),
        signal_len,
    }
}

/// Borrow the window of `trial` from `signal`.
///
/// `trial_index` is the trial's position in the caller's trial list and is
/// only used to label the error.
pub fn extract_window<'a>(
    signal: ArrayView1<'a, i64>,
    trial_index: usize,
    trial: &TrialRecord,
    cfg: &ErpConfig,
) -> Result<ArrayView1<'a, i64>, ErpError> {
    let range = window_bounds(trial.starting_point, signal.len(), cfg)
        .ok_or_else(|| out_of_bounds(trial_index, trial, signal.len(), cfg))?;
    Ok(signal.slice_move(s![range]))
}

/// Fail on the first trial, in input order, whose window does not fit.
pub fn check_windows(
    trials: &[TrialRecord],
    signal_len: usize,
    cfg: &ErpConfig,
) -> Result<(), ErpError> {
    for (i, trial) in trials.iter().enumerate() {
        if window_bounds(trial.starting_point, signal_len, cfg).is_none() {
            return Err(out_of_bounds(i, trial, signal_len, cfg));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::Finger;
    use ndarray::Array1;

    fn trial(start: i64) -> TrialRecord {
        TrialRecord::new(start, start + 50, Finger::new(1).unwrap())
    }

    #[test]
    fn bounds_at_edges() {
        let cfg = ErpConfig::default();
        assert_eq!(window_bounds(200, 1201, &cfg), Some(0..=1200));
        assert_eq!(window_bounds(199, 1201, &cfg), None);
        assert_eq!(window_bounds(201, 1201, &cfg), None);
        assert_eq!(window_bounds(-5, 10_000, &cfg), None);
        assert_eq!(window_bounds(i64::MAX, 10_000, &cfg), None);
    }

    #[test]
    fn window_contents_follow_onset() {
        let signal = Array1::from_iter(0..3000_i64);
        let cfg = ErpConfig::default();
        let w = extract_window(signal.view(), 0, &trial(500), &cfg).unwrap();
        assert_eq!(w.len(), 1201);
        assert_eq!(w[0], 300);
        assert_eq!(w[200], 500);
        assert_eq!(w[1200], 1500);
    }

    #[test]
    fn short_signal_is_an_error() {
        let signal = Array1::from_iter(0..1000_i64);
        let cfg = ErpConfig::default();
        let err = extract_window(signal.view(), 7, &trial(500), &cfg).unwrap_err();
        assert_eq!(
            err,
            ErpError::WindowOutOfBounds {
                trial: 7,
                starting_point: 500,
                start: 300,
                end: 1500,
                signal_len: 1000,
            }
        );
    }

    #[test]
    fn first_bad_trial_in_input_order() {
        let trials = [
            TrialRecord::new(50, 0, Finger::new(2).unwrap()),
            TrialRecord::new(60, 0, Finger::new(1).unwrap()),
        ];
        match check_windows(&trials, 3000, &ErpConfig::default()) {
            Err(ErpError::WindowOutOfBounds { trial, starting_point, .. }) => {
                assert_eq!(trial, 0);
                assert_eq!(starting_point, 50);
            }
            other => panic!("expected out-of-bounds, got {other:?}"),
        }
        assert!(check_windows(&trials[..0], 3000, &ErpConfig::default()).is_ok());
    }

    #[test]
    fn oversized_offsets_saturate_in_error() {
        let signal = Array1::from_iter(0..3000_i64);
        let cfg = ErpConfig {
            pre_samples: usize::MAX,
            post_samples: usize::MAX,
            ..ErpConfig::default()
        };
        match extract_window(signal.view(), 0, &trial(500), &cfg) {
            Err(ErpError::WindowOutOfBounds { start, end, .. }) => {
                assert_eq!(start, 500_i64.saturating_sub(i64::MAX));
                assert_eq!(end, i64::MAX);
            }
            other => panic!("expected out-of-bounds, got {other:?}"),
        }
    }

    #[test]
    fn negative_start_reported() {
        let signal = Array1::from_iter(0..3000_i64);
        let cfg = ErpConfig::default();
        match extract_window(signal.view(), 0, &trial(50), &cfg) {
            Err(ErpError::WindowOutOfBounds { start, .. }) => assert_eq!(start, -150),
            other => panic!("expected out-of-bounds, got {other:?}"),
        }
    }
}
