//! Failure kinds of the averager.
//!
//! Every variant aborts the whole call; no partial matrix is returned.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErpError {
    #[error("invalid finger {value}: expected 1..=5")]
    InvalidFinger { value: i64 },

    /// The window `[start, end]` of trial `trial` does not fit in the signal.
    /// `start` may be negative when the onset lies inside the baseline span.
    #[error(
        "trial {trial}: window out of bounds (starting_point={starting_point}, \
         window=[{start}, {end}], signal length={signal_len})"
    )]
    WindowOutOfBounds {
        trial: usize,
        starting_point: i64,
        start: i64,
        end: i64,
        signal_len: usize,
    },

    #[error("finger {finger} has no trials")]
    EmptyFinger { finger: u8 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_trial() {
        let e = ErpError::WindowOutOfBounds {
            trial: 3,
            starting_point: 500,
            start: 300,
            end: 1500,
            signal_len: 1000,
        };
        let msg = e.to_string();
        assert!(msg.starts_with("trial 3: window out of bounds"), "{msg}");
        assert!(msg.contains("signal length=1000"), "{msg}");
    }
}
