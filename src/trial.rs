//! Trial records and per-finger grouping.
use std::fmt;

use crate::config::N_FINGERS;
use crate::error::ErpError;

/// A finger identity, guaranteed to be in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Finger(u8);

impl Finger {
    /// All fingers in row order (thumb = 1 … little = 5).
    pub const ALL: [Finger; N_FINGERS] = [Finger(1), Finger(2), Finger(3), Finger(4), Finger(5)];

    pub fn new(value: u8) -> Result<Self, ErpError> {
        Self::try_from(i64::from(value))
    }

    /// 1-based finger number as it appears in the trial table.
    pub fn number(self) -> u8 {
        self.0
    }

    /// 0-based row in the output matrix.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<i64> for Finger {
    type Error = ErpError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if (1..=N_FINGERS as u8).contains(&v) => Ok(Finger(v)),
            _ => Err(ErpError::InvalidFinger { value }),
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One finger movement.
///
/// `peak_point` is loaded and carried along but the averager aligns on
/// `starting_point` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRecord {
    /// Sample index of movement onset.
    pub starting_point: i64,
    /// Sample index of peak flexion.
    pub peak_point: i64,
    pub finger: Finger,
}

impl TrialRecord {
    pub fn new(starting_point: i64, peak_point: i64, finger: Finger) -> Self {
        Self { starting_point, peak_point, finger }
    }
}

/// Trials of one finger, each paired with its position in the input slice.
pub type FingerGroup<'a> = Vec<(usize, &'a TrialRecord)>;

/// Partition `trials` by finger in a single pass.
///
/// Group `i` holds the trials of finger `i + 1` in input order.
pub fn group_by_finger(trials: &[TrialRecord]) -> [FingerGroup<'_>; N_FINGERS] {
    let mut groups: [FingerGroup<'_>; N_FINGERS] = Default::default();
    for (i, trial) in trials.iter().enumerate() {
        groups[trial.finger.index()].push((i, trial));
    }
    groups
}
