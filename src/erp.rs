//! Trial-averaged event-related potentials.
//!
//! For each finger the onset-aligned windows of all its trials are stacked
//! into an `[n_trials, window_len]` array and averaged over the trial axis:
//!
//! `erp[f, t] = mean_k signal[starting_point_k - pre + t]`
//!
//! Sample positions are independent; nothing is filtered or smoothed.
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;

use crate::config::{EmptyGroupPolicy, ErpConfig, N_FINGERS};
use crate::error::ErpError;
use crate::trial::{group_by_finger, Finger, FingerGroup, TrialRecord};
use crate::window::{check_windows, extract_window};

/// Mean waveform per finger, shape `[5, window_len]`.
///
/// Row `i` belongs to finger `i + 1`.  A finger without trials has a row of
/// `NaN` and a trial count of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ErpMatrix {
    data: Array2<f64>,
    trial_counts: [usize; N_FINGERS],
    pre_samples: usize,
    post_samples: usize,
}

impl ErpMatrix {
    /// `[5, window_len]` mean matrix.
    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Row of `finger`, `NaN`-filled if it had no trials.
    pub fn row(&self, finger: Finger) -> ArrayView1<'_, f64> {
        self.data.row(finger.index())
    }

    /// Row of `finger`, or [`ErpError::EmptyFinger`] if it had no trials.
    pub fn finger_row(&self, finger: Finger) -> Result<ArrayView1<'_, f64>, ErpError> {
        if self.trial_count(finger) == 0 {
            return Err(ErpError::EmptyFinger { finger: finger.number() });
        }
        Ok(self.row(finger))
    }

    pub fn trial_count(&self, finger: Finger) -> usize {
        self.trial_counts[finger.index()]
    }

    pub fn trial_counts(&self) -> [usize; N_FINGERS] {
        self.trial_counts
    }

    pub fn pre_samples(&self) -> usize {
        self.pre_samples
    }

    pub fn post_samples(&self) -> usize {
        self.post_samples
    }

    /// Sample offsets relative to onset, `-pre ..= post`, one per column.
    pub fn time_axis(&self) -> Vec<i64> {
        let pre = self.pre_samples as i64;
        let post = self.post_samples as i64;
        (-pre..=post).collect()
    }
}

/// Compute the mean ERP of every finger.
///
/// # Errors
///
/// * [`ErpError::WindowOutOfBounds`] if any trial's window does not fit in
///   `signal`; the error names the first such trial's position in `trials`.
/// * [`ErpError::EmptyFinger`] if a finger has no trials and
///   `cfg.empty_group` is [`EmptyGroupPolicy::Fail`].
/// * [`ErpError::InvalidConfig`] if the window offsets are unusable.
///
/// # Examples
///
/// ```
/// use finger_erp::{compute_erp, ErpConfig, Finger, TrialRecord};
///
/// let mut signal = vec![0_i64; 3000];
/// signal[500] = 10;
/// signal[1000] = 20;
/// let finger = Finger::new(1).unwrap();
/// let trials = [
///     TrialRecord::new(500, 600, finger),
///     TrialRecord::new(1000, 1100, finger),
/// ];
///
/// let erp = compute_erp(&trials, &signal, &ErpConfig::default()).unwrap();
/// assert_eq!(erp.shape(), (5, 1201));
/// assert_eq!(erp.row(finger)[200], 15.0);
/// ```
pub fn compute_erp(
    trials: &[TrialRecord],
    signal: &[i64],
    cfg: &ErpConfig,
) -> Result<ErpMatrix, ErpError> {
    cfg.validate()?;
    check_windows(trials, signal.len(), cfg)?;
    let signal = ArrayView1::from(signal);
    let groups = group_by_finger(trials);
    debug!(
        "averaging {} trials over {} samples, window {} samples",
        trials.len(),
        signal.len(),
        cfg.window_len()
    );

    let rows: Vec<Array1<f64>> = if cfg.parallel {
        Finger::ALL
            .into_par_iter()
            .map(|finger| finger_mean(finger, &groups[finger.index()], signal, cfg))
            .collect::<Result<_, _>>()?
    } else {
        Finger::ALL
            .iter()
            .map(|&finger| finger_mean(finger, &groups[finger.index()], signal, cfg))
            .collect::<Result<_, _>>()?
    };

    let mut data = Array2::<f64>::zeros((N_FINGERS, cfg.window_len()));
    for (mut out, row) in data.rows_mut().into_iter().zip(&rows) {
        out.assign(row);
    }

    let mut trial_counts = [0; N_FINGERS];
    for (count, group) in trial_counts.iter_mut().zip(&groups) {
        *count = group.len();
    }

    Ok(ErpMatrix {
        data,
        trial_counts,
        pre_samples: cfg.pre_samples,
        post_samples: cfg.post_samples,
    })
}

/// Mean window of one finger's trials.
fn finger_mean(
    finger: Finger,
    group: &FingerGroup<'_>,
    signal: ArrayView1<'_, i64>,
    cfg: &ErpConfig,
) -> Result<Array1<f64>, ErpError> {
    let n_t = cfg.window_len();
    let mut stacked = Array2::<f64>::zeros((group.len(), n_t));
    for (mut row, &(trial_index, trial)) in stacked.rows_mut().into_iter().zip(group) {
        let window = extract_window(signal, trial_index, trial, cfg)?;
        row.assign(&window.mapv(|v| v as f64));
    }
    debug!("finger {finger}: stacked {} windows", group.len());

    match stacked.mean_axis(Axis(0)) {
        Some(mean) => Ok(mean),
        None => match cfg.empty_group {
            EmptyGroupPolicy::Nan => {
                warn!("finger {finger} has no trials; its ERP row is NaN");
                Ok(Array1::from_elem(n_t, f64::NAN))
            }
            EmptyGroupPolicy::Fail => Err(ErpError::EmptyFinger { finger: finger.number() }),
        },
    }
}
