//! Averaging and rendering configuration.
//!
//! [`ErpConfig`] holds every tunable parameter of the averager.  All fields
//! have defaults matching the recording protocol: a 200-sample baseline
//! before movement onset and 1000 samples after it.

use crate::error::ErpError;

/// Number of fingers, and therefore rows in every [`ErpMatrix`](crate::ErpMatrix).
pub const N_FINGERS: usize = 5;

/// Default number of samples kept before movement onset.
pub const DEFAULT_PRE_SAMPLES: usize = 200;

/// Default number of samples kept after movement onset.
pub const DEFAULT_POST_SAMPLES: usize = 1000;

/// What to do with a finger that has no trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyGroupPolicy {
    /// Fill the finger's row with `NaN` and report a trial count of zero.
    #[default]
    Nan,
    /// Abort the whole computation with [`ErpError::EmptyFinger`].
    Fail,
}

/// Configuration for [`compute_erp`](crate::compute_erp).
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use finger_erp::{EmptyGroupPolicy, ErpConfig};
///
/// let cfg = ErpConfig {
///     empty_group: EmptyGroupPolicy::Fail,
///     parallel: true,
///     ..ErpConfig::default()
/// };
/// assert_eq!(cfg.window_len(), 1201);
/// ```
#[derive(Debug, Clone)]
pub struct ErpConfig {
    /// Samples kept before `starting_point`.
    ///
    /// Default: `200`.
    pub pre_samples: usize,

    /// Samples kept after `starting_point`.  The onset sample itself is
    /// always included, so a window spans `pre + post + 1` samples.
    ///
    /// Default: `1000`.
    pub post_samples: usize,

    /// Behaviour for fingers without any trial.
    ///
    /// Default: [`EmptyGroupPolicy::Nan`].
    pub empty_group: EmptyGroupPolicy,

    /// Reduce the five finger groups on the rayon thread pool.
    ///
    /// The result is identical to the sequential path.
    ///
    /// Default: `false`.
    pub parallel: bool,
}

impl Default for ErpConfig {
    /// 200 samples pre-onset · 1000 samples post-onset · NaN for empty fingers.
    fn default() -> Self {
        Self {
            pre_samples: DEFAULT_PRE_SAMPLES,
            post_samples: DEFAULT_POST_SAMPLES,
            empty_group: EmptyGroupPolicy::default(),
            parallel: false,
        }
    }
}

impl ErpConfig {
    /// Number of samples per window, `pre_samples + post_samples + 1`.
    ///
    /// ```
    /// use finger_erp::ErpConfig;
    /// assert_eq!(ErpConfig::default().window_len(), 1201);
    /// ```
    pub fn window_len(&self) -> usize {
        self.pre_samples + self.post_samples + 1
    }

    /// Position of the onset sample inside a window.
    pub fn onset_index(&self) -> usize {
        self.pre_samples
    }

    /// Reject offsets that cannot address a signal held in memory.
    pub fn validate(&self) -> Result<(), ErpError> {
        if i64::try_from(self.pre_samples).is_err() || i64::try_from(self.post_samples).is_err() {
            return Err(ErpError::InvalidConfig {
                reason: format!(
                    "window offsets too large: pre={} post={}",
                    self.pre_samples, self.post_samples
                ),
            });
        }
        Ok(())
    }
}

/// Configuration for [`render_erp`](crate::plot::render_erp).
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Image width in pixels.  Default: `1024`.
    pub width: u32,
    /// Image height in pixels.  Default: `640`.
    pub height: u32,
    /// Chart caption.  Default: `"Mean ERP per Finger"`.
    pub title: String,
    /// Horizontal axis label.  Default: `"Time"`.
    pub x_label: String,
    /// Vertical axis label.  Default: `"Amplitude"`.
    pub y_label: String,
    /// Sampling rate in Hz.  When set, the time axis is drawn in
    /// milliseconds instead of samples relative to onset.
    ///
    /// Default: `None`.
    pub sfreq: Option<f64>,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 640,
            title: "Mean ERP per Finger".to_string(),
            x_label: "Time".to_string(),
            y_label: "Amplitude".to_string(),
            sfreq: None,
        }
    }
}
