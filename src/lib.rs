//! # finger-erp: per-finger event-related potentials
//!
//! `finger-erp` computes the trial-averaged event-related potential (ERP)
//! evoked by each of five finger movements from a single continuous neural
//! channel.
//!
//! ## Pipeline overview
//!
//! ```text
//! trials.csv  (starting_point, peak_point, finger)     signal.csv (integer samples)
//!   │                                                       │
//!   ├─ io::load_trials()      typed TrialRecords            ├─ io::load_signal()   flattened Vec<i64>
//!   │                                                       │
//!   └────────────────────────────┬──────────────────────────┘
//!                                │
//!                                ├─ trial::group_by_finger()   one pass, order-preserving
//!                                ├─ window::extract_window()   [onset − 200, onset + 1000], bounds-checked
//!                                ├─ erp::compute_erp()         stack → mean over trials
//!                                │
//!                                └─→ ErpMatrix  [5, 1201] f64
//!                                      ├─ plot::render_erp()     PNG, one curve per finger
//!                                      └─ io::write_erp_csv() / write_erp_json()
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use finger_erp::{mean_erp_from_files, ErpConfig, Finger};
//! use std::path::Path;
//!
//! let erp = mean_erp_from_files(
//!     Path::new("data/fingers_trials.csv"),
//!     Path::new("data/ecog_signal.csv"),
//!     &ErpConfig::default(),
//! ).unwrap();
//!
//! for finger in Finger::ALL {
//!     println!("finger {finger}: {} trials", erp.trial_count(finger));
//! }
//! ```
//!
//! ## Running individual steps
//!
//! ```
//! use finger_erp::{compute_erp, ErpConfig, Finger, TrialRecord};
//!
//! let signal: Vec<i64> = (0..5000).collect();
//! let trials: Vec<TrialRecord> = Finger::ALL
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &f)| TrialRecord::new(500 + 600 * i as i64, 0, f))
//!     .collect();
//!
//! let erp = compute_erp(&trials, &signal, &ErpConfig::default()).unwrap();
//! assert_eq!(erp.shape(), (5, 1201));
//! ```

pub mod config;
pub mod erp;
pub mod error;
pub mod io;
pub mod plot;
pub mod trial;
pub mod window;

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// config
pub use config::{EmptyGroupPolicy, ErpConfig, PlotConfig, N_FINGERS};

// core
pub use erp::{compute_erp, ErpMatrix};
pub use error::ErpError;
pub use trial::{group_by_finger, Finger, TrialRecord};
pub use window::{check_windows, extract_window, window_bounds};

// io
pub use io::{load_signal, load_signal_with, load_trials, write_erp_csv, write_erp_json};

// plot
pub use plot::render_erp;

/// Load both tables and compute the mean ERP of every finger.
///
/// The signal file's first row is treated as a header.  Use
/// [`load_signal_with`] and [`compute_erp`] directly to change that.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, or if
/// [`compute_erp`] fails (out-of-bounds window, empty finger under
/// [`EmptyGroupPolicy::Fail`]).
pub fn mean_erp_from_files(
    trials_path: &Path,
    signal_path: &Path,
    cfg: &ErpConfig,
) -> Result<ErpMatrix> {
    let trials = io::load_trials(trials_path)?;
    let signal = io::load_signal(signal_path)?;
    info!("loaded {} trials and {} samples", trials.len(), signal.len());

    compute_erp(&trials, &signal, cfg).context("computing mean ERP")
}
