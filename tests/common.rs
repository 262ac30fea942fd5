/// Shared helpers for fixture loading and synthetic signals.
use finger_erp::{Finger, TrialRecord};
use std::path::{Path, PathBuf};

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

#[allow(unused)]
pub fn fixture(name: &str) -> PathBuf {
    let path = data_dir().join(name);
    assert!(path.exists(), "fixture not found: {}", path.display());
    path
}

#[allow(unused)]
/// Scratch file path unique to this test process.
pub fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("finger_erp_{}_{name}", std::process::id()))
}

#[allow(unused)]
pub fn finger(n: u8) -> Finger {
    Finger::new(n).unwrap()
}

#[allow(unused)]
/// `len` zeros with `value` written at each `(index, value)` pair.
pub fn spike_signal(len: usize, spikes: &[(usize, i64)]) -> Vec<i64> {
    let mut signal = vec![0_i64; len];
    for &(i, v) in spikes {
        signal[i] = v;
    }
    signal
}

#[allow(unused)]
/// Deterministic non-trivial signal.
pub fn wobble_signal(len: usize) -> Vec<i64> {
    (0..len as i64).map(|i| (i * 37 % 101) - 50 + (i / 13) % 5).collect()
}

#[allow(unused)]
/// Two trials per finger, spread over a 6000-sample signal.
pub fn two_per_finger() -> Vec<TrialRecord> {
    (0..10)
        .map(|i| TrialRecord::new(300 + 500 * i as i64, 400 + 500 * i as i64, finger((i % 5) as u8 + 1)))
        .collect()
}

#[allow(unused)]
/// Plain-slice reference mean for one finger with the default window.
pub fn reference_mean(trials: &[TrialRecord], signal: &[i64], f: Finger) -> Vec<f64> {
    let starts: Vec<usize> = trials
        .iter()
        .filter(|t| t.finger == f)
        .map(|t| t.starting_point as usize)
        .collect();
    (0..1201)
        .map(|t| {
            let sum: i64 = starts.iter().map(|&s| signal[s - 200 + t]).sum();
            sum as f64 / starts.len() as f64
        })
        .collect()
}
