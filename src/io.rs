//! CSV input and CSV/JSON output.
//!
//! Trial table: header row with `starting_point`, `peak_point`, `finger`
//! columns (any order, extras ignored).  Signal table: a header row followed
//! by integer samples, flattened row-major into one sequence.
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::erp::ErpMatrix;
use crate::trial::{Finger, TrialRecord};

const STARTING_POINT: &str = "starting_point";
const PEAK_POINT: &str = "peak_point";
const FINGER: &str = "finger";

// ── Value coercion ────────────────────────────────────────────────────────────

/// Parse a cell as an integer.  Integral floats (`"512.0"`, `"1e3"`) are
/// accepted; fractional, non-finite or empty cells are not.
pub fn parse_integer(cell: &str) -> Result<i64> {
    let cell = cell.trim();
    if cell.is_empty() {
        bail!("empty value");
    }
    if let Ok(v) = cell.parse::<i64>() {
        return Ok(v);
    }
    let v: f64 = cell
        .parse()
        .map_err(|_| anyhow!("not a number: {cell:?}"))?;
    if !v.is_finite() || v.fract() != 0.0 || v.abs() >= i64::MAX as f64 {
        bail!("not an integer: {cell:?}");
    }
    Ok(v as i64)
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .with_context(|| format!("missing '{name}' column"))
}

fn cell(record: &StringRecord, idx: usize, name: &str, row: usize) -> Result<i64> {
    let raw = record
        .get(idx)
        .ok_or_else(|| anyhow!("row {row}: missing '{name}' value"))?;
    parse_integer(raw).with_context(|| format!("row {row}, column '{name}'"))
}

// ── Trial table ───────────────────────────────────────────────────────────────

/// Load the trial table from a CSV file.
pub fn load_trials(path: &Path) -> Result<Vec<TrialRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_trials(file).with_context(|| format!("reading trials from {}", path.display()))
}

/// Parse a trial table from any reader.  Row numbers in errors are 1-based
/// and count data rows only.
pub fn read_trials<R: Read>(reader: R) -> Result<Vec<TrialRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().context("reading header row")?.clone();
    let i_start = column(&headers, STARTING_POINT)?;
    let i_peak = column(&headers, PEAK_POINT)?;
    let i_finger = column(&headers, FINGER)?;

    let mut trials = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.with_context(|| format!("row {row}: malformed record"))?;
        let starting_point = cell(&record, i_start, STARTING_POINT, row)?;
        let peak_point = cell(&record, i_peak, PEAK_POINT, row)?;
        let finger = Finger::try_from(cell(&record, i_finger, FINGER, row)?)
            .with_context(|| format!("row {row}, column '{FINGER}'"))?;
        trials.push(TrialRecord { starting_point, peak_point, finger });
    }
    debug!("loaded {} trials", trials.len());
    Ok(trials)
}

// ── Signal ────────────────────────────────────────────────────────────────────

/// Load the signal from a CSV file whose first row is a header.
pub fn load_signal(path: &Path) -> Result<Vec<i64>> {
    load_signal_with(path, true)
}

/// Load the signal, optionally treating the first row as data.
pub fn load_signal_with(path: &Path, has_headers: bool) -> Result<Vec<i64>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_signal(file, has_headers)
        .with_context(|| format!("reading signal from {}", path.display()))
}

/// Parse a signal table from any reader, flattening rows in order.
pub fn read_signal<R: Read>(reader: R, has_headers: bool) -> Result<Vec<i64>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.with_context(|| format!("row {row}: malformed record"))?;
        for (col, raw) in record.iter().enumerate() {
            let v = parse_integer(raw).with_context(|| format!("row {row}, column {}", col + 1))?;
            samples.push(v);
        }
    }
    debug!("loaded {} signal samples", samples.len());
    Ok(samples)
}

// ── ERP output ────────────────────────────────────────────────────────────────

/// Write the ERP matrix as CSV: `time,finger_1,…,finger_5`, one line per
/// sample offset.  Empty fingers are written as `NaN`.
pub fn write_erp_csv(erp: &ErpMatrix, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_erp_csv_to(erp, file)
}

pub fn write_erp_csv_to<W: Write>(erp: &ErpMatrix, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = vec!["time".to_string()];
    header.extend(Finger::ALL.iter().map(|f| format!("finger_{f}")));
    wtr.write_record(&header)?;

    let data = erp.data();
    for (t, time) in erp.time_axis().into_iter().enumerate() {
        let mut line = Vec::with_capacity(header.len());
        line.push(time.to_string());
        line.extend(data.column(t).iter().map(|v| v.to_string()));
        wtr.write_record(&line)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the ERP matrix as JSON.
///
/// ```text
/// { "pre": 200, "post": 1000, "trial_counts": [..5], "erp": [[..1201]; 5] }
/// ```
///
/// `NaN` samples become `null`.
pub fn write_erp_json(erp: &ErpMatrix, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_erp_json_to(erp, file)
}

pub fn write_erp_json_to<W: Write>(erp: &ErpMatrix, writer: W) -> Result<()> {
    let rows: Vec<Vec<serde_json::Value>> = erp
        .data()
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&v| serde_json::json!(v)).collect())
        .collect();
    let doc = serde_json::json!({
        "pre": erp.pre_samples(),
        "post": erp.post_samples(),
        "trial_counts": erp.trial_counts(),
        "erp": rows,
    });
    serde_json::to_writer(writer, &doc).context("serialising ERP matrix")?;
    Ok(())
}
