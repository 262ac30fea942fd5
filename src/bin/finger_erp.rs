use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use finger_erp::{
    compute_erp,
    io::{load_signal_with, load_trials, write_erp_csv, write_erp_json},
    plot::render_erp,
    EmptyGroupPolicy, ErpConfig, Finger, PlotConfig,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum EmptyFingers {
    /// Fill the finger's row with NaN
    Nan,
    /// Abort with an error
    Fail,
}

#[derive(Parser, Debug)]
#[command(name = "finger-erp", version, about = "Mean ERP per finger movement")]
struct Args {
    /// Trial table CSV (starting_point, peak_point, finger)
    #[arg(long)]
    trials: PathBuf,

    /// Signal CSV (integer samples, flattened row-major)
    #[arg(long)]
    signal: PathBuf,

    /// Treat the first row of the signal file as data instead of a header
    #[arg(long)]
    no_signal_header: bool,

    /// Write a PNG plot of the five mean waveforms
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Write the ERP matrix as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the ERP matrix as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Behaviour for fingers without trials
    #[arg(long, value_enum, default_value_t = EmptyFingers::Nan)]
    empty_fingers: EmptyFingers,

    /// Average the five finger groups in parallel
    #[arg(long)]
    parallel: bool,

    /// Sampling rate in Hz; labels the plot's time axis in milliseconds
    #[arg(long)]
    sfreq: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let trials = load_trials(&args.trials)?;
    let signal = load_signal_with(&args.signal, !args.no_signal_header)?;
    println!("Loaded {} trials, {} samples", trials.len(), signal.len());

    let cfg = ErpConfig {
        empty_group: match args.empty_fingers {
            EmptyFingers::Nan => EmptyGroupPolicy::Nan,
            EmptyFingers::Fail => EmptyGroupPolicy::Fail,
        },
        parallel: args.parallel,
        ..ErpConfig::default()
    };

    let erp = compute_erp(&trials, &signal, &cfg).context("computing mean ERP")?;
    for finger in Finger::ALL {
        let row = erp.row(finger);
        let n = erp.trial_count(finger);
        if n == 0 {
            println!("  finger {finger}: no trials");
        } else {
            let onset = row[cfg.onset_index()];
            println!("  finger {finger}: {n:>4} trials  onset amplitude {onset:.3}");
        }
    }

    if let Some(path) = &args.csv {
        write_erp_csv(&erp, path)?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        write_erp_json(&erp, path)?;
        info!("wrote {}", path.display());
    }
    if let Some(path) = &args.plot {
        let plot_cfg = PlotConfig { sfreq: args.sfreq, ..PlotConfig::default() };
        render_erp(&erp, path, &plot_cfg)?;
        println!("Plot written → {}", path.display());
    }

    Ok(())
}
