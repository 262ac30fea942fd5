//! PNG rendering of the per-finger mean waveforms.
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::config::PlotConfig;
use crate::erp::ErpMatrix;
use crate::trial::Finger;

const FINGER_COLORS: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

/// One drawable curve.
#[derive(Debug, Clone)]
pub struct ErpSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
}

/// Curves for every finger with at least one trial.
///
/// The x coordinate is the offset from onset in samples, or in
/// milliseconds when `cfg.sfreq` is set.
pub fn erp_series(erp: &ErpMatrix, cfg: &PlotConfig) -> Vec<ErpSeries> {
    let scale = cfg.sfreq.map_or(1.0, |fs| 1000.0 / fs);
    let times: Vec<f64> = erp.time_axis().into_iter().map(|t| t as f64 * scale).collect();

    Finger::ALL
        .iter()
        .filter_map(|&finger| {
            let row = erp.finger_row(finger).ok()?;
            Some(ErpSeries {
                label: format!("Finger {finger}"),
                points: times.iter().copied().zip(row.iter().copied()).collect(),
                color: FINGER_COLORS[finger.index()],
            })
        })
        .collect()
}

/// Value range with 15% padding, or ±0.5 around a flat line.
pub fn padded_range(series: &[ErpSeries]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if lo > hi {
        return (-1.0, 1.0);
    }
    let span = hi - lo;
    let pad = if span < 1e-9 { 0.5 } else { span * 0.15 };
    (lo - pad, hi + pad)
}

/// Draw the ERP matrix to a PNG at `path`.
pub fn render_erp(erp: &ErpMatrix, path: &Path, cfg: &PlotConfig) -> Result<()> {
    let series = erp_series(erp, cfg);
    let scale = cfg.sfreq.map_or(1.0, |fs| 1000.0 / fs);
    let x_min = -(erp.pre_samples() as f64) * scale;
    let x_max = erp.post_samples() as f64 * scale;
    let (y_min, y_max) = padded_range(&series);

    let root = BitMapBackend::new(path, (cfg.width, cfg.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(&cfg.title, ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    let x_desc = match cfg.sfreq {
        Some(_) => format!("{} (ms)", cfg.x_label),
        None => cfg.x_label.clone(),
    };
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(cfg.y_label.as_str())
        .draw()?;

    for s in &series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_erp, ErpConfig, TrialRecord};

    #[test]
    fn padded_range_flat_line() {
        let s = ErpSeries { label: "x".into(), points: vec![(0.0, 2.0), (1.0, 2.0)], color: BLACK };
        assert_eq!(padded_range(&[s]), (1.5, 2.5));
        assert_eq!(padded_range(&[]), (-1.0, 1.0));
    }

    #[test]
    fn series_skip_empty_fingers() {
        let signal: Vec<i64> = (0..3000).collect();
        let trials = [TrialRecord::new(500, 0, Finger::new(3).unwrap())];
        let erp = compute_erp(&trials, &signal, &ErpConfig::default()).unwrap();

        let series = erp_series(&erp, &PlotConfig::default());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "Finger 3");
        assert_eq!(series[0].points.len(), 1201);
        assert_eq!(series[0].points[0], (-200.0, 300.0));

        let ms = erp_series(&erp, &PlotConfig { sfreq: Some(500.0), ..PlotConfig::default() });
        assert_eq!(ms[0].points[0].0, -400.0);
    }
}
