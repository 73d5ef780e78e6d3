use serde::Serialize;

use crate::args::{OutputFormat, SummarizeArgs};
use crate::error::AppResult;
use crate::metrics::{MetricBoard, MetricReading, StaticCalculator};

use super::export;
use super::logs::{FrameRecord, read_frame_log};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Whole-session figures plus the metrics computed over it.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub frames: usize,
    pub duration_ms: f64,
    pub min_fps: f64,
    pub max_fps: f64,
    pub avg_frametime_ms: Option<f64>,
    pub cycles: u64,
    pub metrics: Vec<MetricReading>,
}

impl SessionReport {
    pub(crate) fn new(records: &[FrameRecord], board: MetricBoard) -> Self {
        let duration_ns = records
            .first()
            .zip(records.last())
            .map_or(0, |(first, last)| {
                last.timestamp_ns.saturating_sub(first.timestamp_ns)
            });
        let (min_fps, max_fps) = records
            .iter()
            .map(|record| record.fps)
            .fold(None, |acc: Option<(f64, f64)>, fps| match acc {
                None => Some((fps, fps)),
                Some((min, max)) => Some((min.min(fps), max.max(fps))),
            })
            .unwrap_or((0.0, 0.0));

        let frametimes: Vec<f64> = records
            .iter()
            .filter_map(|record| record.frametime_ms)
            .collect();
        let avg_frametime_ms = if frametimes.is_empty() {
            None
        } else {
            Some(frametimes.iter().sum::<f64>() / frametimes.len() as f64)
        };

        Self {
            frames: records.len(),
            duration_ms: duration_ns as f64 / NANOS_PER_MILLI,
            min_fps,
            max_fps,
            avg_frametime_ms,
            cycles: board.cycles,
            metrics: board.readings,
        }
    }
}

/// Computes the summary of a finished session in one pass.
pub(crate) fn summarize_records<S: AsRef<str>>(
    records: &[FrameRecord],
    metrics: &[S],
) -> SessionReport {
    let values: Vec<f32> = records.iter().map(|record| record.fps as f32).collect();
    let calculator = StaticCalculator::new(metrics, &values);
    SessionReport::new(records, calculator.board().clone())
}

pub(crate) async fn run_summarize(
    args: &SummarizeArgs,
    metrics: &[String],
    format: OutputFormat,
    output: Option<&str>,
) -> AppResult<()> {
    let records = read_frame_log(&args.log).await?;
    let report = summarize_records(&records, metrics);
    print_report(&report, format)?;
    if let Some(path) = output {
        export::export_json(path, "summarize", &report).await?;
        tracing::info!("Wrote summary to {}", path);
    }
    Ok(())
}

/// A report that can be printed as text or JSON.
pub(crate) trait Report: Serialize {
    fn render_text(&self) -> String;
}

impl Report for SessionReport {
    fn render_text(&self) -> String {
        let mut lines = vec![
            format!("Frames: {}", self.frames),
            format!("Duration: {:.3}s", self.duration_ms / 1000.0),
            format!("Min/Max FPS: {:.2} / {:.2}", self.min_fps, self.max_fps),
        ];
        if let Some(frametime) = self.avg_frametime_ms {
            lines.push(format!("Avg Frametime: {:.2}ms", frametime));
        }
        lines.push(format!("Cycles: {}", self.cycles));
        lines.extend(metric_lines(&self.metrics));
        lines.join("\n")
    }
}

pub(crate) fn print_report<R: Report>(report: &R, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => println!("{}", report.render_text()),
    }
    Ok(())
}

/// One aligned `label  value` line per metric.
pub(crate) fn metric_lines(readings: &[MetricReading]) -> Vec<String> {
    let width = readings
        .iter()
        .map(|reading| reading.display_label.len())
        .max()
        .unwrap_or(0);
    readings
        .iter()
        .map(|reading| {
            format!(
                "{:<width$}  {:.2}",
                reading.display_label,
                reading.value,
                width = width
            )
        })
        .collect()
}
