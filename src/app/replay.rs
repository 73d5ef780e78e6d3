use std::time::Duration;

use serde::Serialize;

use crate::args::{OutputFormat, PositiveU64, ReplayArgs};
use crate::error::{AppError, AppResult, MetricsError};
use crate::metrics::{FpsMetrics, MetricBoard, MetricReading};

use super::export;
use super::logs::{FrameRecord, read_frame_log};
use super::summary::{Report, SessionReport, print_report};

/// Upper bound on waiting for the worker to catch up with a trigger.
const CYCLE_WAIT: Duration = Duration::from_secs(10);
const CYCLE_POLL: Duration = Duration::from_millis(1);
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Metrics published at one point of log time.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySnapshot {
    pub log_time_ms: f64,
    pub cycles: u64,
    pub metrics: Vec<MetricReading>,
}

impl ReplaySnapshot {
    fn render_line(&self) -> String {
        let metrics: Vec<String> = self
            .metrics
            .iter()
            .map(|reading| format!("{} {:.2}", reading.display_label, reading.value))
            .collect();
        format!(
            "[{:>9.3}s] cycles={} {}",
            self.log_time_ms / 1000.0,
            self.cycles,
            metrics.join(" | ")
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub trigger_every: u64,
    pub triggers: u64,
    pub session: SessionReport,
    pub snapshots: Vec<ReplaySnapshot>,
}

impl Report for ReplayReport {
    fn render_text(&self) -> String {
        let mut lines = vec![format!(
            "Triggers: {} (every {} frames)",
            self.triggers, self.trigger_every
        )];
        lines.push(self.session.render_text());
        lines.join("\n")
    }
}

/// Options for driving a live engine from recorded frames.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ReplayPlan {
    pub(crate) trigger_every: PositiveU64,
    pub(crate) report_every_ms: Option<PositiveU64>,
}

impl From<&ReplayArgs> for ReplayPlan {
    fn from(args: &ReplayArgs) -> Self {
        Self {
            trigger_every: args.trigger_every,
            report_every_ms: args.report_every_ms,
        }
    }
}

/// Feeds `records` through a background engine the way a frame loop would,
/// calling `on_snapshot` at every report point.
///
/// # Errors
///
/// Returns an error when the worker cannot be started or stops keeping up
/// with triggers.
pub(crate) async fn replay_records<S, F>(
    records: &[FrameRecord],
    metrics: &[S],
    plan: ReplayPlan,
    mut on_snapshot: F,
) -> AppResult<ReplayReport>
where
    S: AsRef<str>,
    F: FnMut(&ReplaySnapshot),
{
    let engine = FpsMetrics::spawn(metrics)?;
    let trigger_every = plan.trigger_every.get();
    let report_every_ns = plan
        .report_every_ms
        .map(|every| every.get().saturating_mul(NANOS_PER_MILLI));
    let start_ns = records.first().map_or(0, |record| record.timestamp_ns);
    let mut next_report_ns = report_every_ns.map(|every| start_ns.saturating_add(every));
    let mut snapshots = Vec::new();
    let mut triggers: u64 = 0;
    let mut frames: u64 = 0;

    for record in records {
        engine.update(record.timestamp_ns, record.fps);
        frames = frames.saturating_add(1);
        if frames % trigger_every == 0 {
            engine.trigger();
            triggers = triggers.saturating_add(1);
        }

        if let (Some(every), Some(due)) = (report_every_ns, next_report_ns)
            && record.timestamp_ns >= due
        {
            let board = settle(&engine).await?;
            triggers = triggers.saturating_add(1);
            let snapshot = ReplaySnapshot {
                log_time_ms: record.timestamp_ns.saturating_sub(start_ns) as f64
                    / NANOS_PER_MILLI as f64,
                cycles: board.cycles,
                metrics: board.readings,
            };
            on_snapshot(&snapshot);
            snapshots.push(snapshot);
            next_report_ns = Some(next_due(due, every, record.timestamp_ns));
        }
    }

    let board = settle(&engine).await?;
    triggers = triggers.saturating_add(1);
    engine.shutdown();
    tracing::debug!(
        "Replayed {} frames with {} triggers in {} cycles",
        frames,
        triggers,
        board.cycles
    );

    Ok(ReplayReport {
        trigger_every,
        triggers,
        session: SessionReport::new(records, board),
        snapshots,
    })
}

/// First report point strictly after `now_ns`.
const fn next_due(due: u64, every: u64, now_ns: u64) -> u64 {
    let missed = now_ns.saturating_sub(due) / every;
    due.saturating_add(every.saturating_mul(missed.saturating_add(1)))
}

/// Triggers a cycle and waits until every request has been served, so the
/// returned board covers all samples appended so far.
async fn settle(engine: &FpsMetrics) -> AppResult<MetricBoard> {
    engine.trigger();
    let idle = async {
        while !engine.is_idle() {
            tokio::time::sleep(CYCLE_POLL).await;
        }
    };
    tokio::time::timeout(CYCLE_WAIT, idle)
        .await
        .map_err(|elapsed| {
            tracing::warn!("Metrics worker fell behind: {}", elapsed);
            AppError::metrics(MetricsError::CycleTimeout {
                waited_ms: u64::try_from(CYCLE_WAIT.as_millis()).unwrap_or(u64::MAX),
            })
        })?;
    Ok(engine.board())
}

pub(crate) async fn run_replay(
    args: &ReplayArgs,
    metrics: &[String],
    format: OutputFormat,
    output: Option<&str>,
) -> AppResult<()> {
    let records = read_frame_log(&args.log).await?;
    let report = replay_records(&records, metrics, ReplayPlan::from(args), |snapshot| {
        if format == OutputFormat::Text {
            println!("{}", snapshot.render_line());
        }
    })
    .await?;
    print_report(&report, format)?;
    if let Some(path) = output {
        export::export_json(path, "replay", &report).await?;
        tracing::info!("Wrote replay report to {}", path);
    }
    Ok(())
}

