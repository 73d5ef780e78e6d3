use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{AppError, AppResult, MetricsError, ValidationError};

/// One row of a frame log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRecord {
    pub timestamp_ns: u64,
    pub fps: f64,
    pub frametime_ms: Option<f64>,
}

/// Parses one frame log line.
///
/// Returns `Ok(None)` for blank lines and `#` comments. `line_no` is
/// 1-based and only used for error reporting.
///
/// # Errors
///
/// Returns an error when the row is not `timestamp_ns,fps[,frametime_ms]`.
pub fn parse_frame_line(line: &str, line_no: usize) -> Result<Option<FrameRecord>, ValidationError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let invalid = || ValidationError::InvalidLogLine {
        line: line_no,
        value: trimmed.to_owned(),
    };

    let mut parts = trimmed.split(',').map(str::trim);
    let timestamp_ns = parts
        .next()
        .and_then(|value| value.parse::<u64>().ok())
        .ok_or_else(invalid)?;
    let fps = parts
        .next()
        .and_then(parse_finite)
        .ok_or_else(invalid)?;
    let frametime_ms = match parts.next() {
        None | Some("") => None,
        Some(value) => Some(parse_finite(value).ok_or_else(invalid)?),
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Some(FrameRecord {
        timestamp_ns,
        fps,
        frametime_ms,
    }))
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// A header is only accepted as the first content line.
fn is_header(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|first| !first.is_ascii_digit() && first != '#')
}

/// Reads a whole frame log, checking that timestamps never go backwards.
///
/// # Errors
///
/// Returns an error when the file cannot be read, a row is malformed, the
/// timestamps are out of order, or the log holds no frames.
pub async fn read_frame_log(path: &str) -> AppResult<Vec<FrameRecord>> {
    let file = tokio::fs::File::open(path).await.map_err(|err| {
        AppError::metrics(MetricsError::Io {
            context: "open frame log",
            source: err,
        })
    })?;
    let mut lines = BufReader::new(file).lines();
    let mut records: Vec<FrameRecord> = Vec::new();
    let mut line_no: usize = 0;
    let mut seen_content = false;

    while let Some(line) = lines.next_line().await.map_err(|err| {
        AppError::metrics(MetricsError::Io {
            context: "read frame log",
            source: err,
        })
    })? {
        line_no = line_no.saturating_add(1);
        if !seen_content && is_header(&line) {
            seen_content = true;
            continue;
        }
        let Some(record) = parse_frame_line(&line, line_no)? else {
            continue;
        };
        seen_content = true;
        if let Some(previous) = records.last()
            && record.timestamp_ns < previous.timestamp_ns
        {
            return Err(AppError::validation(ValidationError::LogTimestampOrder {
                line: line_no,
                timestamp_ns: record.timestamp_ns,
                previous_ns: previous.timestamp_ns,
            }));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(AppError::validation(ValidationError::EmptyLog {
            path: path.to_owned(),
        }));
    }
    tracing::debug!("Read {} frames from {}", records.len(), path);
    Ok(records)
}
