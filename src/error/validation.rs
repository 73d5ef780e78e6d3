use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Metric list must not be empty.")]
    EmptyMetricList,
    #[error("Frame log line {line}: expected 'timestamp_ns,fps[,frametime_ms]', got '{value}'.")]
    InvalidLogLine { line: usize, value: String },
    #[error("Frame log line {line}: timestamp {timestamp_ns} goes backwards (previous {previous_ns}).")]
    LogTimestampOrder {
        line: usize,
        timestamp_ns: u64,
        previous_ns: u64,
    },
    #[error("Frame log '{path}' contains no frames.")]
    EmptyLog { path: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
