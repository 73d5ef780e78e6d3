use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Unknown fps metric '{key}'. Use AVG or a fraction such as 0.01.")]
    UnknownMetric { key: String },
    #[error("Fps metric '{key}' must be a fraction in (0, 1), got {value}.")]
    FractionOutOfRange { key: String, value: f64 },
    #[error("Failed to spawn metrics worker: {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
    },
    #[error("Metrics worker is already running.")]
    AlreadyStarted,
    #[error("Metrics engine has been shut down.")]
    Terminated,
    #[error("Metrics worker did not finish a cycle within {waited_ms}ms.")]
    CycleTimeout { waited_ms: u64 },
    #[error("I/O error during {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
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
