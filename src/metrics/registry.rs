use std::str::FromStr;

use crate::error::MetricsError;

use super::types::{MetricBoard, MetricReading};

/// Identifier selecting the time-weighted average.
pub const AVERAGE_KEY: &str = "AVG";

/// Labels within this distance of a whole percent render without decimals.
const WHOLE_PERCENT_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MetricKind {
    Average,
    /// Fraction in the open interval (0, 1).
    LowPercentile(f64),
}

impl MetricKind {
    #[must_use]
    pub fn display_label(self) -> String {
        match self {
            MetricKind::Average => AVERAGE_KEY.to_owned(),
            MetricKind::LowPercentile(fraction) => percentile_label(fraction),
        }
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        if key == AVERAGE_KEY {
            return Ok(MetricKind::Average);
        }
        let fraction: f64 = key
            .parse()
            .map_err(|_parse_err| MetricsError::UnknownMetric {
                key: key.to_owned(),
            })?;
        if fraction.is_nan() || fraction <= 0.0 || fraction >= 1.0 {
            return Err(MetricsError::FractionOutOfRange {
                key: key.to_owned(),
                value: fraction,
            });
        }
        Ok(MetricKind::LowPercentile(fraction))
    }
}

/// Renders `0.01` as `1%` and `0.001` as `0.1%`.
#[must_use]
pub fn percentile_label(fraction: f64) -> String {
    let percent = fraction * 100.0;
    if (percent - percent.round()).abs() < WHOLE_PERCENT_TOLERANCE {
        format!("{:.0}%", percent)
    } else {
        format!("{:.1}%", percent)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetricSpec {
    key: String,
    kind: Option<MetricKind>,
    pub(crate) display_label: String,
    pub(crate) value: f32,
}

impl MetricSpec {
    fn new(identifier: &str) -> Self {
        let key = identifier.trim().to_uppercase();
        Self {
            display_label: key.clone(),
            key,
            kind: None,
            value: 0.0,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parsed kind, `None` until the first cycle evaluates this entry.
    #[must_use]
    pub const fn kind(&self) -> Option<MetricKind> {
        self.kind
    }

    #[must_use]
    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Parses the key on first use and caches the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is neither `AVG` nor a fraction in (0, 1).
    pub(crate) fn resolve(&mut self) -> Result<MetricKind, MetricsError> {
        if let Some(kind) = self.kind {
            return Ok(kind);
        }
        let kind = self.key.parse::<MetricKind>()?;
        self.kind = Some(kind);
        Ok(kind)
    }
}

/// Ordered set of requested metrics. Entries only ever disappear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricRegistry {
    specs: Vec<MetricSpec>,
}

impl MetricRegistry {
    /// Normalizes identifiers without validating them.
    pub fn parse<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let specs = identifiers
            .into_iter()
            .map(|identifier| MetricSpec::new(identifier.as_ref()))
            .collect();
        Self { specs }
    }

    #[must_use]
    pub fn specs(&self) -> &[MetricSpec] {
        &self.specs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub(crate) fn retain_mut<F>(&mut self, keep: F)
    where
        F: FnMut(&mut MetricSpec) -> bool,
    {
        self.specs.retain_mut(keep);
    }

    #[must_use]
    pub fn readings(&self) -> Vec<MetricReading> {
        self.specs
            .iter()
            .map(|spec| MetricReading {
                key: spec.key.clone(),
                display_label: spec.display_label.clone(),
                value: spec.value,
            })
            .collect()
    }

    #[must_use]
    pub fn board(&self, cycles: u64) -> MetricBoard {
        MetricBoard {
            readings: self.readings(),
            cycles,
        }
    }
}
