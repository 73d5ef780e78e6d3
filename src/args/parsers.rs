use super::types::PositiveU64;
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_u64(s: &str) -> AppResult<PositiveU64> {
    s.parse::<PositiveU64>().map_err(AppError::from)
}

/// Trims metric identifiers and drops blank entries, rejecting an empty list.
///
/// Entries are not validated here; unknown metrics are dropped by the
/// engine on its first cycle.
pub(crate) fn normalize_metric_list<I, S>(entries: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let metrics: Vec<String> = entries
        .into_iter()
        .map(|entry| entry.as_ref().trim().to_owned())
        .filter(|entry| !entry.is_empty())
        .collect();
    if metrics.is_empty() {
        return Err(ValidationError::EmptyMetricList);
    }
    Ok(metrics)
}
