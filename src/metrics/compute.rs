use super::registry::{MetricKind, MetricRegistry};

/// Scale applied to per-sample periods before averaging.
const PERIOD_SCALE: f64 = 1000.0;
/// Relative distance under which `p * N` is treated as the integer it rounds to.
const RANK_TOLERANCE: f64 = 1e-9;

/// Recomputes every metric in `registry` from one window snapshot.
///
/// Entries whose key does not parse are removed for good. A low-percentile
/// entry whose index falls outside the snapshot keeps its previous value and
/// the remaining entries are still evaluated.
pub fn run_cycle(snapshot: &[f32], registry: &mut MetricRegistry) {
    let mut sorted = snapshot.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);
    let average = time_weighted_average(snapshot);

    registry.retain_mut(|spec| {
        let kind = match spec.resolve() {
            Ok(kind) => kind,
            Err(err) => {
                tracing::debug!("Dropping fps metric '{}': {}", spec.key(), err);
                return false;
            }
        };
        spec.display_label = kind.display_label();
        match kind {
            MetricKind::Average => {
                if let Some(average) = average {
                    spec.value = average;
                }
            }
            MetricKind::LowPercentile(fraction) => match low_percentile(&sorted, fraction) {
                Some(value) => spec.value = value,
                None => {
                    tracing::trace!(
                        "Skipping fps metric '{}': {} samples are too few",
                        spec.key(),
                        sorted.len()
                    );
                }
            },
        }
        true
    });
}

/// `1000 / mean(1000 / v)`: weights each sample by the time it covers.
#[must_use]
pub fn time_weighted_average(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let period_sum: f64 = values
        .iter()
        .map(|value| PERIOD_SCALE / f64::from(*value))
        .sum();
    let mean_period = period_sum / values.len() as f64;
    Some((PERIOD_SCALE / mean_period) as f32)
}

/// Element at `floor(fraction * N) - 1` of an ascending slice.
///
/// The subtraction wraps, so a product below one yields `None` rather than
/// the first element.
#[must_use]
pub fn low_percentile(sorted: &[f32], fraction: f64) -> Option<f32> {
    let index = percentile_index(sorted.len(), fraction)?;
    sorted.get(index).copied()
}

/// Zero-based index of the `fraction` low percentile in `len` sorted values.
///
/// `fraction * len` is floored after snapping float noise to the nearest
/// integer, so `0.29` of 100 values ranks 29 rather than 28.
#[must_use]
pub fn percentile_index(len: usize, fraction: f64) -> Option<usize> {
    let rank = rank_floor(fraction * len as f64) as u64;
    let index = rank.wrapping_sub(1);
    usize::try_from(index).ok().filter(|index| *index < len)
}

fn rank_floor(product: f64) -> f64 {
    let nearest = product.round();
    if (product - nearest).abs() <= RANK_TOLERANCE * nearest.abs().max(1.0) {
        nearest
    } else {
        product.floor()
    }
}
