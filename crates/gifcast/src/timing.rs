//! Move-time scaling for animation frame delays.
//!
//! Raw per-move think times are compressed toward a fixed perceptual pace.
//! Fast time controls render close to real elapsed time; slower games are
//! scaled so their median move lands on [`TARGET_MEDIAN_TIME`], with no
//! frame lingering beyond [`TARGET_MAX_TIME`]. Near-instant moves
//! (pre-moves) keep reading as instant instead of being stretched.

use crate::types::Centis;

/// Delay the median move time is scaled toward.
pub const TARGET_MEDIAN_TIME: Centis = Centis(80);

/// Upper bound on any single frame delay.
pub const TARGET_MAX_TIME: Centis = Centis(200);

/// Scale raw move times into display delays.
///
/// Returns one delay per input, each in `[0, TARGET_MAX_TIME]`. When the
/// median move time is at or above [`TARGET_MEDIAN_TIME`], times are scaled
/// by `target / median`; moves played in less than half the median time are
/// only clamped to half the target so they stay visually fast. Below-target
/// medians (and games with no recorded times) pass through unscaled, capped
/// at the maximum.
pub fn scale_move_times(times: &[Centis]) -> Vec<Centis> {
    let floor = Centis(TARGET_MEDIAN_TIME.value() / 2);
    match upper_median(times) {
        Some(median) if median >= TARGET_MEDIAN_TIME => {
            let scale = TARGET_MEDIAN_TIME.value() as f64 / median.value().max(1) as f64;
            times
                .iter()
                .map(|&time| {
                    if u64::from(time.value()) * 2 < u64::from(median.value()) {
                        time.at_most(floor)
                    } else {
                        time.scale(scale).at_least(floor).at_most(TARGET_MAX_TIME)
                    }
                })
                .collect()
        }
        _ => times.iter().map(|&time| time.at_most(TARGET_MAX_TIME)).collect(),
    }
}

/// Upper median: the element at index `len / 2` of the sorted sequence.
/// `None` for an empty slice.
fn upper_median(times: &[Centis]) -> Option<Centis> {
    if times.is_empty() {
        return None;
    }
    let mut sorted = times.to_vec();
    sorted.sort_unstable();
    Some(sorted[sorted.len() / 2])
}
