//! Frame sequence construction.
//!
//! Zips replayed board states with scaled move-time delays into the ordered
//! frame list sent to the renderer. A frame's delay is the time the frame
//! stays on screen before the next one is shown.

use serde::{Deserialize, Serialize};

use crate::replay::ReplayStep;
use crate::timing::scale_move_times;
use crate::types::Centis;

/// Fixed delay of the final frame, so the end position lingers regardless
/// of how fast the last move was played.
pub const LAST_FRAME_DELAY: Centis = Centis(500);

/// One rendered board state with its display timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub fen: String,
    /// UCI notation of the move that produced this frame. Never present on
    /// the initial frame, always present on every later one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<String>,
    /// Square of the checked king, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    /// Display delay in centiseconds. Omitted frames fall back to the
    /// request-level default delay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<Centis>,
}

/// Pair replay steps with scaled delays.
///
/// The scaled delay list is padded with `None` up to the step count and
/// zipped from the initial step, so the first computed delay attaches to
/// the initial frame. This alignment matches the renderer's visual
/// semantics and is deliberate. The final frame always gets
/// [`LAST_FRAME_DELAY`], and a length mismatch between steps and recorded
/// times is never fatal: missing delays stay unset.
pub fn build(steps: Vec<ReplayStep>, move_times: &[Centis]) -> Vec<Frame> {
    let delays = scale_move_times(move_times);
    let last = steps.len().saturating_sub(1);
    steps
        .into_iter()
        .enumerate()
        .map(|(i, step)| Frame {
            fen: step.fen,
            last_move: step.last_move,
            check: step.check,
            delay: if i == last {
                Some(LAST_FRAME_DELAY)
            } else {
                delays.get(i).copied()
            },
        })
        .collect()
}
