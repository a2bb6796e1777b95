//! Engagement scores.

use serde::{Deserialize, Serialize};

/// Days in the consistency window.
pub const CONSISTENCY_WINDOW_DAYS: f64 = 365.0;

/// Four 0-100 engagement metrics.
///
/// Every score is finite and clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementScores {
    /// `100 - double texts / messages * 100`
    pub reply_efficiency: f64,
    /// How evenly the first participant and the others start conversations.
    pub initiation_balance: f64,
    /// Share of a year with at least one message.
    pub conversation_consistency: f64,
    /// `double texts / messages * 100`
    pub double_text_ratio: f64,
}

/// Counters the scores are computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    pub total_messages: u64,
    pub total_double_texts: u64,
    /// Conversation starts of the first participant seen.
    pub first_participant_starts: u64,
    pub total_starts: u64,
    pub participant_count: usize,
    pub active_days: usize,
}

impl EngagementScores {
    pub fn compute(inputs: &ScoreInputs) -> Self {
        let double_text_pct = percent(inputs.total_double_texts, inputs.total_messages);

        let initiation_balance = if inputs.participant_count < 2 || inputs.total_starts == 0 {
            100.0
        } else {
            let share = percent(inputs.first_participant_starts, inputs.total_starts);
            100.0 - (50.0 - share).abs() * 2.0
        };

        Self {
            reply_efficiency: clamp_score(100.0 - double_text_pct),
            initiation_balance: clamp_score(initiation_balance),
            conversation_consistency: clamp_score(
                inputs.active_days as f64 / CONSISTENCY_WINDOW_DAYS * 100.0,
            ),
            double_text_ratio: clamp_score(double_text_pct),
        }
    }
}

impl Default for EngagementScores {
    fn default() -> Self {
        Self::compute(&ScoreInputs::default())
    }
}

/// `part / whole * 100`, zero when `whole` is zero.
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
