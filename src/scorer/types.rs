use serde::{Deserialize, Serialize};

/// Itemized effort report for one layout.
///
/// The component sums are raw (unweighted); `total_effort` applies the model
/// weights. Counts are corpus occurrences, not frequency-weighted. Rule
/// penalties are not part of the breakdown.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EffortBreakdown {
    pub base_effort: f32,
    pub same_finger_effort: f32,
    pub same_hand_effort: f32,
    pub row_change_effort: f32,
    pub trigram_effort: f32,
    pub total_effort: f32,

    pub same_finger_bigrams: u64,
    pub same_hand_bigrams: u64,
    pub hand_alternations: u64,
    pub same_hand_trigrams: u64,
}
