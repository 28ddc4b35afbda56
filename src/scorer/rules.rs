use crate::config::RuleSet;
use crate::error::KvResult;
use crate::geometry::GeometryIndex;
use crate::layout::{PosMap, NOT_PLACED};

/// Parsed soft constraints. Each term is independently weighted and a zero
/// weight disables it entirely.
#[derive(Debug, Clone, Default)]
pub struct RulePenalties {
    pub hand_prefs: Vec<(u8, u8)>,
    pub hand_pref_weight: f32,
    pub row_prefs: Vec<(u8, i32)>,
    pub row_pref_weight: f32,
    pub balance_target: f32,
    pub balance_weight: f32,
}

impl RulePenalties {
    pub fn from_config(rules: &RuleSet) -> KvResult<Self> {
        Ok(Self {
            hand_prefs: rules.parsed_hand_prefs()?,
            hand_pref_weight: rules.hand_pref_weight,
            row_prefs: rules.parsed_row_prefs()?,
            row_pref_weight: rules.row_pref_weight,
            balance_target: rules.balance_target,
            balance_weight: rules.balance_weight,
        })
    }

    /// Total rule penalty for one layout.
    ///
    /// Hand preference adds the flat weight per character on the wrong hand;
    /// row preference scales with row distance; hand balance is quadratic in
    /// the deviation of the left-hand frequency share from the target.
    pub fn evaluate(
        &self,
        geometry: &GeometryIndex,
        pos_map: &PosMap,
        char_freqs: &[f32; 256],
        active_chars: &[u8],
    ) -> f32 {
        let mut penalty = 0.0;

        if self.hand_pref_weight > 0.0 {
            for &(c, target) in &self.hand_prefs {
                let p = pos_map[c as usize];
                if p != NOT_PLACED && geometry.keys[p as usize].hand != target {
                    penalty += self.hand_pref_weight;
                }
            }
        }

        if self.row_pref_weight > 0.0 {
            for &(c, target) in &self.row_prefs {
                let p = pos_map[c as usize];
                if p != NOT_PLACED {
                    let dist = (geometry.keys[p as usize].row - target).abs();
                    penalty += self.row_pref_weight * dist as f32;
                }
            }
        }

        if self.balance_weight > 0.0 {
            let mut left_load = 0.0;
            let mut total_load = 0.0;
            for &c in active_chars {
                let p = pos_map[c as usize];
                if p != NOT_PLACED {
                    let freq = char_freqs[c as usize];
                    total_load += freq;
                    if geometry.keys[p as usize].hand == 0 {
                        left_load += freq;
                    }
                }
            }
            if total_load > 0.0 {
                let imbalance = left_load / total_load - self.balance_target;
                penalty += self.balance_weight * imbalance * imbalance * 100.0;
            }
        }

        penalty
    }
}
