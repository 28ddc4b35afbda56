pub mod effort;
pub mod rules;
pub mod types;

pub use self::rules::RulePenalties;
pub use self::types::EffortBreakdown;

use self::effort::{
    base_key_effort, classify_bigram, row_change_penalty, same_finger_penalty, same_hand_penalty,
    trigram_penalty, BigramClass,
};
use crate::config::EffortWeights;
use crate::corpus::CorpusStats;
use crate::geometry::GeometryIndex;
use crate::layout::{PosMap, NOT_PLACED};

/// Evaluates layouts against one geometry, corpus, and frequency table.
///
/// Everything layout-independent is precomputed at construction: per-slot
/// base costs, the weighted slot-pair cost table, and the corpus n-gram
/// counts. An evaluation is then a handful of table walks over the pos-map,
/// which is the hottest path of the whole crate.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub key_count: usize,
    pub geometry: GeometryIndex,
    pub weights: EffortWeights,
    pub corpus: CorpusStats,
    pub char_freqs: [f32; 256],
    /// Characters with nonzero frequency, ascending; drives the static term
    /// and the hand-balance rule.
    pub active_chars: Vec<u8>,
    pub rules: Option<RulePenalties>,

    /// base_key_effort per slot.
    base_costs: Vec<f32>,
    /// Weighted dynamic cost for every ordered slot pair, n*n row-major.
    pair_costs: Vec<f32>,
}

impl Scorer {
    pub fn build(
        geometry: GeometryIndex,
        corpus: CorpusStats,
        char_freqs: [f32; 256],
        weights: EffortWeights,
    ) -> Self {
        let n = geometry.key_count();

        let base_costs: Vec<f32> = geometry.keys.iter().map(base_key_effort).collect();

        let mut pair_costs = vec![0.0f32; n * n];
        for (i, a) in geometry.keys.iter().enumerate() {
            for (j, b) in geometry.keys.iter().enumerate() {
                pair_costs[i * n + j] = match classify_bigram(i, j, a, b) {
                    BigramClass::SameFinger => weights.w_same_finger * same_finger_penalty(a, b),
                    BigramClass::SameHand => {
                        weights.w_same_hand * same_hand_penalty(a, b)
                            + weights.w_row_change * row_change_penalty(a, b)
                    }
                    BigramClass::Alternation => 0.0,
                };
            }
        }

        let active_chars: Vec<u8> =
            (0..=255u8).filter(|&c| char_freqs[c as usize] > 0.0).collect();

        Self {
            key_count: n,
            geometry,
            weights,
            corpus,
            char_freqs,
            active_chars,
            rules: None,
            base_costs,
            pair_costs,
        }
    }

    pub fn with_rules(mut self, rules: RulePenalties) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Raw effort: static term plus weighted dynamic terms, rules excluded.
    pub fn score(&self, pos_map: &PosMap) -> f32 {
        let n = self.key_count;
        let mut score = 0.0f32;

        for &c in &self.active_chars {
            let p = pos_map[c as usize];
            if p != NOT_PLACED {
                score += self.base_costs[p as usize] * self.char_freqs[c as usize];
            }
        }
        score *= self.weights.w_base * self.corpus.len;

        for e in &self.corpus.bigrams {
            let p1 = pos_map[e.a as usize] as usize;
            let p2 = pos_map[e.b as usize] as usize;
            score += self.pair_costs[p1 * n + p2] * e.count as f32;
        }

        for e in &self.corpus.trigrams {
            let k1 = &self.geometry.keys[pos_map[e.a as usize] as usize];
            let k2 = &self.geometry.keys[pos_map[e.b as usize] as usize];
            let k3 = &self.geometry.keys[pos_map[e.c as usize] as usize];
            if k1.hand == k2.hand && k2.hand == k3.hand {
                score += self.weights.w_trigram
                    * trigram_penalty(k1.finger, k2.finger, k3.finger)
                    * e.count as f32;
            }
        }

        score
    }

    /// Optimization objective: raw effort plus any configured rule penalties.
    pub fn fitness(&self, pos_map: &PosMap) -> f32 {
        let mut score = self.score(pos_map);
        if let Some(rules) = &self.rules {
            score += rules.evaluate(&self.geometry, pos_map, &self.char_freqs, &self.active_chars);
        }
        score
    }

    /// Itemized report: raw component sums, occurrence counts, and the
    /// weighted total. Not a hot path.
    pub fn score_breakdown(&self, pos_map: &PosMap) -> EffortBreakdown {
        let mut d = EffortBreakdown::default();

        for &c in &self.active_chars {
            let p = pos_map[c as usize];
            if p != NOT_PLACED {
                d.base_effort += self.base_costs[p as usize] * self.char_freqs[c as usize];
            }
        }
        d.base_effort *= self.corpus.len;

        for e in &self.corpus.bigrams {
            let p1 = pos_map[e.a as usize] as usize;
            let p2 = pos_map[e.b as usize] as usize;
            let a = &self.geometry.keys[p1];
            let b = &self.geometry.keys[p2];
            let count = e.count as u64;
            match classify_bigram(p1, p2, a, b) {
                BigramClass::SameFinger => {
                    d.same_finger_bigrams += count;
                    d.same_finger_effort += same_finger_penalty(a, b) * e.count as f32;
                }
                BigramClass::SameHand => {
                    d.same_hand_bigrams += count;
                    d.same_hand_effort += same_hand_penalty(a, b) * e.count as f32;
                    d.row_change_effort += row_change_penalty(a, b) * e.count as f32;
                }
                BigramClass::Alternation => {
                    d.hand_alternations += count;
                }
            }
        }

        for e in &self.corpus.trigrams {
            let k1 = &self.geometry.keys[pos_map[e.a as usize] as usize];
            let k2 = &self.geometry.keys[pos_map[e.b as usize] as usize];
            let k3 = &self.geometry.keys[pos_map[e.c as usize] as usize];
            if k1.hand == k2.hand && k2.hand == k3.hand {
                d.same_hand_trigrams += e.count as u64;
                d.trigram_effort +=
                    trigram_penalty(k1.finger, k2.finger, k3.finger) * e.count as f32;
            }
        }

        let w = &self.weights;
        d.total_effort = w.w_base * d.base_effort
            + w.w_same_finger * d.same_finger_effort
            + w.w_same_hand * d.same_hand_effort
            + w.w_row_change * d.row_change_effort
            + w.w_trigram * d.trigram_effort;

        d
    }
}
