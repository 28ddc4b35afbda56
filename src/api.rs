//! Boundary operations: typed inputs in, typed records out.
//!
//! All entry invariants are checked here and reported as `Config` errors
//! before any work happens; the core below this layer cannot fail.

use crate::config::{EffortWeights, GaParams, RuleSet};
use crate::corpus::CorpusStats;
use crate::error::{KeyvolveError, KvResult};
use crate::geometry::{GeometryIndex, KeyPositions};
use crate::layout::{alphabet_mask, build_pos_map, validate_layout};
use crate::optimizer::{NoProgress, Optimizer, ProgressCallback};
use crate::scorer::{EffortBreakdown, RulePenalties, Scorer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub layout: Vec<char>,
    pub effort: f32,
    pub history_best: Vec<f32>,
    pub history_mean: Vec<f32>,
    pub generations: usize,
    pub population_size: usize,
}

/// Effort of a single layout, rules excluded.
pub fn layout_effort(
    layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
    weights: &EffortWeights,
) -> KvResult<f32> {
    let (scorer, layout_bytes) =
        prepare_scorer(layout, positions, text_samples, char_freq, char_list, weights)?;
    Ok(scorer.score(&build_pos_map(&layout_bytes)))
}

/// Effort of a single layout including the configured soft-rule penalties.
pub fn layout_effort_with_rules(
    layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
    weights: &EffortWeights,
    rules: &RuleSet,
) -> KvResult<f32> {
    let (scorer, layout_bytes) =
        prepare_scorer(layout, positions, text_samples, char_freq, char_list, weights)?;
    let scorer = scorer.with_rules(RulePenalties::from_config(rules)?);
    Ok(scorer.fitness(&build_pos_map(&layout_bytes)))
}

/// Itemized effort report under default weights.
pub fn effort_breakdown(
    layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
) -> KvResult<EffortBreakdown> {
    let (scorer, layout_bytes) = prepare_scorer(
        layout,
        positions,
        text_samples,
        char_freq,
        char_list,
        &EffortWeights::default(),
    )?;
    Ok(scorer.score_breakdown(&build_pos_map(&layout_bytes)))
}

/// Search for a lower-effort permutation of the initial layout.
#[allow(clippy::too_many_arguments)]
pub fn optimize_keyboard_layout(
    initial_layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
    weights: &EffortWeights,
    rules: &RuleSet,
    params: &GaParams,
    seed: Option<u64>,
) -> KvResult<OptimizationReport> {
    optimize_with_progress(
        initial_layout,
        positions,
        text_samples,
        char_freq,
        char_list,
        weights,
        rules,
        params,
        seed,
        &NoProgress,
    )
}

/// Same as [`optimize_keyboard_layout`] with a progress callback, which is
/// consulted every 10 generations and may cancel the run.
#[allow(clippy::too_many_arguments)]
pub fn optimize_with_progress<CB: ProgressCallback>(
    initial_layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
    weights: &EffortWeights,
    rules: &RuleSet,
    params: &GaParams,
    seed: Option<u64>,
    callback: &CB,
) -> KvResult<OptimizationReport> {
    validate_ga_params(params)?;
    let (scorer, initial) = prepare_scorer(
        initial_layout,
        positions,
        text_samples,
        char_freq,
        char_list,
        weights,
    )?;
    let scorer = scorer.with_rules(RulePenalties::from_config(rules)?);

    let optimizer = Optimizer::new(Arc::new(scorer), *params);
    let result = optimizer.run(&initial, seed, callback);

    Ok(OptimizationReport {
        layout: result.layout.iter().map(|&c| c as char).collect(),
        effort: result.effort,
        history_best: result.history_best,
        history_mean: result.history_mean,
        generations: result.generations,
        population_size: result.population_size,
    })
}

/// Uniform random permutation of the given keys.
pub fn random_layout(keys: &[char], seed: Option<u64>) -> Vec<char> {
    let mut rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let mut shuffled = keys.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled
}

/// Shared assembly: validate every input, derive the geometry, count the
/// corpus, and build the scorer.
fn prepare_scorer(
    layout: &[char],
    positions: &KeyPositions,
    text_samples: &[String],
    char_freq: &[f32],
    char_list: &[char],
    weights: &EffortWeights,
) -> KvResult<(Scorer, Vec<u8>)> {
    let geometry = GeometryIndex::build(positions)?;
    let layout_bytes = chars_to_bytes(layout, "layout")?;
    validate_layout(&layout_bytes, geometry.key_count())?;
    let char_freqs = build_freq_table(char_list, char_freq)?;
    validate_weights(weights)?;

    let corpus = CorpusStats::build(text_samples, &alphabet_mask(&layout_bytes));
    Ok((
        Scorer::build(geometry, corpus, char_freqs, *weights),
        layout_bytes,
    ))
}

fn chars_to_bytes(chars: &[char], name: &str) -> KvResult<Vec<u8>> {
    chars
        .iter()
        .map(|&c| {
            if c.is_ascii() {
                Ok(c as u8)
            } else {
                Err(KeyvolveError::Config(format!(
                    "{}: character '{}' is not ASCII",
                    name, c
                )))
            }
        })
        .collect()
}

fn build_freq_table(char_list: &[char], char_freq: &[f32]) -> KvResult<[f32; 256]> {
    if char_list.len() != char_freq.len() {
        return Err(KeyvolveError::Config(format!(
            "char_list has {} entries but char_freq has {}",
            char_list.len(),
            char_freq.len()
        )));
    }
    let mut table = [0.0f32; 256];
    let mut seen = [false; 256];
    for (&c, &f) in char_list.iter().zip(char_freq) {
        if !c.is_ascii() {
            return Err(KeyvolveError::Config(format!(
                "char_list: character '{}' is not ASCII",
                c
            )));
        }
        if !f.is_finite() || f < 0.0 {
            return Err(KeyvolveError::Config(format!(
                "frequency for '{}' must be a nonnegative finite number, got {}",
                c, f
            )));
        }
        let idx = c.to_ascii_lowercase() as usize;
        if seen[idx] {
            return Err(KeyvolveError::Config(format!(
                "duplicated character '{}' in char_list",
                c
            )));
        }
        seen[idx] = true;
        table[idx] = f;
    }
    Ok(table)
}

fn validate_weights(weights: &EffortWeights) -> KvResult<()> {
    let all = [
        weights.w_base,
        weights.w_same_finger,
        weights.w_same_hand,
        weights.w_row_change,
        weights.w_trigram,
    ];
    if all.iter().any(|w| !w.is_finite()) {
        return Err(KeyvolveError::Config(
            "effort weights must be finite".to_string(),
        ));
    }
    Ok(())
}

fn validate_ga_params(params: &GaParams) -> KvResult<()> {
    if params.population_size < 1 {
        return Err(KeyvolveError::Config(
            "population_size must be at least 1".to_string(),
        ));
    }
    if params.elite_count > params.population_size {
        return Err(KeyvolveError::Config(format!(
            "elite_count {} exceeds population_size {}",
            params.elite_count, params.population_size
        )));
    }
    if params.tournament_size < 1 {
        return Err(KeyvolveError::Config(
            "tournament_size must be at least 1".to_string(),
        ));
    }
    for (name, rate) in [
        ("mutation_rate", params.mutation_rate),
        ("crossover_rate", params.crossover_rate),
    ] {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(KeyvolveError::Config(format!(
                "{} must be in [0, 1], got {}",
                name, rate
            )));
        }
    }
    Ok(())
}
