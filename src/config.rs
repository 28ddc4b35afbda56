use crate::error::{KeyvolveError, KvResult};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Weights for the five terms of the effort model.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortWeights {
    #[arg(long, default_value_t = 1.0)]
    pub w_base: f32,
    #[arg(long, default_value_t = 3.0)]
    pub w_same_finger: f32,
    #[arg(long, default_value_t = 1.0)]
    pub w_same_hand: f32,
    #[arg(long, default_value_t = 0.5)]
    pub w_row_change: f32,
    #[arg(long, default_value_t = 0.3)]
    pub w_trigram: f32,
}

impl Default for EffortWeights {
    fn default() -> Self {
        Self {
            w_base: 1.0,
            w_same_finger: 3.0,
            w_same_hand: 1.0,
            w_row_change: 0.5,
            w_trigram: 0.3,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverOp {
    /// Order crossover: keep a slice of parent 1, fill the rest in parent 2's cyclic order.
    Order,
    /// Partially-mapped crossover: keep a slice of parent 1, resolve conflicts via the slice mapping.
    Pmx,
}

/// Search parameters for the evolutionary loop.
#[derive(Args, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GaParams {
    #[arg(long, default_value_t = 100, help = "Number of layouts per generation")]
    pub population_size: usize,

    #[arg(long, default_value_t = 500, help = "Generations to run")]
    pub generations: usize,

    #[arg(long, default_value_t = 0.1, help = "Swap mutation probability per child")]
    pub mutation_rate: f32,

    #[arg(long, default_value_t = 0.8, help = "Probability a child is bred rather than cloned")]
    pub crossover_rate: f32,

    #[arg(long, default_value_t = 5, help = "Tournament sample size")]
    pub tournament_size: usize,

    #[arg(long, default_value_t = 2, help = "Individuals surviving unchanged")]
    pub elite_count: usize,

    #[arg(long, value_enum, default_value = "order")]
    pub crossover_op: CrossoverOp,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.1,
            crossover_rate: 0.8,
            tournament_size: 5,
            elite_count: 2,
            crossover_op: CrossoverOp::Order,
        }
    }
}

/// Soft-constraint rules added to the optimization objective.
///
/// Preference lists are comma-separated `char:target` pairs, e.g.
/// `--hand-prefs "e:0,t:1"` or `--row-prefs "a:2"`. A rule with zero weight
/// is disabled.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    #[arg(long, default_value = "")]
    pub hand_prefs: String,
    #[arg(long, default_value_t = 0.0)]
    pub hand_pref_weight: f32,

    #[arg(long, default_value = "")]
    pub row_prefs: String,
    #[arg(long, default_value_t = 0.0)]
    pub row_pref_weight: f32,

    #[arg(long, default_value_t = 0.5)]
    pub balance_target: f32,
    #[arg(long, default_value_t = 0.0)]
    pub balance_weight: f32,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            hand_prefs: String::new(),
            hand_pref_weight: 0.0,
            row_prefs: String::new(),
            row_pref_weight: 0.0,
            balance_target: 0.5,
            balance_weight: 0.0,
        }
    }
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.hand_pref_weight == 0.0 && self.row_pref_weight == 0.0 && self.balance_weight == 0.0
    }

    pub fn parsed_hand_prefs(&self) -> KvResult<Vec<(u8, u8)>> {
        parse_char_pairs(&self.hand_prefs, "hand_prefs", |t| {
            if t <= 1 {
                Ok(t as u8)
            } else {
                Err(format!("hand target must be 0 or 1, got {}", t))
            }
        })
    }

    pub fn parsed_row_prefs(&self) -> KvResult<Vec<(u8, i32)>> {
        parse_char_pairs(&self.row_prefs, "row_prefs", |t| {
            if (0..=3).contains(&t) {
                Ok(t)
            } else {
                Err(format!("row target must be in 0..=3, got {}", t))
            }
        })
    }
}

fn parse_char_pairs<T>(
    s: &str,
    name: &str,
    check: impl Fn(i32) -> Result<T, String>,
) -> KvResult<Vec<(u8, T)>> {
    let mut pairs = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, target) = part.split_once(':').ok_or_else(|| {
            KeyvolveError::Config(format!("{}: expected char:target, got '{}'", name, part))
        })?;
        let mut chars = key.trim().chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => c.to_ascii_lowercase() as u8,
            _ => {
                return Err(KeyvolveError::Config(format!(
                    "{}: key must be a single ASCII character, got '{}'",
                    name, key
                )))
            }
        };
        let raw: i32 = target.trim().parse().map_err(|_| {
            KeyvolveError::Config(format!("{}: invalid target '{}'", name, target))
        })?;
        pairs.push((c, check(raw).map_err(KeyvolveError::Config)?));
    }
    Ok(pairs)
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[command(flatten)]
    pub weights: EffortWeights,
    #[command(flatten)]
    pub rules: RuleSet,
    #[command(flatten)]
    pub search: GaParams,
}
