use crate::config::{CrossoverOp, GaParams};
use crate::layout::{build_pos_map, random_layout, Layout};
use crate::optimizer::crossover::{crossover_order, crossover_pmx};
use crate::optimizer::mutation::apply_mutations;
use crate::optimizer::selection::tournament;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Invoked every 10 generations. Returning `false` cancels the run; the
/// result then carries the best-so-far with history truncated to the
/// generations fully completed.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, generation: usize, best: f32, mean: f32) -> bool;
}

/// Callback that never cancels.
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_progress(&self, _generation: usize, _best: f32, _mean: f32) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct GaResult {
    pub layout: Layout,
    pub effort: f32,
    pub history_best: Vec<f32>,
    pub history_mean: Vec<f32>,
    pub generations: usize,
    pub population_size: usize,
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    params: GaParams,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, params: GaParams) -> Self {
        Self { scorer, params }
    }

    /// Run the evolutionary loop from an initial layout.
    ///
    /// All randomness is drawn from a single master stream on this thread;
    /// fitness evaluation fans out over rayon workers but is pure, so a fixed
    /// seed reproduces the run bit-for-bit at any thread count.
    pub fn run<CB: ProgressCallback>(
        &self,
        initial: &[u8],
        seed: Option<u64>,
        callback: &CB,
    ) -> GaResult {
        let p = &self.params;
        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        let mut population: Vec<Layout> = Vec::with_capacity(p.population_size);
        population.push(initial.to_vec());
        for _ in 1..p.population_size {
            population.push(random_layout(initial, &mut rng));
        }
        let mut fitness = self.evaluate(&population);

        let (mut best_idx, mut best_fit) = argmin(&fitness);
        let mut best_layout = population[best_idx].clone();

        let mut history_best = Vec::with_capacity(p.generations);
        let mut history_mean = Vec::with_capacity(p.generations);
        let mut completed = 0;

        for g in 0..p.generations {
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| fitness[a].partial_cmp(&fitness[b]).unwrap());

            let mut next: Vec<Layout> = Vec::with_capacity(p.population_size);
            for &idx in order.iter().take(p.elite_count) {
                next.push(population[idx].clone());
            }

            while next.len() < p.population_size {
                let i1 = tournament(&fitness, p.tournament_size, &mut rng);
                let i2 = tournament(&fitness, p.tournament_size, &mut rng);
                let mut child = if rng.f32() < p.crossover_rate {
                    match p.crossover_op {
                        CrossoverOp::Order => {
                            crossover_order(&population[i1], &population[i2], &mut rng)
                        }
                        CrossoverOp::Pmx => {
                            crossover_pmx(&population[i1], &population[i2], &mut rng)
                        }
                    }
                } else {
                    population[i1].clone()
                };
                apply_mutations(&mut child, p.mutation_rate, &mut rng);
                next.push(child);
            }

            population = next;
            fitness = self.evaluate(&population);

            let (gen_idx, gen_fit) = argmin(&fitness);
            if gen_fit < best_fit {
                best_fit = gen_fit;
                best_idx = gen_idx;
                best_layout = population[best_idx].clone();
            }

            let mean = fitness.iter().sum::<f32>() / fitness.len() as f32;
            history_best.push(best_fit);
            history_mean.push(mean);
            completed = g + 1;

            if completed % 10 == 0 && !callback.on_progress(completed, best_fit, mean) {
                break;
            }
        }

        info!(
            "search finished: {} generations, best effort {:.2}",
            completed, best_fit
        );

        GaResult {
            layout: best_layout,
            effort: best_fit,
            history_best,
            history_mean,
            generations: completed,
            population_size: p.population_size,
        }
    }

    /// Generation barrier: every child's fitness is independent, so the
    /// whole population evaluates in parallel.
    fn evaluate(&self, population: &[Layout]) -> Vec<f32> {
        population
            .par_iter()
            .map(|layout| self.scorer.fitness(&build_pos_map(layout)))
            .collect()
    }
}

fn argmin(fitness: &[f32]) -> (usize, f32) {
    let mut idx = 0;
    let mut best = fitness[0];
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f < best {
            best = f;
            idx = i;
        }
    }
    (idx, best)
}
