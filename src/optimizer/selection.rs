use fastrand::Rng;

/// Tournament selection: draw `k` indices uniformly with replacement and
/// return the one with the lowest fitness. Ties keep the first draw.
pub fn tournament(fitness: &[f32], k: usize, rng: &mut Rng) -> usize {
    let mut best = rng.usize(0..fitness.len());
    for _ in 1..k {
        let challenger = rng.usize(0..fitness.len());
        if fitness[challenger] < fitness[best] {
            best = challenger;
        }
    }
    best
}
