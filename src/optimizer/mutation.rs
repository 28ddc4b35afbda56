use crate::layout::Layout;
use fastrand::Rng;

/// Swap two uniformly chosen positions. Equal picks are a no-op.
pub fn mutate_swap(layout: &mut Layout, rate: f32, rng: &mut Rng) {
    if rng.f32() < rate {
        let i = rng.usize(0..layout.len());
        let j = rng.usize(0..layout.len());
        layout.swap(i, j);
    }
}

/// Shuffle a short window (up to 3 positions) starting at a random slot.
pub fn mutate_scramble(layout: &mut Layout, rate: f32, rng: &mut Rng) {
    if rng.f32() < rate {
        let start = rng.usize(0..layout.len());
        let end = (start + 3).min(layout.len());
        rng.shuffle(&mut layout[start..end]);
    }
}

/// Reverse the subrange between two random positions, inclusive.
pub fn mutate_inversion(layout: &mut Layout, rate: f32, rng: &mut Rng) {
    if rng.f32() < rate {
        let a = rng.usize(0..layout.len());
        let b = rng.usize(0..layout.len());
        layout[a.min(b)..=a.max(b)].reverse();
    }
}

/// The per-child mutation cascade: swap at the configured rate, scramble at
/// 0.3x, inversion at 0.2x, applied in that order.
pub fn apply_mutations(layout: &mut Layout, rate: f32, rng: &mut Rng) {
    mutate_swap(layout, rate, rng);
    mutate_scramble(layout, rate * 0.3, rng);
    mutate_inversion(layout, rate * 0.2, rng);
}
