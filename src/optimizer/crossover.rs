use crate::layout::Layout;
use fastrand::Rng;

fn cut_points(n: usize, rng: &mut Rng) -> (usize, usize) {
    let a = rng.usize(0..n);
    let b = rng.usize(0..n);
    (a.min(b), a.max(b))
}

/// Order crossover (OX): the child keeps parent 1's segment [i..=j] in place;
/// the remaining slots are filled with parent 2's characters in parent 2's
/// cyclic order, both walks starting just past the segment.
pub fn crossover_order(p1: &[u8], p2: &[u8], rng: &mut Rng) -> Layout {
    let n = p1.len();
    let (i, j) = cut_points(n, rng);

    let mut child = vec![0u8; n];
    let mut taken = [false; 256];
    for k in i..=j {
        child[k] = p1[k];
        taken[p1[k] as usize] = true;
    }

    let mut fill = (j + 1) % n;
    for step in 0..n {
        let gene = p2[(j + 1 + step) % n];
        if taken[gene as usize] {
            continue;
        }
        while fill >= i && fill <= j {
            fill = (fill + 1) % n;
        }
        child[fill] = gene;
        taken[gene as usize] = true;
        fill = (fill + 1) % n;
    }

    child
}

/// Partially-mapped crossover (PMX): the child keeps parent 1's segment; each
/// outside slot takes parent 2's character, chased through the segment's
/// pairwise mapping until it no longer conflicts.
pub fn crossover_pmx(p1: &[u8], p2: &[u8], rng: &mut Rng) -> Layout {
    let n = p1.len();
    let (i, j) = cut_points(n, rng);

    let mut child = vec![0u8; n];
    let mut in_segment = [false; 256];
    // Slot of each segment character within parent 1, for chasing the
    // mapping A[k] <-> B[k].
    let mut segment_slot = [0usize; 256];
    for k in i..=j {
        child[k] = p1[k];
        in_segment[p1[k] as usize] = true;
        segment_slot[p1[k] as usize] = k;
    }

    for k in (0..i).chain(j + 1..n) {
        let mut gene = p2[k];
        while in_segment[gene as usize] {
            gene = p2[segment_slot[gene as usize]];
        }
        child[k] = gene;
    }

    child
}
