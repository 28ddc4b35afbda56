//! Pure cost functions of the effort model.
//!
//! Base key cost follows the Carpalx family: a multiplicative product of row
//! reach, finger strength, and distance from the finger's resting zone.
//! Dynamic costs penalize same-finger bigrams, same-hand rolls, row changes,
//! and direction changes in same-hand trigrams. Hand alternation is free.

use crate::geometry::{home_center, KeySlot};

/// Relative difficulty of reaching each row. Home row (2) is strongly
/// preferred; the number row (0) is the hardest reach.
pub fn row_penalty(row: i32) -> f32 {
    match row {
        0 => 3.0,
        1 => 1.2,
        2 => 0.5,
        3 => 2.0,
        _ => 2.5,
    }
}

/// Finger strength penalty: pinkies weakest, index fingers strongest.
pub fn finger_penalty(finger: u8) -> f32 {
    match finger {
        0 | 9 => 2.2,
        1 | 8 => 1.4,
        2 | 7 => 1.0,
        3..=6 => 0.85,
        _ => 1.5,
    }
}

/// Surcharge for keys away from the finger's zone center: 30% per
/// quarter-unit of normalized x (one zone width).
pub fn home_distance_penalty(rel_x: f32, finger: u8) -> f32 {
    let dist = (rel_x - home_center(finger)).abs();
    1.0 + 0.3 * (dist / 0.25)
}

/// Static cost of placing any character on this key.
pub fn base_key_effort(slot: &KeySlot) -> f32 {
    row_penalty(slot.row) * finger_penalty(slot.finger) * home_distance_penalty(slot.rel_x, slot.finger)
}

/// Penalty for two consecutive keys struck by the same finger. Scales with
/// grid distance; the caller excludes same-key repeats.
pub fn same_finger_penalty(a: &KeySlot, b: &KeySlot) -> f32 {
    let dr = (a.row - b.row) as f32;
    let dc = (a.col - b.col) as f32;
    3.0 + 2.0 * (dr * dr + dc * dc).sqrt()
}

/// Penalty for two consecutive keys on the same hand with different fingers.
/// Inward rolls (toward the index finger) are comfortable; outward rolls are
/// not. Equal fingers are the same-finger case and cost nothing here.
pub fn same_hand_penalty(a: &KeySlot, b: &KeySlot) -> f32 {
    if a.finger == b.finger {
        return 0.0;
    }
    let dir = b.finger as i32 - a.finger as i32;
    let is_left = a.finger <= 4;
    let is_inward = (is_left && dir < 0) || (!is_left && dir > 0);
    if is_inward {
        0.5
    } else {
        1.2
    }
}

/// Penalty for changing rows within a same-hand bigram.
pub fn row_change_penalty(a: &KeySlot, b: &KeySlot) -> f32 {
    let diff = (a.row - b.row).abs();
    match diff {
        0 => 0.0,
        1 => 0.3,
        d => 0.6 * d as f32,
    }
}

/// Penalty for three consecutive keys on one hand. Monotonic finger runs
/// roll comfortably; any direction change is awkward.
pub fn trigram_penalty(f1: u8, f2: u8, f3: u8) -> f32 {
    let d1 = f2 as i32 - f1 as i32;
    let d2 = f3 as i32 - f2 as i32;
    if (d1 > 0 && d2 > 0) || (d1 < 0 && d2 < 0) {
        0.5
    } else {
        2.0
    }
}

/// How a bigram is scored. Same-finger supersedes same-hand; a same-key
/// repeat lands in the same-hand class where both penalty terms are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigramClass {
    SameFinger,
    SameHand,
    Alternation,
}

pub fn classify_bigram(p1: usize, p2: usize, a: &KeySlot, b: &KeySlot) -> BigramClass {
    if a.finger == b.finger && p1 != p2 {
        BigramClass::SameFinger
    } else if a.hand == b.hand {
        BigramClass::SameHand
    } else {
        BigramClass::Alternation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn slot(row: i32, col: i32, finger: u8, rel_x: f32) -> KeySlot {
        KeySlot {
            x: col as f32,
            y: row as f32,
            row,
            col,
            finger,
            hand: if finger <= 4 { 0 } else { 1 },
            rel_x,
        }
    }

    #[rstest]
    #[case(0, 3.0)]
    #[case(1, 1.2)]
    #[case(2, 0.5)]
    #[case(3, 2.0)]
    fn row_table(#[case] row: i32, #[case] expected: f32) {
        assert_eq!(row_penalty(row), expected);
    }

    #[rstest]
    #[case(0, 2.2)]
    #[case(9, 2.2)]
    #[case(1, 1.4)]
    #[case(8, 1.4)]
    #[case(2, 1.0)]
    #[case(7, 1.0)]
    #[case(3, 0.85)]
    #[case(6, 0.85)]
    fn finger_table(#[case] finger: u8, #[case] expected: f32) {
        assert_eq!(finger_penalty(finger), expected);
    }

    #[test]
    fn home_distance_is_one_at_zone_center() {
        assert_eq!(home_distance_penalty(-0.875, 0), 1.0);
        // A full zone away costs 30% extra.
        let p = home_distance_penalty(-0.625, 0);
        assert!((p - 1.3).abs() < 1e-6);
    }

    #[test]
    fn same_finger_scales_with_distance() {
        let a = slot(2, 3, 3, -0.125);
        let b = slot(1, 3, 3, -0.125);
        assert!((same_finger_penalty(&a, &b) - 5.0).abs() < 1e-6);
        assert!((same_finger_penalty(&a, &a) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn inward_rolls_beat_outward_rolls() {
        let pinky = slot(2, 0, 0, -0.875);
        let ring = slot(2, 1, 1, -0.625);
        // Left hand: ring -> pinky moves away from the index finger.
        assert_eq!(same_hand_penalty(&pinky, &ring), 1.2);
        assert_eq!(same_hand_penalty(&ring, &pinky), 0.5);

        let r_index = slot(2, 6, 6, 0.125);
        let r_middle = slot(2, 7, 7, 0.375);
        // Right hand: increasing finger index moves toward the pinky — inward.
        assert_eq!(same_hand_penalty(&r_index, &r_middle), 0.5);
        assert_eq!(same_hand_penalty(&r_middle, &r_index), 1.2);
    }

    #[rstest]
    #[case(2, 2, 0.0)]
    #[case(2, 1, 0.3)]
    #[case(1, 3, 1.2)]
    fn row_change_table(#[case] r1: i32, #[case] r2: i32, #[case] expected: f32) {
        let a = slot(r1, 0, 0, -0.875);
        let b = slot(r2, 0, 0, -0.875);
        assert!((row_change_penalty(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn monotonic_trigrams_roll() {
        assert_eq!(trigram_penalty(0, 1, 2), 0.5);
        assert_eq!(trigram_penalty(3, 2, 1), 0.5);
        assert_eq!(trigram_penalty(0, 2, 1), 2.0);
        // A repeated finger breaks monotonicity.
        assert_eq!(trigram_penalty(1, 1, 2), 2.0);
    }

    #[test]
    fn repeats_classify_as_same_hand() {
        let a = slot(2, 3, 3, -0.125);
        assert_eq!(classify_bigram(4, 4, &a, &a), BigramClass::SameHand);
        let b = slot(1, 3, 3, -0.125);
        assert_eq!(classify_bigram(4, 5, &a, &b), BigramClass::SameFinger);
    }
}
