use crate::error::{KeyvolveError, KvResult};
use serde::{Deserialize, Serialize};

/// Raw key positions as supplied by the caller: four parallel arrays.
///
/// `row` semantics: 0 = number row, 1 = top letter row, 2 = home row,
/// 3 = bottom row. Keys are indexed in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPositions {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub row: Vec<i32>,
    pub column: Vec<i32>,
}

impl KeyPositions {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// One physical key with its derived typing attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KeySlot {
    pub x: f32,
    pub y: f32,
    pub row: i32,
    pub col: i32,
    /// 0..=9, left pinky to right pinky. Thumbs (4, 5) never carry letters.
    pub finger: u8,
    /// 0 = left, 1 = right.
    pub hand: u8,
    /// Horizontal position normalized to [-1, +1] across the keyboard.
    pub rel_x: f32,
}

/// Precomputed geometry: finger/hand assignment and normalized x per key.
///
/// Derived once per run from raw positions; immutable afterwards. Finger
/// assignment splits the normalized horizontal range into eight equal zones
/// so the model is independent of any particular physical layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryIndex {
    pub keys: Vec<KeySlot>,
}

impl GeometryIndex {
    pub fn build(pos: &KeyPositions) -> KvResult<Self> {
        let n = pos.x.len();
        if n == 0 {
            return Err(KeyvolveError::Config("geometry has no keys".to_string()));
        }
        if pos.y.len() != n || pos.row.len() != n || pos.column.len() != n {
            return Err(KeyvolveError::Config(format!(
                "position arrays must have equal lengths (x={}, y={}, row={}, column={})",
                pos.x.len(),
                pos.y.len(),
                pos.row.len(),
                pos.column.len()
            )));
        }
        if pos.x.iter().chain(pos.y.iter()).any(|v| !v.is_finite()) {
            return Err(KeyvolveError::Config(
                "key coordinates must be finite".to_string(),
            ));
        }
        if let Some(&bad) = pos.row.iter().find(|r| !(0..=3).contains(*r)) {
            return Err(KeyvolveError::Config(format!(
                "key row must be in 0..=3, got {}",
                bad
            )));
        }

        let min_x = pos.x.iter().copied().fold(f32::INFINITY, f32::min);
        let max_x = pos.x.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let half_width = (max_x - min_x) / 2.0;
        if half_width <= 0.0 {
            return Err(KeyvolveError::Config(
                "geometry is degenerate: all keys share one x position".to_string(),
            ));
        }
        let center = (min_x + max_x) / 2.0;

        let keys = (0..n)
            .map(|i| {
                let rel_x = (pos.x[i] - center) / half_width;
                let finger = finger_for_rel_x(rel_x);
                KeySlot {
                    x: pos.x[i],
                    y: pos.y[i],
                    row: pos.row[i],
                    col: pos.column[i],
                    finger,
                    hand: hand_for_finger(finger),
                    rel_x,
                }
            })
            .collect();

        Ok(Self { keys })
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

/// Map a normalized x position to a finger: eight equal zones, center splits
/// the hands. Negative is left.
pub fn finger_for_rel_x(rel_x: f32) -> u8 {
    if rel_x < 0.0 {
        let a = -rel_x;
        if a > 0.75 {
            0
        } else if a > 0.50 {
            1
        } else if a > 0.25 {
            2
        } else {
            3
        }
    } else if rel_x < 0.25 {
        6
    } else if rel_x < 0.50 {
        7
    } else if rel_x < 0.75 {
        8
    } else {
        9
    }
}

pub fn hand_for_finger(finger: u8) -> u8 {
    if finger <= 4 {
        0
    } else {
        1
    }
}

/// Resting position of each finger: the center of its zone.
pub fn home_center(finger: u8) -> f32 {
    match finger {
        0 => -0.875,
        1 => -0.625,
        2 => -0.375,
        3 => -0.125,
        6 => 0.125,
        7 => 0.375,
        8 => 0.625,
        9 => 0.875,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_boundaries() {
        assert_eq!(finger_for_rel_x(-1.0), 0);
        assert_eq!(finger_for_rel_x(-0.6), 1);
        assert_eq!(finger_for_rel_x(-0.3), 2);
        assert_eq!(finger_for_rel_x(-0.1), 3);
        // Exactly center belongs to the right hand.
        assert_eq!(finger_for_rel_x(0.0), 6);
        assert_eq!(finger_for_rel_x(0.3), 7);
        assert_eq!(finger_for_rel_x(0.6), 8);
        assert_eq!(finger_for_rel_x(1.0), 9);
    }

    #[test]
    fn home_centers_sit_inside_their_zone() {
        for f in [0u8, 1, 2, 3, 6, 7, 8, 9] {
            assert_eq!(finger_for_rel_x(home_center(f)), f);
        }
    }
}
