use crate::geometry::KeyPositions;

/// Reference layouts on the standard 30-key grid: three letter rows of ten
/// keys, top row first.
pub const QWERTY: &str = "qwertyuiopasdfghjkl;zxcvbnm,./";
pub const DVORAK: &str = "',.pyfgcrlaoeuidhtns;qjkxbmwvz";
pub const COLEMAK: &str = "qwfpgjluy;arstdhneiozxcvbkm,./";

pub fn by_name(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "qwerty" => Some(QWERTY),
        "dvorak" => Some(DVORAK),
        "colemak" => Some(COLEMAK),
        _ => None,
    }
}

/// The standard 30-key grid: 10 columns by 3 letter rows at integer
/// coordinates, rows 1 (top) through 3 (bottom).
pub fn standard_grid() -> KeyPositions {
    let mut x = Vec::with_capacity(30);
    let mut y = Vec::with_capacity(30);
    let mut row = Vec::with_capacity(30);
    let mut column = Vec::with_capacity(30);
    for r in 1..=3 {
        for c in 0..10 {
            x.push(c as f32);
            y.push(r as f32);
            row.push(r);
            column.push(c);
        }
    }
    KeyPositions { x, y, row, column }
}
