#![allow(dead_code)]

use keyvolve::geometry::KeyPositions;
use keyvolve::layouts;

/// The 30-key 10x3 grid at integer coordinates.
pub fn grid30() -> KeyPositions {
    layouts::standard_grid()
}

pub fn qwerty() -> Vec<char> {
    layouts::QWERTY.chars().collect()
}

pub fn uniform_freq(chars: &[char]) -> Vec<f32> {
    vec![1.0 / chars.len() as f32; chars.len()]
}

pub fn samples(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}
