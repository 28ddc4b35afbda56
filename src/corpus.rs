use itertools::Itertools;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct BigramCount {
    pub a: u8,
    pub b: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct TrigramCount {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub count: u32,
}

/// Precomputed corpus statistics for one alphabet.
///
/// The corpus is the concatenation of all text samples with single-space
/// separators, case-folded. Only characters present in the alphabet enter
/// the n-gram tables; any other character resets the chain, so no bigram or
/// trigram spans a gap. Tables are sorted so accumulation order (and thus
/// floating-point summation) is reproducible.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Length of the joined corpus, used to scale the static term.
    pub len: f32,
    pub bigrams: Vec<BigramCount>,
    pub trigrams: Vec<TrigramCount>,
}

impl CorpusStats {
    pub fn build(samples: &[String], alphabet: &[bool; 256]) -> Self {
        let joined = samples.join(" ");

        let mut bigrams: HashMap<(u8, u8), u32> = HashMap::new();
        let mut trigrams: HashMap<(u8, u8, u8), u32> = HashMap::new();

        let mut prev: Option<u8> = None;
        let mut prev_prev: Option<u8> = None;
        for byte in joined.bytes() {
            let c = byte.to_ascii_lowercase();
            if !alphabet[c as usize] {
                prev = None;
                prev_prev = None;
                continue;
            }
            if let Some(p) = prev {
                *bigrams.entry((p, c)).or_default() += 1;
                if let Some(pp) = prev_prev {
                    *trigrams.entry((pp, p, c)).or_default() += 1;
                }
            }
            prev_prev = prev;
            prev = Some(c);
        }

        let bigrams = bigrams
            .into_iter()
            .sorted()
            .map(|((a, b), count)| BigramCount { a, b, count })
            .collect();
        let trigrams = trigrams
            .into_iter()
            .sorted()
            .map(|((a, b, c), count)| TrigramCount { a, b, c, count })
            .collect();

        Self {
            len: joined.chars().count() as f32,
            bigrams,
            trigrams,
        }
    }
}

/// Character frequencies over the joined samples, as proportions of all
/// non-whitespace characters. Input provider for the CLI; the core API takes
/// the table as a caller-supplied argument.
pub fn char_frequencies(samples: &[String]) -> Vec<(char, f32)> {
    let counts = samples
        .iter()
        .flat_map(|s| s.chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .counts();

    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    counts
        .into_iter()
        .sorted()
        .map(|(c, n)| (c, n as f32 / total as f32))
        .collect()
}
