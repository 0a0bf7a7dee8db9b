// Pattern generation and comparison for recall experiments.

use rand::seq::index;
use rand::Rng;

/// Uniformly random ±1 pattern.
pub fn random_pattern<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| if rng.gen_bool(0.5) { 1.0 } else { -1.0 }).collect()
}

/// Copy of `pattern` with exactly `flips` distinct units negated
/// (clamped to the pattern length).
pub fn corrupt<R: Rng>(pattern: &[f64], flips: usize, rng: &mut R) -> Vec<f64> {
    let mut probe = pattern.to_vec();
    let flips = flips.min(probe.len());
    for i in index::sample(rng, probe.len(), flips).iter() {
        probe[i] = -probe[i];
    }
    probe
}

/// Normalized overlap `(1/N) * sum(a_i * b_i)`; 1.0 means identical ±1 patterns.
pub fn overlap(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    a.iter().zip(b).map(|(x, y)| x * y).sum::<f64>() / a.len() as f64
}
