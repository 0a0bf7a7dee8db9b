//! Activation functions shared by the update rules.

/// Threshold activation. A zero local field resolves to +1 on every update path.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}

/// Probability that a unit with local field `x` takes the value +1 at inverse
/// temperature `beta`: `1 / (1 + exp(-2 * beta * x))`.
///
/// A zero field is a fair coin for every `beta`, including `f64::INFINITY`.
#[inline]
pub fn logistic(x: f64, beta: f64) -> f64 {
    if x == 0.0 {
        return 0.5;
    }
    let z = 2.0 * beta * x;
    if z.is_nan() {
        // beta == 0 with an infinite field
        return 0.5;
    }
    1.0 / (1.0 + (-z).exp())
}
