//! Network state container: neuron states, weights and update bookkeeping.
//!
//! Every accessor returns a copy and every setter stores a copy, so callers
//! never alias the vectors owned by the network.

use log::debug;
use ndarray::{Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{HopfieldError, HopfieldResult};

#[derive(Debug, Clone)]
pub struct HopfieldNetwork<R = ChaCha8Rng> {
    size: usize,
    pub(crate) state: Array1<f64>,
    pub(crate) weights: Array2<f64>,
    pub(crate) updates_since_reset: u64,
    // Units that did not flip the last time they were sampled
    pub(crate) pseudo_stable: Vec<bool>,
    pub(crate) rng: R,
}

impl HopfieldNetwork<ChaCha8Rng> {
    /// All-ones state, all-zero weights, entropy-seeded random source.
    pub fn new(size: usize) -> HopfieldResult<Self> {
        Self::with_initial(size, None, None)
    }

    /// Construct with an optional initial pattern and/or weight matrix.
    /// Both are copied; omitted parts take the defaults of [`HopfieldNetwork::new`].
    pub fn with_initial(
        size: usize,
        initial_state: Option<&[f64]>,
        initial_weights: Option<&Array2<f64>>,
    ) -> HopfieldResult<Self> {
        Self::from_parts(size, initial_state, initial_weights, ChaCha8Rng::from_entropy())
    }

    /// Default network whose unit selection and stochastic draws are reproducible.
    pub fn seeded(size: usize, seed: u64) -> HopfieldResult<Self> {
        Self::from_parts(size, None, None, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R> HopfieldNetwork<R> {
    pub fn from_parts(
        size: usize,
        initial_state: Option<&[f64]>,
        initial_weights: Option<&Array2<f64>>,
        rng: R,
    ) -> HopfieldResult<Self> {
        if size == 0 {
            return Err(HopfieldError::EmptyNetwork);
        }
        let mut net = Self {
            size,
            state: Array1::ones(size),
            weights: Array2::zeros((size, size)),
            updates_since_reset: 0,
            pseudo_stable: vec![false; size],
            rng,
        };
        if let Some(pattern) = initial_state {
            net.set_state(pattern)?;
        }
        if let Some(weights) = initial_weights {
            net.set_weights(weights)?;
        }
        debug!("created hopfield network with {} units", size);
        Ok(net)
    }

    /// Swap in a different random source, keeping state, weights and counters.
    pub fn with_rng<S>(self, rng: S) -> HopfieldNetwork<S> {
        HopfieldNetwork {
            size: self.size,
            state: self.state,
            weights: self.weights,
            updates_since_reset: self.updates_since_reset,
            pseudo_stable: self.pseudo_stable,
            rng,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn updates_since_reset(&self) -> u64 {
        self.updates_since_reset
    }

    pub fn pseudo_stable_flags(&self) -> Vec<bool> {
        self.pseudo_stable.clone()
    }

    /// True when every unit has been sampled without flipping since the last flip.
    pub fn is_pseudo_stable(&self) -> bool {
        self.pseudo_stable.iter().all(|&s| s)
    }

    pub(crate) fn check_len(&self, len: usize) -> HopfieldResult<()> {
        if len != self.size {
            return Err(HopfieldError::Dimension { expected: self.size, actual: len });
        }
        Ok(())
    }

    pub fn state(&self) -> Vec<f64> {
        self.state.to_vec()
    }

    /// Replace the whole state vector. Only the length is checked: values other
    /// than +1/-1 are accepted here, unlike [`HopfieldNetwork::set_unit`].
    pub fn set_state(&mut self, pattern: &[f64]) -> HopfieldResult<()> {
        self.check_len(pattern.len())?;
        self.state = Array1::from(pattern.to_vec());
        Ok(())
    }

    pub fn set_unit(&mut self, index: usize, value: f64) -> HopfieldResult<()> {
        if value != 1.0 && value != -1.0 {
            return Err(HopfieldError::InvalidUnitValue { index, value });
        }
        if index >= self.size {
            return Err(HopfieldError::IndexOutOfBounds { index, size: self.size });
        }
        self.state[index] = value;
        Ok(())
    }

    pub fn weights(&self) -> Array2<f64> {
        self.weights.clone()
    }

    pub fn set_weights(&mut self, weights: &Array2<f64>) -> HopfieldResult<()> {
        let (rows, cols) = weights.dim();
        if rows != self.size || cols != self.size {
            return Err(HopfieldError::WeightShape { expected: self.size, rows, cols });
        }
        self.weights = weights.clone();
        Ok(())
    }

    /// Probe the network: replace the state and start a fresh retrieval run.
    pub fn feed(&mut self, pattern: &[f64]) -> HopfieldResult<()> {
        self.set_state(pattern)?;
        self.updates_since_reset = 0;
        self.pseudo_stable.fill(false);
        debug!("fed probe pattern, update counter reset");
        Ok(())
    }

    /// Weighted input seen by unit `index`: its weight row dotted with the state.
    pub fn local_field(&self, index: usize) -> HopfieldResult<f64> {
        if index >= self.size {
            return Err(HopfieldError::IndexOutOfBounds { index, size: self.size });
        }
        Ok(self.weights.row(index).dot(&self.state))
    }

    /// Lyapunov energy `-1/2 * s^T W s` of the current state.
    pub fn energy(&self) -> f64 {
        -0.5 * self.state.dot(&self.weights.dot(&self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn fresh_network_defaults() {
        for n in 1..6 {
            let net = HopfieldNetwork::new(n).unwrap();
            assert_eq!(net.size(), n);
            assert_eq!(net.state(), vec![1.0; n]);
            assert_eq!(net.weights(), Array2::<f64>::zeros((n, n)));
            assert_eq!(net.updates_since_reset(), 0);
            assert!(!net.is_pseudo_stable());
        }
    }

    #[test]
    fn zero_size_rejected() {
        assert_eq!(HopfieldNetwork::new(0).unwrap_err(), HopfieldError::EmptyNetwork);
    }

    #[test]
    fn initial_parts_are_shape_checked() {
        let err = HopfieldNetwork::with_initial(3, Some(&[1.0, -1.0]), None).unwrap_err();
        assert_eq!(err, HopfieldError::Dimension { expected: 3, actual: 2 });

        let w = Array2::<f64>::zeros((3, 2));
        let err = HopfieldNetwork::with_initial(3, None, Some(&w)).unwrap_err();
        assert_eq!(err, HopfieldError::WeightShape { expected: 3, rows: 3, cols: 2 });

        let w = array![[0.0, 0.5], [0.5, 0.0]];
        let net = HopfieldNetwork::with_initial(2, Some(&[-1.0, 1.0]), Some(&w)).unwrap();
        assert_eq!(net.state(), vec![-1.0, 1.0]);
        assert_eq!(net.weights(), w);
    }

    #[test]
    fn accessors_return_copies() {
        let mut net = HopfieldNetwork::new(3).unwrap();
        let mut s = net.state();
        s[0] = -1.0;
        let mut w = net.weights();
        w[[0, 1]] = 9.0;
        assert_eq!(net.state(), vec![1.0; 3]);
        assert_eq!(net.weights()[[0, 1]], 0.0);

        let mut given = array![[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        net.set_weights(&given).unwrap();
        given[[0, 1]] = 5.0;
        assert_eq!(net.weights()[[0, 1]], 1.0);
    }

    #[test]
    fn set_state_is_permissive_about_values() {
        let mut net = HopfieldNetwork::new(3).unwrap();
        net.set_state(&[0.5, -2.0, 1.0]).unwrap();
        assert_eq!(net.state(), vec![0.5, -2.0, 1.0]);
        assert!(net.set_state(&[1.0; 4]).is_err());
    }

    #[test]
    fn set_unit_validates_value_then_index() {
        let mut net = HopfieldNetwork::new(4).unwrap();
        net.set_unit(2, -1.0).unwrap();
        assert_eq!(net.state(), vec![1.0, 1.0, -1.0, 1.0]);

        for bad in [0.0, 0.5, 2.0, -1.5, f64::NAN] {
            assert!(matches!(
                net.set_unit(0, bad),
                Err(HopfieldError::InvalidUnitValue { index: 0, .. })
            ));
        }
        assert_eq!(
            net.set_unit(4, 1.0),
            Err(HopfieldError::IndexOutOfBounds { index: 4, size: 4 })
        );
        assert_eq!(net.state(), vec![1.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn feed_resets_counter_and_flags() {
        let mut net = HopfieldNetwork::seeded(3, 1).unwrap();
        net.updates_since_reset = 12;
        net.pseudo_stable = vec![true, true, false];
        net.feed(&[-1.0, 1.0, -1.0]).unwrap();
        assert_eq!(net.updates_since_reset(), 0);
        assert_eq!(net.pseudo_stable_flags(), vec![false; 3]);
        assert_eq!(net.state(), vec![-1.0, 1.0, -1.0]);

        assert!(net.feed(&[1.0]).is_err());
        assert_eq!(net.state(), vec![-1.0, 1.0, -1.0]);
    }

    #[test]
    fn local_field_reads_weight_row() {
        let w = array![[0.0, 0.5, -0.25], [0.5, 0.0, 1.0], [-0.25, 1.0, 0.0]];
        let net = HopfieldNetwork::with_initial(3, Some(&[1.0, -1.0, 1.0]), Some(&w)).unwrap();
        assert_abs_diff_eq!(net.local_field(0).unwrap(), -0.75);
        assert_abs_diff_eq!(net.local_field(1).unwrap(), 1.5);
        assert_abs_diff_eq!(net.local_field(2).unwrap(), -1.25);
        assert_eq!(
            net.local_field(3),
            Err(HopfieldError::IndexOutOfBounds { index: 3, size: 3 })
        );
    }

    #[test]
    fn energy_of_stored_pattern() {
        let w = array![[0.0, 0.5], [0.5, 0.0]];
        let net = HopfieldNetwork::with_initial(2, Some(&[1.0, 1.0]), Some(&w)).unwrap();
        assert_abs_diff_eq!(net.energy(), -0.5);
        let net = net.with_rng(ChaCha8Rng::seed_from_u64(3));
        assert_abs_diff_eq!(net.energy(), -0.5);
    }
}
