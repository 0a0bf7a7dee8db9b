//! Hebbian storage: patterns are superimposed additively into the weights.

use log::debug;
use ndarray::{Array2, ArrayView1, Axis};

use crate::error::HopfieldResult;
use crate::network::HopfieldNetwork;

/// Weight contribution of one pattern: `p p^T / N` with a zero diagonal.
pub fn hebbian_increment(pattern: &[f64]) -> Array2<f64> {
    let n = pattern.len();
    let p = ArrayView1::from(pattern);
    let column = p.insert_axis(Axis(1));
    let row = p.insert_axis(Axis(0));
    let mut delta = column.dot(&row) / n as f64;
    delta.diag_mut().fill(0.0);
    delta
}

impl<R> HopfieldNetwork<R> {
    /// Add `pattern` to the stored memories. Existing weights are kept; the
    /// diagonal is left at exactly zero.
    pub fn store(&mut self, pattern: &[f64]) -> HopfieldResult<()> {
        self.check_len(pattern.len())?;
        self.weights += &hebbian_increment(pattern);
        self.weights.diag_mut().fill(0.0);
        debug!("stored pattern into {}x{} weights", self.size(), self.size());
        Ok(())
    }

    /// Store several patterns. Every pattern is checked before any is stored.
    pub fn store_all<P: AsRef<[f64]>>(&mut self, patterns: &[P]) -> HopfieldResult<()> {
        for p in patterns {
            self.check_len(p.as_ref().len())?;
        }
        for p in patterns {
            self.store(p.as_ref())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HopfieldError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn increment_is_scaled_outer_product() {
        let d = hebbian_increment(&[1.0, -1.0, 1.0, 1.0]);
        assert_eq!(d.dim(), (4, 4));
        for i in 0..4 {
            assert_eq!(d[[i, i]], 0.0);
        }
        assert_abs_diff_eq!(d[[0, 1]], -0.25);
        assert_abs_diff_eq!(d[[0, 2]], 0.25);
        assert_abs_diff_eq!(d[[1, 3]], -0.25);
        assert_eq!(d, d.t());
    }

    #[test]
    fn store_accumulates_and_commutes() {
        let a = [1.0, 1.0, -1.0, -1.0];
        let b = [1.0, -1.0, 1.0, -1.0];

        let mut ab = HopfieldNetwork::new(4).unwrap();
        ab.store(&a).unwrap();
        ab.store(&b).unwrap();
        let mut ba = HopfieldNetwork::new(4).unwrap();
        ba.store(&b).unwrap();
        ba.store(&a).unwrap();
        assert_eq!(ab.weights(), ba.weights());

        let mut once = HopfieldNetwork::new(4).unwrap();
        once.store(&a).unwrap();
        let mut twice = HopfieldNetwork::new(4).unwrap();
        twice.store(&a).unwrap();
        twice.store(&a).unwrap();
        assert_eq!(twice.weights(), once.weights() * 2.0);
    }

    #[test]
    fn store_zeroes_existing_diagonal() {
        let w = array![[3.0, 1.0, 0.0], [1.0, -2.0, 0.0], [0.0, 0.0, 7.0]];
        let mut net = HopfieldNetwork::with_initial(3, None, Some(&w)).unwrap();
        net.store(&[1.0, -1.0, 1.0]).unwrap();
        let stored = net.weights();
        for i in 0..3 {
            assert_eq!(stored[[i, i]], 0.0);
        }
        assert_abs_diff_eq!(stored[[0, 1]], 1.0 - 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn store_rejects_wrong_length() {
        let mut net = HopfieldNetwork::new(3).unwrap();
        assert_eq!(
            net.store(&[1.0, 1.0]),
            Err(HopfieldError::Dimension { expected: 3, actual: 2 })
        );
        assert_eq!(net.weights(), Array2::<f64>::zeros((3, 3)));
    }

    #[test]
    fn store_all_is_all_or_nothing() {
        let mut net = HopfieldNetwork::new(3).unwrap();
        let patterns = vec![vec![1.0, -1.0, 1.0], vec![1.0, 1.0]];
        assert!(net.store_all(&patterns).is_err());
        assert_eq!(net.weights(), Array2::<f64>::zeros((3, 3)));

        let patterns = vec![vec![1.0, -1.0, 1.0], vec![-1.0, -1.0, 1.0]];
        net.store_all(&patterns).unwrap();
        let mut expected = hebbian_increment(&patterns[0]);
        expected += &hebbian_increment(&patterns[1]);
        assert_eq!(net.weights(), expected);
    }
}
