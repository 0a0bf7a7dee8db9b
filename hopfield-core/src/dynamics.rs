//! Retrieval dynamics: synchronous, asynchronous deterministic and
//! asynchronous stochastic update rules with their convergence signals.
//!
//! Semantics:
//! - `update()` performs exactly one step and bumps the update counter by one.
//! - Synchronous convergence means the full state is a one-step fixed point.
//! - Asynchronous convergence means every unit has been sampled without
//!   flipping since the last flip anywhere (pseudo-stability).

use log::{debug, trace};
use rand::Rng;

use crate::activation::{logistic, sign};
use crate::error::{HopfieldError, HopfieldResult};
use crate::network::HopfieldNetwork;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum UpdateMode {
    /// All units recompute from the same prior state.
    #[default]
    Synchronous,
    /// One uniformly chosen unit takes the sign of its local field.
    AsyncDeterministic,
    /// One uniformly chosen unit becomes +1 with probability
    /// `logistic(field, beta)`, otherwise -1.
    AsyncStochastic { beta: f64 },
}

impl UpdateMode {
    /// Build a mode from the `synchronous` / `stochastic` flag pair.
    /// Synchronous stochastic updating is undefined and rejected.
    pub fn from_flags(synchronous: bool, stochastic: bool, beta: f64) -> HopfieldResult<Self> {
        let mode = match (synchronous, stochastic) {
            (true, true) => {
                return Err(HopfieldError::Configuration(
                    "stochastic updating cannot be synchronous",
                ))
            }
            (true, false) => UpdateMode::Synchronous,
            (false, false) => UpdateMode::AsyncDeterministic,
            (false, true) => UpdateMode::AsyncStochastic { beta },
        };
        mode.validate()?;
        Ok(mode)
    }

    pub fn validate(&self) -> HopfieldResult<()> {
        if let UpdateMode::AsyncStochastic { beta } = *self {
            if beta.is_nan() || beta < 0.0 {
                return Err(HopfieldError::Configuration("beta must be a non-negative number"));
            }
        }
        Ok(())
    }

    pub fn is_deterministic(&self) -> bool {
        !matches!(self, UpdateMode::AsyncStochastic { .. })
    }
}

/// Optional cap on the number of updates `run_with_budget` may perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecallBudget {
    pub max_updates: Option<u64>,
}

impl RecallBudget {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_updates(max: u64) -> Self {
        Self { max_updates: Some(max) }
    }
}

/// Outcome of a convergence run: the final state and the number of updates
/// performed since the last `feed`.
#[derive(Clone, Debug, PartialEq)]
pub struct Recall {
    pub state: Vec<f64>,
    pub updates: u64,
}

impl<R: Rng> HopfieldNetwork<R> {
    /// Perform one update step. Returns the convergence signal for `mode`.
    pub fn update(&mut self, mode: UpdateMode) -> HopfieldResult<bool> {
        mode.validate()?;
        let converged = match mode {
            UpdateMode::Synchronous => self.update_synchronous(),
            UpdateMode::AsyncDeterministic => self.update_asynchronous(None)?,
            UpdateMode::AsyncStochastic { beta } => self.update_asynchronous(Some(beta))?,
        };
        self.updates_since_reset += 1;
        Ok(converged)
    }

    fn update_synchronous(&mut self) -> bool {
        let next = self.weights.dot(&self.state).mapv(sign);
        let converged = next == self.state;
        self.state = next;
        converged
    }

    fn update_asynchronous(&mut self, beta: Option<f64>) -> HopfieldResult<bool> {
        let size = self.size();
        let index = self.rng.gen_range(0..size);
        let field = self.local_field(index)?;
        let next = match beta {
            Some(beta) => {
                if self.rng.gen::<f64>() < logistic(field, beta) {
                    1.0
                } else {
                    -1.0
                }
            }
            None => sign(field),
        };
        let flipped = next != self.state[index];
        self.set_unit(index, next)?;
        if flipped {
            trace!("unit {} flipped to {}", index, next);
            self.pseudo_stable.fill(false);
        } else {
            self.pseudo_stable[index] = true;
        }
        Ok(self.is_pseudo_stable())
    }

    /// Update with a deterministic mode until it signals convergence.
    /// Unbounded: see [`HopfieldNetwork::run_with_budget`] for a capped loop.
    pub fn run_until_convergence(&mut self, mode: UpdateMode) -> HopfieldResult<Recall> {
        self.run_with_budget(mode, RecallBudget::unbounded())
    }

    /// Like `run_until_convergence`, but gives up with `NotConverged` once this
    /// call has performed `budget.max_updates` updates. The state reached so
    /// far is kept.
    pub fn run_with_budget(
        &mut self,
        mode: UpdateMode,
        budget: RecallBudget,
    ) -> HopfieldResult<Recall> {
        if !mode.is_deterministic() {
            return Err(HopfieldError::Configuration(
                "convergence loop only supports deterministic updating",
            ));
        }
        let mut performed: u64 = 0;
        loop {
            if let Some(max) = budget.max_updates {
                if performed >= max {
                    debug!("update budget of {} exhausted without convergence", max);
                    return Err(HopfieldError::NotConverged { updates: self.updates_since_reset });
                }
            }
            performed += 1;
            if self.update(mode)? {
                break;
            }
        }
        debug!("converged after {} updates ({:?})", self.updates_since_reset, mode);
        Ok(Recall { state: self.state(), updates: self.updates_since_reset })
    }
}
