// Backend abstraction for the TUI so the raster can drive any recall engine.

use anyhow::{Context, Result};
use hopfield_core::{HopfieldError, HopfieldNetwork, RecallBudget, UpdateMode};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::Args;
use crate::patterns::{corrupt, random_pattern};

/// Result of a single update step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    pub state: Vec<f64>,
    pub converged: bool,
    /// Updates since the current probe was fed
    pub updates: u64,
    pub energy: f64,
    /// True when the step was refused because the update budget is spent
    pub exhausted: bool,
}

/// Common interface for any recall engine that can drive the TUI.
pub trait RecallBackend {
    /// Perform one update step and report the resulting state.
    fn step(&mut self) -> Result<StepReport>;
    /// Number of units (rows in the raster).
    fn units(&self) -> usize;
    fn state(&self) -> Vec<f64>;
    fn energy(&self) -> f64;
    /// Pattern the current probe was derived from.
    fn target(&self) -> &[f64];
    fn mode(&self) -> UpdateMode;
    fn set_mode(&mut self, mode: UpdateMode);
    /// Feed a freshly corrupted probe of the target pattern.
    fn reprobe(&mut self) -> Result<()>;

    /// Query the per-probe update budget. Default unbounded.
    fn budget(&self) -> RecallBudget {
        RecallBudget::unbounded()
    }
}

/// Implementation backed by hopfield-core.
pub struct CoreBackend {
    network: HopfieldNetwork,
    patterns: Vec<Vec<f64>>,
    flips: usize,
    mode: UpdateMode,
    budget: RecallBudget,
    rng: ChaCha8Rng,
}

impl CoreBackend {
    /// Generate `args.patterns` random patterns, store them all and feed a
    /// corrupted copy of the first one.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut rng = match args.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let patterns: Vec<Vec<f64>> = (0..args.patterns)
            .map(|_| random_pattern(args.size, &mut rng))
            .collect();

        // Unit selection gets its own stream so it does not depend on probe draws.
        let dynamics_rng = ChaCha8Rng::from_rng(&mut rng).context("seeding dynamics rng")?;
        let mut network = HopfieldNetwork::new(args.size)
            .context("creating network")?
            .with_rng(dynamics_rng);
        network.store_all(&patterns).context("storing patterns")?;
        info!("stored {} patterns in a {}-unit network", patterns.len(), args.size);

        let mut backend = Self {
            network,
            patterns,
            flips: args.flips(),
            mode: args.update_mode(),
            budget: args.budget(),
            rng,
        };
        backend.reprobe()?;
        Ok(backend)
    }

    pub fn network(&self) -> &HopfieldNetwork {
        &self.network
    }

    /// Run the current probe to convergence with a deterministic mode.
    /// A spent budget is reported with `exhausted` set and the state reached.
    pub fn run_to_convergence(&mut self) -> Result<StepReport> {
        match self.network.run_with_budget(self.mode, self.budget) {
            Ok(recall) => Ok(StepReport {
                state: recall.state,
                converged: true,
                updates: recall.updates,
                energy: self.network.energy(),
                exhausted: false,
            }),
            Err(HopfieldError::NotConverged { updates }) => Ok(StepReport {
                state: self.network.state(),
                converged: false,
                updates,
                energy: self.network.energy(),
                exhausted: true,
            }),
            Err(err) => Err(err).with_context(|| format!("recall with {:?}", self.mode)),
        }
    }
}

impl RecallBackend for CoreBackend {
    fn step(&mut self) -> Result<StepReport> {
        let updates = self.network.updates_since_reset();
        if let Some(max) = self.budget.max_updates {
            if updates >= max {
                return Ok(StepReport {
                    state: self.network.state(),
                    converged: false,
                    updates,
                    energy: self.network.energy(),
                    exhausted: true,
                });
            }
        }
        let converged = self.network.update(self.mode)?;
        Ok(StepReport {
            state: self.network.state(),
            converged,
            updates: self.network.updates_since_reset(),
            energy: self.network.energy(),
            exhausted: false,
        })
    }

    fn units(&self) -> usize {
        self.network.size()
    }

    fn state(&self) -> Vec<f64> {
        self.network.state()
    }

    fn energy(&self) -> f64 {
        self.network.energy()
    }

    fn target(&self) -> &[f64] {
        &self.patterns[0]
    }

    fn mode(&self) -> UpdateMode {
        self.mode
    }

    fn set_mode(&mut self, mode: UpdateMode) {
        self.mode = mode;
    }

    fn reprobe(&mut self) -> Result<()> {
        let probe = corrupt(&self.patterns[0], self.flips, &mut self.rng);
        self.network.feed(&probe).context("feeding probe")?;
        info!("fed probe with {} flipped units", self.flips);
        Ok(())
    }

    fn budget(&self) -> RecallBudget {
        self.budget
    }
}
