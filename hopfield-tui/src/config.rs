// Command-line configuration for recall experiments.

use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use hopfield_core::{RecallBudget, UpdateMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Sync,
    Async,
    Stochastic,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "hopfield-tui")]
#[command(about = "Store random patterns, probe with a corrupted copy and watch the recall")]
pub struct Args {
    /// Number of units in the network
    #[arg(long, default_value_t = 32)]
    pub size: usize,

    /// Number of random patterns to store
    #[arg(long, default_value_t = 3)]
    pub patterns: usize,

    /// Fraction of probe units flipped relative to the target pattern
    #[arg(long, default_value_t = 0.2)]
    pub noise: f64,

    /// Update rule
    #[arg(long, value_enum, default_value_t = ModeArg::Async)]
    pub mode: ModeArg,

    /// Inverse temperature for stochastic updating
    #[arg(long, default_value_t = 2.0)]
    pub beta: f64,

    /// Seed for pattern generation and unit selection (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many updates per probe
    #[arg(long)]
    pub max_updates: Option<u64>,

    /// Raster width in columns (update steps shown)
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Milliseconds between steps while running
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Run one recall without the TUI and print a summary
    #[arg(long)]
    pub headless: bool,

    /// Write log output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.size > 0, "--size must be at least 1");
        ensure!(self.patterns > 0, "--patterns must be at least 1");
        ensure!(
            (0.0..=1.0).contains(&self.noise),
            "--noise must lie in [0, 1], got {}",
            self.noise
        );
        ensure!(
            !self.beta.is_nan() && self.beta >= 0.0,
            "--beta must be non-negative, got {}",
            self.beta
        );
        ensure!(self.width > 0, "--width must be at least 1");
        Ok(())
    }

    pub fn update_mode(&self) -> UpdateMode {
        match self.mode {
            ModeArg::Sync => UpdateMode::Synchronous,
            ModeArg::Async => UpdateMode::AsyncDeterministic,
            ModeArg::Stochastic => UpdateMode::AsyncStochastic { beta: self.beta },
        }
    }

    /// Number of units to flip in each probe.
    pub fn flips(&self) -> usize {
        ((self.noise * self.size as f64).round() as usize).min(self.size)
    }

    pub fn budget(&self) -> RecallBudget {
        RecallBudget { max_updates: self.max_updates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Args::try_parse_from(["hopfield-tui"]).unwrap();
        args.validate().unwrap();
        assert_eq!(args.size, 32);
        assert_eq!(args.update_mode(), UpdateMode::AsyncDeterministic);
        assert_eq!(args.flips(), 6);
        assert_eq!(args.budget(), RecallBudget::unbounded());
        assert!(!args.headless);
    }

    #[test]
    fn stochastic_mode_carries_beta() {
        let args = Args::try_parse_from([
            "hopfield-tui", "--mode", "stochastic", "--beta", "0.5", "--max-updates", "400",
        ])
        .unwrap();
        assert_eq!(args.update_mode(), UpdateMode::AsyncStochastic { beta: 0.5 });
        assert_eq!(args.budget(), RecallBudget::max_updates(400));
    }

    #[test]
    fn validation_rejects_bad_values() {
        for argv in [
            vec!["hopfield-tui", "--size", "0"],
            vec!["hopfield-tui", "--patterns", "0"],
            vec!["hopfield-tui", "--noise", "1.5"],
            vec!["hopfield-tui", "--beta=-1"],
            vec!["hopfield-tui", "--width", "0"],
        ] {
            let args = Args::try_parse_from(argv.iter().copied()).unwrap();
            assert!(args.validate().is_err(), "{:?}", argv);
        }
        assert!(Args::try_parse_from(["hopfield-tui", "--mode", "parallel"]).is_err());
    }
}
