// Application state for the TUI, including a circular 2D unit-state raster.

use anyhow::Result;
use hopfield_core::UpdateMode;

use crate::backend::RecallBackend;
use crate::patterns::overlap;

pub const UNIT_UP: char = '█';
pub const UNIT_DOWN: char = '·';

pub struct App<B: RecallBackend> {
    pub backend: B,
    pub tick: u64,
    pub width: usize,             // number of columns (update window)
    pub raster: Vec<Vec<char>>,   // [unit][col]
    pub running: bool,
    pub converged: bool,
    pub exhausted: bool,
    pub energy: f64,
    pub overlap: f64,
    beta: f64,
}

impl<B: RecallBackend> App<B> {
    /// `beta` is used when cycling into stochastic mode.
    pub fn new(backend: B, width: usize, beta: f64) -> Self {
        let n = backend.units();
        let mut app = Self {
            backend,
            tick: 0,
            width,
            raster: vec![vec![' '; width]; n],
            running: false,
            converged: false,
            exhausted: false,
            energy: 0.0,
            overlap: 0.0,
            beta,
        };
        app.show_probe();
        app
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Advance the network by one update and paint the resulting state into
    /// the current raster column.
    pub fn step(&mut self) -> Result<()> {
        if self.exhausted {
            self.running = false;
            return Ok(());
        }
        let report = self.backend.step()?;
        if report.exhausted {
            self.exhausted = true;
            self.running = false;
            return Ok(());
        }

        self.tick = self.tick.saturating_add(1);
        let col = (self.tick as usize) % self.width;
        self.paint_column(col, &report.state);

        self.converged = report.converged;
        self.energy = report.energy;
        self.overlap = overlap(&report.state, self.backend.target());

        // Stochastic convergence is only a pseudo-stability hint; keep running.
        if self.converged && self.backend.mode().is_deterministic() {
            self.running = false;
        }
        Ok(())
    }

    /// Sync -> async -> stochastic -> sync.
    pub fn cycle_mode(&mut self) {
        let next = match self.backend.mode() {
            UpdateMode::Synchronous => UpdateMode::AsyncDeterministic,
            UpdateMode::AsyncDeterministic => UpdateMode::AsyncStochastic { beta: self.beta },
            UpdateMode::AsyncStochastic { .. } => UpdateMode::Synchronous,
        };
        self.backend.set_mode(next);
        self.converged = false;
    }

    /// Feed a new corrupted probe and restart the raster.
    pub fn reprobe(&mut self) -> Result<()> {
        self.backend.reprobe()?;
        self.tick = 0;
        self.converged = false;
        self.exhausted = false;
        for row in self.raster.iter_mut() {
            row.fill(' ');
        }
        self.show_probe();
        Ok(())
    }

    fn show_probe(&mut self) {
        let state = self.backend.state();
        self.paint_column(0, &state);
        self.energy = self.backend.energy();
        self.overlap = overlap(&state, self.backend.target());
    }

    fn paint_column(&mut self, col: usize, state: &[f64]) {
        for (row, &v) in state.iter().enumerate() {
            if let Some(cells) = self.raster.get_mut(row) {
                cells[col] = if v > 0.0 { UNIT_UP } else { UNIT_DOWN };
            }
        }
    }
}
