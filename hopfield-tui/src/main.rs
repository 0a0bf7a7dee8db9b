//! TUI entrypoint: renders a 2D unit-state raster (updates on X, unit IDs on Y)
//! while a corrupted probe relaxes toward a stored pattern.
//! Controls: [s] Step, [r] Run/Pause, [m] Mode, [f] New probe, [q] Quit

mod app;
mod backend;
mod config;
mod patterns;
mod ui;

use anyhow::{Context, Result};
use app::App;
use backend::{CoreBackend, RecallBackend};
use clap::Parser;
use config::Args;
use patterns::overlap;
use ui::draw;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};

fn init_logging(args: &Args) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !args.headless {
        // Raw-mode terminal: stay silent unless a log file is given.
        return Ok(());
    }
    builder.init();
    Ok(())
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    // Leave alternate screen and show cursor
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// One recall without the TUI. Deterministic modes use the convergence loop;
/// stochastic mode is driven manually until the pseudo-stability signal or
/// the budget stops it.
fn run_headless(args: &Args) -> Result<()> {
    let mut backend = CoreBackend::from_args(args)?;
    let start = backend.state();
    println!(
        "probe: {} units, {} flipped, overlap {:+.3}",
        backend.units(),
        args.flips(),
        overlap(&start, backend.target())
    );

    let mode = backend.mode();
    let last = if mode.is_deterministic() {
        backend.run_to_convergence()?
    } else {
        let max = args.max_updates.unwrap_or(100 * args.size as u64);
        let mut last = backend.step()?;
        while !last.converged && !last.exhausted && last.updates < max {
            last = backend.step()?;
        }
        last
    };

    println!(
        "mode {:?}: {} after {} updates, energy {:.3}, overlap {:+.3}, pseudo-stable units {}/{}",
        mode,
        if last.converged { "converged" } else { "stopped" },
        last.updates,
        last.energy,
        overlap(&last.state, backend.target()),
        backend.network().pseudo_stable_flags().iter().filter(|&&s| s).count(),
        backend.units()
    );
    Ok(())
}

fn run_tui(args: &Args) -> Result<()> {
    let backend = CoreBackend::from_args(args)?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let mut app = App::new(backend, args.width, args.beta);
    let tick_rate = Duration::from_millis(args.tick_ms);
    let mut last_tick = Instant::now();

    let outcome = event_loop(&mut terminal, &mut app, tick_rate, &mut last_tick);

    restore_terminal()?;
    outcome
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<CoreBackend>,
    tick_rate: Duration,
    last_tick: &mut Instant,
) -> Result<()> {
    loop {
        draw(terminal, app)?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('s') => app.step()?,
                    KeyCode::Char('r') => app.toggle_running(),
                    KeyCode::Char('m') => app.cycle_mode(),
                    KeyCode::Char('f') => app.reprobe()?,
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.step()?;
            }
            *last_tick = Instant::now();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    init_logging(&args)?;

    if args.headless {
        run_headless(&args)
    } else {
        run_tui(&args)
    }
}
