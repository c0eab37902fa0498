use clap::Parser;
use crossterm::event;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use trimosaic::config::Config;
use trimosaic::error::MosaicError;
use trimosaic::state::AppState;
use trimosaic::terminal::{self, Presenter, TerminalSession};
use trimosaic::{Canvas, Mosaic, PerlinNoise, Surface, Viewport};

/// Main function
fn main() -> Result<(), MosaicError> {
    let config = Config::parse();
    init_logging(&config)?;

    match &config.snapshot {
        Some(path) => snapshot(&config, path),
        None => animate(&config),
    }
}

/// Logs go to `--log-file` when given, to stderr for snapshots, and nowhere
/// while the terminal is busy showing the mosaic.
fn init_logging(config: &Config) -> Result<(), MosaicError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else if config.snapshot.is_some() {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

/// Renders one frame off-screen and saves it as PNG
fn snapshot(config: &Config, path: &Path) -> Result<(), MosaicError> {
    let viewport = Viewport::new(config.width, config.height);
    let mut canvas = Canvas::new(0, 0);
    let mosaic = Mosaic::setup(
        &mut canvas,
        viewport,
        config.cell_size,
        PerlinNoise::new(config.seed),
    );
    let mut rng = StdRng::seed_from_u64(config.seed as u64);
    let stats = mosaic.draw(&mut canvas, viewport, config.frame, &mut rng);

    canvas.write_png(BufWriter::new(File::create(path)?))?;
    tracing::info!(
        path = %path.display(),
        frame = config.frame,
        triangles = stats.triangles,
        "snapshot written"
    );
    Ok(())
}

/// Animates the mosaic in the terminal until the user quits
fn animate(config: &Config) -> Result<(), MosaicError> {
    let (cols, rows) = terminal::terminal_size()?;
    let mut state = AppState::new(terminal::viewport_for(cols, rows));

    let mut canvas = Canvas::new(0, 0);
    let mosaic = Mosaic::setup(
        &mut canvas,
        state.viewport,
        config.cell_size,
        PerlinNoise::new(config.seed),
    );
    let mut rng = StdRng::seed_from_u64(config.seed as u64);
    let mut presenter = Presenter::new();
    let mut session = TerminalSession::enter(io::stdout())?;

    let interval = config.frame_interval();
    let mut frames_since_last_update = 0u32;
    let mut last_fps_calculation = Instant::now();
    let mut fps = 0.0;
    let mut dirty = true;

    while !state.quit {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Some(viewport) = terminal::handle_event(&mut state, &event) {
                canvas.resize(viewport.width, viewport.height);
                presenter.invalidate();
                dirty = true;
                tracing::debug!(
                    width = viewport.width,
                    height = viewport.height,
                    "terminal resized"
                );
            }
        }
        if state.quit || state.frame_limit_reached(config.frames) {
            break;
        }

        if !state.paused || dirty {
            let stats = mosaic.draw(&mut canvas, state.viewport, state.clock.frame(), &mut rng);
            presenter.present(session.out(), &canvas)?;
            dirty = false;
            state.drawn += 1;

            if state.debug {
                let text = format!(
                    " {} {} | frame {} | {:.1} fps | {}x{} cells of {:.1}px ",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION"),
                    state.clock.frame(),
                    fps,
                    stats.grid.cols,
                    stats.grid.rows,
                    stats.grid.cell_size,
                );
                presenter.overlay(session.out(), &text)?;
            }
        }
        if state.paused {
            presenter.overlay(session.out(), " Paused ")?;
        }

        // Update FPS calculation
        frames_since_last_update += 1;
        let elapsed = last_fps_calculation.elapsed();
        if elapsed.as_secs_f64() >= 1.0 {
            fps = frames_since_last_update as f64 / elapsed.as_secs_f64();
            frames_since_last_update = 0;
            last_fps_calculation = Instant::now();
            tracing::trace!(fps, "frame rate");
        }

        state.advance();

        if let Some(rest) = interval.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    drop(session);
    tracing::info!(
        frame = state.clock.frame(),
        drawn = state.drawn,
        "animation stopped"
    );
    Ok(())
}
