//! `nexus` — terminal operations dashboard for monitored services.
//!
//! # Usage
//!
//! ```text
//! nexus
//! nexus --delay-ms 250 --page-size 5
//! nexus --config ~/.config/nexus/config.toml --log-file /tmp/nexus.log
//! ```

mod app;
mod settings;
mod ui;

use std::{fs::OpenOptions, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use nexus_core::{selection::ViewSelection, source::ServiceSource};
use nexus_mock::MockSource;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nexus", version, about = "Terminal operations dashboard for monitored services")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Artificial load latency in milliseconds (default: 1000).
  #[arg(long)]
  delay_ms: Option<u64>,

  /// Initial page size: 5, 10, 20, or 50 (default: 10).
  #[arg(long)]
  page_size: Option<usize>,

  /// JSON file of service records to serve instead of the built-in fleet.
  #[arg(long, value_name = "FILE")]
  data: Option<PathBuf>,

  /// Start in simulate-error mode.
  #[arg(long)]
  simulate_error: bool,

  /// Write logs to this file.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

impl Args {
  /// Flags override the config file and environment.
  fn apply(self, mut settings: Settings) -> Result<Settings> {
    if let Some(ms) = self.delay_ms {
      settings.delay_ms = ms;
    }
    if let Some(size) = self.page_size {
      settings.page_size = size;
    }
    if self.data.is_some() {
      settings.data_path = self.data;
    }
    if self.log_file.is_some() {
      settings.log_file = self.log_file;
    }
    settings.simulate_error |= self.simulate_error;
    settings.validate()
  }
}

// ─── Logging ──────────────────────────────────────────────────────────────────

/// Send tracing output to `path`; the terminal belongs to the UI.
fn init_logging(path: &std::path::Path) -> Result<()> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref())?;
  let settings = args.apply(settings)?;

  if let Some(path) = &settings.log_file {
    init_logging(path)?;
  }
  tracing::info!(?settings, "starting dashboard");

  let source = match &settings.data_path {
    Some(path) => MockSource::from_path(path, settings.delay()).await,
    None => MockSource::builtin(settings.delay()),
  }
  .context("preparing service source")?;

  let selection = ViewSelection::new(settings.page_size)?;
  let mut app = App::new(source, selection, settings.simulate_error);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Kick off the initial load; the loop renders the skeleton meanwhile.
  app.request_load();

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<S: ServiceSource + 'static>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    app.poll_loads();
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    match maybe_event {
      Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Resize and other events redraw on the next iteration.
      _ => {}
    }
  }

  Ok(())
}
