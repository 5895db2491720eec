//! `tutordesk` — terminal UI for browsing the tutor directory.
//!
//! # Usage
//!
//! ```
//! tutordesk --url http://localhost:5240 --user admin --password secret
//! tutordesk --config ~/.config/tutordesk/config.toml
//! ```

mod app;
mod client;
mod session;
mod ui;

use std::{io, path::Path, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

const DEFAULT_URL: &str = "http://localhost:5240";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tutordesk", about = "Terminal UI for the tutordesk directory")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the tutordesk server (default: http://localhost:5240).
  #[arg(long, env = "TUTORDESK_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "TUTORDESK_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "TUTORDESK_PASSWORD")]
  password: Option<String>,
}

impl Args {
  /// Resolve the connection settings: flag, then config file, then default.
  fn into_api_config(self) -> Result<ApiConfig> {
    let file = match &self.config {
      Some(path) => ConfigFile::load(path)?,
      None => ConfigFile::default(),
    };
    Ok(ApiConfig {
      base_url: layer(self.url, file.url, DEFAULT_URL),
      username: layer(self.user, file.username, ""),
      password: layer(self.password, file.password, ""),
    })
  }
}

/// Pick the first non-empty value: CLI flag wins, then the config file, then
/// the built-in default.
fn layer(flag: Option<String>, file: String, default: &str) -> String {
  match flag {
    Some(v) => v,
    None if !file.is_empty() => file,
    None => default.to_string(),
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

impl ConfigFile {
  fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

// ─── Terminal lifecycle ───────────────────────────────────────────────────────

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_terminal() -> Result<Term> {
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")
}

fn restore_terminal(terminal: &mut Term) {
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let client = ApiClient::new(args.into_api_config()?)?;
  let mut app = App::new(client);

  let mut terminal = setup_terminal()?;
  let result = run(&mut terminal, &mut app).await;
  restore_terminal(&mut terminal);
  result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
  // Initial load failures land in the status bar; the UI still opens so the
  // user can see what went wrong.
  app.refresh().await.ok();

  loop {
    // Fire any debounced search query whose window has elapsed, then paint.
    app.tick().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    let Some(evt) = poll_event()? else { continue };
    match evt {
      Event::Key(key) => {
        if !app.handle_key(key).await? {
          return Ok(());
        }
      }
      // Resize repaints on the next iteration; everything else is ignored.
      _ => {}
    }
  }
}

/// Wait up to 50 ms for a terminal event, yielding to tokio while blocked.
fn poll_event() -> Result<Option<Event>> {
  let evt = tokio::task::block_in_place(|| {
    if event::poll(Duration::from_millis(50))? {
      Ok::<_, io::Error>(Some(event::read()?))
    } else {
      Ok(None)
    }
  })?;
  Ok(evt)
}
