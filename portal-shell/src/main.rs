//! portal - headless launcher shell
//!
//! Usage: `portal [CONFIG]`. Input events are read from stdin as JSON lines,
//! shell state is written to stdout as JSON lines, logs go to stderr.

use anyhow::Context;
use crossbeam_channel::bounded;
use portal_core::{resolve_config_path, LauncherConfig};
use portal_shell::{spawn_reader, App, HostEvent, SystemOpener, Viewport};
use std::io::BufReader;
use std::path::PathBuf;

const VIEWPORT_WIDTH_ENV: &str = "PORTAL_VIEWPORT_WIDTH";
const COARSE_POINTER_ENV: &str = "PORTAL_COARSE_POINTER";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config_path = resolve_config_path(explicit);
    ::log::info!("Using config {}", config_path.display());
    let config = LauncherConfig::load_or_default(&config_path);

    let (event_tx, event_rx) = bounded(100);

    let quit_tx = event_tx.clone();
    ctrlc::set_handler(move || {
        // Runs on its own thread, so waiting for room in a full queue is fine.
        if quit_tx.send(HostEvent::Quit).is_err() {
            ::log::warn!("Ctrl-C received but the shell has already stopped");
        }
    })
    .context("failed to install Ctrl-C handler")?;

    let _reader = spawn_reader(BufReader::new(std::io::stdin()), event_tx);

    let stdout = std::io::stdout();
    let mut app = App::new(
        config,
        viewport_from_env(),
        SystemOpener,
        event_rx,
        stdout.lock(),
    );
    app.run().context("failed to write shell state")?;

    Ok(())
}

fn viewport_from_env() -> Viewport {
    let mut viewport = Viewport::default();

    if let Ok(width) = std::env::var(VIEWPORT_WIDTH_ENV) {
        match width.trim().parse::<f64>() {
            Ok(width) if width > 0.0 => viewport.width = width,
            _ => ::log::warn!("Ignoring invalid {}={}", VIEWPORT_WIDTH_ENV, width),
        }
    }
    if let Ok(coarse) = std::env::var(COARSE_POINTER_ENV) {
        viewport.pointer_is_coarse = matches!(coarse.trim(), "1" | "true" | "yes");
    }

    viewport
}
