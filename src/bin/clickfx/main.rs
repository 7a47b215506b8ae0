//! clickfx - terminal navigation bar with click feedback
//!
//! Run with: cargo run -- [--offline] [--device <name>]

mod app;
mod ui;

use std::sync::Arc;

use app::App;
use clickfx::{
    output::{AudioBackend, CpalBackend, OfflineBackend},
    prefs::{JsonFileStore, MemoryStore},
    ClickSynth, SoundPreferences,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let offline = args.iter().any(|arg| arg == "--offline");
    let device = args
        .iter()
        .position(|arg| arg == "--device")
        .and_then(|i| args.get(i + 1))
        .cloned();

    let prefs = Arc::new(load_prefs());

    if offline {
        run(ClickSynth::new(OfflineBackend::new(48_000.0), prefs))
    } else {
        let backend = match device {
            Some(name) => CpalBackend::with_device(name),
            None => CpalBackend::new(),
        };
        run(ClickSynth::new(backend, prefs))
    }
}

fn load_prefs() -> SoundPreferences {
    let store = JsonFileStore::default_path()
        .ok_or_else(|| "could not determine config directory".to_string())
        .and_then(|path| JsonFileStore::open_or_reset(path).map_err(|e| e.to_string()));

    match store {
        Ok(store) => SoundPreferences::load(store),
        Err(e) => {
            tracing::warn!("sound preferences unavailable, using defaults: {}", e);
            SoundPreferences::load(MemoryStore::new())
        }
    }
}

fn run<B: AudioBackend>(synth: ClickSynth<B>) -> color_eyre::Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(synth).run(&mut terminal);
    ratatui::restore();
    result
}
