pub mod click; // Click-feedback synthesizer
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod output; // Processing contexts (devices, offline)
pub mod prefs; // Persisted sound preferences

pub use click::{ClickConfig, ClickOutcome, ClickSynth};
pub use error::{AudioUnavailable, PrefsError};
pub use prefs::{SoundPreferences, SoundState};

pub const MAX_BLOCK_SIZE: usize = 2048;
