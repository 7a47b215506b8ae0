//! Sound preferences: an enabled flag and a volume, persisted in a
//! [`KeyValueStore`].
//!
//! Values are read once when [`SoundPreferences::load`] runs and written
//! through on every change. Volume is kept in `[0, 1]`: finite values are
//! clamped at the setter, NaN and infinities are rejected.

use parking_lot::RwLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

/// Key/value backends for preferences.
pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

pub const ENABLED_KEY: &str = "soundEnabled";
pub const VOLUME_KEY: &str = "soundVolume";

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundState {
    pub enabled: bool,
    pub volume: f32,
}

impl Default for SoundState {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
        }
    }
}

impl SoundState {
    /// Volume a click should play at, or `None` when it should stay silent.
    pub fn audible_volume(&self) -> Option<f32> {
        (self.enabled && self.volume != 0.0).then_some(self.volume)
    }
}

pub struct SoundPreferences {
    store: Box<dyn KeyValueStore>,
    state: RwLock<SoundState>,
}

impl SoundPreferences {
    /// Read persisted values from `store`, falling back to defaults.
    pub fn load(store: impl KeyValueStore + 'static) -> Self {
        let mut state = SoundState::default();

        if let Some(saved) = store.get(ENABLED_KEY) {
            state.enabled = saved == "true";
        }

        if let Some(saved) = store.get(VOLUME_KEY) {
            match saved.trim().parse::<f32>() {
                Ok(volume) if volume.is_finite() => state.volume = volume.clamp(0.0, 1.0),
                _ => tracing::warn!("ignoring unreadable saved volume {:?}", saved),
            }
        }

        tracing::debug!(enabled = state.enabled, volume = state.volume, "loaded sound preferences");

        Self {
            store: Box::new(store),
            state: RwLock::new(state),
        }
    }

    pub fn snapshot(&self) -> SoundState {
        *self.state.read()
    }

    pub fn enabled(&self) -> bool {
        self.state.read().enabled
    }

    pub fn volume(&self) -> f32 {
        self.state.read().volume
    }

    /// Flip the enabled flag and return the new value.
    pub fn toggle_sound(&self) -> Result<bool, PrefsError> {
        let mut state = self.state.write();
        state.enabled = !state.enabled;
        self.store
            .set(ENABLED_KEY, if state.enabled { "true" } else { "false" })?;
        Ok(state.enabled)
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<(), PrefsError> {
        let mut state = self.state.write();
        state.enabled = enabled;
        self.store
            .set(ENABLED_KEY, if enabled { "true" } else { "false" })
    }

    /// Set the volume, clamped into `[0, 1]`. Returns the value stored.
    pub fn set_volume(&self, volume: f32) -> Result<f32, PrefsError> {
        if !volume.is_finite() {
            return Err(PrefsError::InvalidVolume(volume));
        }

        let volume = volume.clamp(0.0, 1.0);
        let mut state = self.state.write();
        state.volume = volume;
        self.store.set(VOLUME_KEY, &volume.to_string())?;
        Ok(volume)
    }
}

impl std::fmt::Debug for SoundPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundPreferences")
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}
