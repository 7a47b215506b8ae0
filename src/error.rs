//! Error types.

use std::fmt;

/// The audio layer could not produce a click.
///
/// Covers every way a playback session can fail, from a missing device to a
/// stream that refuses to start. `ClickSynth::trigger` discards it.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioUnavailable {
    /// No output device on the host (or the named one is gone).
    NoDevice,
    /// The device would not report a usable output configuration.
    Config(String),
    /// The device only accepts a sample format we don't render.
    UnsupportedFormat(String),
    /// Building or starting the output stream failed.
    Stream(String),
    /// The context was used after it was closed.
    Closed,
    /// The playback worker could not be started.
    Worker(String),
}

impl fmt::Display for AudioUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioUnavailable::NoDevice => write!(f, "no output device available"),
            AudioUnavailable::Config(e) => write!(f, "output config error: {}", e),
            AudioUnavailable::UnsupportedFormat(format) => {
                write!(f, "unsupported sample format: {}", format)
            }
            AudioUnavailable::Stream(e) => write!(f, "output stream error: {}", e),
            AudioUnavailable::Closed => write!(f, "audio context already closed"),
            AudioUnavailable::Worker(e) => write!(f, "playback worker error: {}", e),
        }
    }
}

impl std::error::Error for AudioUnavailable {}

/// Errors reading or writing sound preferences.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefsError {
    Io(String),
    Parse(String),
    /// Volume was NaN or infinite; the stored value is left alone.
    InvalidVolume(f32),
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::Io(e) => write!(f, "IO error: {}", e),
            PrefsError::Parse(e) => write!(f, "Parse error: {}", e),
            PrefsError::InvalidVolume(v) => write!(f, "invalid volume: {}", v),
        }
    }
}

impl std::error::Error for PrefsError {}
