use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::PrefsError;

/// String key/value persistence for preferences.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Default location in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "clickfx", "clickfx")
            .map(|dirs| dirs.config_dir().join("prefs.json"))
    }

    /// Open the store at the default location.
    pub fn open_default() -> Result<Self, PrefsError> {
        let path = Self::default_path()
            .ok_or_else(|| PrefsError::Io("Could not determine config directory".to_string()))?;
        Self::open(path)
    }

    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let entries = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| PrefsError::Io(e.to_string()))?;
            serde_json::from_str(&content).map_err(|e| PrefsError::Parse(e.to_string()))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Like [`open`](Self::open), but an unparseable file is treated as
    /// empty. The first `set` overwrites it with valid JSON.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(PrefsError::Parse(e)) => {
                tracing::warn!(
                    "preferences at {} are corrupt, starting from defaults: {}",
                    path.display(),
                    e
                );
                Ok(Self {
                    path,
                    entries: Mutex::new(BTreeMap::new()),
                })
            }
            result => result,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PrefsError::Io(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| PrefsError::Parse(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| PrefsError::Io(e.to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }
}
