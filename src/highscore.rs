//! Best-score persistence
//!
//! The best score is a single integer, read once at startup and written on
//! game-over when beaten. Stored as JSON text; anything missing or
//! unparseable counts as 0.

/// Where the best score lives between sessions
pub trait HighScoreStore {
    /// Stored best score, 0 if absent or corrupt
    fn load(&self) -> u64;
    /// Overwrite the stored best score
    fn save(&mut self, best: u64);
}

/// Parse a stored value. Degenerate data is replaced with 0.
pub fn parse_high_score(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };
    match serde_json::from_str::<u64>(raw.trim()) {
        Ok(best) => best,
        Err(e) => {
            log::warn!("Ignoring unreadable high score {:?}: {}", raw, e);
            0
        }
    }
}

/// Encode a best score for storage
pub fn encode_high_score(best: u64) -> String {
    best.to_string()
}

/// Keeps the raw stored text in memory. Used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    /// Number of saves performed
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from arbitrary stored text (possibly malformed)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        parse_high_score(self.raw.as_deref())
    }

    fn save(&mut self, best: u64) {
        self.raw = Some(encode_high_score(best));
        self.writes += 1;
    }
}

/// Browser LocalStorage backend
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Default LocalStorage key
    pub const STORAGE_KEY: &'static str = "hop_runner_best";

    pub fn new() -> Self {
        Self {
            key: Self::STORAGE_KEY,
        }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(self.key).ok().flatten());
        let best = parse_high_score(raw.as_deref());
        log::info!("Loaded high score {}", best);
        best
    }

    fn save(&mut self, best: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(self.key, &encode_high_score(best))
                    .is_err()
                {
                    log::warn!("Could not write high score to LocalStorage");
                } else {
                    log::info!("High score saved ({})", best);
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}
