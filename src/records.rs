//! Durable best-score record
//!
//! Exactly one integer survives restarts: LocalStorage on web, a JSON file
//! under the platform data directory on native. A missing, corrupt, or
//! unavailable store reads as zero and never fails the session; at worst the
//! record loses durability until the next successful write.

use serde::{Deserialize, Serialize};

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_friend_best";

    pub fn new(score: u32) -> Self {
        Self { score }
    }

    /// Decode a stored record, treating malformed payloads as no record.
    /// Older builds stored the bare integer, so that form is accepted too.
    fn decode(raw: &str) -> Self {
        if let Ok(record) = serde_json::from_str::<Self>(raw) {
            return record;
        }
        match raw.trim().parse::<u32>() {
            Ok(score) => Self { score },
            Err(_) => {
                log::warn!("Best score record corrupt, resetting to 0");
                Self::default()
            }
        }
    }

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let record = Self::decode(&raw);
                log::info!("Loaded best score {}", record.score);
                return record;
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved ({})", self.score);
            }
        }
    }

    /// Load the record from the data directory (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = storage_path() else {
            log::warn!("No data directory available, best score will not persist");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let record = Self::decode(&raw);
                log::info!("Loaded best score {} from {}", record.score, path.display());
                record
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("Could not read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Save the record to the data directory (native). The write goes to a
    /// temp file first and renames over the old record, so a crash mid-write
    /// cannot truncate it.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = storage_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::warn!("Could not create {}: {err}", parent.display());
                return;
            }
        }
        if let Ok(json) = serde_json::to_string(self) {
            match write_replacing(&path, &json) {
                Ok(()) => log::info!("Best score saved ({})", self.score),
                Err(err) => log::warn!("Could not write {}: {err}", path.display()),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn storage_path() -> Option<std::path::PathBuf> {
    dirs::data_dir().map(|dir| dir.join("flappy-friend").join("best_score.json"))
}

/// Write via a sibling temp file and an atomic rename; the previous record
/// stays intact if the process dies between the two steps.
#[cfg(not(target_arch = "wasm32"))]
fn write_replacing(path: &std::path::Path, contents: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_current_format() {
        assert_eq!(BestScore::decode(r#"{"score":42}"#), BestScore::new(42));
    }

    #[test]
    fn decodes_legacy_bare_integer() {
        assert_eq!(BestScore::decode("17"), BestScore::new(17));
        assert_eq!(BestScore::decode("  17\n"), BestScore::new(17));
    }

    #[test]
    fn corruption_reads_as_zero() {
        assert_eq!(BestScore::decode("not a score"), BestScore::default());
        assert_eq!(BestScore::decode(r#"{"score":-5}"#), BestScore::default());
        assert_eq!(BestScore::decode(""), BestScore::default());
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&BestScore::new(9)).unwrap();
        assert_eq!(BestScore::decode(&json), BestScore::new(9));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn rewrite_replaces_the_record_and_leaves_no_temp() {
        let dir = std::env::temp_dir().join(format!("flappy-friend-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("best_score.json");

        write_replacing(&path, r#"{"score":3}"#).unwrap();
        write_replacing(&path, r#"{"score":7}"#).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(BestScore::decode(&raw), BestScore::new(7));
        assert!(!path.with_extension("json.tmp").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
