//! Best-distance persistence
//!
//! A single integer under one LocalStorage key. Writes are fire-and-forget;
//! a missing or malformed value reads as zero, never as an error.

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "neon-sprint::highscore";

/// Load the stored best distance (WASM only); 0 when absent or unparseable
#[cfg(target_arch = "wasm32")]
pub fn load_best_score() -> u64 {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
            match serde_json::from_str::<u64>(&raw) {
                Ok(score) => {
                    log::info!("Loaded best score: {score}");
                    return score;
                }
                Err(_) => {
                    log::warn!("Stored best score is malformed, treating as 0");
                    return 0;
                }
            }
        }
    }

    log::info!("No stored best score, starting fresh");
    0
}

/// Persist a new best distance (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn save_best_score(score: u64) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        if let Ok(payload) = serde_json::to_string(&score) {
            let _ = storage.set_item(STORAGE_KEY, &payload);
            log::info!("Best score saved: {score}");
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_best_score() -> u64 {
    0
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_best_score(_score: u64) {
    // No-op for native
}

#[cfg(test)]
mod tests {
    #[test]
    fn integer_payload_round_trips() {
        let payload = serde_json::to_string(&1234u64).unwrap();
        assert_eq!(payload, "1234");
        assert_eq!(serde_json::from_str::<u64>(&payload).unwrap(), 1234);
    }

    #[test]
    fn malformed_payloads_fail_to_parse() {
        assert!(serde_json::from_str::<u64>("not a score").is_err());
        assert!(serde_json::from_str::<u64>("-5").is_err());
        assert!(serde_json::from_str::<u64>("").is_err());
    }
}
