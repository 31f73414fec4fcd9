//! Best-score bookkeeping
//!
//! The simulation only exposes `score`, `mode` and `status`. The host
//! watches published states with a [`BestScoreTracker`] and, when a
//! finished arena run beats the stored best, writes it through a
//! [`BestScoreStore`]. Writes are fire-and-forget; failures are logged
//! by the store and never retried.

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, GameState, GameStatus};

/// Where the best score lives (a backend, LocalStorage, memory)
pub trait BestScoreStore {
    fn best(&self) -> u32;
    fn submit(&mut self, score: u32);
}

/// Volatile store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u32,
    submissions: Vec<u32>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            best,
            submissions: Vec::new(),
        }
    }

    pub fn submissions(&self) -> &[u32] {
        &self.submissions
    }
}

impl BestScoreStore for MemoryStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn submit(&mut self, score: u32) {
        self.submissions.push(score);
        self.best = self.best.max(score);
    }
}

/// Stored record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Browser store keeping the record in LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    record: BestScoreRecord,
}

impl LocalStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bacon_ops_best_score";

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<BestScoreRecord>(&json) {
                    Ok(record) => {
                        log::info!("Loaded best score {}", record.score);
                        return Self { record };
                    }
                    Err(e) => log::warn!("Ignoring malformed best score: {}", e),
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(target_arch = "wasm32")]
    fn persist(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match (storage, serde_json::to_string(&self.record)) {
            (Some(storage), Ok(json)) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Best score write rejected by storage");
                }
            }
            _ => log::warn!("Best score not saved: storage unavailable"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persist(&self) {
        // No-op for native
    }
}

impl BestScoreStore for LocalStore {
    fn best(&self) -> u32 {
        self.record.score
    }

    fn submit(&mut self, score: u32) {
        #[cfg(target_arch = "wasm32")]
        let timestamp = js_sys::Date::now();
        #[cfg(not(target_arch = "wasm32"))]
        let timestamp = 0.0;

        self.record = BestScoreRecord { score, timestamp };
        self.persist();
        log::info!("Best score saved: {}", score);
    }
}

/// Watches published states and reports a new best exactly once per run
#[derive(Debug, Clone, Default)]
pub struct BestScoreTracker {
    last_status: Option<GameStatus>,
}

impl BestScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous run (call when a new session starts)
    pub fn reset(&mut self) {
        self.last_status = None;
    }

    /// Score to submit, if `state` just entered game over with a new best
    ///
    /// Only arena runs by authenticated players count.
    pub fn observe(&mut self, state: &GameState, authenticated: bool, current_best: u32) -> Option<u32> {
        let entered_game_over = state.status == GameStatus::GameOver
            && self.last_status != Some(GameStatus::GameOver);
        self.last_status = Some(state.status);

        let qualifies = entered_game_over
            && state.mode == GameMode::Arena
            && authenticated
            && state.score > 0
            && state.score > current_best;
        qualifies.then_some(state.score)
    }

    /// Observe and, if warranted, write through `store`
    pub fn record(&mut self, state: &GameState, authenticated: bool, store: &mut dyn BestScoreStore) -> Option<u32> {
        let score = self.observe(state, authenticated, store.best())?;
        store.submit(score);
        Some(score)
    }
}
