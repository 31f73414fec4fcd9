//! Player preferences
//!
//! Persisted as JSON in LocalStorage, separately from scores.

use serde::{Deserialize, Serialize};

use crate::input::{prefers_touch, touch::JOYSTICK_MAX_DISTANCE};

/// Which input adapter drives the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    /// Pick from the viewport at session start
    #[default]
    Auto,
    KeyboardMouse,
    Touch,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Auto => "Auto",
            ControlScheme::KeyboardMouse => "Keyboard + Mouse",
            ControlScheme::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(ControlScheme::Auto),
            "keyboard" | "keyboardmouse" | "desktop" => Some(ControlScheme::KeyboardMouse),
            "touch" => Some(ControlScheme::Touch),
            _ => None,
        }
    }

    /// Whether this scheme uses the touch adapter on the given viewport
    pub fn uses_touch(&self, viewport_width: f64, has_touch: bool) -> bool {
        match self {
            ControlScheme::Auto => prefers_touch(viewport_width, has_touch),
            ControlScheme::KeyboardMouse => false,
            ControlScheme::Touch => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub control_scheme: ControlScheme,

    // === Visuals ===
    /// Health bars above enemies
    pub show_health_bars: bool,
    /// Faint line from the player to the aim target
    pub show_aim_line: bool,

    // === Input ===
    /// Keyboard/mouse sampling period (ms)
    pub input_sample_interval_ms: u32,
    /// Virtual joystick knob travel (CSS px)
    pub joystick_max_distance: f32,

    /// Pause when the tab is hidden or the window loses focus
    pub auto_pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::Auto,
            show_health_bars: true,
            show_aim_line: false,
            input_sample_interval_ms: 16,
            joystick_max_distance: JOYSTICK_MAX_DISTANCE,
            auto_pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bacon_ops_settings";

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Keep tunables in usable ranges
    pub fn sanitized(mut self) -> Self {
        self.input_sample_interval_ms = self.input_sample_interval_ms.clamp(4, 100);
        if !self.joystick_max_distance.is_finite() || self.joystick_max_distance < 10.0 {
            self.joystick_max_distance = JOYSTICK_MAX_DISTANCE;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings write rejected by storage");
                } else {
                    log::info!("Settings saved");
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
