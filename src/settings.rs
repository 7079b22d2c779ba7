//! Player preferences
//!
//! Read from the page URL query string (`?mute=1&volume=0.5&seed=42`).
//! Nothing is stored between visits.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Session ===
    /// Fixed RNG seed (random per page load when absent)
    pub seed: Option<u64>,
    /// Let the autopilot play
    pub demo: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 0.7,
            music_volume: 1.0,
            muted: false,
            show_fps: false,
            seed: None,
            demo: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn set<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

impl Settings {
    /// Apply `key=value` pairs from a query string on top of the defaults.
    ///
    /// Unknown keys and unparsable values are logged and skipped.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "mute" | "muted" => set(&mut settings.muted, parse_flag(value)),
                "volume" => set(&mut settings.master_volume, parse_volume(value)),
                "sfx" => set(&mut settings.sfx_volume, parse_volume(value)),
                "music" => set(&mut settings.music_volume, parse_volume(value)),
                "fps" => set(&mut settings.show_fps, parse_flag(value)),
                "demo" => set(&mut settings.demo, parse_flag(value)),
                "seed" => set(&mut settings.seed, value.parse::<u64>().ok().map(Some)),
                _ => {
                    log::warn!("Ignoring unknown setting `{key}`");
                    continue;
                }
            };
            if !applied {
                log::warn!("Ignoring bad value `{value}` for setting `{key}`");
            }
        }

        settings
    }

    /// Effective music gain
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Effective sound effect gain
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&search);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
