//! Presentation preferences
//!
//! Read from the page URL query string (`?volume=0.5&mute=1&debug=1`).
//! Nothing is written back; unknown or malformed parameters are ignored.

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all sound effects
    pub muted: bool,

    // === Debug ===
    /// Outline projectile and enemy hitboxes
    pub debug_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            debug_overlay: false,
        }
    }
}

impl Settings {
    /// Build settings from a URL query string (leading `?` optional)
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            match key {
                "volume" => {
                    if let Some(vol) = parse_volume(value) {
                        settings.master_volume = vol;
                    }
                }
                "sfx" => {
                    if let Some(vol) = parse_volume(value) {
                        settings.sfx_volume = vol;
                    }
                }
                "mute" => {
                    if let Some(flag) = parse_flag(value) {
                        settings.muted = flag;
                    }
                }
                "debug" => {
                    if let Some(flag) = parse_flag(value) {
                        settings.debug_overlay = flag;
                    }
                }
                _ => log::debug!("Ignoring unknown setting '{}'", key),
            }
        }

        settings
    }

    /// Load settings from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Settings: {:?}", settings);
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(Settings::from_query(""), Settings::default());
        assert_eq!(Settings::from_query("?"), Settings::default());
    }

    #[test]
    fn test_parses_known_keys() {
        let s = Settings::from_query("?volume=0.5&sfx=0.25&mute=true&debug=1");
        assert_eq!(s.master_volume, 0.5);
        assert_eq!(s.sfx_volume, 0.25);
        assert!(s.muted);
        assert!(s.debug_overlay);
    }

    #[test]
    fn test_bare_flag_means_on() {
        let s = Settings::from_query("debug");
        assert!(s.debug_overlay);
    }

    #[test]
    fn test_volume_is_clamped() {
        let s = Settings::from_query("volume=7");
        assert_eq!(s.master_volume, 1.0);
        let s = Settings::from_query("volume=-2");
        assert_eq!(s.master_volume, 0.0);
    }

    #[test]
    fn test_garbage_is_ignored() {
        let s = Settings::from_query("volume=loud&mute=maybe&colour=red");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_effective_volume() {
        let mut s = Settings::from_query("volume=0.5&sfx=0.5");
        assert!((s.effective_volume() - 0.25).abs() < 1e-6);
        s.muted = true;
        assert_eq!(s.effective_volume(), 0.0);
    }
}
