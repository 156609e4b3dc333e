//! Interaction configuration structures and loaders.
//!
//! These settings are shared by every frontend embedding the interaction
//! core (terminal harness, graphical clients).

use std::env;
use std::time::Duration;

/// Interaction-layer configuration.
#[derive(Clone, Debug, Default)]
pub struct InteractionConfig {
    pub animation: AnimationConfig,
    pub preview: PreviewConfig,
}

impl InteractionConfig {
    pub const fn new(animation: AnimationConfig, preview: PreviewConfig) -> Self {
        Self { animation, preview }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MOVE_STEP_MS` - Animation time per hex step in milliseconds (default: 120)
    /// - `STRIKE_MS` - Animation time for a strike in milliseconds (default: 200)
    /// - `PREVIEW_ON_HOVER` - Simulate actions while hovering targets (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("MOVE_STEP_MS") {
            config.animation.step = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("STRIKE_MS") {
            config.animation.strike = Duration::from_millis(ms);
        }
        if let Some(enabled) = read_env_bool("PREVIEW_ON_HOVER") {
            config.preview.on_hover = enabled;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Time spent walking one hex.
    pub step: Duration,
    /// Time spent on a strike before it is committed.
    pub strike: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_millis(120),
            strike: Duration::from_millis(200),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PreviewConfig {
    pub on_hover: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { on_hover: true }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
