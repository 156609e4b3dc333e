//! Client configuration structures and loaders.
use std::env;

use client_frontend_core::InteractionConfig;

/// Configuration required to bootstrap a local session.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub interaction: InteractionConfig,
    pub sandbox: SandboxConfig,
    pub frames: FrameConfig,
    pub session_id: Option<String>,
}

impl ClientConfig {
    pub const fn new(interaction: InteractionConfig, sandbox: SandboxConfig) -> Self {
        Self {
            interaction,
            sandbox,
            frames: FrameConfig { rate: 30 },
            session_id: None,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SANDBOX_RADIUS` - Radius of the local board in hexes (default: 4)
    /// - `FRAME_RATE` - Frame ticks per second driving animations (default: 30)
    /// - `GAME_SESSION_ID` - Session identifier used for log files (default: auto-generated)
    ///
    /// Interaction settings are read by [`InteractionConfig::from_env`].
    pub fn from_env() -> Self {
        let mut config = Self {
            interaction: InteractionConfig::from_env(),
            ..Self::default()
        };

        if let Some(radius) = read_env::<u32>("SANDBOX_RADIUS") {
            config.sandbox.radius = radius;
        }

        if let Some(rate) = read_env::<u32>("FRAME_RATE") {
            config.frames.rate = rate.max(1);
        }

        config.session_id = env::var("GAME_SESSION_ID").ok();

        config
    }
}

#[derive(Clone, Debug)]
pub struct SandboxConfig {
    pub radius: u32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self { radius: 4 }
    }
}

#[derive(Clone, Debug)]
pub struct FrameConfig {
    pub rate: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { rate: 30 }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
