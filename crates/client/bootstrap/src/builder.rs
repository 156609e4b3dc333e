//! Builds the engine, renderer and session bundle used by front-ends.
use anyhow::{Result, ensure};
use client_frontend_core::{IdleMode, Session};
use tracing::info;

use crate::config::ClientConfig;
use crate::renderer::HeadlessRenderer;
use crate::sandbox::SandboxEngine;

/// Smallest board the default skirmish layout fits on.
pub const MIN_SKIRMISH_RADIUS: u32 = 3;

pub type LocalSession = Session<SandboxEngine, HeadlessRenderer>;

/// Builder that assembles a local session for clients.
pub struct SessionBuilder {
    config: ClientConfig,
    engine: Option<SandboxEngine>,
    renderer: HeadlessRenderer,
}

impl SessionBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            engine: None,
            renderer: HeadlessRenderer::default(),
        }
    }

    /// Provide a custom engine instead of the default skirmish.
    pub fn engine(mut self, engine: SandboxEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn renderer(mut self, renderer: HeadlessRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn build(self) -> Result<SessionSetup> {
        let engine = match self.engine {
            Some(engine) => engine,
            None => {
                let radius = self.config.sandbox.radius;
                ensure!(
                    radius >= MIN_SKIRMISH_RADIUS,
                    "sandbox radius {radius} is below the minimum of {MIN_SKIRMISH_RADIUS}"
                );
                SandboxEngine::skirmish(radius)?
            }
        };

        info!(
            target: "bootstrap::sandbox",
            radius = engine.radius(),
            creatures = engine.creatures().count(),
            "sandbox ready"
        );

        let session = Session::bootstrap(
            IdleMode::new(),
            engine,
            self.renderer,
            self.config.interaction.clone(),
        );

        Ok(SessionSetup {
            config: self.config,
            session,
        })
    }
}

pub struct SessionSetup {
    pub config: ClientConfig,
    pub session: LocalSession,
}
