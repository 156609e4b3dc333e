//! Shared bootstrap utilities for client front-ends.
//!
//! Provides configuration loading, the local sandbox engine, a headless
//! screen layout, and session setup that CLI or graphical front-ends reuse.
pub mod builder;
pub mod config;
pub mod renderer;
pub mod sandbox;

pub use builder::{LocalSession, SessionBuilder, SessionSetup};
pub use config::{ClientConfig, FrameConfig, SandboxConfig};
pub use renderer::HeadlessRenderer;
pub use sandbox::SandboxEngine;
