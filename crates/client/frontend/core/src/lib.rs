//! Presentation state for the skirmish client.
//!
//! Tracks which interaction mode the UI is in, routes hover and click input
//! to it, and aggregates the transient feedback modes publish (highlights,
//! previews, handler slots) into a copy-on-write [`DataStore`] the renderer
//! reads one [`Snapshot`] at a time.
pub mod animation;
pub mod config;
pub mod error;
pub mod focus;
pub mod highlight;
pub mod mode;
pub mod modes;
pub mod preview;
pub mod refcount;
pub mod render;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

pub use animation::{FrameClock, FrameSource, Motion, Tween};
pub use config::{AnimationConfig, InteractionConfig, PreviewConfig};
pub use error::{InteractionError, Result};
pub use focus::{Focus, FocusTarget, Handlers};
pub use highlight::{Highlight, HighlightFlags, Marks};
pub use mode::{Mode, ModeContext, ModeStack, Payload, Transition};
pub use modes::{AnimatingMode, Committed, IdleMode, SelectedMode};
pub use preview::{FloatText, Preview};
pub use refcount::RefCountSet;
pub use render::{Point, Renderer};
pub use session::Session;
pub use store::{Chunk, DataStore, Draft, Snapshot};
