//! Toggleable on-screen debug text panels.
//!
//! [`DebugTextPanel`] holds the engine-independent logic; [`DebugTextPlugin`]
//! runs it inside a Bevy app against real UI nodes.
pub mod commands;
pub mod context;
#[allow(clippy::module_inception)]
pub mod panel;
pub mod plugin;
pub mod source;
pub mod systems;
pub mod view;
pub mod widgets;

pub use commands::{DebugTextCommand, SharedProducer};
pub use context::{DebugTextContext, PanelId};
pub use panel::{DebugTextPanel, InitOutcome, Lifecycle};
pub use plugin::DebugTextPlugin;
pub use source::{is_blank, Cadence, TextSource};
pub use view::{PanelSurface, PanelView};
pub use widgets::{
    spawn_debug_text, spawn_debug_text_with, ButtonAction, DebugTextButton, DebugTextParts,
};
