pub mod app;
pub mod core;
pub mod panel;

// Curated re-exports
pub use core::config::{DebugTextConfig, WindowConfig};
pub use panel::{
    spawn_debug_text, spawn_debug_text_with, Cadence, DebugTextCommand, DebugTextContext,
    DebugTextPanel, DebugTextPlugin, PanelSurface, PanelView, TextSource,
};
