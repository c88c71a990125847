pub mod config;
pub mod hot_reload;

pub use config::{DebugTextConfig, PanelColors, PanelConfig, WindowConfig};
pub use hot_reload::{ConfigHotReloadPlugin, ConfigReloadSettings};
