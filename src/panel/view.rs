//! The seam between panel logic and whatever actually draws the widgets.
use bevy::prelude::*;

/// Widgets a debug text panel drives. Implemented by the host.
pub trait PanelView {
    /// Whole panel on/off, independent of the open/closed toggle.
    fn set_root_active(&mut self, active: bool);
    /// `true` shows the open (content) sub-panel and hides the closed (button) one.
    fn set_open_layout(&mut self, open: bool);
    fn set_alpha(&mut self, alpha: f32);
    fn text(&self) -> &str;
    fn set_text(&mut self, text: &str);
    /// Size of the text rectangle as last measured by the host's layout pass.
    fn measured_text_size(&self) -> Vec2;
    fn set_background_size(&mut self, size: Vec2);
}

/// Retained mirror of a panel's widgets.
///
/// Panel logic writes here; the Bevy layer copies changes onto the real UI
/// nodes and feeds measured sizes back in after layout.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PanelSurface {
    pub root_active: bool,
    pub open: bool,
    pub alpha: f32,
    pub text: String,
    pub measured_text_size: Vec2,
    pub background_size: Option<Vec2>,
    /// Incremented on every actual text write.
    pub text_writes: u32,
}

impl Default for PanelSurface {
    fn default() -> Self {
        Self {
            root_active: false,
            open: false,
            alpha: 1.0,
            text: String::new(),
            measured_text_size: Vec2::ZERO,
            background_size: None,
            text_writes: 0,
        }
    }
}

/// Cheap fingerprint of a surface; `text_writes` stands in for the text itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRevision {
    root_active: bool,
    open: bool,
    alpha: f32,
    text_writes: u32,
    measured_text_size: Vec2,
    background_size: Option<Vec2>,
}

impl PanelSurface {
    pub fn revision(&self) -> SurfaceRevision {
        SurfaceRevision {
            root_active: self.root_active,
            open: self.open,
            alpha: self.alpha,
            text_writes: self.text_writes,
            measured_text_size: self.measured_text_size,
            background_size: self.background_size,
        }
    }
}

impl PanelView for PanelSurface {
    fn set_root_active(&mut self, active: bool) {
        self.root_active = active;
    }

    fn set_open_layout(&mut self, open: bool) {
        self.open = open;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.text_writes += 1;
    }

    fn measured_text_size(&self) -> Vec2 {
        self.measured_text_size
    }

    fn set_background_size(&mut self, size: Vec2) {
        self.background_size = Some(size);
    }
}

