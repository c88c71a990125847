use std::fmt;

/// Where a panel's text comes from.
pub enum TextSource {
    Static(String),
    Producer(Box<dyn Fn() -> String + Send + Sync>),
}

impl TextSource {
    pub fn producer(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Producer(Box::new(f))
    }

    pub fn produce(&self) -> String {
        match self {
            Self::Static(text) => text.clone(),
            Self::Producer(f) => f(),
        }
    }
}

impl fmt::Debug for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(text) => f.debug_tuple("Static").field(text).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// How often an open panel re-polls its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    /// Seconds between refreshes; 0 refreshes every tick.
    pub interval: f32,
    pub needs_update: bool,
}

impl Cadence {
    pub const STATIC: Self = Self {
        interval: 0.0,
        needs_update: false,
    };
    pub const EVERY_SECOND: Self = Self {
        interval: 1.0,
        needs_update: true,
    };
    pub const EVERY_FRAME: Self = Self {
        interval: 0.0,
        needs_update: true,
    };
}

impl Default for Cadence {
    fn default() -> Self {
        Self::STATIC
    }
}

/// Blank text (empty or whitespace only) hides the whole panel.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
