use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Debug Text".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    /// Padding added to the measured text size when fitting the background.
    pub size_offset: (f32, f32),
    pub top: f32,
    pub left: f32,
    /// Vertical gap between stacked panels spawned by the demo.
    pub spacing: f32,
    pub font_size: f32,
    pub button_font_size: f32,
    pub open_label: String,
    pub close_label: String,
    pub start_open: bool,
    /// Kill switch: every panel self-destructs on init while set.
    pub start_disabled: bool,
}
impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            size_offset: (16.0, 12.0),
            top: 8.0,
            left: 8.0,
            spacing: 36.0,
            font_size: 14.0,
            button_font_size: 13.0,
            open_label: "DEBUG".into(),
            close_label: "x".into(),
            start_open: false,
            start_disabled: false,
        }
    }
}
impl PanelConfig {
    pub fn size_offset(&self) -> Vec2 {
        Vec2::new(self.size_offset.0, self.size_offset.1)
    }
}

/// RGBA colors, each channel in `0.0..=1.0`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PanelColors {
    pub text: [f32; 4],
    pub background: [f32; 4],
    pub button: [f32; 4],
    pub button_hovered: [f32; 4],
    pub button_pressed: [f32; 4],
    pub button_text: [f32; 4],
}
impl Default for PanelColors {
    fn default() -> Self {
        Self {
            text: [1.0, 1.0, 1.0, 1.0],
            background: [0.0, 0.0, 0.0, 0.7],
            button: [0.05, 0.05, 0.08, 0.6],
            button_hovered: [0.08, 0.08, 0.12, 0.7],
            button_pressed: [0.15, 0.15, 0.25, 0.8],
            button_text: [0.75, 0.85, 0.95, 1.0],
        }
    }
}
impl PanelColors {
    pub fn to_color(rgba: [f32; 4]) -> Color {
        Color::srgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DebugTextConfig {
    pub window: WindowConfig,
    pub panel: PanelConfig,
    pub colors: PanelColors,
}

impl DebugTextConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Deep-merges every readable RON file in order (later files win per key).
    /// Returns the config, the paths actually used and any errors met on the way.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        match &mut merged {
                            Some(cur) => merge_value(cur, val),
                            None => merged = Some(val),
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<DebugTextConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let p = &self.panel;
        if p.size_offset.0 < 0.0 || p.size_offset.1 < 0.0 {
            w.push(format!(
                "panel.size_offset ({}, {}) negative; background will clip the text",
                p.size_offset.0, p.size_offset.1
            ));
        }
        if p.font_size <= 0.0 || p.button_font_size <= 0.0 {
            w.push("panel font sizes must be > 0".into());
        }
        if p.open_label.trim().is_empty() {
            w.push("panel.open_label is blank; the closed panel has nothing to click".into());
        }
        if p.start_disabled && p.start_open {
            w.push("panel.start_open has no effect while start_disabled is set".into());
        }
        let c = &self.colors;
        for (name, rgba) in [
            ("text", c.text),
            ("background", c.background),
            ("button", c.button),
            ("button_hovered", c.button_hovered),
            ("button_pressed", c.button_pressed),
            ("button_text", c.button_text),
        ] {
            if rgba.iter().any(|ch| !(0.0..=1.0).contains(ch)) {
                w.push(format!("colors.{name} {rgba:?} has channels outside 0..=1"));
            }
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_clean() {
        let cfg = DebugTextConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.panel.size_offset(), Vec2::new(16.0, 12.0));
        assert!(!cfg.panel.start_disabled);
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = DebugTextConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, DebugTextConfig::default());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let sample = r"(panel: (size_offset: (4.0, 2.0), start_open: true))";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = DebugTextConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.panel.size_offset(), Vec2::new(4.0, 2.0));
        assert!(cfg.panel.start_open);
        assert_eq!(cfg.panel.font_size, PanelConfig::default().font_size);
        assert_eq!(cfg.window, WindowConfig::default());
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r#"(
            window: (width: 900.0, title: "Base"),
            panel: (font_size: 18.0, open_label: "DBG"),
        )"#;
        let local = r"(
            panel: (font_size: 11.0),
        )";
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(base.as_bytes()).unwrap();
        f2.write_all(local.as_bytes()).unwrap();
        let (cfg, used, errors) = DebugTextConfig::load_layered([f1.path(), f2.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 900.0);
        assert_eq!(cfg.panel.open_label, "DBG");
        assert_eq!(cfg.panel.font_size, 11.0);
        assert_eq!(cfg.window.height, WindowConfig::default().height);
    }

    #[test]
    fn layered_reports_missing_layers() {
        let (cfg, used, errors) =
            DebugTextConfig::load_layered(["definitely/missing/debug_text.local.ron"]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(cfg, DebugTextConfig::default());
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = DebugTextConfig::default();
        cfg.panel.size_offset = (-1.0, 0.0);
        cfg.colors.text = [1.5, 0.0, 0.0, 1.0];
        cfg.panel.start_open = true;
        cfg.panel.start_disabled = true;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("size_offset")));
        assert!(warnings.iter().any(|w| w.contains("colors.text")));
    }
}
