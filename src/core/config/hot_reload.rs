use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use super::config::DebugTextConfig;

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/debug_text.ron"),
                PathBuf::from("assets/config/debug_text.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl Default for ConfigReloadState {
    fn default() -> Self {
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}

/// Polls the config layers' modification times and swaps in the reloaded
/// `DebugTextConfig` when anything changed. Panels restyle on the next sync.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        app.init_resource::<ConfigReloadSettings>()
            .init_resource::<ConfigReloadState>()
            .add_systems(Update, poll_and_reload_config);
    }
}

fn poll_and_reload_config(
    time: Res<Time<Real>>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<DebugTextConfig>,
) {
    let wanted = settings.interval_secs.max(0.05);
    if (state.timer.duration().as_secs_f32() - wanted).abs() > f32::EPSILON {
        state
            .timer
            .set_duration(std::time::Duration::from_secs_f32(wanted));
    }
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = state
            .last_mod
            .entry(path.clone())
            .or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    if !dirty {
        return;
    }
    let (new_cfg, _used, errors) =
        DebugTextConfig::load_layered(settings.paths.iter().filter(|p| p.exists()));
    for e in errors {
        warn!("CONFIG HOT-RELOAD issue: {e}");
    }
    for w in new_cfg.validate() {
        warn!("CONFIG HOT-RELOAD warning: {w}");
    }
    if cfg_res.set_if_neq(new_cfg) {
        info!("Config hot-reload applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn edited_layer_replaces_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(panel: (font_size: 20.0))").unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(DebugTextConfig::default());
        app.insert_resource(ConfigReloadSettings {
            paths: vec![file.path().to_path_buf()],
            interval_secs: 0.05,
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(ConfigHotReloadPlugin);

        for _ in 0..5 {
            app.update();
        }
        let cfg = app.world().resource::<DebugTextConfig>();
        assert_eq!(cfg.panel.font_size, 20.0);
        assert_eq!(cfg.window, DebugTextConfig::default().window);
    }

    #[test]
    fn missing_layers_leave_config_alone() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = DebugTextConfig::default();
        cfg.panel.font_size = 9.0;
        app.insert_resource(cfg);
        app.insert_resource(ConfigReloadSettings {
            paths: vec![PathBuf::from("does/not/exist.ron")],
            interval_secs: 0.05,
        });
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(ConfigHotReloadPlugin);

        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().resource::<DebugTextConfig>().panel.font_size, 9.0);
    }
}
