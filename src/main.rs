use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use debug_text::app::demo::{DemoPlugin, DemoSettings};
use debug_text::core::config::{ConfigHotReloadPlugin, ConfigReloadSettings};
use debug_text::{DebugTextConfig, DebugTextPlugin};

const DEFAULT_CONFIG_LAYERS: [&str; 2] = [
    "assets/config/debug_text.ron",
    "assets/config/debug_text.local.ron",
];

/// Demo of toggleable debug text panels.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config layers, later files override earlier ones. Defaults to
    /// assets/config/debug_text.ron plus an optional .local.ron next to it.
    #[arg(long = "config")]
    config: Vec<PathBuf>,
    /// Number of demo panels to stack.
    #[arg(long, default_value_t = 4)]
    panels: usize,
    /// Start with the panels open.
    #[arg(long)]
    open: bool,
    /// Exit after this many seconds (overrides window.autoClose).
    #[arg(long)]
    exit_after: Option<f32>,
    /// Flip the global disable switch after this many seconds.
    #[arg(long)]
    disable_after: Option<f32>,
    /// Watch the config layers and apply edits live.
    #[arg(long)]
    hot_reload: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let explicit = !args.config.is_empty();
    let layers: Vec<PathBuf> = if explicit {
        args.config.clone()
    } else {
        DEFAULT_CONFIG_LAYERS.iter().map(PathBuf::from).collect()
    };
    let (mut cfg, used, errors) =
        DebugTextConfig::load_layered(layers.iter().filter(|p| explicit || p.exists()));
    if explicit && !errors.is_empty() {
        bail!("failed to load config: {}", errors.join("; "));
    }
    if let Some(secs) = args.exit_after {
        cfg.window.auto_close = secs;
    }
    if args.open {
        cfg.panel.start_open = true;
    }

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(ConfigLoadReport { used, errors })
        .insert_resource(DemoSettings {
            panels: args.panels,
            disable_after: args.disable_after,
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((DebugTextPlugin, DemoPlugin))
        .add_systems(Startup, log_config_report);
    if args.hot_reload {
        app.insert_resource(ConfigReloadSettings {
            paths: layers,
            ..default()
        })
        .add_plugins(ConfigHotReloadPlugin);
    }
    app.run();
    Ok(())
}

#[derive(Resource, Debug)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
}

fn log_config_report(report: Res<ConfigLoadReport>) {
    if report.used.is_empty() {
        info!("no config layers found; using defaults");
    } else {
        info!("config layers: {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!("config: {e}");
    }
}
