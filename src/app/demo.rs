//! Sample panels for the demo binary: live frame stats, a static help panel,
//! a once-a-second clock and a panel that periodically empties itself.
use bevy::prelude::*;
use std::sync::{Arc, RwLock};

use crate::core::config::DebugTextConfig;
use crate::panel::{
    spawn_debug_text_with, Cadence, DebugTextCommand, DebugTextContext, DebugTextPanel, TextSource,
};

const HELP_TEXT: &str = "F1 open/close  F2 show/hide  F3 disable/enable";
/// The pulse panel alternates between text and blank every this many seconds.
const PULSE_PERIOD_SECS: f32 = 5.0;

#[derive(Resource, Debug, Clone)]
pub struct DemoSettings {
    pub panels: usize,
    pub disable_after: Option<f32>,
}
impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            panels: 4,
            disable_after: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub elapsed: f32,
    pub frame: u64,
}

/// Frame stats shared with the panels' text producers, which run outside the ECS.
#[derive(Resource, Clone, Default)]
pub struct SharedFrameStats(pub Arc<RwLock<FrameSnapshot>>);

impl SharedFrameStats {
    pub fn snapshot(&self) -> FrameSnapshot {
        self.0.read().map(|s| s.clone()).unwrap_or_default()
    }
}

#[derive(Resource, Debug)]
struct DemoState {
    visible: bool,
}

/// One-shot timers for unattended runs: disable the panels, then exit.
#[derive(Resource, Default)]
struct DemoTimers {
    disable: Option<Timer>,
    exit: Option<Timer>,
}

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DemoSettings>()
            .init_resource::<SharedFrameStats>()
            .insert_resource(DemoState { visible: true })
            .add_systems(Startup, (spawn_camera, spawn_demo_panels, setup_demo_timers))
            .add_systems(
                Update,
                (collect_frame_stats, demo_key_input, tick_demo_timers),
            );
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_demo_panels(
    mut commands: Commands,
    mut ctx: ResMut<DebugTextContext>,
    cfg: Res<DebugTextConfig>,
    settings: Res<DemoSettings>,
    stats: Res<SharedFrameStats>,
) {
    spawn_demo_set(&mut commands, &mut ctx, &cfg, &settings, &stats);
}

fn spawn_demo_set(
    commands: &mut Commands,
    ctx: &mut DebugTextContext,
    cfg: &DebugTextConfig,
    settings: &DemoSettings,
    stats: &SharedFrameStats,
) {
    for i in 0..settings.panels {
        let top = cfg.panel.top + cfg.panel.spacing * i as f32;
        let (cadence, source) = demo_source(i, stats);
        spawn_debug_text_with(commands, ctx, cfg, top, cadence, source);
    }
    info!(count = settings.panels, "demo panels spawned");
}

/// Source for the `index`-th demo panel.
pub fn demo_source(index: usize, stats: &SharedFrameStats) -> (Cadence, TextSource) {
    let stats = stats.clone();
    match index % 4 {
        0 => (
            Cadence::EVERY_FRAME,
            TextSource::producer(move || {
                let s = stats.snapshot();
                format!(
                    "FPS {:.1} ft {:.1}ms frame {}",
                    s.fps, s.frame_time_ms, s.frame
                )
            }),
        ),
        1 => (Cadence::STATIC, TextSource::Static(HELP_TEXT.into())),
        2 => (
            Cadence::EVERY_SECOND,
            TextSource::producer(move || format!("uptime {:.0}s", stats.snapshot().elapsed)),
        ),
        _ => (
            Cadence {
                interval: 0.25,
                needs_update: true,
            },
            TextSource::producer(move || pulse_text(stats.snapshot().elapsed)),
        ),
    }
}

/// Blank during every other period, which hides the whole panel.
pub fn pulse_text(elapsed: f32) -> String {
    if (elapsed / PULSE_PERIOD_SECS) as u64 % 2 == 0 {
        format!("pulse: showing ({:.1}s)", elapsed % PULSE_PERIOD_SECS)
    } else {
        String::new()
    }
}

fn collect_frame_stats(time: Res<Time<Real>>, stats: Res<SharedFrameStats>) {
    let Ok(mut s) = stats.0.write() else {
        return;
    };
    s.frame += 1;
    s.elapsed = time.elapsed_secs();
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    s.fps = if s.fps == 0.0 {
        inst_fps
    } else {
        s.fps * 0.9 + inst_fps * 0.1
    };
    let inst_ms = dt * 1000.0;
    s.frame_time_ms = if s.frame_time_ms == 0.0 {
        inst_ms
    } else {
        s.frame_time_ms * 0.9 + inst_ms * 0.1
    };
}

#[allow(clippy::too_many_arguments)]
fn demo_key_input(
    mut commands: Commands,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut ctx: ResMut<DebugTextContext>,
    cfg: Res<DebugTextConfig>,
    settings: Res<DemoSettings>,
    stats: Res<SharedFrameStats>,
    mut state: ResMut<DemoState>,
    q_panels: Query<Entity, With<DebugTextPanel>>,
    mut ev_cmd: EventWriter<DebugTextCommand>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.just_pressed(KeyCode::F1) {
        ev_cmd.write(DebugTextCommand::SetOpen(!ctx.is_open()));
    }
    if keys.just_pressed(KeyCode::F2) {
        state.visible = !state.visible;
        for panel in &q_panels {
            ev_cmd.write(DebugTextCommand::SetVisible {
                panel,
                visible: state.visible,
            });
        }
    }
    if keys.just_pressed(KeyCode::F3) {
        if ctx.is_disabled() {
            ctx.set_disabled(false);
            spawn_demo_set(&mut commands, &mut ctx, &cfg, &settings, &stats);
        } else {
            ev_cmd.write(DebugTextCommand::SetDisabled(true));
        }
    }
}

fn setup_demo_timers(
    mut commands: Commands,
    settings: Res<DemoSettings>,
    cfg: Res<DebugTextConfig>,
) {
    let mut timers = DemoTimers::default();
    if let Some(secs) = settings.disable_after.filter(|s| *s > 0.0) {
        info!(seconds = secs, "debug text will be disabled after {secs} seconds");
        timers.disable = Some(Timer::from_seconds(secs, TimerMode::Once));
    }
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "demo will exit after {secs} seconds");
        timers.exit = Some(Timer::from_seconds(secs, TimerMode::Once));
    }
    commands.insert_resource(timers);
}

fn tick_demo_timers(
    time: Res<Time<Real>>,
    timers: Option<ResMut<DemoTimers>>,
    mut ev_cmd: EventWriter<DebugTextCommand>,
    mut ev_exit: EventWriter<AppExit>,
) {
    let Some(mut timers) = timers else {
        return;
    };
    let dt = time.delta();
    if let Some(t) = timers.disable.as_mut() {
        if t.tick(dt).just_finished() {
            ev_cmd.write(DebugTextCommand::SetDisabled(true));
        }
    }
    if let Some(t) = timers.exit.as_mut() {
        if t.tick(dt).just_finished() {
            info!("demo run time elapsed, requesting app exit");
            ev_exit.write(AppExit::Success);
        }
    }
}
