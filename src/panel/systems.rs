use bevy::prelude::*;

use super::context::DebugTextContext;
use super::panel::{DebugTextPanel, InitOutcome};
use super::view::PanelSurface;
use super::widgets::{
    ButtonAction, DebugTextBackground, DebugTextButton, DebugTextLabel, DebugTextParts,
};
use crate::core::config::{DebugTextConfig, PanelColors};

/// Startup reset of the shared state, then the configured initial flags.
pub fn reset_debug_text_context(mut ctx: ResMut<DebugTextContext>, cfg: Res<DebugTextConfig>) {
    ctx.reset();
    if cfg.panel.start_open {
        ctx.set_open(true);
    }
    if cfg.panel.start_disabled {
        info!("debug text starts disabled; panels will self-destruct");
        ctx.set_disabled(true);
    }
}

pub fn init_debug_text_panels(
    mut commands: Commands,
    mut ctx: ResMut<DebugTextContext>,
    mut q_new: Query<(Entity, &mut DebugTextPanel, &mut PanelSurface), Added<DebugTextPanel>>,
) {
    for (entity, mut panel, mut surface) in &mut q_new {
        match panel.init(&mut ctx) {
            InitOutcome::Suppressed => commands.entity(entity).despawn(),
            InitOutcome::Registered | InitOutcome::AlreadyInitialized => {
                panel.start(&mut ctx, &mut *surface)
            }
        }
    }
}

/// Tears down panels doomed by the disable switch in the frame it flipped:
/// they are disposed here, before anything ticks, and despawned at the next sync point.
pub fn despawn_disabled_panels(
    mut commands: Commands,
    mut ctx: ResMut<DebugTextContext>,
    mut q_panels: Query<(Entity, &mut DebugTextPanel)>,
) {
    let doomed = ctx.take_pending_destroy();
    if doomed.is_empty() {
        return;
    }
    for (entity, mut panel) in &mut q_panels {
        if doomed.contains(&panel.id()) {
            panel.dispose(&mut ctx);
            commands.entity(entity).despawn();
        }
    }
}

/// Host-driven teardown: deregister as the panel component goes away.
pub fn dispose_removed_panel(
    trigger: Trigger<OnRemove, DebugTextPanel>,
    ctx: Option<ResMut<DebugTextContext>>,
    mut q_panels: Query<&mut DebugTextPanel>,
) {
    let Some(mut ctx) = ctx else {
        return;
    };
    if let Ok(mut panel) = q_panels.get_mut(trigger.target()) {
        panel.dispose(&mut ctx);
    }
}

pub fn debug_text_button_system(
    mut ctx: ResMut<DebugTextContext>,
    cfg: Res<DebugTextConfig>,
    mut q_buttons: Query<
        (&Interaction, &DebugTextButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut q_panels: Query<(&mut DebugTextPanel, &mut PanelSurface)>,
) {
    for (interaction, button, mut bg) in &mut q_buttons {
        let alpha = q_panels
            .get(button.panel)
            .map(|(_, surface)| surface.alpha)
            .unwrap_or(1.0);
        let rgba = match *interaction {
            Interaction::Pressed => cfg.colors.button_pressed,
            Interaction::Hovered => cfg.colors.button_hovered,
            Interaction::None => cfg.colors.button,
        };
        *bg = BackgroundColor(fade(PanelColors::to_color(rgba), alpha));

        if *interaction != Interaction::Pressed {
            continue;
        }
        if let Ok((mut panel, mut surface)) = q_panels.get_mut(button.panel) {
            let open = button.action == ButtonAction::Open;
            panel.set_state(&mut ctx, open, &mut *surface);
        }
    }
}

/// Per-frame poll on unscaled time.
pub fn tick_debug_text_panels(
    time: Res<Time<Real>>,
    mut ctx: ResMut<DebugTextContext>,
    mut q_panels: Query<(&mut DebugTextPanel, &mut PanelSurface)>,
) {
    let dt = time.delta_secs();
    for (mut panel, mut surface) in &mut q_panels {
        // Most ticks rewrite identical values; only flag the surface when something moved.
        let view = surface.bypass_change_detection();
        let before = view.revision();
        panel.tick(&mut ctx, dt, view);
        if view.revision() != before {
            surface.set_changed();
        }
    }
}

/// Copies changed surfaces onto the UI nodes. Runs before layout so text
/// edits are measured in the same frame.
pub fn sync_debug_text_widgets(
    cfg: Res<DebugTextConfig>,
    q_panels: Query<(Entity, Ref<PanelSurface>, &DebugTextParts)>,
    mut q_vis: Query<&mut Visibility>,
    mut q_text: Query<&mut Text, With<DebugTextLabel>>,
    mut q_text_color: Query<&mut TextColor>,
    mut q_font: Query<&mut TextFont>,
    mut q_bg: Query<&mut BackgroundColor>,
) {
    let colors = &cfg.colors;
    for (root, surface, parts) in &q_panels {
        if !surface.is_changed() && !cfg.is_changed() {
            continue;
        }
        show(&mut q_vis, root, surface.root_active);
        show(&mut q_vis, parts.open_base, surface.open);
        show(&mut q_vis, parts.closed_base, !surface.open);

        if let Ok(mut text) = q_text.get_mut(parts.text) {
            if text.0 != surface.text {
                text.0.clone_from(&surface.text);
            }
        }

        if cfg.is_changed() {
            set_font_size(&mut q_font, parts.text, cfg.panel.font_size);
            for label in parts.button_labels {
                set_font_size(&mut q_font, label, cfg.panel.button_font_size);
            }
        }

        let alpha = surface.alpha;
        if let Ok(mut color) = q_text_color.get_mut(parts.text) {
            *color = TextColor(fade(PanelColors::to_color(colors.text), alpha));
        }
        for label in parts.button_labels {
            if let Ok(mut color) = q_text_color.get_mut(label) {
                *color = TextColor(fade(PanelColors::to_color(colors.button_text), alpha));
            }
        }
        if let Ok(mut bg) = q_bg.get_mut(parts.background) {
            *bg = BackgroundColor(fade(PanelColors::to_color(colors.background), alpha));
        }
        for button in [parts.open_button, parts.close_button] {
            if let Ok(mut bg) = q_bg.get_mut(button) {
                *bg = BackgroundColor(fade(PanelColors::to_color(colors.button), alpha));
            }
        }
    }
}

/// A reloaded config can change how big the same text renders; refit every panel.
pub fn remeasure_on_config_change(
    cfg: Res<DebugTextConfig>,
    mut ctx: ResMut<DebugTextContext>,
    q_panels: Query<&DebugTextPanel>,
) {
    if !cfg.is_changed() || cfg.is_added() {
        return;
    }
    for panel in &q_panels {
        if panel.is_started() && !panel.is_destroyed() {
            ctx.request_remeasure(panel.id());
        }
    }
}

/// Reads text sizes computed by this frame's layout pass back into the surfaces.
pub fn measure_debug_text(
    q_nodes: Query<&ComputedNode, With<DebugTextLabel>>,
    mut q_panels: Query<(&DebugTextParts, &mut PanelSurface)>,
) {
    for (parts, mut surface) in &mut q_panels {
        let Ok(node) = q_nodes.get(parts.text) else {
            continue;
        };
        let size = node.size() * node.inverse_scale_factor();
        if surface.measured_text_size != size {
            surface.measured_text_size = size;
        }
    }
}

/// Drains the deferred size fits. Panels that no longer exist are skipped.
pub fn apply_pending_remeasures(
    mut ctx: ResMut<DebugTextContext>,
    mut q_panels: Query<(&mut DebugTextPanel, &mut PanelSurface, &DebugTextParts)>,
    mut q_nodes: Query<&mut Node, With<DebugTextBackground>>,
) {
    let pending = ctx.take_pending_remeasures();
    if pending.is_empty() {
        return;
    }
    for (mut panel, mut surface, parts) in &mut q_panels {
        if !pending.contains(&panel.id()) {
            continue;
        }
        let Some(size) = panel.apply_remeasure(&ctx, surface.bypass_change_detection()) else {
            continue;
        };
        surface.set_changed();
        if let Ok(mut node) = q_nodes.get_mut(parts.background) {
            node.width = Val::Px(size.x);
            node.height = Val::Px(size.y);
        }
    }
}

fn show(q_vis: &mut Query<&mut Visibility>, entity: Entity, shown: bool) {
    if let Ok(mut vis) = q_vis.get_mut(entity) {
        vis.set_if_neq(if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

fn set_font_size(q_font: &mut Query<&mut TextFont>, entity: Entity, size: f32) {
    if let Ok(mut font) = q_font.get_mut(entity) {
        if font.font_size != size {
            font.font_size = size;
        }
    }
}

fn fade(color: Color, alpha: f32) -> Color {
    color.with_alpha(color.alpha() * alpha)
}
