//! Bevy UI tree behind a debug text panel.
//!
//! ```text
//! root (DebugTextPanel, PanelSurface, DebugTextParts)
//! ├── closed_base
//! │   └── open button ── label
//! └── open_base
//!     ├── close button ── label
//!     └── background (resized to fit)
//!         └── text (absolutely positioned, measured after layout)
//! ```
use bevy::prelude::*;

use super::context::DebugTextContext;
use super::panel::DebugTextPanel;
use super::source::{Cadence, TextSource};
use super::view::PanelSurface;
use crate::core::config::{DebugTextConfig, PanelColors};

/// Entities making up one panel, stored on its root.
#[derive(Component, Debug, Clone, Copy)]
pub struct DebugTextParts {
    pub closed_base: Entity,
    pub open_base: Entity,
    pub open_button: Entity,
    pub close_button: Entity,
    pub button_labels: [Entity; 2],
    pub background: Entity,
    pub text: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Open,
    Close,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct DebugTextButton {
    pub panel: Entity,
    pub action: ButtonAction,
}

#[derive(Component)]
pub struct DebugTextLabel;

#[derive(Component)]
pub struct DebugTextBackground;

/// Spawns an empty panel. It registers with the context on the next
/// lifecycle pass.
pub fn spawn_debug_text(
    commands: &mut Commands,
    ctx: &mut DebugTextContext,
    cfg: &DebugTextConfig,
    top: f32,
) -> Entity {
    let panel = DebugTextPanel::new(ctx, cfg.panel.size_offset());
    spawn_panel_tree(commands, cfg, top, panel, PanelSurface::default())
}

/// Spawns a panel already set up with `source`, so its first frame shows text.
pub fn spawn_debug_text_with(
    commands: &mut Commands,
    ctx: &mut DebugTextContext,
    cfg: &DebugTextConfig,
    top: f32,
    cadence: Cadence,
    source: TextSource,
) -> Entity {
    let mut panel = DebugTextPanel::new(ctx, cfg.panel.size_offset());
    let mut surface = PanelSurface::default();
    panel.setup_with(cadence, source, ctx, &mut surface);
    spawn_panel_tree(commands, cfg, top, panel, surface)
}

fn spawn_panel_tree(
    commands: &mut Commands,
    cfg: &DebugTextConfig,
    top: f32,
    panel: DebugTextPanel,
    surface: PanelSurface,
) -> Entity {
    let p = &cfg.panel;
    let c = &cfg.colors;
    let initial_text = surface.text.clone();

    let root = commands
        .spawn((
            Name::new("DebugText"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(top),
                left: Val::Px(p.left),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            Visibility::Hidden,
        ))
        .id();

    let closed_base = commands
        .spawn((
            Name::new("DebugTextClosed"),
            Node::default(),
            ChildOf(root),
        ))
        .id();
    let (open_button, open_label) = spawn_button(
        commands,
        cfg,
        closed_base,
        &p.open_label,
        DebugTextButton {
            panel: root,
            action: ButtonAction::Open,
        },
    );

    let open_base = commands
        .spawn((
            Name::new("DebugTextOpen"),
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                row_gap: Val::Px(2.0),
                ..default()
            },
            Visibility::Hidden,
            ChildOf(root),
        ))
        .id();
    let (close_button, close_label) = spawn_button(
        commands,
        cfg,
        open_base,
        &p.close_label,
        DebugTextButton {
            panel: root,
            action: ButtonAction::Close,
        },
    );

    let background = commands
        .spawn((
            Name::new("DebugTextBackground"),
            Node {
                width: Val::Px(p.size_offset.0),
                height: Val::Px(p.size_offset.1),
                ..default()
            },
            BackgroundColor(PanelColors::to_color(c.background)),
            DebugTextBackground,
            ChildOf(open_base),
        ))
        .id();
    let text = commands
        .spawn((
            Text::new(initial_text),
            TextFont {
                font_size: p.font_size,
                ..default()
            },
            TextColor(PanelColors::to_color(c.text)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(p.size_offset.0 * 0.5),
                top: Val::Px(p.size_offset.1 * 0.5),
                ..default()
            },
            DebugTextLabel,
            ChildOf(background),
        ))
        .id();

    commands.entity(root).insert((
        panel,
        surface,
        DebugTextParts {
            closed_base,
            open_base,
            open_button,
            close_button,
            button_labels: [open_label, close_label],
            background,
            text,
        },
    ));
    root
}

fn spawn_button(
    commands: &mut Commands,
    cfg: &DebugTextConfig,
    parent: Entity,
    label: &str,
    button: DebugTextButton,
) -> (Entity, Entity) {
    let id = commands
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(6.0), Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(PanelColors::to_color(cfg.colors.button)),
            button,
            ChildOf(parent),
        ))
        .id();
    let label = commands
        .spawn((
            Text::new(label),
            TextFont {
                font_size: cfg.panel.button_font_size,
                ..default()
            },
            TextColor(PanelColors::to_color(cfg.colors.button_text)),
            ChildOf(id),
        ))
        .id();
    (id, label)
}
