//! Event API for code that only holds a panel's entity.
use bevy::prelude::*;
use std::sync::Arc;

use super::context::DebugTextContext;
use super::panel::DebugTextPanel;
use super::source::{Cadence, TextSource};
use super::view::PanelSurface;

pub type SharedProducer = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Event, Clone)]
pub enum DebugTextCommand {
    SetupText { panel: Entity, text: String },
    Setup {
        panel: Entity,
        cadence: Cadence,
        producer: SharedProducer,
    },
    SetVisible { panel: Entity, visible: bool },
    /// Opens or closes every panel, like pressing a button on any of them.
    SetOpen(bool),
    SetDisabled(bool),
}

pub fn apply_debug_text_commands(
    mut events: EventReader<DebugTextCommand>,
    mut ctx: ResMut<DebugTextContext>,
    mut q_panels: Query<(&mut DebugTextPanel, &mut PanelSurface)>,
) {
    for event in events.read() {
        match event {
            DebugTextCommand::SetupText { panel, text } => {
                if let Ok((mut p, mut surface)) = q_panels.get_mut(*panel) {
                    p.setup_text(text.clone(), &mut ctx, &mut *surface);
                }
            }
            DebugTextCommand::Setup {
                panel,
                cadence,
                producer,
            } => {
                if let Ok((mut p, mut surface)) = q_panels.get_mut(*panel) {
                    let producer = producer.clone();
                    let source = TextSource::producer(move || producer());
                    p.setup_with(*cadence, source, &mut ctx, &mut *surface);
                }
            }
            DebugTextCommand::SetVisible { panel, visible } => {
                if let Ok((p, mut surface)) = q_panels.get_mut(*panel) {
                    p.set_visible(*visible, &mut *surface);
                }
            }
            DebugTextCommand::SetOpen(open) => {
                // Any live panel can carry the toggle; the rest catch up on their next tick.
                let carrier = q_panels.iter_mut().find(|(p, _)| !p.is_destroyed());
                match carrier {
                    Some((mut p, mut surface)) => p.set_state(&mut ctx, *open, &mut *surface),
                    None => ctx.set_open(*open),
                }
            }
            DebugTextCommand::SetDisabled(disabled) => {
                info!(disabled = *disabled, "debug text disable switch set");
                ctx.set_disabled(*disabled);
            }
        }
    }
}
