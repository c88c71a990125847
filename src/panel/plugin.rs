use bevy::prelude::*;
use bevy::ui::UiSystem;

use super::commands::{apply_debug_text_commands, DebugTextCommand};
use super::context::DebugTextContext;
use super::systems::{
    apply_pending_remeasures, debug_text_button_system, despawn_disabled_panels,
    dispose_removed_panel, init_debug_text_panels, measure_debug_text, remeasure_on_config_change,
    reset_debug_text_context, sync_debug_text_widgets, tick_debug_text_panels,
};
use crate::core::config::DebugTextConfig;
use crate::core::system::system_order::{
    DebugTextInputSet, DebugTextLifecycleSet, DebugTextRemeasureSet, DebugTextSyncSet,
    DebugTextTeardownSet, DebugTextTickSet,
};

/// Drives every `DebugTextPanel` in the world: lifecycle, buttons, polling,
/// widget sync and the deferred size fit after UI layout.
///
/// Uses the `DebugTextConfig` resource if one was inserted before the plugin,
/// defaults otherwise.
pub struct DebugTextPlugin;

impl Plugin for DebugTextPlugin {
    fn build(&self, app: &mut App) {
        let cfg = app
            .world_mut()
            .get_resource_or_insert_with::<DebugTextConfig>(DebugTextConfig::default)
            .clone();
        for w in cfg.validate() {
            warn!("debug text config: {w}");
        }

        app.insert_resource(DebugTextContext::new())
            .add_event::<DebugTextCommand>()
            .configure_sets(
                Update,
                (
                    DebugTextLifecycleSet,
                    DebugTextInputSet,
                    DebugTextTeardownSet,
                    DebugTextTickSet,
                    DebugTextSyncSet,
                )
                    .chain(),
            )
            .configure_sets(PostUpdate, DebugTextRemeasureSet.after(UiSystem::Layout))
            .add_systems(PreStartup, reset_debug_text_context)
            .add_systems(
                Update,
                (
                    init_debug_text_panels.in_set(DebugTextLifecycleSet),
                    (debug_text_button_system, apply_debug_text_commands)
                        .chain()
                        .in_set(DebugTextInputSet),
                    despawn_disabled_panels.in_set(DebugTextTeardownSet),
                    tick_debug_text_panels.in_set(DebugTextTickSet),
                    (remeasure_on_config_change, sync_debug_text_widgets)
                        .in_set(DebugTextSyncSet),
                ),
            )
            .add_systems(
                PostUpdate,
                (measure_debug_text, apply_pending_remeasures)
                    .chain()
                    .in_set(DebugTextRemeasureSet),
            )
            .add_observer(dispose_removed_panel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_adds() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(DebugTextPlugin);
        app.update();
        assert!(app.world().contains_resource::<DebugTextContext>());
        assert!(app.world().contains_resource::<DebugTextConfig>());
    }
}
