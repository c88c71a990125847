//! System ordering labels for the debug text panels.
//! Update (chained):
//! 1. Lifecycle (init / start)
//! 2. Input (open/close buttons, `DebugTextCommand` events)
//! 3. Teardown (destroy panels doomed by the disable switch this frame)
//! 4. Tick (poll text sources, advance interval timers)
//! 5. Sync (copy panel surfaces onto UI nodes, restyle on config change)
//!
//! PostUpdate:
//! 6. Remeasure (after `UiSystem::Layout`: read text sizes, apply deferred fits)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextLifecycleSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextInputSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextTeardownSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextTickSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextSyncSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DebugTextRemeasureSet; // runs once per frame after UI layout
