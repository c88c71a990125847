//! Process-scoped state shared by every debug text panel.
//!
//! One `DebugTextContext` is one independent universe of panels: they share a
//! single open/closed flag, a registry of live instances and a disable switch.
//! The context also owns the two hand-off queues the host drains once per frame
//! (deferred remeasures and panels doomed by the disable switch).
use bevy::prelude::*;

/// Stable identity of a panel inside one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u64);

#[derive(Resource, Debug, Default)]
pub struct DebugTextContext {
    open: bool,
    open_generation: u64,
    disabled: bool,
    registry: Vec<PanelId>,
    pending_remeasure: Vec<PanelId>,
    pending_destroy: Vec<PanelId>,
    next_id: u64,
}

impl DebugTextContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh id. Ids are never reused within a context, even across `reset`.
    pub fn allocate_id(&mut self) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Bumped on every `set_open`, so panels can tell they missed a toggle.
    pub fn open_generation(&self) -> u64 {
        self.open_generation
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
        self.open_generation += 1;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Flips the global kill switch.
    ///
    /// Turning it on dooms every registered panel: their ids move to the
    /// pending-destroy queue (drained by the host) and the registry is emptied.
    /// Turning it off only affects panels initialised later.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if !disabled {
            return;
        }
        let doomed = std::mem::take(&mut self.registry);
        if !doomed.is_empty() {
            info!(count = doomed.len(), "debug text disabled; destroying registered panels");
        }
        self.pending_remeasure.retain(|id| !doomed.contains(id));
        self.pending_destroy.extend(doomed);
    }

    pub fn registry(&self) -> &[PanelId] {
        &self.registry
    }

    pub fn is_registered(&self, id: PanelId) -> bool {
        self.registry.contains(&id)
    }

    pub(crate) fn register(&mut self, id: PanelId) {
        if !self.registry.contains(&id) {
            self.registry.push(id);
        }
    }

    pub(crate) fn unregister(&mut self, id: PanelId) {
        self.registry.retain(|r| *r != id);
        self.pending_remeasure.retain(|r| *r != id);
    }

    /// Queues a size fit for `id`; repeated requests before the next drain coalesce.
    pub fn request_remeasure(&mut self, id: PanelId) {
        if !self.pending_remeasure.contains(&id) {
            self.pending_remeasure.push(id);
        }
    }

    pub fn has_pending_remeasure(&self, id: PanelId) -> bool {
        self.pending_remeasure.contains(&id)
    }

    /// Drains the remeasure queue. Call once per frame, after layout.
    pub fn take_pending_remeasures(&mut self) -> Vec<PanelId> {
        std::mem::take(&mut self.pending_remeasure)
    }

    /// Doomed by the disable switch but not yet torn down by the host.
    pub fn is_doomed(&self, id: PanelId) -> bool {
        self.pending_destroy.contains(&id)
    }

    /// Drains the ids doomed by `set_disabled(true)`.
    pub fn take_pending_destroy(&mut self) -> Vec<PanelId> {
        std::mem::take(&mut self.pending_destroy)
    }

    /// Startup reset: closed, not disabled, nothing registered or queued.
    pub fn reset(&mut self) {
        let next_id = self.next_id;
        *self = Self {
            next_id,
            ..Self::default()
        };
    }
}
