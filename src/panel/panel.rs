//! Per-instance debug text panel: visibility controller, content poller and
//! size fitter, driven through an explicit `init -> start -> tick -> dispose`
//! lifecycle.
//!
//! A panel never talks to the engine directly. Every widget change goes
//! through a [`PanelView`], and every piece of cross-panel state lives in the
//! [`DebugTextContext`] passed into each call.
use bevy::prelude::*;

use super::context::{DebugTextContext, PanelId};
use super::source::{is_blank, Cadence, TextSource};
use super::view::PanelView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Live,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Registered,
    AlreadyInitialized,
    /// The context was disabled; the panel is destroyed and the host should drop it.
    Suppressed,
}

#[derive(Component, Debug)]
pub struct DebugTextPanel {
    id: PanelId,
    lifecycle: Lifecycle,
    started: bool,
    source: Option<TextSource>,
    cadence: Cadence,
    timer: f32,
    current_text_size: Vec2,
    size_offset: Vec2,
    seen_open_generation: u64,
}

impl DebugTextPanel {
    pub fn new(ctx: &mut DebugTextContext, size_offset: Vec2) -> Self {
        Self {
            id: ctx.allocate_id(),
            lifecycle: Lifecycle::Uninitialized,
            started: false,
            source: None,
            cadence: Cadence::STATIC,
            timer: 0.0,
            current_text_size: Vec2::ZERO,
            size_offset,
            seen_open_generation: 0,
        }
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Destroyed, or doomed by the disable switch and awaiting host teardown.
    fn is_dead(&self, ctx: &DebugTextContext) -> bool {
        self.is_destroyed() || ctx.is_doomed(self.id)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn size_offset(&self) -> Vec2 {
        self.size_offset
    }

    pub fn current_text_size(&self) -> Vec2 {
        self.current_text_size
    }

    /// Text the source produces right now; empty without a source.
    pub fn current_text(&self) -> String {
        self.source
            .as_ref()
            .map(TextSource::produce)
            .unwrap_or_default()
    }

    // ---- lifecycle ------------------------------------------------------

    /// One-time initialisation: registers with the context, or self-destructs
    /// when the context is disabled.
    pub fn init(&mut self, ctx: &mut DebugTextContext) -> InitOutcome {
        match self.lifecycle {
            Lifecycle::Live => InitOutcome::AlreadyInitialized,
            Lifecycle::Destroyed => InitOutcome::Suppressed,
            Lifecycle::Uninitialized if ctx.is_disabled() => {
                self.lifecycle = Lifecycle::Destroyed;
                info!(panel = self.id.0, "debug text disabled; panel suppressed at init");
                InitOutcome::Suppressed
            }
            Lifecycle::Uninitialized => {
                ctx.register(self.id);
                self.lifecycle = Lifecycle::Live;
                InitOutcome::Registered
            }
        }
    }

    /// First-frame setup: root on, closed layout, then adopt the shared open flag.
    pub fn start(&mut self, ctx: &mut DebugTextContext, view: &mut impl PanelView) {
        if self.lifecycle != Lifecycle::Live || self.started {
            return;
        }
        self.started = true;
        view.set_root_active(true);
        view.set_open_layout(false);
        self.apply_open_state(ctx, view);
    }

    /// Deregisters and marks the panel destroyed. Safe to call repeatedly.
    pub fn dispose(&mut self, ctx: &mut DebugTextContext) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        ctx.unregister(self.id);
        self.lifecycle = Lifecycle::Destroyed;
    }

    // ---- visibility controller -----------------------------------------

    /// Opens or closes every panel of the context.
    pub fn set_state(&mut self, ctx: &mut DebugTextContext, open: bool, view: &mut impl PanelView) {
        if self.is_dead(ctx) {
            return;
        }
        ctx.set_open(open);
        self.apply_open_state(ctx, view);
    }

    /// Fully opaque or fully transparent; leaves the open/closed toggle alone.
    pub fn set_visible(&self, is_visible: bool, view: &mut impl PanelView) {
        if self.is_destroyed() {
            return;
        }
        view.set_alpha(if is_visible { 1.0 } else { 0.0 });
    }

    fn apply_open_state(&mut self, ctx: &mut DebugTextContext, view: &mut impl PanelView) {
        let open = ctx.is_open();
        self.seen_open_generation = ctx.open_generation();
        view.set_open_layout(open);
        if !open {
            return;
        }
        let text = self.current_text();
        write_text(view, &text);
        ctx.request_remeasure(self.id);
    }

    // ---- content poller -------------------------------------------------

    /// Fixed text, never re-polled.
    pub fn setup_text(
        &mut self,
        text: impl Into<String>,
        ctx: &mut DebugTextContext,
        view: &mut impl PanelView,
    ) {
        self.setup_with(Cadence::STATIC, TextSource::Static(text.into()), ctx, view);
    }

    /// Callback re-polled once a second while open.
    pub fn setup_fn(
        &mut self,
        get_text: impl Fn() -> String + Send + Sync + 'static,
        ctx: &mut DebugTextContext,
        view: &mut impl PanelView,
    ) {
        self.setup_with(Cadence::EVERY_SECOND, TextSource::producer(get_text), ctx, view);
    }

    /// Callback re-polled on every tick while open.
    pub fn setup_every_frame(
        &mut self,
        get_text: impl Fn() -> String + Send + Sync + 'static,
        ctx: &mut DebugTextContext,
        view: &mut impl PanelView,
    ) {
        self.setup_with(Cadence::EVERY_FRAME, TextSource::producer(get_text), ctx, view);
    }

    pub fn setup(
        &mut self,
        interval: f32,
        needs_update: bool,
        get_text: impl Fn() -> String + Send + Sync + 'static,
        ctx: &mut DebugTextContext,
        view: &mut impl PanelView,
    ) {
        let cadence = Cadence {
            interval: interval.max(0.0),
            needs_update,
        };
        self.setup_with(cadence, TextSource::producer(get_text), ctx, view);
    }

    /// General form behind every `setup*`: applies the text immediately and
    /// requests a size fit whatever the cadence.
    pub fn setup_with(
        &mut self,
        cadence: Cadence,
        source: TextSource,
        ctx: &mut DebugTextContext,
        view: &mut impl PanelView,
    ) {
        if self.is_dead(ctx) {
            return;
        }
        self.cadence = cadence;
        self.source = Some(source);
        self.timer = 0.0;
        let text = self.current_text();
        write_text(view, &text);
        ctx.request_remeasure(self.id);
    }

    /// Per-frame hook. `dt` is unscaled elapsed time in seconds.
    pub fn tick(&mut self, ctx: &mut DebugTextContext, dt: f32, view: &mut impl PanelView) {
        if self.lifecycle != Lifecycle::Live || !self.started || ctx.is_doomed(self.id) {
            return;
        }
        if self.seen_open_generation != ctx.open_generation() {
            self.apply_open_state(ctx, view);
        }

        let text = self.current_text();
        view.set_root_active(!is_blank(&text));

        if !ctx.is_open() || !self.cadence.needs_update {
            return;
        }
        self.timer += dt;
        if self.timer < self.cadence.interval {
            return;
        }
        // Carry the remainder; a zero interval would otherwise grow the timer forever.
        self.timer = if self.cadence.interval > 0.0 {
            self.timer - self.cadence.interval
        } else {
            0.0
        };
        write_text(view, &text);
        ctx.request_remeasure(self.id);
    }

    // ---- size fitter ----------------------------------------------------

    /// Second half of a deferred size fit, run by the host after layout.
    ///
    /// Returns the new background size when one was applied.
    pub fn apply_remeasure(
        &mut self,
        ctx: &DebugTextContext,
        view: &mut impl PanelView,
    ) -> Option<Vec2> {
        if self.is_dead(ctx) || !ctx.is_open() {
            return None;
        }
        let measured = view.measured_text_size();
        if measured == self.current_text_size {
            return None;
        }
        let background = measured + self.size_offset;
        view.set_background_size(background);
        self.current_text_size = measured;
        debug!(panel = self.id.0, ?background, "debug text background resized");
        Some(background)
    }
}

/// Writes only when the text differs, so unchanged polls cause no UI churn.
fn write_text(view: &mut impl PanelView, text: &str) -> bool {
    if view.text() == text {
        return false;
    }
    view.set_text(text);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::view::PanelSurface;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn live_panel(ctx: &mut DebugTextContext, surface: &mut PanelSurface) -> DebugTextPanel {
        let mut panel = DebugTextPanel::new(ctx, Vec2::new(10.0, 6.0));
        assert_eq!(panel.init(ctx), InitOutcome::Registered);
        panel.start(ctx, surface);
        panel
    }

    fn shared_text(initial: &str) -> (Arc<Mutex<String>>, impl Fn() -> String + Send + Sync + 'static) {
        let cell = Arc::new(Mutex::new(initial.to_string()));
        let reader = cell.clone();
        (cell, move || reader.lock().unwrap().clone())
    }

    #[test]
    fn latest_set_state_wins_for_every_panel() {
        let mut ctx = DebugTextContext::new();
        let mut sa = PanelSurface::default();
        let mut sb = PanelSurface::default();
        let mut a = live_panel(&mut ctx, &mut sa);
        let mut b = live_panel(&mut ctx, &mut sb);

        a.set_state(&mut ctx, true, &mut sa);
        b.tick(&mut ctx, 0.016, &mut sb);
        assert!(sa.open && sb.open);

        b.set_state(&mut ctx, false, &mut sb);
        a.tick(&mut ctx, 0.016, &mut sa);
        assert!(!sa.open && !sb.open);
        assert!(!ctx.is_open());
    }

    #[test]
    fn new_panel_inherits_open_flag() {
        let mut ctx = DebugTextContext::new();
        let mut sa = PanelSurface::default();
        let mut a = live_panel(&mut ctx, &mut sa);
        a.set_state(&mut ctx, true, &mut sa);

        let mut sb = PanelSurface::default();
        let _b = live_panel(&mut ctx, &mut sb);
        assert!(sb.open);
        assert!(sb.root_active);
    }

    #[test]
    fn static_text_is_shown_and_never_repolled() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);

        panel.setup_text("hello", &mut ctx, &mut surface);
        assert_eq!(surface.text, "hello");
        let writes = surface.text_writes;
        for _ in 0..10 {
            panel.tick(&mut ctx, 1.0, &mut surface);
        }
        assert_eq!(surface.text, "hello");
        assert_eq!(surface.text_writes, writes);
        assert_eq!(panel.timer(), 0.0);
    }

    #[test]
    fn every_frame_polls_each_tick_but_writes_only_on_change() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);

        let calls = Arc::new(AtomicUsize::new(0));
        let (cell, reader) = shared_text("a");
        let counter = calls.clone();
        panel.setup_every_frame(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                reader()
            },
            &mut ctx,
            &mut surface,
        );
        let base_calls = calls.load(Ordering::SeqCst);
        let base_writes = surface.text_writes;

        panel.tick(&mut ctx, 0.016, &mut surface);
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert_eq!(calls.load(Ordering::SeqCst), base_calls + 2);
        assert_eq!(surface.text_writes, base_writes);

        *cell.lock().unwrap() = "b".into();
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert_eq!(surface.text, "b");
        assert_eq!(surface.text_writes, base_writes + 1);
    }

    #[test]
    fn interval_refresh_carries_remainder() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);

        let (cell, reader) = shared_text("v0");
        panel.setup(0.5, true, reader, &mut ctx, &mut surface);
        assert_eq!(surface.text, "v0");

        *cell.lock().unwrap() = "v1".into();
        panel.tick(&mut ctx, 0.25, &mut surface);
        assert_eq!(surface.text, "v0", "not due yet");
        panel.tick(&mut ctx, 0.375, &mut surface);
        assert_eq!(surface.text, "v1");
        assert!((panel.timer() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn closed_panel_does_not_refresh() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);

        let (cell, reader) = shared_text("first");
        panel.setup_every_frame(reader, &mut ctx, &mut surface);
        *cell.lock().unwrap() = "second".into();
        panel.tick(&mut ctx, 0.1, &mut surface);
        assert_eq!(surface.text, "first");
        assert_eq!(panel.timer(), 0.0);
    }

    #[test]
    fn blank_text_hides_root_regardless_of_open_state() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);

        let (cell, reader) = shared_text("   \n\t");
        panel.setup_every_frame(reader, &mut ctx, &mut surface);
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert!(!surface.root_active);

        panel.set_state(&mut ctx, true, &mut surface);
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert!(!surface.root_active);

        *cell.lock().unwrap() = "fps 60".into();
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert!(surface.root_active);
    }

    #[test]
    fn missing_source_yields_empty_text_and_hidden_root() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        assert_eq!(panel.current_text(), "");
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert!(!surface.root_active);
    }

    #[test]
    fn remeasure_fits_background_once() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);
        panel.setup_text("abc", &mut ctx, &mut surface);
        assert_eq!(ctx.take_pending_remeasures(), vec![panel.id()]);

        surface.measured_text_size = Vec2::new(40.0, 12.0);
        assert_eq!(
            panel.apply_remeasure(&ctx, &mut surface),
            Some(Vec2::new(50.0, 18.0))
        );
        assert_eq!(panel.apply_remeasure(&ctx, &mut surface), None);
        assert_eq!(surface.background_size, Some(Vec2::new(50.0, 18.0)));
    }

    #[test]
    fn remeasure_aborts_when_closed() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.setup_text("abc", &mut ctx, &mut surface);
        surface.measured_text_size = Vec2::new(40.0, 12.0);
        assert_eq!(panel.apply_remeasure(&ctx, &mut surface), None);
        assert_eq!(surface.background_size, None);
    }

    #[test]
    fn set_visible_only_touches_alpha() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);
        panel.set_visible(false, &mut surface);
        assert_eq!(surface.alpha, 0.0);
        assert!(surface.open);
        panel.set_visible(true, &mut surface);
        assert_eq!(surface.alpha, 1.0);
    }

    #[test]
    fn init_is_idempotent() {
        let mut ctx = DebugTextContext::new();
        let mut panel = DebugTextPanel::new(&mut ctx, Vec2::ZERO);
        assert_eq!(panel.init(&mut ctx), InitOutcome::Registered);
        assert_eq!(panel.init(&mut ctx), InitOutcome::AlreadyInitialized);
        assert_eq!(ctx.registry(), &[panel.id()]);
    }

    #[test]
    fn disabled_context_suppresses_new_panels() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let a = live_panel(&mut ctx, &mut surface);

        ctx.set_disabled(true);
        assert!(ctx.registry().is_empty());
        assert_eq!(ctx.take_pending_destroy(), vec![a.id()]);

        let mut b = DebugTextPanel::new(&mut ctx, Vec2::ZERO);
        assert_eq!(b.init(&mut ctx), InitOutcome::Suppressed);
        assert!(b.is_destroyed());
        assert!(ctx.registry().is_empty());
    }

    #[test]
    fn doomed_panel_stops_before_host_teardown() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.set_state(&mut ctx, true, &mut surface);
        let (cell, reader) = shared_text("a");
        panel.setup_every_frame(reader, &mut ctx, &mut surface);
        ctx.take_pending_remeasures();

        ctx.set_disabled(true);
        *cell.lock().unwrap() = "b".into();
        panel.tick(&mut ctx, 0.016, &mut surface);
        assert_eq!(surface.text, "a");
        assert!(!ctx.has_pending_remeasure(panel.id()));

        surface.measured_text_size = Vec2::new(20.0, 8.0);
        assert_eq!(panel.apply_remeasure(&ctx, &mut surface), None);

        assert_eq!(ctx.take_pending_destroy(), vec![panel.id()]);
        panel.dispose(&mut ctx);
        assert!(panel.is_destroyed());
    }

    #[test]
    fn destroyed_panel_ignores_everything() {
        let mut ctx = DebugTextContext::new();
        let mut surface = PanelSurface::default();
        let mut panel = live_panel(&mut ctx, &mut surface);
        panel.dispose(&mut ctx);
        panel.dispose(&mut ctx);
        assert!(ctx.registry().is_empty());

        let before = surface.clone();
        panel.set_state(&mut ctx, true, &mut surface);
        panel.setup_text("ignored", &mut ctx, &mut surface);
        panel.set_visible(false, &mut surface);
        panel.tick(&mut ctx, 1.0, &mut surface);
        assert_eq!(surface, before);
        assert!(!ctx.is_open());
        assert!(ctx.take_pending_remeasures().is_empty());
    }
}
