use recycler::{Align, DataSource, Layout, LayoutStrategy, Rect, Recycler, RenderSurface};

use crate::{Easing, Tween};

/// A framework-neutral controller wrapping a [`recycler::Recycler`].
///
/// It holds no UI objects. Hosts drive it by calling:
/// - `on_viewport` / `on_scroll` when the UI reports geometry or user scrolling
/// - `tick(now_ms)` every frame while [`Self::is_animating`] is true
///
/// When the host owns a real scroll container, apply the offset returned by `tick()` to it; the
/// recycler is already in sync.
pub struct Controller<S: RenderSurface, D, L = Layout> {
    r: Recycler<S, D, L>,
    tween: Option<Tween>,
}

impl<S, D, L> Controller<S, D, L>
where
    S: RenderSurface,
    D: DataSource<Item = S::Item>,
    L: LayoutStrategy,
{
    pub fn new(r: Recycler<S, D, L>) -> Self {
        Self { r, tween: None }
    }

    pub fn recycler(&self) -> &Recycler<S, D, L> {
        &self.r
    }

    pub fn recycler_mut(&mut self) -> &mut Recycler<S, D, L> {
        &mut self.r
    }

    pub fn into_recycler(self) -> Recycler<S, D, L> {
        self.r
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn tween(&self) -> Option<&Tween> {
        self.tween.as_ref()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport(&mut self, rect: Rect) {
        self.r.set_viewport(rect);
    }

    /// Call this when the UI reports a scroll offset change (wheel, drag, keyboard).
    ///
    /// User scrolling wins: any active tween is cancelled.
    pub fn on_scroll(&mut self, offset: f32) {
        self.cancel_animation();
        self.r.set_scroll_offset(offset);
    }

    /// Advances an active tween and returns the applied offset, or `None` when idle.
    ///
    /// The final tick lands exactly on the target and ends the animation.
    pub fn tick(&mut self, now_ms: u64) -> Option<f32> {
        let tween = self.tween?;

        self.r.set_scroll_offset_clamped(tween.sample(now_ms));
        if tween.is_done(now_ms) {
            rtrace!(offset = self.r.scroll_offset(), "Controller::tick done");
            self.tween = None;
        }

        Some(self.r.scroll_offset())
    }

    /// Scrolls to `index` immediately (no animation) and returns the applied offset.
    ///
    /// `None` when `index` is out of range; nothing changes in that case.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f32> {
        self.cancel_animation();
        self.r.scroll_to_index(index, align)
    }

    /// Scrolls just enough to make `index` fully visible.
    pub fn ensure_visible(&mut self, index: usize) -> Option<f32> {
        self.scroll_to_index(index, Align::Auto)
    }

    /// Applies a scroll-to-offset immediately (no animation) and returns the clamped offset.
    pub fn scroll_to_offset(&mut self, offset: f32) -> f32 {
        self.cancel_animation();
        self.r.set_scroll_offset_clamped(offset);
        self.r.scroll_offset()
    }

    /// Starts (or retargets) a tween to `index`. Returns the target offset.
    ///
    /// `None` when `index` is out of range; a running tween is left untouched in that case.
    pub fn start_tween_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<f32> {
        let to = self.r.scroll_position_for(index, align)?;
        Some(self.start_tween_to_offset(to, now_ms, duration_ms, easing))
    }

    /// Starts (or retargets) a tween to `offset`. Returns the clamped target offset.
    ///
    /// A tween already in flight continues from its current sample, so retargeting never jumps.
    pub fn start_tween_to_offset(
        &mut self,
        offset: f32,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> f32 {
        let to = self.r.clamp_scroll_offset(offset);
        let tween = match self.tween {
            Some(mut t) => {
                t.retarget(now_ms, to, duration_ms);
                t.easing = easing;
                t
            }
            None => Tween::new(self.r.scroll_offset(), to, now_ms, duration_ms, easing),
        };
        rtrace!(from = tween.from, to, duration_ms, "Controller::start_tween");
        self.tween = Some(tween);
        to
    }
}

impl<S, D, L> core::fmt::Debug for Controller<S, D, L>
where
    S: RenderSurface,
    L: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("recycler", &self.r)
            .field("tween", &self.tween)
            .finish()
    }
}
