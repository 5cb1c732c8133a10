use alloc::sync::Arc;
use core::cmp;

use crate::layout::{Layout, LayoutStrategy};
use crate::options::TemplateSelector;
use crate::reconcile::{ActiveSet, CellHost};
use crate::surface::{DataSource, RenderSurface};
use crate::{
    Align, ConfigError, Edge, FrameState, IndexRange, Rect, RecyclerOptions, RecyclerStats,
    ScrollDirection, ScrollState, ScrollSteps, StepMetrics, ViewportState, compute_window,
};

/// Work requested since the last pass. Merged while inside `batch_update`.
#[derive(Clone, Copy, Debug, Default)]
struct Pending {
    update: bool,
    refresh: bool,
    reposition: bool,
    source_changed: bool,
}

impl Pending {
    fn any(&self) -> bool {
        self.update || self.refresh || self.reposition || self.source_changed
    }
}

/// Adapts the recycler's collaborators to the reconciler for the duration of one pass.
struct Host<'a, S: RenderSurface, D, L> {
    surface: &'a mut S,
    source: Option<&'a D>,
    layout: &'a L,
    template_for: &'a TemplateSelector<S::Template>,
    config_error: &'a mut Option<ConfigError>,
}

impl<S: RenderSurface, D, L> Host<'_, S, D, L> {
    fn report(&mut self, err: ConfigError) {
        if self.config_error.is_none() {
            rwarn!(error = %err, "configuration error; affected cells are skipped");
            *self.config_error = Some(err);
        }
    }
}

impl<S, D, L> CellHost<S::Handle, S::Template> for Host<'_, S, D, L>
where
    S: RenderSurface,
    D: DataSource<Item = S::Item>,
    L: LayoutStrategy,
{
    fn count(&self) -> usize {
        self.source.map_or(0, |s| s.count())
    }

    fn template_for(&mut self, index: usize) -> Option<S::Template> {
        let Some(template) = (self.template_for)(index) else {
            self.report(ConfigError::MissingTemplate { index });
            return None;
        };
        if !self.surface.has_template(&template) {
            self.report(ConfigError::UnavailableTemplate { index });
            return None;
        }
        Some(template)
    }

    fn instantiate(&mut self, template: &S::Template) -> S::Handle {
        self.surface.instantiate(template)
    }

    fn position(&mut self, handle: &mut S::Handle, index: usize) {
        self.surface.position(handle, self.layout.placement(index));
    }

    fn bind(&mut self, handle: &mut S::Handle, index: usize) {
        if let Some(item) = self.source.and_then(|s| s.item_at(index)) {
            self.surface.bind(handle, index, item);
        }
    }

    fn detach(&mut self, handle: &mut S::Handle) {
        self.surface.detach(handle);
    }

    fn destroy(&mut self, handle: S::Handle) {
        self.surface.destroy(handle);
    }
}

macro_rules! host {
    ($s:ident) => {
        Host {
            surface: &mut $s.surface,
            source: $s.source.as_ref(),
            layout: &$s.layout,
            template_for: &$s.options.template_for,
            config_error: &mut $s.config_error,
        }
    };
}

/// A recycling list: keeps exactly the visible (plus buffered) indexes materialized as cells.
///
/// The recycler owns the render surface, the layout, and the cells; it holds the data source by
/// whatever reference-like value you give it. Every state change runs one synchronous pass:
/// window computation, reconciliation against the previous window, and a single pool commit.
/// Use [`Self::batch_update`] to fold several changes into one pass.
///
/// Cells are only destroyed by [`Self::clear`]; call it before dropping the recycler if the
/// surface needs explicit teardown.
pub struct Recycler<S: RenderSurface, D, L = Layout> {
    options: RecyclerOptions<S::Template>,
    surface: S,
    source: Option<D>,
    layout: L,
    viewport: Option<Rect>,
    scroll_offset: f32,
    scroll_direction: Option<ScrollDirection>,
    active: ActiveSet<S::Handle, S::Template>,
    config_error: Option<ConfigError>,

    batch_depth: usize,
    pending: Pending,
}

impl<S, D, L> Recycler<S, D, L>
where
    S: RenderSurface,
    D: DataSource<Item = S::Item>,
    L: LayoutStrategy,
{
    /// Creates a recycler with no data source attached; nothing is materialized until one is
    /// provided via [`Self::set_source`] or [`Self::with_source`].
    pub fn new(options: RecyclerOptions<S::Template>, surface: S, mut layout: L) -> Self {
        rdebug!(
            buffer = options.buffer,
            enabled = options.enabled,
            "Recycler::new"
        );
        layout.recalculate(0);
        Self {
            viewport: options.initial_rect,
            scroll_offset: options.initial_offset,
            scroll_direction: None,
            options,
            surface,
            source: None,
            layout,
            active: ActiveSet::new(),
            config_error: None,
            batch_depth: 0,
            pending: Pending::default(),
        }
    }

    pub fn with_source(mut self, source: D) -> Self {
        self.set_source(Some(source));
        self
    }

    pub fn options(&self) -> &RecyclerOptions<S::Template> {
        &self.options
    }

    /// Replaces the options. Every retained cell is rebound, since templates may have changed.
    pub fn set_options(&mut self, options: RecyclerOptions<S::Template>) {
        let prev_rect = self.options.initial_rect;
        self.options = options;
        self.config_error = None;
        if self.viewport.is_none() && self.options.initial_rect != prev_rect {
            self.viewport = self.options.initial_rect;
        }
        rtrace!(
            buffer = self.options.buffer,
            enabled = self.options.enabled,
            "Recycler::set_options"
        );
        self.request(|p| p.refresh = true);
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RecyclerOptions<S::Template>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_template_for(
        &mut self,
        template_for: impl Fn(usize) -> Option<S::Template> + Send + Sync + 'static,
    ) {
        self.options.template_for = Arc::new(template_for);
        self.config_error = None;
        self.request(|p| p.refresh = true);
    }

    /// The surface gained or lost templates (e.g. via [`Self::surface_mut`]).
    ///
    /// Clears the stored configuration error and retries every index in the window.
    pub fn notify_templates_changed(&mut self) {
        self.config_error = None;
        self.request(|p| p.refresh = true);
    }

    pub fn set_on_source_changed(&mut self, f: Option<impl Fn(usize) + Send + Sync + 'static>) {
        self.options.on_source_changed = f.map(|f| Arc::new(f) as _);
    }

    pub fn buffer(&self) -> usize {
        self.options.buffer
    }

    pub fn set_buffer(&mut self, buffer: usize) {
        if self.options.buffer == buffer {
            return;
        }
        self.options.buffer = buffer;
        self.request(|p| p.update = true);
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    /// Disabling releases every cell to the pool (they are kept for reuse, not destroyed).
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.request(|p| p.update = true);
    }

    pub fn source(&self) -> Option<&D> {
        self.source.as_ref()
    }

    /// Attaches (or detaches, with `None`) the data source and returns the previous one.
    ///
    /// Behaves like [`Self::notify_changed`]: the layout is recalculated, retained cells are
    /// rebound, and `on_source_changed` fires.
    pub fn set_source(&mut self, source: Option<D>) -> Option<D> {
        let prev = core::mem::replace(&mut self.source, source);
        self.notify_changed();
        prev
    }

    /// The data source changed (items added, removed, replaced, or reordered).
    ///
    /// There is no change detection and no partial reflow: the layout is recalculated for the
    /// new count, indexes past the end are released, and every retained index is rebound.
    pub fn notify_changed(&mut self) {
        let count = self.count();
        rdebug!(count, "Recycler::notify_changed");
        self.layout.recalculate(count);
        self.request(|p| {
            p.refresh = true;
            p.source_changed = true;
        });
    }

    /// Current item count (0 when no source is attached).
    pub fn count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.count())
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Replaces the layout; active cells are re-placed and the window is recomputed.
    pub fn set_layout(&mut self, layout: L) {
        self.layout = layout;
        self.layout_changed();
    }

    /// Mutates the layout in place (spacing, padding, cell size, ...).
    pub fn update_layout(&mut self, f: impl FnOnce(&mut L)) {
        f(&mut self.layout);
        self.layout_changed();
    }

    fn layout_changed(&mut self) {
        let count = self.count();
        self.layout.recalculate(count);
        rdebug!(
            count,
            content_extent = self.layout.content_extent(),
            "Recycler::layout_changed"
        );
        self.request(|p| {
            p.reposition = true;
            p.update = true;
        });
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    pub fn set_viewport(&mut self, rect: Rect) {
        if self.viewport == Some(rect) {
            return;
        }
        self.viewport = Some(rect);
        self.request(|p| p.update = true);
    }

    /// Forgets the viewport geometry; the window becomes empty until a new one is set.
    pub fn clear_viewport(&mut self) {
        if self.viewport.take().is_some() {
            self.request(|p| p.update = true);
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Sets the scroll offset as reported by the host. The value is not clamped; the window
    /// computation clamps indexes instead.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        if self.scroll_offset == offset {
            return;
        }
        let prev = self.scroll_offset;
        self.scroll_offset = offset;
        self.scroll_direction = match offset.partial_cmp(&prev) {
            Some(cmp::Ordering::Greater) => Some(ScrollDirection::Forward),
            Some(cmp::Ordering::Less) => Some(ScrollDirection::Backward),
            _ => self.scroll_direction,
        };
        self.request(|p| p.update = true);
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: f32) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    pub fn content_extent(&self) -> f32 {
        self.layout.content_extent()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.layout
            .max_scroll_offset(self.viewport.unwrap_or_default())
    }

    pub fn clamp_scroll_offset(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_scroll_offset())
    }

    /// The offset that brings `index` to `align`. `None` when `index` is out of range.
    pub fn scroll_position_for(&self, index: usize, align: Align) -> Option<f32> {
        if index >= self.count() {
            return None;
        }
        Some(self.layout.scroll_position_for(
            index,
            align,
            self.viewport.unwrap_or_default(),
            self.scroll_offset,
        ))
    }

    /// Scrolls so that `index` lands at `align` and returns the applied offset.
    ///
    /// Out-of-range indexes are ignored (`None`, nothing changes).
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<f32> {
        let offset = self.scroll_position_for(index, align)?;
        self.set_scroll_offset(offset);
        Some(offset)
    }

    /// The window the next pass would materialize.
    pub fn window(&self) -> IndexRange {
        if !self.options.enabled || self.source.is_none() {
            return IndexRange::EMPTY;
        }
        compute_window(
            &self.layout,
            self.viewport,
            self.scroll_offset,
            self.count(),
            self.options.buffer,
        )
    }

    /// The currently materialized interval.
    pub fn active_range(&self) -> IndexRange {
        self.active.range()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.is_bound(index)
    }

    pub fn cell(&self, index: usize) -> Option<&S::Handle> {
        self.active.get(index).map(|c| &c.handle)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut S::Handle> {
        self.active.get_mut(index).map(|c| &mut c.handle)
    }

    pub fn cell_template(&self, index: usize) -> Option<&S::Template> {
        self.active.get(index).map(|c| &c.template)
    }

    /// Visits active cells in ascending index order.
    pub fn for_each_active(&self, mut f: impl FnMut(usize, &S::Handle)) {
        self.active.for_each_bound(|i, c| f(i, &c.handle));
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn stats(&self) -> RecyclerStats {
        let pool = self.active.pool();
        RecyclerStats {
            active: self.active.len(),
            pooled: pool.len(),
            pending_detach: pool.pending_detach(),
            created: pool.created(),
            reused: pool.reused(),
            skipped: self.active.skipped(),
        }
    }

    /// The first configuration error seen since options were last set.
    pub fn config_error(&self) -> Option<ConfigError> {
        self.config_error
    }

    /// Discrete scroll positions for a stepped scrollbar (0 when everything fits).
    pub fn scrollbar_steps(&self) -> usize {
        let Some(viewport) = self.viewport else {
            return 0;
        };
        let extent = self.layout.principal_extent();
        ScrollSteps::compute(&StepMetrics {
            viewport_extent: viewport.main,
            leading_padding: self.layout.leading_padding(Edge::Start),
            cell_size: extent.cell_size,
            spacing: extent.spacing,
            item_count: self.count(),
            row_count: self.layout.row_count(),
            items_per_row: self.layout.items_per_row(),
        })
    }

    /// Batches several updates into a single pass.
    ///
    /// Nestable; the pass runs when the outermost batch closes.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 && self.pending.any() {
            self.flush();
        }
    }

    /// Recomputes the window and reconciles, even if nothing was reported as changed.
    pub fn update(&mut self) {
        self.request(|p| p.update = true);
    }

    /// Full-list teardown: destroys every active and pooled cell.
    ///
    /// The recycler stays usable; the next pass instantiates fresh cells.
    pub fn clear(&mut self) {
        let _stats = self.stats();
        rdebug!(
            active = _stats.active,
            pooled = _stats.pooled,
            "Recycler::clear"
        );
        let mut host = host!(self);
        self.active.clear(&mut host);
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            rect: self.viewport,
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            offset: self.scroll_offset,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport + scroll in one pass. The offset is clamped to the current content.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.batch_update(|r| {
            match frame.viewport.rect {
                Some(rect) => r.set_viewport(rect),
                None => r.clear_viewport(),
            }
            r.set_scroll_offset_clamped(frame.scroll.offset);
        });
    }

    fn request(&mut self, f: impl FnOnce(&mut Pending)) {
        f(&mut self.pending);
        if self.batch_depth == 0 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        let pending = core::mem::take(&mut self.pending);
        let window = self.window();
        rtrace!(
            start = window.start,
            end = window.end,
            refresh = pending.refresh,
            "Recycler::flush"
        );

        let mut host = host!(self);
        if pending.reposition {
            self.active.reposition(&mut host);
        }
        if pending.refresh {
            self.active.refresh(window, &mut host);
        } else if pending.update || pending.reposition {
            self.active.reconcile(window, &mut host);
        }

        if pending.source_changed {
            if let Some(cb) = &self.options.on_source_changed {
                cb(self.count());
            }
        }
    }
}

impl<S, D, L> core::fmt::Debug for Recycler<S, D, L>
where
    S: RenderSurface,
    L: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Recycler")
            .field("options", &self.options)
            .field("layout", &self.layout)
            .field("viewport", &self.viewport)
            .field("scroll_offset", &self.scroll_offset)
            .field("active_range", &self.active.range())
            .field("has_source", &self.source.is_some())
            .field("config_error", &self.config_error)
            .finish_non_exhaustive()
    }
}
